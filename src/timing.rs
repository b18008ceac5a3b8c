/// Frame pacing strategy.
#[derive(Debug, PartialEq, Default, Clone, Copy)]
pub enum Timing {
    /// Rely on the display's vertical sync alone.
    #[default]
    Vsync,
    /// Present as fast as possible, no pacing at all.
    Immediate,
    /// Vsync plus an idle-sleep FPS cap.
    VsyncLimitFPS(f64),
    /// No vsync, pace purely with the idle-sleep FPS cap.
    ImmediateLimitFPS(f64),
}

// 3x 120Hz, 6x 60Hz. Fine enough to snap to any common display interval.
pub(crate) const ELAPSED_QUANT_SIZE: f64 = 1.0 / 1440.0;

/// Rounds `value` to the nearest multiple of `size`. Values too small to
/// quantize are passed through, which matters for immediate-mode timing at
/// very fast frame rates.
#[inline(always)]
pub(crate) fn quantize(value: f64, size: f64) -> f64 {
    let result = (value / size).round() * size;
    if result < f64::EPSILON {
        value
    } else {
        result
    }
}
