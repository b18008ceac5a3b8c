use sdl3::rect::Rect;

/// The scaling strategy used to present the fixed-resolution framebuffer in
/// the window, and to map mouse positions back into buffer coordinates.
#[derive(Debug, PartialEq, Default, Clone, Copy)]
pub enum Scaling {
    /// Fits the framebuffer to the window while preserving the aspect
    /// ratio, letterboxing with the background color.
    #[default]
    PreserveAspect,

    /// Same as PreserveAspect, but rounds the scale factor down to a whole
    /// number for crisp pixel art. Usually increases the letterbox bars.
    Integer,

    /// Stretches the framebuffer to the window, disregarding aspect ratio.
    StretchToWindow,
}

impl Scaling {
    /// Scale factors from buffer to window coordinates.
    fn factors(&self, window: (u32, u32), buffer: (u32, u32)) -> (f32, f32) {
        match self {
            Scaling::PreserveAspect => {
                let scale = window.1 as f32 / buffer.1 as f32;
                (scale, scale)
            }
            Scaling::Integer => {
                let scale = (window.1 as f32 / buffer.1 as f32).floor().max(1.0);
                (scale, scale)
            }
            Scaling::StretchToWindow => (
                window.0 as f32 / buffer.0 as f32,
                window.1 as f32 / buffer.1 as f32,
            ),
        }
    }

    /// Destination rectangle of the framebuffer within the window, centered
    /// with letterbox gaps. `None` means "fill the whole window".
    pub(crate) fn target_rect(&self, window: (u32, u32), buffer: (u32, u32)) -> Option<Rect> {
        match self {
            Scaling::PreserveAspect | Scaling::Integer => {
                let (scale_x, scale_y) = self.factors(window, buffer);
                let new_width = buffer.0 as f32 * scale_x;
                let new_height = buffer.1 as f32 * scale_y;
                let gap_x = (window.0 as f32 - new_width) / 2.0;
                let gap_y = (window.1 as f32 - new_height) / 2.0;
                Some(Rect::new(
                    gap_x as i32,
                    gap_y as i32,
                    new_width as u32,
                    new_height as u32,
                ))
            }
            Scaling::StretchToWindow => None,
        }
    }

    /// Maps a window-space position into buffer coordinates, inverting
    /// [`target_rect`](Self::target_rect). The result is clamped to the
    /// buffer so a pointer in the letterbox gap maps to an edge pixel.
    pub(crate) fn window_to_buffer(
        &self,
        window: (u32, u32),
        buffer: (u32, u32),
        pos: (f32, f32),
    ) -> (i32, i32) {
        let (scale_x, scale_y) = self.factors(window, buffer);
        let (gap_x, gap_y) = match self {
            Scaling::PreserveAspect | Scaling::Integer => (
                (window.0 as f32 - buffer.0 as f32 * scale_x) / 2.0,
                (window.1 as f32 - buffer.1 as f32 * scale_y) / 2.0,
            ),
            Scaling::StretchToWindow => (0.0, 0.0),
        };
        let x = ((pos.0 - gap_x) / scale_x).floor() as i32;
        let y = ((pos.1 - gap_y) / scale_y).floor() as i32;
        (
            x.clamp(0, buffer.0 as i32 - 1),
            y.clamp(0, buffer.1 as i32 - 1),
        )
    }
}
