#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

mod error;
mod input;
mod scaling;
mod sprite;
mod timing;

pub use error::{EngineError, EngineResult};
pub use input::{ButtonState, Input};
pub use scaling::Scaling;
pub use sprite::Sprite;
pub use timing::Timing;

pub use sdl3;
pub use smooth_buffer::SmoothBuffer;

use log::{debug, error};
use sdl3::{
    event::Event,
    pixels::{Color, PixelFormat},
    rect::Rect,
    render::{Canvas, Texture, TextureCreator},
    sys::pixels::SDL_PixelFormat,
    video::{Window, WindowContext},
    EventPump, Sdl,
};
use std::time::{Duration, Instant};
use timing::{quantize, ELAPSED_QUANT_SIZE};

/// A struct that provides SDL initialization and stores the SDL context and
/// its associated data. Owns a fixed-resolution RGB framebuffer that sprites
/// are composited into each frame, then presented scaled to the window.
pub struct App {
    /// Set to true when a quit-class event is observed. Consult after each
    /// frame.
    pub quit_requested: bool,
    /// Keyboard and mouse snapshot for the current frame. Refreshed by
    /// [`frame_start`](Self::frame_start) before any update logic runs.
    pub input: Input,
    /// Prints the current FPS value to the log every f32 seconds.
    pub print_fps_interval: Option<f32>,
    /// Background color the framebuffer is cleared to on every frame start.
    pub bg_color: Color,
    // SDL
    /// The internal SDL canvas.
    pub canvas: Canvas<Window>,
    /// The internal SDL texture creator associated with the canvas.
    pub texture_creator: TextureCreator<WindowContext>,
    /// The internal SDL context.
    pub context: Sdl,
    /// Cache for the event pump.
    pub events: EventPump,
    // Presentation
    pixel_buffer: Texture,
    framebuffer: Vec<u8>,
    width: u32,
    height: u32,
    timing: Timing,
    scaling: Scaling,
    // Timing
    app_time: Instant,
    last_second: Instant,
    frame_start: Instant,
    update_time_buffer: SmoothBuffer<60, f64>,
    elapsed_time: f64,     // Whole frame time at current FPS.
    elapsed_time_raw: f64, // Elapsed time without quantizing.
}

impl App {
    /// Returns a result containing a new App with a fixed-resolution
    /// framebuffer of `width` x `height`, shown in a resizable window
    /// initially sized `width * pixel_scale` x `height * pixel_scale`.
    ///
    /// Any failure here is fatal; resources acquired so far are released by
    /// drop when the error propagates.
    pub fn new(
        name: &str,
        width: u32,
        height: u32,
        pixel_scale: u32,
        timing: Timing,
        scaling: Scaling,
    ) -> EngineResult<App> {
        let context = sdl3::init().map_err(|e| EngineError::Setup(e.to_string()))?;

        let video_subsystem = context
            .video()
            .map_err(|e| EngineError::Setup(e.to_string()))?;
        let window = video_subsystem
            .window(name, width * pixel_scale, height * pixel_scale)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| EngineError::Setup(e.to_string()))?;

        let canvas = window.into_canvas();
        let texture_creator = canvas.texture_creator();

        let pixel_buffer = texture_creator
            .create_texture_streaming(
                unsafe { PixelFormat::from_ll(SDL_PixelFormat::RGB24) },
                width,
                height,
            )
            .map_err(|e| EngineError::Texture(e.to_string()))?;

        let events = context
            .event_pump()
            .map_err(|e| EngineError::Setup(e.to_string()))?;

        Ok(Self {
            quit_requested: false,
            input: Input::new(),
            print_fps_interval: None,
            bg_color: Color::RGBA(0, 0, 0, 255),
            canvas,
            texture_creator,
            context,
            events,
            pixel_buffer,
            framebuffer: vec![0; (width * height * 3) as usize],
            width,
            height,
            timing,
            scaling,
            app_time: Instant::now(),
            last_second: Instant::now(),
            frame_start: Instant::now(),
            update_time_buffer: SmoothBuffer::pre_filled(1.0 / 120.0),
            elapsed_time: 0.0,
            elapsed_time_raw: 0.0,
        })
    }

    /// The framebuffer width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// The framebuffer height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The window width, which is independent from the framebuffer.
    pub fn window_width(&self) -> u32 {
        self.canvas.window().size().0
    }

    /// The window height, which is independent from the framebuffer.
    pub fn window_height(&self) -> u32 {
        self.canvas.window().size().1
    }

    /// The amount of time in seconds each frame takes to update and draw.
    /// In the vsync modes this is quantized to the nearest common display
    /// interval (60Hz, 72Hz, 120Hz, etc.) for smooth, predictable
    /// delta-timing.
    pub fn elapsed_time(&self) -> f64 {
        self.elapsed_time
    }

    /// The elapsed time without any quantization.
    pub fn elapsed_time_raw(&self) -> f64 {
        self.elapsed_time_raw
    }

    /// How long the frame took to update before presenting, averaged over
    /// the last 60 frames.
    pub fn update_time(&self) -> f64 {
        self.update_time_buffer.average()
    }

    /// The current frame rate.
    pub fn fps(&self) -> f64 {
        1.0 / self.elapsed_time
    }

    /// Time since the start of the app.
    pub fn time(&self) -> Duration {
        self.app_time.elapsed()
    }

    /// The current mouse position in framebuffer coordinates, clamped to
    /// the framebuffer bounds.
    pub fn mouse_pos(&self) -> (i32, i32) {
        let window = self.canvas.window().size();
        self.scaling
            .window_to_buffer(window, (self.width, self.height), self.input.mouse_window_pos())
    }

    /// Required at the start of a frame loop. Performs basic timing math,
    /// resets the input edges, then fully drains all pending events into
    /// the input snapshot so the rest of the frame sees consistent state.
    ///
    /// Every drained event is also offered to `on_event`; returning `true`
    /// requests a quit, as does a window-close event. Finally the
    /// framebuffer is cleared to `bg_color`.
    pub fn frame_start<F>(&mut self, mut on_event: F)
    where
        F: FnMut(&Event) -> bool,
    {
        // Whole frame time.
        self.elapsed_time_raw = self.frame_start.elapsed().as_secs_f64();
        self.elapsed_time = match self.timing {
            Timing::Vsync | Timing::VsyncLimitFPS(_) => {
                // Quantized to a minimum interval to ensure it matches the display.
                quantize(self.elapsed_time_raw, ELAPSED_QUANT_SIZE)
            }
            Timing::Immediate | Timing::ImmediateLimitFPS(_) => self.elapsed_time_raw,
        };
        self.frame_start = Instant::now();

        // Input
        self.input.begin_frame();
        for event in self.events.poll_iter() {
            if on_event(&event) {
                debug!("quit requested by event handler");
                self.quit_requested = true;
            }
            if let Event::Quit { .. } = event {
                debug!("window close requested");
                self.quit_requested = true;
            }
            self.input.handle_event(&event);
        }

        let bg = self.bg_color;
        self.draw_clear(bg);
        self.canvas.set_draw_color(self.bg_color);
        self.canvas.clear();
    }

    /// Fills the framebuffer with a single color. The alpha channel is
    /// ignored.
    pub fn draw_clear(&mut self, color: Color) {
        for chunk in self.framebuffer.chunks_exact_mut(3) {
            chunk[0] = color.r;
            chunk[1] = color.g;
            chunk[2] = color.b;
        }
    }

    /// Composites a sprite into the framebuffer at (x, y) in framebuffer
    /// coordinates, clipping against the edges.
    pub fn draw_sprite(&mut self, sprite: &Sprite, x: i32, y: i32) {
        sprite.blit_to(&mut self.framebuffer, self.width, self.height, x, y);
    }

    /// Required to be called at the end of a frame loop. Uploads the
    /// framebuffer, presents it scaled to the window and performs an idle
    /// wait if frame rate limiting is required.
    ///
    /// Upload and copy failures are logged and the frame carries on; they
    /// are never propagated.
    pub fn frame_finish(&mut self) {
        if self.app_time.elapsed().as_secs_f32() > 0.5 {
            // Skips the first frames
            self.update_time_buffer
                .push(self.frame_start.elapsed().as_secs_f64());
        }

        // Upload the framebuffer into the streaming texture, honoring the
        // texture's row pitch.
        let fb = &self.framebuffer;
        let width = self.width as usize;
        let height = self.height as usize;
        if let Err(e) = self.pixel_buffer.with_lock(None, |buf: &mut [u8], pitch: usize| {
            for y in 0..height {
                let src = y * width * 3;
                let dst = y * pitch;
                buf[dst..dst + width * 3].copy_from_slice(&fb[src..src + width * 3]);
            }
        }) {
            error!("framebuffer upload failed: {e}");
        }

        let dst: Option<Rect> = self
            .scaling
            .target_rect(self.canvas.window().size(), (self.width, self.height));
        if let Err(e) = self
            .canvas
            .copy_ex(
                &self.pixel_buffer,
                None,
                dst.map(sdl3::render::FRect::from),
                0.0,
                None,
                false,
                false,
            )
        {
            error!("framebuffer present failed: {e}");
        }

        self.canvas.present();

        match self.timing {
            // Optional FPS limiting
            Timing::VsyncLimitFPS(fps_limit) | Timing::ImmediateLimitFPS(fps_limit) => {
                const LARGE_STEP: f64 = 1.0 / 1000.0; // 1ms
                const SMALL_STEP: f64 = 1.0 / 10000.0; // 0.1ms
                let mut update_so_far = self.frame_start.elapsed().as_secs_f64();
                let target_time = 1.0 / fps_limit;
                while update_so_far < target_time {
                    update_so_far = self.frame_start.elapsed().as_secs_f64();
                    let diff = target_time - update_so_far;
                    if diff > LARGE_STEP {
                        std::thread::sleep(Duration::from_secs_f64(LARGE_STEP));
                    } else if diff > SMALL_STEP {
                        std::thread::sleep(Duration::from_secs_f64(SMALL_STEP));
                    } else {
                        break;
                    }
                }
            }
            // Vsync or Immediate don't sleep
            _ => {}
        };

        // Detects new second, prints FPS
        if let Some(interval) = self.print_fps_interval {
            if self.last_second.elapsed().as_secs_f32() > interval {
                self.last_second = Instant::now();
                debug!("FPS: {:.1}", 1.0 / self.elapsed_time);
            }
        }
    }
}
