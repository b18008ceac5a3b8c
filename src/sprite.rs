use sdl3::pixels::Color;

/// A small owned rectangle of RGBA pixels.
///
/// Sprites start fully transparent and are drawn into the engine's
/// framebuffer with [`App::draw_sprite`](crate::App::draw_sprite), which
/// clips against the buffer edges and applies source-over alpha blending.
pub struct Sprite {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Sprite {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width * height * 4) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sets a single pixel. Coordinates outside the sprite are a
    /// programming error.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        let i = self.index(x, y);
        self.pixels[i] = color.r;
        self.pixels[i + 1] = color.g;
        self.pixels[i + 2] = color.b;
        self.pixels[i + 3] = color.a;
    }

    /// Reads a single pixel back. Coordinates outside the sprite are a
    /// programming error.
    pub fn get_pixel(&self, x: u32, y: u32) -> Color {
        let i = self.index(x, y);
        Color::RGBA(
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        )
    }

    /// Fills the whole sprite with one color.
    pub fn fill(&mut self, color: Color) {
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk[0] = color.r;
            chunk[1] = color.g;
            chunk[2] = color.b;
            chunk[3] = color.a;
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "sprite pixel ({}, {}) out of bounds ({}x{})",
            x,
            y,
            self.width,
            self.height
        );
        ((y * self.width + x) * 4) as usize
    }

    /// Composites the sprite into an RGB24 framebuffer at (x, y), clipping
    /// against the buffer edges. Fully transparent pixels are skipped,
    /// everything else is source-over blended.
    pub(crate) fn blit_to(&self, fb: &mut [u8], fb_width: u32, fb_height: u32, x: i32, y: i32) {
        for sy in 0..self.height {
            let dy = y + sy as i32;
            if dy < 0 || dy >= fb_height as i32 {
                continue;
            }
            for sx in 0..self.width {
                let dx = x + sx as i32;
                if dx < 0 || dx >= fb_width as i32 {
                    continue;
                }
                let src = ((sy * self.width + sx) * 4) as usize;
                let a = self.pixels[src + 3] as u32;
                if a == 0 {
                    continue;
                }
                let dst = ((dy as u32 * fb_width + dx as u32) * 3) as usize;
                for c in 0..3 {
                    let s = self.pixels[src + c] as u32;
                    let d = fb[dst + c] as u32;
                    fb[dst + c] = ((s * a + d * (255 - a)) / 255) as u8;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_round_trip() {
        let mut sprite = Sprite::new(3, 3);
        sprite.set_pixel(1, 2, Color::RGBA(10, 20, 30, 255));
        assert_eq!(sprite.get_pixel(1, 2), Color::RGBA(10, 20, 30, 255));
        assert_eq!(sprite.get_pixel(0, 0), Color::RGBA(0, 0, 0, 0));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn out_of_bounds_pixel_panics() {
        let mut sprite = Sprite::new(2, 2);
        sprite.set_pixel(2, 0, Color::RGBA(255, 255, 255, 255));
    }

    #[test]
    fn opaque_blit_overwrites_destination() {
        let mut sprite = Sprite::new(1, 1);
        sprite.set_pixel(0, 0, Color::RGBA(100, 150, 200, 255));

        let mut fb = vec![0u8; 2 * 2 * 3];
        sprite.blit_to(&mut fb, 2, 2, 1, 1);
        // Bottom-right pixel replaced, everything else untouched.
        assert_eq!(&fb[9..12], &[100, 150, 200]);
        assert!(fb[..9].iter().all(|&b| b == 0));
    }

    #[test]
    fn translucent_blit_blends() {
        let mut sprite = Sprite::new(1, 1);
        sprite.set_pixel(0, 0, Color::RGBA(255, 255, 255, 128));

        let mut fb = vec![0u8; 3];
        sprite.blit_to(&mut fb, 1, 1, 0, 0);
        // 255 * 128 / 255 == 128.
        assert_eq!(&fb[..], &[128, 128, 128]);
    }

    #[test]
    fn blit_clips_at_buffer_edges() {
        let mut sprite = Sprite::new(2, 2);
        sprite.fill(Color::RGBA(255, 0, 0, 255));

        let mut fb = vec![0u8; 2 * 2 * 3];
        // Hangs off the top-left corner: only (0, 0) lands in the buffer.
        sprite.blit_to(&mut fb, 2, 2, -1, -1);
        assert_eq!(&fb[0..3], &[255, 0, 0]);
        assert!(fb[3..].iter().all(|&b| b == 0));
    }

    #[test]
    fn transparent_pixels_leave_destination_alone() {
        let sprite = Sprite::new(2, 2);
        let mut fb = vec![7u8; 2 * 2 * 3];
        sprite.blit_to(&mut fb, 2, 2, 0, 0);
        assert!(fb.iter().all(|&b| b == 7));
    }
}
