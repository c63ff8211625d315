pub const PIXEL_BYTES: usize = 4;

pub type Color = [u8; PIXEL_BYTES];

/// An RGBA8 pixel buffer for a single frame.
pub struct RenderFrame<'a> {
    pub width: u32,
    pub height: u32,
    pub buffer: &'a mut [u8],
}

impl<'a> RenderFrame<'a> {
    /// Fills a rectangle given in signed screen coordinates, clipped to the frame.
    pub fn fill_rect(&mut self, x: i64, y: i64, width: i64, height: i64, color: Color) {
        let x_start = x.clamp(0, self.width as i64) as usize;
        let x_end = (x + width).clamp(0, self.width as i64) as usize;
        let y_start = y.clamp(0, self.height as i64) as usize;
        let y_end = (y + height).clamp(0, self.height as i64) as usize;

        if x_start >= x_end {
            return;
        }

        let row_bytes = self.width as usize * PIXEL_BYTES;

        for y in y_start..y_end {
            let row_start = y * row_bytes;
            let Some(row) = self
                .buffer
                .get_mut(row_start + x_start * PIXEL_BYTES..row_start + x_end * PIXEL_BYTES)
            else {
                return;
            };

            for pixel in row.chunks_exact_mut(PIXEL_BYTES) {
                pixel.copy_from_slice(&color);
            }
        }
    }

    pub fn fill(&mut self, color: Color) {
        for pixel in self.buffer.chunks_exact_mut(PIXEL_BYTES) {
            pixel.copy_from_slice(&color);
        }
    }
}
