use crankgb_core::{ScanlineSink, LCD_HEIGHT, LCD_WIDTH};

/// One emulated frame's worth of 2-bit shades, 0 = white .. 3 = black.
///
/// Owned by the session's tick; the core writes it row by row through the
/// [`ScanlineSink`] impl and the encoder reads it back once the frame is
/// complete.
pub struct ShadeBuffer {
    rows: [[u8; LCD_WIDTH]; LCD_HEIGHT],
}

impl Default for ShadeBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl ShadeBuffer {
    pub fn new() -> Self {
        Self {
            rows: [[0; LCD_WIDTH]; LCD_HEIGHT],
        }
    }

    pub fn row(&self, y: usize) -> &[u8; LCD_WIDTH] {
        &self.rows[y]
    }
}

impl ScanlineSink for ShadeBuffer {
    fn on_scanline(&mut self, line: usize, pixels: &[u8; LCD_WIDTH]) {
        // Pure transcription; only the low 2 bits of each value are shades.
        for (dst, &px) in self.rows[line].iter_mut().zip(pixels.iter()) {
            *dst = px & 3;
        }
    }
}
