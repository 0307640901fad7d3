//! Framebuffer drawing context
//!
//! `FrameDc` owns a full RGB565 frame in RAM. Widgets draw into it; a
//! panel driver flushes the raw rows to the display afterwards. All
//! primitives clip against the frame bounds and an optional clip
//! rectangle, so widget code never has to range-check coordinates.

use font8x8::UnicodeFonts;

use vitrine_core::{Color, Point, Rect, Size};

use crate::bitmap::Bitmap;
use crate::context::{DrawContext, DrawError, GLYPH_WIDTH};

/// Owned RGB565 framebuffer
///
/// `W` and `H` are the frame dimensions in pixels. The buffer is stored
/// row-major as native-endian words; panel drivers convert to bus byte
/// order during flush.
pub struct FrameDc<const W: usize, const H: usize> {
    pixels: [[u16; W]; H],
    clip: Option<Rect>,
    dirty: bool,
}

impl<const W: usize, const H: usize> Default for FrameDc<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> FrameDc<W, H> {
    /// Create a frame cleared to black
    pub fn new() -> Self {
        Self {
            pixels: [[0; W]; H],
            clip: None,
            dirty: true,
        }
    }

    /// Frame width in pixels
    pub const fn width(&self) -> u16 {
        W as u16
    }

    /// Frame height in pixels
    pub const fn height(&self) -> u16 {
        H as u16
    }

    /// Restrict drawing to a region; `None` removes the restriction
    pub fn set_clip(&mut self, clip: Option<Rect>) {
        self.clip = clip;
    }

    /// Pixel at (x, y)
    pub fn pixel(&self, x: u16, y: u16) -> Option<Color> {
        if (x as usize) < W && (y as usize) < H {
            Some(Color(self.pixels[y as usize][x as usize]))
        } else {
            None
        }
    }

    /// Raw words of one row, for panel flush
    pub fn row_words(&self, y: usize) -> Option<&[u16; W]> {
        self.pixels.get(y)
    }

    /// Whether the frame changed since the last `mark_clean`
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the frame as flushed
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Drawable region after clipping
    fn effective_clip(&self) -> Rect {
        let screen = Rect::new(0, 0, W as u16, H as u16);
        match self.clip {
            Some(clip) => clip.intersection(&screen).unwrap_or_default(),
            None => screen,
        }
    }

    fn set_clipped(&mut self, x: i16, y: i16, color: Color, clip: &Rect) {
        if x >= clip.x && x < clip.right() && y >= clip.y && y < clip.bottom() {
            self.pixels[y as usize][x as usize] = color.0;
            self.dirty = true;
        }
    }
}

impl<const W: usize, const H: usize> DrawContext for FrameDc<W, H> {
    fn size(&self) -> Size {
        Size::new(W as u16, H as u16)
    }

    fn draw_pixel(&mut self, p: Point, color: Color) -> Result<(), DrawError> {
        let clip = self.effective_clip();
        self.set_clipped(p.x, p.y, color, &clip);
        Ok(())
    }

    fn clear(&mut self, color: Color) -> Result<(), DrawError> {
        self.fill_rect(Rect::new(0, 0, W as u16, H as u16), color)
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), DrawError> {
        let clip = self.effective_clip();
        if let Some(area) = rect.intersection(&clip) {
            for y in area.y..area.bottom() {
                let row = &mut self.pixels[y as usize];
                row[area.x as usize..area.right() as usize].fill(color.0);
            }
            self.dirty = true;
        }
        Ok(())
    }

    fn draw_hline(&mut self, start: Point, len: u16, color: Color) -> Result<(), DrawError> {
        self.fill_rect(Rect::new(start.x, start.y, len, 1), color)
    }

    fn draw_vline(&mut self, start: Point, len: u16, color: Color) -> Result<(), DrawError> {
        self.fill_rect(Rect::new(start.x, start.y, 1, len), color)
    }

    fn draw_text(&mut self, pos: Point, text: &str, fg: Color) -> Result<(), DrawError> {
        let clip = self.effective_clip();
        let mut x = pos.x;

        for ch in text.chars() {
            if x >= clip.right() {
                break;
            }
            // Each glyph row byte holds 8 pixels, LSB leftmost
            for (row, bits) in glyph(ch).iter().enumerate() {
                for col in 0..GLYPH_WIDTH as i16 {
                    if (bits >> col) & 1 == 1 {
                        self.set_clipped(x + col, pos.y + row as i16, fg, &clip);
                    }
                }
            }
            x += GLYPH_WIDTH as i16;
        }
        Ok(())
    }

    fn invert_rect(&mut self, rect: Rect) -> Result<(), DrawError> {
        let clip = self.effective_clip();
        if let Some(area) = rect.intersection(&clip) {
            for y in area.y..area.bottom() {
                let row = &mut self.pixels[y as usize];
                for word in &mut row[area.x as usize..area.right() as usize] {
                    *word = !*word;
                }
            }
            self.dirty = true;
        }
        Ok(())
    }

    fn blit(&mut self, bitmap: &Bitmap<'_>, at: Point) -> Result<(), DrawError> {
        let clip = self.effective_clip();
        for y in 0..bitmap.height() {
            for x in 0..bitmap.width() {
                if let Some(color) = bitmap.pixel(x, y) {
                    self.set_clipped(at.x + x as i16, at.y + y as i16, color, &clip);
                }
            }
        }
        Ok(())
    }
}

/// Glyph bitmap for a character, substituting `'?'` for unknown ones
fn glyph(ch: char) -> [u8; 8] {
    font8x8::BASIC_FONTS
        .get(ch)
        .or_else(|| font8x8::BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}
