use crossterm::style;
use crossterm::style::Stylize;

use crate::PixelSize;
use crate::color::Rgba;

/// Upper half block. Its foreground paints the top pixel of a terminal character, its background
/// the bottom pixel.
const HALF_BLOCK: char = '\u{2580}';

/// An axis aligned rectangle of device pixels
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: PixelSize,
    pub y: PixelSize,
    pub w: PixelSize,
    pub h: PixelSize,
}

impl Rect {
    pub const fn square(x: PixelSize, y: PixelSize, s: PixelSize) -> Self {
        Self { x, y, w: s, h: s }
    }
}

/// Anything cells can be painted onto.
pub trait Surface {
    /// Width and height, in device pixels
    fn size(&self) -> (PixelSize, PixelSize);

    /// Clear `rect` to the background, then fill it with `color`. Translucent colors are therefore
    /// blended with the background, never with whatever was drawn there before. Parts of `rect`
    /// outside of the surface are ignored.
    fn fill_rect(&mut self, rect: Rect, color: Rgba);
}

/// An in-memory surface. Rendering turns it into a frame of colored half blocks, two pixels per
/// terminal character.
pub struct Canvas {
    /// The pixel buffer, only ever holds opaque colors
    pb: Vec<Rgba>,

    /// The frame buffer
    fb: String,

    /// Width of the pixel buffer
    w: usize,

    /// Height of the pixel buffer
    h: usize,

    /// What translucent colors are composited onto
    bg: Rgba,
}

impl Canvas {
    /// # Panics
    ///
    /// If `background` is not opaque.
    pub fn new(w: PixelSize, h: PixelSize, background: Rgba) -> Self {
        assert!(background.is_opaque(), "canvas background must be opaque");

        let (w, h) = (w as usize, h as usize);

        // Each character is a glyph of 3 bytes surrounded by color escapes of about 40 bytes,
        // plus one newline per row.
        let fb = String::with_capacity(w * h.div_ceil(2) * 43 + h.div_ceil(2));

        Self {
            pb: vec![background; w * h],
            fb,
            w,
            h,
            bg: background,
        }
    }

    /// Color of the pixel at `(x, y)`
    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        assert!(x < self.w, "x is out of bounds");
        assert!(y < self.h, "y is out of bounds");

        self.pb[self.xy_from(x, y)]
    }

    /// Build the frame: one line per pair of pixel rows, where each character shows the pixel on
    /// the top row in its foreground and the one below in its background. With an odd height the
    /// last line shows the background below.
    pub fn render(&mut self) -> &str {
        self.fb.clear();

        for row in 0..self.h.div_ceil(2) {
            if row > 0 {
                self.fb.push('\n');
            }

            let (top, bot) = (2 * row, 2 * row + 1);

            for x in 0..self.w {
                let fg = self.pb[self.xy_from(x, top)];
                let bg = if bot < self.h {
                    self.pb[self.xy_from(x, bot)]
                } else {
                    self.bg
                };

                let glyph = style::style(HALF_BLOCK).with(fg.into()).on(bg.into());
                self.fb.push_str(&glyph.to_string());
            }
        }
        self.fb.push('\n');

        &self.fb
    }

    fn xy_from(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }
}

impl Surface for Canvas {
    fn size(&self) -> (PixelSize, PixelSize) {
        (self.w as PixelSize, self.h as PixelSize)
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        let color = if color.is_opaque() {
            color
        } else {
            color.over(self.bg)
        };

        let x1 = (rect.x.saturating_add(rect.w) as usize).min(self.w);
        let y1 = (rect.y.saturating_add(rect.h) as usize).min(self.h);

        for y in rect.y as usize..y1 {
            for x in rect.x as usize..x1 {
                let i = self.xy_from(x, y);
                self.pb[i] = color;
            }
        }
    }
}
