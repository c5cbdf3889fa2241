//! The monochrome pixel grid the chipset draws into.
use std::fmt;

use crate::definitions::display;

/// What happens to sprite pixels that land past the display edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteEdge {
    /// Pixels outside of the display are dropped.
    Clip,
    /// Pixels outside of the display reappear on the opposite side. Some roms expect this.
    Wrap,
}

impl Default for SpriteEdge {
    fn default() -> Self {
        SpriteEdge::Clip
    }
}

/// The width of a single sprite row in pixels
const SPRITE_WIDTH: usize = 8;

/// The graphics of the Chip 8 are black and white and the screen has a total of `2048` pixels
/// `(64 x 32)`. Every pixel is either filled or not, sprites are always XOR-ed onto the
/// existing image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    edge: SpriteEdge,
    /// row major storage
    pixels: Vec<bool>,
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new(display::WIDTH, display::HEIGHT)
    }
}

impl Framebuffer {
    /// Creates a cleared framebuffer, that clips sprites at the edges.
    pub fn new(width: usize, height: usize) -> Self {
        Self::with_edge(width, height, SpriteEdge::Clip)
    }

    /// Creates a cleared framebuffer with the given edge behaviour.
    pub fn with_edge(width: usize, height: usize, edge: SpriteEdge) -> Self {
        assert!(width > 0 && height > 0, "A display needs at least one pixel.");
        Self {
            width,
            height,
            edge,
            pixels: vec![false; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn edge(&self) -> SpriteEdge {
        self.edge
    }

    /// Turns every pixel off.
    pub fn clear(&mut self) {
        self.pixels.iter_mut().for_each(|pixel| *pixel = false);
    }

    /// Checks if the pixel at the given coordinate is filled, coordinates outside of the
    /// display are never filled.
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.pixels[y * self.width + x]
    }

    /// Returns true if not a single pixel is filled.
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|pixel| !pixel)
    }

    /// Iterates over the rows of the display from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.pixels.chunks(self.width)
    }

    /// Draws the sprite at the given location.
    ///
    /// Every row is a byte and the most significant bit is the leftmost pixel. Each set bit
    /// toggles the pixel underneath it. Returns true if at least one pixel was turned from
    /// filled to unfilled.
    ///
    /// # Example
    /// ```rust
    /// # use chip::framebuffer::Framebuffer;
    /// let mut fb = Framebuffer::default();
    /// assert!(!fb.draw(0, 0, &[0xF0]));
    /// assert!(fb.is_filled(3, 0));
    /// assert!(fb.draw(0, 0, &[0xF0]));
    /// assert!(fb.is_blank());
    /// ```
    pub fn draw(&mut self, x: usize, y: usize, rows: &[u8]) -> bool {
        let mut collision = false;

        for (dy, row) in rows.iter().enumerate() {
            for dx in 0..SPRITE_WIDTH {
                let mask = 0x80 >> dx;
                if row & mask == 0 {
                    continue;
                }

                let (px, py) = match self.position(x + dx, y + dy) {
                    Some(pos) => pos,
                    None => continue,
                };

                let pixel = &mut self.pixels[py * self.width + px];
                if *pixel {
                    collision = true;
                }
                *pixel = !*pixel;
            }
        }

        collision
    }

    /// maps the raw coordinate onto the display, according to the edge policy
    fn position(&self, x: usize, y: usize) -> Option<(usize, usize)> {
        match self.edge {
            SpriteEdge::Clip if x < self.width && y < self.height => Some((x, y)),
            SpriteEdge::Clip => None,
            SpriteEdge::Wrap => Some((x % self.width, y % self.height)),
        }
    }
}

const FILLED: char = '#';
const EMPTY: char = '.';

/// Renders the display as text, one line per row.
impl fmt::Display for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut res = String::with_capacity((self.width + 1) * self.height);
        for row in self.rows() {
            res.extend(row.iter().map(|&pixel| if pixel { FILLED } else { EMPTY }));
            res.push('\n');
        }
        if let Some(index) = res.rfind('\n') {
            res.truncate(index);
        }
        write!(f, "{}", res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// the glyph for zero
    const ZERO: [u8; 5] = [0xF0, 0x90, 0x90, 0x90, 0xF0];

    #[test]
    fn test_default_size() {
        let fb = Framebuffer::default();
        assert_eq!(fb.width(), display::WIDTH);
        assert_eq!(fb.height(), display::HEIGHT);
        assert_eq!(fb.rows().count(), display::HEIGHT);
        assert_eq!(fb.pixels.len(), display::RESOLUTION);
        assert!(fb.is_blank());
        assert_eq!(fb.edge(), SpriteEdge::Clip);
    }

    #[test]
    fn test_double_draw_restores() {
        let mut fb = Framebuffer::default();
        assert!(!fb.draw(10, 5, &ZERO));
        assert!(!fb.is_blank());
        assert!(fb.is_filled(10, 5));
        assert!(fb.is_filled(13, 5));
        assert!(!fb.is_filled(11, 6));
        assert!(fb.draw(10, 5, &ZERO));
        assert!(fb.is_blank());
    }

    #[test]
    fn test_xor_without_erasing() {
        let mut fb = Framebuffer::default();
        assert!(!fb.draw(0, 0, &[0xF0]));
        // the pixels do not overlap so nothing is erased
        assert!(!fb.draw(0, 0, &[0x0F]));
        for x in 0..8 {
            assert!(fb.is_filled(x, 0));
        }
        // a partial overlap does erase
        assert!(fb.draw(6, 0, &[0xC0]));
        assert!(!fb.is_filled(6, 0));
        assert!(!fb.is_filled(7, 0));
    }

    #[test]
    fn test_clip_at_edges() {
        let mut fb = Framebuffer::default();
        let (w, h) = (fb.width(), fb.height());
        assert!(!fb.draw(w - 4, h - 1, &[0xFF, 0xFF]));
        for x in (w - 4)..w {
            assert!(fb.is_filled(x, h - 1));
        }
        // nothing wrapped around
        for x in 0..4 {
            assert!(!fb.is_filled(x, h - 1));
            assert!(!fb.is_filled(x, 0));
        }
        assert_eq!(fb.pixels.iter().filter(|p| **p).count(), 4);
        assert!(!fb.is_filled(w, h - 1));
    }

    #[test]
    fn test_fully_outside_draws_nothing() {
        let mut fb = Framebuffer::default();
        assert!(!fb.draw(200, 200, &ZERO));
        assert!(fb.is_blank());
    }

    #[test]
    fn test_wrap_at_edges() {
        let mut fb = Framebuffer::with_edge(display::WIDTH, display::HEIGHT, SpriteEdge::Wrap);
        let (w, h) = (fb.width(), fb.height());
        assert!(!fb.draw(w - 4, h - 1, &[0xFF, 0xFF]));
        for x in 0..4 {
            assert!(fb.is_filled(x, h - 1));
            assert!(fb.is_filled(x, 0));
        }
        assert!(fb.is_filled(w - 1, 0));
    }

    #[test]
    fn test_clear() {
        let mut fb = Framebuffer::default();
        fb.draw(0, 0, &ZERO);
        fb.clear();
        assert!(fb.is_blank());
    }

    #[test]
    fn test_text_render() {
        let mut fb = Framebuffer::new(4, 2);
        fb.draw(0, 0, &[0xA0, 0x50]);
        assert_eq!(format!("{}", fb), "#.#.\n.#.#");
    }
}
