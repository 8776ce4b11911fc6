use arvox_core::palette::{Palette, BLACK};
use arvox_core::types::ColorIndex;

/// Brush state: the colour the next voxel is placed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brush {
    color: ColorIndex,
}

impl Default for Brush {
    fn default() -> Self {
        Self::new()
    }
}

impl Brush {
    pub fn new() -> Self {
        Self { color: BLACK }
    }

    pub fn color(&self) -> ColorIndex {
        self.color
    }

    /// Cycle to the next palette colour, wrapping at the end.
    pub fn next_color(&mut self, palette: &Palette) {
        self.color = palette.next(self.color);
    }

    /// Cycle to the previous palette colour, wrapping at the start.
    pub fn prev_color(&mut self, palette: &Palette) {
        self.color = palette.prev(self.color);
    }
}
