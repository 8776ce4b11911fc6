pub mod constants;
pub mod error;
pub mod math;
pub mod palette;
pub mod types;

pub use error::{GridError, PaletteError};
pub use palette::{Palette, PaletteEntry};
pub use types::{CellCoord, ColorIndex, PosePosition, StorageKey};
