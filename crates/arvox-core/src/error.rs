use glam::{DVec3, IVec3};
use thiserror::Error;

/// Errors raised while building a palette from RON data.
#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("Failed to parse palette RON: {0}")]
    ParseError(String),

    #[error("palette has no entries")]
    Empty,

    #[error("palette entry {position} has index {found} (indices must run 0..N-1 in order)")]
    IndexOutOfOrder { position: usize, found: u16 },
}

/// Errors raised when validating grid parameters.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("cell size must be positive, got {0}")]
    InvalidCellSize(i32),

    #[error("position {0} is outside the addressable grid")]
    PositionOutOfRange(DVec3),

    #[error("cell {0} has no storage key at this cell size")]
    CellOutOfRange(IVec3),
}

/// Validate a cell size before it reaches the coordinate mapper.
pub fn validate_cell_size(cell_size: i32) -> Result<i32, GridError> {
    if cell_size > 0 {
        Ok(cell_size)
    } else {
        Err(GridError::InvalidCellSize(cell_size))
    }
}
