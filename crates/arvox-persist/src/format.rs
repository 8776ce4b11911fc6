use arvox_core::types::{CellCoord, ColorIndex};
use glam::{I64Vec3, IVec3};

use crate::error::LineError;

/// First token of a voxel line.
pub const VOXEL_TAG: &str = "v";

/// Lines starting with this character are comments.
pub const COMMENT_PREFIX: char = '#';

/// Integer fields following the voxel tag: colour, gx, gy, gz.
pub const VOXEL_FIELDS: usize = 4;

/// Title line written at the top of every saved model.
pub const TITLE: &str = "arvox voxel model";

/// Classification of one line of a model file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelLine<'a> {
    Blank,
    Comment,
    /// A voxel line; the fields after the tag, unparsed.
    Voxel(Vec<&'a str>),
    /// Any other first token. Ignored for forward compatibility.
    Unknown(&'a str),
}

/// Split a line into its kind without interpreting voxel fields.
pub fn classify(line: &str) -> ModelLine<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ModelLine::Blank;
    }
    if trimmed.starts_with(COMMENT_PREFIX) {
        return ModelLine::Comment;
    }
    let mut tokens = trimmed.split_whitespace();
    match tokens.next() {
        Some(VOXEL_TAG) => ModelLine::Voxel(tokens.collect()),
        Some(other) => ModelLine::Unknown(other),
        None => ModelLine::Blank,
    }
}

/// One voxel as written on disk: colour and user-facing grid indices.
///
/// The on-disk y index is the negation of the storage-frame cell y. Indices
/// are kept as `i64` so that flip never overflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoxelLine {
    pub color: ColorIndex,
    pub grid: I64Vec3,
}

impl VoxelLine {
    /// Build the on-disk form from a storage-frame cell.
    pub fn from_cell(color: ColorIndex, cell: CellCoord) -> Self {
        Self {
            color,
            grid: I64Vec3::new(i64::from(cell.x), -i64::from(cell.y), i64::from(cell.z)),
        }
    }

    /// Storage-frame cell for this line, or `None` if an index does not fit
    /// a cell coordinate.
    pub fn cell(&self) -> Option<CellCoord> {
        Some(IVec3::new(
            i32::try_from(self.grid.x).ok()?,
            i32::try_from(self.grid.y.checked_neg()?).ok()?,
            i32::try_from(self.grid.z).ok()?,
        ))
    }

    /// Parse the fields of a `v` line. `palette_len` bounds the colour index.
    pub fn parse(fields: &[&str], line: usize, palette_len: usize) -> Result<Self, LineError> {
        if fields.len() != VOXEL_FIELDS {
            return Err(LineError::WrongFieldCount {
                line,
                found: fields.len(),
            });
        }

        let mut values = [0i64; VOXEL_FIELDS];
        for (field, (raw, slot)) in fields.iter().zip(values.iter_mut()).enumerate() {
            *slot = raw.parse::<i64>().map_err(|_| LineError::InvalidInteger {
                line,
                field: field + 1,
                value: raw.to_string(),
            })?;
        }

        let index = values[0];
        if index < 0 || index as usize >= palette_len || index > u16::MAX as i64 {
            return Err(LineError::UnknownColor { line, index });
        }

        Ok(Self {
            color: ColorIndex(index as u16),
            grid: I64Vec3::new(values[1], values[2], values[3]),
        })
    }
}

impl std::fmt::Display for VoxelLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            VOXEL_TAG, self.color, self.grid.x, self.grid.y, self.grid.z
        )
    }
}
