use std::path::PathBuf;

/// Errors that abort a save or load. The canvas is left untouched.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("failed to read model {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write model {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A `v` line that could not be turned into a voxel. Skipped, never fatal.
/// Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineError {
    #[error("line {line}: expected 4 fields after 'v', found {found}")]
    WrongFieldCount { line: usize, found: usize },

    #[error("line {line}: field {field} is not an integer ({value:?})")]
    InvalidInteger {
        line: usize,
        field: usize,
        value: String,
    },

    #[error("line {line}: colour index {index} is not in the palette")]
    UnknownColor { line: usize, index: i64 },

    #[error("line {line}: grid index ({gx}, {gy}, {gz}) is outside the canvas at this cell size")]
    OutOfRange {
        line: usize,
        gx: i64,
        gy: i64,
        gz: i64,
    },
}

impl LineError {
    pub fn line(&self) -> usize {
        match self {
            LineError::WrongFieldCount { line, .. }
            | LineError::InvalidInteger { line, .. }
            | LineError::UnknownColor { line, .. }
            | LineError::OutOfRange { line, .. } => *line,
        }
    }
}
