use std::path::PathBuf;

use thiserror::Error;

/// A command typed on the editor's command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Load(PathBuf),
    Save(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty command line")]
    Empty,

    #[error("unknown command {0:?} (expected load or save)")]
    Unknown(String),

    #[error("'{0}' needs a file path")]
    MissingPath(&'static str),
}

impl Command {
    /// Parse `load <path>` or `save <path>`. The path is the rest of the line,
    /// trimmed, so it may contain spaces.
    pub fn parse(line: &str) -> Result<Command, CommandError> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Err(CommandError::Empty);
        }

        let (name, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (trimmed, ""),
        };

        match (name, rest.is_empty()) {
            ("load", true) => Err(CommandError::MissingPath("load")),
            ("save", true) => Err(CommandError::MissingPath("save")),
            ("load", false) => Ok(Command::Load(PathBuf::from(rest))),
            ("save", false) => Ok(Command::Save(PathBuf::from(rest))),
            (other, _) => Err(CommandError::Unknown(other.to_string())),
        }
    }
}
