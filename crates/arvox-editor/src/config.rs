use std::path::PathBuf;

use arvox_core::constants::DEFAULT_CELL_SIZE;
use arvox_core::error::{validate_cell_size, GridError, PaletteError};
use arvox_core::palette::Palette;
use thiserror::Error;

pub const USAGE: &str = "\
Usage: arvox [DEVICE] [CELL_SIZE] [OPTIONS]
  DEVICE                 Pose stream: script path, or '-' for stdin (default: stdin)
  CELL_SIZE              Voxel edge length in millimetres (default: 16)
  --palette <file.ron>   Load the colour palette from a RON file
  --help, -h             Show this message";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} needs a value")]
    MissingValue(&'static str),

    #[error("unknown argument {0:?}")]
    UnknownArgument(String),

    #[error("cell size {0:?} is not an integer")]
    CellSizeNotInteger(String),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error("failed to read palette {path}: {source}")]
    PaletteRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid palette {path}: {source}")]
    PaletteFormat {
        path: PathBuf,
        #[source]
        source: PaletteError,
    },
}

/// Startup configuration of the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Pose stream identifier.
    pub device: String,
    pub cell_size: i32,
    pub palette_path: Option<PathBuf>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            device: String::new(),
            cell_size: DEFAULT_CELL_SIZE,
            palette_path: None,
        }
    }
}

/// Result of argument parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedArgs {
    Run(EditorConfig),
    Help,
}

impl EditorConfig {
    /// Parse command-line arguments (program name already stripped).
    pub fn from_args<I>(args: I) -> Result<ParsedArgs, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = EditorConfig::default();
        let mut positional = 0;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--palette" => {
                    let path = args.next().ok_or(ConfigError::MissingValue("--palette"))?;
                    config.palette_path = Some(PathBuf::from(path));
                }
                "--help" | "-h" => return Ok(ParsedArgs::Help),
                flag if flag.starts_with("--") => {
                    return Err(ConfigError::UnknownArgument(flag.to_string()))
                }
                _ => {
                    match positional {
                        0 => config.device = arg,
                        1 => {
                            let size: i32 = arg
                                .parse()
                                .map_err(|_| ConfigError::CellSizeNotInteger(arg.clone()))?;
                            config.cell_size = validate_cell_size(size)?;
                        }
                        _ => return Err(ConfigError::UnknownArgument(arg)),
                    }
                    positional += 1;
                }
            }
        }

        Ok(ParsedArgs::Run(config))
    }

    /// The configured palette, or the built-in one.
    pub fn load_palette(&self) -> Result<Palette, ConfigError> {
        let Some(path) = &self.palette_path else {
            return Ok(Palette::builtin());
        };
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::PaletteRead {
            path: path.clone(),
            source,
        })?;
        let palette = Palette::from_ron_str(&text).map_err(|source| ConfigError::PaletteFormat {
            path: path.clone(),
            source,
        })?;
        log::info!("Loaded {} colours from {}", palette.len(), path.display());
        Ok(palette)
    }
}
