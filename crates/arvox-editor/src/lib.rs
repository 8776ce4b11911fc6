pub mod app;
pub mod brush;
pub mod commands;
pub mod config;
pub mod hud;
pub mod input;
pub mod render;
pub mod script;
pub mod tracking;

pub use app::{CommandOutcome, Editor, EditorError, RunSummary};
pub use config::{ConfigError, EditorConfig, ParsedArgs};
pub use render::{FrameSink, FrameView, LogSink};
pub use script::{ScriptError, ScriptSource};
pub use tracking::{FrameInput, PoseSource, TrackingError};
