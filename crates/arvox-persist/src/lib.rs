pub mod error;
pub mod file;
pub mod format;
pub mod load;
pub mod save;

pub use error::{LineError, PersistError};
pub use file::{load_from_path, save_to_path};
pub use load::{load, load_into, LoadReport, LoadedModel};
pub use save::save;
