use std::fs;
use std::path::Path;

use arvox_canvas::store::VoxelStore;

use crate::error::PersistError;
use crate::load::{load_into, LoadReport};
use crate::save::save;

/// Write the live voxels of `store` to `path`.
pub fn save_to_path(path: &Path, store: &VoxelStore, cell_size: i32) -> Result<(), PersistError> {
    let text = save(store, cell_size);
    fs::write(path, text).map_err(|source| PersistError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!(
        "Saved {} voxels to {}",
        store.live_count(),
        path.display()
    );
    Ok(())
}

/// Replace the contents of `store` with the model at `path`.
///
/// The file is read in full before the store is cleared, so a read failure
/// leaves the store unchanged.
pub fn load_from_path(
    path: &Path,
    store: &mut VoxelStore,
    cell_size: i32,
    palette_len: usize,
) -> Result<LoadReport, PersistError> {
    let text = fs::read_to_string(path).map_err(|source| PersistError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let report = load_into(store, &text, cell_size, palette_len);
    if report.skipped.is_empty() {
        log::info!(
            "Loaded {} voxels from {}",
            store.live_count(),
            path.display()
        );
    } else {
        log::warn!(
            "Loaded {} voxels from {} ({} malformed lines skipped)",
            store.live_count(),
            path.display(),
            report.skipped.len()
        );
    }
    Ok(report)
}
