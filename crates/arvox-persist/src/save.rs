use std::fmt::Write;

use arvox_canvas::colors::distinct_color_count;
use arvox_canvas::store::VoxelStore;
use arvox_core::math::from_storage_key;

use crate::format::{VoxelLine, TITLE};

/// Serialize the live voxels of `store` into the text model format.
///
/// Layout: comment header (title, voxel count, colour count, cell size), a
/// blank line, then one `v` line per live voxel in insertion order. Freed
/// records are not written.
pub fn save(store: &VoxelStore, cell_size: i32) -> String {
    let rule = "-".repeat(TITLE.len() + 2);
    let mut output = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(output, "# +{rule}+");
    let _ = writeln!(output, "# | {TITLE} |");
    let _ = writeln!(output, "# +{rule}+");
    let _ = writeln!(output, "# * Number of voxels: {}", store.live_count());
    let _ = writeln!(output, "# * Number of colours: {}", distinct_color_count(store));
    let _ = writeln!(output, "# * Cell size: {cell_size}");
    output.push('\n');

    for voxel in store.live_voxels() {
        let cell = from_storage_key(voxel.key, cell_size);
        let _ = writeln!(output, "{}", VoxelLine::from_cell(voxel.color, cell));
    }

    output
}
