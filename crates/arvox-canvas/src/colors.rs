use arvox_core::types::ColorIndex;

use crate::store::VoxelStore;

/// Distinct colour indices among live voxels, in first-seen order.
/// Freed records are ignored.
pub fn colors_in_use(store: &VoxelStore) -> Vec<ColorIndex> {
    let mut unique: Vec<ColorIndex> = Vec::new();
    for voxel in store.live_voxels() {
        if !unique.contains(&voxel.color) {
            unique.push(voxel.color);
        }
    }
    unique
}

/// Number of distinct colours among live voxels.
pub fn distinct_color_count(store: &VoxelStore) -> usize {
    colors_in_use(store).len()
}
