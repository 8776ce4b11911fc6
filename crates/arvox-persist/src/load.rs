use arvox_canvas::store::VoxelStore;
use arvox_core::math::to_storage_key;

use crate::error::LineError;
use crate::format::{classify, ModelLine, VoxelLine};

/// Outcome of parsing a model into a store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Voxel lines applied to the store (merged lines included).
    pub voxels_placed: usize,
    /// Voxel lines that were skipped, with the reason.
    pub skipped: Vec<LineError>,
    /// Lines with an unrecognised first token.
    pub ignored: usize,
}

/// A freshly loaded store together with its report.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub store: VoxelStore,
    pub report: LoadReport,
}

/// Parse a model into a new store.
pub fn load(text: &str, cell_size: i32, palette_len: usize) -> LoadedModel {
    let mut store = VoxelStore::new();
    let report = load_into(&mut store, text, cell_size, palette_len);
    LoadedModel { store, report }
}

/// Replace the contents of `store` with the model in `text`.
///
/// The store is cleared first; loading never merges with existing voxels.
/// Malformed voxel lines are skipped and reported.
pub fn load_into(
    store: &mut VoxelStore,
    text: &str,
    cell_size: i32,
    palette_len: usize,
) -> LoadReport {
    store.clear();

    let mut report = LoadReport::default();
    for (i, line) in text.lines().enumerate() {
        let line_number = i + 1;
        match classify(line) {
            ModelLine::Blank | ModelLine::Comment => {}
            ModelLine::Unknown(tag) => {
                log::debug!("line {}: ignoring unknown tag {:?}", line_number, tag);
                report.ignored += 1;
            }
            ModelLine::Voxel(fields) => {
                let placed = VoxelLine::parse(&fields, line_number, palette_len).and_then(|voxel| {
                    let key = voxel
                        .cell()
                        .and_then(|cell| to_storage_key(cell, cell_size))
                        .ok_or(LineError::OutOfRange {
                            line: line_number,
                            gx: voxel.grid.x,
                            gy: voxel.grid.y,
                            gz: voxel.grid.z,
                        })?;
                    store.place(voxel.color, key);
                    Ok(())
                });
                match placed {
                    Ok(()) => report.voxels_placed += 1,
                    Err(e) => {
                        log::warn!("skipping voxel: {}", e);
                        report.skipped.push(e);
                    }
                }
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::save;
    use arvox_core::types::ColorIndex;
    use glam::IVec3;
    use std::collections::HashSet;

    const PALETTE_LEN: usize = 17;

    fn live_set(store: &VoxelStore) -> HashSet<(u16, i32, i32, i32)> {
        store
            .live_voxels()
            .map(|v| (v.color.0, v.key.x, v.key.y, v.key.z))
            .collect()
    }

    #[test]
    fn test_save_load_roundtrip() {
        let cs = 16;
        let mut store = VoxelStore::new();
        let cells = [
            IVec3::new(0, 0, 0),
            IVec3::new(3, -2, 1),
            IVec3::new(-4, 5, 0),
            IVec3::new(7, 7, 7),
        ];
        for (i, cell) in cells.iter().enumerate() {
            store.place(ColorIndex(i as u16 * 3), to_storage_key(*cell, cs).expect("in range"));
        }
        store.remove_at(to_storage_key(cells[2], cs).expect("in range"));
        store.place(ColorIndex(9), to_storage_key(cells[0], cs).expect("in range"));

        let text = save::save(&store, cs);
        let loaded = load(&text, cs, PALETTE_LEN);

        assert_eq!(live_set(&loaded.store), live_set(&store));
        assert_eq!(loaded.store.free_count(), 0, "freed records do not round-trip");
        assert!(loaded.report.skipped.is_empty());
        assert_eq!(loaded.report.voxels_placed, 3);
    }

    #[test]
    fn test_roundtrip_odd_cell_size() {
        let cs = 5;
        let mut store = VoxelStore::new();
        store.place(ColorIndex(1), to_storage_key(IVec3::new(-1, -1, 2), cs).expect("in range"));
        store.place(ColorIndex(2), to_storage_key(IVec3::new(2, 3, -7), cs).expect("in range"));
        let loaded = load(&save::save(&store, cs), cs, PALETTE_LEN);
        assert_eq!(live_set(&loaded.store), live_set(&store));
    }

    #[test]
    fn test_scenario_reused_slot_roundtrip() {
        let cs = 16;
        let key = to_storage_key(IVec3::ZERO, cs).expect("in range");
        let mut store = VoxelStore::new();
        store.place(ColorIndex(2), key);
        store.place(ColorIndex(5), key);
        store.remove_at(key);
        store.place(ColorIndex(3), key);

        let text = save::save(&store, cs);
        assert!(text.lines().any(|l| l == "v 3 0 0 0"));

        let loaded = load(&text, cs, PALETTE_LEN);
        assert_eq!(loaded.store.live_count(), 1);
        let voxel = loaded.store.live_voxels().next().copied().expect("one voxel");
        assert_eq!(voxel.color, ColorIndex(3));
        assert_eq!(voxel.key, IVec3::new(8, -8, 8));
    }

    #[test]
    fn test_load_clears_existing_store() {
        let mut store = VoxelStore::new();
        store.place(ColorIndex(1), IVec3::new(100, -100, 100));
        store.remove_at(IVec3::new(100, -100, 100));

        let report = load_into(&mut store, "v 2 1 1 1\n", 16, PALETTE_LEN);
        assert_eq!(report.voxels_placed, 1);
        assert_eq!(store.total_count(), 1);
        assert_eq!(store.free_count(), 0);
        let voxel = store.live_voxels().next().copied().expect("voxel");
        assert_eq!(voxel.key, to_storage_key(IVec3::new(1, -1, 1), 16).expect("in range"));
    }

    #[test]
    fn test_load_skips_malformed_and_ignores_unknown() {
        let text = "\
# hand-edited model
v 1 0 0 0
v 2 1 0
v 3 a 0 0
v 99 0 0 0
o some-future-object
vn 0 0 1

v 4 2 0 0
";
        let loaded = load(text, 16, PALETTE_LEN);
        assert_eq!(loaded.report.voxels_placed, 2);
        assert_eq!(loaded.report.ignored, 2);
        let lines: Vec<usize> = loaded.report.skipped.iter().map(|e| e.line()).collect();
        assert_eq!(lines, vec![3, 4, 5]);
        assert!(matches!(loaded.report.skipped[0], LineError::WrongFieldCount { found: 3, .. }));
        assert!(matches!(loaded.report.skipped[1], LineError::InvalidInteger { field: 2, .. }));
        assert!(matches!(loaded.report.skipped[2], LineError::UnknownColor { index: 99, .. }));
        assert_eq!(loaded.store.live_count(), 2);
    }

    #[test]
    fn test_load_skips_out_of_range_indices() {
        let text = "\
v 1 0 0 0
v 0 200000000 0 0
v 0 0 -2147483648 0
v 0 0 0 2147483647
v 0 0 0 9000000000
v 2 -134217727 134217727 134217726
";
        let loaded = load(text, 16, PALETTE_LEN);
        assert_eq!(loaded.report.voxels_placed, 2);
        let lines: Vec<usize> = loaded.report.skipped.iter().map(|e| e.line()).collect();
        assert_eq!(lines, vec![2, 3, 4, 5]);
        assert!(loaded
            .report
            .skipped
            .iter()
            .all(|e| matches!(e, LineError::OutOfRange { .. })));
        assert_eq!(
            loaded.report.skipped[1],
            LineError::OutOfRange {
                line: 3,
                gx: 0,
                gy: -2147483648,
                gz: 0
            }
        );
        let keys: Vec<IVec3> = loaded.store.live_voxels().map(|v| v.key).collect();
        assert_eq!(
            keys,
            vec![
                IVec3::new(8, -8, 8),
                IVec3::new(-2147483624, -2147483640, 2147483624)
            ]
        );
    }

    #[test]
    fn test_extreme_cells_roundtrip() {
        let mut store = VoxelStore::new();
        let corner = IVec3::new(i32::MAX, i32::MIN, i32::MIN);
        store.place(ColorIndex(5), to_storage_key(corner, 1).expect("cell size 1 keeps every cell"));
        let text = save::save(&store, 1);
        assert!(text.lines().any(|l| l == "v 5 2147483647 2147483648 -2147483648"), "{text}");

        let loaded = load(&text, 1, PALETTE_LEN);
        assert!(loaded.report.skipped.is_empty());
        assert_eq!(live_set(&loaded.store), live_set(&store));
    }

    #[test]
    fn test_duplicate_lines_merge() {
        let loaded = load("v 1 0 0 0\nv 6 0 0 0\n", 16, PALETTE_LEN);
        assert_eq!(loaded.store.total_count(), 1);
        assert_eq!(
            loaded.store.live_voxels().next().map(|v| v.color),
            Some(ColorIndex(6))
        );
        assert_eq!(loaded.report.voxels_placed, 2);
    }
}
