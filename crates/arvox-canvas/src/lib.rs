pub mod colors;
pub mod reference;
pub mod store;

use arvox_core::error::GridError;
use arvox_core::math;
use arvox_core::types::{CellCoord, ColorIndex, PosePosition, StorageKey};
use reference::ReferenceGrid;
use store::{PlaceOutcome, SlotId, Voxel, VoxelStore};

pub use store::{Lookup, Placement};

/// Primary public struct for the arvox-canvas crate.
/// Owns the voxel store and maps grid cells onto storage keys.
#[derive(Debug, Clone)]
pub struct Canvas {
    store: VoxelStore,
    grid: ReferenceGrid,
}

impl Canvas {
    /// Create an empty canvas. `cell_size` must already be validated as positive.
    pub fn new(cell_size: i32) -> Self {
        Self {
            store: VoxelStore::new(),
            grid: ReferenceGrid::new(cell_size),
        }
    }

    pub fn cell_size(&self) -> i32 {
        self.grid.cell_size()
    }

    /// Storage key of a grid cell.
    pub fn cell_to_key(&self, cell: CellCoord) -> Result<StorageKey, GridError> {
        math::to_storage_key(cell, self.cell_size()).ok_or(GridError::CellOutOfRange(cell))
    }

    pub fn key_to_cell(&self, key: StorageKey) -> CellCoord {
        math::from_storage_key(key, self.cell_size())
    }

    /// Cell containing a pose-space position.
    pub fn position_to_cell(&self, position: PosePosition) -> Result<CellCoord, GridError> {
        math::to_cell(position, self.cell_size()).ok_or(GridError::PositionOutOfRange(position))
    }

    /// Cell and storage key for a pose-space position.
    pub fn locate(&self, position: PosePosition) -> Result<(CellCoord, StorageKey), GridError> {
        let cell = self.position_to_cell(position)?;
        Ok((cell, self.cell_to_key(cell)?))
    }

    /// Place (or recolour) the voxel at a grid cell.
    pub fn place_cell(&mut self, color: ColorIndex, cell: CellCoord) -> Result<PlaceOutcome, GridError> {
        let key = self.cell_to_key(cell)?;
        let outcome = self.store.place(color, key);
        log::debug!(
            "place {:?} color {} at cell {} -> slot {}",
            outcome.kind,
            color,
            cell,
            outcome.slot.0
        );
        Ok(outcome)
    }

    /// Free the voxel at a grid cell, if one is live there.
    pub fn remove_cell(&mut self, cell: CellCoord) -> Result<Option<SlotId>, GridError> {
        let key = self.cell_to_key(cell)?;
        let removed = self.store.remove_at(key);
        if let Some(slot) = removed {
            log::debug!("removed voxel at cell {} (slot {})", cell, slot.0);
        }
        Ok(removed)
    }

    /// Undo the most recently appended record.
    pub fn undo(&mut self) -> Option<Voxel> {
        let undone = self.store.undo_last();
        match undone {
            Some(voxel) => log::debug!("undo: dropped record at key {}", voxel.key),
            None => log::debug!("undo: canvas already empty"),
        }
        undone
    }

    /// Remove every voxel.
    pub fn reset(&mut self) {
        let dropped = self.store.total_count();
        self.store.clear();
        log::info!("canvas reset ({} records dropped)", dropped);
    }

    pub fn color_count(&self) -> usize {
        colors::distinct_color_count(&self.store)
    }

    pub fn store(&self) -> &VoxelStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut VoxelStore {
        &mut self.store
    }

    pub fn grid(&self) -> &ReferenceGrid {
        &self.grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{DVec3, IVec3};

    #[test]
    fn test_scenario_place_recolor_remove_reuse() {
        let mut canvas = Canvas::new(16);
        let origin = IVec3::ZERO;

        let a = canvas.place_cell(ColorIndex(2), origin).expect("in range");
        assert_eq!(a.kind, Placement::Created);
        assert_eq!(canvas.store().live_count(), 1);
        let voxel = canvas.store().get(a.slot).copied().expect("placed voxel");
        assert_eq!(voxel.key, IVec3::new(8, -8, 8));
        assert_eq!(canvas.color_count(), 1);

        let b = canvas.place_cell(ColorIndex(5), origin).expect("in range");
        assert_eq!(b.kind, Placement::Merged);
        assert_eq!(canvas.store().live_count(), 1);
        assert_eq!(canvas.store().total_count(), 1);
        assert_eq!(canvas.store().get(b.slot).map(|v| v.color), Some(ColorIndex(5)));

        assert_eq!(canvas.remove_cell(origin).expect("in range"), Some(a.slot));
        assert_eq!(canvas.store().live_count(), 0);
        assert_eq!(canvas.store().free_count(), 1);
        assert_eq!(canvas.color_count(), 0);

        let d = canvas.place_cell(ColorIndex(3), origin).expect("in range");
        assert_eq!(d.kind, Placement::Reused);
        assert_eq!(d.slot, a.slot);
        assert_eq!(canvas.store().live_count(), 1);
        assert_eq!(canvas.store().free_count(), 0);
        assert_eq!(canvas.store().get(d.slot).map(|v| v.color), Some(ColorIndex(3)));
    }

    #[test]
    fn test_position_to_cell_uses_cell_size() {
        let canvas = Canvas::new(32);
        assert_eq!(
            canvas.position_to_cell(DVec3::new(16.0, -16.0, 15.9)).expect("in range"),
            IVec3::new(1, -1, 0)
        );
        let key = canvas.cell_to_key(IVec3::new(4, 2, 1)).expect("in range");
        assert_eq!(canvas.key_to_cell(key), IVec3::new(4, 2, 1));
        assert_eq!(
            canvas.locate(DVec3::new(3.0, -4.0, 7.0)).expect("in range"),
            (IVec3::ZERO, IVec3::new(8, -8, 8))
        );
    }

    #[test]
    fn test_reset_and_undo() {
        let mut canvas = Canvas::new(16);
        canvas.place_cell(ColorIndex(1), IVec3::new(1, 0, 0)).expect("in range");
        canvas.place_cell(ColorIndex(1), IVec3::new(2, 0, 0)).expect("in range");
        let undone = canvas.undo().expect("undo");
        assert_eq!(canvas.key_to_cell(undone.key), IVec3::new(2, 0, 0));
        canvas.reset();
        assert!(canvas.store().is_empty());
        assert!(canvas.undo().is_none());
    }

    #[test]
    fn test_unmappable_positions_and_cells_are_errors() {
        let mut canvas = Canvas::new(16);
        let far = DVec3::new(1.0e12, 0.0, 0.0);
        assert!(matches!(
            canvas.position_to_cell(far),
            Err(GridError::PositionOutOfRange(_))
        ));
        assert!(canvas.locate(DVec3::new(f64::NAN, 0.0, 0.0)).is_err());

        // Rounds to a valid cell whose key does not fit.
        let edge = DVec3::new(i32::MAX as f64 * 16.0, 0.0, 0.0);
        assert!(matches!(canvas.locate(edge), Err(GridError::CellOutOfRange(_))));

        let cell = IVec3::new(i32::MAX, 0, 0);
        assert!(matches!(
            canvas.place_cell(ColorIndex(1), cell),
            Err(GridError::CellOutOfRange(c)) if c == cell
        ));
        assert!(canvas.remove_cell(cell).is_err());
        assert!(canvas.store().is_empty());
    }
}
