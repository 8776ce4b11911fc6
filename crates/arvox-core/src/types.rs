use glam::{DVec3, IVec3};

/// Newtype for palette indices. Identity is the index, never the colour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ColorIndex(pub u16);

impl ColorIndex {
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for ColorIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Discrete grid index of a cell (one unit = one cell).
pub type CellCoord = IVec3;

/// World-scaled, centre-offset cell coordinate used as the voxel lookup key.
///
/// x and z carry `+cell_size / 2`, y carries `-cell_size / 2`; see
/// [`crate::math::to_storage_key`].
pub type StorageKey = IVec3;

/// Continuous position in the tracked pose frame (millimetres).
pub type PosePosition = DVec3;
