use crate::types::{CellCoord, PosePosition, StorageKey};
use glam::IVec3;

/// Round to the nearest integer, ties away from zero (0.5 -> 1, -0.5 -> -1).
///
/// `None` for NaN, infinities and values that do not fit an `i32`.
pub fn round_half_away(value: f64) -> Option<i32> {
    let rounded = value.round();
    if rounded.is_finite() && rounded >= i32::MIN as f64 && rounded <= i32::MAX as f64 {
        Some(rounded as i32)
    } else {
        None
    }
}

/// Map a continuous pose-space position to the grid cell containing it.
/// Each axis is divided by `cell_size` and rounded independently.
pub fn to_cell(position: PosePosition, cell_size: i32) -> Option<CellCoord> {
    let cs = cell_size as f64;
    Some(IVec3::new(
        round_half_away(position.x / cs)?,
        round_half_away(position.y / cs)?,
        round_half_away(position.z / cs)?,
    ))
}

/// Convert a grid cell to its storage key, or `None` if the key would not fit
/// an `i32`.
///
/// The y offset is subtracted while x and z add it: the storage frame mirrors
/// the pose frame on y. Saved models depend on this exact convention.
pub fn to_storage_key(cell: CellCoord, cell_size: i32) -> Option<StorageKey> {
    let half = cell_size / 2;
    Some(IVec3::new(
        cell.x.checked_mul(cell_size)?.checked_add(half)?,
        cell.y.checked_mul(cell_size)?.checked_sub(half)?,
        cell.z.checked_mul(cell_size)?.checked_add(half)?,
    ))
}

/// Inverse of [`to_storage_key`]. Total over every key.
pub fn from_storage_key(key: StorageKey, cell_size: i32) -> CellCoord {
    let cs = i64::from(cell_size);
    let half = cs / 2;
    // With cell_size >= 1 the quotient always fits back into an i32.
    let axis = |v: i32, offset: i64| (i64::from(v) - offset).div_euclid(cs) as i32;
    IVec3::new(axis(key.x, half), axis(key.y, -half), axis(key.z, half))
}
