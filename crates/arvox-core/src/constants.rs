//! Single source of truth for shared constants.

/// Default edge length of a voxel cell in millimetres.
pub const DEFAULT_CELL_SIZE: i32 = 16;

/// Short edge of the tracked A4 sheet in millimetres.
pub const PAPER_WIDTH: i32 = 210;

/// Long edge of the tracked A4 sheet in millimetres.
pub const PAPER_HEIGHT: i32 = 297;

/// Pattern id reported by the tracker for the brush marker.
pub const BRUSH_PATTERN_ID: u32 = 0;

/// Height above the paper at which voxel shadows are drawn.
pub const SHADOW_ELEVATION: f32 = 0.002;

/// Height below the paper at which the paper plane is drawn.
pub const PAPER_ELEVATION: f32 = -0.004;
