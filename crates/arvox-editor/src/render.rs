use arvox_canvas::reference::{LineSegment, ReferenceGrid};
use arvox_canvas::store::SlotId;
use arvox_core::palette::{BLUE, LIME, RED};
use arvox_core::types::{CellCoord, ColorIndex, StorageKey};
use glam::Vec3;

/// One live voxel to draw as a solid, lit cube.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoxelDraw {
    pub slot: SlotId,
    pub color: ColorIndex,
    pub rgb: (u8, u8, u8),
    /// Cube centre in canvas space.
    pub center: StorageKey,
    /// Lower corner of the shadow square on the paper.
    pub shadow_origin: [f32; 2],
    pub shadow_z: f32,
    pub shadow_color: ColorIndex,
}

/// Wireframe cursor following the brush marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushCursor {
    pub cell: CellCoord,
    pub center: StorageKey,
    pub color: ColorIndex,
    pub shadow_origin: [f32; 2],
    /// Lines from the cursor centre to the x = 0, y = 0 and z = 0 planes.
    pub projections: [LineSegment; 3],
}

impl BrushCursor {
    pub fn new(cell: CellCoord, center: StorageKey, color: ColorIndex, cell_size: i32) -> Self {
        let c = center.as_vec3();
        let half = (cell_size / 2) as f32;
        Self {
            cell,
            center,
            color,
            shadow_origin: [c.x - half, c.y - half],
            projections: [
                LineSegment::new(c, Vec3::new(0.0, c.y, c.z), RED, 1.0),
                LineSegment::new(c, Vec3::new(c.x, 0.0, c.z), LIME, 1.0),
                LineSegment::new(c, Vec3::new(c.x, c.y, 0.0), BLUE, 1.0),
            ],
        }
    }
}

/// Everything the rendering collaborator needs to draw one frame.
#[derive(Debug, Clone)]
pub struct FrameView {
    pub frame: u64,
    /// Whether the canvas marker was tracked this frame.
    pub canvas_visible: bool,
    pub cell_size: i32,
    pub grid: ReferenceGrid,
    pub voxels: Vec<VoxelDraw>,
    pub cursor: Option<BrushCursor>,
    /// Status block, top-left.
    pub status: String,
    /// Command prompt, when the command line is open.
    pub prompt: Option<String>,
}

/// Receiver of rendered frames (display, recorder, test probe).
pub trait FrameSink {
    fn present(&mut self, view: &FrameView);
}

/// Sink that reports frames through the logger instead of drawing them.
#[derive(Debug, Default)]
pub struct LogSink {
    last_status: String,
    frames: u64,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl FrameSink for LogSink {
    fn present(&mut self, view: &FrameView) {
        self.frames += 1;
        if view.status != self.last_status {
            log::info!("{}", view.status.replace('\n', " | "));
            self.last_status.clone_from(&view.status);
        }
        if let Some(cursor) = &view.cursor {
            log::debug!("frame {}: brush at cell {}", view.frame, cursor.cell);
        } else {
            log::debug!("frame {}: brush not tracked", view.frame);
        }
        if let Some(prompt) = &view.prompt {
            log::debug!("{prompt}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::IVec3;

    #[test]
    fn test_cursor_geometry() {
        let cursor = BrushCursor::new(IVec3::new(1, 0, 2), IVec3::new(24, -8, 40), RED, 16);
        assert_eq!(cursor.shadow_origin, [16.0, -16.0]);
        let [x, y, z] = cursor.projections;
        assert_eq!(x.end, Vec3::new(0.0, -8.0, 40.0));
        assert_eq!(y.end, Vec3::new(24.0, 0.0, 40.0));
        assert_eq!(z.end, Vec3::new(24.0, -8.0, 0.0));
        assert_eq!(x.start, Vec3::new(24.0, -8.0, 40.0));
    }

    #[test]
    fn test_log_sink_counts_frames() {
        let mut sink = LogSink::new();
        let view = FrameView {
            frame: 0,
            canvas_visible: true,
            cell_size: 16,
            grid: ReferenceGrid::new(16),
            voxels: Vec::new(),
            cursor: None,
            status: "Colour: Black".into(),
            prompt: None,
        };
        sink.present(&view);
        sink.present(&view);
        assert_eq!(sink.frames(), 2);
    }
}
