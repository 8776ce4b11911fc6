use arvox_core::constants::BRUSH_PATTERN_ID;
use glam::{DAffine3, DVec3};
use thiserror::Error;

use crate::input::Key;

/// Unrecoverable tracker failure. Ends the editor run.
#[derive(Debug, Error)]
pub enum TrackingError {
    #[error("marker detection failed: {0}")]
    DetectionFailed(String),
}

/// One marker detection reported by the tracker for a frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    pub pattern_id: u32,
    /// Match confidence, higher is better.
    pub confidence: f64,
    /// Marker pose in camera space.
    pub transform: DAffine3,
}

/// Pick the most confident detection of `pattern_id`. The first one wins ties.
pub fn select_best(detections: &[Detection], pattern_id: u32) -> Option<&Detection> {
    detections
        .iter()
        .filter(|d| d.pattern_id == pattern_id)
        .fold(None, |best: Option<&Detection>, d| match best {
            Some(b) if b.confidence >= d.confidence => Some(b),
            _ => Some(d),
        })
}

/// Brush position expressed in the canvas frame.
pub fn brush_position(canvas: &DAffine3, brush: &DAffine3) -> DVec3 {
    (canvas.inverse() * *brush).translation
}

/// Poses detected in one frame. `None` means "not detected".
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FramePoses {
    pub canvas: Option<DAffine3>,
    pub brush: Option<DAffine3>,
}

impl FramePoses {
    /// Combine the canvas pose with the best brush detection, if any.
    pub fn from_detections(canvas: Option<DAffine3>, detections: &[Detection]) -> Self {
        Self {
            canvas,
            brush: select_best(detections, BRUSH_PATTERN_ID).map(|d| d.transform),
        }
    }

    /// Brush position on the canvas, when both markers are visible.
    pub fn brush_on_canvas(&self) -> Option<DVec3> {
        match (self.canvas, self.brush) {
            (Some(canvas), Some(brush)) => Some(brush_position(&canvas, &brush)),
            _ => None,
        }
    }
}

/// Everything the editor receives for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    pub poses: FramePoses,
    /// Keys pressed since the previous frame, in order.
    pub keys: Vec<Key>,
}

/// Source of frames (camera + marker tracker, or a recorded stream).
pub trait PoseSource {
    /// Next frame, `Ok(None)` when the stream has ended.
    fn next_frame(&mut self) -> Result<Option<FrameInput>, TrackingError>;
}
