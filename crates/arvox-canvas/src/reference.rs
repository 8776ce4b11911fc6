use arvox_core::constants::{PAPER_ELEVATION, PAPER_HEIGHT, PAPER_WIDTH};
use arvox_core::palette::{BLUE, GRAY, LIME, RED, WHITE};
use arvox_core::types::ColorIndex;
use glam::Vec3;

const AXIS_LINE_WIDTH: f32 = 5.0;
const GRID_LINE_WIDTH: f32 = 2.0;

/// A coloured line segment in canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub start: Vec3,
    pub end: Vec3,
    pub color: ColorIndex,
    pub width: f32,
}

impl LineSegment {
    pub fn new(start: Vec3, end: Vec3, color: ColorIndex, width: f32) -> Self {
        Self {
            start,
            end,
            color,
            width,
        }
    }
}

/// Axis-aligned rectangle on a plane of constant z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneRect {
    pub min: [f32; 2],
    pub max: [f32; 2],
    pub z: f32,
    pub color: ColorIndex,
}

/// The paper sheet, its axes and the cell grid drawn on it.
///
/// The long paper edge runs along +x, the short edge along -y.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceGrid {
    cell_size: i32,
    rows: i32,
    columns: i32,
}

impl ReferenceGrid {
    pub fn new(cell_size: i32) -> Self {
        Self {
            cell_size,
            rows: PAPER_HEIGHT / cell_size,
            columns: PAPER_WIDTH / cell_size,
        }
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// Number of whole cells along the long paper edge.
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Number of whole cells along the short paper edge.
    pub fn columns(&self) -> i32 {
        self.columns
    }

    /// The paper rectangle, drawn just below z = 0.
    pub fn plane(&self) -> PlaneRect {
        PlaneRect {
            min: [0.0, 0.0],
            max: [PAPER_HEIGHT as f32, -(PAPER_WIDTH as f32)],
            z: PAPER_ELEVATION,
            color: WHITE,
        }
    }

    /// x (red), y (lime) and z (blue) axes from the paper origin.
    pub fn axes(&self) -> [LineSegment; 3] {
        let h = PAPER_HEIGHT as f32;
        let w = PAPER_WIDTH as f32;
        [
            LineSegment::new(Vec3::ZERO, Vec3::new(h, 0.0, 0.0), RED, AXIS_LINE_WIDTH),
            LineSegment::new(Vec3::ZERO, Vec3::new(0.0, -w, 0.0), LIME, AXIS_LINE_WIDTH),
            LineSegment::new(Vec3::ZERO, Vec3::new(0.0, 0.0, w), BLUE, AXIS_LINE_WIDTH),
        ]
    }

    /// Grid lines: `rows + 1` lines across the short edge, then
    /// `columns + 1` lines across the long edge.
    pub fn lines(&self) -> impl Iterator<Item = LineSegment> + '_ {
        let cs = self.cell_size as f32;
        let h = PAPER_HEIGHT as f32;
        let w = PAPER_WIDTH as f32;
        let across_short = (0..=self.rows).map(move |i| {
            let x = i as f32 * cs;
            LineSegment::new(
                Vec3::new(x, 0.0, 0.0),
                Vec3::new(x, -w, 0.0),
                GRAY,
                GRID_LINE_WIDTH,
            )
        });
        let across_long = (0..=self.columns).map(move |i| {
            let y = -(i as f32) * cs;
            LineSegment::new(
                Vec3::new(0.0, y, 0.0),
                Vec3::new(h, y, 0.0),
                GRAY,
                GRID_LINE_WIDTH,
            )
        });
        across_short.chain(across_long)
    }
}
