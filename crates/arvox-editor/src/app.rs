use arvox_canvas::Canvas;
use arvox_core::constants::SHADOW_ELEVATION;
use arvox_core::palette::{Palette, LIGHT_GRAY};
use arvox_core::types::{CellCoord, StorageKey};
use arvox_persist::{load_from_path, save_to_path, LoadReport, PersistError};
use thiserror::Error;

use crate::brush::Brush;
use crate::commands::Command;
use crate::hud;
use crate::input::{InputState, Key, KeyAction};
use crate::render::{BrushCursor, FrameSink, FrameView, VoxelDraw};
use crate::tracking::{FrameInput, PoseSource, TrackingError};

#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Tracking(#[from] TrackingError),
}

/// Result of a successful load or save command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Loaded(LoadReport),
    Saved,
}

/// Totals reported when a run ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub live_voxels: usize,
    pub colors: usize,
    pub quit_requested: bool,
}

/// Main editor session. Owns the canvas, palette, brush and input state.
pub struct Editor {
    canvas: Canvas,
    palette: Palette,
    brush: Brush,
    input: InputState,
    frame: u64,
    quit: bool,
}

impl Editor {
    /// `cell_size` must already be validated as positive.
    pub fn new(cell_size: i32, palette: Palette) -> Self {
        Self {
            canvas: Canvas::new(cell_size),
            palette,
            brush: Brush::new(),
            input: InputState::new(),
            frame: 0,
            quit: false,
        }
    }

    /// Apply one key press.
    pub fn handle_key(&mut self, key: Key) {
        let Some(action) = self.input.handle_key(key) else {
            return;
        };
        match action {
            KeyAction::NextColor => self.brush.next_color(&self.palette),
            KeyAction::PrevColor => self.brush.prev_color(&self.palette),
            KeyAction::Undo => {
                self.canvas.undo();
            }
            KeyAction::Reset => self.canvas.reset(),
            KeyAction::Quit => self.quit = true,
            KeyAction::Submit(line) => match Command::parse(&line) {
                Ok(command) => {
                    if let Err(e) = self.execute(&command) {
                        log::error!("{e}");
                    }
                }
                Err(e) => log::warn!("{e}"),
            },
        }
    }

    /// Run a load or save command. On failure the canvas is unchanged.
    pub fn execute(&mut self, command: &Command) -> Result<CommandOutcome, PersistError> {
        let cell_size = self.canvas.cell_size();
        match command {
            Command::Load(path) => {
                let palette_len = self.palette.len();
                let report = load_from_path(path, self.canvas.store_mut(), cell_size, palette_len)?;
                Ok(CommandOutcome::Loaded(report))
            }
            Command::Save(path) => {
                save_to_path(path, self.canvas.store(), cell_size)?;
                Ok(CommandOutcome::Saved)
            }
        }
    }

    /// Process one frame: keys first, then at most one store mutation at the
    /// tracked brush cell, then build the view for the renderer.
    ///
    /// A pending place wins over a pending remove; the remove stays queued
    /// for the next tracked frame. Nothing is consumed while the brush or
    /// canvas is not tracked, or while the brush is outside the addressable
    /// grid.
    pub fn process_frame(&mut self, input: &FrameInput) -> FrameView {
        for key in &input.keys {
            self.handle_key(*key);
        }

        let mut cursor = None;
        if let Some((cell, key)) = self.brush_target(input) {
            if !self.quit {
                let color = self.brush.color();
                let applied = if self.input.take_place() {
                    self.canvas.place_cell(color, cell).map(|_| ())
                } else if self.input.take_remove() {
                    self.canvas.remove_cell(cell).map(|_| ())
                } else {
                    Ok(())
                };
                if let Err(e) = applied {
                    log::warn!("{e}");
                }
            }
            cursor = Some(BrushCursor::new(
                cell,
                key,
                self.brush.color(),
                self.canvas.cell_size(),
            ));
        }

        let view = self.build_view(input.poses.canvas.is_some(), cursor);
        self.frame += 1;
        view
    }

    /// Cell and key under the brush, or `None` when the brush is not tracked
    /// or cannot be mapped onto the grid.
    fn brush_target(&self, input: &FrameInput) -> Option<(CellCoord, StorageKey)> {
        let position = input.poses.brush_on_canvas()?;
        match self.canvas.locate(position) {
            Ok(target) => Some(target),
            Err(e) => {
                log::debug!("frame {}: brush ignored: {e}", self.frame);
                None
            }
        }
    }

    fn build_view(&self, canvas_visible: bool, cursor: Option<BrushCursor>) -> FrameView {
        let half = (self.canvas.cell_size() / 2) as f32;
        let voxels = self
            .canvas
            .store()
            .live_slots()
            .map(|(slot, voxel)| VoxelDraw {
                slot,
                color: voxel.color,
                rgb: self
                    .palette
                    .get(voxel.color)
                    .map(|e| e.rgb)
                    .unwrap_or((0, 0, 0)),
                center: voxel.key,
                shadow_origin: [voxel.key.x as f32 - half, voxel.key.y as f32 - half],
                shadow_z: SHADOW_ELEVATION,
                shadow_color: LIGHT_GRAY,
            })
            .collect();

        FrameView {
            frame: self.frame,
            canvas_visible,
            cell_size: self.canvas.cell_size(),
            grid: *self.canvas.grid(),
            voxels,
            cursor,
            status: self.status_text(),
            prompt: self
                .input
                .in_command_mode()
                .then(|| hud::prompt_line(self.input.command_buffer())),
        }
    }

    /// HUD status block for the current state.
    pub fn status_text(&self) -> String {
        let store = self.canvas.store();
        match self.palette.get(self.brush.color()) {
            Some(entry) => hud::status_text(entry, store.live_count(), self.canvas.color_count()),
            None => format!("Colour: #{}", self.brush.color()),
        }
    }

    /// Drive the editor until the source ends or quit is pressed.
    pub fn run<S, K>(&mut self, source: &mut S, sink: &mut K) -> Result<RunSummary, EditorError>
    where
        S: PoseSource,
        K: FrameSink,
    {
        log::info!(
            "Editor running (cell size {}, {} colours)",
            self.canvas.cell_size(),
            self.palette.len()
        );
        while let Some(input) = source.next_frame()? {
            let view = self.process_frame(&input);
            sink.present(&view);
            if self.quit {
                log::info!("Quit requested");
                break;
            }
        }
        Ok(RunSummary {
            frames: self.frame,
            live_voxels: self.canvas.store().live_count(),
            colors: self.canvas.color_count(),
            quit_requested: self.quit,
        })
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }
}
