//! Text-driven pose source.
//!
//! Replays a recorded session without a camera. One instruction per line:
//!
//! ```text
//! # comment
//! canvas <x> <y> <z>   move the canvas marker (camera space, persists)
//! pose <x> <y> <z>     frame with the brush at this camera-space position
//! miss                 frame with the brush not detected
//! hide                 frame with neither marker detected
//! lost                 tracker failure; ends the run with an error
//! press <key>          key press delivered with the next frame
//! type <text>          one key press per character
//! command <text>       Enter, the text, Enter
//! ```

use std::collections::VecDeque;
use std::io::Read;
use std::path::PathBuf;

use glam::{DAffine3, DVec3};
use thiserror::Error;

use arvox_core::constants::BRUSH_PATTERN_ID;

use crate::input::Key;
use crate::tracking::{Detection, FrameInput, FramePoses, PoseSource, TrackingError};

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("pose script line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("failed to read pose script {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// One parsed script instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptStep {
    Canvas(DVec3),
    Pose(DVec3),
    Miss,
    Hide,
    Lost,
    Keys(Vec<Key>),
}

fn parse_vec3(args: &[&str], line: usize) -> Result<DVec3, ScriptError> {
    if args.len() != 3 {
        return Err(ScriptError::Parse {
            line,
            message: format!("expected 3 coordinates, found {}", args.len()),
        });
    }
    let mut v = [0.0f64; 3];
    for (slot, raw) in v.iter_mut().zip(args) {
        *slot = raw.parse().map_err(|_| ScriptError::Parse {
            line,
            message: format!("{raw:?} is not a number"),
        })?;
    }
    Ok(DVec3::from_array(v))
}

/// Parse a whole script into steps.
pub fn parse_script(text: &str) -> Result<Vec<ScriptStep>, ScriptError> {
    let mut steps = Vec::new();
    for (i, raw_line) in text.lines().enumerate() {
        let line = i + 1;
        let trimmed = raw_line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let (word, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (trimmed, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        let step = match word {
            "canvas" => ScriptStep::Canvas(parse_vec3(&args, line)?),
            "pose" => ScriptStep::Pose(parse_vec3(&args, line)?),
            "miss" => ScriptStep::Miss,
            "hide" => ScriptStep::Hide,
            "lost" => ScriptStep::Lost,
            "press" => {
                let keys = args
                    .iter()
                    .map(|name| {
                        Key::from_name(name).ok_or_else(|| ScriptError::Parse {
                            line,
                            message: format!("unknown key {name:?}"),
                        })
                    })
                    .collect::<Result<Vec<Key>, ScriptError>>()?;
                if keys.is_empty() {
                    return Err(ScriptError::Parse {
                        line,
                        message: "press needs a key name".into(),
                    });
                }
                ScriptStep::Keys(keys)
            }
            "type" => ScriptStep::Keys(rest.chars().map(Key::from_char).collect()),
            "command" => {
                let mut keys = vec![Key::Enter];
                keys.extend(rest.chars().map(Key::from_char));
                keys.push(Key::Enter);
                ScriptStep::Keys(keys)
            }
            other => {
                return Err(ScriptError::Parse {
                    line,
                    message: format!("unknown instruction {other:?}"),
                })
            }
        };
        steps.push(step);
    }
    Ok(steps)
}

/// [`PoseSource`] replaying a parsed script.
#[derive(Debug, Clone)]
pub struct ScriptSource {
    steps: VecDeque<ScriptStep>,
    canvas: DAffine3,
}

impl ScriptSource {
    pub fn new(steps: Vec<ScriptStep>) -> Self {
        Self {
            steps: steps.into(),
            canvas: DAffine3::IDENTITY,
        }
    }

    pub fn parse(text: &str) -> Result<Self, ScriptError> {
        Ok(Self::new(parse_script(text)?))
    }

    /// Open the pose stream named by `device`: a script path, or stdin when
    /// `device` is empty or `-`.
    pub fn open(device: &str) -> Result<Self, ScriptError> {
        let text = if device.is_empty() || device == "-" {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|source| ScriptError::Read {
                    path: PathBuf::from("<stdin>"),
                    source,
                })?;
            buf
        } else {
            std::fs::read_to_string(device).map_err(|source| ScriptError::Read {
                path: PathBuf::from(device),
                source,
            })?
        };
        let source = Self::parse(&text)?;
        log::info!("pose script: {} steps", source.steps.len());
        Ok(source)
    }

    fn frame(&self, brush: Option<DVec3>, canvas_visible: bool, keys: Vec<Key>) -> FrameInput {
        let detections: Vec<Detection> = brush
            .into_iter()
            .map(|position| Detection {
                pattern_id: BRUSH_PATTERN_ID,
                confidence: 1.0,
                transform: DAffine3::from_translation(position),
            })
            .collect();
        let canvas = canvas_visible.then_some(self.canvas);
        FrameInput {
            poses: FramePoses::from_detections(canvas, &detections),
            keys,
        }
    }
}

impl PoseSource for ScriptSource {
    fn next_frame(&mut self) -> Result<Option<FrameInput>, TrackingError> {
        let mut keys = Vec::new();
        while let Some(step) = self.steps.pop_front() {
            match step {
                ScriptStep::Canvas(origin) => self.canvas = DAffine3::from_translation(origin),
                ScriptStep::Keys(pressed) => keys.extend(pressed),
                ScriptStep::Pose(position) => {
                    return Ok(Some(self.frame(Some(position), true, keys)))
                }
                ScriptStep::Miss => return Ok(Some(self.frame(None, true, keys))),
                ScriptStep::Hide => return Ok(Some(self.frame(None, false, keys))),
                ScriptStep::Lost => {
                    return Err(TrackingError::DetectionFailed(
                        "tracker lost (scripted)".into(),
                    ))
                }
            }
        }

        // Keys after the last frame still get one untracked frame.
        if keys.is_empty() {
            Ok(None)
        } else {
            Ok(Some(self.frame(None, false, keys)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script_steps() {
        let steps = parse_script(
            "# warm-up\n\
             canvas 10 0 0\n\
             press space +\n\
             pose 18 -8 8\n\
             miss\n\
             type ab\n\
             command save m.txt\n\
             lost\n",
        )
        .expect("valid script");
        assert_eq!(steps[0], ScriptStep::Canvas(DVec3::new(10.0, 0.0, 0.0)));
        assert_eq!(steps[1], ScriptStep::Keys(vec![Key::Space, Key::Char('+')]));
        assert_eq!(steps[2], ScriptStep::Pose(DVec3::new(18.0, -8.0, 8.0)));
        assert_eq!(steps[3], ScriptStep::Miss);
        assert_eq!(steps[4], ScriptStep::Keys(vec![Key::Char('a'), Key::Char('b')]));
        match &steps[5] {
            ScriptStep::Keys(keys) => {
                assert_eq!(keys.first(), Some(&Key::Enter));
                assert_eq!(keys.last(), Some(&Key::Enter));
                assert!(keys.contains(&Key::Space));
                assert_eq!(keys.len(), "save m.txt".len() + 2);
            }
            other => panic!("expected keys, got {other:?}"),
        }
        assert_eq!(steps[6], ScriptStep::Lost);
    }

    #[test]
    fn test_parse_errors_carry_line_numbers() {
        let err = parse_script("miss\npose 1 2\n").expect_err("short pose");
        assert!(matches!(err, ScriptError::Parse { line: 2, .. }));
        let err = parse_script("pose 1 2 z\n").expect_err("bad number");
        assert!(matches!(err, ScriptError::Parse { line: 1, .. }));
        let err = parse_script("jump\n").expect_err("unknown");
        assert!(matches!(err, ScriptError::Parse { line: 1, .. }));
        let err = parse_script("press nothing-key\n").expect_err("unknown key");
        assert!(matches!(err, ScriptError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_frames_carry_queued_keys() {
        let mut source =
            ScriptSource::parse("canvas 100 0 0\npress space\npose 116 0 0\nmiss\n").expect("script");

        let first = source.next_frame().expect("frame").expect("some frame");
        assert_eq!(first.keys, vec![Key::Space]);
        assert_eq!(first.poses.brush_on_canvas(), Some(DVec3::new(16.0, 0.0, 0.0)));

        let second = source.next_frame().expect("frame").expect("some frame");
        assert!(second.keys.is_empty());
        assert!(second.poses.canvas.is_some());
        assert!(second.poses.brush.is_none());

        assert!(source.next_frame().expect("end").is_none());
    }

    #[test]
    fn test_trailing_keys_and_lost() {
        let mut source = ScriptSource::parse("hide\npress q\n").expect("script");
        let hidden = source.next_frame().expect("frame").expect("some frame");
        assert!(hidden.poses.canvas.is_none());
        let trailing = source.next_frame().expect("frame").expect("trailing keys");
        assert_eq!(trailing.keys, vec![Key::Char('q')]);
        assert!(source.next_frame().expect("end").is_none());

        let mut lost = ScriptSource::parse("lost\n").expect("script");
        assert!(lost.next_frame().is_err());
    }

    #[test]
    fn test_open_missing_script() {
        let err = ScriptSource::open("/definitely/not/here.script").expect_err("missing");
        assert!(matches!(err, ScriptError::Read { .. }));
    }
}
