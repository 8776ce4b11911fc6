/// A key press delivered by the input collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Space,
    Enter,
    Backspace,
    Escape,
}

impl Key {
    /// Parse a key name: `space`, `enter`, `backspace`, `esc`/`escape`, or a
    /// single character.
    pub fn from_name(name: &str) -> Option<Key> {
        match name.to_ascii_lowercase().as_str() {
            "space" => Some(Key::Space),
            "enter" | "return" => Some(Key::Enter),
            "backspace" => Some(Key::Backspace),
            "esc" | "escape" => Some(Key::Escape),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Key::from_char(c)),
                    _ => None,
                }
            }
        }
    }

    pub fn from_char(c: char) -> Key {
        match c {
            ' ' => Key::Space,
            '\n' | '\r' => Key::Enter,
            '\u{8}' => Key::Backspace,
            '\u{1b}' => Key::Escape,
            other => Key::Char(other),
        }
    }
}

/// Actions that take effect as soon as their key is pressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    NextColor,
    PrevColor,
    Undo,
    Reset,
    Quit,
    /// A command line was submitted with Enter.
    Submit(String),
}

/// Keyboard state accumulated between frames.
///
/// Place and remove are single-shot: set by a key press, cleared when the
/// next tracked frame consumes them.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    place_pending: bool,
    remove_pending: bool,
    command_mode: bool,
    buffer: String,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one key press. Returns an action for keys that apply immediately.
    pub fn handle_key(&mut self, key: Key) -> Option<KeyAction> {
        if self.command_mode {
            return self.handle_command_key(key);
        }

        match key {
            Key::Escape | Key::Char('q') | Key::Char('Q') => Some(KeyAction::Quit),
            Key::Char('-') => Some(KeyAction::PrevColor),
            Key::Char('+') => Some(KeyAction::NextColor),
            Key::Char('r') | Key::Char('R') => Some(KeyAction::Reset),
            Key::Char('u') | Key::Char('U') => Some(KeyAction::Undo),
            Key::Char('x') | Key::Char('X') => {
                self.remove_pending = true;
                None
            }
            Key::Space => {
                self.place_pending = true;
                None
            }
            Key::Enter => {
                self.command_mode = true;
                self.buffer.clear();
                None
            }
            _ => None,
        }
    }

    fn handle_command_key(&mut self, key: Key) -> Option<KeyAction> {
        match key {
            Key::Enter => {
                self.command_mode = false;
                Some(KeyAction::Submit(std::mem::take(&mut self.buffer)))
            }
            Key::Escape => {
                self.command_mode = false;
                self.buffer.clear();
                None
            }
            Key::Backspace => {
                self.buffer.pop();
                None
            }
            Key::Space => {
                self.buffer.push(' ');
                None
            }
            Key::Char('^') => {
                match std::env::current_dir() {
                    Ok(dir) => self.buffer.push_str(&dir.to_string_lossy()),
                    Err(e) => log::warn!("cannot read working directory: {e}"),
                }
                None
            }
            Key::Char(c) => {
                self.buffer.push(c);
                None
            }
        }
    }

    /// Consume a pending place request.
    pub fn take_place(&mut self) -> bool {
        std::mem::take(&mut self.place_pending)
    }

    /// Consume a pending remove request.
    pub fn take_remove(&mut self) -> bool {
        std::mem::take(&mut self.remove_pending)
    }

    pub fn place_pending(&self) -> bool {
        self.place_pending
    }

    pub fn remove_pending(&self) -> bool {
        self.remove_pending
    }

    pub fn in_command_mode(&self) -> bool {
        self.command_mode
    }

    /// Text typed so far on the command line.
    pub fn command_buffer(&self) -> &str {
        &self.buffer
    }
}
