use serde::{Deserialize, Serialize};

use crate::error::PaletteError;
use crate::types::ColorIndex;

pub const BLACK: ColorIndex = ColorIndex(0);
pub const WHITE: ColorIndex = ColorIndex(1);
pub const RED: ColorIndex = ColorIndex(2);
pub const LIME: ColorIndex = ColorIndex(3);
pub const BLUE: ColorIndex = ColorIndex(4);
pub const GRAY: ColorIndex = ColorIndex(9);
pub const LIGHT_GRAY: ColorIndex = ColorIndex(16);

/// Built-in colour table: (name, r, g, b), indexed by position.
const BUILTIN: [(&str, u8, u8, u8); 17] = [
    ("Black", 0, 0, 0),
    ("White", 255, 255, 255),
    ("Red", 255, 0, 0),
    ("Lime", 0, 255, 0),
    ("Blue", 0, 0, 255),
    ("Yellow", 255, 255, 0),
    ("Cyan", 0, 255, 255),
    ("Magenta", 255, 0, 255),
    ("Silver", 192, 192, 192),
    ("Gray", 128, 128, 128),
    ("Maroon", 128, 0, 0),
    ("Olive", 128, 128, 0),
    ("Green", 0, 128, 0),
    ("Purple", 128, 0, 128),
    ("Teal", 0, 128, 128),
    ("Navy", 0, 0, 128),
    ("Light gray", 211, 211, 211),
];

/// A single palette colour, loadable from RON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteEntry {
    /// Position in the palette; must equal the entry's place in the list.
    pub index: u16,
    /// Human-readable name for the HUD.
    pub name: String,
    /// 8-bit RGB colour.
    pub rgb: (u8, u8, u8),
}

/// Immutable registry of available colours, indexed `0..len()`.
#[derive(Debug, Clone)]
pub struct Palette {
    entries: Vec<PaletteEntry>,
}

impl Default for Palette {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Palette {
    /// The default colour table.
    pub fn builtin() -> Self {
        let entries = BUILTIN
            .iter()
            .enumerate()
            .map(|(i, &(name, r, g, b))| PaletteEntry {
                index: i as u16,
                name: name.to_string(),
                rgb: (r, g, b),
            })
            .collect();
        Self { entries }
    }

    /// Build a palette from a list of entries, checking the index order.
    pub fn from_entries(entries: Vec<PaletteEntry>) -> Result<Self, PaletteError> {
        if entries.is_empty() {
            return Err(PaletteError::Empty);
        }
        for (position, entry) in entries.iter().enumerate() {
            if entry.index as usize != position {
                return Err(PaletteError::IndexOutOfOrder {
                    position,
                    found: entry.index,
                });
            }
        }
        Ok(Self { entries })
    }

    /// Parse a RON list of entries.
    pub fn from_ron_str(ron_str: &str) -> Result<Self, PaletteError> {
        let options = ron::Options::default();
        let entries: Vec<PaletteEntry> = options
            .from_str(ron_str)
            .map_err(|e| PaletteError::ParseError(e.to_string()))?;
        Self::from_entries(entries)
    }

    pub fn get(&self, index: ColorIndex) -> Option<&PaletteEntry> {
        self.entries.get(index.as_usize())
    }

    /// Next colour, wrapping from the last entry to the first.
    pub fn next(&self, index: ColorIndex) -> ColorIndex {
        let len = self.entries.len() as u16;
        if index.0 + 1 >= len {
            ColorIndex(0)
        } else {
            ColorIndex(index.0 + 1)
        }
    }

    /// Previous colour, wrapping from the first entry to the last.
    pub fn prev(&self, index: ColorIndex) -> ColorIndex {
        let len = self.entries.len() as u16;
        if index.0 == 0 || index.0 >= len {
            ColorIndex(len - 1)
        } else {
            ColorIndex(index.0 - 1)
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PaletteEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_indices_match_positions() {
        let palette = Palette::builtin();
        assert_eq!(palette.len(), BUILTIN.len());
        for (i, entry) in palette.iter().enumerate() {
            assert_eq!(entry.index as usize, i);
        }
        assert_eq!(palette.get(BLACK).map(|e| e.name.as_str()), Some("Black"));
        assert_eq!(palette.get(LIGHT_GRAY).map(|e| e.rgb), Some((211, 211, 211)));
    }

    #[test]
    fn test_cycle_wraps_both_ways() {
        let palette = Palette::builtin();
        let last = ColorIndex(palette.len() as u16 - 1);
        assert_eq!(palette.next(last), ColorIndex(0));
        assert_eq!(palette.prev(ColorIndex(0)), last);
        assert_eq!(palette.next(ColorIndex(3)), ColorIndex(4));
        assert_eq!(palette.prev(ColorIndex(3)), ColorIndex(2));
    }

    #[test]
    fn test_from_ron_str() {
        let ron = r#"[
            (index: 0, name: "Ink", rgb: (10, 20, 30)),
            (index: 1, name: "Paper", rgb: (250, 250, 240)),
        ]"#;
        let palette = Palette::from_ron_str(ron).expect("valid palette");
        assert_eq!(palette.len(), 2);
        assert_eq!(palette.get(ColorIndex(1)).map(|e| e.name.as_str()), Some("Paper"));
        assert!(palette.get(ColorIndex(2)).is_none());
    }

    #[test]
    fn test_from_ron_rejects_gaps_and_empty() {
        let gap = r#"[(index: 0, name: "A", rgb: (0, 0, 0)), (index: 2, name: "B", rgb: (1, 1, 1))]"#;
        assert!(matches!(
            Palette::from_ron_str(gap),
            Err(PaletteError::IndexOutOfOrder { position: 1, found: 2 })
        ));
        assert!(matches!(Palette::from_ron_str("[]"), Err(PaletteError::Empty)));
        assert!(matches!(
            Palette::from_ron_str("not ron"),
            Err(PaletteError::ParseError(_))
        ));
    }

    #[test]
    fn test_builtin_named_colors() {
        let palette = Palette::builtin();
        let white = palette.get(WHITE).expect("white");
        assert_eq!(white.rgb, (255, 255, 255));
        assert_eq!(palette.get(LIGHT_GRAY).map(|e| e.name.as_str()), Some("Light gray"));
    }
}
