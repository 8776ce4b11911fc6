use arvox_core::palette::PaletteEntry;

/// Key bindings shown in the bottom-left corner.
pub const HELP_TEXT: &str = "\
Q: Quit
-/+: Change colour
R: Reset
U: Undo
ENTER: Command line
SPACEBAR: Put voxel
X: Remove voxel";

/// Status block: current colour and canvas counts.
pub fn status_text(color: &PaletteEntry, live_voxels: usize, colors: usize) -> String {
    let (r, g, b) = color.rgb;
    format!(
        "Colour: {} ({}, {}, {})\nNum. of voxels: {}\nNum. of colours: {}",
        color.name, r, g, b, live_voxels, colors
    )
}

/// Command-line prompt, shown while a command is being typed.
pub fn prompt_line(buffer: &str) -> String {
    format!("> {buffer}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use arvox_core::palette::{Palette, RED};

    #[test]
    fn test_status_text() {
        let palette = Palette::builtin();
        let red = palette.get(RED).expect("red");
        let text = status_text(red, 3, 2);
        assert_eq!(
            text,
            "Colour: Red (255, 0, 0)\nNum. of voxels: 3\nNum. of colours: 2"
        );
    }

    #[test]
    fn test_help_lists_every_binding() {
        for key in ["Q:", "-/+:", "R:", "U:", "ENTER:", "SPACEBAR:", "X:"] {
            assert!(HELP_TEXT.contains(key), "missing {key}");
        }
        assert_eq!(prompt_line("load a"), "> load a");
    }
}
