use std::process;

use arvox_editor::config::USAGE;
use arvox_editor::hud::HELP_TEXT;
use arvox_editor::{Editor, EditorConfig, LogSink, ParsedArgs, ScriptSource};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match EditorConfig::from_args(std::env::args().skip(1)) {
        Ok(ParsedArgs::Run(config)) => config,
        Ok(ParsedArgs::Help) => {
            eprintln!("{USAGE}");
            eprintln!();
            eprintln!("{HELP_TEXT}");
            process::exit(0);
        }
        Err(e) => {
            log::error!("{e}");
            eprintln!("{USAGE}");
            process::exit(1);
        }
    };

    let palette = match config.load_palette() {
        Ok(palette) => palette,
        Err(e) => {
            log::error!("{e}");
            process::exit(1);
        }
    };

    let mut source = match ScriptSource::open(&config.device) {
        Ok(source) => source,
        Err(e) => {
            log::error!("{e}");
            process::exit(1);
        }
    };

    log::info!("Cell size: {} mm", config.cell_size);
    let mut editor = Editor::new(config.cell_size, palette);
    let mut sink = LogSink::new();

    match editor.run(&mut source, &mut sink) {
        Ok(summary) => {
            log::info!(
                "Session ended after {} frames: {} voxels, {} colours",
                summary.frames,
                summary.live_voxels,
                summary.colors
            );
        }
        Err(e) => {
            log::error!("{e}");
            process::exit(1);
        }
    }
}
