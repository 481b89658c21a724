//! Line-oriented frontend: every line read from stdin is run through the
//! editor's command line.

use std::cell::Cell;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::rc::Rc;

use saltfish_editor::codec::float_layout_supported;
use saltfish_editor::{Config, Editor, EditorConfig, EditorContext, Level, LevelStore};

const DEFAULT_CONFIG: &str = "saltfish.conf";

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if !float_layout_supported() {
        log::error!("f64 is not a 64-bit IEEE 754 value on this platform; level files cannot be read");
        return ExitCode::FAILURE;
    }

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG.to_owned());
    let config = match Config::load_from_file(&config_path) {
        Ok(config) => config,
        Err(err) => {
            log::warn!("{}; using default settings", err);
            Config::new()
        }
    };
    let settings = EditorConfig::from_config(&config);
    match serde_json::to_string(&settings) {
        Ok(json) => log::info!("Editor settings: {}", json),
        Err(err) => log::warn!("Cannot display editor settings: {}", err),
    }
    let store = LevelStore::new(settings.level_dir.clone());
    let mut level = Level::new();

    let exit = Rc::new(Cell::new(false));
    let mut editor = Editor::new(settings, {
        let exit = Rc::clone(&exit);
        move || exit.set(true)
    });

    log::info!("Level directory: {}", store.root().display());

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                log::error!("Failed to read input: {}", err);
                return ExitCode::FAILURE;
            }
        };

        let mut ctx = EditorContext::new(&mut level, &store);
        editor.submit_command(&line, &mut ctx);

        let report = writeln!(
            stdout,
            "{} [{} vertices, {} lines{}]",
            editor.message(),
            level.vertices().len(),
            level.lines().len(),
            if editor.changed() { ", modified" } else { "" }
        )
        .and_then(|()| stdout.flush());
        if let Err(err) = report {
            log::error!("Failed to write output: {}", err);
            return ExitCode::FAILURE;
        }

        if exit.get() {
            break;
        }
    }

    log::info!("Editor closed");
    ExitCode::SUCCESS
}
