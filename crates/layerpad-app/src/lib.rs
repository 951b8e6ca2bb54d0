//! Layerpad Application
//!
//! Headless shell around the core and render crates: a drawing session driven
//! by scripted gestures, plus SVG and PNG downloads.

mod config;
mod download;
mod error;
mod layer_panel;
mod script;
mod session;

pub use config::AppConfig;
pub use download::{save_png, save_svg};
pub use error::{AppError, AppResult};
pub use layer_panel::{
    LAYER_ITEM_HEIGHT, LayerPanelDrag, REORDER_INTERVAL, ReorderThrottle, target_order,
};
pub use script::{GestureScript, ScriptStep};
pub use session::{GestureEvent, Session};

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Parser)]
#[command(name = "layerpad", about = "Replay a gesture script and export the canvas")]
pub struct CliArgs {
    /// JSON configuration file.
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// JSON gesture script to replay before exporting.
    #[arg(value_name = "SCRIPT")]
    pub script: Option<PathBuf>,
}

/// Replay the script (if any) and write the configured exports. Returns the
/// written files.
pub fn run(args: &CliArgs) -> AppResult<Vec<PathBuf>> {
    let config = AppConfig::load_or_default(args.config.as_deref())?;
    let mut session = Session::new(&config)?;

    if let Some(path) = &args.script {
        let script = GestureScript::from_json(&std::fs::read_to_string(path)?)?;
        log::info!("Replaying {} ({} steps)", path.display(), script.len());
        script.replay(&mut session);
    }

    let mut written = Vec::new();
    if config.export_svg {
        written.push(save_svg(&config.output_dir, &config.basename, &session.export_svg())?);
    }
    if config.export_png {
        written.push(save_png(&config.output_dir, &config.basename, &session.export_png()?)?);
    }

    session.close();
    Ok(written)
}
