use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use drafter::core::config::{self, CliOverrides, DrafterConfig};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "drafter", about = "Paragraph-based drafting editor for the terminal")]
struct Args {
    /// Directory holding storage.json (overrides config and DRAFTER_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Keep everything in memory; nothing is read from or written to disk
    #[arg(long)]
    ephemeral: bool,

    /// Start with the preview pane hidden
    #[arg(long)]
    no_preview: bool,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();

    // Initialize file logger - writes to drafter.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("drafter.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        eprintln!("Warning: {}; using defaults", e);
        log::warn!("Config load failed: {}", e);
        DrafterConfig::default()
    });
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            data_dir: args.data_dir,
            ephemeral: args.ephemeral,
            no_preview: args.no_preview,
        },
    );

    log::info!(
        "Drafter starting up (storage: {})",
        resolved
            .data_dir
            .as_ref()
            .map(|d| d.display().to_string())
            .unwrap_or_else(|| "memory".to_string())
    );

    drafter::tui::run(resolved)
}
