//! bmitrack: terminal BMI calculator.
//!
//! Main entry point for the terminal application.

use anyhow::Result;
use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bmitrack::tui::App;
use bmitrack::Config;

fn main() -> Result<()> {
    let config = Config::from_env();

    // Logging to the terminal would corrupt the TUI (alternate screen), so
    // interactive runs log to a file unless BMITRACK_LOG_MODE says otherwise.
    let interactive = std::io::stdout().is_terminal();

    let (writer, _guard) = if config.log_mode.use_file(interactive) {
        if let Some(parent) = config.log_file.parent() {
            // Best-effort: don't fail startup just because the directory is missing.
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.log_file)?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(writer))
        .init();

    tracing::info!(
        "Starting bmitrack (local store {:?}, history cap {})",
        config.db_path,
        config.history_max
    );

    let mut app = App::new(&config)?;
    app.run()?;

    tracing::info!("bmitrack shutdown complete.");
    Ok(())
}
