//! One-shot BMI calculation and history inspection.
//!
//! Works directly on the local SQLite store, so it sees history written by
//! earlier releases. Loading rewrites legacy data in the canonical format.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin bmi_history -- [--db <path>] calc <height-cm> <weight-kg> [--save]
//! cargo run --bin bmi_history -- [--db <path>] list
//! cargo run --bin bmi_history -- [--db <path>] clear
//! ```

use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use bmitrack::adapters::SqliteStore;
use bmitrack::application::{Calculator, HistoryService};
use bmitrack::{BmiError, Config};

const USAGE: &str =
    "Usage: bmi_history [--db <path>] (calc <height-cm> <weight-kg> [--save] | list | clear)";

enum Command {
    Calc {
        height: String,
        weight: String,
        save: bool,
    },
    List,
    Clear,
}

fn usage_error(message: &str) -> ! {
    eprintln!("{message}\n{USAGE}");
    std::process::exit(2);
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let mut config = Config::from_env();
    let mut args = std::env::args().skip(1);
    let mut positional = Vec::new();
    let mut save = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--db" => {
                let path = args.next().unwrap_or_default();
                if path.is_empty() {
                    usage_error("--db needs a path");
                }
                config.db_path = path.into();
            }
            "--save" => save = true,
            "-h" | "--help" => {
                println!("{USAGE}\n\nHistory is kept in BMITRACK_DB_PATH (default bmitrack.db).");
                return Ok(());
            }
            _ => positional.push(arg),
        }
    }

    let command = match positional.as_slice() {
        [cmd, height, weight] if cmd == "calc" => Command::Calc {
            height: height.clone(),
            weight: weight.clone(),
            save,
        },
        [cmd] if cmd == "list" => Command::List,
        [cmd] if cmd == "clear" => Command::Clear,
        [] => usage_error("Missing command"),
        _ => usage_error(&format!("Unknown arguments: {}", positional.join(" "))),
    };

    let store = Arc::new(SqliteStore::new(&config.db_path)?);
    let history: HistoryService<SqliteStore, SqliteStore> =
        HistoryService::new(store, None, config.history_max);
    let mut calculator = Calculator::new(history);
    calculator.load_history();

    match command {
        Command::Calc {
            height,
            weight,
            save,
        } => {
            let Some(result) = calculator.calculate(&height, &weight).cloned() else {
                let err = BmiError::Validation(format!(
                    "height {height:?} and weight {weight:?} must be non-zero numbers"
                ));
                eprintln!("{err}");
                std::process::exit(1);
            };

            println!(
                "BMI {} ({}, {}) for {} cm / {} kg",
                result.bmi,
                result.band(),
                result.description,
                result.height,
                result.weight
            );

            if save {
                if let Some(record) = calculator.save_result()? {
                    println!("Saved as {}", record.id);
                }
            }
        }
        Command::List => {
            let records = calculator.history();
            if records.is_empty() {
                println!("No saved results.");
            }
            for record in records {
                println!(
                    "{:<20} {:<12} BMI {:<6} weight {}kg height {}  [{}]",
                    record.date,
                    record.band(),
                    record.result.bmi,
                    record.result.weight,
                    record.result.height,
                    record.id
                );
            }
        }
        Command::Clear => {
            calculator.clear_history()?;
            println!("History cleared.");
        }
    }

    Ok(())
}
