//! sheet-clean CLI.

use clap::Parser;
use sheet_clean::commands::{run_clean, run_defaults, statistics_json};
use sheet_clean::logging::{init_logging, LogConfig};
use sheet_clean::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    let log_config = LogConfig {
        level: cli.log_level.into(),
        log_file: cli.log_file.clone(),
    };
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error:#}");
        std::process::exit(1);
    }

    let exit_code = match cli.command {
        Command::Clean(args) => match run_clean(&args) {
            Ok(outcome) => {
                eprintln!(
                    "cleaned {} sheet(s) -> {}",
                    outcome.sheets,
                    outcome.output.display()
                );
                if args.stats.is_some() {
                    0
                } else {
                    match statistics_json(&outcome.stats) {
                        Ok(json) => {
                            println!("{json}");
                            0
                        }
                        Err(error) => {
                            eprintln!("error: {error:#}");
                            1
                        }
                    }
                }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Defaults => match run_defaults() {
            Ok(json) => {
                println!("{json}");
                0
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}
