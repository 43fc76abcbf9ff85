//! qbell Command-Line Interface
//!
//! Builds the rotated Bell template, simulates it on the statevector engine
//! and prints the shot histogram alongside the exact final state.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::common::{OutputFormat, parse_angle};
use commands::{circuit, run, version};

/// qbell - two-qubit rotated Bell state simulator
#[derive(Parser)]
#[command(name = "qbell")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (defaults to <config dir>/qbell/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate the template and print counts and statevector
    Run {
        /// Rotation angle in radians (accepts pi expressions such as pi/4)
        #[arg(short, long, allow_hyphen_values = true, value_parser = parse_angle)]
        theta: Option<f64>,

        /// Number of shots
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        shots: Option<u32>,

        /// Seed for reproducible sampling
        #[arg(long)]
        seed: Option<u64>,

        /// Output format (table, json)
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Show the template circuit
    Circuit {
        /// Rotation angle in radians (accepts pi expressions such as pi/4)
        #[arg(short, long, allow_hyphen_values = true, value_parser = parse_angle)]
        theta: Option<f64>,

        /// Omit the terminal measurements
        #[arg(long)]
        no_measure: bool,

        /// Output format (table, json)
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Show version information
    Version,
}

/// Pick the log filter: `QBELL_LOG` wins, then `-v` flags, then the configured level.
fn log_filter(verbose: u8, configured: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_env("QBELL_LOG") {
        return filter;
    }
    let level = match verbose {
        0 => configured,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    EnvFilter::new(level)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = qbell_sim::Config::load(cli.config.as_deref());

    // Setup logging
    let configured = config
        .as_ref()
        .map_or("warn", |c| c.logging.level.as_str());
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose, configured))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let result = match config {
        Err(e) => Err(e.into()),
        Ok(config) => match cli.command {
            Commands::Run {
                theta,
                shots,
                seed,
                format,
            } => run::execute(&config, theta, shots, seed, format).await,

            Commands::Circuit {
                theta,
                no_measure,
                format,
            } => circuit::execute(&config, theta, !no_measure, format),

            Commands::Version => {
                version::execute();
                Ok(())
            }
        },
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_parse_run_defaults() {
        let cli = Cli::try_parse_from(["qbell", "run"]).unwrap();
        assert_eq!(cli.verbose, 0);
        assert!(cli.config.is_none());
        match cli.command {
            Commands::Run {
                theta,
                shots,
                seed,
                format,
            } => {
                assert!(theta.is_none());
                assert!(shots.is_none());
                assert!(seed.is_none());
                assert_eq!(format, OutputFormat::Table);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_parse_run_all_args() {
        let cli = Cli::try_parse_from([
            "qbell", "-vv", "run", "--theta", "pi/4", "--shots", "2048", "--seed", "7", "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Run {
                theta,
                shots,
                seed,
                format,
            } => {
                assert!((theta.unwrap() - PI / 4.0).abs() < 1e-15);
                assert_eq!(shots, Some(2048));
                assert_eq!(seed, Some(7));
                assert_eq!(format, OutputFormat::Json);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_parse_negative_theta() {
        let cli = Cli::try_parse_from(["qbell", "run", "-t", "-0.5"]).unwrap();
        match cli.command {
            Commands::Run { theta, .. } => assert_eq!(theta, Some(-0.5)),
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_parse_negative_pi_expression() {
        let cli = Cli::try_parse_from(["qbell", "run", "--theta", "-pi/8"]).unwrap();
        match cli.command {
            Commands::Run { theta, .. } => {
                assert!((theta.unwrap() + PI / 8.0).abs() < 1e-15);
            }
            _ => panic!("expected run"),
        }

        let cli = Cli::try_parse_from(["qbell", "circuit", "-t", "-3*pi/4"]).unwrap();
        match cli.command {
            Commands::Circuit { theta, .. } => {
                assert!((theta.unwrap() + 3.0 * PI / 4.0).abs() < 1e-15);
            }
            _ => panic!("expected circuit"),
        }
    }

    #[test]
    fn test_parse_zero_shots_rejected() {
        assert!(Cli::try_parse_from(["qbell", "run", "--shots", "0"]).is_err());
        assert!(Cli::try_parse_from(["qbell", "run", "--shots", "-5"]).is_err());
    }

    #[test]
    fn test_parse_bad_angle_rejected() {
        assert!(Cli::try_parse_from(["qbell", "run", "--theta", "tau"]).is_err());
    }

    #[test]
    fn test_parse_circuit_no_measure() {
        let cli =
            Cli::try_parse_from(["qbell", "circuit", "--no-measure", "--config", "q.yaml"])
                .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("q.yaml")));
        match cli.command {
            Commands::Circuit { no_measure, .. } => assert!(no_measure),
            _ => panic!("expected circuit"),
        }
    }

    #[test]
    fn test_parse_version() {
        let cli = Cli::try_parse_from(["qbell", "version"]).unwrap();
        assert!(matches!(cli.command, Commands::Version));
    }

    #[test]
    fn test_parse_unknown_format() {
        assert!(Cli::try_parse_from(["qbell", "run", "--format", "xml"]).is_err());
    }
}
