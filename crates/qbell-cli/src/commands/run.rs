//! Run command implementation.

use anyhow::{Context, Result};
use console::style;
use serde::Serialize;
use tracing::info;

use qbell_ir::Circuit;
use qbell_sim::{Config, SimulationResult, Simulator};

use super::common::{OutputFormat, print_counts, print_statevector};

/// JSON document written by `qbell run --format json`.
#[derive(Debug, Serialize)]
struct RunReport {
    #[serde(flatten)]
    result: SimulationResult,
    seed: Option<u64>,
    probabilities: Vec<f64>,
}

/// Execute the run command.
///
/// Flags override the loaded configuration. The measured and unmeasured
/// variants are simulated concurrently on the blocking pool.
pub async fn execute(
    config: &Config,
    theta: Option<f64>,
    shots: Option<u32>,
    seed: Option<u64>,
    format: OutputFormat,
) -> Result<()> {
    let mut settings = config.simulation.clone();
    if let Some(theta) = theta {
        settings.theta = theta;
    }
    if let Some(shots) = shots {
        settings.shots = shots;
    }
    if seed.is_some() {
        settings.seed = seed;
    }

    if settings.shots == 0 {
        anyhow::bail!("shots must be a positive integer, got 0");
    }
    if !settings.theta.is_finite() {
        anyhow::bail!("theta must be finite, got {}", settings.theta);
    }

    if format == OutputFormat::Table {
        println!(
            "{} Simulating rotated Bell state (theta = {}, {} shots)",
            style("→").cyan().bold(),
            style(format!("{:.6}", settings.theta)).yellow(),
            settings.shots
        );
    }

    let measured = Circuit::rotated_bell(settings.theta, true)?;
    let unmeasured = Circuit::rotated_bell(settings.theta, false)?;
    info!(
        theta = settings.theta,
        shots = settings.shots,
        seed = ?settings.seed,
        "starting simulation"
    );

    let simulator = Simulator::from_config(&settings);
    let sampler = simulator.clone();
    let shot_count = settings.shots;

    let counts_task =
        tokio::task::spawn_blocking(move || sampler.sample_counts(&measured, shot_count));
    let state_task = tokio::task::spawn_blocking(move || simulator.statevector(&unmeasured));

    let (counts, statevector) =
        tokio::try_join!(counts_task, state_task).context("simulation task failed")?;
    let counts = counts?;
    let statevector = statevector?;

    match format {
        OutputFormat::Table => {
            print_counts(&counts);
            print_statevector(&statevector.to_vec());
        }
        OutputFormat::Json => {
            let report = RunReport {
                seed: settings.seed,
                probabilities: statevector.probabilities(),
                result: SimulationResult {
                    theta: settings.theta,
                    shots: settings.shots,
                    counts,
                    statevector,
                },
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
