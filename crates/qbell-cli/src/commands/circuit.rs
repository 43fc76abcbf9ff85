//! Circuit command implementation.

use std::collections::BTreeMap;

use anyhow::Result;
use console::style;
use serde::Serialize;

use qbell_ir::Circuit;
use qbell_sim::Config;

use super::common::OutputFormat;

#[derive(Debug, Serialize)]
struct CircuitReport<'a> {
    num_qubits: usize,
    num_clbits: usize,
    depth: usize,
    ops: BTreeMap<&'static str, usize>,
    circuit: &'a Circuit,
}

/// Execute the circuit command.
pub fn execute(
    config: &Config,
    theta: Option<f64>,
    with_measurement: bool,
    format: OutputFormat,
) -> Result<()> {
    let theta = theta.unwrap_or(config.simulation.theta);
    let circuit = Circuit::rotated_bell(theta, with_measurement)?;
    let ops: BTreeMap<_, _> = circuit.count_ops().into_iter().collect();

    match format {
        OutputFormat::Table => {
            println!(
                "{} {} (theta = {:.6})",
                style("→").cyan().bold(),
                style(circuit.name()).green(),
                theta
            );
            println!(
                "  Qubits: {}, clbits: {}, depth: {}",
                circuit.num_qubits(),
                circuit.num_clbits(),
                style(circuit.depth()).yellow()
            );

            let summary: Vec<String> = ops.iter().map(|(op, n)| format!("{op}={n}")).collect();
            println!("  Ops: {}", summary.join(", "));

            println!();
            for (i, inst) in circuit.instructions().iter().enumerate() {
                println!("  {:>2}: {}", i, style(inst).cyan());
            }
        }
        OutputFormat::Json => {
            let report = CircuitReport {
                num_qubits: circuit.num_qubits(),
                num_clbits: circuit.num_clbits(),
                depth: circuit.depth(),
                ops,
                circuit: &circuit,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
