//! Simulator front end: state evolution, shot sampling and the two-pass run.

use num_complex::Complex64;
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, instrument};

use qbell_ir::{Circuit, ClbitId, QubitId};

use crate::config::SimulationConfig;
use crate::counts::Counts;
use crate::error::{SimError, SimResult};
use crate::statevector::Statevector;
use crate::unitary::DIM;

/// Output of a single simulation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationOutput {
    /// The circuit measured: a shot histogram.
    Counts(Counts),
    /// The circuit did not measure: the final state, uncollapsed.
    Statevector(Statevector),
}

/// Both outputs of a rotated Bell run.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationResult {
    /// Rotation angle the template was built with.
    pub theta: f64,
    /// Requested number of shots.
    pub shots: u32,
    /// Histogram from the measured variant.
    pub counts: Counts,
    /// Final state of the unmeasured variant.
    pub statevector: Statevector,
}

/// Two-qubit statevector simulator.
///
/// Holds no mutable state. Each sampling call builds its own random
/// stream, seeded from [`Simulator::seed`] when set and from OS entropy
/// otherwise, so clones can run concurrently without sharing a generator.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    seed: Option<u64>,
}

impl Simulator {
    /// Create a simulator that samples from OS entropy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a simulator whose sampling is reproducible.
    pub fn with_seed(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// Create a simulator from configuration.
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self { seed: config.seed }
    }

    /// Configured sampler seed.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Evolve |00⟩ through every gate of the circuit.
    ///
    /// Measurements are skipped, so the result is never collapsed.
    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    pub fn statevector(&self, circuit: &Circuit) -> SimResult<Statevector> {
        let mut sv = Statevector::new();
        for inst in circuit.instructions() {
            sv.apply(inst)?;
        }
        debug!(ops = circuit.len(), "evolved statevector");
        Ok(sv)
    }

    /// Sample `shots` measurement outcomes of a measuring circuit.
    pub fn sample_counts(&self, circuit: &Circuit, shots: u32) -> SimResult<Counts> {
        self.sample_counts_with_rng(circuit, shots, &mut self.rng())
    }

    /// Sample `shots` outcomes using the given random number generator.
    #[instrument(skip(self, circuit, rng), fields(circuit = circuit.name()))]
    pub fn sample_counts_with_rng<R: Rng>(
        &self,
        circuit: &Circuit,
        shots: u32,
        rng: &mut R,
    ) -> SimResult<Counts> {
        validate_shots(shots)?;

        let measurements = circuit.measurement_map();
        if measurements.is_empty() {
            return Err(SimError::InvalidArgument(format!(
                "circuit '{}' has no measurements to sample",
                circuit.name()
            )));
        }

        let start = Instant::now();
        let sv = self.statevector(circuit)?;
        let dist = WeightedIndex::new(&sv.probabilities())
            .map_err(|e| SimError::Sampling(e.to_string()))?;

        let mut tallies = [0u64; DIM];
        for _ in 0..shots {
            tallies[dist.sample(rng)] += 1;
        }

        let mut counts = Counts::new();
        for (index, &n) in tallies.iter().enumerate() {
            counts.insert(
                outcome_bitstring(index, &measurements, circuit.num_clbits()),
                n,
            );
        }

        debug!(
            shots,
            outcomes = counts.len(),
            elapsed = ?start.elapsed(),
            "sampled measurement outcomes"
        );
        Ok(counts)
    }

    /// Run one pass: sample if the circuit measures, else return the state.
    pub fn simulate(&self, circuit: &Circuit, shots: u32) -> SimResult<SimulationOutput> {
        validate_shots(shots)?;
        if circuit.has_measurements() {
            self.sample_counts(circuit, shots).map(SimulationOutput::Counts)
        } else {
            self.statevector(circuit).map(SimulationOutput::Statevector)
        }
    }

    /// Build both template variants for `theta` and run each once.
    ///
    /// The histogram comes from the measured variant and the statevector from
    /// an independent unmeasured run; the two are not derived from each other.
    #[instrument(skip(self))]
    pub fn run(&self, theta: f64, shots: u32) -> SimResult<SimulationResult> {
        validate_shots(shots)?;
        if !theta.is_finite() {
            return Err(SimError::InvalidArgument(format!(
                "theta must be finite, got {theta}"
            )));
        }

        let measured = Circuit::rotated_bell(theta, true)?;
        let counts = self.sample_counts(&measured, shots)?;

        let unmeasured = Circuit::rotated_bell(theta, false)?;
        let statevector = self.statevector(&unmeasured)?;

        Ok(SimulationResult {
            theta,
            shots,
            counts,
            statevector,
        })
    }
}

/// Run the rotated Bell template with an entropy-seeded simulator.
///
/// Returns the shot histogram (keys `"<q1><q0>"`, values summing to `shots`)
/// and the four final amplitudes in ascending basis order.
pub fn run_simulation(theta: f64, shots: u32) -> SimResult<(Counts, Vec<Complex64>)> {
    let result = Simulator::new().run(theta, shots)?;
    Ok((result.counts, result.statevector.to_vec()))
}

fn validate_shots(shots: u32) -> SimResult<()> {
    if shots == 0 {
        return Err(SimError::InvalidArgument(
            "shots must be a positive integer, got 0".to_string(),
        ));
    }
    Ok(())
}

/// Classical register contents after measuring basis state `index`,
/// highest classical bit first.
fn outcome_bitstring(
    index: usize,
    measurements: &[(QubitId, ClbitId)],
    num_clbits: usize,
) -> String {
    let mut bits = vec!['0'; num_clbits];
    for &(qubit, clbit) in measurements {
        if index & qubit.mask() != 0 {
            bits[clbit.0 as usize] = '1';
        }
    }
    bits.iter().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_bitstring_template_order() {
        let map = [(QubitId(0), ClbitId(0)), (QubitId(1), ClbitId(1))];
        assert_eq!(outcome_bitstring(0b00, &map, 2), "00");
        assert_eq!(outcome_bitstring(0b01, &map, 2), "01");
        assert_eq!(outcome_bitstring(0b10, &map, 2), "10");
        assert_eq!(outcome_bitstring(0b11, &map, 2), "11");
    }

    #[test]
    fn test_outcome_bitstring_crossed_map() {
        // q0 -> c1, q1 -> c0 reverses the key.
        let map = [(QubitId(0), ClbitId(1)), (QubitId(1), ClbitId(0))];
        assert_eq!(outcome_bitstring(0b01, &map, 2), "10");
        assert_eq!(outcome_bitstring(0b10, &map, 2), "01");
    }

    #[test]
    fn test_zero_shots_rejected() {
        let sim = Simulator::with_seed(1);
        let circuit = Circuit::rotated_bell(0.0, true).unwrap();
        assert!(matches!(
            sim.sample_counts(&circuit, 0),
            Err(SimError::InvalidArgument(_))
        ));
        assert!(matches!(
            sim.simulate(&circuit, 0),
            Err(SimError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_sampling_requires_measurements() {
        let sim = Simulator::with_seed(1);
        let circuit = Circuit::rotated_bell(0.0, false).unwrap();
        assert!(matches!(
            sim.sample_counts(&circuit, 10),
            Err(SimError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_simulate_dispatches_on_measurement() {
        let sim = Simulator::with_seed(3);
        let measured = Circuit::rotated_bell(0.4, true).unwrap();
        let unmeasured = Circuit::rotated_bell(0.4, false).unwrap();

        match sim.simulate(&measured, 100).unwrap() {
            SimulationOutput::Counts(counts) => assert_eq!(counts.total_shots(), 100),
            SimulationOutput::Statevector(_) => panic!("expected counts"),
        }
        match sim.simulate(&unmeasured, 100).unwrap() {
            SimulationOutput::Statevector(sv) => assert!((sv.norm_sqr() - 1.0).abs() < 1e-10),
            SimulationOutput::Counts(_) => panic!("expected statevector"),
        }
    }

    #[test]
    fn test_result_serializes() {
        let result = Simulator::with_seed(4).run(0.0, 20).unwrap();
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["shots"], 20);
        assert_eq!(value["statevector"].as_array().unwrap().len(), 4);
        let total: u64 = value["counts"]
            .as_object()
            .unwrap()
            .values()
            .map(|v| v.as_u64().unwrap())
            .sum();
        assert_eq!(total, 20);

        let output = sim_output_json(Simulator::with_seed(4), false);
        assert_eq!(output["statevector"].as_array().unwrap().len(), 4);
        let output = sim_output_json(Simulator::with_seed(4), true);
        assert!(output["counts"].is_object());
    }

    fn sim_output_json(sim: Simulator, measured: bool) -> serde_json::Value {
        let circuit = Circuit::rotated_bell(0.3, measured).unwrap();
        serde_json::to_value(sim.simulate(&circuit, 10).unwrap()).unwrap()
    }

    #[test]
    fn test_non_finite_theta_rejected() {
        let sim = Simulator::new();
        assert!(matches!(
            sim.run(f64::NAN, 10),
            Err(SimError::InvalidArgument(_))
        ));
        assert!(matches!(
            sim.run(f64::INFINITY, 10),
            Err(SimError::InvalidArgument(_))
        ));
    }
}
