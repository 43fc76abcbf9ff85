//! Statevector simulation engine.

use ndarray::Array1;
use num_complex::Complex64;
use serde::{Serialize, Serializer};
use tracing::{trace, warn};

use qbell_ir::{Instruction, InstructionKind, NUM_QUBITS};

use crate::error::SimResult;
use crate::unitary::{DIM, gate_unitary};

/// Absolute tolerance on `Σ|aᵢ|² = 1`.
pub const NORM_TOLERANCE: f64 = 1e-10;

/// The pure state of the two-qubit register.
///
/// Amplitudes are indexed by basis state in ascending binary order
/// (|00⟩, |01⟩, |10⟩, |11⟩), where bit `k` of the index is qubit `k`.
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    amplitudes: Array1<Complex64>,
}

impl Statevector {
    /// Create a new statevector initialized to |00⟩.
    pub fn new() -> Self {
        let mut amplitudes = Array1::from_elem(DIM, Complex64::new(0.0, 0.0));
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self { amplitudes }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        NUM_QUBITS as usize
    }

    /// Apply an instruction to the statevector.
    ///
    /// Gates left-multiply the amplitudes by their embedded 4×4 unitary.
    /// Measurements leave the state untouched.
    pub fn apply(&mut self, instruction: &Instruction) -> SimResult<()> {
        match &instruction.kind {
            InstructionKind::Gate(gate) => {
                let u = gate_unitary(gate, &instruction.qubits)?;
                self.amplitudes = u.dot(&self.amplitudes);
                trace!(gate = %gate, "applied gate");

                let drift = (self.norm_sqr() - 1.0).abs();
                if drift > NORM_TOLERANCE {
                    warn!(gate = %gate, drift, "statevector norm drifted");
                }
            }
            InstructionKind::Measure => {}
        }
        Ok(())
    }

    /// Amplitude of a basis state.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a basis index of the register.
    pub fn amplitude(&self, index: usize) -> Complex64 {
        self.amplitudes[index]
    }

    /// Iterate over amplitudes in basis order.
    pub fn amplitudes(&self) -> impl Iterator<Item = &Complex64> + '_ {
        self.amplitudes.iter()
    }

    /// Per-basis-state probabilities `|aᵢ|²`.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Squared norm of the state; 1 up to rounding for any unitary evolution.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(Complex64::norm_sqr).sum()
    }

    /// Copy the amplitudes out.
    pub fn to_vec(&self) -> Vec<Complex64> {
        self.amplitudes.to_vec()
    }

    /// Label of a basis state, most significant qubit first (`"01"` is q1=0, q0=1).
    pub fn basis_label(index: usize) -> String {
        format!("{index:0width$b}", width = NUM_QUBITS as usize)
    }
}

/// Serializes as the amplitude list, each amplitude as `[re, im]`.
impl Serialize for Statevector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.amplitudes.iter())
    }
}

impl Default for Statevector {
    fn default() -> Self {
        Self::new()
    }
}
