//! Quantum gate types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gates understood by the statevector engine.
///
/// Operands are not stored here; they live on the
/// [`Instruction`](crate::Instruction) that wraps the gate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    /// Hadamard gate.
    H,
    /// Controlled-X (CNOT) gate. Operands are `[control, target]`.
    CX,
    /// Rotation around the Y axis by the given angle in radians.
    ///
    /// Any finite or non-finite value is stored as-is; angles are periodic
    /// and never normalised.
    Ry(f64),
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::H => "h",
            StandardGate::CX => "cx",
            StandardGate::Ry(_) => "ry",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::H | StandardGate::Ry(_) => 1,
            StandardGate::CX => 2,
        }
    }

    /// Rotation angle, if the gate has one.
    pub fn angle(&self) -> Option<f64> {
        match self {
            StandardGate::Ry(theta) => Some(*theta),
            _ => None,
        }
    }
}

impl fmt::Display for StandardGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StandardGate::Ry(theta) => write!(f, "ry({theta})"),
            other => f.write_str(other.name()),
        }
    }
}
