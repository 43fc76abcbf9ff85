//! Circuit instructions combining gates with operands.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::gate::StandardGate;
use crate::qubit::{ClbitId, QubitId};

/// The kind of instruction in a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// A unitary gate.
    Gate(StandardGate),
    /// Terminal measurement of one qubit into one classical bit.
    ///
    /// Leaves the amplitudes untouched; it only marks that the circuit
    /// should be sampled.
    Measure,
}

/// A complete instruction with operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    /// The kind of instruction.
    pub kind: InstructionKind,
    /// Qubits this instruction operates on.
    pub qubits: Vec<QubitId>,
    /// Classical bits this instruction writes (for measure).
    pub clbits: Vec<ClbitId>,
}

impl Instruction {
    /// Create a gate instruction.
    pub fn gate(gate: StandardGate, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind: InstructionKind::Gate(gate),
            qubits: qubits.into_iter().collect(),
            clbits: vec![],
        }
    }

    /// Create a single-qubit gate instruction.
    pub fn single_qubit_gate(gate: StandardGate, qubit: QubitId) -> Self {
        Self::gate(gate, [qubit])
    }

    /// Create a two-qubit gate instruction.
    pub fn two_qubit_gate(gate: StandardGate, q1: QubitId, q2: QubitId) -> Self {
        Self::gate(gate, [q1, q2])
    }

    /// Create a measurement instruction.
    pub fn measure(qubit: QubitId, clbit: ClbitId) -> Self {
        Self {
            kind: InstructionKind::Measure,
            qubits: vec![qubit],
            clbits: vec![clbit],
        }
    }

    /// Check if this is a gate instruction.
    pub fn is_gate(&self) -> bool {
        matches!(self.kind, InstructionKind::Gate(_))
    }

    /// Check if this is a measurement.
    pub fn is_measure(&self) -> bool {
        matches!(self.kind, InstructionKind::Measure)
    }

    /// Get the gate if this is a gate instruction.
    pub fn as_gate(&self) -> Option<&StandardGate> {
        match &self.kind {
            InstructionKind::Gate(g) => Some(g),
            InstructionKind::Measure => None,
        }
    }

    /// Get the name of this instruction.
    pub fn name(&self) -> &'static str {
        match &self.kind {
            InstructionKind::Gate(g) => g.name(),
            InstructionKind::Measure => "measure",
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let qubits: Vec<String> = self.qubits.iter().map(ToString::to_string).collect();
        match &self.kind {
            InstructionKind::Gate(g) => write!(f, "{g} {}", qubits.join(", ")),
            InstructionKind::Measure => {
                let clbits: Vec<String> = self.clbits.iter().map(ToString::to_string).collect();
                write!(f, "measure {} -> {}", qubits.join(", "), clbits.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_instruction() {
        let inst = Instruction::two_qubit_gate(StandardGate::CX, QubitId(0), QubitId(1));
        assert!(inst.is_gate());
        assert!(!inst.is_measure());
        assert_eq!(inst.name(), "cx");
        assert_eq!(inst.qubits, vec![QubitId(0), QubitId(1)]);
        assert!(inst.clbits.is_empty());
        assert_eq!(inst.to_string(), "cx q0, q1");
    }

    #[test]
    fn test_measure_instruction() {
        let inst = Instruction::measure(QubitId(1), ClbitId(1));
        assert!(inst.is_measure());
        assert!(inst.as_gate().is_none());
        assert_eq!(inst.to_string(), "measure q1 -> c1");
    }
}
