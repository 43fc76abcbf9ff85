//! High-level circuit builder API.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::instruction::{Instruction, InstructionKind};
use crate::qubit::{ClbitId, QubitId};

/// Number of qubits in every qbell circuit.
pub const NUM_QUBITS: u32 = 2;

/// A quantum circuit over the fixed two-qubit register.
///
/// Instructions are kept in application order. Every operand is checked
/// when the instruction is added, so a constructed circuit is always
/// well-formed for the statevector engine. Deserialization replays every
/// instruction through [`Circuit::push`], so the same checks apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCircuit")]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Width of the classical register.
    num_clbits: u32,
    /// Instructions in application order.
    instructions: Vec<Instruction>,
}

/// Unchecked wire form of a [`Circuit`].
#[derive(Deserialize)]
struct RawCircuit {
    name: String,
    num_clbits: u32,
    instructions: Vec<Instruction>,
}

impl TryFrom<RawCircuit> for Circuit {
    type Error = IrError;

    fn try_from(raw: RawCircuit) -> IrResult<Self> {
        let mut circuit = Circuit::with_clbits(raw.name, raw.num_clbits);
        for instruction in raw.instructions {
            circuit.push(instruction)?;
        }
        Ok(circuit)
    }
}

impl Circuit {
    /// Create a new empty circuit without classical bits.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_clbits(name, 0)
    }

    /// Create a circuit with a classical register of the given width.
    pub fn with_clbits(name: impl Into<String>, num_clbits: u32) -> Self {
        Self {
            name: name.into(),
            num_clbits,
            instructions: vec![],
        }
    }

    /// Build the rotated Bell template: `H(q0)`, `CX(q0, q1)`, `Ry(theta)` on q0.
    ///
    /// With `with_measurement`, two classical bits are allocated and
    /// `measure q0 -> c0`, `measure q1 -> c1` are appended. `theta` is not
    /// validated.
    pub fn rotated_bell(theta: f64, with_measurement: bool) -> IrResult<Self> {
        let q0 = QubitId(0);
        let q1 = QubitId(1);

        let mut circuit = if with_measurement {
            Self::with_clbits("rotated_bell", NUM_QUBITS)
        } else {
            Self::new("rotated_bell")
        };

        circuit.h(q0)?.cx(q0, q1)?.ry(theta, q0)?;

        if with_measurement {
            circuit
                .measure(q0, ClbitId(0))?
                .measure(q1, ClbitId(1))?;
        }

        Ok(circuit)
    }

    // =========================================================================
    // Gates
    // =========================================================================

    /// Apply Hadamard gate.
    pub fn h(&mut self, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(StandardGate::H, qubit))
    }

    /// Apply CNOT (CX) gate.
    pub fn cx(&mut self, control: QubitId, target: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::two_qubit_gate(
            StandardGate::CX,
            control,
            target,
        ))
    }

    /// Apply Ry rotation gate.
    pub fn ry(&mut self, theta: f64, qubit: QubitId) -> IrResult<&mut Self> {
        self.push(Instruction::single_qubit_gate(
            StandardGate::Ry(theta),
            qubit,
        ))
    }

    /// Measure a qubit to a classical bit.
    pub fn measure(&mut self, qubit: QubitId, clbit: ClbitId) -> IrResult<&mut Self> {
        self.push(Instruction::measure(qubit, clbit))
    }

    /// Validate an instruction's operands and append it.
    pub fn push(&mut self, instruction: Instruction) -> IrResult<&mut Self> {
        self.validate(&instruction)?;
        self.instructions.push(instruction);
        Ok(self)
    }

    fn validate(&self, instruction: &Instruction) -> IrResult<()> {
        let name = instruction.name();

        let expected = match &instruction.kind {
            InstructionKind::Gate(gate) => gate.num_qubits(),
            InstructionKind::Measure => 1,
        };
        let got = instruction.qubits.len() as u32;
        if got != expected {
            return Err(IrError::QubitCountMismatch {
                gate_name: name.to_string(),
                expected,
                got,
            });
        }

        for (i, &qubit) in instruction.qubits.iter().enumerate() {
            if qubit.0 >= NUM_QUBITS {
                return Err(IrError::QubitNotFound {
                    qubit,
                    gate_name: Some(name.to_string()),
                });
            }
            if instruction.qubits[..i].contains(&qubit) {
                return Err(IrError::DuplicateQubit {
                    qubit,
                    gate_name: Some(name.to_string()),
                });
            }
        }

        for &clbit in &instruction.clbits {
            if clbit.0 >= self.num_clbits {
                return Err(IrError::ClbitNotFound {
                    clbit,
                    gate_name: Some(name.to_string()),
                });
            }
        }

        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get the circuit name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of qubits (always [`NUM_QUBITS`]).
    pub fn num_qubits(&self) -> usize {
        NUM_QUBITS as usize
    }

    /// Get the number of classical bits.
    pub fn num_clbits(&self) -> usize {
        self.num_clbits as usize
    }

    /// Number of instructions, measurements included.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Check if the circuit has no instructions.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Instructions in application order.
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Check if any instruction is a measurement.
    pub fn has_measurements(&self) -> bool {
        self.instructions.iter().any(Instruction::is_measure)
    }

    /// `(qubit, clbit)` pairs written by measurement instructions, in order.
    pub fn measurement_map(&self) -> Vec<(QubitId, ClbitId)> {
        self.instructions
            .iter()
            .filter(|inst| inst.is_measure())
            .flat_map(|inst| inst.qubits.iter().copied().zip(inst.clbits.iter().copied()))
            .collect()
    }

    /// Count instructions by name.
    pub fn count_ops(&self) -> FxHashMap<&'static str, usize> {
        let mut counts = FxHashMap::default();
        for inst in &self.instructions {
            *counts.entry(inst.name()).or_insert(0) += 1;
        }
        counts
    }

    /// Get the circuit depth.
    ///
    /// Each instruction sits one layer after the latest instruction on any
    /// qubit or classical bit it touches.
    pub fn depth(&self) -> usize {
        let mut qubit_depth = vec![0usize; self.num_qubits()];
        let mut clbit_depth = vec![0usize; self.num_clbits()];
        let mut max_depth = 0;

        for inst in &self.instructions {
            let q_max = inst
                .qubits
                .iter()
                .map(|q| qubit_depth[q.0 as usize])
                .max()
                .unwrap_or(0);
            let c_max = inst
                .clbits
                .iter()
                .map(|c| clbit_depth[c.0 as usize])
                .max()
                .unwrap_or(0);
            let layer = q_max.max(c_max) + 1;

            for q in &inst.qubits {
                qubit_depth[q.0 as usize] = layer;
            }
            for c in &inst.clbits {
                clbit_depth[c.0 as usize] = layer;
            }
            max_depth = max_depth.max(layer);
        }

        max_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_new_circuit() {
        let circuit = Circuit::new("test");
        assert_eq!(circuit.name(), "test");
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.num_clbits(), 0);
        assert!(circuit.is_empty());
        assert_eq!(circuit.depth(), 0);
    }

    #[test]
    fn test_template_with_measurement() {
        let circuit = Circuit::rotated_bell(PI / 4.0, true).unwrap();
        assert_eq!(circuit.len(), 5);
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.num_clbits(), 2);
        assert_eq!(circuit.depth(), 4); // H, CX, Ry, measure q0
        assert!(circuit.has_measurements());
    }

    #[test]
    fn test_template_without_measurement() {
        let circuit = Circuit::rotated_bell(PI / 4.0, false).unwrap();
        assert_eq!(circuit.len(), 3);
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.num_clbits(), 0);
        assert_eq!(circuit.depth(), 3);
        assert!(!circuit.has_measurements());
    }

    #[test]
    fn test_template_order() {
        let circuit = Circuit::rotated_bell(-0.3, true).unwrap();
        let inst = circuit.instructions();

        assert_eq!(inst[0].as_gate(), Some(&StandardGate::H));
        assert_eq!(inst[0].qubits, vec![QubitId(0)]);
        assert_eq!(inst[1].as_gate(), Some(&StandardGate::CX));
        assert_eq!(inst[1].qubits, vec![QubitId(0), QubitId(1)]);
        assert_eq!(inst[2].as_gate(), Some(&StandardGate::Ry(-0.3)));
        assert_eq!(inst[2].qubits, vec![QubitId(0)]);
        assert_eq!(
            circuit.measurement_map(),
            vec![(QubitId(0), ClbitId(0)), (QubitId(1), ClbitId(1))]
        );
    }

    #[test]
    fn test_template_accepts_any_angle() {
        for theta in [0.0, -PI, 7.5 * PI, 1e9] {
            let circuit = Circuit::rotated_bell(theta, false).unwrap();
            let ry = circuit.instructions()[2].as_gate().and_then(StandardGate::angle);
            assert_eq!(ry, Some(theta));
        }
    }

    #[test]
    fn test_count_ops() {
        let circuit = Circuit::rotated_bell(PI / 2.0, true).unwrap();
        let ops = circuit.count_ops();
        assert_eq!(ops.get("h"), Some(&1));
        assert_eq!(ops.get("cx"), Some(&1));
        assert_eq!(ops.get("ry"), Some(&1));
        assert_eq!(ops.get("measure"), Some(&2));
    }

    #[test]
    fn test_qubit_out_of_range() {
        let mut circuit = Circuit::new("test");
        let err = circuit.h(QubitId(2)).unwrap_err();
        assert!(matches!(err, IrError::QubitNotFound { qubit: QubitId(2), .. }));
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_clbit_out_of_range() {
        let mut circuit = Circuit::new("test");
        let err = circuit.measure(QubitId(0), ClbitId(0)).unwrap_err();
        assert!(matches!(err, IrError::ClbitNotFound { clbit: ClbitId(0), .. }));
    }

    #[test]
    fn test_duplicate_qubit() {
        let mut circuit = Circuit::new("test");
        let err = circuit.cx(QubitId(1), QubitId(1)).unwrap_err();
        assert!(matches!(err, IrError::DuplicateQubit { qubit: QubitId(1), .. }));
    }

    #[test]
    fn test_qubit_count_mismatch() {
        let mut circuit = Circuit::new("test");
        let err = circuit
            .push(Instruction::single_qubit_gate(StandardGate::CX, QubitId(0)))
            .unwrap_err();
        assert!(matches!(
            err,
            IrError::QubitCountMismatch {
                expected: 2,
                got: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_fluent_api() {
        let mut circuit = Circuit::with_clbits("test", 2);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(1))
            .unwrap()
            .measure(QubitId(0), ClbitId(0))
            .unwrap()
            .measure(QubitId(1), ClbitId(1))
            .unwrap();

        assert_eq!(circuit.depth(), 3); // H, CX, parallel measures
    }

    #[test]
    fn test_serialize_template() {
        let circuit = Circuit::rotated_bell(0.5, true).unwrap();
        let json = serde_json::to_string(&circuit).unwrap();
        let back: Circuit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, circuit);
    }

    #[test]
    fn test_deserialize_rejects_unknown_clbit() {
        let json = r#"{"name":"x","num_clbits":0,"instructions":[
            {"kind":"Measure","qubits":[0],"clbits":[0]}]}"#;
        let err = serde_json::from_str::<Circuit>(json).unwrap_err();
        assert!(err.to_string().contains("Classical bit c0 not found"));
    }

    #[test]
    fn test_deserialize_rejects_bad_qubits() {
        let out_of_range = r#"{"name":"x","num_clbits":0,"instructions":[
            {"kind":{"Gate":"H"},"qubits":[64],"clbits":[]}]}"#;
        assert!(serde_json::from_str::<Circuit>(out_of_range).is_err());

        let duplicate = r#"{"name":"x","num_clbits":0,"instructions":[
            {"kind":{"Gate":"CX"},"qubits":[1,1],"clbits":[]}]}"#;
        assert!(serde_json::from_str::<Circuit>(duplicate).is_err());
    }
}
