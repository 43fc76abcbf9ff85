//! Dense unitary construction for the two-qubit register.
//!
//! Single-qubit gates are tensor-expanded with identity on the other qubit.
//! Qubit 0 is the low bit of a basis index, so it is the right-hand Kronecker
//! factor: `I ⊗ U` acts on qubit 0 and `U ⊗ I` on qubit 1.

use ndarray::{Array2, arr2, linalg::kron};
use num_complex::Complex64;

use qbell_ir::{NUM_QUBITS, QubitId, StandardGate};

use crate::error::{SimError, SimResult};

/// Dimension of the register's state space.
pub const DIM: usize = 1 << NUM_QUBITS;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// Hadamard: (1/√2)[[1, 1], [1, -1]].
pub fn hadamard() -> Array2<Complex64> {
    let s = Complex64::new(1.0 / 2.0_f64.sqrt(), 0.0);
    arr2(&[[s, s], [s, -s]])
}

/// Y rotation: [[cos θ/2, -sin θ/2], [sin θ/2, cos θ/2]].
pub fn ry(theta: f64) -> Array2<Complex64> {
    let c = Complex64::new((theta / 2.0).cos(), 0.0);
    let s = Complex64::new((theta / 2.0).sin(), 0.0);
    arr2(&[[c, -s], [s, c]])
}

/// Embed a 2×2 single-qubit operator into the 4×4 register space.
pub fn embed_single(u: &Array2<Complex64>, qubit: QubitId) -> Array2<Complex64> {
    let identity = Array2::<Complex64>::eye(2);
    match qubit.0 {
        0 => kron(&identity, u),
        _ => kron(u, &identity),
    }
}

/// CNOT as a permutation matrix: swaps the basis states that differ in the
/// target bit wherever the control bit is set.
pub fn controlled_x(control: QubitId, target: QubitId) -> Array2<Complex64> {
    let mut m = Array2::from_elem((DIM, DIM), ZERO);
    for col in 0..DIM {
        let row = if col & control.mask() != 0 {
            col ^ target.mask()
        } else {
            col
        };
        m[[row, col]] = ONE;
    }
    m
}

/// Build the full 4×4 unitary for a gate applied to the given qubits.
pub fn gate_unitary(gate: &StandardGate, qubits: &[QubitId]) -> SimResult<Array2<Complex64>> {
    let expected = gate.num_qubits() as usize;
    if qubits.len() != expected {
        return Err(SimError::InvalidArgument(format!(
            "gate '{}' expects {expected} qubit(s), got {}",
            gate.name(),
            qubits.len()
        )));
    }
    for (i, qubit) in qubits.iter().enumerate() {
        if qubit.0 >= NUM_QUBITS || qubits[..i].contains(qubit) {
            return Err(SimError::InvalidArgument(format!(
                "gate '{}' has invalid operand {qubit}",
                gate.name()
            )));
        }
    }

    Ok(match gate {
        StandardGate::H => embed_single(&hadamard(), qubits[0]),
        StandardGate::Ry(theta) => embed_single(&ry(*theta), qubits[0]),
        StandardGate::CX => controlled_x(qubits[0], qubits[1]),
    })
}

/// Check `U† U = I` within `tol` on every element.
pub fn is_unitary(u: &Array2<Complex64>, tol: f64) -> bool {
    if !u.is_square() {
        return false;
    }
    let adjoint = u.t().mapv(|z| z.conj());
    let product = adjoint.dot(u);
    let identity = Array2::<Complex64>::eye(u.nrows());
    product
        .iter()
        .zip(identity.iter())
        .all(|(a, b)| (a - b).norm() <= tol)
}
