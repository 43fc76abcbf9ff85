//! qbell Circuit Representation
//!
//! This crate provides the circuit data structures consumed by the qbell
//! statevector engine. The register is fixed at two qubits and the gate set
//! is limited to Hadamard, CNOT and Y-rotation, which is exactly what the
//! rotated Bell template needs.
//!
//! # Core Components
//!
//! - **Qubits and Classical Bits**: [`QubitId`], [`ClbitId`]
//! - **Gates**: [`StandardGate`] (H, CX, Ry)
//! - **Instructions**: [`Instruction`] combining a gate or measurement with its operands
//! - **Circuit**: [`Circuit`] fluent builder over the fixed register
//!
//! # Example: The Rotated Bell Template
//!
//! ```rust
//! use qbell_ir::Circuit;
//! use std::f64::consts::PI;
//!
//! let measured = Circuit::rotated_bell(PI / 4.0, true).unwrap();
//! assert_eq!(measured.len(), 5);
//! assert_eq!(measured.num_clbits(), 2);
//! assert_eq!(measured.depth(), 4);
//!
//! let unmeasured = Circuit::rotated_bell(PI / 4.0, false).unwrap();
//! assert_eq!(unmeasured.len(), 3);
//! assert_eq!(unmeasured.num_clbits(), 0);
//! ```
//!
//! # Example: Building by Hand
//!
//! ```rust
//! use qbell_ir::{Circuit, ClbitId, QubitId};
//!
//! let mut circuit = Circuit::with_clbits("bell", 2);
//! circuit
//!     .h(QubitId(0))?
//!     .cx(QubitId(0), QubitId(1))?
//!     .measure(QubitId(0), ClbitId(0))?
//!     .measure(QubitId(1), ClbitId(1))?;
//!
//! assert!(circuit.has_measurements());
//! # Ok::<(), qbell_ir::IrError>(())
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `H` | 1 | Hadamard gate |
//! | `CX` | 2 | Controlled-NOT (CNOT) |
//! | `Ry` | 1 | Rotation around the Y axis |

/// Version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod qubit;

pub use circuit::{Circuit, NUM_QUBITS};
pub use error::{IrError, IrResult};
pub use gate::StandardGate;
pub use instruction::{Instruction, InstructionKind};
pub use qubit::{ClbitId, QubitId};
