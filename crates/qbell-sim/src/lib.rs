//! Two-qubit statevector engine.
//!
//! Evolves the rotated Bell template (`H`, `CX`, `Ry(θ)`) by explicit 4×4
//! unitary matrices and samples measurement outcomes from the resulting
//! probability distribution.
//!
//! A run is two independent passes: the measured variant is sampled into a
//! [`Counts`] histogram, and the unmeasured variant yields the exact final
//! [`Statevector`].
//!
//! # Quick start
//!
//! ```rust
//! use qbell_sim::run_simulation;
//! use std::f64::consts::PI;
//!
//! let (counts, statevector) = run_simulation(PI / 4.0, 1024).unwrap();
//! assert_eq!(counts.total_shots(), 1024);
//! assert_eq!(statevector.len(), 4);
//! ```
//!
//! # Reproducible sampling
//!
//! ```rust
//! use qbell_sim::Simulator;
//!
//! let sim = Simulator::with_seed(42);
//! let a = sim.run(0.0, 512).unwrap();
//! let b = sim.run(0.0, 512).unwrap();
//! assert_eq!(a.counts, b.counts);
//! ```
//!
//! # Bitstring order
//!
//! Counts keys list the highest classical bit first. The template measures
//! q0 into c0 and q1 into c1, so `"01"` means qubit 1 read 0 and qubit 0
//! read 1.

/// Version of this crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod counts;
pub mod error;
pub mod simulator;
pub mod statevector;
pub mod unitary;

pub use config::{Config, ConfigError, LoggingConfig, SimulationConfig};
pub use counts::Counts;
pub use error::{SimError, SimResult};
pub use simulator::{SimulationOutput, SimulationResult, Simulator, run_simulation};
pub use statevector::Statevector;
