//! stair-estimate - Materials and labor estimator for masonry staircases
//! clad in slabs.
//!
//! Given a staircase's overall rise/run and a catalogue of unit materials,
//! the engine decides per step how many masonry courses of which unit meet
//! the step height within the mortar-joint tolerance, and per step surface
//! how many cladding slabs to buy versus cut from earlier offcuts.
//!
//! # Example
//!
//! ```no_run
//! use stair_estimate::{estimate_staircase, TaskCatalogue};
//!
//! let json = std::fs::read_to_string("staircase.json").unwrap();
//! let spec = serde_json::from_str(&json).unwrap();
//! let estimate = estimate_staircase(&spec, &TaskCatalogue::default()).unwrap();
//! println!("{} new slabs", estimate.totals.total_new_slabs);
//! ```

pub mod aggregate;
pub mod compose;
pub mod config;
pub mod cutting;
pub mod engine;
pub mod error;
pub mod model;
pub mod report;
pub mod tasks;
pub mod validation;

// Re-exports for convenience
pub use aggregate::{QuantityTotals, SlabHistogram};
pub use engine::{estimate_staircase, StairEstimate};
pub use error::{EstimateError, Result};
pub use model::{StairSpecification, Step, UnitLibrary, UnitMaterial, WastePiece};
pub use tasks::{match_tasks, DurationTemplate, TaskCatalogue};
pub use validation::{ensure_valid, validate_spec, ValidationResult};
