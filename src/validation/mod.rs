//! Specification validation.

mod validate;

pub use validate::{ensure_valid, validate_spec, ValidationResult};
