//! Input validation for the stair estimator.
//!
//! The engine assumes validated, numeric, non-negative inputs; everything
//! that can reach the caller as an explicit failure is rejected here.

use crate::error::{EstimateError, Result};
use crate::model::StairSpecification;

/// Validation result with warnings.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Whether validation passed.
    pub passed: bool,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Error messages.
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Create a passing result.
    pub fn ok() -> Self {
        Self {
            passed: true,
            ..Default::default()
        }
    }

    /// Add a warning.
    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Add an error.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
        self.passed = false;
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.warnings.extend(other.warnings);
        self.errors.extend(other.errors);
        if !other.passed {
            self.passed = false;
        }
    }
}

/// Validate a specification, collecting all errors and warnings.
pub fn validate_spec(spec: &StairSpecification) -> ValidationResult {
    let mut result = ValidationResult::ok();

    for (name, value) in [
        ("total_height", spec.total_height),
        ("total_width", spec.total_width),
        ("step_tread", spec.step_tread),
        ("step_height", spec.step_height),
        ("slab.a", spec.slab.a),
        ("slab.b", spec.slab.b),
    ] {
        if !value.is_finite() || value <= 0.0 {
            result.add_error(format!("'{name}' must be positive, got {value}"));
        }
    }

    for (name, value) in [
        ("gap_between_slabs_mm", spec.gap_between_slabs_mm),
        ("adhesive_thickness", spec.adhesive_thickness),
        ("overhangs.front", spec.overhangs.front),
        ("overhangs.side", spec.overhangs.side),
        ("slab_thickness.top", spec.slab_thickness.top),
        ("slab_thickness.side", spec.slab_thickness.side),
        ("slab_thickness.front", spec.slab_thickness.front),
    ] {
        if !value.is_finite() || value < 0.0 {
            result.add_error(format!("'{name}' must be zero or positive, got {value}"));
        }
    }

    if spec.unit_materials.is_empty() {
        result.add_error("no unit materials selected");
    }
    for unit in &spec.unit_materials {
        if unit.course_height() <= 0.0 {
            result.add_error(format!(
                "unit material '{}' has non-positive course height",
                unit.id()
            ));
        }
    }

    if result.passed {
        if spec.step_count() > 30 {
            result.add_warning(format!(
                "staircase derives {} steps; check total and step heights",
                spec.step_count()
            ));
        }
        if spec.gap_between_slabs_mm > 20.0 {
            result.add_warning(format!(
                "gap between slabs of {} mm is unusually wide",
                spec.gap_between_slabs_mm
            ));
        }
        if let Some(unit) = spec.primary_material() {
            if unit.course_height() > spec.actual_rise() + crate::config::MAX_BURIAL_CM {
                result.add_warning(format!(
                    "unit '{}' is much taller than the step rise; expect cutting",
                    unit.id()
                ));
            }
        }
    }

    result
}

/// Validate and convert the first error into an `EstimateError`.
pub fn ensure_valid(spec: &StairSpecification) -> Result<()> {
    if spec.unit_materials.is_empty() {
        return Err(EstimateError::NoUnitMaterials);
    }
    for unit in &spec.unit_materials {
        if unit.course_height() <= 0.0 {
            return Err(EstimateError::InvalidUnitMaterial {
                id: unit.id().to_string(),
                height: unit.course_height(),
            });
        }
    }
    for (field, value) in [
        ("total_height", spec.total_height),
        ("total_width", spec.total_width),
        ("step_tread", spec.step_tread),
        ("step_height", spec.step_height),
        ("slab.a", spec.slab.a),
        ("slab.b", spec.slab.b),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(EstimateError::InvalidDimension { field, value });
        }
    }
    for (field, value) in [
        ("gap_between_slabs_mm", spec.gap_between_slabs_mm),
        ("adhesive_thickness", spec.adhesive_thickness),
        ("overhangs.front", spec.overhangs.front),
        ("overhangs.side", spec.overhangs.side),
        ("slab_thickness.top", spec.slab_thickness.top),
        ("slab_thickness.side", spec.slab_thickness.side),
        ("slab_thickness.front", spec.slab_thickness.front),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(EstimateError::NegativeParameter { field, value });
        }
    }
    if spec.step_count() == 0 {
        return Err(EstimateError::NoSteps {
            total_height: spec.total_height,
            step_height: spec.step_height,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{SlabSize, SlabThicknesses, UnitLibrary};
    use pretty_assertions::assert_eq;

    fn spec() -> StairSpecification {
        StairSpecification {
            total_height: 90.0,
            total_width: 120.0,
            step_tread: 30.0,
            step_height: 18.0,
            slab_thickness: SlabThicknesses {
                top: 2.0,
                side: 2.0,
                front: 2.0,
            },
            overhangs: Default::default(),
            build_sides: Default::default(),
            step_configuration: Default::default(),
            gap_between_slabs_mm: 2.0,
            unit_materials: vec![UnitLibrary::block_21()],
            cutting_mode: Default::default(),
            slab: SlabSize::new(90.0, 60.0),
            placement: Default::default(),
            adhesive_thickness: 0.5,
        }
    }

    #[test]
    fn test_valid_spec_passes() {
        let result = validate_spec(&spec());
        assert!(result.passed, "errors: {:?}", result.errors);
        assert!(ensure_valid(&spec()).is_ok());
    }

    #[test]
    fn test_zero_height_rejected() {
        let mut s = spec();
        s.total_height = 0.0;
        let result = validate_spec(&s);
        assert!(!result.passed);
        assert!(ensure_valid(&s).is_err());
    }

    #[test]
    fn test_negative_gap_rejected() {
        let mut s = spec();
        s.gap_between_slabs_mm = -1.0;
        assert!(!validate_spec(&s).passed);
        let err = ensure_valid(&s).unwrap_err();
        assert_eq!(err.code_value(), -4);
    }

    #[test]
    fn test_empty_materials_rejected() {
        let mut s = spec();
        s.unit_materials.clear();
        assert!(!validate_spec(&s).passed);
        assert!(matches!(
            ensure_valid(&s),
            Err(crate::error::EstimateError::NoUnitMaterials)
        ));
    }

    #[test]
    fn test_nan_rejected() {
        let mut s = spec();
        s.total_width = f64::NAN;
        assert!(!validate_spec(&s).passed);
        assert!(ensure_valid(&s).is_err());
    }

    #[test]
    fn test_many_steps_warns() {
        let mut s = spec();
        s.total_height = 600.0;
        let result = validate_spec(&s);
        assert!(result.passed);
        assert!(!result.warnings.is_empty());
    }

    #[test]
    fn test_merge() {
        let mut a = ValidationResult::ok();
        let mut b = ValidationResult::ok();
        b.add_error("boom");
        a.merge(b);
        assert!(!a.passed);
        assert_eq!(a.errors.len(), 1);
    }
}
