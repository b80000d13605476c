//! Tolerance constants and settings for the estimator.

/// Floating-point comparison epsilon.
pub const EPS: f64 = 0.0001;

/// Default mortar joint thickness between stacked units, in cm.
pub const DEFAULT_JOINT_CM: f64 = 1.0;

/// Mortar bed under the first course of a step, in cm.
/// Not charged for buried courses, which sit directly on the ground.
pub const BOTTOM_BED_CM: f64 = 2.0;

/// Minimum acceptable mortar joint thickness, in cm.
pub const MIN_JOINT_CM: f64 = 0.5;

/// Maximum acceptable mortar joint thickness, in cm.
pub const MAX_JOINT_CM: f64 = 3.0;

/// Maximum depth a course may be buried into the ground, in cm.
pub const MAX_BURIAL_CM: f64 = 8.0;

/// Candidate uniform burial depths tried for the whole staircase, in cm.
pub const UNIFORM_BURIAL_RANGE_CM: std::ops::RangeInclusive<u32> = 2..=8;

/// Tolerance when matching a step's burial against the uniform depth, in cm.
pub const UNIFORM_BURIAL_TOL_CM: f64 = 0.05;

/// A dimension counts as cut iff it misses the requirement by more than this, in cm.
pub const CUT_THRESHOLD_CM: f64 = 0.1;

/// Offcuts with any dimension at or below this are discarded as slivers, in cm.
pub const MIN_OFFCUT_DIM_CM: f64 = 0.1;

/// Pieces in the inventory are usable only if both dimensions exceed this, in cm.
pub const MIN_USABLE_DIM_CM: f64 = 1.0;

/// Adhesive coverage: kg per square meter per cm of adhesive thickness.
pub const ADHESIVE_KG_PER_M2_PER_CM: f64 = 12.0;

/// Adhesive bag size in kg.
pub const ADHESIVE_BAG_KG: f64 = 20.0;

/// Conversion factor: mm to cm.
pub const CONV_MM_CM: f64 = 10.0;

/// Conversion factor: cm² to m².
pub const CONV_CM2_M2: f64 = 10_000.0;

/// Utility functions for floating-point comparisons.
pub mod float_cmp {
    use super::EPS;

    /// Check if two floats are approximately equal.
    #[inline]
    pub fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    /// Check if a float is approximately zero.
    #[inline]
    pub fn approx_zero(a: f64) -> bool {
        a.abs() < EPS
    }

    /// Check if a is in range [min, max] with epsilon tolerance.
    #[inline]
    pub fn in_range(a: f64, min: f64, max: f64) -> bool {
        a >= min - EPS && a <= max + EPS
    }
}

/// Round a dimension to whole centimeters for histogram keys.
#[inline]
pub fn round_cm(v: f64) -> u32 {
    if v <= 0.0 {
        0
    } else {
        v.round() as u32
    }
}
