//! Per-step computation results: course configurations and surface cut plans.

use serde::{Deserialize, Serialize};

use crate::config::{float_cmp, DEFAULT_JOINT_CM, MAX_BURIAL_CM, MAX_JOINT_CM, MIN_JOINT_CM};

/// Which cladding surface of a step a plan refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceKind {
    /// Horizontal top surface.
    Tread,
    /// Vertical front surface.
    Riser,
}

impl std::fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurfaceKind::Tread => write!(f, "tread"),
            SurfaceKind::Riser => write!(f, "riser"),
        }
    }
}

/// Resolution state of a step's course search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseState {
    /// Joint thickness tuned within the tolerance band, nothing buried.
    JointFit,
    /// First course buried to absorb an oversized stack, nominal joints.
    Buried,
    /// No configuration fits; units must be cut to height.
    ForcedCut,
}

/// Masonry course configuration for one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseConfiguration {
    /// 1-based step index.
    pub step_index: u32,
    /// Selected unit material id.
    pub unit_id: String,
    /// Number of courses stacked for this step.
    pub block_count: u32,
    /// Mortar joint thickness between courses, in cm.
    pub joint_thickness: f64,
    /// Whether the stack must be cut to reach the target height.
    pub needs_cutting: bool,
    /// Depth the first course is buried into the ground, in cm.
    pub buried_depth: f64,
}

impl CourseConfiguration {
    /// Classify the configuration. Exactly one state applies.
    pub fn state(&self) -> CourseState {
        if self.needs_cutting {
            CourseState::ForcedCut
        } else if self.buried_depth > 0.0 {
            CourseState::Buried
        } else {
            CourseState::JointFit
        }
    }

    /// Whether the configuration satisfies the tolerance rules for its state.
    pub fn is_consistent(&self) -> bool {
        match self.state() {
            CourseState::JointFit => {
                float_cmp::in_range(self.joint_thickness, MIN_JOINT_CM, MAX_JOINT_CM)
                    && self.buried_depth == 0.0
            }
            CourseState::Buried => {
                self.buried_depth > 0.0
                    && self.buried_depth <= MAX_BURIAL_CM + crate::config::EPS
                    && float_cmp::approx_eq(self.joint_thickness, DEFAULT_JOINT_CM)
            }
            CourseState::ForcedCut => self.buried_depth == 0.0,
        }
    }
}

/// A slab piece placed on a surface, for the dimension histogram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacedPiece {
    /// Piece width across the step, in cm.
    pub width: f64,
    /// Piece length along the surface depth, in cm.
    pub length: f64,
}

/// Outcome of planning one step surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceCutResult {
    /// 1-based step index.
    pub step_index: u32,
    /// Which surface was planned.
    pub surface: SurfaceKind,
    /// Required width across the step, in cm.
    pub required_width: f64,
    /// Required depth along the surface, in cm.
    pub required_depth: f64,
    /// New slabs to purchase (excludes reused offcuts).
    pub new_slabs: u32,
    /// Saw operations charged to this surface.
    pub cuts: u32,
    /// Source label of the reused offcut(s), if any.
    pub waste_used: Option<String>,
    /// Human-readable decomposition, diagnostic only — never parsed back.
    pub description: String,
    /// Pieces placed on this surface, for the dimension histogram.
    pub pieces: Vec<PlacedPiece>,
    /// Covered area in cm², for adhesive computation.
    pub area_cm2: f64,
}

impl SurfaceCutResult {
    /// Whether this surface was served entirely from the offcut inventory.
    pub fn served_from_waste(&self) -> bool {
        self.waste_used.is_some() && self.new_slabs == 0
    }
}
