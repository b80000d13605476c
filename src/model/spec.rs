//! Staircase specification: the immutable input to the estimator.

use serde::{Deserialize, Serialize};

use crate::config::CONV_MM_CM;
use crate::model::unit::UnitMaterial;

/// How riser fronts relate to tread tops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepConfiguration {
    /// Riser slabs run up behind the treads; treads overhang the fronts.
    #[default]
    FrontsOnTop,
    /// Treads butt into the riser fronts.
    StepsToFronts,
}

/// Cutting strategy when a surface needs a partial slab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CuttingMode {
    /// One slab is cut to the remainder width.
    #[default]
    OneCut,
    /// The remainder is split symmetrically across two cut slabs.
    TwoCuts,
}

/// Which slab dimension runs across the step width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlabPlacement {
    /// The larger slab dimension runs across the width.
    #[default]
    LongWay,
    /// The smaller slab dimension runs across the width.
    SideWays,
}

/// Nominal slab dimensions in cm, orientation-free.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlabSize {
    pub a: f64,
    pub b: f64,
}

impl SlabSize {
    pub fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    /// Slab footprint as (width, length) under the given placement.
    pub fn footprint(&self, placement: SlabPlacement) -> (f64, f64) {
        let larger = self.a.max(self.b);
        let smaller = self.a.min(self.b);
        match placement {
            SlabPlacement::LongWay => (larger, smaller),
            SlabPlacement::SideWays => (smaller, larger),
        }
    }
}

/// Slab thicknesses per cladding surface, in cm.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SlabThicknesses {
    pub top: f64,
    pub side: f64,
    pub front: f64,
}

/// Slab overhangs beyond the masonry, in cm.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Overhangs {
    pub front: f64,
    pub side: f64,
}

/// Which sides of the staircase get built/clad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSides {
    pub left: bool,
    pub right: bool,
    pub back: bool,
}

impl Default for BuildSides {
    fn default() -> Self {
        Self {
            left: true,
            right: true,
            back: false,
        }
    }
}

impl BuildSides {
    /// Number of open sides carrying a side overhang.
    pub fn overhang_sides(&self) -> u32 {
        u32::from(!self.left) + u32::from(!self.right)
    }
}

/// Immutable input describing the staircase to estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StairSpecification {
    /// Overall rise from ground to the finished top, in cm.
    pub total_height: f64,
    /// Overall staircase width, in cm.
    pub total_width: f64,
    /// Nominal tread depth per step, in cm.
    pub step_tread: f64,
    /// Nominal rise per step, in cm.
    pub step_height: f64,
    /// Slab thicknesses per surface.
    #[serde(default)]
    pub slab_thickness: SlabThicknesses,
    /// Slab overhangs beyond the masonry.
    #[serde(default)]
    pub overhangs: Overhangs,
    /// Which sides get built.
    #[serde(default)]
    pub build_sides: BuildSides,
    /// Riser/tread relationship.
    #[serde(default)]
    pub step_configuration: StepConfiguration,
    /// Gap between adjacent slabs, in mm.
    #[serde(default)]
    pub gap_between_slabs_mm: f64,
    /// Candidate course-unit materials, first = highest priority.
    pub unit_materials: Vec<UnitMaterial>,
    /// Cutting strategy for partial slabs.
    #[serde(default)]
    pub cutting_mode: CuttingMode,
    /// Nominal slab size.
    pub slab: SlabSize,
    /// Slab orientation across the step width.
    #[serde(default)]
    pub placement: SlabPlacement,
    /// Adhesive thickness under the slabs, in cm.
    #[serde(default)]
    pub adhesive_thickness: f64,
}

impl StairSpecification {
    /// Gap between slabs in cm.
    pub fn gap_cm(&self) -> f64 {
        self.gap_between_slabs_mm / CONV_MM_CM
    }

    /// Slab footprint as (width, length) under the selected placement.
    pub fn slab_footprint(&self) -> (f64, f64) {
        self.slab.footprint(self.placement)
    }

    /// Number of equal steps derived from the overall rise.
    pub fn step_count(&self) -> u32 {
        if self.step_height <= 0.0 || self.total_height <= 0.0 {
            return 0;
        }
        ((self.total_height / self.step_height).round() as u32).max(1)
    }

    /// Actual rise per step after equalizing across the derived count.
    pub fn actual_rise(&self) -> f64 {
        let count = self.step_count();
        if count == 0 {
            0.0
        } else {
            self.total_height / count as f64
        }
    }

    /// Highest-priority unit material, if any.
    pub fn primary_material(&self) -> Option<&UnitMaterial> {
        self.unit_materials.first()
    }
}
