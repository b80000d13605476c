//! Estimation pipeline: steps -> courses -> surface plans -> totals -> tasks.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::{QuantityAggregator, QuantityTotals};
use crate::compose::compose_courses;
use crate::cutting::{plan_surface, OffcutInventory};
use crate::error::Result;
use crate::model::{
    CourseConfiguration, StairSpecification, Step, StepConfiguration, SurfaceCutResult,
    SurfaceKind,
};
use crate::tasks::{match_tasks, TaskBreakdown, TaskCatalogue};
use crate::validation::ensure_valid;

/// Complete estimator output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StairEstimate {
    /// Derived step geometry.
    pub steps: Vec<Step>,
    /// Course configuration per step.
    pub courses: Vec<CourseConfiguration>,
    /// Cut plan per step surface, in planning order.
    pub surfaces: Vec<SurfaceCutResult>,
    /// Accumulated quantities.
    pub totals: QuantityTotals,
    /// Matched labor durations.
    pub task_breakdown: Vec<TaskBreakdown>,
}

/// Estimate materials and labor for one staircase.
///
/// Validates the specification, then runs the full pipeline against a fresh
/// offcut inventory. Deterministic: identical inputs yield identical
/// estimates. Parallel runs over separate specifications must each call this
/// function; the inventory is never shared.
pub fn estimate_staircase(
    spec: &StairSpecification,
    catalogue: &TaskCatalogue,
) -> Result<StairEstimate> {
    ensure_valid(spec)?;

    let steps = Step::derive(spec);
    let courses = compose_courses(spec, &steps);

    let mut inventory = OffcutInventory::new();
    let mut surfaces = Vec::with_capacity(steps.len() * 2);
    let mut aggregator = QuantityAggregator::new();

    let mut previous: Option<&Step> = None;
    for step in &steps {
        let label = step.label();

        // Tread first, then riser; the order decides offcut availability.
        let tread = plan_surface(
            SurfaceKind::Tread,
            step.index,
            &label,
            spec.total_width,
            step.tread_depth,
            spec,
            &mut inventory,
        );
        aggregator.add_surface(&tread);
        surfaces.push(tread);

        let riser = plan_surface(
            SurfaceKind::Riser,
            step.index,
            &label,
            spec.total_width,
            riser_depth(spec, step, previous),
            spec,
            &mut inventory,
        );
        aggregator.add_surface(&riser);
        surfaces.push(riser);

        previous = Some(step);
    }

    for config in &courses {
        let units_per_course = spec
            .unit_materials
            .iter()
            .find(|u| u.id() == config.unit_id)
            .map(|u| u.units_per_course(spec.total_width))
            .unwrap_or(1);
        aggregator.add_courses(config, units_per_course);
    }

    let totals = aggregator.finish(spec);
    let task_breakdown = match_tasks(&totals.histogram, catalogue);

    debug!(
        steps = steps.len(),
        new_slabs = totals.total_new_slabs,
        cuts = totals.total_cuts,
        leftover_offcuts = inventory.len(),
        "estimate complete"
    );

    Ok(StairEstimate {
        steps,
        courses,
        surfaces,
        totals,
        task_breakdown,
    })
}

/// Riser height for a step: the rise relative to the previous step, reduced
/// by the top slab thickness when treads sit on top of the fronts (and the
/// step is not the first, whose riser starts at the ground).
fn riser_depth(spec: &StairSpecification, step: &Step, previous: Option<&Step>) -> f64 {
    let mut depth = step.rise_from(previous);
    if spec.step_configuration == StepConfiguration::FrontsOnTop && !step.is_first {
        depth -= spec.slab_thickness.top;
    }
    depth
}
