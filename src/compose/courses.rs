//! Course composition: per-step search for a block stack that meets the
//! target height within the mortar-joint tolerance band.

use tracing::{debug, warn};

use crate::config::{
    float_cmp, BOTTOM_BED_CM, DEFAULT_JOINT_CM, EPS, MAX_BURIAL_CM, MAX_JOINT_CM, MIN_JOINT_CM,
    UNIFORM_BURIAL_RANGE_CM, UNIFORM_BURIAL_TOL_CM,
};
use crate::model::{CourseConfiguration, StairSpecification, Step, UnitMaterial};

/// Hard cap on the block-count search, guards against pathological unit heights.
const MAX_BLOCK_COUNT: u32 = 500;

/// Candidate configuration before it is bound to a step index.
struct Candidate<'a> {
    unit: &'a UnitMaterial,
    block_count: u32,
    joint_thickness: f64,
    buried_depth: f64,
}

/// Compose one course configuration per step, in step order.
///
/// A uniform burial depth is searched first; when one exists, every buried
/// course shares it. Steps that fit by joint tuning alone are unaffected.
/// The search never fails: steps with no acceptable configuration fall back
/// to a forced-cut stack of the highest-priority material.
pub fn compose_courses(spec: &StairSpecification, steps: &[Step]) -> Vec<CourseConfiguration> {
    let pinned = uniform_burial_depth(spec, steps);
    if let Some(d) = pinned {
        debug!(depth_cm = d, "uniform burial depth found for all steps");
    }

    steps
        .iter()
        .map(|step| {
            let target = step.course_target(spec);
            match search_step(spec, target, pinned) {
                Some(c) => CourseConfiguration {
                    step_index: step.index,
                    unit_id: c.unit.id().to_string(),
                    block_count: c.block_count,
                    joint_thickness: c.joint_thickness,
                    needs_cutting: false,
                    buried_depth: c.buried_depth,
                },
                None => forced_cut(spec, step, target),
            }
        })
        .collect()
}

/// Find one burial depth (2..=8 cm) at which every step can be built without
/// cutting. Buried courses must match the depth; joint-tuned steps pass as-is.
/// Returns the first qualifying depth, or `None` when steps disagree.
pub fn uniform_burial_depth(spec: &StairSpecification, steps: &[Step]) -> Option<f64> {
    UNIFORM_BURIAL_RANGE_CM
        .map(|d| d as f64)
        .find(|&d| {
            steps
                .iter()
                .all(|s| search_step(spec, s.course_target(spec), Some(d)).is_some())
        })
}

/// First-fit search over materials (priority order) and ascending block counts.
fn search_step(
    spec: &StairSpecification,
    target: f64,
    pinned_burial: Option<f64>,
) -> Option<Candidate<'_>> {
    if target <= 0.0 {
        return None;
    }

    for unit in &spec.unit_materials {
        let unit_height = unit.course_height();
        if unit_height <= 0.0 {
            continue;
        }

        let max_count = ((target / unit_height).ceil() as u32 + 1).min(MAX_BLOCK_COUNT);
        for count in 1..=max_count {
            let stack = count as f64 * unit_height;
            let joints = (count - 1) as f64 * DEFAULT_JOINT_CM;

            // A buried course sits directly on the ground, so the stack with
            // nominal joints and no bottom bed decides the overshoot.
            let overshoot = stack + joints - target;
            if overshoot > EPS {
                let accepted = overshoot <= MAX_BURIAL_CM + EPS
                    && match pinned_burial {
                        Some(d) => (overshoot - d).abs() <= UNIFORM_BURIAL_TOL_CM,
                        None => true,
                    };
                if accepted {
                    return Some(Candidate {
                        unit,
                        block_count: count,
                        joint_thickness: DEFAULT_JOINT_CM,
                        buried_depth: overshoot,
                    });
                }
                continue;
            }

            // Under-height: tune the joints. A single block has no joints to
            // tune, and the bottom bed is fixed.
            if count == 1 {
                continue;
            }
            let needed = (target - stack - BOTTOM_BED_CM) / (count - 1) as f64;
            if float_cmp::in_range(needed, MIN_JOINT_CM, MAX_JOINT_CM) {
                return Some(Candidate {
                    unit,
                    block_count: count,
                    joint_thickness: needed,
                    buried_depth: 0.0,
                });
            }
        }
    }
    None
}

/// Fallback when the whole search space is exhausted: nominal joints on the
/// highest-priority material, units cut to height.
fn forced_cut(spec: &StairSpecification, step: &Step, target: f64) -> CourseConfiguration {
    let unit = spec
        .primary_material()
        .expect("validated spec has at least one unit material");
    let unit_height = unit.course_height();
    let block_count = if unit_height > 0.0 && target > 0.0 {
        ((target / unit_height).ceil() as u32).max(1)
    } else {
        1
    };

    warn!(
        step = step.index,
        unit = unit.id(),
        block_count,
        "no course configuration fits; cutting units to height"
    );

    CourseConfiguration {
        step_index: step.index,
        unit_id: unit.id().to_string(),
        block_count,
        joint_thickness: DEFAULT_JOINT_CM,
        needs_cutting: true,
        buried_depth: 0.0,
    }
}
