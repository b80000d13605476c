//! Integration tests for the staircase estimator.
//!
//! These exercise the full pipeline through the public API and pin down the
//! contract scenarios: tolerance states of the course search, the one-cut
//! slab arithmetic, and offcut reuse across the step sequence.

use pretty_assertions::assert_eq;

use stair_estimate::cutting::{plan_surface, OffcutInventory};
use stair_estimate::model::{
    CourseState, CuttingMode, Overhangs, SlabSize, SlabThicknesses, StairSpecification, Step,
    SurfaceKind, UnitLibrary,
};
use stair_estimate::{estimate_staircase, TaskCatalogue};

/// Baseline five-step staircase: 90 cm rise in 18 cm steps, 21 cm blocks,
/// 90x60 slabs laid the long way with a 2 mm gap.
fn baseline_spec() -> StairSpecification {
    StairSpecification {
        total_height: 90.0,
        total_width: 185.0,
        step_tread: 30.0,
        step_height: 18.0,
        slab_thickness: SlabThicknesses {
            top: 2.0,
            side: 2.0,
            front: 2.0,
        },
        overhangs: Overhangs {
            front: 3.0,
            side: 0.0,
        },
        build_sides: Default::default(),
        step_configuration: Default::default(),
        gap_between_slabs_mm: 2.0,
        unit_materials: vec![UnitLibrary::block_21()],
        cutting_mode: CuttingMode::OneCut,
        slab: SlabSize::new(90.0, 60.0),
        placement: Default::default(),
        adhesive_thickness: 0.5,
    }
}

// ==================== Course tolerance invariant ====================

#[test]
fn course_states_are_exclusive_and_consistent() {
    let estimate = estimate_staircase(&baseline_spec(), &TaskCatalogue::default()).unwrap();
    for course in &estimate.courses {
        assert!(course.is_consistent(), "bad course: {course:?}");
        match course.state() {
            CourseState::JointFit => {
                assert!(course.joint_thickness >= 0.5 - 1e-9);
                assert!(course.joint_thickness <= 3.0 + 1e-9);
                assert_eq!(course.buried_depth, 0.0);
                assert!(!course.needs_cutting);
            }
            CourseState::Buried => {
                assert!(course.buried_depth > 0.0);
                assert!(course.buried_depth <= 8.0 + 1e-9);
                assert_eq!(course.joint_thickness, 1.0);
                assert!(!course.needs_cutting);
            }
            CourseState::ForcedCut => {
                assert!(course.needs_cutting);
                assert_eq!(course.buried_depth, 0.0);
            }
        }
    }
}

#[test]
fn first_step_buries_the_oversized_block() {
    // Target height 16 (18 minus the 2 cm top slab) with a 21 cm block:
    // one block overshoots by 5 cm, within the 8 cm burial cap.
    let estimate = estimate_staircase(&baseline_spec(), &TaskCatalogue::default()).unwrap();
    let first = &estimate.courses[0];
    assert_eq!(first.unit_id, "block-21");
    assert_eq!(first.block_count, 1);
    assert!(!first.needs_cutting);
    assert_eq!(first.joint_thickness, 1.0);
    assert!((first.buried_depth - 5.0).abs() < 1e-9);
}

// ==================== Step geometry ====================

#[test]
fn cumulative_heights_strictly_increase() {
    let estimate = estimate_staircase(&baseline_spec(), &TaskCatalogue::default()).unwrap();
    for pair in estimate.steps.windows(2) {
        assert!(pair[1].cumulative_height > pair[0].cumulative_height);
    }
}

#[test]
fn uneven_total_height_still_derives_monotonic_steps() {
    let mut spec = baseline_spec();
    spec.total_height = 88.0;
    let steps = Step::derive(&spec);
    assert_eq!(steps.len(), 5);
    for pair in steps.windows(2) {
        assert!(pair[1].cumulative_height > pair[0].cumulative_height);
    }
    assert!((steps.last().unwrap().cumulative_height - 88.0).abs() < 1e-9);
}

// ==================== One-cut slab arithmetic ====================

#[test]
fn one_cut_scenario_185_over_90() {
    // ceil(185.2 / 90.2) = 3 slabs, remainder 4.6 after two full slabs and
    // two gaps: one extra cut slab, one saw cut, one offcut pushed.
    let spec = baseline_spec();
    let mut inventory = OffcutInventory::new();
    let result = plan_surface(
        SurfaceKind::Tread,
        1,
        "Step 1",
        185.0,
        33.0,
        &spec,
        &mut inventory,
    );

    assert_eq!(result.new_slabs, 3);
    assert_eq!(result.cuts, 1);
    assert!(result.waste_used.is_none());
    assert_eq!(inventory.len(), 1);
    let offcut = &inventory.pieces()[0];
    assert_eq!(offcut.width, 90.0);
    assert_eq!(offcut.length, 27.0);
    assert_eq!(offcut.source, "Step 1");
}

#[test]
fn near_exact_fit_costs_no_cut() {
    let spec = baseline_spec();
    let mut inventory = OffcutInventory::new();
    // Two slabs plus one gap cover 180.2; a 180.15 requirement is within
    // the 0.1 cm threshold.
    let result = plan_surface(
        SurfaceKind::Tread,
        1,
        "Step 1",
        180.15,
        33.0,
        &spec,
        &mut inventory,
    );
    assert_eq!(result.new_slabs, 2);
    assert_eq!(result.cuts, 0);
    assert!(inventory.is_empty());
}

// ==================== Offcut reuse across steps ====================

#[test]
fn later_surface_consumes_earlier_offcut() {
    // An 80 cm wide staircase: step 1's tread cut leaves a 90x27 offcut
    // which the 18 cm riser reuses rotated, with zero new slabs.
    let mut spec = baseline_spec();
    spec.total_width = 80.0;
    let estimate = estimate_staircase(&spec, &TaskCatalogue::default()).unwrap();

    let reused: Vec<_> = estimate
        .surfaces
        .iter()
        .filter(|s| s.served_from_waste())
        .collect();
    assert!(!reused.is_empty(), "no surface reused waste");
    for surface in reused {
        assert_eq!(surface.new_slabs, 0);
        assert!(surface.waste_used.is_some());
    }
}

#[test]
fn offcut_consumption_never_exceeds_piece_area() {
    let spec = baseline_spec();
    let mut inventory = OffcutInventory::new();
    inventory.push(stair_estimate::WastePiece::new(30.0, 85.0, "Step 1"));
    let piece_area = 30.0 * 85.0;

    let result = plan_surface(
        SurfaceKind::Riser,
        2,
        "Step 2",
        80.0,
        27.0,
        &spec,
        &mut inventory,
    );
    assert!(result.served_from_waste());
    assert!(result.area_cm2 <= piece_area);
    // The replenished trim is smaller than what was consumed.
    let remaining: f64 = inventory.pieces().iter().map(|p| p.area()).sum();
    assert!(remaining < piece_area);
}

// ==================== Determinism ====================

#[test]
fn identical_inputs_yield_identical_estimates() {
    let spec = baseline_spec();
    let catalogue = TaskCatalogue::from_entries([
        ("Lay slab 90 x 60", 12.0),
        ("Lay cut piece 10 x 33", 5.0),
    ]);
    let a = estimate_staircase(&spec, &catalogue).unwrap();
    let b = estimate_staircase(&spec, &catalogue).unwrap();
    assert_eq!(a.totals.total_cuts, b.totals.total_cuts);
    assert_eq!(a.totals.total_new_slabs, b.totals.total_new_slabs);
    assert_eq!(a.totals.histogram, b.totals.histogram);
    assert_eq!(a, b);
}

// ==================== Totals ====================

#[test]
fn totals_match_per_surface_sums() {
    let estimate = estimate_staircase(&baseline_spec(), &TaskCatalogue::default()).unwrap();
    let slabs: u32 = estimate.surfaces.iter().map(|s| s.new_slabs).sum();
    let cuts: u32 = estimate.surfaces.iter().map(|s| s.cuts).sum();
    assert_eq!(estimate.totals.total_new_slabs, slabs);
    assert_eq!(estimate.totals.total_cuts, cuts);
}

#[test]
fn adhesive_scales_with_area() {
    let estimate = estimate_staircase(&baseline_spec(), &TaskCatalogue::default()).unwrap();
    let area = estimate.totals.total_top_area_m2 + estimate.totals.total_front_area_m2;
    assert!(area > 0.0);
    assert!((estimate.totals.adhesive_kg - 0.5 * 12.0 * area).abs() < 1e-9);
    assert!(estimate.totals.adhesive_bags >= 1);
}

#[test]
fn histogram_counts_every_placed_piece() {
    let estimate = estimate_staircase(&baseline_spec(), &TaskCatalogue::default()).unwrap();
    let pieces: usize = estimate.surfaces.iter().map(|s| s.pieces.len()).sum();
    assert_eq!(estimate.totals.histogram.total_pieces() as usize, pieces);
}

// ==================== Task matching ====================

#[test]
fn tasks_sum_counts_times_duration() {
    let catalogue = TaskCatalogue::from_entries([
        ("Lay slab 90 x 33", 12.0),
        ("Lay cut piece 5 x 33", 4.0),
    ]);
    let estimate = estimate_staircase(&baseline_spec(), &catalogue).unwrap();
    assert!(!estimate.task_breakdown.is_empty());
    for task in &estimate.task_breakdown {
        assert!(task.pieces > 0);
        let unit = catalogue
            .templates
            .iter()
            .find(|t| t.name == task.name)
            .unwrap()
            .unit_duration;
        assert!((task.total_duration - task.pieces as f64 * unit).abs() < 1e-9);
    }
}

#[test]
fn missing_catalogue_omits_tasks_without_error() {
    let estimate = estimate_staircase(&baseline_spec(), &TaskCatalogue::default()).unwrap();
    assert!(estimate.task_breakdown.is_empty());
}

// ==================== Validation boundary ====================

#[test]
fn invalid_dimensions_fail_before_the_engine_runs() {
    let mut spec = baseline_spec();
    spec.total_width = 0.0;
    let err = estimate_staircase(&spec, &TaskCatalogue::default()).unwrap_err();
    assert_eq!(err.code_value(), -1);

    let mut spec = baseline_spec();
    spec.unit_materials.clear();
    let err = estimate_staircase(&spec, &TaskCatalogue::default()).unwrap_err();
    assert_eq!(err.code_value(), -2);
}

#[test]
fn forced_cut_is_reported_not_raised() {
    // 21 cm blocks cannot meet a 34 cm target without cutting; the estimate
    // still succeeds and flags the step.
    let estimate = estimate_staircase(&baseline_spec(), &TaskCatalogue::default()).unwrap();
    assert!(estimate.courses.iter().any(|c| c.needs_cutting));
}

// ==================== JSON round trip ====================

#[test]
fn spec_round_trips_through_a_file() {
    let spec = baseline_spec();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("staircase.json");
    std::fs::write(&path, serde_json::to_string_pretty(&spec).unwrap()).unwrap();

    let loaded: StairSpecification =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(loaded, spec);

    let a = estimate_staircase(&spec, &TaskCatalogue::default()).unwrap();
    let b = estimate_staircase(&loaded, &TaskCatalogue::default()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn estimate_serializes_to_json() {
    let estimate = estimate_staircase(&baseline_spec(), &TaskCatalogue::default()).unwrap();
    let json = serde_json::to_string_pretty(&estimate).unwrap();
    let back: stair_estimate::StairEstimate = serde_json::from_str(&json).unwrap();
    assert_eq!(back, estimate);
}
