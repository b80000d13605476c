//! Human-readable estimate report.
//!
//! A diagnostic projection over the structured estimate; nothing here feeds
//! back into the arithmetic.

use std::fmt::Write;

use crate::engine::StairEstimate;
use crate::model::CourseState;

/// Render a plain-text summary of an estimate.
pub fn render(estimate: &StairEstimate) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Staircase estimate ({} steps)", estimate.steps.len());
    let _ = writeln!(out, "==============================");
    let _ = writeln!(out);

    let _ = writeln!(out, "Masonry courses:");
    for course in &estimate.courses {
        let state = match course.state() {
            CourseState::JointFit => format!("joint {:.1} cm", course.joint_thickness),
            CourseState::Buried => format!("buried {:.1} cm", course.buried_depth),
            CourseState::ForcedCut => "cut to height".to_string(),
        };
        let _ = writeln!(
            out,
            "  step {}: {} x {} ({})",
            course.step_index, course.block_count, course.unit_id, state
        );
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Slab surfaces:");
    for surface in &estimate.surfaces {
        let waste = match &surface.waste_used {
            Some(source) => format!(" [waste: {source}]"),
            None => String::new(),
        };
        let _ = writeln!(
            out,
            "  step {} {}: {} new, {} cut(s){} - {}",
            surface.step_index,
            surface.surface,
            surface.new_slabs,
            surface.cuts,
            waste,
            surface.description
        );
    }
    let _ = writeln!(out);

    let totals = &estimate.totals;
    let _ = writeln!(out, "Totals:");
    let _ = writeln!(out, "  new slabs:      {}", totals.total_new_slabs);
    let _ = writeln!(out, "  cuts:           {}", totals.total_cuts);
    for block in &totals.block_totals {
        let _ = writeln!(out, "  {}: {} units", block.unit_id, block.blocks);
    }
    let _ = writeln!(
        out,
        "  tread area:     {:.2} m2",
        totals.total_top_area_m2
    );
    let _ = writeln!(
        out,
        "  riser area:     {:.2} m2",
        totals.total_front_area_m2
    );
    if totals.adhesive_bags > 0 {
        let _ = writeln!(
            out,
            "  adhesive:       {:.1} kg ({} bags)",
            totals.adhesive_kg, totals.adhesive_bags
        );
    }

    if !totals.histogram.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Slab pieces by dimension:");
        for (dims, count) in totals.histogram.iter() {
            let _ = writeln!(out, "  {dims}: {count}");
        }
    }

    if !estimate.task_breakdown.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Labor tasks:");
        for task in &estimate.task_breakdown {
            let _ = writeln!(
                out,
                "  {}: {} piece(s), {:.0} min",
                task.name, task.pieces, task.total_duration
            );
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::estimate_staircase;
    use crate::model::{SlabSize, SlabThicknesses, StairSpecification, UnitLibrary};
    use crate::tasks::TaskCatalogue;

    fn estimate() -> StairEstimate {
        let spec = StairSpecification {
            total_height: 90.0,
            total_width: 185.0,
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
        };
        let catalogue = TaskCatalogue::from_entries([("Lay slab 90 x 60", 12.0)]);
        estimate_staircase(&spec, &catalogue).unwrap()
    }

    #[test]
    fn test_report_sections_present() {
        let text = render(&estimate());
        assert!(text.contains("Masonry courses:"));
        assert!(text.contains("Slab surfaces:"));
        assert!(text.contains("Totals:"));
        assert!(text.contains("Labor tasks:"));
    }

    #[test]
    fn test_report_mentions_each_step() {
        let text = render(&estimate());
        for i in 1..=5 {
            assert!(text.contains(&format!("step {i}")), "missing step {i}");
        }
    }
}
