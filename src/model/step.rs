//! Step geometry derived from the staircase specification.

use serde::{Deserialize, Serialize};

use crate::model::spec::StairSpecification;

/// One physical step of the staircase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// 1-based step index, counted from the ground.
    pub index: u32,
    /// Gross height from the ground to this step's finished top, in cm.
    pub cumulative_height: f64,
    /// Tread depth available for cladding, in cm.
    pub tread_depth: f64,
    /// First step from the ground.
    pub is_first: bool,
    /// Topmost step.
    pub is_last: bool,
}

impl Step {
    /// Derive the full step sequence from a specification.
    ///
    /// Steps are equalized: the actual rise is `total_height / count`, so
    /// cumulative heights are strictly increasing multiples of it. The last
    /// step's tread loses the front slab thickness to the landing edge.
    pub fn derive(spec: &StairSpecification) -> Vec<Step> {
        let count = spec.step_count();
        let rise = spec.actual_rise();
        (1..=count)
            .map(|i| {
                let is_last = i == count;
                let mut tread_depth = spec.step_tread + spec.overhangs.front;
                if is_last {
                    tread_depth -= spec.slab_thickness.front;
                }
                Step {
                    index: i,
                    cumulative_height: rise * i as f64,
                    tread_depth,
                    is_first: i == 1,
                    is_last,
                }
            })
            .collect()
    }

    /// Masonry target height for this step: gross height minus the top slab.
    pub fn course_target(&self, spec: &StairSpecification) -> f64 {
        self.cumulative_height - spec.slab_thickness.top
    }

    /// Rise of this step relative to the previous one.
    pub fn rise_from(&self, previous: Option<&Step>) -> f64 {
        match previous {
            Some(p) => self.cumulative_height - p.cumulative_height,
            None => self.cumulative_height,
        }
    }

    /// Provenance label used for offcuts generated while cladding this step.
    pub fn label(&self) -> String {
        format!("Step {}", self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::spec::{SlabSize, SlabThicknesses, StairSpecification};
    use crate::model::unit::UnitLibrary;
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
            overhangs: crate::model::spec::Overhangs {
                front: 3.0,
                side: 0.0,
            },
            build_sides: Default::default(),
            step_configuration: Default::default(),
            gap_between_slabs_mm: 0.0,
            unit_materials: vec![UnitLibrary::block_21()],
            cutting_mode: Default::default(),
            slab: SlabSize::new(90.0, 60.0),
            placement: Default::default(),
            adhesive_thickness: 0.0,
        }
    }

    #[test]
    fn test_derive_counts_and_flags() {
        let steps = Step::derive(&spec());
        assert_eq!(steps.len(), 5);
        assert!(steps[0].is_first);
        assert!(!steps[0].is_last);
        assert!(steps[4].is_last);
        assert_eq!(steps[2].index, 3);
    }

    #[test]
    fn test_cumulative_heights_strictly_increasing() {
        let steps = Step::derive(&spec());
        for pair in steps.windows(2) {
            assert!(pair[1].cumulative_height > pair[0].cumulative_height);
        }
        assert_eq!(steps[0].cumulative_height, 18.0);
        assert_eq!(steps[4].cumulative_height, 90.0);
    }

    #[test]
    fn test_last_tread_loses_front_slab() {
        let steps = Step::derive(&spec());
        assert_eq!(steps[0].tread_depth, 33.0);
        assert_eq!(steps[4].tread_depth, 31.0);
    }

    #[test]
    fn test_course_target_subtracts_top_slab() {
        let s = spec();
        let steps = Step::derive(&s);
        assert_eq!(steps[0].course_target(&s), 16.0);
        assert_eq!(steps[4].course_target(&s), 88.0);
    }

    #[test]
    fn test_rise_from() {
        let steps = Step::derive(&spec());
        assert_eq!(steps[0].rise_from(None), 18.0);
        assert_eq!(steps[1].rise_from(Some(&steps[0])), 18.0);
    }

    #[test]
    fn test_label() {
        let steps = Step::derive(&spec());
        assert_eq!(steps[2].label(), "Step 3");
    }
}
