//! Quantity aggregation: slab and cut totals, surface areas, adhesive mass,
//! and the slab-dimension histogram used for task matching.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::{round_cm, ADHESIVE_BAG_KG, ADHESIVE_KG_PER_M2_PER_CM, CONV_CM2_M2};
use crate::model::{CourseConfiguration, StairSpecification, SurfaceCutResult, SurfaceKind};

/// Histogram key: placed piece dimensions rounded to whole cm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlabDims {
    pub width: u32,
    pub length: u32,
}

impl std::fmt::Display for SlabDims {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.length)
    }
}

/// One serialized histogram bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct BucketEntry {
    width: u32,
    length: u32,
    count: u32,
}

/// Count of placed slab pieces per rounded dimension.
///
/// Serialized as a list of `{width, length, count}` entries; JSON maps
/// require string keys and the dimensions stay typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlabHistogram {
    buckets: BTreeMap<SlabDims, u32>,
}

impl Serialize for SlabHistogram {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries: Vec<BucketEntry> = self
            .buckets
            .iter()
            .map(|(dims, count)| BucketEntry {
                width: dims.width,
                length: dims.length,
                count: *count,
            })
            .collect();
        entries.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SlabHistogram {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<BucketEntry>::deserialize(deserializer)?;
        let mut buckets = BTreeMap::new();
        for e in entries {
            buckets.insert(
                SlabDims {
                    width: e.width,
                    length: e.length,
                },
                e.count,
            );
        }
        Ok(SlabHistogram { buckets })
    }
}

impl SlabHistogram {
    /// Record one placed piece.
    pub fn record(&mut self, width: f64, length: f64) {
        let key = SlabDims {
            width: round_cm(width),
            length: round_cm(length),
        };
        if key.width == 0 || key.length == 0 {
            return;
        }
        *self.buckets.entry(key).or_insert(0) += 1;
    }

    /// Iterate buckets in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&SlabDims, &u32)> {
        self.buckets.iter()
    }

    /// Number of distinct dimension buckets.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Whether no pieces were recorded.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total piece count across all buckets.
    pub fn total_pieces(&self) -> u32 {
        self.buckets.values().sum()
    }
}

/// Per-material block totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockTotal {
    pub unit_id: String,
    pub blocks: u32,
}

/// Accumulated quantities across all steps and surfaces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuantityTotals {
    /// New slabs to purchase.
    pub total_new_slabs: u32,
    /// Saw operations across all surfaces.
    pub total_cuts: u32,
    /// Tread cladding area in m².
    pub total_top_area_m2: f64,
    /// Riser cladding area in m².
    pub total_front_area_m2: f64,
    /// Required adhesive mass in kg.
    pub adhesive_kg: f64,
    /// Adhesive bags to purchase (20 kg bags).
    pub adhesive_bags: u32,
    /// Blocks/bricks per unit material, in first-use order.
    pub block_totals: Vec<BlockTotal>,
    /// Placed slab pieces per rounded dimension.
    pub histogram: SlabHistogram,
}

/// Accumulates surface results and course configurations into totals.
#[derive(Debug, Default)]
pub struct QuantityAggregator {
    totals: QuantityTotals,
}

impl QuantityAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one surface result into the totals.
    pub fn add_surface(&mut self, result: &SurfaceCutResult) {
        self.totals.total_new_slabs += result.new_slabs;
        self.totals.total_cuts += result.cuts;

        let area_m2 = result.area_cm2 / CONV_CM2_M2;
        match result.surface {
            SurfaceKind::Tread => self.totals.total_top_area_m2 += area_m2,
            SurfaceKind::Riser => self.totals.total_front_area_m2 += area_m2,
        }

        for piece in &result.pieces {
            self.totals.histogram.record(piece.width, piece.length);
        }
    }

    /// Fold one step's course configuration into the block totals.
    pub fn add_courses(&mut self, config: &CourseConfiguration, units_per_course: u32) {
        let blocks = config.block_count * units_per_course;
        match self
            .totals
            .block_totals
            .iter_mut()
            .find(|t| t.unit_id == config.unit_id)
        {
            Some(total) => total.blocks += blocks,
            None => self.totals.block_totals.push(BlockTotal {
                unit_id: config.unit_id.clone(),
                blocks,
            }),
        }
    }

    /// Close the accumulation: compute adhesive mass and bag count.
    pub fn finish(mut self, spec: &StairSpecification) -> QuantityTotals {
        let area = self.totals.total_top_area_m2 + self.totals.total_front_area_m2;
        if area > 0.0 && spec.adhesive_thickness > 0.0 {
            let kg = spec.adhesive_thickness * ADHESIVE_KG_PER_M2_PER_CM * area;
            self.totals.adhesive_kg = kg;
            self.totals.adhesive_bags = ((kg / ADHESIVE_BAG_KG).ceil() as u32).max(1);
        }
        self.totals
    }
}
