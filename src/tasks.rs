//! Task matching: assign slab-dimension buckets to externally supplied
//! duration templates by nearest neighbour in (width, length) space.

use serde::{Deserialize, Serialize};

use crate::aggregate::SlabHistogram;

/// A named duration template from the external catalogue.
///
/// The catalogue arrives as `{name, unit_duration}` pairs; dimensions are
/// parsed once from an embedded `"<num> x <num>"` pattern in the name and
/// kept typed from then on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationTemplate {
    pub name: String,
    /// Parsed (width, length) in cm; `None` when the name carries no pattern.
    pub dims: Option<(f64, f64)>,
    /// Duration per laid piece, in minutes.
    pub unit_duration: f64,
}

impl<'de> Deserialize<'de> for DurationTemplate {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // External catalogues ship plain {name, unit_duration} entries;
        // dimensions are recovered from the name when not given explicitly.
        #[derive(Deserialize)]
        struct Raw {
            name: String,
            #[serde(default)]
            dims: Option<(f64, f64)>,
            unit_duration: f64,
        }
        let raw = Raw::deserialize(deserializer)?;
        let dims = raw.dims.or_else(|| parse_dims(&raw.name));
        Ok(DurationTemplate {
            name: raw.name,
            dims,
            unit_duration: raw.unit_duration,
        })
    }
}

impl DurationTemplate {
    /// Build a template, extracting dimensions from the name.
    pub fn parse(name: impl Into<String>, unit_duration: f64) -> Self {
        let name = name.into();
        let dims = parse_dims(&name);
        Self {
            name,
            dims,
            unit_duration,
        }
    }
}

/// Extract the first `"<num> x <num>"` pattern from a template name.
///
/// Accepts both spaced (`"90 x 60"`) and compact (`"90x60"`) forms.
fn parse_dims(name: &str) -> Option<(f64, f64)> {
    let words: Vec<&str> = name.split_whitespace().collect();

    // Compact form: a single token "90x60".
    for word in &words {
        if let Some((a, b)) = word.split_once(['x', 'X']) {
            if let (Ok(w), Ok(l)) = (a.parse::<f64>(), b.parse::<f64>()) {
                return Some((w, l));
            }
        }
    }

    // Spaced form: "<num> x <num>" across three tokens.
    for window in words.windows(3) {
        if window[1].eq_ignore_ascii_case("x") {
            if let (Ok(w), Ok(l)) = (window[0].parse::<f64>(), window[2].parse::<f64>()) {
                return Some((w, l));
            }
        }
    }

    None
}

/// Ordered catalogue of duration templates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskCatalogue {
    pub templates: Vec<DurationTemplate>,
}

impl TaskCatalogue {
    /// Build a catalogue from raw `{name, unit_duration}` entries, keeping order.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            templates: entries
                .into_iter()
                .map(|(name, duration)| DurationTemplate::parse(name, duration))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Matched durations for one template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskBreakdown {
    /// Template name from the catalogue.
    pub name: String,
    /// Pieces assigned to this template.
    pub pieces: u32,
    /// `pieces × unit_duration`.
    pub total_duration: f64,
}

/// Assign every histogram bucket to its nearest catalogue template and sum
/// durations per template. Buckets are skipped when no template carries
/// dimensions. Ties break on catalogue order (first minimal wins).
pub fn match_tasks(histogram: &SlabHistogram, catalogue: &TaskCatalogue) -> Vec<TaskBreakdown> {
    let mut assigned: Vec<(usize, u32)> = Vec::new();

    for (dims, count) in histogram.iter() {
        let mut best: Option<(usize, f64)> = None;
        for (idx, template) in catalogue.templates.iter().enumerate() {
            let Some((tw, tl)) = template.dims else {
                continue;
            };
            let dw = dims.width as f64 - tw;
            let dl = dims.length as f64 - tl;
            let dist = dw * dw + dl * dl;
            // Strict comparison keeps the first minimal entry on ties.
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((idx, dist));
            }
        }
        if let Some((idx, _)) = best {
            assigned.push((idx, *count));
        }
    }

    // Aggregate per template, preserving catalogue order.
    let mut breakdown: Vec<TaskBreakdown> = Vec::new();
    for (idx, template) in catalogue.templates.iter().enumerate() {
        let pieces: u32 = assigned
            .iter()
            .filter(|(i, _)| *i == idx)
            .map(|(_, c)| *c)
            .sum();
        if pieces > 0 {
            breakdown.push(TaskBreakdown {
                name: template.name.clone(),
                pieces,
                total_duration: pieces as f64 * template.unit_duration,
            });
        }
    }
    breakdown
}
