//! Slab cutting planner: decides, per step surface, how many new slabs to
//! buy versus how many pieces can be cut from the offcut inventory.

use tracing::{debug, warn};

use crate::config::CUT_THRESHOLD_CM;
use crate::cutting::inventory::{FitCandidate, FitOrientation, OffcutInventory};
use crate::model::{
    CuttingMode, PlacedPiece, StairSpecification, SurfaceCutResult, SurfaceKind, WastePiece,
};

/// A dimension counts as cut iff it misses the requirement by more than 0.1 cm.
#[inline]
fn needs_cut(actual: f64, required: f64) -> bool {
    (actual - required).abs() > CUT_THRESHOLD_CM
}

/// Format a centimeter dimension for the diagnostic description.
fn fmt_cm(v: f64) -> String {
    if (v - v.round()).abs() < 0.05 {
        format!("{}", v.round() as i64)
    } else {
        format!("{v:.1}")
    }
}

/// Plan one step surface.
///
/// The offcut inventory is tried first (single full-cover piece, then a
/// two-piece combination); only then are new slabs computed. Offcuts
/// generated by cutting new slabs are pushed back for later surfaces, so
/// call order across the step sequence matters.
pub fn plan_surface(
    surface: SurfaceKind,
    step_index: u32,
    step_label: &str,
    required_width: f64,
    required_depth: f64,
    spec: &StairSpecification,
    inventory: &mut OffcutInventory,
) -> SurfaceCutResult {
    let empty = SurfaceCutResult {
        step_index,
        surface,
        required_width,
        required_depth,
        new_slabs: 0,
        cuts: 0,
        waste_used: None,
        description: String::new(),
        pieces: Vec::new(),
        area_cm2: 0.0,
    };

    if required_width <= 0.0 || required_depth <= 0.0 {
        return SurfaceCutResult {
            description: "no surface".to_string(),
            ..empty
        };
    }

    // Offcut-first: a single piece covering the whole rectangle.
    if let Some(result) = try_single_offcut(&empty, spec, inventory) {
        return result;
    }

    // Two offcuts combined across the width.
    if let Some(result) = try_combined_offcuts(&empty, spec, inventory) {
        return result;
    }

    plan_new_slabs(&empty, step_label, spec, inventory)
}

/// Oriented dimensions of an inventory candidate: (covers depth, covers width).
fn oriented(piece: &WastePiece, candidate: &FitCandidate) -> (f64, f64) {
    match candidate.orientation {
        FitOrientation::Direct => (piece.width, piece.length),
        FitOrientation::Rotated => (piece.length, piece.width),
    }
}

/// Serve the surface from one offcut covering both dimensions.
fn try_single_offcut(
    base: &SurfaceCutResult,
    spec: &StairSpecification,
    inventory: &mut OffcutInventory,
) -> Option<SurfaceCutResult> {
    let (slab_width, _) = spec.slab_footprint();
    let rw = base.required_width;
    let rd = base.required_depth;

    let best = *inventory.find_usable(rd, rw).first()?;
    let piece = inventory.take(best.index);
    let (covers_depth, covers_width) = oriented(&piece, &best);

    let mut cuts = 0;
    if needs_cut(covers_depth, rd) {
        cuts += 1;
    }
    if needs_cut(covers_width, rw) {
        cuts += 1;
        // The length-direction leftover stays reusable.
        inventory.replenish(
            WastePiece::new(covers_depth, covers_width - rw, piece.source.clone()),
            slab_width,
        );
    }

    debug!(
        step = base.step_index,
        surface = %base.surface,
        source = %piece.source,
        "surface served from a single offcut"
    );

    Some(SurfaceCutResult {
        new_slabs: 0,
        cuts,
        waste_used: Some(piece.source.clone()),
        description: format!(
            "waste {}x{} from {} -> {}x{}",
            fmt_cm(piece.width),
            fmt_cm(piece.length),
            piece.source,
            fmt_cm(rw),
            fmt_cm(rd)
        ),
        pieces: vec![PlacedPiece {
            width: rw,
            length: rd,
        }],
        area_cm2: rw * rd,
        ..base.clone()
    })
}

/// Serve the surface from two offcuts: a partial piece plus one covering the
/// remaining width. Both are removed; no new slabs are bought.
fn try_combined_offcuts(
    base: &SurfaceCutResult,
    spec: &StairSpecification,
    inventory: &mut OffcutInventory,
) -> Option<SurfaceCutResult> {
    let (slab_width, _) = spec.slab_footprint();
    let rw = base.required_width;
    let rd = base.required_depth;

    let partials = inventory.find_partial(rd, rw);
    for first in partials {
        let (first_depth, first_width) = {
            let piece = &inventory.pieces()[first.index];
            oriented(piece, &first)
        };
        let remainder = rw - first_width;
        if remainder <= CUT_THRESHOLD_CM {
            continue;
        }

        let second = inventory
            .find_usable(rd, remainder)
            .into_iter()
            .find(|c| c.index != first.index);
        let Some(second) = second else { continue };

        // Remove the higher index first so the lower one stays valid.
        let (hi, lo) = if first.index > second.index {
            (first.index, second.index)
        } else {
            (second.index, first.index)
        };
        let hi_piece = inventory.take(hi);
        let lo_piece = inventory.take(lo);
        let (first_piece, second_piece) = if first.index > second.index {
            (hi_piece, lo_piece)
        } else {
            (lo_piece, hi_piece)
        };

        let (second_depth, second_width) = oriented(&second_piece, &second);

        let mut cuts = 0;
        if needs_cut(first_depth, rd) {
            cuts += 1;
        }
        if needs_cut(second_depth, rd) {
            cuts += 1;
        }
        if needs_cut(second_width, remainder) {
            cuts += 1;
            inventory.replenish(
                WastePiece::new(second_depth, second_width - remainder, second_piece.source.clone()),
                slab_width,
            );
        }

        debug!(
            step = base.step_index,
            surface = %base.surface,
            "surface served from two combined offcuts"
        );

        let sources = if first_piece.source == second_piece.source {
            first_piece.source.clone()
        } else {
            format!("{} + {}", first_piece.source, second_piece.source)
        };

        return Some(SurfaceCutResult {
            new_slabs: 0,
            cuts,
            waste_used: Some(sources),
            description: format!(
                "waste {}x{} + {}x{} -> {}x{}",
                fmt_cm(first_width),
                fmt_cm(first_depth),
                fmt_cm(second_width),
                fmt_cm(second_depth),
                fmt_cm(rw),
                fmt_cm(rd)
            ),
            pieces: vec![
                PlacedPiece {
                    width: first_width,
                    length: rd,
                },
                PlacedPiece {
                    width: remainder,
                    length: rd,
                },
            ],
            area_cm2: rw * rd,
            ..base.clone()
        });
    }
    None
}

/// Compute the new-slab plan when the inventory cannot serve the surface.
fn plan_new_slabs(
    base: &SurfaceCutResult,
    step_label: &str,
    spec: &StairSpecification,
    inventory: &mut OffcutInventory,
) -> SurfaceCutResult {
    let (slab_width, slab_length) = spec.slab_footprint();
    let rw = base.required_width;
    let rd = base.required_depth;
    let gap = spec.gap_cm();

    if slab_width <= 0.0 {
        warn!("non-positive slab width; surface dropped");
        return base.clone();
    }

    let slabs_without_gaps = ((rw + gap) / (slab_width + gap)).ceil().max(1.0) as u32;
    let total_gaps = (slabs_without_gaps - 1) as f64 * gap;
    let excess = slabs_without_gaps as f64 * slab_width + total_gaps - rw;

    let full_piece = PlacedPiece {
        width: slab_width,
        length: rd,
    };

    // Exact fit within the cut-detection threshold: no cutting at all.
    if excess <= CUT_THRESHOLD_CM {
        let new_slabs = slabs_without_gaps;
        return SurfaceCutResult {
            new_slabs,
            cuts: 0,
            description: format!("{} x {}x{}", new_slabs, fmt_cm(slab_width), fmt_cm(rd)),
            pieces: vec![full_piece; new_slabs as usize],
            area_cm2: new_slabs as f64 * slab_width * rd,
            ..base.clone()
        };
    }

    match spec.cutting_mode {
        CuttingMode::OneCut => {
            let full_slabs = slabs_without_gaps - 1;
            let remainder = rw - full_slabs as f64 * slab_width - total_gaps;

            // Negligible remainder: the full slabs alone are an exact fit.
            if remainder <= CUT_THRESHOLD_CM {
                return SurfaceCutResult {
                    new_slabs: full_slabs,
                    cuts: 0,
                    description: format!("{} x {}x{}", full_slabs, fmt_cm(slab_width), fmt_cm(rd)),
                    pieces: vec![full_piece; full_slabs as usize],
                    area_cm2: full_slabs as f64 * slab_width * rd,
                    ..base.clone()
                };
            }

            let mut pieces = vec![full_piece; full_slabs as usize];
            let mut cuts = 0;
            let mut new_slabs = full_slabs;
            let mut description =
                format!("{} x {}x{}", full_slabs, fmt_cm(slab_width), fmt_cm(rd));

            if cut_piece_survives(spec, remainder) {
                new_slabs += 1;
                cuts += 1;
                pieces.push(PlacedPiece {
                    width: remainder,
                    length: rd,
                });
                description.push_str(&format!(
                    " + 1 x {}x{} (cut)",
                    fmt_cm(display_width(spec, remainder)),
                    fmt_cm(rd)
                ));
                if remainder < slab_width {
                    push_cut_leftover(inventory, step_label, slab_width, slab_length, rd);
                }
            } else {
                warn!(
                    step = base.step_index,
                    surface = %base.surface,
                    "cut piece vanishes after side overhangs; dropped"
                );
            }

            SurfaceCutResult {
                new_slabs,
                cuts,
                description,
                pieces,
                area_cm2: new_slabs as f64 * slab_width * rd,
                ..base.clone()
            }
        }
        CuttingMode::TwoCuts => {
            if slabs_without_gaps <= 1 {
                // Degenerate: one slab cut down to the full required width.
                if !cut_piece_survives(spec, rw) {
                    warn!(
                        step = base.step_index,
                        surface = %base.surface,
                        "single cut piece vanishes after side overhangs; dropped"
                    );
                    return SurfaceCutResult {
                        description: "dropped (non-physical after overhangs)".to_string(),
                        ..base.clone()
                    };
                }
                push_cut_leftover(inventory, step_label, slab_width, slab_length, rd);
                return SurfaceCutResult {
                    new_slabs: 1,
                    cuts: 1,
                    description: format!(
                        "1 x {}x{} (cut)",
                        fmt_cm(display_width(spec, rw)),
                        fmt_cm(rd)
                    ),
                    pieces: vec![PlacedPiece {
                        width: rw,
                        length: rd,
                    }],
                    area_cm2: slab_width * rd,
                    ..base.clone()
                };
            }

            let full_slabs = slabs_without_gaps - 2;
            let residual = rw - full_slabs as f64 * slab_width - total_gaps;
            let half = residual / 2.0;

            let mut pieces = vec![full_piece; full_slabs as usize];
            let mut cuts = 0;
            let mut new_slabs = full_slabs;
            let mut description =
                format!("{} x {}x{}", full_slabs, fmt_cm(slab_width), fmt_cm(rd));

            for _ in 0..2 {
                if cut_piece_survives(spec, half) {
                    new_slabs += 1;
                    cuts += 1;
                    pieces.push(PlacedPiece {
                        width: half,
                        length: rd,
                    });
                    if half < slab_width {
                        push_cut_leftover(inventory, step_label, slab_width, slab_length, rd);
                    }
                }
            }
            if cuts > 0 {
                description.push_str(&format!(
                    " + {} x {}x{} (cut)",
                    cuts,
                    fmt_cm(display_width(spec, half)),
                    fmt_cm(rd)
                ));
            }

            SurfaceCutResult {
                new_slabs,
                cuts,
                description,
                pieces,
                area_cm2: new_slabs as f64 * slab_width * rd,
                ..base.clone()
            }
        }
    }
}

/// Total side overhang across the open sides, in cm.
fn side_overhang_total(spec: &StairSpecification) -> f64 {
    spec.overhangs.side * spec.build_sides.overhang_sides() as f64
}

/// Displayed width of a cut piece, net of side overhangs. Reporting only.
fn display_width(spec: &StairSpecification, width: f64) -> f64 {
    (width - side_overhang_total(spec)).max(0.0)
}

/// A cut piece whose width vanishes after subtracting side overhangs is
/// non-physical and is dropped without charging a cut.
fn cut_piece_survives(spec: &StairSpecification, width: f64) -> bool {
    width - side_overhang_total(spec) > 0.0
}

/// Push the depth-direction leftover of a cut slab into the inventory.
fn push_cut_leftover(
    inventory: &mut OffcutInventory,
    step_label: &str,
    slab_width: f64,
    slab_length: f64,
    required_depth: f64,
) {
    let leftover = slab_length - required_depth;
    if leftover > CUT_THRESHOLD_CM {
        inventory.push(WastePiece::new(slab_width, leftover, step_label));
    }
}
