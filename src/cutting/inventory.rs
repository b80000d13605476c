//! Offcut inventory: the mutable pool of reusable slab fragments.

use tracing::debug;

use crate::config::MIN_OFFCUT_DIM_CM;
use crate::model::WastePiece;

/// How a candidate piece satisfies a required rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitOrientation {
    Direct,
    Rotated,
}

/// A usable piece found in the inventory.
#[derive(Debug, Clone, Copy)]
pub struct FitCandidate {
    /// Index into the inventory at query time.
    pub index: usize,
    pub orientation: FitOrientation,
    /// Piece area in cm², the selection key.
    pub area: f64,
}

/// Ordered multiset of offcuts, consumed and replenished across the step
/// sequence. One inventory per estimator run; never shared across runs.
#[derive(Debug, Default, Clone)]
pub struct OffcutInventory {
    pieces: Vec<WastePiece>,
}

impl OffcutInventory {
    /// Create an empty inventory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pieces currently held.
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    /// Whether the inventory is empty.
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Read-only view of the held pieces.
    pub fn pieces(&self) -> &[WastePiece] {
        &self.pieces
    }

    /// All pieces covering the required rectangle, directly or rotated,
    /// sorted smallest-area-first so large offcuts survive for later steps.
    ///
    /// Slivers (any dimension ≤ 1 cm) never qualify.
    pub fn find_usable(&self, required_width: f64, required_length: f64) -> Vec<FitCandidate> {
        let mut candidates: Vec<FitCandidate> = self
            .pieces
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_usable())
            .filter_map(|(index, p)| {
                if p.fits(required_width, required_length) {
                    Some(FitCandidate {
                        index,
                        orientation: FitOrientation::Direct,
                        area: p.area(),
                    })
                } else if p.fits_rotated(required_width, required_length) {
                    Some(FitCandidate {
                        index,
                        orientation: FitOrientation::Rotated,
                        area: p.area(),
                    })
                } else {
                    None
                }
            })
            .collect();

        candidates.sort_by(|a, b| a.area.total_cmp(&b.area));
        candidates
    }

    /// Pieces that cover the required width but fall short of the required
    /// length: candidates for the first half of a two-piece combination.
    /// Same smallest-area-first ordering as `find_usable`.
    pub fn find_partial(&self, required_width: f64, required_length: f64) -> Vec<FitCandidate> {
        let mut candidates: Vec<FitCandidate> = self
            .pieces
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_usable())
            .filter_map(|(index, p)| {
                if p.width >= required_width && p.length < required_length {
                    Some(FitCandidate {
                        index,
                        orientation: FitOrientation::Direct,
                        area: p.area(),
                    })
                } else if p.rotatable && p.length >= required_width && p.width < required_length {
                    Some(FitCandidate {
                        index,
                        orientation: FitOrientation::Rotated,
                        area: p.area(),
                    })
                } else {
                    None
                }
            })
            .collect();

        candidates.sort_by(|a, b| a.area.total_cmp(&b.area));
        candidates
    }

    /// Remove and return a piece by index.
    ///
    /// The inventory is only ever mutated by the planner, so an out-of-range
    /// index is an internal defect, not a recoverable condition.
    pub fn take(&mut self, index: usize) -> WastePiece {
        assert!(index < self.pieces.len(), "offcut inventory underflow");
        self.pieces.remove(index)
    }

    /// Append a piece, discarding slivers outright.
    pub fn push(&mut self, piece: WastePiece) {
        if piece.width <= MIN_OFFCUT_DIM_CM || piece.length <= MIN_OFFCUT_DIM_CM {
            debug!(
                width = piece.width,
                length = piece.length,
                "discarding sliver offcut"
            );
            return;
        }
        self.pieces.push(piece);
    }

    /// Re-add the leftover of a partially used piece.
    ///
    /// The leftover must be genuinely reusable: above the sliver threshold
    /// and smaller than the parent slab width (anything wider is a bookkeeping
    /// error, not a trimming remainder).
    pub fn replenish(&mut self, piece: WastePiece, parent_slab_width: f64) {
        let trimmed_dim = piece.width.min(piece.length);
        if trimmed_dim > MIN_OFFCUT_DIM_CM && trimmed_dim < parent_slab_width {
            self.push(piece);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn inventory() -> OffcutInventory {
        let mut inv = OffcutInventory::new();
        inv.push(WastePiece::new(30.0, 80.0, "Step 1"));
        inv.push(WastePiece::new(50.0, 100.0, "Step 2"));
        inv.push(WastePiece::new(20.0, 40.0, "Step 2"));
        inv
    }

    // ==================== find_usable ====================

    #[test]
    fn test_find_usable_smallest_area_first() {
        let inv = inventory();
        let candidates = inv.find_usable(18.0, 35.0);
        // All three fit; smallest area (20x40) first, largest (50x100) last.
        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[0].index, 2);
        assert_eq!(candidates[2].index, 1);
    }

    #[test]
    fn test_find_usable_rotated() {
        let inv = inventory();
        // Width 80 fits only via rotation of the 30x80 piece, or directly
        // from the 50x100 piece rotated/direct check.
        let candidates = inv.find_usable(80.0, 25.0);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].index, 0);
        assert_eq!(candidates[0].orientation, FitOrientation::Rotated);
    }

    #[test]
    fn test_find_usable_filters_slivers() {
        let mut inv = OffcutInventory::new();
        // Above the discard threshold but at most 1 cm in one dimension.
        inv.push(WastePiece::new(0.9, 80.0, "Step 1"));
        assert_eq!(inv.len(), 1);
        assert!(inv.find_usable(0.5, 10.0).is_empty());
    }

    #[test]
    fn test_find_partial() {
        let inv = inventory();
        // Width 25 covered, length 120 not: all pieces are partial, the
        // 20x40 only via rotation. Smallest area first.
        let candidates = inv.find_partial(25.0, 120.0);
        assert_eq!(candidates.len(), 3);
        assert_eq!(candidates[0].index, 2);
        assert_eq!(candidates[0].orientation, FitOrientation::Rotated);
        assert_eq!(candidates[1].index, 0);
    }

    // ==================== take / push / replenish ====================

    #[test]
    fn test_take_removes() {
        let mut inv = inventory();
        let piece = inv.take(1);
        assert_eq!(piece.width, 50.0);
        assert_eq!(inv.len(), 2);
    }

    #[test]
    #[should_panic(expected = "offcut inventory underflow")]
    fn test_take_out_of_range_panics() {
        let mut inv = OffcutInventory::new();
        inv.take(0);
    }

    #[test]
    fn test_push_discards_slivers() {
        let mut inv = OffcutInventory::new();
        inv.push(WastePiece::new(0.05, 80.0, "Step 1"));
        assert!(inv.is_empty());
        inv.push(WastePiece::new(0.2, 80.0, "Step 1"));
        assert_eq!(inv.len(), 1);
    }

    #[test]
    fn test_replenish_respects_parent_width() {
        let mut inv = OffcutInventory::new();
        // Leftover as wide as the parent slab is not a trimming remainder.
        inv.replenish(WastePiece::new(90.0, 95.0, "Step 1"), 90.0);
        assert!(inv.is_empty());
        inv.replenish(WastePiece::new(40.0, 95.0, "Step 1"), 90.0);
        assert_eq!(inv.len(), 1);
    }

    #[test]
    fn test_no_coalescing() {
        let mut inv = OffcutInventory::new();
        inv.push(WastePiece::new(30.0, 40.0, "Step 1"));
        inv.push(WastePiece::new(30.0, 40.0, "Step 1"));
        assert_eq!(inv.len(), 2);
    }
}
