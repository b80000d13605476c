//! Offcut pieces retained for reuse on later surfaces.

use serde::{Deserialize, Serialize};

use crate::config::MIN_USABLE_DIM_CM;

/// A reusable rectangular offcut left over from an earlier cut.
///
/// The caller decides which axis is "width"; the planner treats width as the
/// across-the-step axis and length as the along-the-step axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WastePiece {
    /// Piece width in cm.
    pub width: f64,
    /// Piece length in cm.
    pub length: f64,
    /// Provenance label, e.g. "Step 3".
    pub source: String,
    /// Whether the piece may be rotated 90° when fitting.
    pub rotatable: bool,
}

impl WastePiece {
    /// Create a new rotatable offcut.
    pub fn new(width: f64, length: f64, source: impl Into<String>) -> Self {
        Self {
            width,
            length,
            source: source.into(),
            rotatable: true,
        }
    }

    /// Piece area in cm².
    pub fn area(&self) -> f64 {
        self.width * self.length
    }

    /// Direct fit: piece covers the required rectangle without rotation.
    pub fn fits(&self, required_width: f64, required_length: f64) -> bool {
        self.width >= required_width && self.length >= required_length
    }

    /// Rotated fit: the transposed piece covers the required rectangle.
    pub fn fits_rotated(&self, required_width: f64, required_length: f64) -> bool {
        self.rotatable && self.length >= required_width && self.width >= required_length
    }

    /// Whether the piece is large enough to be worth keeping in inventory.
    ///
    /// Slivers left by gap trimming have a dimension at or below 1 cm and
    /// never satisfy a real surface.
    pub fn is_usable(&self) -> bool {
        self.width > MIN_USABLE_DIM_CM && self.length > MIN_USABLE_DIM_CM
    }
}
