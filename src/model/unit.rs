//! Course-unit materials: blocks and bricks with orientation rules.

use serde::{Deserialize, Serialize};

/// How a brick is laid in a course.
///
/// Orientation decides which physical dimension becomes the course height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrickOrientation {
    /// Laid flat: height = the brick's thickness.
    #[default]
    Flat,
    /// Laid on its side: height = the brick's width.
    OnSide,
}

/// A course-unit material: a concrete block or a clay brick.
///
/// Blocks have a single fixed course height. Bricks carry their full
/// dimensions and an orientation that selects the effective height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnitMaterial {
    Block {
        /// Catalogue identifier, e.g. "block-21".
        id: String,
        /// Course height in cm.
        height: f64,
        /// Block length along the step face in cm.
        length: f64,
        /// Block depth into the step in cm.
        depth: f64,
    },
    Brick {
        /// Catalogue identifier, e.g. "brick-65".
        id: String,
        /// Brick thickness in cm (height when laid flat).
        thickness: f64,
        /// Brick width in cm (height when laid on its side).
        width: f64,
        /// Brick length in cm.
        length: f64,
        /// How the brick is laid.
        orientation: BrickOrientation,
    },
}

impl UnitMaterial {
    /// Catalogue identifier of this material.
    pub fn id(&self) -> &str {
        match self {
            UnitMaterial::Block { id, .. } => id,
            UnitMaterial::Brick { id, .. } => id,
        }
    }

    /// Effective course height in cm for one laid unit.
    pub fn course_height(&self) -> f64 {
        match self {
            UnitMaterial::Block { height, .. } => *height,
            UnitMaterial::Brick {
                thickness,
                width,
                orientation,
                ..
            } => match orientation {
                BrickOrientation::Flat => *thickness,
                BrickOrientation::OnSide => *width,
            },
        }
    }

    /// Length of the unit along the step face in cm.
    pub fn face_length(&self) -> f64 {
        match self {
            UnitMaterial::Block { length, .. } => *length,
            UnitMaterial::Brick { length, .. } => *length,
        }
    }

    /// Number of units needed to fill one course across the given width.
    pub fn units_per_course(&self, width: f64) -> u32 {
        let len = self.face_length();
        if len <= 0.0 || width <= 0.0 {
            return 0;
        }
        (width / len).ceil() as u32
    }
}

/// Built-in catalogue of common course-unit materials.
pub struct UnitLibrary;

impl UnitLibrary {
    /// Standard 21 cm concrete shuttering block.
    pub fn block_21() -> UnitMaterial {
        UnitMaterial::Block {
            id: "block-21".to_string(),
            height: 21.0,
            length: 50.0,
            depth: 17.5,
        }
    }

    /// Standard 14 cm concrete block.
    pub fn block_14() -> UnitMaterial {
        UnitMaterial::Block {
            id: "block-14".to_string(),
            height: 14.0,
            length: 50.0,
            depth: 14.0,
        }
    }

    /// Solid brick laid flat (6.5 cm course).
    pub fn brick_flat() -> UnitMaterial {
        UnitMaterial::Brick {
            id: "brick-65".to_string(),
            thickness: 6.5,
            width: 11.5,
            length: 24.0,
            orientation: BrickOrientation::Flat,
        }
    }

    /// Solid brick laid on its side (11.5 cm course).
    pub fn brick_on_side() -> UnitMaterial {
        UnitMaterial::Brick {
            id: "brick-115".to_string(),
            thickness: 6.5,
            width: 11.5,
            length: 24.0,
            orientation: BrickOrientation::OnSide,
        }
    }

    /// The full built-in catalogue, default priority order.
    pub fn all() -> Vec<UnitMaterial> {
        vec![
            Self::block_21(),
            Self::block_14(),
            Self::brick_on_side(),
            Self::brick_flat(),
        ]
    }

    /// Look up a catalogue entry by id.
    pub fn by_id(id: &str) -> Option<UnitMaterial> {
        Self::all().into_iter().find(|m| m.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_block_course_height() {
        assert_eq!(UnitLibrary::block_21().course_height(), 21.0);
        assert_eq!(UnitLibrary::block_14().course_height(), 14.0);
    }

    #[test]
    fn test_brick_orientation_selects_height() {
        assert_eq!(UnitLibrary::brick_flat().course_height(), 6.5);
        assert_eq!(UnitLibrary::brick_on_side().course_height(), 11.5);
    }

    #[test]
    fn test_units_per_course() {
        let block = UnitLibrary::block_21();
        assert_eq!(block.units_per_course(100.0), 2);
        assert_eq!(block.units_per_course(101.0), 3);
        assert_eq!(block.units_per_course(0.0), 0);
    }

    #[test]
    fn test_library_lookup() {
        assert_eq!(UnitLibrary::by_id("block-21").unwrap().id(), "block-21");
        assert!(UnitLibrary::by_id("missing").is_none());
    }

    #[test]
    fn test_serde_tagged_roundtrip() {
        let brick = UnitLibrary::brick_on_side();
        let json = serde_json::to_string(&brick).unwrap();
        assert!(json.contains("\"kind\":\"brick\""));
        let back: UnitMaterial = serde_json::from_str(&json).unwrap();
        assert_eq!(back, brick);
    }
}
