//! Data model: specification input, derived steps, materials, and results.

pub mod result;
pub mod spec;
pub mod step;
pub mod unit;
pub mod waste;

pub use result::{CourseConfiguration, CourseState, PlacedPiece, SurfaceCutResult, SurfaceKind};
pub use spec::{
    BuildSides, CuttingMode, Overhangs, SlabPlacement, SlabSize, SlabThicknesses,
    StairSpecification, StepConfiguration,
};
pub use step::Step;
pub use unit::{BrickOrientation, UnitLibrary, UnitMaterial};
pub use waste::WastePiece;
