//! Slab cutting: offcut inventory and per-surface cut planning.

pub mod inventory;
pub mod planner;

pub use inventory::{FitCandidate, FitOrientation, OffcutInventory};
pub use planner::plan_surface;
