//! Masonry course composition.

mod courses;

pub use courses::{compose_courses, uniform_burial_depth};
