pub mod attributes;
pub mod error;
pub mod geometry;
pub mod marks;
pub mod surface;
