//! Core types shared across the Strata diagram layout engine.
//!
//! This crate provides the foundational values every layout consumes:
//! - Cell geometry and stacking orientation
//! - Resolved cell styles
//! - Error types

pub mod errors;
pub mod geometry;
pub mod style;

pub use errors::*;
pub use geometry::*;
pub use style::CellStyle;
