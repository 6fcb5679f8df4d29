//! # Event Extraction Module
//!
//! Higher-level movement events derived from frame-level metrics.
//!
//! - `sprint` - high-intensity segment detection and distance by intensity band

pub mod sprint;

pub use sprint::{extract_sprints, movement_intensity, MovementIntensity, SprintSegment};
