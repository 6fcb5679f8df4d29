//! # Geometry & Statistics Primitives
//!
//! Stateless helpers shared by the metrics calculator and the stats
//! aggregator. Coordinates are image-space pixels; nothing here assumes a
//! real-world unit.

use nalgebra::{Point2, Vector2};

/// Image-space point.
pub type Point = Point2<f32>;

/// Vectors shorter than this are treated as degenerate.
pub const MIN_VECTOR_NORM: f32 = 1e-6;

/// Angle at vertex `b` formed by rays `b→a` and `b→c`, in degrees.
///
/// Returns `None` when either ray has near-zero length (coincident points),
/// so callers record "no measurement" instead of propagating NaN.
pub fn angle_degrees(a: &Point, b: &Point, c: &Point) -> Option<f32> {
    let ba: Vector2<f32> = a - b;
    let bc: Vector2<f32> = c - b;

    let norm_ba = ba.norm();
    let norm_bc = bc.norm();
    if norm_ba < MIN_VECTOR_NORM || norm_bc < MIN_VECTOR_NORM {
        return None;
    }

    // Rounding can push the cosine slightly outside [-1, 1]
    let cos = (ba.dot(&bc) / (norm_ba * norm_bc)).clamp(-1.0, 1.0);
    let angle = cos.acos().to_degrees();
    angle.is_finite().then_some(angle)
}

/// Euclidean distance. `distance(p, p)` is exactly 0.
#[inline]
pub fn distance(p: &Point, q: &Point) -> f32 {
    nalgebra::distance(p, q)
}

/// Midpoint of two points.
#[inline]
pub fn midpoint(p: &Point, q: &Point) -> Point {
    nalgebra::center(p, q)
}

/// Arithmetic mean, `None` when empty.
pub fn mean(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f32>() / values.len() as f32)
    }
}

/// Sample standard deviation (divides by `n - 1`). Returns 0 for `n <= 1`.
pub fn stddev(values: &[f32]) -> f32 {
    let n = values.len();
    if n <= 1 {
        return 0.0;
    }

    let avg = values.iter().sum::<f32>() / n as f32;
    let variance = values.iter().map(|&v| (v - avg).powi(2)).sum::<f32>() / (n - 1) as f32;
    variance.sqrt()
}

/// `clamp(x / cap, 0, 1)`. Non-finite input maps to 0.
#[inline]
pub fn normalize(x: f32, cap: f32) -> f32 {
    let ratio = x / cap;
    if ratio.is_finite() {
        ratio.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Clamp a score to `[0, 100]`, collapsing NaN/inf to 0.
#[inline]
pub fn clamp_score(score: f32) -> f32 {
    if score.is_finite() {
        score.clamp(0.0, 100.0)
    } else {
        0.0
    }
}
