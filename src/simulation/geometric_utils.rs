//! Geometric utility functions for distance calculations and spatial operations.

use geo::algorithm::Distance;
use geo::{Euclidean, Point};
use ndarray::Array1;

/// Magnitudes below this are treated as zero when normalising.
const MIN_NORM: f32 = 1e-6;

fn as_point(v: &Array1<f32>) -> Point<f32> {
    Point::new(v[0], v[1])
}

/// Euclidean distance between two 2D positions.
///
/// # Arguments
///
/// * `a` - First position
/// * `b` - Second position
pub fn distance(a: &Array1<f32>, b: &Array1<f32>) -> f32 {
    Euclidean.distance(as_point(a), as_point(b))
}

/// Length of a 2D vector.
pub fn magnitude(v: &Array1<f32>) -> f32 {
    v[0].hypot(v[1])
}

/// Unit vector pointing from `from` to `to`.
///
/// Returns `None` when the two points coincide, so callers skip the update
/// instead of dividing by zero.
pub fn direction(from: &Array1<f32>, to: &Array1<f32>) -> Option<Array1<f32>> {
    let delta = to - from;
    let length = magnitude(&delta);
    if length < MIN_NORM {
        return None;
    }
    Some(delta / length)
}

/// Midpoint of two positions.
pub fn midpoint(a: &Array1<f32>, b: &Array1<f32>) -> Array1<f32> {
    (a + b) / 2.0
}

/// Heading of a velocity vector in radians, measured from the +x axis.
pub fn heading(v: &Array1<f32>) -> f32 {
    v[1].atan2(v[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let a = Array1::from_vec(vec![0.0, 0.0]);
        let b = Array1::from_vec(vec![3.0, 4.0]);
        assert!((distance(&a, &b) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn direction_of_coincident_points_is_none() {
        let a = Array1::from_vec(vec![1.0, 1.0]);
        assert!(direction(&a, &a).is_none());
    }

    #[test]
    fn direction_is_normalised() {
        let a = Array1::from_vec(vec![0.0, 0.0]);
        let b = Array1::from_vec(vec![0.0, -7.0]);
        let d = direction(&a, &b).unwrap();
        assert!(d[0].abs() < 1e-6);
        assert!((d[1] + 1.0).abs() < 1e-6);
    }
}
