//! Distance estimates for grid points.
//!
//! Picking the right estimate for the movement rules matters: an estimate
//! that can overestimate the real walking cost makes the search give up
//! optimality. [`chebyshev`] is exact for eight-way movement at uniform
//! cost, [`manhattan`] for four-way, and [`euclidean`] never overestimates
//! when diagonal moves cost √2.

use cairn_core::Point;

/// Manhattan (L1) distance: moves counted along the axes.
#[inline]
pub fn manhattan(a: Point, b: Point) -> f32 {
    ((a.x - b.x).abs() + (a.y - b.y).abs()) as f32
}

/// Chebyshev (L∞) distance: moves counted when diagonals are free.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> f32 {
    (a.x - b.x).abs().max((a.y - b.y).abs()) as f32
}

/// Euclidean (L2) distance.
#[inline]
pub fn euclidean(a: Point, b: Point) -> f32 {
    let dx = (a.x - b.x) as f32;
    let dy = (a.y - b.y) as f32;
    (dx * dx + dy * dy).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_distances() {
        let a = Point::new(1, 2);
        let b = Point::new(4, -2);
        assert_eq!(manhattan(a, b), 7.0);
        assert_eq!(chebyshev(a, b), 4.0);
        assert!((euclidean(a, b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn distances_are_symmetric_and_zero_at_identity() {
        let a = Point::new(-3, 8);
        let b = Point::new(2, 1);
        assert_eq!(manhattan(a, b), manhattan(b, a));
        assert_eq!(chebyshev(a, b), chebyshev(b, a));
        assert_eq!(euclidean(a, b), euclidean(b, a));
        assert_eq!(manhattan(a, a), 0.0);
        assert_eq!(chebyshev(a, a), 0.0);
        assert_eq!(euclidean(a, a), 0.0);
    }

    #[test]
    fn chebyshev_never_exceeds_manhattan() {
        for x in -4..4 {
            for y in -4..4 {
                let p = Point::new(x, y);
                let o = Point::new(0, 0);
                assert!(chebyshev(o, p) <= euclidean(o, p) + 1e-6);
                assert!(euclidean(o, p) <= manhattan(o, p) + 1e-6);
            }
        }
    }
}
