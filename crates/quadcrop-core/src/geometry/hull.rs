//! Convex hull construction.
//!
//! Uses Andrew's monotone chain: points are sorted lexicographically, then the
//! lower and upper chains are built with a cross-product turn test. Runs in
//! O(n log n) and tolerates duplicate points.
//!
//! The returned polygon is counter-clockwise in the mathematical sense
//! (positive signed area). With y pointing down, as on screen, it appears
//! clockwise.

use super::point::Point2D;

/// Signed turn of `a -> b -> c`. Positive for a counter-clockwise turn, zero
/// when the three points are collinear.
#[inline]
fn turn(a: Point2D, b: Point2D, c: Point2D) -> f64 {
    (b - a).cross(c - a)
}

/// Build the convex hull of an unordered point set.
///
/// Interior points and points lying on a hull edge are dropped. Degenerate
/// input collapses: identical points yield one point and collinear points
/// yield the two extremes. Callers that need a polygon must check for at
/// least 3 points.
///
/// # Example
///
/// ```ignore
/// let square = [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (5.0, 5.0)]
///     .map(|(x, y)| Point2D::new(x, y));
/// assert_eq!(convex_hull(&square).len(), 4);
/// ```
pub fn convex_hull(points: &[Point2D]) -> Vec<Point2D> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    sorted.dedup();

    if sorted.len() < 3 {
        return sorted;
    }

    let mut lower: Vec<Point2D> = Vec::with_capacity(sorted.len());
    for &p in &sorted {
        while lower.len() >= 2 && turn(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0.0 {
            lower.pop();
        }
        lower.push(p);
    }

    let mut upper: Vec<Point2D> = Vec::with_capacity(sorted.len());
    for &p in sorted.iter().rev() {
        while upper.len() >= 2 && turn(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0.0 {
            upper.pop();
        }
        upper.push(p);
    }

    // The last point of each chain is the first point of the other.
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// Twice the signed area of a polygon (shoelace formula).
pub fn signed_area2(polygon: &[Point2D]) -> f64 {
    let n = polygon.len();
    (0..n)
        .map(|i| polygon[i].cross(polygon[(i + 1) % n]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point2D> {
        coords.iter().map(|&(x, y)| Point2D::new(x, y)).collect()
    }

    #[test]
    fn test_square_hull_keeps_all_corners() {
        let input = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        let hull = convex_hull(&input);

        assert_eq!(hull.len(), 4);
        for p in &input {
            assert!(hull.contains(p), "hull should keep corner {:?}", p);
        }
    }

    #[test]
    fn test_hull_is_counter_clockwise() {
        let input = pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        let hull = convex_hull(&input);
        assert!(signed_area2(&hull) > 0.0);
        assert!((signed_area2(&hull) - 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_interior_points_removed() {
        let input = pts(&[
            (0.0, 0.0),
            (5.0, 5.0),
            (10.0, 0.0),
            (3.0, 2.0),
            (10.0, 10.0),
            (0.0, 10.0),
        ]);
        let hull = convex_hull(&input);
        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&Point2D::new(5.0, 5.0)));
        assert!(!hull.contains(&Point2D::new(3.0, 2.0)));
    }

    #[test]
    fn test_collinear_edge_points_removed() {
        let input = pts(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        let hull = convex_hull(&input);
        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&Point2D::new(5.0, 0.0)));
    }

    #[test]
    fn test_duplicates_tolerated() {
        let input = pts(&[
            (0.0, 0.0),
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 0.0),
            (2.0, 3.0),
            (2.0, 3.0),
        ]);
        assert_eq!(convex_hull(&input).len(), 3);
    }

    #[test]
    fn test_identical_points_degenerate() {
        let input = pts(&[(1.0, 1.0), (1.0, 1.0), (1.0, 1.0)]);
        assert_eq!(convex_hull(&input), pts(&[(1.0, 1.0)]));
    }

    #[test]
    fn test_collinear_points_degenerate() {
        let input = pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
        let hull = convex_hull(&input);
        assert_eq!(hull, pts(&[(0.0, 0.0), (3.0, 3.0)]));
    }

    #[test]
    fn test_empty_input() {
        assert!(convex_hull(&[]).is_empty());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
