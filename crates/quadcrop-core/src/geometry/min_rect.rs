//! Minimum-area bounding rectangle via rotating calipers.
//!
//! One side of the minimum-area enclosing rectangle of a convex polygon is
//! always flush with one of the polygon's edges. The solver therefore only
//! tests the orientations of the hull edges:
//!
//! 1. Collect each edge angle `θ = atan2(dy, dx)` normalized into `[0, π/2)`
//!    and drop repeats.
//! 2. For each angle, project the hull through the rotation matrix
//!    `R(θ) = [[cos θ, cos(θ − π/2)], [cos(θ + π/2), cos θ]]` and take the
//!    axis-aligned extents of the projected points.
//! 3. Keep the candidate with the smallest extent area. Ties keep the first
//!    candidate in edge order.
//! 4. Map the four extent corners back through `Rᵀ`.

use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use super::hull::convex_hull;
use super::point::Point2D;
use crate::error::CropError;

/// A 2×2 rotation matrix, stored row-major.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationMatrix(pub [[f64; 2]; 2]);

impl RotationMatrix {
    /// Build `R(θ)`, which maps a direction at angle θ onto the x axis.
    pub fn from_angle(theta: f64) -> Self {
        Self([
            [theta.cos(), (theta - FRAC_PI_2).cos()],
            [(theta + FRAC_PI_2).cos(), theta.cos()],
        ])
    }

    /// Apply `R` to a point (original space -> projected space).
    #[inline]
    pub fn rotate(&self, p: Point2D) -> Point2D {
        let [[a, b], [c, d]] = self.0;
        Point2D::new(a * p.x + b * p.y, c * p.x + d * p.y)
    }

    /// Apply `Rᵀ`, the inverse of [`rotate`](Self::rotate).
    #[inline]
    pub fn unrotate(&self, p: Point2D) -> Point2D {
        let [[a, b], [c, d]] = self.0;
        Point2D::new(a * p.x + c * p.y, b * p.x + d * p.y)
    }

    /// The angle θ this matrix was built from.
    pub fn angle(&self) -> f64 {
        self.0[0][1].atan2(self.0[0][0])
    }
}

/// An oriented rectangle enclosing a point set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingRect {
    /// Corners in original space, in the order
    /// `(max x, min y)`, `(min x, min y)`, `(min x, max y)`, `(max x, max y)`
    /// of the projected frame.
    pub corners: [Point2D; 4],
    /// Rotation used to project points into the rectangle's frame.
    pub rotation: RotationMatrix,
    /// Lower extent in the projected frame.
    pub min: Point2D,
    /// Upper extent in the projected frame.
    pub max: Point2D,
}

impl BoundingRect {
    fn from_extents(rotation: RotationMatrix, min: Point2D, max: Point2D) -> Self {
        let corners = [
            Point2D::new(max.x, min.y),
            Point2D::new(min.x, min.y),
            Point2D::new(min.x, max.y),
            Point2D::new(max.x, max.y),
        ]
        .map(|c| rotation.unrotate(c));

        Self {
            corners,
            rotation,
            min,
            max,
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Whether `p` lies inside the rectangle, inclusive, with slack `tolerance`.
    pub fn contains(&self, p: Point2D, tolerance: f64) -> bool {
        let q = self.rotation.rotate(p);
        q.x >= self.min.x - tolerance
            && q.x <= self.max.x + tolerance
            && q.y >= self.min.y - tolerance
            && q.y <= self.max.y + tolerance
    }
}

/// Normalize an angle into `[0, π/2)`.
fn quarter_turn_angle(theta: f64) -> f64 {
    let a = theta.rem_euclid(FRAC_PI_2);
    // rem_euclid rounds tiny negative inputs up to exactly π/2
    if a >= FRAC_PI_2 {
        0.0
    } else {
        a
    }
}

/// Distinct edge orientations of a closed polygon, in edge order.
pub fn edge_orientations(hull: &[Point2D]) -> Vec<f64> {
    let n = hull.len();
    let mut angles: Vec<f64> = Vec::with_capacity(n);
    for i in 0..n {
        let edge = hull[(i + 1) % n] - hull[i];
        if edge == Point2D::ZERO {
            continue;
        }
        let angle = quarter_turn_angle(edge.angle());
        if !angles.contains(&angle) {
            angles.push(angle);
        }
    }
    angles
}

/// Project `points` through `rotation` and take the axis-aligned extents.
fn project_extents(points: &[Point2D], rotation: RotationMatrix) -> (Point2D, Point2D) {
    let mut min = Point2D::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point2D::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for &p in points {
        let q = rotation.rotate(p);
        min.x = min.x.min(q.x);
        min.y = min.y.min(q.y);
        max.x = max.x.max(q.x);
        max.y = max.y.max(q.y);
    }
    (min, max)
}

/// Enclosing rectangles for every distinct hull edge orientation.
pub fn candidate_rects(hull: &[Point2D]) -> Vec<BoundingRect> {
    edge_orientations(hull)
        .into_iter()
        .map(|angle| {
            let rotation = RotationMatrix::from_angle(angle);
            let (min, max) = project_extents(hull, rotation);
            BoundingRect::from_extents(rotation, min, max)
        })
        .collect()
}

/// Find the minimum-area rectangle enclosing a convex hull.
///
/// # Errors
///
/// Returns [`CropError::DegenerateHull`] when the hull has fewer than three
/// points, since no orientation is defined.
pub fn min_bounding_rect(hull: &[Point2D]) -> Result<BoundingRect, CropError> {
    if hull.len() < 3 {
        return Err(CropError::DegenerateHull {
            distinct: hull.len(),
        });
    }

    let mut best: Option<BoundingRect> = None;
    for candidate in candidate_rects(hull) {
        let smaller = match &best {
            None => true,
            Some(current) => candidate.area() < current.area(),
        };
        if smaller {
            best = Some(candidate);
        }
    }

    best.ok_or(CropError::DegenerateHull {
        distinct: hull.len(),
    })
}

/// Hull an arbitrary point cloud and fit the minimum-area rectangle around it.
///
/// # Errors
///
/// [`CropError::NoPointsDetected`] for an empty cloud,
/// [`CropError::NonFinitePoint`] if any coordinate is NaN or infinite, and
/// [`CropError::DegenerateHull`] when all points are identical or collinear.
pub fn find_min_bounding_rect(points: &[Point2D]) -> Result<BoundingRect, CropError> {
    if points.is_empty() {
        return Err(CropError::NoPointsDetected);
    }
    if let Some(p) = points.iter().find(|p| !p.is_finite()) {
        return Err(CropError::NonFinitePoint { x: p.x, y: p.y });
    }
    min_bounding_rect(&convex_hull(points))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
