//! Role-labelled quadrilaterals and role assignment.
//!
//! A document boundary is four points. Which one is "top-left" is never
//! stored: it is derived from the positions every time it is needed, because
//! a user may drag corners past each other.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::point::Point2D;

/// Semantic position of a corner within the quadrilateral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CornerRole {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl CornerRole {
    pub const ALL: [CornerRole; 4] = [
        CornerRole::TopLeft,
        CornerRole::TopRight,
        CornerRole::BottomLeft,
        CornerRole::BottomRight,
    ];
}

/// An edge of the quadrilateral, each carrying one draggable midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    /// Position of this side's midpoint in a `[_; 4]` midpoint array.
    pub fn index(self) -> usize {
        match self {
            Side::Top => 0,
            Side::Right => 1,
            Side::Bottom => 2,
            Side::Left => 3,
        }
    }

    /// The two corners joined by this side.
    pub fn corners(self) -> (CornerRole, CornerRole) {
        match self {
            Side::Top => (CornerRole::TopLeft, CornerRole::TopRight),
            Side::Right => (CornerRole::TopRight, CornerRole::BottomRight),
            Side::Bottom => (CornerRole::BottomLeft, CornerRole::BottomRight),
            Side::Left => (CornerRole::TopLeft, CornerRole::BottomLeft),
        }
    }

    /// Top and bottom sides only move vertically; left and right only
    /// horizontally.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Side::Top | Side::Bottom)
    }
}

/// Four points labelled by corner role.
///
/// Serializes as `{topLeft, topRight, bottomLeft, bottomRight}`, the shape
/// used by the detection and crop routines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quad {
    pub top_left: Point2D,
    pub top_right: Point2D,
    pub bottom_left: Point2D,
    pub bottom_right: Point2D,
}

impl Quad {
    /// Label four unordered points using [`assign_roles`].
    pub fn from_unordered(points: [Point2D; 4]) -> Self {
        let slots = assign_roles(&points);
        Self {
            top_left: points[slots.top_left],
            top_right: points[slots.top_right],
            bottom_left: points[slots.bottom_left],
            bottom_right: points[slots.bottom_right],
        }
    }

    pub fn get(&self, role: CornerRole) -> Point2D {
        match role {
            CornerRole::TopLeft => self.top_left,
            CornerRole::TopRight => self.top_right,
            CornerRole::BottomLeft => self.bottom_left,
            CornerRole::BottomRight => self.bottom_right,
        }
    }

    /// Apply `f` to every corner.
    pub fn map(self, mut f: impl FnMut(Point2D) -> Point2D) -> Self {
        Self {
            top_left: f(self.top_left),
            top_right: f(self.top_right),
            bottom_left: f(self.bottom_left),
            bottom_right: f(self.bottom_right),
        }
    }

    pub fn scaled(self, factor: f64) -> Self {
        self.map(|p| p * factor)
    }

    /// Mean of the two corners on `side`.
    pub fn midpoint(&self, side: Side) -> Point2D {
        let (a, b) = side.corners();
        self.get(a).midpoint(self.get(b))
    }

    /// Corners in drawing order: top-left, top-right, bottom-right,
    /// bottom-left. This winding never self-intersects for a convex quad.
    pub fn polygon(&self) -> [Point2D; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    /// SVG-style points list: `"x1,y1 x2,y2 x3,y3 x4,y4"` in
    /// [`polygon`](Self::polygon) order.
    pub fn points_string(&self) -> String {
        let mut out = String::new();
        for (i, p) in self.polygon().iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            // Writing into a String cannot fail
            let _ = write!(out, "{},{}", p.x, p.y);
        }
        out
    }
}

/// Slot index occupied by each role, as produced by [`assign_roles`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleSlots {
    pub top_left: usize,
    pub top_right: usize,
    pub bottom_left: usize,
    pub bottom_right: usize,
}

impl RoleSlots {
    pub fn slot(&self, role: CornerRole) -> usize {
        match role {
            CornerRole::TopLeft => self.top_left,
            CornerRole::TopRight => self.top_right,
            CornerRole::BottomLeft => self.bottom_left,
            CornerRole::BottomRight => self.bottom_right,
        }
    }
}

/// Order two slots so the one with the smaller x comes first.
fn left_right(points: &[Point2D; 4], a: usize, b: usize) -> (usize, usize) {
    if points[b].x < points[a].x {
        (b, a)
    } else {
        (a, b)
    }
}

/// Decide which slot plays which corner role.
///
/// The two points with the smallest y form the top pair and the other two
/// the bottom pair; within each pair the smaller x is the left corner. Equal
/// y values are ordered by x, so the result is deterministic for any input.
pub fn assign_roles(points: &[Point2D; 4]) -> RoleSlots {
    let mut order = [0usize, 1, 2, 3];
    order.sort_by(|&a, &b| {
        points[a]
            .y
            .total_cmp(&points[b].y)
            .then(points[a].x.total_cmp(&points[b].x))
    });

    let (top_left, top_right) = left_right(points, order[0], order[1]);
    let (bottom_left, bottom_right) = left_right(points, order[2], order[3]);

    RoleSlots {
        top_left,
        top_right,
        bottom_left,
        bottom_right,
    }
}
