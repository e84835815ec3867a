//! Corner and midpoint constraint system.
//!
//! Four draggable corners and four edge midpoints. Corners are identified by
//! their array slot, which a drag gesture binds to when it starts; the corner
//! *role* (top-left, ...) is derived from current positions on every query,
//! so corners may be dragged past each other freely.
//!
//! [`CornerSet`] is an immutable snapshot. Every operation returns a new
//! state, which the caller swaps in.
//!
//! # Drag deltas
//!
//! Gesture systems report the displacement since the gesture started, not
//! since the previous event. Each corner remembers the last delta it applied,
//! and a move adds only the difference:
//!
//! ```text
//! position = clamp(position + (delta - previous_delta))
//! ```
//!
//! [`CornerSet::release`] forgets the previous deltas when a gesture ends.

use log::trace;
use serde::{Deserialize, Serialize};

use crate::error::CropError;
use crate::geometry::{assign_roles, CornerRole, Point2D, Quad, RoleSlots, Side, Vector2D};
use crate::transform::Size;

/// Number of corners (and of midpoints).
pub const CORNER_COUNT: usize = 4;

/// Role each slot takes when corners are placed from a quad.
const PLACEMENT_ROLES: [CornerRole; CORNER_COUNT] = [
    CornerRole::TopLeft,
    CornerRole::TopRight,
    CornerRole::BottomLeft,
    CornerRole::BottomRight,
];

/// A draggable corner handle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Corner {
    /// Position in the image layout box.
    pub position: Point2D,
    /// Cumulative gesture delta already applied; zero when no drag is active.
    pub drag_delta: Vector2D,
}

impl Corner {
    pub fn is_dragging(&self) -> bool {
        self.drag_delta != Vector2D::ZERO
    }
}

/// Snapshot of all corner and midpoint positions within a layout box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerSet {
    corners: [Corner; CORNER_COUNT],
    midpoints: [Point2D; CORNER_COUNT],
    bounds: Size,
}

impl CornerSet {
    /// All corners at the origin of a layout box of size `bounds`.
    pub fn new(bounds: Size) -> Self {
        Self {
            corners: [Corner::default(); CORNER_COUNT],
            midpoints: [Point2D::ZERO; CORNER_COUNT],
            bounds,
        }
    }

    /// Corners inset by `padding` from each edge of `bounds`.
    pub fn inset(bounds: Size, padding: f64) -> Self {
        let (w, h) = (bounds.width, bounds.height);
        Self::new(bounds).placed(Quad {
            top_left: Point2D::new(padding, padding),
            top_right: Point2D::new(w - padding, padding),
            bottom_left: Point2D::new(padding, h - padding),
            bottom_right: Point2D::new(w - padding, h - padding),
        })
    }

    /// Move every corner to the matching point of `quad`.
    ///
    /// Slots 0..4 receive top-left, top-right, bottom-left and bottom-right.
    /// Positions are clamped into the layout box and drag deltas reset.
    #[must_use]
    pub fn placed(mut self, quad: Quad) -> Self {
        for (corner, role) in self.corners.iter_mut().zip(PLACEMENT_ROLES) {
            corner.position = quad
                .get(role)
                .clamp_to(self.bounds.width, self.bounds.height);
            corner.drag_delta = Vector2D::ZERO;
        }
        self.refresh_midpoints()
    }

    pub fn bounds(&self) -> Size {
        self.bounds
    }

    pub fn corners(&self) -> &[Corner; CORNER_COUNT] {
        &self.corners
    }

    /// Corner positions in slot order.
    pub fn positions(&self) -> [Point2D; CORNER_COUNT] {
        self.corners.map(|c| c.position)
    }

    /// Midpoint positions, indexed by [`Side::index`].
    pub fn midpoints(&self) -> &[Point2D; CORNER_COUNT] {
        &self.midpoints
    }

    pub fn midpoint(&self, side: Side) -> Point2D {
        self.midpoints[side.index()]
    }

    /// Which slot currently plays which role.
    pub fn role_slots(&self) -> RoleSlots {
        assign_roles(&self.positions())
    }

    /// Corner positions labelled by their current roles.
    pub fn roles(&self) -> Quad {
        Quad::from_unordered(self.positions())
    }

    /// Apply one step of a corner drag.
    ///
    /// `dx`/`dy` are cumulative from the start of the gesture.
    ///
    /// # Errors
    ///
    /// [`CropError::UnknownCorner`] if `slot` is not in `0..4`.
    pub fn move_corner(&self, slot: usize, dx: f64, dy: f64) -> Result<Self, CropError> {
        check_slot(slot)?;
        Ok(self.step(slot, Vector2D::new(dx, dy)))
    }

    /// Apply one step of a midpoint drag.
    ///
    /// Top and bottom midpoints move their two corners vertically only; left
    /// and right midpoints horizontally only. Each corner goes through the
    /// same clamped step as a corner drag.
    #[must_use]
    pub fn move_midpoint(&self, side: Side, dx: f64, dy: f64) -> Self {
        let slots = self.role_slots();
        let (a, b) = side.corners();
        let delta = if side.is_horizontal() {
            Vector2D::new(0.0, dy)
        } else {
            Vector2D::new(dx, 0.0)
        };

        self.step(slots.slot(a), delta).step(slots.slot(b), delta)
    }

    /// Start a drag on one corner, discarding any stale delta.
    ///
    /// # Errors
    ///
    /// [`CropError::UnknownCorner`] if `slot` is not in `0..4`.
    pub fn grant(&self, slot: usize) -> Result<Self, CropError> {
        check_slot(slot)?;
        let mut next = *self;
        next.corners[slot].drag_delta = Vector2D::ZERO;
        Ok(next)
    }

    /// End the active gesture. Safe to call when nothing is being dragged.
    #[must_use]
    pub fn release(&self) -> Self {
        let mut next = *self;
        for corner in &mut next.corners {
            corner.drag_delta = Vector2D::ZERO;
        }
        next
    }

    /// Corner positions in polygon order: top-left, top-right, bottom-right,
    /// bottom-left.
    pub fn overlay_polygon(&self) -> [Point2D; CORNER_COUNT] {
        self.roles().polygon()
    }

    /// The overlay polygon as `"x1,y1 x2,y2 x3,y3 x4,y4"`.
    pub fn overlay_points(&self) -> String {
        self.roles().points_string()
    }

    fn step(mut self, slot: usize, delta: Vector2D) -> Self {
        let corner = &mut self.corners[slot];
        let target = corner.position + (delta - corner.drag_delta);
        corner.position = target.clamp_to(self.bounds.width, self.bounds.height);
        corner.drag_delta = delta;
        trace!("corner {} -> ({}, {})", slot, corner.position.x, corner.position.y);
        self.refresh_midpoints()
    }

    fn refresh_midpoints(mut self) -> Self {
        let roles = self.roles();
        for side in Side::ALL {
            self.midpoints[side.index()] = roles.midpoint(side);
        }
        self
    }
}

fn check_slot(slot: usize) -> Result<(), CropError> {
    if slot < CORNER_COUNT {
        Ok(())
    } else {
        Err(CropError::UnknownCorner(slot))
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Gesture {
        Corner(usize, f64, f64),
        Midpoint(Side, f64, f64),
        Release,
    }

    fn side_strategy() -> impl Strategy<Value = Side> {
        prop_oneof![
            Just(Side::Top),
            Just(Side::Right),
            Just(Side::Bottom),
            Just(Side::Left),
        ]
    }

    fn gesture_strategy() -> impl Strategy<Value = Gesture> {
        prop_oneof![
            (0usize..4, -2000.0f64..2000.0, -2000.0f64..2000.0)
                .prop_map(|(s, dx, dy)| Gesture::Corner(s, dx, dy)),
            (side_strategy(), -2000.0f64..2000.0, -2000.0f64..2000.0)
                .prop_map(|(s, dx, dy)| Gesture::Midpoint(s, dx, dy)),
            Just(Gesture::Release),
        ]
    }

    fn apply(set: CornerSet, gesture: &Gesture) -> CornerSet {
        match *gesture {
            Gesture::Corner(slot, dx, dy) => set.move_corner(slot, dx, dy).unwrap(),
            Gesture::Midpoint(side, dx, dy) => set.move_midpoint(side, dx, dy),
            Gesture::Release => set.release(),
        }
    }

    proptest! {
        /// Property: No sequence of moves takes a corner outside the layout box.
        #[test]
        fn prop_corners_stay_in_bounds(
            width in 1.0f64..2000.0,
            height in 1.0f64..2000.0,
            gestures in prop::collection::vec(gesture_strategy(), 1..60),
        ) {
            let mut set = CornerSet::inset(Size::new(width, height), 50.0);
            for g in &gestures {
                set = apply(set, g);
                for p in set.positions() {
                    prop_assert!(p.x >= 0.0 && p.x <= width, "x {} outside 0..{}", p.x, width);
                    prop_assert!(p.y >= 0.0 && p.y <= height, "y {} outside 0..{}", p.y, height);
                }
            }
        }

        /// Property: Midpoints always equal the mean of their two corners.
        #[test]
        fn prop_midpoints_consistent(
            gestures in prop::collection::vec(gesture_strategy(), 1..60),
        ) {
            let mut set = CornerSet::inset(Size::new(800.0, 600.0), 50.0);
            for g in &gestures {
                set = apply(set, g);
                let roles = set.roles();
                for side in Side::ALL {
                    let (a, b) = side.corners();
                    prop_assert_eq!(set.midpoint(side), roles.get(a).midpoint(roles.get(b)));
                }
            }
        }

        /// Property: Roles always split into the two smallest-y corners on top.
        #[test]
        fn prop_roles_split_by_y(
            gestures in prop::collection::vec(gesture_strategy(), 1..30),
        ) {
            let mut set = CornerSet::inset(Size::new(800.0, 600.0), 50.0);
            for g in &gestures {
                set = apply(set, g);
            }
            let roles = set.roles();
            let top_max = roles.top_left.y.max(roles.top_right.y);
            let bottom_min = roles.bottom_left.y.min(roles.bottom_right.y);
            prop_assert!(top_max <= bottom_min);
            prop_assert!(roles.top_left.x <= roles.top_right.x);
            prop_assert!(roles.bottom_left.x <= roles.bottom_right.x);
        }
    }
}
