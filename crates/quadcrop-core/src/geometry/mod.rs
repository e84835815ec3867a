//! Geometry primitives and the bounding-quadrilateral solver.
//!
//! - `point` - 2D point/vector value type
//! - `hull` - convex hull of an unordered point cloud
//! - `min_rect` - minimum-area enclosing rectangle (rotating calipers)
//! - `quad` - role-labelled quadrilaterals and role assignment

pub mod hull;
pub mod min_rect;
pub mod point;
pub mod quad;

pub use hull::{convex_hull, signed_area2};
pub use min_rect::{
    candidate_rects, edge_orientations, find_min_bounding_rect, min_bounding_rect, BoundingRect,
    RotationMatrix,
};
pub use point::{Point2D, Vector2D};
pub use quad::{assign_roles, CornerRole, Quad, RoleSlots, Side};
