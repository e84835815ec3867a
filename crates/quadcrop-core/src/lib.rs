//! QuadCrop Core - document boundary editing library
//!
//! This crate provides the geometry behind a document crop overlay: fitting a
//! quadrilateral to detector output, keeping four draggable corners and their
//! edge midpoints consistent and inside the image, and converting the result
//! from screen to image coordinates for the crop routine.
//!
//! # Module Structure
//!
//! - `geometry` - points, convex hull, minimum-area rectangle, role assignment
//! - `detection` - detector output and its normalization to one quad
//! - `corners` - corner/midpoint drag constraints
//! - `transform` - layout zoom, view/image conversion, crop requests
//! - `editor` - the per-overlay session tying it all together
//! - `external` - traits for the platform detection and crop routines

pub mod config;
pub mod corners;
pub mod detection;
pub mod editor;
pub mod error;
pub mod external;
pub mod geometry;
pub mod transform;

pub use config::EditorConfig;
pub use corners::{Corner, CornerSet, CORNER_COUNT};
pub use detection::{DetectedBox, DetectionResult};
pub use editor::CropEditor;
pub use error::CropError;
pub use external::{
    find_and_crop, CroppedImage, DocumentCropper, DocumentDetector, ImageRef,
};
pub use geometry::{
    convex_hull, find_min_bounding_rect, min_bounding_rect, BoundingRect, CornerRole, Point2D,
    Quad, RotationMatrix, Side, Vector2D,
};
pub use transform::{CropRequest, LayoutTransform, Size};
