//! Crop requests handed to the external crop routine.
//!
//! The crop routine receives the four document corners in source image
//! pixels plus the image size. The perspective correction itself happens
//! outside this crate.

use serde::{Deserialize, Serialize};

use super::layout::Size;
use crate::geometry::{Point2D, Quad};

/// Image-space corners and dimensions for one crop call.
///
/// Serializes as `{topLeft, topRight, bottomLeft, bottomRight, width, height}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropRequest {
    pub top_left: Point2D,
    pub top_right: Point2D,
    pub bottom_left: Point2D,
    pub bottom_right: Point2D,
    pub width: f64,
    pub height: f64,
}

impl CropRequest {
    pub fn new(corners: Quad, image: Size) -> Self {
        Self {
            top_left: corners.top_left,
            top_right: corners.top_right,
            bottom_left: corners.bottom_left,
            bottom_right: corners.bottom_right,
            width: image.width,
            height: image.height,
        }
    }

    /// The four corners as a quad.
    pub fn corners(&self) -> Quad {
        Quad {
            top_left: self.top_left,
            top_right: self.top_right,
            bottom_left: self.bottom_left,
            bottom_right: self.bottom_right,
        }
    }

    /// Replace the corners, keeping the image dimensions.
    pub fn with_corners(self, corners: Quad) -> Self {
        Self::new(corners, Size::new(self.width, self.height))
    }

    /// Size of the rectified output a perspective crop would produce.
    ///
    /// Width is the longer of the top and bottom edges, height the longer of
    /// the left and right edges, truncated to whole pixels.
    pub fn output_size(&self) -> (u32, u32) {
        let top = self.top_left.distance(self.top_right);
        let bottom = self.bottom_left.distance(self.bottom_right);
        let left = self.top_left.distance(self.bottom_left);
        let right = self.top_right.distance(self.bottom_right);

        (top.max(bottom) as u32, left.max(right) as u32)
    }
}
