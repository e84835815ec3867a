//! View/image coordinate transform.
//!
//! The image is displayed with a uniform "contain" fit: scaled by
//! `zoom = min(view_w / image_w, view_h / image_h)` and centred in the view.
//! Corner positions live in the image's own layout box (the scaled image,
//! without the centring offsets), so converting to image pixels is a pure
//! inverse scale.

use serde::{Deserialize, Serialize};

use crate::error::CropError;
use crate::geometry::Point2D;

/// Width and height of a view or an image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Check that both dimensions are positive and finite.
    pub fn validated(self) -> Result<Self, CropError> {
        let ok = |v: f64| v.is_finite() && v > 0.0;
        if ok(self.width) && ok(self.height) {
            Ok(self)
        } else {
            Err(CropError::InvalidDimensions {
                width: self.width,
                height: self.height,
            })
        }
    }
}

/// Result of one layout pass. Cached until the view size changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutTransform {
    /// View units per image pixel.
    pub zoom: f64,
    /// Width of the displayed image box, in view units.
    pub image_layout_width: f64,
    /// Height of the displayed image box, in view units.
    pub image_layout_height: f64,
    /// Left/right inset of the image box within the view, whole units.
    pub offset_horizontal: f64,
    /// Top/bottom inset of the image box within the view, whole units.
    pub offset_vertical: f64,
}

impl LayoutTransform {
    /// Fit `image` into `view`.
    ///
    /// # Errors
    ///
    /// [`CropError::InvalidDimensions`] if either size is zero, negative or
    /// not finite.
    pub fn compute(view: Size, image: Size) -> Result<Self, CropError> {
        let view = view.validated()?;
        let image = image.validated()?;

        let zoom = (view.width / image.width).min(view.height / image.height);
        let offset_horizontal = ((view.width - image.width * zoom) / 2.0).round().max(0.0);
        let offset_vertical = ((view.height - image.height * zoom) / 2.0).round().max(0.0);

        Ok(Self {
            zoom,
            image_layout_width: view.width - offset_horizontal * 2.0,
            image_layout_height: view.height - offset_vertical * 2.0,
            offset_horizontal,
            offset_vertical,
        })
    }

    /// Size of the displayed image box.
    pub fn layout_size(&self) -> Size {
        Size::new(self.image_layout_width, self.image_layout_height)
    }

    /// Convert a point in the image layout box to source image pixels.
    #[inline]
    pub fn to_image_space(&self, view_point: Point2D) -> Point2D {
        view_point * (1.0 / self.zoom)
    }

    /// Convert source image pixels to a point in the image layout box.
    #[inline]
    pub fn to_view_space(&self, image_point: Point2D) -> Point2D {
        image_point * self.zoom
    }
}
