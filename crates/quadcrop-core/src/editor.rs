//! Interactive crop editor session.
//!
//! [`CropEditor`] owns everything a crop overlay needs between events: the
//! source image size, the cached layout transform, the corner snapshot and
//! the loading flag. The host forwards layout, detection, drag and crop
//! events to it and renders whatever it reports back.
//!
//! # Event Flow
//!
//! 1. `on_layout` when the display area is (re)measured
//! 2. `apply_detection` / `detect_with` once the detector answers
//! 3. `grant` / `move_corner` / `move_midpoint` / `release` while dragging
//! 4. `crop_request` / `crop_with` when the user confirms

use log::{debug, warn};

use crate::config::EditorConfig;
use crate::corners::{Corner, CornerSet, CORNER_COUNT};
use crate::detection::DetectionResult;
use crate::error::CropError;
use crate::external::{self, CroppedImage, DocumentCropper, DocumentDetector, ImageRef};
use crate::geometry::{Point2D, Quad, Side};
use crate::transform::{CropRequest, LayoutTransform, Size};

/// State of one crop overlay.
#[derive(Debug, Clone)]
pub struct CropEditor {
    config: EditorConfig,
    image_size: Size,
    view_size: Option<Size>,
    layout: Option<LayoutTransform>,
    corners: CornerSet,
    loading: bool,
}

impl CropEditor {
    /// Create an editor for an image of `image_size` pixels.
    ///
    /// Corners start at the origin until the first layout. The editor is
    /// loading (crop disabled) until a detection result arrives when
    /// `config.detect_on_load` is set.
    ///
    /// # Errors
    ///
    /// [`CropError::InvalidDimensions`] for a zero, negative or non-finite size.
    pub fn new(image_size: Size, config: EditorConfig) -> Result<Self, CropError> {
        Ok(Self {
            config,
            image_size: image_size.validated()?,
            view_size: None,
            layout: None,
            corners: CornerSet::new(Size::default()),
            loading: config.detect_on_load,
        })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn image_size(&self) -> Size {
        self.image_size
    }

    /// The current layout, if one has happened.
    pub fn layout(&self) -> Option<&LayoutTransform> {
        self.layout.as_ref()
    }

    pub fn zoom(&self) -> Option<f64> {
        self.layout.map(|l| l.zoom)
    }

    /// Whether a detection result is still awaited.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn corner_set(&self) -> &CornerSet {
        &self.corners
    }

    pub fn corners(&self) -> &[Corner; CORNER_COUNT] {
        self.corners.corners()
    }

    pub fn midpoints(&self) -> &[Point2D; CORNER_COUNT] {
        self.corners.midpoints()
    }

    /// Corner positions labelled by their current roles, in view space.
    pub fn roles(&self) -> Quad {
        self.corners.roles()
    }

    /// Handle a new size of the display area.
    ///
    /// Returns `Ok(false)` without touching anything if the size is unchanged.
    /// Otherwise recomputes the zoom, resets the corners to the padded inset
    /// and returns `Ok(true)`; the host should then run detection if
    /// `config.detect_on_load` is set.
    ///
    /// # Errors
    ///
    /// [`CropError::InvalidDimensions`] for an unusable view size; the
    /// previous layout is kept.
    pub fn on_layout(&mut self, view: Size) -> Result<bool, CropError> {
        if self.view_size == Some(view) {
            return Ok(false);
        }

        let layout = LayoutTransform::compute(view, self.image_size)?;
        debug!(
            "Layout {}x{}: zoom {:.4}, image box {}x{}, offsets ({}, {})",
            view.width,
            view.height,
            layout.zoom,
            layout.image_layout_width,
            layout.image_layout_height,
            layout.offset_horizontal,
            layout.offset_vertical
        );

        self.corners = CornerSet::inset(layout.layout_size(), self.config.padding);
        self.layout = Some(layout);
        self.view_size = Some(view);
        Ok(true)
    }

    /// Place the corners from a detection result.
    ///
    /// `None` stands for a detector that found nothing. Detected points are in
    /// source image pixels and are scaled by the current zoom. The loading
    /// flag clears whatever the outcome.
    ///
    /// # Errors
    ///
    /// [`CropError::NotLaidOut`] before the first layout, or the fitting error
    /// from [`DetectionResult::normalize`]. Corners are left unchanged on error.
    pub fn apply_detection(&mut self, result: Option<&DetectionResult>) -> Result<(), CropError> {
        self.loading = false;

        let Some(result) = result else {
            debug!("Detector returned no result; keeping corners");
            return Ok(());
        };
        let layout = self.layout.ok_or(CropError::NotLaidOut)?;

        match result.normalize() {
            Ok(quad) => {
                self.corners = self.corners.placed(quad.map(|p| layout.to_view_space(p)));
                debug!("Placed detected corners: {}", self.corners.overlay_points());
                Ok(())
            }
            Err(e) => {
                warn!("Could not fit detected document: {}", e);
                Err(e)
            }
        }
    }

    /// Run `detector` on `image` and apply its result.
    ///
    /// # Errors
    ///
    /// [`CropError::Detection`] if the detector fails, otherwise as
    /// [`apply_detection`](Self::apply_detection).
    pub fn detect_with<D: DocumentDetector>(
        &mut self,
        detector: &D,
        image: &ImageRef,
    ) -> Result<(), CropError> {
        match external::detect(detector, image) {
            Ok(result) => self.apply_detection(Some(&result)),
            Err(e) => {
                self.loading = false;
                Err(e)
            }
        }
    }

    /// Start dragging the corner in `slot`.
    pub fn grant(&mut self, slot: usize) -> Result<(), CropError> {
        self.corners = self.corners.grant(slot)?;
        Ok(())
    }

    /// One step of a corner drag; see [`CornerSet::move_corner`].
    pub fn move_corner(&mut self, slot: usize, dx: f64, dy: f64) -> Result<(), CropError> {
        self.corners = self.corners.move_corner(slot, dx, dy)?;
        Ok(())
    }

    /// One step of a midpoint drag; see [`CornerSet::move_midpoint`].
    pub fn move_midpoint(&mut self, side: Side, dx: f64, dy: f64) {
        self.corners = self.corners.move_midpoint(side, dx, dy);
    }

    /// End the active drag.
    pub fn release(&mut self) {
        self.corners = self.corners.release();
    }

    /// Overlay polygon points for the renderer.
    pub fn overlay_points(&self) -> String {
        self.corners.overlay_points()
    }

    /// Corners in source image pixels plus the image size.
    ///
    /// # Errors
    ///
    /// [`CropError::NotLaidOut`] before the first layout and
    /// [`CropError::DetectionPending`] while loading.
    pub fn crop_request(&self) -> Result<CropRequest, CropError> {
        let layout = self.layout.ok_or(CropError::NotLaidOut)?;
        if self.loading {
            return Err(CropError::DetectionPending);
        }

        let corners = self.corners.roles().map(|p| layout.to_image_space(p));
        Ok(CropRequest::new(corners, self.image_size))
    }

    /// Build the crop request and hand it to `cropper`.
    pub fn crop_with<C: DocumentCropper>(
        &self,
        cropper: &C,
        image: &ImageRef,
    ) -> Result<CroppedImage, CropError> {
        let request = self.crop_request()?;
        external::crop(cropper, &request, image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::DetectedBox;
    use crate::external::testing::{FakeCropper, FakeDetector};

    fn p(x: f64, y: f64) -> Point2D {
        Point2D::new(x, y)
    }

    /// 2000x1000 image in a 500x500 view: zoom 0.25, image box 500x250.
    fn laid_out(detect_on_load: bool) -> CropEditor {
        let config = EditorConfig {
            detect_on_load,
            ..Default::default()
        };
        let mut editor = CropEditor::new(Size::new(2000.0, 1000.0), config).unwrap();
        assert!(editor.on_layout(Size::new(500.0, 500.0)).unwrap());
        editor
    }

    #[test]
    fn test_rejects_empty_image() {
        assert!(matches!(
            CropEditor::new(Size::new(0.0, 10.0), EditorConfig::default()),
            Err(CropError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_layout_places_inset_corners() {
        let editor = laid_out(false);

        assert_eq!(editor.zoom(), Some(0.25));
        assert_eq!(editor.overlay_points(), "50,50 450,50 450,200 50,200");
        assert_eq!(editor.midpoints()[Side::Left.index()], p(50.0, 125.0));
    }

    #[test]
    fn test_same_layout_is_noop() {
        let mut editor = laid_out(false);
        editor.move_corner(0, 10.0, 10.0).unwrap();

        assert!(!editor.on_layout(Size::new(500.0, 500.0)).unwrap());
        assert_eq!(editor.corners()[0].position, p(60.0, 60.0));
    }

    #[test]
    fn test_new_layout_resets_corners() {
        let mut editor = laid_out(false);
        editor.move_corner(0, 10.0, 10.0).unwrap();

        assert!(editor.on_layout(Size::new(1000.0, 1000.0)).unwrap());
        assert_eq!(editor.zoom(), Some(0.5));
        assert_eq!(editor.corners()[0].position, p(50.0, 50.0));
    }

    #[test]
    fn test_invalid_layout_keeps_previous() {
        let mut editor = laid_out(false);
        assert!(editor.on_layout(Size::new(0.0, 0.0)).is_err());
        assert_eq!(editor.zoom(), Some(0.25));
    }

    #[test]
    fn test_detected_quad_scaled_by_zoom() {
        let mut editor = laid_out(true);
        assert!(editor.is_loading());

        let quad = Quad {
            top_left: p(200.0, 100.0),
            top_right: p(1800.0, 120.0),
            bottom_left: p(180.0, 900.0),
            bottom_right: p(1820.0, 880.0),
        };
        editor.apply_detection(Some(&DetectionResult::Quad(quad))).unwrap();

        assert!(!editor.is_loading());
        assert_eq!(editor.roles(), quad.scaled(0.25));
    }

    #[test]
    fn test_empty_box_set_keeps_corners() {
        let mut editor = laid_out(true);
        let before = *editor.corner_set();

        let err = editor
            .apply_detection(Some(&DetectionResult::BoxSet(vec![])))
            .unwrap_err();

        assert!(matches!(err, CropError::NoPointsDetected));
        assert_eq!(*editor.corner_set(), before);
        assert!(!editor.is_loading());
    }

    #[test]
    fn test_degenerate_box_set_keeps_corners() {
        let mut editor = laid_out(true);
        let before = *editor.corner_set();

        let result = DetectionResult::BoxSet(vec![DetectedBox {
            corner_points: vec![p(0.0, 0.0), p(10.0, 10.0), p(20.0, 20.0)],
        }]);
        assert!(matches!(
            editor.apply_detection(Some(&result)),
            Err(CropError::DegenerateHull { .. })
        ));
        assert_eq!(*editor.corner_set(), before);
    }

    #[test]
    fn test_no_detection_result_clears_loading() {
        let mut editor = laid_out(true);
        editor.apply_detection(None).unwrap();
        assert!(!editor.is_loading());
        assert_eq!(editor.overlay_points(), "50,50 450,50 450,200 50,200");
    }

    #[test]
    fn test_crop_request_in_image_space() {
        let mut editor = laid_out(false);
        editor.move_corner(0, 5.0, 5.0).unwrap();
        editor.release();
        editor.move_corner(0, 3.0, 0.0).unwrap();
        editor.release();

        let req = editor.crop_request().unwrap();
        assert_eq!(req.top_left, p(232.0, 220.0));
        assert_eq!(req.top_right, p(1800.0, 200.0));
        assert_eq!(req.bottom_left, p(200.0, 800.0));
        assert_eq!(req.bottom_right, p(1800.0, 800.0));
        assert_eq!(req.width, 2000.0);
        assert_eq!(req.height, 1000.0);
    }

    #[test]
    fn test_crop_request_before_layout() {
        let editor = CropEditor::new(Size::new(100.0, 100.0), EditorConfig::default()).unwrap();
        assert!(matches!(editor.crop_request(), Err(CropError::NotLaidOut)));
    }

    #[test]
    fn test_crop_request_while_loading() {
        let editor = laid_out(true);
        assert!(matches!(
            editor.crop_request(),
            Err(CropError::DetectionPending)
        ));
    }

    #[test]
    fn test_detect_with_and_crop_with() {
        let mut editor = laid_out(true);
        let image = ImageRef::new("file:///scan.jpg");
        let detector = FakeDetector(Ok(DetectionResult::Quad(Quad {
            top_left: p(100.0, 100.0),
            top_right: p(1900.0, 100.0),
            bottom_left: p(100.0, 900.0),
            bottom_right: p(1900.0, 900.0),
        })));
        editor.detect_with(&detector, &image).unwrap();

        let cropper = FakeCropper::default();
        let out = editor.crop_with(&cropper, &image).unwrap();

        assert_eq!(out.image.as_str(), "file:///scan.jpg#cropped");
        let sent = cropper.requests.borrow()[0];
        assert_eq!(sent.top_left, p(100.0, 100.0));
        assert_eq!(sent.bottom_right, p(1900.0, 900.0));
    }

    #[test]
    fn test_detector_failure_clears_loading() {
        let mut editor = laid_out(true);
        let detector = FakeDetector(Err("busy".to_string()));

        let err = editor.detect_with(&detector, &"img".into()).unwrap_err();

        assert!(matches!(err, CropError::Detection(_)));
        assert!(!editor.is_loading());
    }

    #[test]
    fn test_midpoint_drag_through_editor() {
        let mut editor = laid_out(false);
        editor.move_midpoint(Side::Left, -20.0, 100.0);
        editor.release();

        let roles = editor.roles();
        assert_eq!(roles.top_left, p(30.0, 50.0));
        assert_eq!(roles.bottom_left, p(30.0, 200.0));
        assert!(editor.corners().iter().all(|c| !c.is_dragging()));
    }
}
