//! WASM bindings for the interactive crop editor.
//!
//! The host page renders the image, the overlay polygon and the handles, and
//! captures pointer gestures. It forwards those events here and redraws from
//! `overlay_points`, `corner_positions` and `midpoint_positions`.

use quadcrop_core::{CropEditor, CropError, DetectionResult, EditorConfig, Size};
use wasm_bindgen::prelude::*;

use crate::types::{flatten_points, side_from_u8, to_js_error};

/// JavaScript-accessible crop editor.
///
/// # Example (TypeScript)
/// ```typescript
/// const editor = new JsCropEditor(image.width, image.height, { padding: 40 });
/// editor.on_layout(container.clientWidth, container.clientHeight);
///
/// // Detector answered (a quad, an array of boxes, or null)
/// editor.apply_detection(await findDocument(uri));
///
/// // Corner 2 dragged by the cumulative gesture delta
/// editor.move_corner(2, gesture.dx, gesture.dy);
/// polygon.setAttribute('points', editor.overlay_points());
/// editor.release();
///
/// const request = editor.crop_request();
/// ```
#[wasm_bindgen]
pub struct JsCropEditor {
    inner: CropEditor,
}

#[wasm_bindgen]
impl JsCropEditor {
    /// Create an editor for an image of the given pixel size.
    ///
    /// # Arguments
    /// * `image_width` / `image_height` - Source image size in pixels
    /// * `config` - `{ padding?: number, detectOnLoad?: boolean }`, or `undefined`/`null` for defaults
    ///
    /// # Errors
    /// Returns error if the config cannot be read or the size is not positive
    #[wasm_bindgen(constructor)]
    pub fn new(image_width: f64, image_height: f64, config: JsValue) -> Result<JsCropEditor, JsValue> {
        let config: EditorConfig = if config.is_undefined() || config.is_null() {
            EditorConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid editor config: {}", e)))?
        };

        Self::with_config(image_width, image_height, config).map_err(to_js_error)
    }

    /// Handle a new display size. Returns true if the layout changed, in
    /// which case the corners were reset and detection may be re-run.
    pub fn on_layout(&mut self, width: f64, height: f64) -> Result<bool, JsValue> {
        self.inner
            .on_layout(Size::new(width, height))
            .map_err(to_js_error)
    }

    /// Apply the detector's answer: a `{topLeft, topRight, bottomLeft,
    /// bottomRight}` object, an array of `{cornerPoints}` boxes, or null.
    ///
    /// # Errors
    /// Returns error if the value has neither shape or no quad can be fitted.
    /// The corners are left unchanged in that case.
    pub fn apply_detection(&mut self, result: JsValue) -> Result<(), JsValue> {
        if result.is_undefined() || result.is_null() {
            return self.inner.apply_detection(None).map_err(to_js_error);
        }

        let parsed: DetectionResult = serde_wasm_bindgen::from_value(result).map_err(|e| {
            // Still clear the loading state so the overlay becomes usable
            let _ = self.inner.apply_detection(None);
            JsValue::from_str(&format!("Invalid detection result: {}", e))
        })?;
        self.inner.apply_detection(Some(&parsed)).map_err(to_js_error)
    }

    /// Start dragging a corner (slot 0-3).
    pub fn grant_corner(&mut self, slot: usize) -> Result<(), JsValue> {
        self.inner.grant(slot).map_err(to_js_error)
    }

    /// Drag a corner (slot 0-3) by the cumulative gesture delta.
    pub fn move_corner(&mut self, slot: usize, dx: f64, dy: f64) -> Result<(), JsValue> {
        self.inner.move_corner(slot, dx, dy).map_err(to_js_error)
    }

    /// Drag a midpoint by the cumulative gesture delta.
    ///
    /// `side`: 0 = top, 1 = right, 2 = bottom, 3 = left.
    pub fn move_midpoint(&mut self, side: u8, dx: f64, dy: f64) -> Result<(), JsValue> {
        let side = side_from_u8(side)
            .ok_or_else(|| JsValue::from_str(&format!("Unknown side: {}", side)))?;
        self.inner.move_midpoint(side, dx, dy);
        Ok(())
    }

    /// End the active drag.
    pub fn release(&mut self) {
        self.inner.release();
    }

    /// Overlay polygon as `"x1,y1 x2,y2 x3,y3 x4,y4"`.
    pub fn overlay_points(&self) -> String {
        self.inner.overlay_points()
    }

    /// Corner positions in slot order, flattened to `[x0, y0, ..., x3, y3]`.
    pub fn corner_positions(&self) -> Vec<f64> {
        flatten_points(&self.inner.corner_set().positions())
    }

    /// Midpoint positions (top, right, bottom, left), flattened.
    pub fn midpoint_positions(&self) -> Vec<f64> {
        flatten_points(self.inner.midpoints())
    }

    /// Current zoom, or undefined before the first layout.
    #[wasm_bindgen(getter)]
    pub fn zoom(&self) -> Option<f64> {
        self.inner.zoom()
    }

    /// Horizontal inset of the image box within the view.
    #[wasm_bindgen(getter)]
    pub fn offset_horizontal(&self) -> f64 {
        self.inner.layout().map_or(0.0, |l| l.offset_horizontal)
    }

    /// Vertical inset of the image box within the view.
    #[wasm_bindgen(getter)]
    pub fn offset_vertical(&self) -> f64 {
        self.inner.layout().map_or(0.0, |l| l.offset_vertical)
    }

    /// Whether a detection result is still awaited.
    #[wasm_bindgen(getter)]
    pub fn is_loading(&self) -> bool {
        self.inner.is_loading()
    }

    /// Image-space corners and size for the crop routine:
    /// `{topLeft, topRight, bottomLeft, bottomRight, width, height}`.
    pub fn crop_request(&self) -> Result<JsValue, JsValue> {
        let request = self.inner.crop_request().map_err(to_js_error)?;
        serde_wasm_bindgen::to_value(&request).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsCropEditor {
    /// Construct without going through `JsValue`.
    pub(crate) fn with_config(
        image_width: f64,
        image_height: f64,
        config: EditorConfig,
    ) -> Result<Self, CropError> {
        Ok(Self {
            inner: CropEditor::new(Size::new(image_width, image_height), config)?,
        })
    }
}
