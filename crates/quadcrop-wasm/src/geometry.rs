//! WASM bindings for the bounding-rectangle solver.

use quadcrop_core::geometry::find_min_bounding_rect as core_fit;
use quadcrop_core::{CropError, Point2D};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::types::to_js_error;

/// Minimum bounding rectangle as returned to JavaScript.
#[derive(Debug, Serialize)]
struct MinRectJs {
    /// Four `[x, y]` corners in the solver's fixed order.
    corners: Vec<[f64; 2]>,
    /// Row-major 2×2 rotation matrix of the rectangle's frame.
    rotation: [[f64; 2]; 2],
    area: f64,
}

fn fit(points: &[[f64; 2]]) -> Result<MinRectJs, CropError> {
    let points: Vec<Point2D> = points.iter().copied().map(Point2D::from).collect();
    let rect = core_fit(&points)?;
    Ok(MinRectJs {
        corners: rect.corners.iter().copied().map(<[f64; 2]>::from).collect(),
        rotation: rect.rotation.0,
        area: rect.area(),
    })
}

/// Fit the minimum-area rectangle around a point cloud.
///
/// # Arguments
/// * `points` - Array of `[x, y]` pairs
///
/// # Returns
/// `{ corners: [[x, y] x4], rotation: [[a, b], [c, d]], area }`
///
/// # Errors
/// Returns an error if the points cannot be read, the array is empty, a
/// coordinate is not finite, or all points are identical or collinear.
///
/// # Example (TypeScript)
/// ```typescript
/// const rect = find_min_bounding_rect([[0, 0], [10, 0], [10, 10], [0, 10]]);
/// console.log(rect.area); // 100
/// ```
#[wasm_bindgen]
pub fn find_min_bounding_rect(points: JsValue) -> Result<JsValue, JsValue> {
    let points: Vec<[f64; 2]> = serde_wasm_bindgen::from_value(points)
        .map_err(|e| JsValue::from_str(&format!("Invalid points: {}", e)))?;
    let rect = fit(&points).map_err(to_js_error)?;
    serde_wasm_bindgen::to_value(&rect).map_err(|e| JsValue::from_str(&e.to_string()))
}
