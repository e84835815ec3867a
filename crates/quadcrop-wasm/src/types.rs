//! Conversions between JavaScript-friendly values and core types.
//!
//! JavaScript hands sides over as small integers and expects errors as
//! strings. Helpers that build a `JsValue` only work on wasm32, so the plain
//! conversions here return `Option`/`String` and are testable natively.

use quadcrop_core::{CropError, Point2D, Side};
use wasm_bindgen::JsValue;

/// Convert a u8 side value to the core `Side` enum.
///
/// Values:
/// - 0 = Top
/// - 1 = Right
/// - 2 = Bottom
/// - 3 = Left
///
/// Any other value is rejected.
pub(crate) fn side_from_u8(value: u8) -> Option<Side> {
    match value {
        0 => Some(Side::Top),
        1 => Some(Side::Right),
        2 => Some(Side::Bottom),
        3 => Some(Side::Left),
        _ => None,
    }
}

/// Flatten points into `[x0, y0, x1, y1, ...]` for a `Float64Array`.
pub(crate) fn flatten_points(points: &[Point2D]) -> Vec<f64> {
    points.iter().flat_map(|p| [p.x, p.y]).collect()
}

/// Turn a core error into a JavaScript error string.
pub(crate) fn to_js_error(error: CropError) -> JsValue {
    JsValue::from_str(&error.to_string())
}
