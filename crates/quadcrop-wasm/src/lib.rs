//! QuadCrop WASM - WebAssembly bindings for QuadCrop
//!
//! This crate exposes the quadcrop-core crop editor to JavaScript/TypeScript.
//! The page keeps rendering and gesture capture; every geometric decision
//! (corner placement, drag constraints, screen-to-image conversion) is made
//! here.
//!
//! # Module Structure
//!
//! - `editor` - `JsCropEditor`, the per-overlay session
//! - `geometry` - standalone minimum bounding rectangle fit
//! - `logger` - `log` records routed to the browser console
//! - `types` - conversions between JavaScript values and core types
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCropEditor, set_log_level } from '@quadcrop/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//! set_log_level('debug');
//!
//! const editor = new JsCropEditor(image.width, image.height, undefined);
//! editor.on_layout(view.width, view.height);
//! editor.apply_detection(await detectDocument(image.uri));
//! const request = editor.crop_request();
//! ```

use wasm_bindgen::prelude::*;

mod editor;
mod geometry;
mod logger;
mod types;

// Re-export public types
pub use editor::JsCropEditor;
pub use geometry::find_min_bounding_rect;
pub use logger::set_log_level;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logger::init_logging(log::LevelFilter::Info);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
