//! Crop editor configuration.

use serde::{Deserialize, Serialize};

/// Default inset of the initial corners from the image box edges.
pub const DEFAULT_PADDING: f64 = 50.0;

/// Settings for a [`CropEditor`](crate::editor::CropEditor).
///
/// Missing fields take their defaults when deserializing, so a host can pass
/// `{}` or only the fields it cares about.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Inset of the initial corners from the image box edges, in view units.
    pub padding: f64,
    /// Run document detection after the first layout.
    pub detect_on_load: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            padding: DEFAULT_PADDING,
            detect_on_load: true,
        }
    }
}
