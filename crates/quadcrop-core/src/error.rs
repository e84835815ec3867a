//! Error type shared by the geometry engine and the crop editor.

use thiserror::Error;

/// Boxed error from an external detection or crop routine.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors produced while fitting, editing or cropping a document boundary.
#[derive(Debug, Error)]
pub enum CropError {
    /// A box-set detection result contained no corner points.
    #[error("No points detected")]
    NoPointsDetected,

    /// The detected points are identical or collinear, so no rectangle can
    /// be fitted around them.
    #[error("Degenerate hull: {distinct} distinct point(s), need at least 3")]
    DegenerateHull { distinct: usize },

    /// A detected point with a NaN or infinite coordinate.
    #[error("Non-finite point: ({x}, {y})")]
    NonFinitePoint { x: f64, y: f64 },

    /// An image or view size that is zero, negative or not finite.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },

    /// A corner slot outside `0..4`.
    #[error("Unknown corner slot: {0}")]
    UnknownCorner(usize),

    /// A crop was requested before the first layout pass.
    #[error("Crop requested before layout")]
    NotLaidOut,

    /// A crop was requested while document detection is still running.
    #[error("Crop requested while document detection is pending")]
    DetectionPending,

    /// The external detection routine failed.
    #[error("Document detection failed: {0}")]
    Detection(#[source] BoxError),

    /// The external crop routine failed.
    #[error("Crop failed: {0}")]
    Crop(#[source] BoxError),
}

impl CropError {
    /// Whether the editor keeps working normally after this error.
    ///
    /// Fitting failures leave the corners where they were; the user can still
    /// adjust them by hand.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CropError::NoPointsDetected
                | CropError::DegenerateHull { .. }
                | CropError::NonFinitePoint { .. }
        )
    }
}
