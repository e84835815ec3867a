//! Seams to the platform's document detection and crop routines.
//!
//! Both routines live outside this crate (typically native code behind a
//! bridge). Each call is single-shot: one request, one completion, no retry.
//! Their errors are passed through to the caller with the original error as
//! the source.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::detection::DetectionResult;
use crate::error::CropError;
use crate::geometry::Quad;
use crate::transform::CropRequest;

/// Opaque handle to an image, usually a URI understood by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(pub String);

impl ImageRef {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ImageRef {
    fn from(uri: &str) -> Self {
        Self::new(uri)
    }
}

/// Output of a successful crop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CroppedImage {
    pub image: ImageRef,
}

/// Finds a document outline in an image.
pub trait DocumentDetector {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Detect the document, in source image pixels.
    fn detect(&self, image: &ImageRef) -> Result<DetectionResult, Self::Error>;
}

/// Crops and rectifies the region enclosed by four image-space corners.
pub trait DocumentCropper {
    type Error: std::error::Error + Send + Sync + 'static;

    fn crop(&self, request: &CropRequest, image: &ImageRef) -> Result<CroppedImage, Self::Error>;
}

/// Run the detector and map its failure into [`CropError::Detection`].
pub fn detect<D: DocumentDetector>(
    detector: &D,
    image: &ImageRef,
) -> Result<DetectionResult, CropError> {
    detector
        .detect(image)
        .map_err(|e| CropError::Detection(Box::new(e)))
}

/// Run the cropper and map its failure into [`CropError::Crop`].
pub fn crop<C: DocumentCropper>(
    cropper: &C,
    request: &CropRequest,
    image: &ImageRef,
) -> Result<CroppedImage, CropError> {
    cropper
        .crop(request, image)
        .map_err(|e| CropError::Crop(Box::new(e)))
}

/// Detect and crop in one go, without an interactive editor.
///
/// Detected corners are used at full resolution (zoom 1). If the detection
/// result cannot be reduced to a quadrilateral, the corners of `fallback`
/// are cropped instead. The image dimensions always come from `fallback`.
///
/// # Errors
///
/// Detector and cropper failures are returned unchanged as
/// [`CropError::Detection`] and [`CropError::Crop`].
pub fn find_and_crop<D, C>(
    detector: &D,
    cropper: &C,
    image: &ImageRef,
    fallback: &CropRequest,
) -> Result<CroppedImage, CropError>
where
    D: DocumentDetector,
    C: DocumentCropper,
{
    let detected = detect(detector, image)?;

    let request = match detected.normalize() {
        Ok(q) => {
            debug!("Cropping {} with detected corners", image.as_str());
            // Detector labels are not trusted; roles come from positions
            fallback.with_corners(Quad::from_unordered([
                q.top_left,
                q.top_right,
                q.bottom_left,
                q.bottom_right,
            ]))
        }
        Err(e) if e.is_recoverable() => {
            warn!("Falling back to supplied corners for {}: {}", image.as_str(), e);
            *fallback
        }
        Err(e) => return Err(e),
    };

    crop(cropper, &request, image)
}
