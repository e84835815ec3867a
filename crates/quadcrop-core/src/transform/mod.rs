//! Coordinate transforms between the on-screen view and the source image.
//!
//! # Coordinate Spaces
//!
//! - **View space**: the image layout box, in view units. Origin at the top-left
//!   of the displayed image (not of the surrounding view).
//! - **Image space**: source image pixels. Origin at the top-left pixel.
//!
//! The two differ only by the uniform zoom computed at layout time.

mod crop;
mod layout;

pub use crop::CropRequest;
pub use layout::{LayoutTransform, Size};
