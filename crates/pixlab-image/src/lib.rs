#![deny(missing_docs)]
//! Image buffer types and pixel access for image filtering operations

/// image representation and pixel access.
pub mod image;

/// Error types for the image module.
pub mod error;

pub use crate::error::ImageError;
pub use crate::image::{mirror_index, Image, ImageSize};
