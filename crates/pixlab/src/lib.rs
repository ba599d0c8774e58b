#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use pixlab_image as image;

#[doc(inline)]
pub use pixlab_imgproc as imgproc;
