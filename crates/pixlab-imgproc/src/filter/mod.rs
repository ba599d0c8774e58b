//! Filter operations
//!
//! This module provides 1-D convolution primitives, the separable 2-D filter
//! driver and the composed filters built on top of them.

/// Filter kernels
pub mod kernels;

/// 1-D convolution primitives
mod convolution;
pub use convolution::*;

/// Separable filter driver
mod separable_filter;
pub use separable_filter::*;

/// Filter operations
mod ops;
pub use ops::*;
