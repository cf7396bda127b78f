//! Typed, strided 2-D pixel buffers shared by image codec frontends.
//!
//! The crate centers on one container:
//!
//! - [`Image`] — a row-major pixel buffer with a configurable row stride,
//!   backed by owned memory or by borrowed memory (a "view"). Codec readers
//!   decode rows into it, codec writers stream rows out of it.
//! - [`ImageBuf`] — alias for the owned form, `Image<'static, P>`.
//! - [`Pixel`] / [`Channel`] — element-type traits describing channel count,
//!   byte width, and numeric classification; implemented for the `rgb`
//!   crate's `Gray`, `GrayAlpha`, `Rgb`, `Rgba`, and `Bgra` types.
//! - [`BufferError`] — recoverable failures from allocation and ownership
//!   precondition checks.
//!
//! Zero-copy conversions from `imgref` types are provided for the common
//! pixel formats, so buffers decoded elsewhere in the ecosystem can be
//! wrapped without copying.

#![no_std]
#![forbid(unsafe_code)]

extern crate alloc;

mod image;
mod pixel;

pub use image::{BufferError, Image, ImageBuf};
pub use pixel::{Channel, Pixel};

// Re-exports for callers constructing typed pixels.
pub use imgref::{Img, ImgRef, ImgRefMut, ImgVec};
pub use rgb;
pub use rgb::alt::BGRA as Bgra;
pub use rgb::alt::GrayAlpha;
pub use rgb::{Gray, Rgb, Rgba};
