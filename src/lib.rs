//! stipple: command-line Floyd-Steinberg dithering for raster images.
//!
//! The algorithm lives in the [`rgb_dither`] crate; this package is the
//! glue around it -- argument handling in the binary, and the file
//! decode/encode boundary in [`codec`].

pub mod codec;
pub mod error;

pub use error::CodecError;
