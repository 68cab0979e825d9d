//! rgb-dither: Floyd-Steinberg error diffusion for RGB pixel buffers.
//!
//! Given a decoded image as a `width * height * 3` byte buffer and a
//! per-channel level count, [`dither_in_place`] rewrites every channel to
//! one of `levels` evenly spaced values in `[0, 255]` while visually
//! preserving the original's tonal gradients. The rounding error of each
//! quantization is not discarded -- it is diffused into the not-yet-visited
//! neighbors under the classic Floyd-Steinberg weights, so the average
//! intensity of a region survives even on a two-value palette.
//!
//! # Quick Start
//!
//! ```
//! use rgb_dither::{dither_in_place, PixelBuffer, DEFAULT_LEVELS};
//!
//! let mut buffer = PixelBuffer::from_raw(2, 2, vec![
//!     10, 10, 10, 200, 200, 200,
//!     50, 50, 50, 250, 250, 250,
//! ]).unwrap();
//!
//! dither_in_place(&mut buffer, 2).unwrap();
//!
//! assert_eq!(
//!     buffer.as_raw(),
//!     &[0, 0, 0, 255, 255, 255, 0, 0, 0, 255, 255, 255],
//! );
//!
//! // The conventional default palette is coarser than the input but much
//! // finer than two levels.
//! assert_eq!(DEFAULT_LEVELS, 6);
//! ```
//!
//! # Semantics
//!
//! The pass is a single deterministic sequential sweep in row-major order,
//! top to bottom and left to right. That order is load-bearing: it decides
//! which neighbors are already finalized (never written again) and which
//! may still absorb error. Each channel is processed independently --
//! there is no color-space conversion, no perceptual error metric, and no
//! alpha handling.
//!
//! At image edges, kernel entries whose target falls outside the bounds
//! are dropped without renormalizing the remaining weights; the
//! corresponding fraction of the residual is lost, never redistributed
//! among the neighbors that remain in bounds.
//!
//! The engine owns its error accumulators outright for the duration of a
//! call and leaves no state behind, so distinct buffers may be dithered
//! concurrently without coordination.

pub mod buffer;
pub mod diffusion;
pub mod error;
pub mod kernel;
pub mod quantize;


pub use buffer::{PixelBuffer, CHANNELS};
pub use diffusion::dither_in_place;
pub use error::DitherError;
pub use kernel::{Kernel, FLOYD_STEINBERG};
pub use quantize::{quantize, DEFAULT_LEVELS};
