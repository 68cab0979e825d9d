//! Error types for the rgb-dither public API.

use thiserror::Error;

/// Errors reported by the dithering pass.
///
/// Both variants are configuration problems detected before any pixel is
/// touched; there is no partial-failure mode once the pass has started.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DitherError {
    /// The level count admits no palette: `step = 255 / (levels - 1)` is
    /// undefined below 2.
    #[error("quantization levels must be at least 2, got {levels}")]
    InvalidLevels {
        /// The rejected level count.
        levels: u16,
    },

    /// Raw pixel data does not cover `width * height` RGB triples.
    #[error("pixel data length {actual} does not match {width}x{height}x3 = {expected}")]
    BufferSizeMismatch {
        /// Declared image width in pixels.
        width: usize,
        /// Declared image height in pixels.
        height: usize,
        /// Expected byte length (`width * height * 3`).
        expected: usize,
        /// Actual byte length supplied.
        actual: usize,
    },
}
