//! Error types for the codec boundary.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while moving pixels between image files and [`rgb_dither::PixelBuffer`].
#[derive(Debug, Error)]
pub enum CodecError {
    /// The input file could not be opened or decoded.
    #[error("failed to decode {}: {source}", path.display())]
    Decode {
        /// The offending input path.
        path: PathBuf,
        /// The decoder's reason.
        source: image::ImageError,
    },

    /// The output file could not be encoded or written.
    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        /// The offending output path.
        path: PathBuf,
        /// The encoder's reason.
        source: image::ImageError,
    },

    /// The decoded pixel data did not form a valid buffer.
    #[error(transparent)]
    Buffer(#[from] rgb_dither::DitherError),
}
