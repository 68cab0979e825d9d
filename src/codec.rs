//! Image file decode/encode at the pixel-buffer boundary.
//!
//! Everything format-shaped lives here; the dithering engine only ever
//! sees a raw RGB [`PixelBuffer`]. Decoding strips alpha -- transparency
//! is out of scope for the whole pipeline.

use std::path::{Path, PathBuf};

use rgb_dither::PixelBuffer;

use crate::error::CodecError;

/// Decode an image file into an RGB pixel buffer.
///
/// Any format the build enables (PNG, JPEG, BMP, GIF) is accepted; the
/// decoded image is converted to 8-bit RGB, dropping alpha if present.
///
/// # Errors
///
/// [`CodecError::Decode`] when the file cannot be opened or parsed.
pub fn load_rgb(path: &Path) -> Result<PixelBuffer, CodecError> {
    let image = image::open(path).map_err(|source| CodecError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    let buffer = PixelBuffer::from_raw(width as usize, height as usize, rgb.into_raw())?;
    Ok(buffer)
}

/// Encode a pixel buffer to `path`; the format follows the extension.
///
/// # Errors
///
/// [`CodecError::Encode`] when the encoder rejects the path or the write
/// fails.
pub fn save_rgb(path: &Path, buffer: &PixelBuffer) -> Result<(), CodecError> {
    image::save_buffer(
        path,
        buffer.as_raw(),
        buffer.width() as u32,
        buffer.height() as u32,
        image::ColorType::Rgb8,
    )
    .map_err(|source| CodecError::Encode {
        path: path.to_path_buf(),
        source,
    })
}

/// Default output path for an input: the sibling file `<stem>-dithered.png`.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}-dithered.png"))
}
