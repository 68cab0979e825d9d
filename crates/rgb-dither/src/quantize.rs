//! Channel quantization to evenly spaced levels.

/// Default number of quantization levels per channel.
pub const DEFAULT_LEVELS: u16 = 6;

/// Spacing between adjacent palette values for a given level count.
///
/// Callers must uphold `levels >= 2`; the engine rejects lower counts
/// before any pixel is processed.
#[inline]
pub(crate) fn step(levels: u16) -> f32 {
    debug_assert!(levels >= 2);
    255.0 / f32::from(levels - 1)
}

/// Quantize a channel intensity to the nearest of `levels` evenly spaced
/// values in `[0, 255]`.
///
/// The palette is `{0, step, 2*step, ..., 255}` with
/// `step = 255 / (levels - 1)`. Rounding is to the nearest multiple of
/// `step` (ties away from zero), and the rounded result is clamped --
/// `value` may lie outside `[0, 255]` because it carries diffused error
/// from previously processed pixels.
///
/// # Example
///
/// ```
/// use rgb_dither::quantize;
///
/// assert_eq!(quantize(10.0, 2), 0);
/// assert_eq!(quantize(204.4, 2), 255);
/// assert_eq!(quantize(-17.0, 6), 0);
/// assert_eq!(quantize(80.0, 6), 102);
/// ```
#[inline]
pub fn quantize(value: f32, levels: u16) -> u8 {
    let step = step(levels);
    let nearest = (value / step).round() * step;
    nearest.round().clamp(0.0, 255.0) as u8
}
