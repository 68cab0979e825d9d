//! The error-diffusion pass: scan order, quantization, propagation.

use crate::buffer::{PixelBuffer, CHANNELS};
use crate::error::DitherError;
use crate::kernel::{Kernel, FLOYD_STEINBERG};
use crate::quantize::quantize;

/// Per-channel error accumulators for the rows the kernel can still reach.
///
/// `rows[0]` holds the error already diffused into the current row,
/// `rows[1]` the next row, and so on up to the kernel's `max_dy`. Keeping a
/// sliding window instead of full-image grids changes nothing observable:
/// every cell receives the same `f32` additions in the same order, and is
/// read exactly once, after its last writer.
#[derive(Debug)]
pub(crate) struct ErrorBuffer {
    /// `rows[row_offset][x]` is the RGB error destined for that cell.
    rows: Vec<Vec<[f32; CHANNELS]>>,
    width: usize,
}

impl ErrorBuffer {
    /// Create a zeroed buffer of `row_depth` rows (`max_dy + 1`).
    pub(crate) fn new(width: usize, row_depth: usize) -> Self {
        Self {
            rows: (0..row_depth).map(|_| vec![[0.0; CHANNELS]; width]).collect(),
            width,
        }
    }

    /// Total error diffused so far into `(x, current row)`.
    #[inline]
    pub(crate) fn accumulated(&self, x: usize) -> [f32; CHANNELS] {
        self.rows[0][x]
    }

    /// Add error destined for `(x, current row + row_offset)`.
    ///
    /// Out-of-bounds coordinates are ignored; the caller's bounds guard is
    /// what decides whether a kernel entry applies at all.
    #[inline]
    pub(crate) fn add_error(&mut self, x: usize, row_offset: usize, error: [f32; CHANNELS]) {
        if x < self.width && row_offset < self.rows.len() {
            for c in 0..CHANNELS {
                self.rows[row_offset][x][c] += error[c];
            }
        }
    }

    /// Rotate to the next row: the finished row is recycled as a zeroed
    /// furthest-ahead row.
    pub(crate) fn advance_row(&mut self) {
        self.rows.rotate_left(1);
        if let Some(last) = self.rows.last_mut() {
            last.fill([0.0; CHANNELS]);
        }
    }
}

/// Diffuse one pixel's residual into its not-yet-visited neighbors.
///
/// Entries whose target falls outside the image are skipped without
/// renormalizing the surviving weights -- edge and corner pixels lose the
/// skipped fraction of the residual entirely, rather than spreading it
/// among the neighbors that remain.
#[inline]
pub(crate) fn diffuse(
    error_buf: &mut ErrorBuffer,
    kernel: &Kernel,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
    residual: [f32; CHANNELS],
) {
    let divisor = f32::from(kernel.divisor);
    for &(dx, dy, weight) in kernel.entries {
        let nx = x as i64 + i64::from(dx);
        if nx < 0 || nx as usize >= width {
            continue;
        }
        let ny = y + dy as usize;
        if ny >= height {
            continue;
        }
        let fraction = f32::from(weight) / divisor;
        error_buf.add_error(
            nx as usize,
            dy as usize,
            [
                residual[0] * fraction,
                residual[1] * fraction,
                residual[2] * fraction,
            ],
        );
    }
}

/// Dither `buffer` in place, restricting every channel to `levels` evenly
/// spaced values while diffusing the quantization error forward.
///
/// The scan is strictly row-major, top to bottom and left to right within
/// each row; that order defines which neighbors are legal diffusion
/// targets, so it is not a tunable. Per pixel and per channel the engine
/// adds the accumulated error to the stored value, quantizes, writes the
/// result back, and pushes the residual to the unvisited neighbors under
/// the [`FLOYD_STEINBERG`] weights.
///
/// Repeated runs over identical input produce byte-identical output; the
/// pass allocates nothing observable and holds no state across calls, so
/// separate buffers may be dithered concurrently.
///
/// # Errors
///
/// Returns [`DitherError::InvalidLevels`] when `levels < 2`. The buffer is
/// untouched in that case.
///
/// # Example
///
/// ```
/// use rgb_dither::{dither_in_place, PixelBuffer};
///
/// let mut buffer = PixelBuffer::filled(2, 2, [128, 128, 128]);
/// dither_in_place(&mut buffer, 2).unwrap();
/// // Every channel is now either 0 or 255.
/// assert!(buffer.as_raw().iter().all(|&v| v == 0 || v == 255));
/// ```
pub fn dither_in_place(buffer: &mut PixelBuffer, levels: u16) -> Result<(), DitherError> {
    if levels < 2 {
        return Err(DitherError::InvalidLevels { levels });
    }

    let width = buffer.width();
    let height = buffer.height();
    let kernel = &FLOYD_STEINBERG;
    let mut error_buf = ErrorBuffer::new(width, kernel.max_dy + 1);

    for y in 0..height {
        for x in 0..width {
            let accumulated = error_buf.accumulated(x);
            let original = buffer.pixel(x, y);

            let mut quantized = [0u8; CHANNELS];
            let mut residual = [0.0f32; CHANNELS];
            for c in 0..CHANNELS {
                let effective = f32::from(original[c]) + accumulated[c];
                quantized[c] = quantize(effective, levels);
                residual[c] = effective - f32::from(quantized[c]);
            }

            buffer.set_pixel(x, y, quantized);
            diffuse(&mut error_buf, kernel, x, y, width, height, residual);
        }
        error_buf.advance_row();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_buffer_starts_zeroed() {
        let buf = ErrorBuffer::new(4, 2);
        for x in 0..4 {
            assert_eq!(buf.accumulated(x), [0.0, 0.0, 0.0]);
        }
    }

    #[test]
    fn test_error_buffer_accumulates_additively() {
        let mut buf = ErrorBuffer::new(8, 2);
        buf.add_error(3, 0, [0.25, 0.5, -1.0]);
        buf.add_error(3, 0, [0.25, 0.5, -1.0]);
        assert_eq!(buf.accumulated(3), [0.5, 1.0, -2.0]);
    }

    #[test]
    fn test_error_buffer_advance_row_rotates_and_clears() {
        let mut buf = ErrorBuffer::new(4, 2);
        buf.add_error(1, 0, [1.0, 1.0, 1.0]);
        buf.add_error(2, 1, [2.0, 2.0, 2.0]);

        buf.advance_row();

        // The next row became current; the finished row came back zeroed.
        assert_eq!(buf.accumulated(1), [0.0, 0.0, 0.0]);
        assert_eq!(buf.accumulated(2), [2.0, 2.0, 2.0]);
        assert_eq!(buf.rows[1][2], [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_error_buffer_ignores_out_of_bounds() {
        let mut buf = ErrorBuffer::new(4, 2);
        buf.add_error(100, 0, [1.0, 1.0, 1.0]);
        buf.add_error(0, 7, [1.0, 1.0, 1.0]);
        for x in 0..4 {
            assert_eq!(buf.accumulated(x), [0.0, 0.0, 0.0]);
        }
    }

    #[test]
    fn test_interior_diffusion_conserves_residual() {
        // All four targets of an interior pixel are in bounds, and the
        // weights sum to 16/16, so the emitted deltas add back up to the
        // residual exactly (the values below are exact in f32).
        let mut buf = ErrorBuffer::new(3, 2);
        diffuse(
            &mut buf,
            &FLOYD_STEINBERG,
            1,
            0,
            3,
            3,
            [10.0, -50.625, 16.0],
        );

        let mut total = [0.0f32; CHANNELS];
        for x in 0..3 {
            for row in 0..2 {
                for c in 0..CHANNELS {
                    total[c] += buf.rows[row][x][c];
                }
            }
        }
        assert_eq!(total, [10.0, -50.625, 16.0]);
    }

    #[test]
    fn test_interior_diffusion_targets_and_weights() {
        let mut buf = ErrorBuffer::new(3, 2);
        diffuse(&mut buf, &FLOYD_STEINBERG, 1, 0, 3, 3, [16.0, 16.0, 16.0]);

        assert_eq!(buf.rows[0][2], [7.0, 7.0, 7.0], "right gets 7/16");
        assert_eq!(buf.rows[1][0], [3.0, 3.0, 3.0], "down-left gets 3/16");
        assert_eq!(buf.rows[1][1], [5.0, 5.0, 5.0], "down gets 5/16");
        assert_eq!(buf.rows[1][2], [1.0, 1.0, 1.0], "down-right gets 1/16");
        assert_eq!(buf.rows[0][0], [0.0, 0.0, 0.0], "left neighbor untouched");
    }

    #[test]
    fn test_last_column_drops_right_hand_share() {
        // x = width - 1, not on the last row: the 7/16 and 1/16 entries
        // fall outside and their share is lost, not redistributed.
        let mut buf = ErrorBuffer::new(2, 2);
        diffuse(&mut buf, &FLOYD_STEINBERG, 1, 0, 2, 3, [16.0, 16.0, 16.0]);

        let mut total = 0.0f32;
        for x in 0..2 {
            for row in 0..2 {
                total += buf.rows[row][x][0];
            }
        }
        assert_eq!(total, 8.0, "only 3/16 + 5/16 of the residual survives");
    }

    #[test]
    fn test_last_row_drops_downward_shares() {
        let mut buf = ErrorBuffer::new(3, 2);
        diffuse(&mut buf, &FLOYD_STEINBERG, 1, 2, 3, 3, [16.0, 16.0, 16.0]);

        assert_eq!(buf.rows[0][2], [7.0, 7.0, 7.0], "right target still valid");
        assert_eq!(buf.rows[1][0], [0.0, 0.0, 0.0]);
        assert_eq!(buf.rows[1][1], [0.0, 0.0, 0.0]);
        assert_eq!(buf.rows[1][2], [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_bottom_right_corner_diffuses_nothing() {
        let mut buf = ErrorBuffer::new(2, 2);
        diffuse(&mut buf, &FLOYD_STEINBERG, 1, 1, 2, 2, [16.0, 16.0, 16.0]);

        for x in 0..2 {
            for row in 0..2 {
                assert_eq!(buf.rows[row][x], [0.0, 0.0, 0.0]);
            }
        }
    }

    #[test]
    fn test_dither_rejects_fewer_than_two_levels() {
        let original = PixelBuffer::filled(2, 2, [90, 90, 90]);
        for levels in [0, 1] {
            let mut buffer = original.clone();
            let result = dither_in_place(&mut buffer, levels);
            assert_eq!(result, Err(DitherError::InvalidLevels { levels }));
            assert_eq!(buffer, original, "buffer must be untouched on rejection");
        }
    }

    #[test]
    fn test_pure_black_and_white_pass_through() {
        let mut black = PixelBuffer::filled(4, 4, [0, 0, 0]);
        dither_in_place(&mut black, 4).unwrap();
        assert!(black.as_raw().iter().all(|&v| v == 0));

        let mut white = PixelBuffer::filled(4, 4, [255, 255, 255]);
        dither_in_place(&mut white, 4).unwrap();
        assert!(white.as_raw().iter().all(|&v| v == 255));
    }

    #[test]
    fn test_mid_gray_two_levels_exact_trace() {
        // Hand-traced 2x2 pass, gray 128, two levels (all values exact in
        // f32): (0,0) rounds up to 255 leaving -127, which pushes (1,0)
        // and (0,1) below the threshold; their carried error then lifts
        // (1,1) back over it.
        let mut buffer = PixelBuffer::filled(2, 2, [128, 128, 128]);
        dither_in_place(&mut buffer, 2).unwrap();

        assert_eq!(buffer.pixel(0, 0), [255, 255, 255]);
        assert_eq!(buffer.pixel(1, 0), [0, 0, 0]);
        assert_eq!(buffer.pixel(0, 1), [0, 0, 0]);
        assert_eq!(buffer.pixel(1, 1), [255, 255, 255]);
    }

    #[test]
    fn test_single_pixel_image_is_plain_quantization() {
        // A 1x1 image has no valid diffusion target at all; the output is
        // quantize(original) and nothing else happens.
        let mut buffer = PixelBuffer::from_raw(1, 1, vec![10, 130, 250]).unwrap();
        dither_in_place(&mut buffer, 2).unwrap();
        assert_eq!(buffer.pixel(0, 0), [0, 255, 255]);
    }

    #[test]
    fn test_empty_image_is_a_no_op() {
        let mut buffer = PixelBuffer::from_raw(0, 0, Vec::new()).unwrap();
        dither_in_place(&mut buffer, 2).unwrap();
        assert!(buffer.as_raw().is_empty());
    }
}
