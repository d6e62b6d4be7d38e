//! Pure downsampling logic: the functional core.
//!
//! No OS calls, no side effects. Takes a full-resolution frame and a
//! destination grid and fills the grid with area-averaged pixels. Every
//! edge case here is unit-testable without a display server.

use image::{imageops::FilterType, DynamicImage};

use crate::capture::{CaptureError, SampleGrid};

/// Shrinks `frame` to the grid's dimensions and writes the pixels in place.
///
/// Uses a triangle filter, so each grid cell is an area average of the
/// screen region it covers rather than a point sample; a thin bright
/// window still contributes to the result instead of being skipped over.
/// The grid's own dimensions are taken as-is; an empty frame is rejected.
pub fn downsample_into(frame: &DynamicImage, grid: &mut SampleGrid) -> Result<(), CaptureError> {
    if frame.width() == 0 || frame.height() == 0 {
        return Err(CaptureError::EmptyFrame);
    }

    let resized = frame
        .resize_exact(grid.width(), grid.height(), FilterType::Triangle)
        .into_rgb8();

    for (dst, src) in grid.pixels_mut().zip(resized.pixels()) {
        *dst = *src;
    }
    Ok(())
}
