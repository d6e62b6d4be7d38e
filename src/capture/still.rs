//! A capture source that serves a fixed image instead of the screen.
//!
//! Lets the whole pipeline run in tests and headless environments without
//! a display server.

use image::DynamicImage;

use crate::capture::{downsample_into, CaptureError, CaptureSource, SampleGrid};

/// Serves the same frame on every query until it is swapped out.
pub struct StillImage {
    frame: DynamicImage,
}

impl StillImage {
    pub fn new(frame: DynamicImage) -> Self {
        Self { frame }
    }

    /// Replaces the frame served to subsequent queries, like a screen
    /// whose content changed.
    pub fn set_frame(&mut self, frame: DynamicImage) {
        self.frame = frame;
    }
}

impl CaptureSource for StillImage {
    fn capture_downsampled(&mut self, grid: &mut SampleGrid) -> Result<(), CaptureError> {
        downsample_into(&self.frame, grid)
    }
}
