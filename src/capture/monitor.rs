//! Live screen capture using the `xcap` crate.
//!
//! This is the infrastructure layer, the only code that talks to the OS.
//! The monitor is located once when the session opens; every query after
//! that reuses the same handle. If xcap misbehaves on a platform, this
//! file is the one to replace with a native implementation.

use std::time::Instant;

use image::DynamicImage;
use xcap::Monitor;

use crate::capture::{downsample_into, CaptureError, CaptureSource, SampleGrid};

/// Captures the monitor matching the configured screen size.
pub struct PrimaryMonitor {
    monitor: Monitor,
    expected: (u32, u32),
    warned_mismatch: bool,
}

impl PrimaryMonitor {
    /// Locates the monitor to capture.
    ///
    /// Preference order: an exact match on the expected dimensions, then
    /// the monitor reporting itself primary, then the first one enumerated.
    pub fn locate(expected_width: u32, expected_height: u32) -> Result<Self, CaptureError> {
        let mut monitors =
            Monitor::all().map_err(|e| CaptureError::MonitorEnumeration(e.to_string()))?;
        if monitors.is_empty() {
            return Err(CaptureError::NoMonitor);
        }

        let chosen = monitors
            .iter()
            .position(|m| {
                m.width().unwrap_or(0) == expected_width
                    && m.height().unwrap_or(0) == expected_height
            })
            .or_else(|| monitors.iter().position(|m| m.is_primary().unwrap_or(false)))
            .unwrap_or(0);
        let monitor = monitors.swap_remove(chosen);

        log::debug!(
            "Capturing monitor '{}' at {}x{}",
            monitor.name().unwrap_or_default(),
            monitor.width().unwrap_or(0),
            monitor.height().unwrap_or(0)
        );

        Ok(Self {
            monitor,
            expected: (expected_width, expected_height),
            warned_mismatch: false,
        })
    }
}

impl CaptureSource for PrimaryMonitor {
    fn capture_downsampled(&mut self, grid: &mut SampleGrid) -> Result<(), CaptureError> {
        let start = Instant::now();

        let frame = self
            .monitor
            .capture_image()
            .map_err(|e| CaptureError::CaptureFailed(e.to_string()))?;

        // Resolution changes mid-session are absorbed by the downsampler,
        // but flag the first one so a stale config is visible in the logs.
        if (frame.width(), frame.height()) != self.expected && !self.warned_mismatch {
            log::warn!(
                "Captured frame is {}x{} but the session expects {}x{}; sampling the captured size",
                frame.width(),
                frame.height(),
                self.expected.0,
                self.expected.1
            );
            self.warned_mismatch = true;
        }

        downsample_into(&DynamicImage::ImageRgba8(frame), grid)?;
        log::debug!(
            "Captured and downsampled the screen in {}ms",
            start.elapsed().as_millis()
        );
        Ok(())
    }
}
