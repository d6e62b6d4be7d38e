//! Public surface of the frame acquisition domain.
//!
//! Everything behind [`CaptureSource`] is the infrastructure layer that
//! talks to the OS. The downsampling math itself is pure and shared by
//! every source through [`downsample_into`].

mod downsample;
mod monitor;
mod still;

pub use downsample::downsample_into;
pub use monitor::PrimaryMonitor;
pub use still::StillImage;

/// The downsampled frame a capture source fills on every query.
///
/// Allocated once per session at the configured sample dimensions and
/// reused, so steady-state queries do not grow the heap.
pub type SampleGrid = image::RgbImage;

/// A source of downsampled frames.
///
/// Implementations fill `grid` at its existing dimensions and must not
/// resize it. Errors are per-query: a failed capture leaves the session
/// usable, and the next call may succeed.
pub trait CaptureSource {
    fn capture_downsampled(&mut self, grid: &mut SampleGrid) -> Result<(), CaptureError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Failed to enumerate monitors: {0}")]
    MonitorEnumeration(String),

    #[error("No monitor available to capture")]
    NoMonitor,

    #[error("Screen capture failed: {0}")]
    CaptureFailed(String),

    #[error("Capture produced an empty frame")]
    EmptyFrame,
}
