//! The sampling session and its lifecycle.
//!
//! A session owns everything a query needs: the capture source, the
//! reusable sample grid, and the hue aggregator. Dropping it releases the
//! capture backend; [`AmbientSession::close`] does the same explicitly and
//! turns later queries into [`SessionError::Closed`].
//!
//! Queries take `&mut self`, so one session serves one query at a time.
//! Hosts that poll from several threads should wrap the session in a
//! `Mutex` or give each thread its own.

use std::time::Instant;

use image::Rgb;
use serde::{Deserialize, Serialize};

use crate::capture::{CaptureError, CaptureSource, PrimaryMonitor, SampleGrid};
use crate::color::{hsb_to_rgb, HueAggregator, HueStrategy};

/// Upper bound on the sample grid, 16.7 million pixels (a 4096x4096 grid,
/// 48 MiB of RGB). Screens are sampled at a few thousand pixels in
/// practice, so anything near the cap is a config bug.
pub const MAX_SAMPLE_PIXELS: u64 = 1 << 24;

/// Dimensions and strategy for one session.
///
/// The screen dimensions describe the display being captured and steer
/// monitor selection; the sample dimensions set the downsampled grid the
/// hue is computed from. The strategy defaults to channel averaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub screen_width: u32,
    pub screen_height: u32,
    pub sample_width: u32,
    pub sample_height: u32,
    #[serde(default)]
    pub strategy: HueStrategy,
}

impl SessionConfig {
    /// Builds a config with the default strategy. Dimensions are validated
    /// when the session opens, not here.
    pub fn new(
        screen_width: u32,
        screen_height: u32,
        sample_width: u32,
        sample_height: u32,
    ) -> Self {
        Self {
            screen_width,
            screen_height,
            sample_width,
            sample_height,
            strategy: HueStrategy::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Invalid dimensions {width}x{height}: width and height must be nonzero")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Sample grid of {requested} pixels exceeds the {max}-pixel budget")]
    GridTooLarge { requested: u64, max: u64 },

    #[error("Capture backend unavailable: {0}")]
    Backend(String),

    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error("Session is closed")]
    Closed,
}

/// A live sampling session against one capture source.
pub struct AmbientSession {
    config: SessionConfig,
    state: Option<SessionState>,
}

struct SessionState {
    source: Box<dyn CaptureSource>,
    grid: SampleGrid,
    aggregator: HueAggregator,
}

impl AmbientSession {
    /// Opens a session against the live screen.
    ///
    /// Validates the config and locates the monitor up front, so a host
    /// finds out at startup rather than on the first query.
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        validate(&config)?;
        let source = PrimaryMonitor::locate(config.screen_width, config.screen_height)
            .map_err(|e| SessionError::Backend(e.to_string()))?;
        Ok(Self::assemble(config, Box::new(source)))
    }

    /// Opens a session against a caller-supplied capture source.
    ///
    /// This is how tests and headless environments run the pipeline, with a
    /// [`crate::capture::StillImage`] or any other [`CaptureSource`].
    pub fn with_source(
        config: SessionConfig,
        source: Box<dyn CaptureSource>,
    ) -> Result<Self, SessionError> {
        validate(&config)?;
        Ok(Self::assemble(config, source))
    }

    fn assemble(config: SessionConfig, source: Box<dyn CaptureSource>) -> Self {
        log::info!(
            "Ambient session opened: {}x{} screen sampled at {}x{}",
            config.screen_width,
            config.screen_height,
            config.sample_width,
            config.sample_height
        );
        Self {
            config,
            state: Some(SessionState {
                source,
                grid: SampleGrid::new(config.sample_width, config.sample_height),
                aggregator: HueAggregator::new(config.strategy),
            }),
        }
    }

    /// Captures one downsampled frame and returns its dominant hue as a
    /// fraction in `[0, 1)`.
    ///
    /// Capture failures are returned to the caller and leave the session
    /// open; the next query starts from scratch.
    pub fn ambient_hue(&mut self) -> Result<f32, SessionError> {
        let state = self.state.as_mut().ok_or(SessionError::Closed)?;

        let start = Instant::now();
        state.source.capture_downsampled(&mut state.grid)?;
        let hue = state.aggregator.dominant_hue(&state.grid);
        log::debug!(
            "Ambient hue {:.4} computed in {}ms",
            hue,
            start.elapsed().as_millis()
        );
        Ok(hue)
    }

    /// Like [`ambient_hue`](Self::ambient_hue), but returns the hue as a
    /// fully saturated, fully bright RGB color ready for a light.
    pub fn ambient_color(&mut self) -> Result<Rgb<u8>, SessionError> {
        let hue = self.ambient_hue()?;
        Ok(hsb_to_rgb(hue, 1.0, 1.0))
    }

    /// Releases the capture backend. Safe to call more than once; only the
    /// first call does anything.
    pub fn close(&mut self) {
        if self.state.take().is_some() {
            log::info!("Ambient session closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.state.is_none()
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }
}

fn validate(config: &SessionConfig) -> Result<(), SessionError> {
    for (width, height) in [
        (config.screen_width, config.screen_height),
        (config.sample_width, config.sample_height),
    ] {
        if width == 0 || height == 0 {
            return Err(SessionError::InvalidDimensions { width, height });
        }
    }

    let requested = config.sample_width as u64 * config.sample_height as u64;
    if requested > MAX_SAMPLE_PIXELS {
        return Err(SessionError::GridTooLarge {
            requested,
            max: MAX_SAMPLE_PIXELS,
        });
    }
    Ok(())
}
