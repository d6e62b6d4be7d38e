//! Ambient Hue reduces a screen to the one hue that best represents it.
//!
//! The crate wires together:
//! - Capture sources behind one trait (capture/)
//! - Pure RGB/HSB math and hue aggregation (color/)
//! - Session lifecycle and configuration (session.rs)
//!
//! A session grabs a frame from the configured monitor, shrinks it to a
//! small area-averaged grid, converts each pixel from RGB to HSB, and
//! collapses the grid into one hue fraction in `[0, 1)` that a lighting
//! host can push to its lights.
//!
//! ```no_run
//! use ambient_hue::{AmbientSession, SessionConfig};
//!
//! # fn main() -> Result<(), ambient_hue::SessionError> {
//! let mut session = AmbientSession::new(SessionConfig::new(2560, 1440, 32, 18))?;
//! let hue = session.ambient_hue()?;
//! println!("ambient hue: {hue:.3}");
//! session.close();
//! # Ok(())
//! # }
//! ```

pub mod capture;
pub mod color;
pub mod session;

pub use capture::{CaptureError, CaptureSource, SampleGrid, StillImage};
pub use color::{hsb_to_rgb, rgb_to_hsb, Hsb, HueStrategy};
pub use session::{AmbientSession, SessionConfig, SessionError, MAX_SAMPLE_PIXELS};
