//! Public surface of the color math domain.
//!
//! Pure functions and types only; nothing in here touches the OS or
//! allocates beyond the aggregator's bucket storage.

mod convert;
mod dominant;

pub use convert::{hsb_to_rgb, rgb_to_hsb, Hsb};
pub use dominant::{HueAggregator, HueStrategy, HUE_BUCKETS};
