//! Reduces a sampled frame to one dominant hue.
//!
//! Two strategies are available. `AverageColor` sums every pixel's RGB
//! channels with integer math and converts the truncated average once, so a
//! frame that is half red and half blue reads as magenta. `HueHistogram`
//! converts every pixel and votes into 360 hue buckets, so a frame that is
//! mostly blue with a small red window still reads as blue.

use image::RgbImage;
use serde::{Deserialize, Serialize};

use crate::color::convert::rgb_to_hsb;

/// Number of histogram buckets, one per degree of the color wheel.
pub const HUE_BUCKETS: usize = 360;

/// How a sampled frame is collapsed into a single hue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HueStrategy {
    /// Average all channels first, then convert the mean color to HSB.
    #[default]
    AverageColor,
    /// Convert each pixel to HSB and pick the most common hue bucket.
    HueHistogram,
}

/// Accumulates pixel statistics for one query at a time.
///
/// The bucket storage is reused across queries and wiped at the start of
/// each histogram pass, so a query never sees counts from the previous
/// frame.
#[derive(Debug)]
pub struct HueAggregator {
    strategy: HueStrategy,
    buckets: Vec<u32>,
}

impl HueAggregator {
    pub fn new(strategy: HueStrategy) -> Self {
        Self {
            strategy,
            buckets: vec![0; HUE_BUCKETS],
        }
    }

    /// Collapses the grid into one hue fraction in `[0, 1)`.
    ///
    /// An empty grid reports a hue of zero, as does a grid with no
    /// saturated pixels under the histogram strategy.
    pub fn dominant_hue(&mut self, grid: &RgbImage) -> f32 {
        match self.strategy {
            HueStrategy::AverageColor => average_color_hue(grid),
            HueStrategy::HueHistogram => self.histogram_hue(grid),
        }
    }

    fn histogram_hue(&mut self, grid: &RgbImage) -> f32 {
        self.buckets.fill(0);

        for pixel in grid.pixels() {
            let hsb = rgb_to_hsb(pixel[0], pixel[1], pixel[2]);
            // Grays carry no hue information, counting them would let a
            // dark desktop outvote every actual color.
            if hsb.saturation == 0.0 {
                continue;
            }
            let bucket = ((hsb.hue * HUE_BUCKETS as f32) as usize).min(HUE_BUCKETS - 1);
            self.buckets[bucket] += 1;
        }

        // First maximum wins, so ties resolve to the lowest bucket.
        let mut best: Option<usize> = None;
        let mut best_count = 0u32;
        for (bucket, &count) in self.buckets.iter().enumerate() {
            if count > best_count {
                best = Some(bucket);
                best_count = count;
            }
        }

        match best {
            Some(bucket) => bucket as f32 / HUE_BUCKETS as f32,
            None => 0.0,
        }
    }
}

/// Averages the channels across the whole grid with truncating integer
/// division, then converts that one mean color to HSB.
fn average_color_hue(grid: &RgbImage) -> f32 {
    let pixel_count = grid.pixels().len() as u64;
    if pixel_count == 0 {
        return 0.0;
    }

    let mut r_sum = 0u64;
    let mut g_sum = 0u64;
    let mut b_sum = 0u64;
    for pixel in grid.pixels() {
        r_sum += pixel[0] as u64;
        g_sum += pixel[1] as u64;
        b_sum += pixel[2] as u64;
    }

    let r = (r_sum / pixel_count) as u8;
    let g = (g_sum / pixel_count) as u8;
    let b = (b_sum / pixel_count) as u8;
    rgb_to_hsb(r, g, b).hue
}
