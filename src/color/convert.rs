//! RGB to HSB conversion and back, using the six-sector hue model.
//!
//! Hue is a fraction in `[0, 1)` rather than degrees, so callers can scale
//! it to whatever range a lighting backend expects without a divide.

use image::Rgb;

/// A color in hue/saturation/brightness form. All three channels are
/// fractions: hue in `[0, 1)`, saturation and brightness in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsb {
    pub hue: f32,
    pub saturation: f32,
    pub brightness: f32,
}

impl Hsb {
    /// Converts back to an 8-bit RGB pixel. See [`hsb_to_rgb`].
    pub fn to_rgb(self) -> Rgb<u8> {
        hsb_to_rgb(self.hue, self.saturation, self.brightness)
    }
}

/// Converts an 8-bit RGB triple to HSB.
///
/// Achromatic inputs (all channels equal, including pure black) report a
/// saturation of zero and a hue of zero. For everything else the hue is
/// derived from whichever channel dominates, split into six sectors of the
/// color wheel, then normalized so the result always lands in `[0, 1)`.
pub fn rgb_to_hsb(r: u8, g: u8, b: u8) -> Hsb {
    let cmax = r.max(g).max(b);
    let cmin = r.min(g).min(b);

    let brightness = cmax as f32 / 255.0;
    let saturation = if cmax == 0 {
        0.0
    } else {
        (cmax - cmin) as f32 / cmax as f32
    };

    let hue = if saturation == 0.0 {
        0.0
    } else {
        let span = (cmax - cmin) as f32;
        let red_dist = (cmax - r) as f32 / span;
        let green_dist = (cmax - g) as f32 / span;
        let blue_dist = (cmax - b) as f32 / span;

        let sectors = if r == cmax {
            blue_dist - green_dist
        } else if g == cmax {
            2.0 + red_dist - blue_dist
        } else {
            4.0 + green_dist - red_dist
        };

        let mut hue = sectors / 6.0;
        if hue < 0.0 {
            hue += 1.0;
        }
        hue
    };

    Hsb {
        hue,
        saturation,
        brightness,
    }
}

/// Converts an HSB triple to an 8-bit RGB pixel.
///
/// Hue wraps: only its fractional part matters, so `1.25` and `0.25` produce
/// the same color and integral hues are all pure red. Saturation and
/// brightness are expected in `[0, 1]`. Channels round to the nearest step,
/// which keeps a convert/convert-back cycle within one step per channel.
pub fn hsb_to_rgb(hue: f32, saturation: f32, brightness: f32) -> Rgb<u8> {
    if saturation == 0.0 {
        let level = (brightness * 255.0 + 0.5) as u8;
        return Rgb([level, level, level]);
    }

    let h = (hue - hue.floor()) * 6.0;
    let f = h - h.floor();
    let p = brightness * (1.0 - saturation);
    let q = brightness * (1.0 - saturation * f);
    let t = brightness * (1.0 - saturation * (1.0 - f));

    // h stays strictly below 6.0 for any finite hue, so the fallthrough arm
    // only restates sector 5 for exhaustiveness.
    let (r, g, b) = match h as u32 {
        0 => (brightness, t, p),
        1 => (q, brightness, p),
        2 => (p, brightness, t),
        3 => (p, q, brightness),
        4 => (t, p, brightness),
        _ => (brightness, p, q),
    };

    Rgb([
        (r * 255.0 + 0.5) as u8,
        (g * 255.0 + 0.5) as u8,
        (b * 255.0 + 0.5) as u8,
    ])
}
