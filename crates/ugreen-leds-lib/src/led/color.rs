//! RGB color model for the sysfs `color` attribute.
//!
//! Colors use the kernel attribute format `"R G B"` (three decimal integers).
//! Components are kept as `i32` and never clamped: the multicolor driver
//! receives whatever the operator configured, out-of-range values included.

use std::fmt;

use serde::{Serialize, Serializer};

/// Color returned for any string that is not exactly three tokens.
pub const DEFAULT_COLOR: Rgb = Rgb::new(255, 255, 255);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: i32,
    pub g: i32,
    pub b: i32,
}

impl Rgb {
    pub const fn new(r: i32, g: i32, b: i32) -> Self {
        Rgb { r, g, b }
    }

    /// Linear interpolation from `self` to `other`, `t` in `[0, 1]`.
    ///
    /// Each channel is truncated toward zero, so the midpoint of 255 and 0 is 127.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let channel = |a: i32, b: i32| (f64::from(a) + t * (f64::from(b) - f64::from(a))) as i32;
        Rgb {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse an `"R G B"` string.
///
/// Accepts exactly three whitespace-separated tokens; anything else yields
/// [`DEFAULT_COLOR`]. A token that is not a decimal integer reads as `0`.
pub fn parse_rgb(s: &str) -> Rgb {
    let parts: Vec<&str> = s.split_whitespace().collect();
    let [r, g, b] = parts.as_slice() else {
        return DEFAULT_COLOR;
    };
    let num = |t: &str| t.parse::<i32>().unwrap_or(0);
    Rgb::new(num(r), num(g), num(b))
}
