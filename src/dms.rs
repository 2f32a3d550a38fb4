// Copyright (c) 2025 Ken Barker

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! The `dms` module contains functions for parsing and formatting angles
//! in degrees, minutes and seconds.
//!
//! The formatted strings use the degree `°`, minute `'` and second `"`
//! symbols. Latitudes and longitudes are suffixed with a compass direction
//! instead of a sign.
//!
//! # Examples
//! ```
//! use sphere_nav::dms::{self, DmsFormat, DmsStyle};
//!
//! let format = DmsFormat::default();
//! assert_eq!("48°51'25.2\"N", dms::to_lat(48.857, format));
//! assert_eq!("0°08'19.8\"W", dms::to_lon(-0.138833, format));
//!
//! let paris = dms::parse_dms("48°51'25.2\"N").unwrap();
//! assert!((48.857 - paris).abs() < 1e-9);
//! ```

use crate::error::{Error, Result};
use crate::sphere::normalise_bearing;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::str::FromStr;

/// The value displayed for an angle that cannot be formatted.
pub const NONE_VALUE: &str = "–";

/// The 16 compass points, clockwise from North.
const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// The fields of a formatted angle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DmsStyle {
    /// Decimal degrees, e.g. 48.8570°
    Degrees,
    /// Degrees and decimal minutes, e.g. 48°51.42'
    DegreesMinutes,
    /// Degrees, minutes and decimal seconds, e.g. 48°51'25.2"
    #[default]
    DegreesMinutesSeconds,
}

impl DmsStyle {
    /// The default number of decimal places of the style.
    #[must_use]
    pub const fn default_precision(self) -> usize {
        match self {
            Self::Degrees => 4,
            Self::DegreesMinutes => 2,
            Self::DegreesMinutesSeconds => 1,
        }
    }
}

impl FromStr for DmsStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "d" | "deg" => Ok(Self::Degrees),
            "dm" | "deg+min" => Ok(Self::DegreesMinutes),
            "dms" | "deg+min+sec" => Ok(Self::DegreesMinutesSeconds),
            _ => Err(Error::UnknownStyle(s.to_string())),
        }
    }
}

/// The style and precision of a formatted angle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DmsFormat {
    /// The fields to format.
    pub style: DmsStyle,
    /// The number of decimal places of the last field.
    pub precision: usize,
}

impl DmsFormat {
    /// Construct a `DmsFormat`.
    /// * `style` - the fields to format.
    /// * `precision` - the number of decimal places of the last field,
    ///   the default precision of `style` if None.
    #[must_use]
    pub fn new(style: DmsStyle, precision: Option<usize>) -> Self {
        Self {
            style,
            precision: precision.unwrap_or_else(|| style.default_precision()),
        }
    }
}

impl Default for DmsFormat {
    /// Degrees, minutes and seconds to one decimal place.
    fn default() -> Self {
        Self::new(DmsStyle::default(), None)
    }
}

/// Parse a string of degrees, minutes and seconds into decimal degrees.
/// * `dms` - a signed decimal, e.g. "-0.13", or degrees with optional
///   minutes and seconds in a variety of formats, e.g. `3° 37' 09"W`.
///
/// returns the decimal degrees, negative for a leading `-` or a trailing
/// `S` or `W`. None if the string cannot be parsed.
///
/// # Examples
/// ```
/// use sphere_nav::dms::parse_dms;
///
/// assert_eq!(Some(-0.13), parse_dms("-0.13"));
/// assert_eq!(Some(48.85), parse_dms("48°51'"));
/// assert_eq!(None, parse_dms("north"));
/// ```
#[must_use]
pub fn parse_dms(dms: &str) -> Option<f64> {
    let text = dms.trim();
    if let Ok(degrees) = text.parse::<f64>() {
        return degrees.is_finite().then_some(degrees);
    }

    let components: Vec<&str> = text
        .split(|c: char| !(c.is_ascii_digit() || c == '.'))
        .filter(|component| !component.is_empty())
        .collect();
    if !(1..=3).contains(&components.len()) {
        tracing::trace!(dms, "parse_dms: invalid number of components");
        return None;
    }

    let mut degrees = 0.0;
    for (component, divisor) in components.iter().zip([1.0, 60.0, 3600.0]) {
        degrees += component.parse::<f64>().ok()? / divisor;
    }

    let negative = text.starts_with('-')
        || text.ends_with(|c: char| matches!(c.to_ascii_uppercase(), 'S' | 'W'));
    Some(if negative { -degrees } else { degrees })
}

/// Round a value to a number of decimal places.
#[allow(clippy::cast_precision_loss)]
fn round_to(value: f64, precision: usize) -> f64 {
    let scale = libm::pow(10.0, precision as f64);
    libm::round(value * scale) / scale
}

/// The width of a zero padded field with two integer digits.
const fn field_width(precision: usize) -> usize {
    if precision == 0 {
        2
    } else {
        precision + 3
    }
}

/// Format decimal degrees as degrees, minutes and seconds.
/// * `degrees` - the angle in decimal degrees, its sign is discarded.
/// * `format` - the style and precision.
///
/// returns the formatted angle, None if `degrees` is not finite.
///
/// # Examples
/// ```
/// use sphere_nav::dms::{to_dms, DmsFormat, DmsStyle};
///
/// assert_eq!(Some("48°51'25.2\"".to_string()), to_dms(-48.857, DmsFormat::default()));
///
/// let format = DmsFormat::new(DmsStyle::DegreesMinutes, None);
/// assert_eq!(Some("48°51.42'".to_string()), to_dms(48.857, format));
///
/// let format = DmsFormat::new(DmsStyle::Degrees, Some(2));
/// assert_eq!(Some("48.86°".to_string()), to_dms(48.857, format));
/// ```
#[must_use]
pub fn to_dms(degrees: f64, format: DmsFormat) -> Option<String> {
    if !degrees.is_finite() {
        return None;
    }

    let degrees = libm::fabs(degrees);
    let precision = format.precision;
    let width = field_width(precision);
    let dms = match format.style {
        DmsStyle::Degrees => format!("{degrees:.precision$}°"),
        DmsStyle::DegreesMinutes => {
            let minutes = degrees * 60.0;
            let mut d = libm::floor(minutes / 60.0);
            let mut m = round_to(minutes - d * 60.0, precision);
            if 60.0 <= m {
                d += 1.0;
                m = 0.0;
            }
            format!("{d:.0}°{m:0width$.precision$}'")
        }
        DmsStyle::DegreesMinutesSeconds => {
            let seconds = degrees * 3600.0;
            let mut d = libm::floor(seconds / 3600.0);
            let mut m = libm::floor(seconds / 60.0) % 60.0;
            let mut s = round_to(seconds % 60.0, precision);
            if 60.0 <= s {
                m += 1.0;
                s = 0.0;
            }
            if 60.0 <= m {
                d += 1.0;
                m = 0.0;
            }
            format!("{d:.0}°{m:02.0}'{s:0width$.precision$}\"")
        }
    };
    Some(dms)
}

/// Format decimal degrees as a latitude, suffixed with N or S.
/// * `degrees` - the latitude in decimal degrees.
/// * `format` - the style and precision.
///
/// returns the formatted latitude, `NONE_VALUE` if `degrees` is not finite.
#[must_use]
pub fn to_lat(degrees: f64, format: DmsFormat) -> String {
    to_dms(degrees, format).map_or_else(
        || NONE_VALUE.to_string(),
        |dms| format!("{dms}{}", if degrees < 0.0 { 'S' } else { 'N' }),
    )
}

/// Format decimal degrees as a longitude, suffixed with E or W.
/// * `degrees` - the longitude in decimal degrees.
/// * `format` - the style and precision.
///
/// returns the formatted longitude, `NONE_VALUE` if `degrees` is not finite.
#[must_use]
pub fn to_lon(degrees: f64, format: DmsFormat) -> String {
    to_dms(degrees, format).map_or_else(
        || NONE_VALUE.to_string(),
        |dms| format!("{dms}{}", if degrees < 0.0 { 'W' } else { 'E' }),
    )
}

/// Format decimal degrees as a bearing in the range 0° to 360°.
/// * `degrees` - the bearing in decimal degrees.
/// * `format` - the style and precision.
///
/// returns the formatted bearing, `NONE_VALUE` if `degrees` is not finite.
///
/// # Examples
/// ```
/// use sphere_nav::dms::{to_bearing, DmsFormat, DmsStyle};
///
/// let format = DmsFormat::new(DmsStyle::DegreesMinutes, Some(1));
/// assert_eq!("359°51.7'", to_bearing(-0.138833, format));
/// ```
#[must_use]
pub fn to_bearing(degrees: f64, format: DmsFormat) -> String {
    to_dms(normalise_bearing(degrees).0, format).map_or_else(
        || NONE_VALUE.to_string(),
        // rounding may reach 360°
        |dms| match dms.strip_prefix("360") {
            Some(rest) => format!("0{rest}"),
            None => dms,
        },
    )
}

/// The compass point of a bearing.
/// * `bearing` - the bearing in degrees from North.
/// * `precision` - 1: cardinal, 2: intercardinal, 3: secondary intercardinal,
///   i.e. 4, 8 or 16 compass points.
///
/// returns the name of the nearest compass point, `NONE_VALUE` if `bearing`
/// is not finite.
///
/// # Errors
///
/// `Error::InvalidCompassPrecision` if `precision` is not 1, 2 or 3.
///
/// # Examples
/// ```
/// use sphere_nav::dms::compass_point;
///
/// assert_eq!(Ok("N"), compass_point(30.0, 1));
/// assert_eq!(Ok("NE"), compass_point(30.0, 2));
/// assert_eq!(Ok("NNE"), compass_point(30.0, 3));
/// assert!(compass_point(30.0, 4).is_err());
/// ```
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]
pub fn compass_point(bearing: f64, precision: u8) -> Result<&'static str> {
    if !(1..=3).contains(&precision) {
        return Err(Error::InvalidCompassPrecision(precision));
    }
    if !bearing.is_finite() {
        return Ok(NONE_VALUE);
    }

    let points = 4_usize << (precision - 1);
    let bearing = normalise_bearing(bearing).0;
    let index = libm::round(bearing * points as f64 / 360.0) as usize % points;
    Ok(COMPASS_POINTS[index * (COMPASS_POINTS.len() / points)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use angle_sc::is_within_tolerance;

    #[test]
    fn test_dms_style() {
        assert_eq!(Ok(DmsStyle::Degrees), "d".parse::<DmsStyle>());
        assert_eq!(Ok(DmsStyle::Degrees), "deg".parse::<DmsStyle>());
        assert_eq!(Ok(DmsStyle::DegreesMinutes), "dm".parse::<DmsStyle>());
        assert_eq!(Ok(DmsStyle::DegreesMinutes), "deg+min".parse::<DmsStyle>());
        assert_eq!(
            Ok(DmsStyle::DegreesMinutesSeconds),
            "dms".parse::<DmsStyle>()
        );
        assert_eq!(
            Ok(DmsStyle::DegreesMinutesSeconds),
            "deg+min+sec".parse::<DmsStyle>()
        );
        assert_eq!(
            Err(Error::UnknownStyle("dmx".to_string())),
            "dmx".parse::<DmsStyle>()
        );
    }

    #[test]
    fn test_dms_format() {
        let format = DmsFormat::default();
        assert_eq!(DmsStyle::DegreesMinutesSeconds, format.style);
        assert_eq!(1, format.precision);

        assert_eq!(4, DmsFormat::new(DmsStyle::Degrees, None).precision);
        assert_eq!(2, DmsFormat::new(DmsStyle::DegreesMinutes, None).precision);
        assert_eq!(0, DmsFormat::new(DmsStyle::Degrees, Some(0)).precision);
    }

    #[test]
    fn test_parse_dms() {
        assert_eq!(Some(48.857), parse_dms("48.857000"));
        assert_eq!(Some(-48.857), parse_dms("-48.857000"));
        assert_eq!(Some(48.0), parse_dms("48°"));
        assert_eq!(Some(48.85), parse_dms("48°51'"));

        let degrees = parse_dms("48°51'25.2'N").unwrap();
        assert!(is_within_tolerance(48.857, degrees, 1e-12));
        let degrees = parse_dms("48°51'25.2\"S").unwrap();
        assert!(is_within_tolerance(-48.857, degrees, 1e-12));
        let degrees = parse_dms("-48°51'25.2'").unwrap();
        assert!(is_within_tolerance(-48.857, degrees, 1e-12));
        let degrees = parse_dms(" 3° 37' 09\"w ").unwrap();
        assert!(is_within_tolerance(-3.6191666666666666, degrees, 1e-12));
        let degrees = parse_dms("0 08 19.8 E").unwrap();
        assert!(is_within_tolerance(0.1388333333333333, degrees, 1e-12));

        assert_eq!(None, parse_dms(""));
        assert_eq!(None, parse_dms("N"));
        assert_eq!(None, parse_dms("inf"));
        assert_eq!(None, parse_dms("1°2'3\"4"));
        assert_eq!(None, parse_dms("48.8.5°"));
    }

    #[test]
    fn test_to_dms() {
        assert_eq!(
            Some("48°51'25.2\"".to_string()),
            to_dms(-48.857, DmsFormat::default())
        );

        let format = DmsFormat::new(DmsStyle::DegreesMinutes, None);
        assert_eq!(Some("48°51.42'".to_string()), to_dms(48.857, format));
        let format = DmsFormat::new(DmsStyle::DegreesMinutes, Some(1));
        assert_eq!(Some("48°51.4'".to_string()), to_dms(48.857, format));

        let format = DmsFormat::new(DmsStyle::Degrees, None);
        assert_eq!(Some("48.8570°".to_string()), to_dms(48.857, format));
        let format = DmsFormat::new(DmsStyle::Degrees, Some(2));
        assert_eq!(Some("48.86°".to_string()), to_dms(48.857, format));

        // Zero padded fields
        assert_eq!(
            Some("0°08'19.8\"".to_string()),
            to_dms(0.138833, DmsFormat::default())
        );
        let format = DmsFormat::new(DmsStyle::DegreesMinutesSeconds, Some(0));
        assert_eq!(Some("0°08'20\"".to_string()), to_dms(0.138833, format));
        let format = DmsFormat::new(DmsStyle::DegreesMinutes, None);
        assert_eq!(Some("0°08.33'".to_string()), to_dms(0.138833, format));

        assert_eq!(None, to_dms(f64::NAN, DmsFormat::default()));
        assert_eq!(None, to_dms(f64::INFINITY, DmsFormat::default()));
    }

    #[test]
    fn test_to_dms_carry() {
        assert_eq!(
            Some("1°00'00.0\"".to_string()),
            to_dms(0.99999999, DmsFormat::default())
        );
        assert_eq!(
            Some("10°59'00.0\"".to_string()),
            to_dms(10.983333333, DmsFormat::default())
        );

        let format = DmsFormat::new(DmsStyle::DegreesMinutes, None);
        assert_eq!(Some("11°00.00'".to_string()), to_dms(10.99999, format));
    }

    #[test]
    fn test_to_lat_lon() {
        let format = DmsFormat::default();
        assert_eq!("48°51'25.2\"N", to_lat(48.857, format));
        assert_eq!("48°51'25.2\"S", to_lat(-48.857, format));
        assert_eq!("0°08'19.8\"E", to_lon(0.138833, format));
        assert_eq!("0°08'19.8\"W", to_lon(-0.138833, format));

        assert_eq!(NONE_VALUE, to_lat(f64::NAN, format));
        assert_eq!(NONE_VALUE, to_lon(f64::NEG_INFINITY, format));
    }

    #[test]
    fn test_to_bearing() {
        let format = DmsFormat::new(DmsStyle::DegreesMinutes, Some(1));
        assert_eq!("359°51.7'", to_bearing(-0.138833, format));
        assert_eq!("90°00.0'", to_bearing(450.0, format));

        // Rounded up to 360°
        let format = DmsFormat::new(DmsStyle::Degrees, Some(1));
        assert_eq!("0.0°", to_bearing(359.99, format));
        assert_eq!("0.0°", to_bearing(360.0, format));

        assert_eq!(NONE_VALUE, to_bearing(f64::NAN, format));
    }

    #[test]
    fn test_compass_point() {
        assert_eq!(Ok("N"), compass_point(30.0, 1));
        assert_eq!(Ok("NE"), compass_point(30.0, 2));
        assert_eq!(Ok("NNE"), compass_point(30.0, 3));

        assert_eq!(Ok("N"), compass_point(359.0, 3));
        assert_eq!(Ok("W"), compass_point(-90.0, 1));
        assert_eq!(Ok("SSW"), compass_point(200.0, 3));
        assert_eq!(Ok("NW"), compass_point(315.0, 2));
        assert_eq!(Ok(NONE_VALUE), compass_point(f64::NAN, 3));

        assert_eq!(Err(Error::InvalidCompassPrecision(0)), compass_point(30.0, 0));
        assert_eq!(Err(Error::InvalidCompassPrecision(4)), compass_point(30.0, 4));
    }
}
