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

//! The `sphere` module contains the radius of the sphere used to model the
//! Earth and the numeric helpers shared by the `great_circle` and `rhumb`
//! modules.
//!
//! All of the navigation calculations are performed on a unit sphere.
//! A `Radius` converts between angular distances on the unit sphere and
//! distances on the Earth, in whatever unit the `Radius` is measured in.

#![allow(clippy::suboptimal_flops)]

use angle_sc::{trig, Degrees, Radians, Validate};
use icao_units::non_si::NauticalMiles;
use icao_units::si::Metres;

/// The mean Earth radius in kilometres, the IUGG mean radius rounded to the
/// nearest metre.
pub const MEAN_EARTH_RADIUS_KM: f64 = 6_371.009;

/// The mean Earth radius in metres.
pub const MEAN_EARTH_RADIUS: Metres = Metres(6_371_009.0);

/// The radius of the sphere.
///
/// The unit of a `Radius` is the unit of every distance passed to, or
/// returned from, a calculation using it.
/// The default `Radius` is the mean Earth radius in kilometres.
///
/// # Examples
/// ```
/// use sphere_nav::{Metres, Radius, MEAN_EARTH_RADIUS, MEAN_EARTH_RADIUS_KM};
///
/// assert_eq!(MEAN_EARTH_RADIUS_KM, Radius::default().0);
/// assert_eq!(6_371_009.0, Radius::from(MEAN_EARTH_RADIUS).0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Radius(pub f64);

impl Default for Radius {
    fn default() -> Self {
        Self(MEAN_EARTH_RADIUS_KM)
    }
}

impl From<Metres> for Radius {
    fn from(radius: Metres) -> Self {
        Self(radius.0)
    }
}

impl From<NauticalMiles> for Radius {
    fn from(radius: NauticalMiles) -> Self {
        Self(radius.0)
    }
}

impl Validate for Radius {
    /// Test whether a `Radius` is valid, i.e. finite and positive.
    fn is_valid(&self) -> bool {
        self.0.is_finite() && 0.0 < self.0
    }
}

impl Radius {
    /// Convert a distance on the sphere to an angular distance on the
    /// unit sphere.
    /// * `distance` - the distance, in the same unit as the `Radius`.
    #[must_use]
    pub fn angular_distance(self, distance: f64) -> Radians {
        Radians(distance / self.0)
    }

    /// Convert an angular distance on the unit sphere to a distance on the
    /// sphere.
    /// * `angle` - the angular distance.
    ///
    /// returns the distance, in the same unit as the `Radius`.
    #[must_use]
    pub fn arc_length(self, angle: Radians) -> f64 {
        angle.0 * self.0
    }
}

/// Euclidean remainder, `f64::rem_euclid` is not available in `core`.
fn euclidean_remainder(value: f64, divisor: f64) -> f64 {
    let remainder = value % divisor;
    if remainder < 0.0 {
        remainder + divisor
    } else {
        remainder
    }
}

/// Normalise a longitude into the range: -180° < longitude <= 180°.
/// * `degrees` - the longitude in degrees.
///
/// # Examples
/// ```
/// use sphere_nav::sphere::normalise_longitude;
///
/// assert_eq!(-170.0, normalise_longitude(190.0).0);
/// assert_eq!(180.0, normalise_longitude(-180.0).0);
/// ```
#[must_use]
pub fn normalise_longitude(degrees: f64) -> Degrees {
    if -180.0 < degrees && degrees <= 180.0 {
        return Degrees(degrees);
    }

    let longitude = euclidean_remainder(degrees + 540.0, 360.0) - 180.0;
    Degrees(if longitude <= -180.0 {
        longitude + 360.0
    } else {
        longitude
    })
}

/// Normalise a bearing into the range: 0° <= bearing < 360°.
/// * `degrees` - the bearing in degrees.
#[must_use]
pub fn normalise_bearing(degrees: f64) -> Degrees {
    let bearing = euclidean_remainder(degrees, 360.0);
    // NaN is propagated
    Degrees(if bearing < 360.0 || bearing.is_nan() {
        bearing
    } else {
        0.0
    })
}

/// Clamp the argument of an inverse trigonometric function into the range
/// -1.0 <= value <= 1.0, since rounding errors can take it slightly outside.
fn clamp_unit(value: f64) -> f64 {
    if 1.0 < libm::fabs(value) {
        tracing::trace!(value, "inverse trigonometric argument clamped");
    }
    trig::UnitNegRange::clamp(value).0
}

/// The arcsine of a clamped value.
#[must_use]
pub fn clamped_asin(value: f64) -> Radians {
    Radians(libm::asin(clamp_unit(value)))
}

/// The arccosine of a clamped value.
#[must_use]
pub fn clamped_acos(value: f64) -> Radians {
    Radians(libm::acos(clamp_unit(value)))
}

/// Calculate the projected (Mercator) latitude: ln(tan(π/4 + φ/2)).
/// * `lat` - the latitude.
///
/// returns the projected latitude, infinite at the poles.
#[must_use]
pub fn mercator_latitude(lat: Radians) -> f64 {
    libm::log(libm::tan(core::f64::consts::FRAC_PI_4 + 0.5 * lat.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use angle_sc::is_within_tolerance;

    #[test]
    fn test_radius() {
        let radius = Radius::default();
        assert_eq!(MEAN_EARTH_RADIUS_KM, radius.0);
        assert!(radius.is_valid());
        assert!(!Radius(0.0).is_valid());
        assert!(!Radius(f64::INFINITY).is_valid());

        assert_eq!(Radius(MEAN_EARTH_RADIUS.0), Radius::from(MEAN_EARTH_RADIUS));
        assert_eq!(Radius(3_440.0), Radius::from(NauticalMiles(3_440.0)));

        let angle = radius.angular_distance(MEAN_EARTH_RADIUS_KM);
        assert_eq!(1.0, angle.0);
        assert_eq!(MEAN_EARTH_RADIUS_KM, radius.arc_length(angle));

        let radius_clone = radius;
        assert!(radius_clone == radius);
        println!("Radius: {:?}", radius);
    }

    #[test]
    fn test_normalise_longitude() {
        assert_eq!(0.0, normalise_longitude(0.0).0);
        assert_eq!(180.0, normalise_longitude(180.0).0);
        assert_eq!(180.0, normalise_longitude(-180.0).0);
        assert_eq!(180.0, normalise_longitude(540.0).0);
        assert_eq!(-170.0, normalise_longitude(190.0).0);
        assert_eq!(170.0, normalise_longitude(-190.0).0);
        assert_eq!(10.0, normalise_longitude(730.0).0);
        assert_eq!(-10.0, normalise_longitude(-730.0).0);
        assert!(normalise_longitude(f64::NAN).0.is_nan());

        for i in -1080..1081 {
            let longitude = normalise_longitude(0.5 * f64::from(i)).0;
            assert!(-180.0 < longitude && longitude <= 180.0);
        }
    }

    #[test]
    fn test_normalise_bearing() {
        assert_eq!(0.0, normalise_bearing(0.0).0);
        assert_eq!(0.0, normalise_bearing(360.0).0);
        assert_eq!(270.0, normalise_bearing(-90.0).0);
        assert_eq!(90.0, normalise_bearing(450.0).0);
        assert_eq!(0.0, normalise_bearing(-1.0e-20).0);
        assert!(normalise_bearing(f64::NAN).0.is_nan());
        assert!(normalise_bearing(f64::INFINITY).0.is_nan());

        for i in -1080..1081 {
            let bearing = normalise_bearing(0.5 * f64::from(i)).0;
            assert!((0.0..360.0).contains(&bearing));
        }
    }

    #[test]
    fn test_clamped_inverse_trig() {
        assert_eq!(core::f64::consts::FRAC_PI_2, clamped_asin(1.0 + 1.0e-15).0);
        assert_eq!(-core::f64::consts::FRAC_PI_2, clamped_asin(-1.0 - 1.0e-15).0);
        assert_eq!(0.0, clamped_acos(1.0 + 1.0e-15).0);
        assert_eq!(core::f64::consts::PI, clamped_acos(-1.0 - 1.0e-15).0);
        assert!(is_within_tolerance(
            core::f64::consts::FRAC_PI_6,
            clamped_asin(0.5).0,
            f64::EPSILON
        ));
    }

    #[test]
    fn test_mercator_latitude() {
        assert!(is_within_tolerance(0.0, mercator_latitude(Radians(0.0)), f64::EPSILON));

        let lat = Radians(50_f64.to_radians());
        assert!(is_within_tolerance(
            -mercator_latitude(lat),
            mercator_latitude(Radians(-lat.0)),
            4.0 * f64::EPSILON
        ));
        assert!(is_within_tolerance(
            1.0106831886830212,
            mercator_latitude(lat),
            4.0 * f64::EPSILON
        ));
    }
}
