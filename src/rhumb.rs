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

//! The `rhumb` module contains functions for calculating rhumb line paths
//! between positions on the surface of a sphere.
//!
//! A rhumb line (loxodrome) is a path of constant bearing, it crosses every
//! meridian at the same angle. A rhumb line is a straight line on a
//! [Mercator projection](https://en.wikipedia.org/wiki/Mercator_projection),
//! so the calculations use the difference in projected latitude:
//!
//! Δψ = ψ2 - ψ1, where ψ = ln(tan(π/4 + φ/2))
//!
//! A rhumb line is generally longer than the great circle path between the
//! same positions, see [rhumb line](https://en.wikipedia.org/wiki/Rhumb_line).

#![allow(clippy::suboptimal_flops)]

use crate::sphere::{mercator_latitude, normalise_bearing, normalise_longitude, Radius};
use crate::GeoPoint;
use angle_sc::{Degrees, Radians};
use core::f64::consts::{FRAC_PI_2, PI, TAU};

/// The minimum difference in projected latitude of a rhumb line that is
/// not East-West.
pub const MIN_PROJECTED_DIFFERENCE: f64 = 10e-12;

/// The longitude difference from `a` to `b` in radians, taking the shorter
/// way around the antimeridian.
fn delta_longitude(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let delta_lon = (b.lon().0 - a.lon().0).to_radians();
    if PI < libm::fabs(delta_lon) {
        if 0.0 < delta_lon {
            delta_lon - TAU
        } else {
            delta_lon + TAU
        }
    } else {
        delta_lon
    }
}

/// The ratio of the latitude difference to the projected latitude
/// difference. It tends to the cosine of the latitude on an East-West
/// rhumb line, where both differences are zero.
fn stretch_factor(lat1: f64, delta_lat: f64, delta_psi: f64) -> f64 {
    if delta_psi.is_finite() && MIN_PROJECTED_DIFFERENCE < libm::fabs(delta_psi) {
        delta_lat / delta_psi
    } else {
        tracing::trace!(delta_psi, "rhumb line: East-West stretch factor");
        libm::cos(lat1)
    }
}

/// Calculate the rhumb line distance between a pair of positions.
/// * `a`, `b` - the positions.
/// * `radius` - the radius of the sphere.
///
/// returns the distance in the unit of `radius`.
///
/// # Examples
/// ```
/// use sphere_nav::{rhumb, Degrees, GeoPoint, Radius};
///
/// let dover = GeoPoint::new(Degrees(51.127), Degrees(1.338));
/// let calais = GeoPoint::new(Degrees(50.964), Degrees(1.853));
///
/// let distance = rhumb::distance(&dover, &calais, Radius::default());
/// assert_eq!("40.31", format!("{:.2}", distance));
/// ```
#[must_use]
pub fn distance(a: &GeoPoint, b: &GeoPoint, radius: Radius) -> f64 {
    let lat1 = a.lat().0.to_radians();
    let lat2 = b.lat().0.to_radians();
    let delta_lat = lat2 - lat1;
    let delta_psi = mercator_latitude(Radians(lat2)) - mercator_latitude(Radians(lat1));
    let q = stretch_factor(lat1, delta_lat, delta_psi);
    let delta_lon = delta_longitude(a, b);

    radius.arc_length(Radians(libm::hypot(delta_lat, q * delta_lon)))
}

/// Calculate the constant bearing of the rhumb line from `a` to `b`.
/// * `a`, `b` - the start and finish positions.
///
/// returns the bearing in the range: 0° <= bearing < 360°.
///
/// # Examples
/// ```
/// use sphere_nav::{rhumb, Degrees, GeoPoint};
///
/// let dover = GeoPoint::new(Degrees(51.127), Degrees(1.338));
/// let calais = GeoPoint::new(Degrees(50.964), Degrees(1.853));
///
/// let bearing = rhumb::bearing(&dover, &calais);
/// assert_eq!("116.7", format!("{:.1}", bearing.0));
/// ```
#[must_use]
pub fn bearing(a: &GeoPoint, b: &GeoPoint) -> Degrees {
    let delta_psi = mercator_latitude(Radians(b.lat().0.to_radians()))
        - mercator_latitude(Radians(a.lat().0.to_radians()));
    let delta_lon = delta_longitude(a, b);
    normalise_bearing(libm::atan2(delta_lon, delta_psi).to_degrees())
}

/// Calculate the destination position given a start position, a distance
/// and a constant bearing along a rhumb line.
/// * `origin` - the start position.
/// * `distance` - the distance to travel, in the unit of `radius`.
/// * `bearing` - the constant bearing.
/// * `radius` - the radius of the sphere.
///
/// A rhumb line that would pass a pole is reflected back from it.
#[must_use]
pub fn destination_point(
    origin: &GeoPoint,
    distance: f64,
    bearing: Degrees,
    radius: Radius,
) -> GeoPoint {
    let delta = radius.angular_distance(distance).0;
    let theta = bearing.0.to_radians();
    let lat1 = origin.lat().0.to_radians();

    let delta_lat = delta * libm::cos(theta);
    let mut lat2 = lat1 + delta_lat;
    if FRAC_PI_2 < libm::fabs(lat2) {
        tracing::trace!(lat2, "rhumb destination_point: reflected from pole");
        lat2 = if 0.0 < lat2 { PI - lat2 } else { -PI - lat2 };
    }

    let delta_psi = mercator_latitude(Radians(lat2)) - mercator_latitude(Radians(lat1));
    let q = stretch_factor(lat1, delta_lat, delta_psi);
    let delta_lon = delta * libm::sin(theta) / q;

    GeoPoint::new(
        Degrees(lat2.to_degrees()),
        normalise_longitude(origin.lon().0 + delta_lon.to_degrees()),
    )
}

/// Calculate the position half way along the rhumb line between a pair of
/// positions.
/// * `a`, `b` - the start and finish positions.
///
/// # Examples
/// ```
/// use sphere_nav::{rhumb, Degrees, GeoPoint};
/// use sphere_nav::dms::{DmsFormat, DmsStyle};
///
/// let dover = GeoPoint::new(Degrees(51.127), Degrees(1.338));
/// let calais = GeoPoint::new(Degrees(50.964), Degrees(1.853));
///
/// let position = rhumb::midpoint(&dover, &calais);
/// let format = DmsFormat::new(DmsStyle::Degrees, None);
/// assert_eq!("51.0455°N, 1.5957°E", position.to_dms_string(format));
/// ```
#[must_use]
pub fn midpoint(a: &GeoPoint, b: &GeoPoint) -> GeoPoint {
    let lat1 = a.lat().0.to_radians();
    let lat2 = b.lat().0.to_radians();
    let lon1 = a.lon().0.to_radians();
    // the shorter way across the antimeridian
    let lon2 = lon1 + delta_longitude(a, b);

    let lat3 = 0.5 * (lat1 + lat2);
    let psi1 = mercator_latitude(Radians(lat1));
    let psi2 = mercator_latitude(Radians(lat2));
    let psi3 = mercator_latitude(Radians(lat3));
    let delta_psi = psi2 - psi1;

    let lon3 = ((lon2 - lon1) * psi3 + lon1 * psi2 - lon2 * psi1) / delta_psi;
    let lon3 = if lon3.is_finite() && MIN_PROJECTED_DIFFERENCE < libm::fabs(delta_psi) {
        lon3
    } else {
        tracing::trace!(delta_psi, "rhumb midpoint: East-West rhumb line");
        0.5 * (lon1 + lon2)
    };

    GeoPoint::new(
        Degrees(lat3.to_degrees()),
        normalise_longitude(lon3.to_degrees()),
    )
}
