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

//! The `great_circle` module contains functions for calculating great circle
//! paths between positions on the surface of a sphere.
//!
//! A great circle is the intersection of a sphere with a plane through its
//! centre. An arc of a great circle is the shortest path between two
//! positions on the surface of the sphere, see
//! [great-circle navigation](https://en.wikipedia.org/wiki/Great-circle_navigation).
//!
//! The functions are based on Ed Williams'
//! [Aviation Formulary](https://edwilliams.org/avform147.htm) and solve the
//! spherical triangles on a unit sphere. Distances are converted using a
//! `Radius`, so the functions are independent of the unit of distance.
//!
//! Degenerate geometry, e.g. coincident positions or parallel paths, is
//! not an error: the functions that may not have a solution return an
//! `Option`.

#![allow(clippy::suboptimal_flops)]
#![allow(clippy::similar_names)]

use crate::sphere::{clamped_acos, clamped_asin, normalise_bearing, normalise_longitude, Radius};
use crate::GeoPoint;
use angle_sc::{Angle, Degrees, Radians};
use unit_sphere::{great_circle, vector, Vector3d};

/// The minimum angular distance between distinct positions.
pub const MIN_ANGULAR_DISTANCE: Radians = Radians(great_circle::MIN_VALUE);

/// The longitude difference from `a` to `b` as an `Angle`.
fn delta_longitude(a: &GeoPoint, b: &GeoPoint) -> Angle {
    Angle::from(Degrees(b.lon().0 - a.lon().0))
}

/// Calculate the position at the end of a great circle arc.
/// * `origin` - the start position.
/// * `lat1` - the start latitude.
/// * `azimuth` - the azimuth at the start position.
/// * `sigma` - the angular length of the arc.
#[must_use]
fn calculate_position(origin: &GeoPoint, lat1: Angle, azimuth: Angle, sigma: Angle) -> GeoPoint {
    let lat2 = great_circle::calculate_latitude(lat1, azimuth, sigma);
    let delta_lon = libm::atan2(
        azimuth.sin().0 * sigma.sin().0 * lat1.cos().0,
        sigma.cos().0 - lat1.sin().0 * lat2.sin().0,
    );
    GeoPoint::new(
        Degrees::from(lat2),
        normalise_longitude(origin.lon().0 + delta_lon.to_degrees()),
    )
}

/// Calculate the great circle angular distance between a pair of positions
/// using the haversine formula.
/// * `a`, `b` - the positions.
///
/// returns the angular distance on the unit sphere.
#[must_use]
pub fn angular_distance(a: &GeoPoint, b: &GeoPoint) -> Radians {
    let lat1 = Angle::from(a.lat());
    let lat2 = Angle::from(b.lat());
    let half_delta_lat = Angle::from(Degrees(0.5 * (b.lat().0 - a.lat().0)));
    let half_delta_lon = Angle::from(Degrees(0.5 * (b.lon().0 - a.lon().0)));

    let haversine = half_delta_lat.sin().0 * half_delta_lat.sin().0
        + lat1.cos().0 * lat2.cos().0 * half_delta_lon.sin().0 * half_delta_lon.sin().0;
    let haversine = haversine.clamp(0.0, 1.0);
    Radians(2.0 * libm::atan2(libm::sqrt(haversine), libm::sqrt(1.0 - haversine)))
}

/// Calculate the great circle distance between a pair of positions.
/// * `a`, `b` - the positions.
/// * `radius` - the radius of the sphere.
///
/// returns the distance in the unit of `radius`.
///
/// # Examples
/// ```
/// use sphere_nav::{great_circle, Degrees, GeoPoint, Radius};
///
/// let cambridge = GeoPoint::new(Degrees(52.205), Degrees(0.119));
/// let paris = GeoPoint::new(Degrees(48.857), Degrees(2.351));
///
/// let distance = great_circle::distance(&cambridge, &paris, Radius::default());
/// assert_eq!("404.3", format!("{:.1}", distance));
///
/// let distance = great_circle::distance(&cambridge, &paris, Radius(3959.0));
/// assert_eq!("251.2", format!("{:.1}", distance));
/// ```
#[must_use]
pub fn distance(a: &GeoPoint, b: &GeoPoint, radius: Radius) -> f64 {
    radius.arc_length(angular_distance(a, b))
}

/// The great circle azimuth from `a` to `b`.
fn azimuth(a: &GeoPoint, b: &GeoPoint) -> Angle {
    great_circle::calculate_gc_azimuth(
        Angle::from(a.lat()),
        Angle::from(b.lat()),
        delta_longitude(a, b),
    )
}

/// Calculate the initial bearing of the great circle path from `a` to `b`.
/// * `a`, `b` - the start and finish positions.
///
/// returns the bearing in the range: 0° <= bearing < 360°.
#[must_use]
pub fn initial_bearing(a: &GeoPoint, b: &GeoPoint) -> Degrees {
    normalise_bearing(Degrees::from(azimuth(a, b)).0)
}

/// Calculate the final bearing of the great circle path from `a` to `b`,
/// i.e. the reverse of the initial bearing from `b` to `a`.
/// * `a`, `b` - the start and finish positions.
///
/// returns the bearing in the range: 0° <= bearing < 360°.
#[must_use]
pub fn final_bearing(a: &GeoPoint, b: &GeoPoint) -> Degrees {
    normalise_bearing(initial_bearing(b, a).0 + 180.0)
}

/// Calculate the position half way along the great circle path between
/// a pair of positions.
/// * `a`, `b` - the start and finish positions.
#[must_use]
pub fn midpoint(a: &GeoPoint, b: &GeoPoint) -> GeoPoint {
    let lat1 = Angle::from(a.lat());
    let lat2 = Angle::from(b.lat());
    let delta_lon = delta_longitude(a, b);

    let bx = lat2.cos().0 * delta_lon.cos().0;
    let by = lat2.cos().0 * delta_lon.sin().0;
    let cos_lat1_bx = lat1.cos().0 + bx;

    let lat = libm::atan2(lat1.sin().0 + lat2.sin().0, libm::hypot(cos_lat1_bx, by));
    let lon = a.lon().0 + libm::atan2(by, cos_lat1_bx).to_degrees();
    GeoPoint::new(Degrees(lat.to_degrees()), normalise_longitude(lon))
}

/// Calculate the position at a fraction of the way along the great circle
/// path between a pair of positions.
/// * `a`, `b` - the start and finish positions.
/// * `fraction` - the fraction along the path: 0.0 at `a`, 1.0 at `b`.
///   Values outside of the range 0.0 to 1.0 extrapolate along the great circle.
///
/// returns `a` if the positions coincide. The path between antipodal
/// positions is undefined.
///
/// # Examples
/// ```
/// use sphere_nav::{great_circle, Degrees, GeoPoint};
/// use sphere_nav::dms::{DmsFormat, DmsStyle};
///
/// let cambridge = GeoPoint::new(Degrees(52.205), Degrees(0.119));
/// let paris = GeoPoint::new(Degrees(48.857), Degrees(2.351));
///
/// let position = great_circle::intermediate_point(&cambridge, &paris, 0.25);
/// let format = DmsFormat::new(DmsStyle::Degrees, None);
/// assert_eq!("51.3721°N, 0.7073°E", position.to_dms_string(format));
/// ```
#[must_use]
pub fn intermediate_point(a: &GeoPoint, b: &GeoPoint, fraction: f64) -> GeoPoint {
    let delta = angular_distance(a, b);
    if delta.0 < MIN_ANGULAR_DISTANCE.0 {
        tracing::trace!(?delta, "intermediate_point: coincident positions");
        return GeoPoint::new(a.lat(), normalise_longitude(a.lon().0));
    }

    let sin_delta = libm::sin(delta.0);
    let weight_a = libm::sin((1.0 - fraction) * delta.0) / sin_delta;
    let weight_b = libm::sin(fraction * delta.0) / sin_delta;

    let lat1 = Angle::from(a.lat());
    let lon1 = Angle::from(a.lon());
    let lat2 = Angle::from(b.lat());
    let lon2 = Angle::from(b.lon());
    let point = Vector3d::new(
        weight_a * lat1.cos().0 * lon1.cos().0 + weight_b * lat2.cos().0 * lon2.cos().0,
        weight_a * lat1.cos().0 * lon1.sin().0 + weight_b * lat2.cos().0 * lon2.sin().0,
        weight_a * lat1.sin().0 + weight_b * lat2.sin().0,
    );

    GeoPoint::new(
        Degrees::from(vector::latitude(&point)),
        normalise_longitude(Degrees::from(vector::longitude(&point)).0),
    )
}

/// Calculate the destination position given a start position, a distance
/// and an initial bearing along a great circle.
/// * `origin` - the start position.
/// * `distance` - the distance to travel, in the unit of `radius`.
/// * `bearing` - the initial bearing.
/// * `radius` - the radius of the sphere.
///
/// # Examples
/// ```
/// use sphere_nav::{great_circle, Degrees, GeoPoint, Radius};
/// use sphere_nav::dms::{DmsFormat, DmsStyle};
///
/// let greenwich = GeoPoint::new(Degrees(51.4778), Degrees(-0.0015));
/// let position = great_circle::destination_point(&greenwich, 7.794, Degrees(300.7), Radius::default());
///
/// let format = DmsFormat::new(DmsStyle::Degrees, None);
/// assert_eq!("51.5135°N, 0.0983°W", position.to_dms_string(format));
/// ```
#[must_use]
pub fn destination_point(
    origin: &GeoPoint,
    distance: f64,
    bearing: Degrees,
    radius: Radius,
) -> GeoPoint {
    let sigma = Angle::from(radius.angular_distance(distance));
    calculate_position(origin, Angle::from(origin.lat()), Angle::from(bearing), sigma)
}

/// Calculate the intersection of two great circle paths given their start
/// positions and initial bearings.
/// * `p1`, `bearing1` - the start position and initial bearing of the first path.
/// * `p2`, `bearing2` - the start position and initial bearing of the second path.
///
/// returns the intersection position ahead of both start positions, or None if:
/// - the start positions coincide;
/// - the paths are coincident, i.e. there are infinite intersections;
/// - the intersection is ambiguous, i.e. behind one of the start positions.
///
/// # Examples
/// ```
/// use sphere_nav::{great_circle, Degrees, GeoPoint};
/// use sphere_nav::dms::{DmsFormat, DmsStyle};
///
/// let stansted = GeoPoint::new(Degrees(51.8853), Degrees(0.2545));
/// let charles_de_gaulle = GeoPoint::new(Degrees(49.0034), Degrees(2.5735));
///
/// let result = great_circle::intersection(&stansted, Degrees(108.547), &charles_de_gaulle, Degrees(32.435));
/// let position = result.unwrap();
///
/// let format = DmsFormat::new(DmsStyle::Degrees, None);
/// assert_eq!("50.9078°N, 4.5084°E", position.to_dms_string(format));
/// ```
#[must_use]
pub fn intersection(
    p1: &GeoPoint,
    bearing1: Degrees,
    p2: &GeoPoint,
    bearing2: Degrees,
) -> Option<GeoPoint> {
    let delta12 = angular_distance(p1, p2);
    if delta12.0 < MIN_ANGULAR_DISTANCE.0 {
        tracing::trace!("intersection: coincident start positions");
        return None;
    }

    let lat1 = Angle::from(p1.lat());
    let lat2 = Angle::from(p2.lat());
    let sigma12 = Angle::from(delta12);

    // The bearings between the start positions
    let theta_a = Angle::from(clamped_acos(
        (lat2.sin().0 - lat1.sin().0 * sigma12.cos().0) / (sigma12.sin().0 * lat1.cos().0),
    ));
    let theta_b = Angle::from(clamped_acos(
        (lat1.sin().0 - lat2.sin().0 * sigma12.cos().0) / (sigma12.sin().0 * lat2.cos().0),
    ));
    let (theta12, theta21) = if 0.0 < delta_longitude(p1, p2).sin().0 {
        (theta_a, -theta_b)
    } else {
        (-theta_a, theta_b)
    };

    // The angles at the start positions of the triangle p1, p2, intersection
    let theta13 = Angle::from(bearing1);
    let alpha1 = theta13 - theta12;
    let alpha2 = theta21 - Angle::from(bearing2);
    let sin_alpha1 = alpha1.sin().0;
    let sin_alpha2 = alpha2.sin().0;

    if libm::fabs(sin_alpha1) < vector::MIN_SIN_ANGLE
        && libm::fabs(sin_alpha2) < vector::MIN_SIN_ANGLE
    {
        tracing::trace!("intersection: coincident paths");
        return None;
    }
    if sin_alpha1 * sin_alpha2 < 0.0 {
        tracing::trace!("intersection: ambiguous intersection");
        return None;
    }

    let alpha3 = Angle::from(clamped_acos(
        -alpha1.cos().0 * alpha2.cos().0 + sin_alpha1 * sin_alpha2 * sigma12.cos().0,
    ));
    let sigma13 = Angle::from_y_x(
        sigma12.sin().0 * sin_alpha1 * sin_alpha2,
        alpha2.cos().0 + alpha1.cos().0 * alpha3.cos().0,
    );

    Some(calculate_position(p1, lat1, theta13, sigma13))
}

/// Calculate the angular along track and across track distances of a
/// position from the great circle path through `path_start` and `path_end`.
///
/// returns the along track and across track distances on the unit sphere.
#[must_use]
fn calculate_atd_and_xtd(
    point: &GeoPoint,
    path_start: &GeoPoint,
    path_end: &GeoPoint,
) -> (Radians, Radians) {
    let delta13 = angular_distance(path_start, point);
    if delta13.0 < MIN_ANGULAR_DISTANCE.0 {
        (Radians(0.0), Radians(0.0))
    } else {
        let sigma13 = Angle::from(delta13);
        let theta13 = azimuth(path_start, point);
        let theta12 = azimuth(path_start, path_end);

        let xtd = clamped_asin(sigma13.sin().0 * (theta13 - theta12).sin().0);
        let atd = clamped_acos(sigma13.cos().0 / libm::cos(xtd.0));
        (
            Radians(libm::copysign(atd.0, (theta12 - theta13).cos().0)),
            xtd,
        )
    }
}

/// Calculate the signed distance of a position from the great circle path
/// through `path_start` and `path_end`.
/// * `point` - the position.
/// * `path_start`, `path_end` - positions on the great circle path.
/// * `radius` - the radius of the sphere.
///
/// returns the cross track distance in the unit of `radius`:
/// negative if `point` is to the left of the path, positive if to the right.
///
/// # Examples
/// ```
/// use sphere_nav::{great_circle, Degrees, GeoPoint, Radius, MEAN_EARTH_RADIUS};
/// use angle_sc::is_within_tolerance;
///
/// let point = GeoPoint::new(Degrees(53.2611), Degrees(-0.7972));
/// let path_start = GeoPoint::new(Degrees(53.3206), Degrees(-1.7297));
/// let path_end = GeoPoint::new(Degrees(53.1887), Degrees(0.1334));
///
/// let xtd = great_circle::cross_track_distance(&point, &path_start, &path_end, Radius::from(MEAN_EARTH_RADIUS));
/// assert!(is_within_tolerance(-307.55, xtd, 0.01));
/// ```
#[must_use]
pub fn cross_track_distance(
    point: &GeoPoint,
    path_start: &GeoPoint,
    path_end: &GeoPoint,
    radius: Radius,
) -> f64 {
    let (_, xtd) = calculate_atd_and_xtd(point, path_start, path_end);
    radius.arc_length(xtd)
}

/// Calculate the distance from `path_start` to the position on the great
/// circle path closest to `point`.
/// * `point` - the position.
/// * `path_start`, `path_end` - positions on the great circle path.
/// * `radius` - the radius of the sphere.
///
/// returns the along track distance in the unit of `radius`,
/// negative if the closest position is behind `path_start`.
#[must_use]
pub fn along_track_distance(
    point: &GeoPoint,
    path_start: &GeoPoint,
    path_end: &GeoPoint,
    radius: Radius,
) -> f64 {
    let (atd, _) = calculate_atd_and_xtd(point, path_start, path_end);
    radius.arc_length(atd)
}

/// Calculate the maximum latitude reached by a great circle path, using
/// Clairaut's relation.
/// * `origin` - a position on the great circle path.
/// * `bearing` - the bearing of the path at `origin`.
///
/// returns the maximum latitude, negate it for the minimum latitude.
#[must_use]
pub fn max_latitude(origin: &GeoPoint, bearing: Degrees) -> Degrees {
    let lat = Angle::from(origin.lat());
    let theta = Angle::from(bearing);
    let clairaut = libm::fabs(theta.sin().0 * lat.cos().0);
    Degrees(clamped_acos(clairaut).0.to_degrees())
}

/// Calculate the longitudes where the great circle through a pair of
/// positions crosses a latitude.
/// * `p1`, `p2` - positions on the great circle.
/// * `latitude` - the latitude to cross.
///
/// returns the pair of longitudes, or None if:
/// - the great circle does not reach `latitude`;
/// - the great circle is undefined, i.e. the positions coincide;
/// - the great circle is `latitude`, i.e. the Equator, with infinite crossings.
///
/// # Examples
/// ```
/// use sphere_nav::{great_circle, Degrees, GeoPoint};
///
/// let cambridge = GeoPoint::new(Degrees(52.205), Degrees(0.119));
/// let paris = GeoPoint::new(Degrees(48.857), Degrees(2.351));
///
/// assert!(great_circle::crossing_parallels(&cambridge, &paris, Degrees(50.0)).is_some());
/// assert!(great_circle::crossing_parallels(&cambridge, &paris, Degrees(80.0)).is_none());
/// ```
#[must_use]
pub fn crossing_parallels(
    p1: &GeoPoint,
    p2: &GeoPoint,
    latitude: Degrees,
) -> Option<(Degrees, Degrees)> {
    let lat = Angle::from(latitude);
    let lat1 = Angle::from(p1.lat());
    let lat2 = Angle::from(p2.lat());
    let delta_lon = delta_longitude(p1, p2);

    let x = lat1.sin().0 * lat2.cos().0 * lat.cos().0 * delta_lon.sin().0;
    let y = lat1.sin().0 * lat2.cos().0 * lat.cos().0 * delta_lon.cos().0
        - lat1.cos().0 * lat2.sin().0 * lat.cos().0;
    let z = lat1.cos().0 * lat2.cos().0 * lat.sin().0 * delta_lon.sin().0;

    let sq_xy = x * x + y * y;
    if sq_xy < vector::MIN_SQ_NORM || sq_xy < z * z {
        tracing::trace!(?latitude, "crossing_parallels: latitude not reached");
        return None;
    }

    let lon_max = libm::atan2(-y, x).to_degrees();
    let delta_lon_i = clamped_acos(z / libm::sqrt(sq_xy)).0.to_degrees();
    let lon = p1.lon().0 + lon_max;
    Some((
        normalise_longitude(lon - delta_lon_i),
        normalise_longitude(lon + delta_lon_i),
    ))
}
