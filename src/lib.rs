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

//! sphere-nav
//!
//! [![License](https://img.shields.io/badge/License-MIT-blue)](https://opensource.org/license/mit/)
//!
//! A library for performing navigation calculations on the surface of a
//! sphere, see *Figure 1*.
//!
//! <img src="https://upload.wikimedia.org/wikipedia/commons/thumb/c/cb/Illustration_of_great-circle_distance.svg/800px-Illustration_of_great-circle_distance.svg.png" width="400">
//!
//! *Figure 1 A great circle arc between two points on a sphere
//! [CheCheDaWaff](https://commons.wikimedia.org/wiki/User:CheCheDaWaff), [CC BY-SA 4.0](https://creativecommons.org/licenses/by-sa/4.0), via Wikimedia Commons*
//!
//! The Earth is not a sphere, but modelling it as one with the mean Earth
//! radius is accurate to within about 0.5% and is much simpler than
//! calculating geodesics on an ellipsoid.
//!
//! ## Great circle navigation
//!
//! The shortest path between two points on the surface of a sphere is an arc of a
//! [great circle](https://en.wikipedia.org/wiki/Great_circle).
//! The [`great_circle`] module calculates:
//!
//! - the distance, initial and final bearings between positions;
//! - the midpoint and intermediate points of a great circle path;
//! - the destination position from a distance and bearing;
//! - the intersection of two great circle paths;
//! - the across track and along track distances of a position from a path;
//! - the maximum latitude of a path and the longitudes where it crosses a latitude.
//!
//! ## Rhumb line navigation
//!
//! A [rhumb line](https://en.wikipedia.org/wiki/Rhumb_line) is a path of
//! constant bearing. It is longer than a great circle arc, but it is simple
//! to steer. The [`rhumb`] module calculates the distance, bearing,
//! destination position and midpoint of a rhumb line.
//!
//! ## Design
//!
//! The library is based on the formulae in Ed Williams'
//! [Aviation Formulary](https://edwilliams.org/avform147.htm).
//!
//! A position is a [`GeoPoint`]: a latitude and longitude in degrees.
//! The functions take and return `GeoPoint`s and accept the radius of the
//! sphere, a [`Radius`], so distances may be in any unit.
//! The default `Radius` is the mean Earth radius in kilometres.
//! The [`dms`] module formats and parses angles in degrees, minutes and seconds.
//!
//! The library depends upon the following crates:
//!
//! - [angle-sc](https://crates.io/crates/angle-sc) - to define `Angle`,
//!   `Degrees` and `Radians` and perform trigonometric calculations;
//! - [unit-sphere](https://crates.io/crates/unit-sphere) - to define `LatLong`
//!   and perform great-circle and vector calculations.
//! - [icao_units](https://crates.io/crates/icao-units) - to define `Metres` and
//!   `NauticalMiles` so they can be used as a `Radius`.
//!
//! The library is declared [no_std](https://docs.rust-embedded.org/book/intro/no-std.html)
//! so it can be used in embedded applications.
//!
//! # Examples
//! ```
//! use sphere_nav::{Degrees, GeoPoint, Radius};
//!
//! let cambridge = GeoPoint::new(Degrees(52.205), Degrees(0.119));
//! let paris = GeoPoint::new(Degrees(48.857), Degrees(2.351));
//!
//! let distance = cambridge.distance_to(&paris, None);
//! assert_eq!("404.3", format!("{:.1}", distance));
//!
//! let distance = cambridge.distance_to(&paris, Some(Radius(3959.0)));
//! assert_eq!("251.2", format!("{:.1}", distance));
//!
//! assert_eq!("48°51'25.2\"N, 2°21'03.6\"E", paris.to_string());
//! ```

#![cfg_attr(not(test), no_std)]

extern crate alloc;
extern crate angle_sc;
extern crate icao_units;
extern crate unit_sphere;

pub mod dms;
pub mod error;
pub mod great_circle;
pub mod rhumb;
pub mod sphere;

pub use angle_sc::{Angle, Degrees, Radians, Validate};
pub use error::Error;
pub use icao_units::non_si::NauticalMiles;
pub use icao_units::si::Metres;
pub use sphere::{Radius, MEAN_EARTH_RADIUS, MEAN_EARTH_RADIUS_KM};
pub use unit_sphere::LatLong;

use alloc::format;
use alloc::string::String;
use core::fmt;
use dms::DmsFormat;

/// A position on the surface of a sphere.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    /// The latitude in degrees.
    lat: f64,
    /// The longitude in degrees.
    lon: f64,
}

impl Validate for GeoPoint {
    /// Test whether a `GeoPoint` is valid.
    /// I.e.: -90 <= lat <= 90 and -180 < lon <= 180
    fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && -180.0 < self.lon && self.lon <= 180.0
    }
}

impl GeoPoint {
    /// Constructor.
    /// * `lat` - the latitude.
    /// * `lon` - the longitude.
    ///
    /// The values are not checked, see `is_valid`.
    #[must_use]
    pub const fn new(lat: Degrees, lon: Degrees) -> Self {
        Self {
            lat: lat.0,
            lon: lon.0,
        }
    }

    /// Construct a `GeoPoint` from latitude and longitude strings in degrees,
    /// minutes and seconds, see `dms::parse_dms`.
    ///
    /// returns None if either string cannot be parsed.
    ///
    /// # Examples
    /// ```
    /// use sphere_nav::GeoPoint;
    ///
    /// let greenwich = GeoPoint::parse("51°28'40\"N", "0°00'05\"W").unwrap();
    /// assert!((51.477777 - greenwich.lat().0).abs() < 1e-6);
    /// assert!((-0.001389 - greenwich.lon().0).abs() < 1e-6);
    /// ```
    #[must_use]
    pub fn parse(lat: &str, lon: &str) -> Option<Self> {
        let lat = dms::parse_dms(lat)?;
        let lon = dms::parse_dms(lon)?;
        Some(Self::new(Degrees(lat), Degrees(lon)))
    }

    /// The latitude.
    #[must_use]
    pub const fn lat(&self) -> Degrees {
        Degrees(self.lat)
    }

    /// The longitude.
    #[must_use]
    pub const fn lon(&self) -> Degrees {
        Degrees(self.lon)
    }

    /// Convert to a `LatLong`, None if the `GeoPoint` is not valid.
    #[must_use]
    pub fn to_lat_long(&self) -> Option<LatLong> {
        self.is_valid().then(|| LatLong::new(self.lat(), self.lon()))
    }

    /// The great circle distance to another position.
    /// * `other` - the other position.
    /// * `radius` - the radius of the sphere, the mean Earth radius in km if None.
    #[must_use]
    pub fn distance_to(&self, other: &Self, radius: Option<Radius>) -> f64 {
        great_circle::distance(self, other, radius.unwrap_or_default())
    }

    /// The initial bearing of the great circle path to another position.
    #[must_use]
    pub fn initial_bearing_to(&self, other: &Self) -> Degrees {
        great_circle::initial_bearing(self, other)
    }

    /// The final bearing of the great circle path to another position.
    #[must_use]
    pub fn final_bearing_to(&self, other: &Self) -> Degrees {
        great_circle::final_bearing(self, other)
    }

    /// The position half way along the great circle path to another position.
    #[must_use]
    pub fn midpoint_to(&self, other: &Self) -> Self {
        great_circle::midpoint(self, other)
    }

    /// The position at a `fraction` of the great circle path to another position.
    #[must_use]
    pub fn intermediate_point_to(&self, other: &Self, fraction: f64) -> Self {
        great_circle::intermediate_point(self, other, fraction)
    }

    /// The destination position after travelling a `distance` along a
    /// great circle from this position at an initial `bearing`.
    /// * `radius` - the radius of the sphere, the mean Earth radius in km if None.
    #[must_use]
    pub fn destination_point(
        &self,
        distance: f64,
        bearing: Degrees,
        radius: Option<Radius>,
    ) -> Self {
        great_circle::destination_point(self, distance, bearing, radius.unwrap_or_default())
    }

    /// The signed distance of this position from the great circle path
    /// through `path_start` and `path_end`, negative to the left of the path.
    /// * `radius` - the radius of the sphere, the mean Earth radius in km if None.
    #[must_use]
    pub fn cross_track_distance_to(
        &self,
        path_start: &Self,
        path_end: &Self,
        radius: Option<Radius>,
    ) -> f64 {
        great_circle::cross_track_distance(self, path_start, path_end, radius.unwrap_or_default())
    }

    /// The distance from `path_start` to the position on the great circle
    /// path through `path_start` and `path_end` closest to this position.
    /// * `radius` - the radius of the sphere, the mean Earth radius in km if None.
    #[must_use]
    pub fn along_track_distance_to(
        &self,
        path_start: &Self,
        path_end: &Self,
        radius: Option<Radius>,
    ) -> f64 {
        great_circle::along_track_distance(self, path_start, path_end, radius.unwrap_or_default())
    }

    /// The maximum latitude of the great circle path from this position at `bearing`.
    #[must_use]
    pub fn max_latitude(&self, bearing: Degrees) -> Degrees {
        great_circle::max_latitude(self, bearing)
    }

    /// The rhumb line distance to another position.
    /// * `radius` - the radius of the sphere, the mean Earth radius in km if None.
    #[must_use]
    pub fn rhumb_distance_to(&self, other: &Self, radius: Option<Radius>) -> f64 {
        rhumb::distance(self, other, radius.unwrap_or_default())
    }

    /// The bearing of the rhumb line to another position.
    #[must_use]
    pub fn rhumb_bearing_to(&self, other: &Self) -> Degrees {
        rhumb::bearing(self, other)
    }

    /// The destination position after travelling a `distance` along a
    /// rhumb line from this position at a constant `bearing`.
    /// * `radius` - the radius of the sphere, the mean Earth radius in km if None.
    #[must_use]
    pub fn rhumb_destination_point(
        &self,
        distance: f64,
        bearing: Degrees,
        radius: Option<Radius>,
    ) -> Self {
        rhumb::destination_point(self, distance, bearing, radius.unwrap_or_default())
    }

    /// The position half way along the rhumb line to another position.
    #[must_use]
    pub fn rhumb_midpoint_to(&self, other: &Self) -> Self {
        rhumb::midpoint(self, other)
    }

    /// Format the position as a latitude and longitude, separated by a comma.
    /// * `format` - the style and precision of the angles.
    ///
    /// # Examples
    /// ```
    /// use sphere_nav::{Degrees, GeoPoint};
    /// use sphere_nav::dms::{DmsFormat, DmsStyle};
    ///
    /// let london = GeoPoint::new(Degrees(51.521470), Degrees(-0.138833));
    /// let format = DmsFormat::new(DmsStyle::Degrees, Some(6));
    /// assert_eq!("51.521470°N, 0.138833°W", london.to_dms_string(format));
    /// ```
    #[must_use]
    pub fn to_dms_string(&self, format: DmsFormat) -> String {
        format!(
            "{}, {}",
            dms::to_lat(self.lat, format),
            dms::to_lon(self.lon, format)
        )
    }
}

impl From<&LatLong> for GeoPoint {
    fn from(lat_long: &LatLong) -> Self {
        Self::new(lat_long.lat(), lat_long.lon())
    }
}

impl fmt::Display for GeoPoint {
    /// Degrees, minutes and seconds to one decimal place.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_dms_string(DmsFormat::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use angle_sc::is_within_tolerance;
    use crate::dms::DmsStyle;

    const CAMBRIDGE: GeoPoint = GeoPoint::new(Degrees(52.205), Degrees(0.119));
    const PARIS: GeoPoint = GeoPoint::new(Degrees(48.857), Degrees(2.351));

    #[test]
    fn test_geo_point_traits() {
        let a = GeoPoint::new(Degrees(48.857), Degrees(2.351));
        assert_eq!(Degrees(48.857), a.lat());
        assert_eq!(Degrees(2.351), a.lon());
        assert!(a.is_valid());

        let a_clone = a;
        assert!(a_clone == PARIS);
        assert_eq!(GeoPoint::new(Degrees(0.0), Degrees(0.0)), GeoPoint::default());

        println!("GeoPoint: {:?}", a);
        assert_eq!("48°51'25.2\"N, 2°21'03.6\"E", a.to_string());
    }

    #[test]
    fn test_geo_point_is_valid() {
        assert!(GeoPoint::new(Degrees(90.0), Degrees(180.0)).is_valid());
        assert!(GeoPoint::new(Degrees(-90.0), Degrees(-179.9)).is_valid());
        assert!(!GeoPoint::new(Degrees(90.1), Degrees(0.0)).is_valid());
        assert!(!GeoPoint::new(Degrees(0.0), Degrees(-180.0)).is_valid());
        assert!(!GeoPoint::new(Degrees(0.0), Degrees(180.1)).is_valid());
        assert!(!GeoPoint::new(Degrees(f64::NAN), Degrees(0.0)).is_valid());
    }

    #[test]
    fn test_geo_point_lat_long() {
        let lat_long = PARIS.to_lat_long().unwrap();
        assert_eq!(PARIS.lat(), lat_long.lat());
        assert_eq!(PARIS.lon(), lat_long.lon());
        assert_eq!(PARIS, GeoPoint::from(&lat_long));

        assert!(GeoPoint::new(Degrees(91.0), Degrees(0.0))
            .to_lat_long()
            .is_none());
    }

    #[test]
    fn test_geo_point_parse() {
        let result = GeoPoint::parse("48°51'25.2\"N", "2°21'03.6\"E").unwrap();
        assert!(is_within_tolerance(PARIS.lat().0, result.lat().0, 1e-12));
        assert!(is_within_tolerance(PARIS.lon().0, result.lon().0, 1e-12));

        let result = GeoPoint::parse("-33.8688", "151.2093").unwrap();
        assert_eq!(GeoPoint::new(Degrees(-33.8688), Degrees(151.2093)), result);

        assert!(GeoPoint::parse("north", "2.351").is_none());
        assert!(GeoPoint::parse("48.857", "").is_none());
    }

    #[test]
    fn test_great_circle_methods() {
        let distance = CAMBRIDGE.distance_to(&PARIS, None);
        assert_eq!("404.3", format!("{:.1}", distance));
        let distance = CAMBRIDGE.distance_to(&PARIS, Some(Radius(3959.0)));
        assert_eq!("251.2", format!("{:.1}", distance));

        assert_eq!("156.2", format!("{:.1}", CAMBRIDGE.initial_bearing_to(&PARIS).0));
        assert_eq!("157.9", format!("{:.1}", CAMBRIDGE.final_bearing_to(&PARIS).0));

        let format = DmsFormat::new(DmsStyle::Degrees, None);
        assert_eq!(
            "50.5363°N, 1.2746°E",
            CAMBRIDGE.midpoint_to(&PARIS).to_dms_string(format)
        );
        assert_eq!(
            "51.3721°N, 0.7073°E",
            CAMBRIDGE
                .intermediate_point_to(&PARIS, 0.25)
                .to_dms_string(format)
        );

        let greenwich = GeoPoint::new(Degrees(51.4778), Degrees(-0.0015));
        assert_eq!(
            "51.5135°N, 0.0983°W",
            greenwich
                .destination_point(7.794, Degrees(300.7), None)
                .to_dms_string(format)
        );

        let point = GeoPoint::new(Degrees(53.2611), Degrees(-0.7972));
        let path_start = GeoPoint::new(Degrees(53.3206), Degrees(-1.7297));
        let path_end = GeoPoint::new(Degrees(53.1887), Degrees(0.1334));
        let radius = Some(Radius::from(MEAN_EARTH_RADIUS));
        assert_eq!(
            "-307.6",
            format!("{:.1}", point.cross_track_distance_to(&path_start, &path_end, radius))
        );
        assert_eq!(
            "62331.6",
            format!("{:.1}", point.along_track_distance_to(&path_start, &path_end, radius))
        );

        let bearing = CAMBRIDGE.initial_bearing_to(&PARIS);
        assert_eq!("75.66", format!("{:.2}", CAMBRIDGE.max_latitude(bearing).0));
    }

    #[test]
    fn test_rhumb_methods() {
        let dover = GeoPoint::new(Degrees(51.127), Degrees(1.338));
        let calais = GeoPoint::new(Degrees(50.964), Degrees(1.853));

        let distance = dover.rhumb_distance_to(&calais, None);
        assert_eq!("40.3078", format!("{:.4}", distance));
        let bearing = dover.rhumb_bearing_to(&calais);
        assert_eq!("116.7", format!("{:.1}", bearing.0));

        let position = dover.rhumb_destination_point(distance, bearing, None);
        assert!(is_within_tolerance(calais.lat().0, position.lat().0, 1e-9));
        assert!(is_within_tolerance(calais.lon().0, position.lon().0, 1e-9));

        let format = DmsFormat::new(DmsStyle::Degrees, None);
        assert_eq!(
            "51.0455°N, 1.5957°E",
            dover.rhumb_midpoint_to(&calais).to_dms_string(format)
        );

        let radius = Radius::from(NauticalMiles(3_440.065));
        let distance = dover.rhumb_distance_to(&calais, Some(radius));
        assert_eq!("21.76", format!("{:.2}", distance));
    }

    #[test]
    fn test_intersection_display() {
        let stansted = GeoPoint::new(Degrees(51.8853), Degrees(0.2545));
        let charles_de_gaulle = GeoPoint::new(Degrees(49.0034), Degrees(2.5735));
        let result = great_circle::intersection(
            &stansted,
            Degrees(108.547),
            &charles_de_gaulle,
            Degrees(32.435),
        );
        let format = DmsFormat::new(DmsStyle::Degrees, None);
        assert_eq!("50.9078°N, 4.5084°E", result.unwrap().to_dms_string(format));
    }
}
