// Copyright (c) 2026 Ken Barker

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

//! The geodesic module contains the solutions of the direct and inverse
//! geodesic problems on an ellipsoid.
//!
//! The solutions share one contract, so a caller may fall back to another
//! solution when one fails. At a pole every solution measures azimuths
//! from the meridian of the pole's longitude, so leaving the North pole on
//! azimuth `α` follows the meridian `lon + π − α`. E.g.:
//!
//! ```
//! use ellipsoid_geodesy::*;
//!
//! let start = GeoPoint::from_degrees(0.0, 0.0, &WGS84_ELLIPSOID).unwrap();
//! let end = GeoPoint::from_degrees(0.5, 180.0, &WGS84_ELLIPSOID).unwrap();
//!
//! let solution = GeodesicSolution::ALL
//!     .iter()
//!     .find_map(|solution| solution.inverse(&start, &end).ok())
//!     .unwrap();
//! assert!(solution.distance.0 > 19_900_000.0);
//! ```

pub mod bessel;
pub mod gauss;
pub mod haversine;
pub mod vincenty;

use crate::error::ensure_finite;
use crate::{Angle, Azimuth, Ellipsoid, GeoPoint, GeodesyError, Latitude, Longitude, Metres, Result};
use angle_sc::Validate;
use core::f64::consts::PI;
use core::fmt;
use core::str::FromStr;

/// The solution of the direct geodesic problem.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectSolution<'a> {
    /// The end point of the geodesic.
    pub end: GeoPoint<'a>,
    /// The azimuth at the end point, pointing back to the start point.
    pub reverse_azimuth: Azimuth,
}

/// The solution of the inverse geodesic problem.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InverseSolution {
    /// The length of the geodesic.
    pub distance: Metres,
    /// The azimuth at the start point.
    pub azimuth: Azimuth,
    /// The azimuth at the end point, pointing back to the start point.
    pub reverse_azimuth: Azimuth,
}

impl InverseSolution {
    /// The solution between coincident points: zero distance, a North
    /// azimuth and a South reverse azimuth.
    #[must_use]
    pub fn coincident() -> Self {
        Self {
            distance: Metres(0.0),
            azimuth: Azimuth::NORTH,
            reverse_azimuth: Azimuth::NORTH.reverse(),
        }
    }
}

/// Whether `lat` is at a pole.
///
/// The azimuth at a pole is measured from the meridian of the point's own
/// longitude, as the limit of approaching the pole along that meridian.
pub(crate) fn is_at_pole(lat: Latitude) -> bool {
    libm::cos(lat.radians()) < f64::EPSILON
}

/// The azimuth at the pole `lat` of the meridian `delta_long` east of the
/// pole's meridian.
pub(crate) fn azimuth_from_pole(lat: Latitude, delta_long: f64) -> Azimuth {
    if 0.0 < lat.radians() {
        Azimuth::new(PI - delta_long)
    } else {
        Azimuth::new(delta_long)
    }
}

/// The meridian leaving the pole `lat`, with longitude `lon`, on `azimuth`.
pub(crate) fn meridian_from_pole(lat: Latitude, lon: Longitude, azimuth: Azimuth) -> Longitude {
    if 0.0 < lat.radians() {
        Longitude::new(lon.radians() + PI - azimuth.radians())
    } else {
        Longitude::new(lon.radians() + azimuth.radians())
    }
}

/// A geodesic defined by its start point, length and start azimuth.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geodesic<'a> {
    start: GeoPoint<'a>,
    length: Metres,
    azimuth: Azimuth,
}

impl Validate for Geodesic<'_> {
    /// Test whether a `Geodesic` is valid, i.e. whether its length is
    /// finite and not negative.
    fn is_valid(&self) -> bool {
        self.length.0.is_finite() && 0.0 <= self.length.0
    }
}

impl<'a> Geodesic<'a> {
    /// Construct a `Geodesic`.
    /// * `start` - the start point.
    /// * `length` - the length of the geodesic.
    /// * `azimuth` - the azimuth at the start point.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `length` is negative or not finite.
    pub fn new(start: GeoPoint<'a>, length: Metres, azimuth: Azimuth) -> Result<Self> {
        validate_distance(length)?;
        Ok(Self {
            start,
            length,
            azimuth,
        })
    }

    /// The start point of the geodesic.
    #[must_use]
    pub const fn start(&self) -> GeoPoint<'a> {
        self.start
    }

    /// The length of the geodesic.
    #[must_use]
    pub const fn length(&self) -> Metres {
        self.length
    }

    /// The azimuth at the start point.
    #[must_use]
    pub const fn azimuth(&self) -> Azimuth {
        self.azimuth
    }
}

fn validate_distance(distance: Metres) -> Result<Metres> {
    let value = ensure_finite("distance", distance.0)?;
    if value < 0.0 {
        Err(GeodesyError::invalid_parameter(
            "distance",
            format!("{value} m is negative"),
        ))
    } else {
        Ok(distance)
    }
}

/// The solutions of the geodesic problems.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeodesicSolution {
    /// Vincenty's iterative solution on the auxiliary sphere.
    Vincenty,
    /// Bessel's method on the auxiliary sphere, with Karney's series.
    Bessel,
    /// The Gauss mid-latitude formulae, for short lines.
    GaussMidLatitude,
    /// The spherical haversine approximation, using the mean radius.
    Haversine,
}

impl GeodesicSolution {
    /// All of the solutions, most accurate first.
    pub const ALL: [Self; 4] = [
        Self::Vincenty,
        Self::Bessel,
        Self::GaussMidLatitude,
        Self::Haversine,
    ];

    /// The name of the solution.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Vincenty => "Vincenty",
            Self::Bessel => "Bessel",
            Self::GaussMidLatitude => "GaussMidLatitude",
            Self::Haversine => "Haversine",
        }
    }

    /// Solve the direct geodesic problem: find the end point and reverse
    /// azimuth of a geodesic from its start point, length and azimuth.
    /// * `start` - the start point.
    /// * `distance` - the length of the geodesic.
    /// * `azimuth` - the azimuth at the start point.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `distance` is negative or not finite,
    /// `Convergence` if an iterative solution does not converge,
    /// `Domain` if a Gauss mid-latitude line passes a pole.
    pub fn direct<'a>(
        self,
        start: &GeoPoint<'a>,
        distance: Metres,
        azimuth: Azimuth,
    ) -> Result<DirectSolution<'a>> {
        let distance = validate_distance(distance)?;
        match self {
            Self::Vincenty => vincenty::direct(start, distance, azimuth),
            Self::Bessel => Ok(bessel::direct(start, distance, azimuth)),
            Self::GaussMidLatitude => gauss::direct(start, distance, azimuth),
            Self::Haversine => Ok(haversine::direct(start, distance, azimuth)),
        }
    }

    /// Solve the inverse geodesic problem: find the length and azimuths of
    /// the geodesic between two points.
    /// * `start`, `end` - the start and end points.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if the points are on different ellipsoids,
    /// `Convergence` if an iterative solution does not converge.
    pub fn inverse(self, start: &GeoPoint, end: &GeoPoint) -> Result<InverseSolution> {
        if !start.is_on(end.ellipsoid()) {
            return Err(GeodesyError::invalid_parameter(
                "end",
                "the points are on different ellipsoids",
            ));
        }
        match self {
            Self::Vincenty => vincenty::inverse(start, end),
            Self::Bessel => bessel::inverse(start, end),
            Self::GaussMidLatitude => Ok(gauss::inverse(start, end)),
            Self::Haversine => Ok(haversine::inverse(start, end)),
        }
    }

    /// Solve the direct geodesic problem from a latitude and longitude.
    /// * `ellipsoid` - the `Ellipsoid`.
    /// * `lat`, `lon` - the start point.
    /// * `distance` - the length of the geodesic.
    /// * `azimuth` - the azimuth at the start point.
    ///
    /// # Errors
    ///
    /// See [`direct`](Self::direct).
    pub fn direct_from_lat_lon<'a>(
        self,
        ellipsoid: &'a Ellipsoid,
        lat: Angle,
        lon: Angle,
        distance: Metres,
        azimuth: Angle,
    ) -> Result<DirectSolution<'a>> {
        let start = GeoPoint::new(Latitude::from(lat), Longitude::from(lon), ellipsoid);
        self.direct(&start, distance, Azimuth::from(azimuth))
    }

    /// Solve the inverse geodesic problem from latitudes and longitudes.
    /// * `ellipsoid` - the `Ellipsoid`.
    /// * `lat1`, `lon1` - the start point.
    /// * `lat2`, `lon2` - the end point.
    ///
    /// # Errors
    ///
    /// See [`inverse`](Self::inverse).
    pub fn inverse_from_lat_lon(
        self,
        ellipsoid: &Ellipsoid,
        lat1: Angle,
        lon1: Angle,
        lat2: Angle,
        lon2: Angle,
    ) -> Result<InverseSolution> {
        let start = GeoPoint::new(Latitude::from(lat1), Longitude::from(lon1), ellipsoid);
        let end = GeoPoint::new(Latitude::from(lat2), Longitude::from(lon2), ellipsoid);
        self.inverse(&start, &end)
    }

    /// Solve the direct geodesic problem of a `Geodesic`.
    ///
    /// # Errors
    ///
    /// See [`direct`](Self::direct).
    pub fn direct_geodesic<'a>(self, geodesic: &Geodesic<'a>) -> Result<DirectSolution<'a>> {
        self.direct(&geodesic.start, geodesic.length, geodesic.azimuth)
    }
}

impl fmt::Display for GeodesicSolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GeodesicSolution {
    type Err = GeodesyError;

    /// Look up a solution by name, ignoring case, spaces, hyphens and
    /// underscores, e.g. "Vincenty" or "gauss mid-latitude".
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "vincenty" => Ok(Self::Vincenty),
            "bessel" => Ok(Self::Bessel),
            "gaussmidlatitude" | "gauss" => Ok(Self::GaussMidLatitude),
            "haversine" => Ok(Self::Haversine),
            _ => Err(GeodesyError::invalid_parameter(
                "solution",
                format!("unknown geodesic solution: {s}"),
            )),
        }
    }
}
