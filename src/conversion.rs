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

//! The conversion module contains functions to convert between geodetic
//! (latitude, longitude, height) and geocentric (X, Y, Z) coordinates.
//!
//! The geocentric to geodetic conversion starts from Bowring's
//! [1976](https://doi.org/10.1179/sre.1976.23.181.323) estimate of the
//! latitude, refines it by fixed point iteration and calculates the height
//! with Bowring's 1985 expression.

#![allow(clippy::many_single_char_names)]

use crate::angle::{Latitude, Longitude};
use crate::error::{GeodesyError, Result};
use crate::point::{GeoPoint, GeodeticCoord, SpaceRectangularCoord};
use crate::{Ellipsoid, Metres};
use core::f64::consts::FRAC_PI_2;

/// The maximum number of latitude iterations.
pub const MAX_ITERATIONS: u32 = 10;

/// The latitude convergence tolerance in radians.
pub const TOLERANCE: f64 = 1e-12;

/// Points closer than this to the polar axis, in metres, are treated as
/// being on it.
const POLAR_AXIS_DISTANCE: f64 = 1e-12;

/// Convert geodetic coordinates to geocentric coordinates.
/// * `ellipsoid` - the `Ellipsoid` of the geodetic coordinates.
/// * `coord` - the geodetic coordinates.
///
/// returns the geocentric coordinates.
#[must_use]
pub fn geodetic_to_geocentric(ellipsoid: &Ellipsoid, coord: &GeodeticCoord) -> SpaceRectangularCoord {
    let lat = coord.lat().to_angle();
    let lon = coord.lon().to_angle();
    let n = ellipsoid.prime_vertical_radius(lat).0;
    let h = coord.height().0;

    let r = (n + h) * lat.cos().0;
    SpaceRectangularCoord::new(
        r * lon.cos().0,
        r * lon.sin().0,
        (n * (1.0 - ellipsoid.e_2()) + h) * lat.sin().0,
    )
}

/// Convert a `GeoPoint` at a height above its `Ellipsoid` to geocentric
/// coordinates.
#[must_use]
pub fn geo_point_to_geocentric(point: &GeoPoint, height: Metres) -> SpaceRectangularCoord {
    geodetic_to_geocentric(point.ellipsoid(), &point.with_height(height))
}

/// Convert geocentric coordinates to geodetic coordinates.
/// * `ellipsoid` - the `Ellipsoid` of the geodetic coordinates.
/// * `coord` - the geocentric coordinates.
///
/// # Errors
///
/// `Convergence` if a coordinate is not finite or the latitude does not
/// converge within `MAX_ITERATIONS`.
pub fn geocentric_to_geodetic(
    ellipsoid: &Ellipsoid,
    coord: &SpaceRectangularCoord,
) -> Result<GeodeticCoord> {
    let SpaceRectangularCoord { x, y, z } = *coord;
    if !(x.is_finite() && y.is_finite() && z.is_finite()) {
        return Err(GeodesyError::convergence("geocentric to geodetic", 0));
    }

    let a = ellipsoid.a().0;
    let b = ellipsoid.b().0;
    let e_2 = ellipsoid.e_2();

    let lon = Longitude::new(libm::atan2(y, x));
    let p = libm::hypot(x, y);

    // On the polar axis the latitude is the pole in the direction of Z
    if p < POLAR_AXIS_DISTANCE {
        let lat = Latitude::clamped(libm::copysign(FRAC_PI_2, z));
        return Ok(GeodeticCoord::new(lat, lon, Metres(libm::fabs(z) - b)));
    }

    // Bowring's initial estimate
    let t = (z * a) / (p * b);
    let c = 1.0 / libm::sqrt(1.0 + t * t);
    let s = c * t;
    let mut phi = libm::atan2(
        z + ellipsoid.ep_2() * b * s * s * s,
        p - e_2 * a * c * c * c,
    );

    for iteration in 1..=MAX_ITERATIONS {
        let sin_phi = libm::sin(phi);
        let n = a / libm::sqrt(1.0 - e_2 * sin_phi * sin_phi);
        let next = libm::atan2(z + e_2 * n * sin_phi, p);
        let delta = next - phi;
        phi = next;
        tracing::trace!(iteration, delta, "geocentric to geodetic");

        if libm::fabs(delta) < TOLERANCE {
            tracing::debug!(iterations = iteration, "geocentric to geodetic converged");
            let sin_phi = libm::sin(phi);
            let cos_phi = libm::cos(phi);
            let n = a / libm::sqrt(1.0 - e_2 * sin_phi * sin_phi);
            let h = p * cos_phi + z * sin_phi - a * a / n;
            return Ok(GeodeticCoord::new(Latitude::clamped(phi), lon, Metres(h)));
        }
    }

    Err(GeodesyError::convergence(
        "geocentric to geodetic",
        MAX_ITERATIONS,
    ))
}

/// Convert geocentric coordinates to a `GeoPoint` and its height above
/// `ellipsoid`.
///
/// # Errors
///
/// `Convergence` if the latitude does not converge.
pub fn geocentric_to_geo_point<'a>(
    ellipsoid: &'a Ellipsoid,
    coord: &SpaceRectangularCoord,
) -> Result<(GeoPoint<'a>, Metres)> {
    let geodetic = geocentric_to_geodetic(ellipsoid, coord)?;
    Ok((geodetic.to_geo_point(ellipsoid), geodetic.height()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GRS80_ELLIPSOID, WGS84_ELLIPSOID};
    use angle_sc::is_within_tolerance;

    #[test]
    fn test_geodetic_to_geocentric() {
        let coord = GeodeticCoord::from_degrees(55.0, 12.0, 100.0).unwrap();
        let xyz = geodetic_to_geocentric(&GRS80_ELLIPSOID, &coord);
        assert!(is_within_tolerance(3_586_525.761_057_513, xyz.x, 1e-6));
        assert!(is_within_tolerance(762_339.584_111_344, xyz.y, 1e-6));
        assert!(is_within_tolerance(5_201_465.438_292_584, xyz.z, 1e-6));

        // On the equator at the prime meridian
        let origin = GeodeticCoord::from_degrees(0.0, 0.0, 0.0).unwrap();
        let xyz = geodetic_to_geocentric(&WGS84_ELLIPSOID, &origin);
        assert_eq!(WGS84_ELLIPSOID.a().0, xyz.x);
        assert_eq!(0.0, xyz.y);
        assert_eq!(0.0, xyz.z);

        // At the North pole
        let pole = GeodeticCoord::from_degrees(90.0, 0.0, 0.0).unwrap();
        let xyz = geodetic_to_geocentric(&WGS84_ELLIPSOID, &pole);
        assert!(libm::fabs(xyz.x) < 1e-9);
        assert!(is_within_tolerance(WGS84_ELLIPSOID.b().0, xyz.z, 1e-6));
    }

    #[test]
    fn test_geocentric_to_geodetic_round_trip() {
        for lat in (-90_i32..=90).step_by(15) {
            for lon in (-180_i32..180).step_by(45) {
                for height in [-100.0, 0.0, 1_000.0, 20_000_000.0] {
                    let coord =
                        GeodeticCoord::from_degrees(f64::from(lat), f64::from(lon), height)
                            .unwrap();
                    let xyz = geodetic_to_geocentric(&WGS84_ELLIPSOID, &coord);
                    let result = geocentric_to_geodetic(&WGS84_ELLIPSOID, &xyz).unwrap();

                    assert!(is_within_tolerance(
                        coord.lat().radians(),
                        result.lat().radians(),
                        1e-9
                    ));
                    if lat.abs() != 90 {
                        let delta_lon = result.lon() - coord.lon();
                        assert!(libm::fabs(delta_lon.radians()) < 1e-9);
                    }
                    assert!(is_within_tolerance(height, result.height().0, 1e-6));
                }
            }
        }
    }

    #[test]
    fn test_geocentric_to_geodetic_polar_axis() {
        let b = WGS84_ELLIPSOID.b().0;

        let north = SpaceRectangularCoord::new(0.0, 0.0, b + 100.0);
        let result = geocentric_to_geodetic(&WGS84_ELLIPSOID, &north).unwrap();
        assert_eq!(FRAC_PI_2, result.lat().radians());
        assert!(is_within_tolerance(100.0, result.height().0, 1e-9));

        let south = SpaceRectangularCoord::new(0.0, 0.0, -b);
        let result = geocentric_to_geodetic(&WGS84_ELLIPSOID, &south).unwrap();
        assert_eq!(-FRAC_PI_2, result.lat().radians());
        assert!(libm::fabs(result.height().0) < 1e-9);
    }

    #[test]
    fn test_geocentric_to_geodetic_not_finite() {
        let coord = SpaceRectangularCoord::new(f64::NAN, 0.0, 0.0);
        let result = geocentric_to_geodetic(&WGS84_ELLIPSOID, &coord);
        assert_eq!(
            Err(GeodesyError::Convergence {
                operation: "geocentric to geodetic",
                iterations: 0
            }),
            result
        );

        let coord = SpaceRectangularCoord::new(f64::INFINITY, 1.0, 1.0);
        assert!(geocentric_to_geodetic(&WGS84_ELLIPSOID, &coord).is_err());
    }

    #[test]
    fn test_geocentric_to_geo_point() {
        let coord = GeodeticCoord::from_degrees(-37.5, 145.0, 250.0).unwrap();
        let xyz = geodetic_to_geocentric(&WGS84_ELLIPSOID, &coord);
        let (point, height) = geocentric_to_geo_point(&WGS84_ELLIPSOID, &xyz).unwrap();
        assert!(point.is_on(&WGS84_ELLIPSOID));
        assert!(is_within_tolerance(-37.5, point.lat().degrees(), 1e-10));
        assert!(is_within_tolerance(250.0, height.0, 1e-6));

        let again = geo_point_to_geocentric(&point, height);
        assert!(xyz.distance(&again).0 < 1e-6);
    }
}
