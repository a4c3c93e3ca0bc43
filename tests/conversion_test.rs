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

extern crate ellipsoid_geodesy;

mod common;

use ellipsoid_geodesy::conversion::{
    geo_point_to_geocentric, geocentric_to_geo_point, geocentric_to_geodetic,
    geodetic_to_geocentric,
};
use ellipsoid_geodesy::{
    GeoPoint, GeodeticCoord, Metres, NamedEllipsoid, SpaceRectangularCoord, WGS84_ELLIPSOID,
};

#[test]
fn test_geodetic_geocentric_round_trip() {
    common::init_tracing();
    for named in NamedEllipsoid::ALL {
        let ellipsoid = named.ellipsoid();
        for lat in [-90.0, -89.999, -60.0, -33.865, 0.0, 10.0, 45.0, 89.5, 90.0] {
            for lon in [-179.5, -90.0, 0.0, 2.5, 135.0, 180.0] {
                for height in [-400.0, 0.0, 8848.0, 35_786_000.0] {
                    let coord = GeodeticCoord::from_degrees(lat, lon, height).unwrap();
                    let xyz = geodetic_to_geocentric(&ellipsoid, &coord);
                    let result = geocentric_to_geodetic(&ellipsoid, &xyz).unwrap();

                    assert!(
                        libm::fabs(coord.lat().radians() - result.lat().radians()) < 1e-9,
                        "{named:?} lat {lat} lon {lon} height {height}"
                    );
                    if libm::fabs(lat) < 90.0 {
                        let delta = libm::remainder(
                            coord.lon().radians() - result.lon().radians(),
                            2.0 * core::f64::consts::PI,
                        );
                        assert!(libm::fabs(delta) < 1e-9);
                    }
                    assert!(libm::fabs(coord.height().0 - result.height().0) < 1e-6);
                }
            }
        }
    }
}

#[test]
fn test_polar_axis() {
    common::init_tracing();
    let b = WGS84_ELLIPSOID.b().0;

    let result =
        geocentric_to_geodetic(&WGS84_ELLIPSOID, &SpaceRectangularCoord::new(0.0, 0.0, b + 10.0))
            .unwrap();
    assert!(libm::fabs(result.lat().degrees() - 90.0) < 1e-12);
    assert!(libm::fabs(result.height().0 - 10.0) < 1e-9);

    let result =
        geocentric_to_geodetic(&WGS84_ELLIPSOID, &SpaceRectangularCoord::new(0.0, 0.0, -b))
            .unwrap();
    assert!(libm::fabs(result.lat().degrees() + 90.0) < 1e-12);
    assert!(libm::fabs(result.height().0) < 1e-9);
}

#[test]
fn test_geo_point_conversions() {
    common::init_tracing();
    let point = GeoPoint::from_degrees(-33.865, 151.209, &WGS84_ELLIPSOID).unwrap();
    let xyz = geo_point_to_geocentric(&point, Metres(58.0));
    let (result, height) = geocentric_to_geo_point(&WGS84_ELLIPSOID, &xyz).unwrap();

    assert!(result.is_on(&WGS84_ELLIPSOID));
    assert!(libm::fabs(point.lat().radians() - result.lat().radians()) < 1e-12);
    assert!(libm::fabs(point.lon().radians() - result.lon().radians()) < 1e-12);
    assert!(libm::fabs(58.0 - height.0) < 1e-6);
}

#[test]
fn test_non_finite_input() {
    common::init_tracing();
    let xyz = SpaceRectangularCoord::new(f64::NAN, 0.0, 0.0);
    let error = geocentric_to_geodetic(&WGS84_ELLIPSOID, &xyz).unwrap_err();
    assert!(error.is_convergence());
}
