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

use ellipsoid_geodesy::projection::zones;
use ellipsoid_geodesy::{
    GeodesicSolution, GeodesyError, GeoPoint, Latitude, LinearUnit, Longitude,
    ProjectionParameters, TransverseMercator, GRS80_ELLIPSOID, WGS84_ELLIPSOID,
};

/// lat, lon, zone, north, northing, easting
type UtmRecord = (f64, f64, u8, bool, f64, f64);

fn read_utm_points() -> Vec<UtmRecord> {
    let mut reader = csv::Reader::from_path(common::data_path("utm_points.csv"))
        .expect("Could not read file: utm_points.csv");
    reader
        .deserialize::<UtmRecord>()
        .collect::<Result<_, _>>()
        .expect("Invalid record in utm_points.csv")
}

#[test]
fn test_utm_points() {
    common::init_tracing();
    for (lat, lon, zone, north, northing, easting) in read_utm_points() {
        let lat = Latitude::from_degrees(lat).unwrap();
        let lon = Longitude::from_degrees(lon);
        assert_eq!(zone, zones::utm_zone(lon));

        let params = ProjectionParameters::utm(zone, north).unwrap();
        assert_eq!(params, ProjectionParameters::utm_for(lat, lon));

        let projection = TransverseMercator::new(&WGS84_ELLIPSOID, params);
        let coord = projection.forward(lat, lon).unwrap();
        assert!(
            libm::fabs(northing - coord.northing()) < 1e-3,
            "zone {zone} northing: {}",
            coord.northing()
        );
        assert!(
            libm::fabs(easting - coord.easting()) < 1e-3,
            "zone {zone} easting: {}",
            coord.easting()
        );

        let (lat2, lon2) = projection.inverse(&coord).unwrap();
        assert!(libm::fabs(lat.radians() - lat2.radians()) < 1e-9);
        assert!(libm::fabs(lon.radians() - lon2.radians()) < 1e-9);
    }
}

#[test]
fn test_gauss_kruger_zone_prefix() {
    common::init_tracing();
    let lat = Latitude::from_degrees(39.9042).unwrap();
    let lon = Longitude::from_degrees(116.4074);

    let zone = zones::gauss_kruger_3_zone(lon);
    assert_eq!(39, zone);
    let prefixed = TransverseMercator::new(
        &GRS80_ELLIPSOID,
        ProjectionParameters::gauss_kruger_3(zone, true).unwrap(),
    );
    let plain = TransverseMercator::new(
        &GRS80_ELLIPSOID,
        ProjectionParameters::gauss_kruger_3(zone, false).unwrap(),
    );
    let coord = prefixed.forward(lat, lon).unwrap();
    let plain_coord = plain.forward(lat, lon).unwrap();

    let (prefix, easting) = zones::split_zone_prefix(coord.easting()).unwrap();
    assert_eq!(zone, prefix);
    assert!(libm::fabs(plain_coord.easting() - easting) < 1e-6);
    assert!(libm::fabs(plain_coord.northing() - coord.northing()) < 1e-9);

    let (lat2, lon2) = prefixed.inverse(&coord).unwrap();
    assert!(libm::fabs(lat.radians() - lat2.radians()) < 1e-9);
    assert!(libm::fabs(lon.radians() - lon2.radians()) < 1e-9);

    let zone = zones::gauss_kruger_6_zone(lon);
    assert_eq!(20, zone);
    let six_degree = TransverseMercator::new(
        &GRS80_ELLIPSOID,
        ProjectionParameters::gauss_kruger_6(zone, true).unwrap(),
    );
    let coord = six_degree.forward(lat, lon).unwrap();
    assert_eq!(20, zones::split_zone_prefix(coord.easting()).unwrap().0);
}

#[test]
fn test_scale_factor_against_grid_distance() {
    common::init_tracing();
    let projection = TransverseMercator::new(
        &WGS84_ELLIPSOID,
        ProjectionParameters::utm(31, true).unwrap(),
    );
    let a = GeoPoint::from_degrees(45.0, 5.5, &WGS84_ELLIPSOID).unwrap();
    let b = GeoPoint::from_degrees(45.001, 5.501, &WGS84_ELLIPSOID).unwrap();
    let geodesic = GeodesicSolution::Bessel.inverse(&a, &b).unwrap();

    let p1 = projection.coord(&a).unwrap();
    let p2 = projection.coord(&b).unwrap();
    let chord = libm::hypot(p2.easting() - p1.easting(), p2.northing() - p1.northing());
    let k = projection.scale_factor(a.lat(), a.lon()).unwrap();
    assert!(libm::fabs(chord / geodesic.distance.0 - k) < 1e-6);

    let grid_distance = projection.grid_distance(&p1, &p2, geodesic.distance).unwrap();
    assert!(libm::fabs(chord - grid_distance.0) < 1e-4);
}

#[test]
fn test_units() {
    common::init_tracing();
    let lat = Latitude::from_degrees(40.7128).unwrap();
    let lon = Longitude::from_degrees(-74.006);
    let metres = TransverseMercator::new(
        &WGS84_ELLIPSOID,
        ProjectionParameters::utm(18, true).unwrap(),
    );
    let us_feet = TransverseMercator::new(
        &WGS84_ELLIPSOID,
        ProjectionParameters::utm(18, true)
            .unwrap()
            .with_unit(LinearUnit::UsSurveyFoot),
    );
    let coord = metres.forward(lat, lon).unwrap();
    let coord_ft = us_feet.forward(lat, lon).unwrap();
    assert_eq!(LinearUnit::UsSurveyFoot, coord_ft.unit());
    assert!(libm::fabs(coord.easting() * 3937.0 / 1200.0 - coord_ft.easting()) < 1e-6);
    assert!(libm::fabs(coord.northing() * 3937.0 / 1200.0 - coord_ft.northing()) < 1e-6);
}

#[test]
fn test_out_of_domain() {
    common::init_tracing();
    let projection = TransverseMercator::new(
        &WGS84_ELLIPSOID,
        ProjectionParameters::utm(18, true).unwrap(),
    );
    let lat = Latitude::from_degrees(40.0).unwrap();
    let result = projection.forward(lat, Longitude::from_degrees(-60.0));
    assert!(matches!(result, Err(GeodesyError::Domain { .. })));
}
