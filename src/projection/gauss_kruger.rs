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

//! The `gauss_kruger` module contains `TransverseMercator`: the Gauss-Krüger
//! projection of an ellipsoid.
//!
//! The forward and inverse projections use the power series in the
//! longitude difference from the central meridian, see
//! [Snyder](https://doi.org/10.3133/pp1395) equations 8-9 to 8-18.
//! The series are accurate to about a millimetre within 3.5° of the
//! central meridian.
//!
//! "Natural" coordinates are Gauss-Krüger coordinates on a scale factor 1
//! plane with their origin at the intersection of the central meridian
//! and the equator: `x` is northwards and `y` eastwards.

#![allow(clippy::many_single_char_names, clippy::suboptimal_flops)]

use super::ProjectionParameters;
use crate::angle::{Latitude, Longitude};
use crate::error::{GeodesyError, Result};
use crate::point::{GeoPoint, ProjectedCoord};
use crate::{Angle, Ellipsoid, Metres, Radians};

/// The maximum longitude difference from the central meridian in degrees.
pub const MAX_CENTRAL_MERIDIAN_OFFSET: f64 = 9.0;

/// Gauss-Krüger coordinates on the natural plane, in metres.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NaturalCoord {
    /// Northwards, from the equator.
    pub x: f64,
    /// Eastwards, from the central meridian.
    pub y: f64,
}

/// The latitude dependent terms of the series.
struct LatitudeTerms {
    cos_phi: f64,
    tan_phi: f64,
    /// tan²φ
    t: f64,
    /// e'²cos²φ
    c: f64,
    /// Radius of curvature in the prime vertical.
    n: f64,
}

impl LatitudeTerms {
    fn new(ellipsoid: &Ellipsoid, lat: Angle) -> Self {
        let cos_phi = lat.cos().0;
        let tan_phi = lat.sin().0 / cos_phi;
        Self {
            cos_phi,
            tan_phi,
            t: tan_phi * tan_phi,
            c: ellipsoid.ep_2() * cos_phi * cos_phi,
            n: ellipsoid.prime_vertical_radius(lat).0,
        }
    }
}

/// A transverse Mercator projection of an `Ellipsoid`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransverseMercator<'a> {
    ellipsoid: &'a Ellipsoid,
    parameters: ProjectionParameters,
    /// The meridian arc length of the latitude of origin.
    origin_arc: f64,
}

impl<'a> TransverseMercator<'a> {
    /// Constructor.
    /// * `ellipsoid` - the `Ellipsoid` to project.
    /// * `parameters` - the grid definition.
    #[must_use]
    pub fn new(ellipsoid: &'a Ellipsoid, parameters: ProjectionParameters) -> Self {
        let origin_arc = ellipsoid
            .meridian_arc_length(parameters.latitude_of_origin().to_angle())
            .0;
        Self {
            ellipsoid,
            parameters,
            origin_arc,
        }
    }

    /// The ellipsoid of the projection.
    #[must_use]
    pub const fn ellipsoid(&self) -> &'a Ellipsoid {
        self.ellipsoid
    }

    /// The parameters of the projection.
    #[must_use]
    pub const fn parameters(&self) -> &ProjectionParameters {
        &self.parameters
    }

    /// The longitude difference from the central meridian.
    ///
    /// # Errors
    ///
    /// `Domain` if the difference is greater than 9°.
    fn central_meridian_offset(&self, lon: Longitude) -> Result<f64> {
        let l = (lon - self.parameters.central_meridian()).radians();
        if MAX_CENTRAL_MERIDIAN_OFFSET.to_radians() < libm::fabs(l) {
            return Err(GeodesyError::domain(
                "transverse mercator forward",
                format!(
                    "longitude is {:.6}° from the central meridian",
                    l.to_degrees()
                ),
            ));
        }
        Ok(l)
    }

    /// Convert natural coordinates to grid coordinates: scale them,
    /// add the false origin and convert them to the grid unit.
    #[must_use]
    pub fn grid_coord(&self, natural: NaturalCoord) -> ProjectedCoord {
        let k0 = self.parameters.scale_factor();
        let unit = self.parameters.unit();
        let northing = k0 * (natural.x - self.origin_arc) + self.parameters.false_northing();
        let easting = k0 * natural.y + self.parameters.false_easting();
        ProjectedCoord::new(
            unit.from_metres(northing),
            unit.from_metres(easting),
            unit,
            self.parameters.false_northing(),
            self.parameters.false_easting(),
        )
    }

    /// Convert grid coordinates to natural coordinates: convert them to
    /// metres, remove the false origin of `coord` and unscale them.
    #[must_use]
    pub fn natural_coord(&self, coord: &ProjectedCoord) -> NaturalCoord {
        let k0 = self.parameters.scale_factor();
        NaturalCoord {
            x: (coord.northing_metres().0 - coord.false_northing()) / k0 + self.origin_arc,
            y: (coord.easting_metres().0 - coord.false_easting()) / k0,
        }
    }

    /// The natural coordinates of a point.
    ///
    /// # Errors
    ///
    /// `Domain` if `lon` is more than 9° from the central meridian.
    pub fn forward_natural(&self, lat: Latitude, lon: Longitude) -> Result<NaturalCoord> {
        let l = self.central_meridian_offset(lon)?;
        let phi = lat.to_angle();
        let arc = self.ellipsoid.meridian_arc_length(phi).0;
        let LatitudeTerms {
            cos_phi,
            tan_phi,
            t,
            c,
            n,
        } = LatitudeTerms::new(self.ellipsoid, phi);
        if cos_phi < f64::EPSILON {
            return Ok(NaturalCoord { x: arc, y: 0.0 });
        }

        let ep_2 = self.ellipsoid.ep_2();
        let a = l * cos_phi;
        let a_2 = a * a;

        let x = arc
            + n * tan_phi
                * a_2
                * (0.5
                    + a_2 * (5.0 - t + 9.0 * c + 4.0 * c * c) / 24.0
                    + a_2 * a_2 * (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ep_2) / 720.0);
        let y = n
            * a
            * (1.0
                + a_2 * (1.0 - t + c) / 6.0
                + a_2 * a_2 * (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ep_2) / 120.0);
        Ok(NaturalCoord { x, y })
    }

    /// Project a point to grid coordinates.
    /// * `lat`, `lon` - the geodetic coordinates of the point.
    ///
    /// # Errors
    ///
    /// `Domain` if `lon` is more than 9° from the central meridian.
    pub fn forward(&self, lat: Latitude, lon: Longitude) -> Result<ProjectedCoord> {
        self.forward_natural(lat, lon).map(|natural| self.grid_coord(natural))
    }

    /// Project a `GeoPoint` to grid coordinates.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `point` is not on the projection's `Ellipsoid`,
    /// `Domain` if it is more than 9° from the central meridian.
    pub fn coord(&self, point: &GeoPoint) -> Result<ProjectedCoord> {
        if !point.is_on(self.ellipsoid) {
            return Err(GeodesyError::invalid_parameter(
                "point",
                "the point is not on the projection's ellipsoid",
            ));
        }
        self.forward(point.lat(), point.lon())
    }

    /// The geodetic coordinates of natural coordinates.
    ///
    /// # Errors
    ///
    /// `Domain` if `natural` is beyond a pole or its longitude is further
    /// than 9° from the central meridian.
    pub fn inverse_natural(&self, natural: NaturalCoord) -> Result<(Latitude, Longitude)> {
        let max_y = self.ellipsoid.a().0 * MAX_CENTRAL_MERIDIAN_OFFSET.to_radians();
        if !natural.y.is_finite() || max_y < libm::fabs(natural.y) {
            return Err(GeodesyError::domain(
                "transverse mercator inverse",
                format!("natural y {} m is beyond {max_y} m", natural.y),
            ));
        }

        let central_meridian = self.parameters.central_meridian();
        let phi_1 = self.ellipsoid.footpoint_latitude(Metres(natural.x))?;
        let LatitudeTerms {
            cos_phi,
            tan_phi,
            t,
            c,
            n,
        } = LatitudeTerms::new(self.ellipsoid, phi_1);
        if cos_phi < f64::EPSILON {
            return Ok((Latitude::from(phi_1), central_meridian));
        }

        let ep_2 = self.ellipsoid.ep_2();
        let m = self.ellipsoid.meridian_radius(phi_1).0;
        let d = natural.y / n;
        let d_2 = d * d;

        let delta_phi = n * tan_phi / m
            * d_2
            * (0.5
                - d_2 * (5.0 + 3.0 * t + 10.0 * c - 4.0 * c * c - 9.0 * ep_2) / 24.0
                + d_2 * d_2 * (61.0 + 90.0 * t + 298.0 * c + 45.0 * t * t - 252.0 * ep_2 - 3.0 * c * c)
                    / 720.0);
        let l = d
            * (1.0
                - d_2 * (1.0 + 2.0 * t + c) / 6.0
                + d_2 * d_2 * (5.0 - 2.0 * c + 28.0 * t - 3.0 * c * c + 8.0 * ep_2 + 24.0 * t * t)
                    / 120.0)
            / cos_phi;

        if !l.is_finite() || MAX_CENTRAL_MERIDIAN_OFFSET.to_radians() < libm::fabs(l) {
            return Err(GeodesyError::domain(
                "transverse mercator inverse",
                format!(
                    "longitude is {:.6}° from the central meridian",
                    l.to_degrees()
                ),
            ));
        }

        let lat = Latitude::clamped(Radians::from(phi_1).0 - delta_phi);
        Ok((lat, central_meridian + Longitude::new(l)))
    }

    /// The geodetic coordinates of grid coordinates.
    ///
    /// # Errors
    ///
    /// `Domain` if `coord` is beyond a pole or its longitude is further
    /// than 9° from the central meridian.
    pub fn inverse(&self, coord: &ProjectedCoord) -> Result<(Latitude, Longitude)> {
        self.inverse_natural(self.natural_coord(coord))
    }

    /// The `GeoPoint` of grid coordinates.
    ///
    /// # Errors
    ///
    /// As `inverse`.
    pub fn to_geo_point(&self, coord: &ProjectedCoord) -> Result<GeoPoint<'a>> {
        let (lat, lon) = self.inverse(coord)?;
        Ok(GeoPoint::new(lat, lon, self.ellipsoid))
    }

    /// The point scale factor: the ratio of a short grid distance to the
    /// ellipsoid distance at a point.
    ///
    /// # Errors
    ///
    /// `Domain` if `lon` is more than 9° from the central meridian.
    pub fn scale_factor(&self, lat: Latitude, lon: Longitude) -> Result<f64> {
        let l = self.central_meridian_offset(lon)?;
        let LatitudeTerms { cos_phi, t, c, .. } = LatitudeTerms::new(self.ellipsoid, lat.to_angle());
        let ep_2 = self.ellipsoid.ep_2();
        let a = l * cos_phi;
        let a_2 = a * a;
        Ok(self.parameters.scale_factor()
            * (1.0
                + a_2 * (1.0 + c) / 2.0
                + a_2 * a_2 * (5.0 - 4.0 * t + 42.0 * c + 13.0 * c * c - 28.0 * ep_2) / 24.0
                + a_2 * a_2 * a_2 * (61.0 - 148.0 * t + 16.0 * t * t) / 720.0))
    }

    /// The meridian convergence: the angle from true North to grid North
    /// at a point, positive East of the central meridian in the northern
    /// hemisphere.
    ///
    /// # Errors
    ///
    /// `Domain` if `lon` is more than 9° from the central meridian.
    pub fn meridian_convergence(&self, lat: Latitude, lon: Longitude) -> Result<Radians> {
        let l = self.central_meridian_offset(lon)?;
        let phi = lat.to_angle();
        let LatitudeTerms { cos_phi, t, c, .. } = LatitudeTerms::new(self.ellipsoid, phi);
        let l_2 = l * l;
        let cos_2 = cos_phi * cos_phi;
        Ok(Radians(
            l * phi.sin().0
                * (1.0
                    + l_2 * cos_2 * (1.0 + 3.0 * c + 2.0 * c * c) / 3.0
                    + l_2 * l_2 * cos_2 * cos_2 * (2.0 - t) / 15.0),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::LinearUnit;
    use crate::{GRS80_ELLIPSOID, WGS84_ELLIPSOID};
    use angle_sc::is_within_tolerance;

    fn utm(zone: u8, north: bool) -> TransverseMercator<'static> {
        TransverseMercator::new(&WGS84_ELLIPSOID, ProjectionParameters::utm(zone, north).unwrap())
    }

    #[test]
    fn test_forward_on_central_meridian() {
        let projection = utm(18, true);
        let lat = Latitude::from_degrees(40.0).unwrap();
        let coord = projection.forward(lat, Longitude::from_degrees(-75.0)).unwrap();
        let arc = WGS84_ELLIPSOID.meridian_arc_length(lat.to_angle()).0;
        assert!(is_within_tolerance(0.9996 * arc, coord.northing(), 1e-6));
        assert!(is_within_tolerance(500_000.0, coord.easting(), 1e-6));
        assert_eq!(LinearUnit::Metre, coord.unit());
        assert_eq!(500_000.0, coord.false_easting());
        assert_eq!(0.0, coord.false_northing());
    }

    #[test]
    fn test_forward_utm() {
        // Reference values from the sixth order Krüger series
        let projection = utm(31, true);
        let coord = projection
            .forward(Latitude::from_degrees(52.0).unwrap(), Longitude::from_degrees(6.0))
            .unwrap();
        assert!(is_within_tolerance(5_765_288.2549, coord.northing(), 1e-3));
        assert!(is_within_tolerance(705_928.9189, coord.easting(), 1e-3));

        let projection = utm(56, false);
        let coord = projection
            .forward(
                Latitude::from_degrees(-33.8688).unwrap(),
                Longitude::from_degrees(151.2093),
            )
            .unwrap();
        assert!(is_within_tolerance(6_250_948.3454, coord.northing(), 1e-3));
        assert!(is_within_tolerance(334_368.6336, coord.easting(), 1e-3));
    }

    #[test]
    fn test_forward_pole() {
        let projection = utm(31, true);
        let coord = projection
            .forward(Latitude::from_degrees(90.0).unwrap(), Longitude::from_degrees(5.0))
            .unwrap();
        let quarter = WGS84_ELLIPSOID.quarter_meridian().0;
        assert!(is_within_tolerance(0.9996 * quarter, coord.northing(), 1e-6));
        assert_eq!(500_000.0, coord.easting());

        let (lat, lon) = projection.inverse(&coord).unwrap();
        assert!(is_within_tolerance(90.0, lat.degrees(), 1e-9));
        assert!(is_within_tolerance(3.0, lon.degrees(), 1e-12));
    }

    #[test]
    fn test_round_trip() {
        let projection = TransverseMercator::new(
            &GRS80_ELLIPSOID,
            ProjectionParameters::gauss_kruger_3(39, true).unwrap(),
        );
        for lat in [-80.0, -45.0, -20.0, 0.0, 10.0, 30.0, 45.0, 60.0, 85.0] {
            for offset in [-3.5, -2.0, 0.0, 1.0, 3.5] {
                let lat = Latitude::from_degrees(lat).unwrap();
                let lon = Longitude::from_degrees(117.0 + offset);
                let coord = projection.forward(lat, lon).unwrap();
                let (lat2, lon2) = projection.inverse(&coord).unwrap();
                assert!(is_within_tolerance(lat.radians(), lat2.radians(), 1e-9));
                assert!(is_within_tolerance(lon.radians(), lon2.radians(), 1e-9));
            }
        }
    }

    #[test]
    fn test_units_and_origin() {
        let params = ProjectionParameters::new(
            Longitude::from_degrees(-2.0),
            Latitude::from_degrees(49.0).unwrap(),
            0.999_601_271_7,
            Metres(400_000.0),
            Metres(-100_000.0),
        )
        .unwrap();
        let metres = TransverseMercator::new(&WGS84_ELLIPSOID, params);
        let feet = TransverseMercator::new(
            &WGS84_ELLIPSOID,
            params.with_unit(LinearUnit::InternationalFoot),
        );

        let lat = Latitude::from_degrees(49.0).unwrap();
        let origin = metres.forward(lat, Longitude::from_degrees(-2.0)).unwrap();
        assert!(is_within_tolerance(-100_000.0, origin.northing(), 1e-6));
        assert!(is_within_tolerance(400_000.0, origin.easting(), 1e-6));

        let lat = Latitude::from_degrees(52.5).unwrap();
        let lon = Longitude::from_degrees(-1.5);
        let coord_m = metres.forward(lat, lon).unwrap();
        let coord_ft = feet.forward(lat, lon).unwrap();
        assert_eq!(LinearUnit::InternationalFoot, coord_ft.unit());
        assert!(is_within_tolerance(coord_m.northing(), coord_ft.northing_metres().0, 1e-6));
        assert!(is_within_tolerance(coord_m.easting(), coord_ft.easting_metres().0, 1e-6));

        let (lat2, lon2) = feet.inverse(&coord_ft).unwrap();
        assert!(is_within_tolerance(lat.radians(), lat2.radians(), 1e-12));
        assert!(is_within_tolerance(lon.radians(), lon2.radians(), 1e-12));
    }

    #[test]
    fn test_natural_coord() {
        let projection = TransverseMercator::new(
            &WGS84_ELLIPSOID,
            ProjectionParameters::gauss_kruger_6(20, true).unwrap(),
        );
        let natural = NaturalCoord {
            x: 3_321_798.0057,
            y: -192_992.3021,
        };
        let coord = projection.grid_coord(natural);
        assert!(is_within_tolerance(3_321_798.0057, coord.northing(), 1e-6));
        assert!(is_within_tolerance(20_307_007.6979, coord.easting(), 1e-6));

        let result = projection.natural_coord(&coord);
        assert!(is_within_tolerance(natural.x, result.x, 1e-6));
        assert!(is_within_tolerance(natural.y, result.y, 1e-6));
    }

    #[test]
    fn test_geo_point() {
        let projection = utm(31, true);
        let point = GeoPoint::from_degrees(52.0, 6.0, &WGS84_ELLIPSOID).unwrap();
        let coord = projection.coord(&point).unwrap();
        let result = projection.to_geo_point(&coord).unwrap();
        assert!(result.is_on(&WGS84_ELLIPSOID));
        assert!(is_within_tolerance(point.lat().radians(), result.lat().radians(), 1e-9));
        assert!(is_within_tolerance(point.lon().radians(), result.lon().radians(), 1e-9));

        let point = GeoPoint::from_degrees(52.0, 6.0, &GRS80_ELLIPSOID).unwrap();
        assert!(projection.coord(&point).is_err());
    }

    #[test]
    fn test_domain_errors() {
        let projection = utm(31, true);
        let lat = Latitude::from_degrees(10.0).unwrap();
        let result = projection.forward(lat, Longitude::from_degrees(12.5));
        assert!(matches!(result, Err(GeodesyError::Domain { .. })));
        assert!(projection.forward(lat, Longitude::from_degrees(11.5)).is_ok());
        assert!(projection.scale_factor(lat, Longitude::from_degrees(-7.0)).is_err());
        assert!(projection
            .meridian_convergence(lat, Longitude::from_degrees(-7.0))
            .is_err());

        let far_east = ProjectedCoord::new(1_000_000.0, 1_600_000.0, LinearUnit::Metre, 0.0, 500_000.0);
        let result = projection.inverse(&far_east);
        assert!(matches!(result, Err(GeodesyError::Domain { .. })));

        // Within 9° of arc at the equator, but 15.8° of longitude at 60°
        let arc_60 = WGS84_ELLIPSOID
            .meridian_arc_length(Latitude::from_degrees(60.0).unwrap().to_angle())
            .0;
        let result = projection.inverse_natural(NaturalCoord {
            x: arc_60,
            y: 900_000.0,
        });
        assert!(matches!(result, Err(GeodesyError::Domain { .. })));
        let lat = Latitude::from_degrees(60.0).unwrap();
        let natural = projection
            .forward_natural(lat, Longitude::from_degrees(3.0 + 8.5))
            .unwrap();
        let (_, lon) = projection.inverse_natural(natural).unwrap();
        assert!(is_within_tolerance(11.5, lon.degrees(), 1e-4));

        let beyond_pole = ProjectedCoord::new(10_100_000.0, 500_000.0, LinearUnit::Metre, 0.0, 500_000.0);
        let result = projection.inverse(&beyond_pole);
        assert!(matches!(result, Err(GeodesyError::Domain { .. })));
    }

    #[test]
    fn test_scale_factor() {
        let projection = TransverseMercator::new(
            &WGS84_ELLIPSOID,
            ProjectionParameters::gauss_kruger_6(1, false).unwrap(),
        );
        let lat = Latitude::from_degrees(52.0).unwrap();
        let k = projection.scale_factor(lat, Longitude::from_degrees(6.0)).unwrap();
        assert!(is_within_tolerance(1.000_520_832_071, k, 1e-9));

        let lat = Latitude::from_degrees(10.0).unwrap();
        let k = projection.scale_factor(lat, Longitude::from_degrees(5.5)).unwrap();
        assert!(is_within_tolerance(1.000_929_965_091, k, 1e-9));

        let k = projection.scale_factor(lat, Longitude::from_degrees(3.0)).unwrap();
        assert_eq!(1.0, k);

        let projection = utm(31, true);
        let k = projection.scale_factor(lat, Longitude::from_degrees(3.0)).unwrap();
        assert_eq!(0.9996, k);
    }

    #[test]
    fn test_meridian_convergence() {
        let projection = utm(31, true);
        let lat = Latitude::from_degrees(52.0).unwrap();
        let gamma = projection
            .meridian_convergence(lat, Longitude::from_degrees(6.0))
            .unwrap();
        assert!(is_within_tolerance(0.041_274_549_288, gamma.0, 1e-9));

        let lat = Latitude::from_degrees(70.0).unwrap();
        let gamma = projection
            .meridian_convergence(lat, Longitude::from_degrees(0.0))
            .unwrap();
        assert!(is_within_tolerance(-0.049_207_460_877, gamma.0, 1e-9));

        let lat = Latitude::from_degrees(-33.8688).unwrap();
        let gamma = utm(56, false)
            .meridian_convergence(lat, Longitude::from_degrees(151.2093))
            .unwrap();
        assert!(is_within_tolerance(0.017_421_385_364, gamma.0, 1e-9));

        let gamma = projection
            .meridian_convergence(lat, Longitude::from_degrees(3.0))
            .unwrap();
        assert_eq!(0.0, gamma.0);
    }
}
