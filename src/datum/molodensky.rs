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

//! The molodensky module contains the three parameter Molodensky
//! transformation of geodetic coordinates between datums, EPSG methods
//! 9604 (standard) and 9605 (abridged).
//!
//! The transformation calculates the changes in latitude, longitude and
//! height directly from the geocentric translation between the datums and
//! the differences between their ellipsoids, without converting to
//! geocentric coordinates.

#![allow(clippy::similar_names, clippy::suboptimal_flops)]

use super::{ensure_all_finite, ensure_on_source};
use crate::angle::{Latitude, Longitude};
use crate::error::Result;
use crate::point::{GeoPoint, GeodeticCoord};
use crate::{Ellipsoid, Metres};

/// The parameters of a Molodensky transformation from a source datum to a
/// target datum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MolodenskyParameters<'a> {
    source: &'a Ellipsoid,
    target: &'a Ellipsoid,
    /// The translations in metres.
    translation: [f64; 3],
}

/// The trigonometric terms of a geodetic position.
struct Position {
    sin_phi: f64,
    cos_phi: f64,
    sin_lambda: f64,
    cos_lambda: f64,
}

impl Position {
    fn new(coord: &GeodeticCoord) -> Self {
        let lat = coord.lat().to_angle();
        let lon = coord.lon().to_angle();
        Self {
            sin_phi: lat.sin().0,
            cos_phi: lat.cos().0,
            sin_lambda: lon.sin().0,
            cos_lambda: lon.cos().0,
        }
    }
}

impl<'a> MolodenskyParameters<'a> {
    /// Constructor.
    /// * `source`, `target` - the ellipsoids of the source and target datums.
    /// * `translation` - dx, dy, dz in metres.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if a translation is not finite.
    pub fn new(
        source: &'a Ellipsoid,
        target: &'a Ellipsoid,
        translation: [f64; 3],
    ) -> Result<Self> {
        ensure_all_finite("translation", &translation)?;
        Ok(Self {
            source,
            target,
            translation,
        })
    }

    /// The ellipsoid of the source datum.
    #[must_use]
    pub const fn source(&self) -> &'a Ellipsoid {
        self.source
    }

    /// The ellipsoid of the target datum.
    #[must_use]
    pub const fn target(&self) -> &'a Ellipsoid {
        self.target
    }

    /// The translations in metres.
    #[must_use]
    pub const fn translation(&self) -> [f64; 3] {
        self.translation
    }

    /// The semi-major axis difference: target - source.
    #[must_use]
    pub fn delta_a(&self) -> f64 {
        self.target.a().0 - self.source.a().0
    }

    /// The flattening difference: target - source.
    #[must_use]
    pub fn delta_f(&self) -> f64 {
        self.target.f() - self.source.f()
    }

    /// The change of latitude and longitude in radians and of height
    /// in metres: the standard formulas.
    fn deltas(&self, coord: &GeodeticCoord) -> (f64, f64, f64) {
        let [dx, dy, dz] = self.translation;
        let Position {
            sin_phi,
            cos_phi,
            sin_lambda,
            cos_lambda,
        } = Position::new(coord);
        let lat = coord.lat().to_angle();
        let a = self.source.a().0;
        let b = self.source.b().0;
        let e_2 = self.source.e_2();
        let n = self.source.prime_vertical_radius(lat).0;
        let m = self.source.meridian_radius(lat).0;
        let h = coord.height().0;
        let da = self.delta_a();
        let df = self.delta_f();

        let delta_phi = (-dx * sin_phi * cos_lambda - dy * sin_phi * sin_lambda
            + dz * cos_phi
            + da * n * e_2 * sin_phi * cos_phi / a
            + df * (m * a / b + n * b / a) * sin_phi * cos_phi)
            / (m + h);
        let delta_lambda = longitude_delta(-dx * sin_lambda + dy * cos_lambda, n + h, cos_phi);
        let delta_h = dx * cos_phi * cos_lambda
            + dy * cos_phi * sin_lambda
            + dz * sin_phi
            - da * a / n
            + df * b / a * n * sin_phi * sin_phi;
        (delta_phi, delta_lambda, delta_h)
    }

    /// The change of latitude and longitude in radians and of height
    /// in metres: the abridged formulas.
    fn abridged_deltas(&self, coord: &GeodeticCoord) -> (f64, f64, f64) {
        let [dx, dy, dz] = self.translation;
        let Position {
            sin_phi,
            cos_phi,
            sin_lambda,
            cos_lambda,
        } = Position::new(coord);
        let lat = coord.lat().to_angle();
        let n = self.source.prime_vertical_radius(lat).0;
        let m = self.source.meridian_radius(lat).0;
        let da = self.delta_a();
        let flattening_term = self.source.a().0 * self.delta_f() + self.source.f() * da;

        let delta_phi = (-dx * sin_phi * cos_lambda - dy * sin_phi * sin_lambda
            + dz * cos_phi
            + flattening_term * 2.0 * sin_phi * cos_phi)
            / m;
        let delta_lambda = longitude_delta(-dx * sin_lambda + dy * cos_lambda, n, cos_phi);
        let delta_h = dx * cos_phi * cos_lambda
            + dy * cos_phi * sin_lambda
            + dz * sin_phi
            + flattening_term * sin_phi * sin_phi
            - da;
        (delta_phi, delta_lambda, delta_h)
    }

    /// Apply latitude, longitude and height changes to a coordinate.
    fn apply(coord: &GeodeticCoord, deltas: (f64, f64, f64)) -> GeodeticCoord {
        let (delta_phi, delta_lambda, delta_h) = deltas;
        tracing::trace!(delta_phi, delta_lambda, delta_h, "molodensky");
        GeodeticCoord::new(
            Latitude::clamped(coord.lat().radians() + delta_phi),
            Longitude::new(coord.lon().radians() + delta_lambda),
            Metres(coord.height().0 + delta_h),
        )
    }

    /// Transform geodetic coordinates from the source to the target datum
    /// with the standard Molodensky formulas.
    #[must_use]
    pub fn transform(&self, coord: &GeodeticCoord) -> GeodeticCoord {
        Self::apply(coord, self.deltas(coord))
    }

    /// Transform geodetic coordinates from the source to the target datum
    /// with the abridged Molodensky formulas.
    #[must_use]
    pub fn transform_abridged(&self, coord: &GeodeticCoord) -> GeodeticCoord {
        Self::apply(coord, self.abridged_deltas(coord))
    }

    /// Transform a `GeoPoint` at a height from the source to the target
    /// datum with the standard Molodensky formulas.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `point` is not on the source `Ellipsoid`.
    pub fn transform_geo_point(
        &self,
        point: &GeoPoint,
        height: Metres,
    ) -> Result<(GeoPoint<'a>, Metres)> {
        ensure_on_source(point, self.source)?;
        let result = self.transform(&point.with_height(height));
        Ok((result.to_geo_point(self.target), result.height()))
    }
}

/// The longitude change: zero at the poles, where longitude is undefined.
fn longitude_delta(numerator: f64, radius: f64, cos_phi: f64) -> f64 {
    if cos_phi < f64::EPSILON {
        0.0
    } else {
        numerator / (radius * cos_phi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datum::TransParameters;
    use crate::error::GeodesyError;
    use crate::{NamedEllipsoid, GRS80_ELLIPSOID, WGS84_ELLIPSOID};
    use angle_sc::is_within_tolerance;

    /// North Sea point, EPSG Guidance Note 7-2 example.
    fn north_sea() -> GeodeticCoord {
        GeodeticCoord::new(
            Latitude::from_dms(53.0, 48.0, 33.82).unwrap(),
            Longitude::from_dms(2.0, 7.0, 46.38),
            Metres(73.0),
        )
    }

    const WGS84_TO_ED50: [f64; 3] = [84.87, 96.49, 116.95];

    #[test]
    fn test_molodensky() {
        let intl = NamedEllipsoid::International1924.ellipsoid();
        let params = MolodenskyParameters::new(&WGS84_ELLIPSOID, &intl, WGS84_TO_ED50).unwrap();
        assert_eq!(251.0, params.delta_a());
        assert!(is_within_tolerance(1.419_270_225e-5, params.delta_f(), 1e-13));
        assert_eq!(WGS84_TO_ED50, params.translation());
        assert!(params.source().is_same(&WGS84_ELLIPSOID));
        assert!(params.target().is_same(&intl));

        let result = params.transform(&north_sea());
        assert!(is_within_tolerance(0.939_164_411_719, result.lat().radians(), 1e-12));
        assert!(is_within_tolerance(0.037_192_370_205, result.lon().radians(), 1e-12));
        assert!(is_within_tolerance(28.021_355, result.height().0, 1e-6));

        // 53°48'36.565"N, 2°07'51.477"E, 28.02 m
        let expected_lat = Latitude::from_dms(53.0, 48.0, 36.565).unwrap();
        let expected_lon = Longitude::from_dms(2.0, 7.0, 51.477);
        assert!(is_within_tolerance(expected_lat.degrees(), result.lat().degrees(), 3e-7));
        assert!(is_within_tolerance(expected_lon.degrees(), result.lon().degrees(), 3e-7));
        assert!(is_within_tolerance(28.02, result.height().0, 0.005));
    }

    #[test]
    fn test_molodensky_abridged() {
        let intl = NamedEllipsoid::International1924.ellipsoid();
        let params = MolodenskyParameters::new(&WGS84_ELLIPSOID, &intl, WGS84_TO_ED50).unwrap();
        let result = params.transform_abridged(&north_sea());
        assert!(is_within_tolerance(0.939_164_398_085, result.lat().radians(), 1e-12));
        assert!(is_within_tolerance(0.037_192_370_488, result.lon().radians(), 1e-12));
        assert!(is_within_tolerance(28.090_828, result.height().0, 1e-6));

        // 53°48'36.563"N, 2°07'51.477"E, 28.091 m
        let expected_lat = Latitude::from_dms(53.0, 48.0, 36.563).unwrap();
        assert!(is_within_tolerance(expected_lat.degrees(), result.lat().degrees(), 3e-7));
        assert!(is_within_tolerance(28.091, result.height().0, 0.001));
    }

    #[test]
    fn test_molodensky_against_geocentric_translation() {
        let intl = NamedEllipsoid::International1924.ellipsoid();
        let molodensky =
            MolodenskyParameters::new(&WGS84_ELLIPSOID, &intl, WGS84_TO_ED50).unwrap();
        let geocentric =
            TransParameters::translation_only(&WGS84_ELLIPSOID, &intl, WGS84_TO_ED50).unwrap();

        let coord = north_sea();
        let result = molodensky.transform(&coord);
        let expected = geocentric.transform_geodetic(&coord).unwrap();
        assert!(is_within_tolerance(expected.lat().radians(), result.lat().radians(), 1e-8));
        assert!(is_within_tolerance(expected.lon().radians(), result.lon().radians(), 1e-8));
        assert!(is_within_tolerance(expected.height().0, result.height().0, 0.01));
    }

    #[test]
    fn test_molodensky_at_pole() {
        let intl = NamedEllipsoid::International1924.ellipsoid();
        let params = MolodenskyParameters::new(&WGS84_ELLIPSOID, &intl, WGS84_TO_ED50).unwrap();
        let coord = GeodeticCoord::from_degrees(90.0, 0.0, 0.0).unwrap();
        let result = params.transform(&coord);
        assert!(result.lat().radians().is_finite());
        assert_eq!(0.0, result.lon().radians());
        assert!(result.height().0.is_finite());
    }

    #[test]
    fn test_molodensky_geo_point() {
        let intl = NamedEllipsoid::International1924.ellipsoid();
        let params = MolodenskyParameters::new(&WGS84_ELLIPSOID, &intl, WGS84_TO_ED50).unwrap();
        let coord = north_sea();
        let point = coord.to_geo_point(&WGS84_ELLIPSOID);
        let (result, height) = params.transform_geo_point(&point, coord.height()).unwrap();
        assert!(result.is_on(&intl));
        assert!(is_within_tolerance(0.939_164_411_719, result.lat().radians(), 1e-12));
        assert!(is_within_tolerance(28.021_355, height.0, 1e-6));

        let point = coord.to_geo_point(&GRS80_ELLIPSOID);
        let result = params.transform_geo_point(&point, coord.height());
        assert!(matches!(result, Err(GeodesyError::InvalidParameter { name: "point", .. })));

        let result = MolodenskyParameters::new(&WGS84_ELLIPSOID, &intl, [f64::NAN, 0.0, 0.0]);
        assert!(result.is_err());
    }
}
