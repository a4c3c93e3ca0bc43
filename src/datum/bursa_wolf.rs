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

//! The `bursa_wolf` module contains the seven parameter Bursa-Wolf
//! transformation of geocentric coordinates between datums.
//!
//! The rotations follow the position vector convention, EPSG method 9606:
//!
//! ```text
//! | Xt |   | tx |              |  1  -rz  ry |   | Xs |
//! | Yt | = | ty | + (1 + ds) · |  rz  1  -rx | · | Ys |
//! | Zt |   | tz |              | -ry  rx  1  |   | Zs |
//! ```
//!
//! Coordinate frame rotations, EPSG method 9607, are the same rotations with
//! the opposite sign, see `TransParameters::coordinate_frame`.

use super::{ensure_all_finite, ensure_on_source};
use crate::angle::ARC_SECOND;
use crate::conversion::{geocentric_to_geodetic, geodetic_to_geocentric};
use crate::error::Result;
use crate::point::{GeoPoint, GeodeticCoord, SpaceRectangularCoord};
use crate::{Ellipsoid, Metres};

/// The parts per million of the scale difference.
const PPM: f64 = 1e-6;

/// The parameters of a Bursa-Wolf transformation from a source datum to a
/// target datum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransParameters<'a> {
    source: &'a Ellipsoid,
    target: &'a Ellipsoid,
    /// The translations in metres.
    translation: [f64; 3],
    /// The position vector rotations in radians.
    rotation: [f64; 3],
    /// The scale difference in parts per million.
    scale: f64,
}

impl<'a> TransParameters<'a> {
    /// Constructor with position vector rotations.
    /// * `source`, `target` - the ellipsoids of the source and target datums.
    /// * `translation` - tx, ty, tz in metres.
    /// * `rotation` - rx, ry, rz in arc seconds.
    /// * `scale` - the scale difference in parts per million.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if a parameter is not finite.
    pub fn new(
        source: &'a Ellipsoid,
        target: &'a Ellipsoid,
        translation: [f64; 3],
        rotation: [f64; 3],
        scale: f64,
    ) -> Result<Self> {
        ensure_all_finite("translation", &translation)?;
        ensure_all_finite("rotation", &rotation)?;
        ensure_all_finite("scale", &[scale])?;
        Ok(Self {
            source,
            target,
            translation,
            rotation: rotation.map(|r| r * ARC_SECOND),
            scale,
        })
    }

    /// Constructor with coordinate frame rotations, EPSG method 9607.
    /// The rotations are negated to the position vector convention.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if a parameter is not finite.
    pub fn coordinate_frame(
        source: &'a Ellipsoid,
        target: &'a Ellipsoid,
        translation: [f64; 3],
        rotation: [f64; 3],
        scale: f64,
    ) -> Result<Self> {
        Self::new(source, target, translation, rotation.map(|r| -r), scale)
    }

    /// Constructor for a geocentric translation: the three parameter
    /// transformation.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if a translation is not finite.
    pub fn translation_only(
        source: &'a Ellipsoid,
        target: &'a Ellipsoid,
        translation: [f64; 3],
    ) -> Result<Self> {
        Self::new(source, target, translation, [0.0; 3], 0.0)
    }

    /// The parameters of the reverse transformation: all seven parameters
    /// are negated and the ellipsoids swapped.
    ///
    /// This is the small angle approximation of the inverse, it returns
    /// coordinates to within the square of the rotations and scale times
    /// their magnitude, typically less than a millimetre.
    #[must_use]
    pub fn inverted(&self) -> Self {
        Self {
            source: self.target,
            target: self.source,
            translation: self.translation.map(|t| -t),
            rotation: self.rotation.map(|r| -r),
            scale: -self.scale,
        }
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

    /// The position vector rotations in radians.
    #[must_use]
    pub const fn rotation(&self) -> [f64; 3] {
        self.rotation
    }

    /// The position vector rotations in arc seconds.
    #[must_use]
    pub fn rotation_arc_seconds(&self) -> [f64; 3] {
        self.rotation.map(|r| r / ARC_SECOND)
    }

    /// The scale difference in parts per million.
    #[must_use]
    pub const fn scale_ppm(&self) -> f64 {
        self.scale
    }

    /// Transform geocentric coordinates from the source to the target datum.
    #[must_use]
    pub fn transform(&self, coord: &SpaceRectangularCoord) -> SpaceRectangularCoord {
        let [tx, ty, tz] = self.translation;
        let [rx, ry, rz] = self.rotation;
        let k = 1.0 + self.scale * PPM;
        let SpaceRectangularCoord { x, y, z } = *coord;
        SpaceRectangularCoord::new(
            tx + k * (x - rz * y + ry * z),
            ty + k * (rz * x + y - rx * z),
            tz + k * (-ry * x + rx * y + z),
        )
    }

    /// Transform geodetic coordinates from the source to the target datum,
    /// via geocentric coordinates.
    ///
    /// # Errors
    ///
    /// `Convergence` if the target geodetic latitude does not converge.
    pub fn transform_geodetic(&self, coord: &GeodeticCoord) -> Result<GeodeticCoord> {
        let source_xyz = geodetic_to_geocentric(self.source, coord);
        let target_xyz = self.transform(&source_xyz);
        tracing::trace!(?source_xyz, ?target_xyz, "bursa-wolf");
        geocentric_to_geodetic(self.target, &target_xyz)
    }

    /// Transform a `GeoPoint` at a height from the source to the target
    /// datum.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `point` is not on the source `Ellipsoid`,
    /// `Convergence` if the target geodetic latitude does not converge.
    pub fn transform_geo_point(
        &self,
        point: &GeoPoint,
        height: Metres,
    ) -> Result<(GeoPoint<'a>, Metres)> {
        ensure_on_source(point, self.source)?;
        let result = self.transform_geodetic(&point.with_height(height))?;
        Ok((result.to_geo_point(self.target), result.height()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeodesyError;
    use crate::{GRS80_ELLIPSOID, WGS84_ELLIPSOID};
    use angle_sc::is_within_tolerance;

    fn wgs72() -> Ellipsoid {
        Ellipsoid::from_inverse_flattening(Metres(6_378_135.0), 298.26).unwrap()
    }

    const WGS72_XYZ: SpaceRectangularCoord =
        SpaceRectangularCoord::new(3_657_660.66, 255_768.55, 5_201_382.11);

    #[test]
    fn test_position_vector() {
        let wgs72 = wgs72();
        let params =
            TransParameters::new(&wgs72, &WGS84_ELLIPSOID, [0.0, 0.0, 4.5], [0.0, 0.0, 0.554], 0.219)
                .unwrap();
        let result = params.transform(&WGS72_XYZ);
        assert!(is_within_tolerance(3_657_660.7741, result.x, 1e-4));
        assert!(is_within_tolerance(255_778.4300, result.y, 1e-4));
        assert!(is_within_tolerance(5_201_387.7491, result.z, 1e-4));

        assert_eq!([0.0, 0.0, 4.5], params.translation());
        assert!(is_within_tolerance(0.554, params.rotation_arc_seconds()[2], 1e-12));
        assert!(is_within_tolerance(2.685_867_793e-6, params.rotation()[2], 1e-12));
        assert_eq!(0.219, params.scale_ppm());
        assert!(params.source().is_same(&wgs72));
        assert!(params.target().is_same(&WGS84_ELLIPSOID));
    }

    #[test]
    fn test_coordinate_frame() {
        let wgs72 = wgs72();
        let position_vector =
            TransParameters::new(&wgs72, &WGS84_ELLIPSOID, [0.0, 0.0, 4.5], [0.0, 0.0, 0.554], 0.219)
                .unwrap();
        let coordinate_frame = TransParameters::coordinate_frame(
            &wgs72,
            &WGS84_ELLIPSOID,
            [0.0, 0.0, 4.5],
            [0.0, 0.0, -0.554],
            0.219,
        )
        .unwrap();
        assert_eq!(position_vector, coordinate_frame);
    }

    #[test]
    fn test_inverted() {
        let wgs72 = wgs72();
        let params =
            TransParameters::new(&wgs72, &WGS84_ELLIPSOID, [0.0, 0.0, 4.5], [0.0, 0.0, 0.554], 0.219)
                .unwrap();
        let inverse = params.inverted();
        assert!(inverse.source().is_same(&WGS84_ELLIPSOID));
        assert!(inverse.target().is_same(&wgs72));
        assert_eq!([0.0, 0.0, -4.5], inverse.translation());
        assert_eq!(-0.219, inverse.scale_ppm());

        let result = inverse.transform(&params.transform(&WGS72_XYZ));
        assert!(WGS72_XYZ.distance(&result).0 < 1e-3);
        assert_eq!(params, inverse.inverted());
    }

    #[test]
    fn test_translation_only() {
        let params = TransParameters::translation_only(
            &GRS80_ELLIPSOID,
            &WGS84_ELLIPSOID,
            [1.0, -2.0, 3.0],
        )
        .unwrap();
        let result = params.transform(&SpaceRectangularCoord::new(10.0, 20.0, 30.0));
        assert_eq!(SpaceRectangularCoord::new(11.0, 18.0, 33.0), result);
    }

    #[test]
    fn test_invalid_parameters() {
        let result = TransParameters::new(
            &GRS80_ELLIPSOID,
            &WGS84_ELLIPSOID,
            [0.0, f64::NAN, 0.0],
            [0.0; 3],
            0.0,
        );
        assert!(matches!(result, Err(GeodesyError::InvalidParameter { name: "translation", .. })));
        let result = TransParameters::new(
            &GRS80_ELLIPSOID,
            &WGS84_ELLIPSOID,
            [0.0; 3],
            [f64::INFINITY, 0.0, 0.0],
            0.0,
        );
        assert!(matches!(result, Err(GeodesyError::InvalidParameter { name: "rotation", .. })));
        let result =
            TransParameters::new(&GRS80_ELLIPSOID, &WGS84_ELLIPSOID, [0.0; 3], [0.0; 3], f64::NAN);
        assert!(matches!(result, Err(GeodesyError::InvalidParameter { name: "scale", .. })));
    }

    #[test]
    fn test_transform_geodetic() {
        let wgs72 = wgs72();
        let params =
            TransParameters::new(&wgs72, &WGS84_ELLIPSOID, [0.0, 0.0, 4.5], [0.0, 0.0, 0.554], 0.219)
                .unwrap();
        let coord = GeodeticCoord::from_degrees(55.0, 4.0, 0.0).unwrap();
        let result = params.transform_geodetic(&coord).unwrap();
        assert!(is_within_tolerance(55.000_024_884_7, result.lat().degrees(), 1e-9));
        assert!(is_within_tolerance(4.000_153_888_9, result.lon().degrees(), 1e-9));
        assert!(is_within_tolerance(3.217_787, result.height().0, 1e-4));

        let point = GeoPoint::from_degrees(55.0, 4.0, &wgs72).unwrap();
        let (result, height) = params.transform_geo_point(&point, Metres(0.0)).unwrap();
        assert!(result.is_on(&WGS84_ELLIPSOID));
        assert!(is_within_tolerance(55.000_024_884_7, result.lat().degrees(), 1e-9));
        assert!(is_within_tolerance(3.217_787, height.0, 1e-4));

        let point = GeoPoint::from_degrees(55.0, 4.0, &GRS80_ELLIPSOID).unwrap();
        let result = params.transform_geo_point(&point, Metres(0.0));
        assert!(matches!(result, Err(GeodesyError::InvalidParameter { name: "point", .. })));
    }
}
