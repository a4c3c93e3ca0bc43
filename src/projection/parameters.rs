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

//! The parameters module contains `ProjectionParameters`: the definition
//! of a transverse Mercator grid.

use super::zones;
use crate::angle::{Latitude, Longitude};
use crate::error::{ensure_finite, GeodesyError, Result};
use crate::point::LinearUnit;
use crate::Metres;

/// The parameters of a transverse Mercator grid.
///
/// The false easting and northing are in metres, whatever the linear unit
/// of the grid coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectionParameters {
    central_meridian: Longitude,
    latitude_of_origin: Latitude,
    scale_factor: f64,
    false_easting: f64,
    false_northing: f64,
    unit: LinearUnit,
    standard_parallels: Option<(Latitude, Latitude)>,
}

impl ProjectionParameters {
    /// Constructor.
    /// * `central_meridian` - the longitude of the grid origin.
    /// * `latitude_of_origin` - the latitude of the grid origin.
    /// * `scale_factor` - the scale factor on the central meridian.
    /// * `false_easting`, `false_northing` - the grid coordinates of the origin.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `scale_factor` is not positive or a false
    /// origin value is not finite.
    pub fn new(
        central_meridian: Longitude,
        latitude_of_origin: Latitude,
        scale_factor: f64,
        false_easting: Metres,
        false_northing: Metres,
    ) -> Result<Self> {
        let scale_factor = ensure_finite("scale_factor", scale_factor)?;
        if scale_factor <= 0.0 {
            return Err(GeodesyError::invalid_parameter(
                "scale_factor",
                format!("{scale_factor} is not positive"),
            ));
        }
        Ok(Self {
            central_meridian,
            latitude_of_origin,
            scale_factor,
            false_easting: ensure_finite("false_easting", false_easting.0)?,
            false_northing: ensure_finite("false_northing", false_northing.0)?,
            unit: LinearUnit::Metre,
            standard_parallels: None,
        })
    }

    /// The parameters of a UTM zone.
    /// * `zone` - the zone number, 1..=60.
    /// * `north` - true for the northern hemisphere, false for the southern.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `zone` is not in 1..=60.
    pub fn utm(zone: u8, north: bool) -> Result<Self> {
        Self::new(
            zones::utm_central_meridian(zone)?,
            Latitude::default(),
            zones::UTM_SCALE_FACTOR,
            Metres(zones::FALSE_EASTING),
            Metres(zones::hemisphere_false_northing(north)),
        )
    }

    /// The parameters of the UTM zone containing a point.
    #[must_use]
    pub fn utm_for(lat: Latitude, lon: Longitude) -> Self {
        let north = 0.0 <= lat.radians();
        Self {
            central_meridian: zones::utm_zone_central_meridian(lon),
            latitude_of_origin: Latitude::default(),
            scale_factor: zones::UTM_SCALE_FACTOR,
            false_easting: zones::FALSE_EASTING,
            false_northing: zones::hemisphere_false_northing(north),
            unit: LinearUnit::Metre,
            standard_parallels: None,
        }
    }

    /// The parameters of a Gauss-Krüger 6° zone.
    /// * `zone` - the zone number, 1..=60.
    /// * `prefix` - whether the false easting is prefixed by the zone number.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `zone` is not in 1..=60.
    pub fn gauss_kruger_6(zone: u8, prefix: bool) -> Result<Self> {
        Self::new(
            zones::gauss_kruger_6_central_meridian(zone)?,
            Latitude::default(),
            1.0,
            Metres(zones::zone_false_easting(zone, prefix)),
            Metres(0.0),
        )
    }

    /// The parameters of a Gauss-Krüger 3° zone.
    /// * `zone` - the zone number, 1..=120.
    /// * `prefix` - whether the false easting is prefixed by the zone number.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `zone` is not in 1..=120.
    pub fn gauss_kruger_3(zone: u8, prefix: bool) -> Result<Self> {
        Self::new(
            zones::gauss_kruger_3_central_meridian(zone)?,
            Latitude::default(),
            1.0,
            Metres(zones::zone_false_easting(zone, prefix)),
            Metres(0.0),
        )
    }

    /// Set the linear unit of the grid coordinates.
    #[must_use]
    pub const fn with_unit(mut self, unit: LinearUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Set the standard parallels.
    /// They are carried for conic grids, the transverse Mercator
    /// projection does not use them.
    #[must_use]
    pub const fn with_standard_parallels(mut self, first: Latitude, second: Latitude) -> Self {
        self.standard_parallels = Some((first, second));
        self
    }

    /// The central meridian.
    #[must_use]
    pub const fn central_meridian(&self) -> Longitude {
        self.central_meridian
    }

    /// The latitude of the false origin.
    #[must_use]
    pub const fn latitude_of_origin(&self) -> Latitude {
        self.latitude_of_origin
    }

    /// The scale factor on the central meridian.
    #[must_use]
    pub const fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// The false easting in metres.
    #[must_use]
    pub const fn false_easting(&self) -> f64 {
        self.false_easting
    }

    /// The false northing in metres.
    #[must_use]
    pub const fn false_northing(&self) -> f64 {
        self.false_northing
    }

    /// The linear unit of grid coordinates.
    #[must_use]
    pub const fn unit(&self) -> LinearUnit {
        self.unit
    }

    /// The standard parallels, if any.
    #[must_use]
    pub const fn standard_parallels(&self) -> Option<(Latitude, Latitude)> {
        self.standard_parallels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use angle_sc::is_within_tolerance;

    #[test]
    fn test_projection_parameters_new() {
        let params = ProjectionParameters::new(
            Longitude::from_degrees(-2.0),
            Latitude::from_degrees(49.0).unwrap(),
            0.999_601_271_7,
            Metres(400_000.0),
            Metres(-100_000.0),
        )
        .unwrap();
        assert!(is_within_tolerance(-2.0, params.central_meridian().degrees(), 1e-12));
        assert!(is_within_tolerance(49.0, params.latitude_of_origin().degrees(), 1e-12));
        assert_eq!(0.999_601_271_7, params.scale_factor());
        assert_eq!(400_000.0, params.false_easting());
        assert_eq!(-100_000.0, params.false_northing());
        assert_eq!(LinearUnit::Metre, params.unit());
        assert!(params.standard_parallels().is_none());

        let cm = Longitude::default();
        let origin = Latitude::default();
        assert!(ProjectionParameters::new(cm, origin, 0.0, Metres(0.0), Metres(0.0)).is_err());
        assert!(ProjectionParameters::new(cm, origin, -1.0, Metres(0.0), Metres(0.0)).is_err());
        assert!(ProjectionParameters::new(cm, origin, f64::NAN, Metres(0.0), Metres(0.0)).is_err());
        assert!(ProjectionParameters::new(cm, origin, 1.0, Metres(f64::INFINITY), Metres(0.0)).is_err());
        assert!(ProjectionParameters::new(cm, origin, 1.0, Metres(0.0), Metres(f64::NAN)).is_err());
    }

    #[test]
    fn test_projection_parameters_utm() {
        let params = ProjectionParameters::utm(56, false).unwrap();
        assert!(is_within_tolerance(153.0, params.central_meridian().degrees(), 1e-12));
        assert_eq!(0.9996, params.scale_factor());
        assert_eq!(500_000.0, params.false_easting());
        assert_eq!(10_000_000.0, params.false_northing());
        assert!(ProjectionParameters::utm(0, true).is_err());
        assert!(ProjectionParameters::utm(61, true).is_err());

        let sydney = ProjectionParameters::utm_for(
            Latitude::from_degrees(-33.8688).unwrap(),
            Longitude::from_degrees(151.2093),
        );
        assert_eq!(params, sydney);

        let north = ProjectionParameters::utm_for(
            Latitude::from_degrees(52.0).unwrap(),
            Longitude::from_degrees(6.0),
        );
        assert!(is_within_tolerance(9.0, north.central_meridian().degrees(), 1e-12));
        assert_eq!(0.0, north.false_northing());
    }

    #[test]
    fn test_projection_parameters_gauss_kruger() {
        let params = ProjectionParameters::gauss_kruger_6(20, true).unwrap();
        assert!(is_within_tolerance(117.0, params.central_meridian().degrees(), 1e-12));
        assert_eq!(1.0, params.scale_factor());
        assert_eq!(20_500_000.0, params.false_easting());
        assert_eq!(0.0, params.false_northing());
        assert!(ProjectionParameters::gauss_kruger_6(61, false).is_err());

        let params = ProjectionParameters::gauss_kruger_3(39, false).unwrap();
        assert!(is_within_tolerance(117.0, params.central_meridian().degrees(), 1e-12));
        assert_eq!(500_000.0, params.false_easting());
        assert!(ProjectionParameters::gauss_kruger_3(121, false).is_err());

        let lat1 = Latitude::from_degrees(25.0).unwrap();
        let lat2 = Latitude::from_degrees(47.0).unwrap();
        let params = params
            .with_unit(LinearUnit::Kilometre)
            .with_standard_parallels(lat1, lat2);
        assert_eq!(LinearUnit::Kilometre, params.unit());
        assert_eq!(Some((lat1, lat2)), params.standard_parallels());
    }
}
