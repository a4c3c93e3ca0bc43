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

//! The point module contains the coordinate value types:
//!
//! - `GeoPoint`: a latitude and longitude on a specific `Ellipsoid`;
//! - `GeodeticCoord`: a latitude, longitude and ellipsoidal height;
//! - `SpaceRectangularCoord`: geocentric X, Y, Z coordinates;
//! - `ProjectedCoord`: map grid northing and easting.

use crate::angle::{Latitude, Longitude};
use crate::error::{ensure_finite, Result};
use crate::{Degrees, Ellipsoid, Metres};
use unit_sphere::LatLong;

/// A position on the surface of an `Ellipsoid`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint<'a> {
    lat: Latitude,
    lon: Longitude,
    ellipsoid: &'a Ellipsoid,
}

impl<'a> GeoPoint<'a> {
    /// Constructor.
    /// * `lat` - the geodetic latitude.
    /// * `lon` - the longitude.
    /// * `ellipsoid` - the `Ellipsoid` the position is defined on.
    #[must_use]
    pub const fn new(lat: Latitude, lon: Longitude, ellipsoid: &'a Ellipsoid) -> Self {
        Self {
            lat,
            lon,
            ellipsoid,
        }
    }

    /// Construct a `GeoPoint` from a latitude and longitude in degrees.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if the latitude is outside [-90°, 90°] or either
    /// value is not finite.
    pub fn from_degrees(lat: f64, lon: f64, ellipsoid: &'a Ellipsoid) -> Result<Self> {
        let lon = ensure_finite("longitude", lon)?;
        Ok(Self::new(
            Latitude::from_degrees(lat)?,
            Longitude::from_degrees(lon),
            ellipsoid,
        ))
    }

    /// Construct a `GeoPoint` from a `unit_sphere` `LatLong`.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if the latitude is outside [-90°, 90°].
    pub fn from_lat_long(lat_long: &LatLong, ellipsoid: &'a Ellipsoid) -> Result<Self> {
        Self::from_degrees(lat_long.lat().0, lat_long.lon().0, ellipsoid)
    }

    /// The geodetic latitude.
    #[must_use]
    pub const fn lat(&self) -> Latitude {
        self.lat
    }

    /// The longitude.
    #[must_use]
    pub const fn lon(&self) -> Longitude {
        self.lon
    }

    /// The `Ellipsoid` the position is defined on.
    #[must_use]
    pub const fn ellipsoid(&self) -> &'a Ellipsoid {
        self.ellipsoid
    }

    /// Whether the position is defined on `ellipsoid`.
    #[must_use]
    pub fn is_on(&self, ellipsoid: &Ellipsoid) -> bool {
        self.ellipsoid.is_same(ellipsoid)
    }

    /// The position as a `unit_sphere` `LatLong` in degrees.
    #[must_use]
    pub fn to_lat_long(&self) -> LatLong {
        LatLong::new(Degrees(self.lat.degrees()), Degrees(self.lon.degrees()))
    }

    /// The position at `height` above the ellipsoid.
    #[must_use]
    pub const fn with_height(&self, height: Metres) -> GeodeticCoord {
        GeodeticCoord::new(self.lat, self.lon, height)
    }
}

/// Geodetic coordinates: latitude, longitude and height above the ellipsoid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeodeticCoord {
    lat: Latitude,
    lon: Longitude,
    height: Metres,
}

impl GeodeticCoord {
    /// Constructor.
    #[must_use]
    pub const fn new(lat: Latitude, lon: Longitude, height: Metres) -> Self {
        Self { lat, lon, height }
    }

    /// Construct a `GeodeticCoord` from a latitude and longitude in degrees
    /// and a height in metres.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if the latitude is outside [-90°, 90°] or any
    /// value is not finite.
    pub fn from_degrees(lat: f64, lon: f64, height: f64) -> Result<Self> {
        let lon = ensure_finite("longitude", lon)?;
        let height = ensure_finite("height", height)?;
        Ok(Self::new(
            Latitude::from_degrees(lat)?,
            Longitude::from_degrees(lon),
            Metres(height),
        ))
    }

    /// The geodetic latitude.
    #[must_use]
    pub const fn lat(&self) -> Latitude {
        self.lat
    }

    /// The longitude.
    #[must_use]
    pub const fn lon(&self) -> Longitude {
        self.lon
    }

    /// The height above the ellipsoid.
    #[must_use]
    pub const fn height(&self) -> Metres {
        self.height
    }

    /// The position on the surface of `ellipsoid`, discarding the height.
    #[must_use]
    pub const fn to_geo_point<'a>(&self, ellipsoid: &'a Ellipsoid) -> GeoPoint<'a> {
        GeoPoint::new(self.lat, self.lon, ellipsoid)
    }
}

/// Geocentric Cartesian coordinates in metres: the origin is the centre of
/// the ellipsoid, Z points to the North pole and X to the prime meridian.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpaceRectangularCoord {
    /// X in metres.
    pub x: f64,
    /// Y in metres.
    pub y: f64,
    /// Z in metres.
    pub z: f64,
}

impl SpaceRectangularCoord {
    /// Constructor.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The straight line distance to `other`.
    #[must_use]
    pub fn distance(&self, other: &Self) -> Metres {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        Metres(libm::sqrt(dx * dx + dy * dy + dz * dz))
    }
}

/// The linear unit of projected coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LinearUnit {
    /// The metre.
    #[default]
    Metre,
    /// The kilometre.
    Kilometre,
    /// The international foot, 0.3048 m.
    InternationalFoot,
    /// The US survey foot, 1200/3937 m.
    UsSurveyFoot,
}

impl LinearUnit {
    /// The length of the unit in metres.
    #[must_use]
    pub fn metres_per_unit(self) -> f64 {
        match self {
            Self::Metre => 1.0,
            Self::Kilometre => 1000.0,
            Self::InternationalFoot => 0.3048,
            Self::UsSurveyFoot => 1200.0 / 3937.0,
        }
    }

    /// Convert a value in this unit to metres.
    #[must_use]
    pub fn to_metres(self, value: f64) -> f64 {
        value * self.metres_per_unit()
    }

    /// Convert a value in metres to this unit.
    #[must_use]
    pub fn from_metres(self, metres: f64) -> f64 {
        metres / self.metres_per_unit()
    }
}

/// Map grid coordinates: northing and easting in a linear unit together
/// with the false origin of the grid in metres.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ProjectedCoord {
    northing: f64,
    easting: f64,
    unit: LinearUnit,
    false_northing: f64,
    false_easting: f64,
}

impl ProjectedCoord {
    /// Constructor.
    /// * `northing`, `easting` - the grid coordinates in `unit`.
    /// * `unit` - the linear unit of `northing` and `easting`.
    /// * `false_northing`, `false_easting` - the false origin in metres.
    #[must_use]
    pub const fn new(
        northing: f64,
        easting: f64,
        unit: LinearUnit,
        false_northing: f64,
        false_easting: f64,
    ) -> Self {
        Self {
            northing,
            easting,
            unit,
            false_northing,
            false_easting,
        }
    }

    /// The northing in `unit`.
    #[must_use]
    pub const fn northing(&self) -> f64 {
        self.northing
    }

    /// The easting in `unit`.
    #[must_use]
    pub const fn easting(&self) -> f64 {
        self.easting
    }

    /// The linear unit of the northing and easting.
    #[must_use]
    pub const fn unit(&self) -> LinearUnit {
        self.unit
    }

    /// The false northing in metres.
    #[must_use]
    pub const fn false_northing(&self) -> f64 {
        self.false_northing
    }

    /// The false easting in metres.
    #[must_use]
    pub const fn false_easting(&self) -> f64 {
        self.false_easting
    }

    /// The northing in metres.
    #[must_use]
    pub fn northing_metres(&self) -> Metres {
        Metres(self.unit.to_metres(self.northing))
    }

    /// The easting in metres.
    #[must_use]
    pub fn easting_metres(&self) -> Metres {
        Metres(self.unit.to_metres(self.easting))
    }
}
