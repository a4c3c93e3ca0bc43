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

//! The angle module contains the normalized angle types used by the
//! coordinate, geodesic and projection modules:
//!
//! - `Latitude`: radians in the closed range [-π/2, π/2];
//! - `Longitude`: radians in the half open range (-π, π];
//! - `Azimuth`: radians clockwise from North in the half open range [0, 2π).
//!
//! The types convert to and from the `angle_sc` `Angle`, `Degrees` and
//! `Radians` types, and their arithmetic operators re-normalize the result.

use crate::error::{ensure_finite, GeodesyError, Result};
use angle_sc::{Angle, Degrees, Radians};
use core::f64::consts::{FRAC_PI_2, PI, TAU};
use core::ops::{Add, Neg, Sub};

/// One arc second in radians.
pub const ARC_SECOND: f64 = PI / 648_000.0;

/// Wrap an angle in radians into the range (-π, π].
#[must_use]
pub fn normalize_longitude(radians: f64) -> f64 {
    if -PI < radians && radians <= PI {
        return radians;
    }
    let wrapped = (radians + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        PI
    } else {
        wrapped
    }
}

/// Wrap an angle in radians into the range [0, 2π).
#[must_use]
pub fn normalize_azimuth(radians: f64) -> f64 {
    if (0.0..TAU).contains(&radians) {
        return radians;
    }
    let wrapped = radians.rem_euclid(TAU);
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Convert degrees, minutes and seconds to decimal degrees.
/// The sign of the result is the sign of `degrees`, so -0.0 degrees
/// gives a negative result.
/// * `degrees`, `minutes`, `seconds` - the sexagesimal components.
#[must_use]
pub fn dms_to_degrees(degrees: f64, minutes: f64, seconds: f64) -> f64 {
    let value = libm::fabs(degrees) + minutes / 60.0 + seconds / 3600.0;
    if degrees.is_sign_negative() {
        -value
    } else {
        value
    }
}

/// Split decimal degrees into degrees, minutes and seconds.
/// The sign is carried by the degrees component.
#[must_use]
pub fn degrees_to_dms(value: f64) -> (f64, f64, f64) {
    let abs_value = libm::fabs(value);
    let degrees = libm::trunc(abs_value);
    let minutes_value = (abs_value - degrees) * 60.0;
    let minutes = libm::trunc(minutes_value);
    let seconds = (minutes_value - minutes) * 60.0;
    let degrees = if value.is_sign_negative() {
        -degrees
    } else {
        degrees
    };
    (degrees, minutes, seconds)
}

/// A geodetic Latitude in radians, in the range [-π/2, π/2].
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Latitude(f64);

impl Latitude {
    /// Construct a `Latitude` from a value in radians.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `radians` is not finite or |radians| > π/2.
    pub fn new(radians: f64) -> Result<Self> {
        let radians = ensure_finite("latitude", radians)?;
        if libm::fabs(radians) <= FRAC_PI_2 {
            Ok(Self(radians))
        } else {
            Err(GeodesyError::invalid_parameter(
                "latitude",
                format!("{radians} radians is outside [-pi/2, pi/2]"),
            ))
        }
    }

    /// Construct a `Latitude` from a value in degrees.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `degrees` is not finite or |degrees| > 90.
    pub fn from_degrees(degrees: f64) -> Result<Self> {
        Self::new(degrees.to_radians())
    }

    /// Construct a `Latitude` from degrees, minutes and seconds.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if the value is outside [-90°, 90°].
    pub fn from_dms(degrees: f64, minutes: f64, seconds: f64) -> Result<Self> {
        Self::from_degrees(dms_to_degrees(degrees, minutes, seconds))
    }

    /// Construct a `Latitude` clamping `radians` into [-π/2, π/2].
    /// Used for calculated latitudes which may exceed the range by rounding.
    #[must_use]
    pub fn clamped(radians: f64) -> Self {
        Self(radians.clamp(-FRAC_PI_2, FRAC_PI_2))
    }

    /// The `Latitude` in radians.
    #[must_use]
    pub const fn radians(self) -> f64 {
        self.0
    }

    /// The `Latitude` in degrees.
    #[must_use]
    pub fn degrees(self) -> f64 {
        self.0.to_degrees()
    }

    /// The `Latitude` as an `angle_sc` `Angle`.
    #[must_use]
    pub fn to_angle(self) -> Angle {
        Angle::from(Radians(self.0))
    }
}

impl TryFrom<Degrees> for Latitude {
    type Error = GeodesyError;

    fn try_from(degrees: Degrees) -> Result<Self> {
        Self::from_degrees(degrees.0)
    }
}

impl From<Angle> for Latitude {
    /// Convert a calculated latitude `Angle`, e.g. from an auxiliary sphere
    /// calculation, clamping it into the valid range.
    fn from(angle: Angle) -> Self {
        Self::clamped(Radians::from(angle).0)
    }
}

impl From<Latitude> for Angle {
    fn from(lat: Latitude) -> Self {
        lat.to_angle()
    }
}

impl Neg for Latitude {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Add for Latitude {
    type Output = Self;

    /// The sum of two latitudes, clamped at the poles.
    fn add(self, other: Self) -> Self {
        Self::clamped(self.0 + other.0)
    }
}

impl Sub for Latitude {
    type Output = Self;

    /// The difference of two latitudes, clamped at the poles.
    fn sub(self, other: Self) -> Self {
        Self::clamped(self.0 - other.0)
    }
}

/// A Longitude in radians, in the range (-π, π].
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Longitude(f64);

impl Longitude {
    /// Construct a `Longitude` from a value in radians, wrapping it into
    /// the range (-π, π].
    #[must_use]
    pub fn new(radians: f64) -> Self {
        Self(normalize_longitude(radians))
    }

    /// Construct a `Longitude` from a value in degrees.
    #[must_use]
    pub fn from_degrees(degrees: f64) -> Self {
        Self::new(degrees.to_radians())
    }

    /// Construct a `Longitude` from degrees, minutes and seconds.
    #[must_use]
    pub fn from_dms(degrees: f64, minutes: f64, seconds: f64) -> Self {
        Self::from_degrees(dms_to_degrees(degrees, minutes, seconds))
    }

    /// The `Longitude` in radians.
    #[must_use]
    pub const fn radians(self) -> f64 {
        self.0
    }

    /// The `Longitude` in degrees.
    #[must_use]
    pub fn degrees(self) -> f64 {
        self.0.to_degrees()
    }

    /// The `Longitude` as an `angle_sc` `Angle`.
    #[must_use]
    pub fn to_angle(self) -> Angle {
        Angle::from(Radians(self.0))
    }
}

impl From<Degrees> for Longitude {
    fn from(degrees: Degrees) -> Self {
        Self::from_degrees(degrees.0)
    }
}

impl From<Angle> for Longitude {
    fn from(angle: Angle) -> Self {
        Self::new(Radians::from(angle).0)
    }
}

impl From<Longitude> for Angle {
    fn from(lon: Longitude) -> Self {
        lon.to_angle()
    }
}

impl Add for Longitude {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.0 + other.0)
    }
}

impl Sub for Longitude {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.0 - other.0)
    }
}

impl Neg for Longitude {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.0)
    }
}

/// An Azimuth in radians, measured clockwise from North,
/// in the range [0, 2π).
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Azimuth(f64);

impl Azimuth {
    /// Due North.
    pub const NORTH: Self = Self(0.0);

    /// Construct an `Azimuth` from a value in radians, wrapping it into
    /// the range [0, 2π).
    #[must_use]
    pub fn new(radians: f64) -> Self {
        Self(normalize_azimuth(radians))
    }

    /// Construct an `Azimuth` from a value in degrees.
    #[must_use]
    pub fn from_degrees(degrees: f64) -> Self {
        Self::new(degrees.to_radians())
    }

    /// Construct an `Azimuth` from degrees, minutes and seconds.
    #[must_use]
    pub fn from_dms(degrees: f64, minutes: f64, seconds: f64) -> Self {
        Self::from_degrees(dms_to_degrees(degrees, minutes, seconds))
    }

    /// The `Azimuth` in radians.
    #[must_use]
    pub const fn radians(self) -> f64 {
        self.0
    }

    /// The `Azimuth` in degrees.
    #[must_use]
    pub fn degrees(self) -> f64 {
        self.0.to_degrees()
    }

    /// The opposite `Azimuth`, i.e. the back bearing.
    #[must_use]
    pub fn reverse(self) -> Self {
        Self::new(self.0 + PI)
    }

    /// The `Azimuth` as an `angle_sc` `Angle`.
    #[must_use]
    pub fn to_angle(self) -> Angle {
        Angle::from(Radians(self.0))
    }

    /// The smallest signed difference `self - other` in radians,
    /// in the range (-π, π].
    #[must_use]
    pub fn difference(self, other: Self) -> f64 {
        normalize_longitude(self.0 - other.0)
    }
}

impl From<Degrees> for Azimuth {
    fn from(degrees: Degrees) -> Self {
        Self::from_degrees(degrees.0)
    }
}

impl From<Angle> for Azimuth {
    fn from(angle: Angle) -> Self {
        Self::new(Radians::from(angle).0)
    }
}

impl From<Azimuth> for Angle {
    fn from(azimuth: Azimuth) -> Self {
        azimuth.to_angle()
    }
}

impl Add for Azimuth {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.0 + other.0)
    }
}

impl Sub for Azimuth {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::new(self.0 - other.0)
    }
}
