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

//! The zones module contains the zone systems of the transverse Mercator
//! grids: UTM and the 6° and 3° Gauss-Krüger zones.
//!
//! UTM zones are 6° wide, numbered 1 to 60 eastwards from 180°W.  
//! Gauss-Krüger 6° zones are numbered 1 to 60 eastwards from 0°, with
//! central meridians at 6n - 3 degrees.  
//! Gauss-Krüger 3° zones are numbered 1 to 120 eastwards from 1.5°E, with
//! central meridians at 3n degrees.
//!
//! Gauss-Krüger grids may prefix the zone number to the false easting, so
//! that a point in zone 20 has an easting of the form 20 xxx xxx.xxx m.

use crate::angle::Longitude;
use crate::error::{GeodesyError, Result};

/// The number of UTM and Gauss-Krüger 6° zones.
pub const SIX_DEGREE_ZONES: u8 = 60;

/// The number of Gauss-Krüger 3° zones.
pub const THREE_DEGREE_ZONES: u8 = 120;

/// The UTM scale factor on the central meridian.
pub const UTM_SCALE_FACTOR: f64 = 0.9996;

/// The false easting of UTM and Gauss-Krüger zones in metres.
pub const FALSE_EASTING: f64 = 500_000.0;

/// The UTM false northing in the southern hemisphere in metres.
pub const SOUTHERN_FALSE_NORTHING: f64 = 10_000_000.0;

/// The easting multiple of a zone number prefix in metres.
pub const ZONE_PREFIX: f64 = 1_000_000.0;

/// Check that a zone number is in 1..=zones.
fn validate_zone(zone: u8, zones: u8) -> Result<u8> {
    if (1..=zones).contains(&zone) {
        Ok(zone)
    } else {
        Err(GeodesyError::invalid_parameter(
            "zone",
            format!("{zone} is outside 1..={zones}"),
        ))
    }
}

/// The longitude in degrees East of Greenwich, in [0, 360).
fn degrees_east(lon: Longitude) -> f64 {
    let degrees = lon.degrees();
    if degrees < 0.0 {
        degrees + 360.0
    } else {
        degrees
    }
}

/// The UTM zone containing a longitude.
/// Longitude 180° is in zone 60.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn utm_zone(lon: Longitude) -> u8 {
    let zone = libm::floor((lon.degrees() + 180.0) / 6.0) as u8 + 1;
    zone.clamp(1, SIX_DEGREE_ZONES)
}

/// The central meridian of a UTM zone.
///
/// # Errors
///
/// `InvalidParameter` if `zone` is not in 1..=60.
pub fn utm_central_meridian(zone: u8) -> Result<Longitude> {
    let zone = validate_zone(zone, SIX_DEGREE_ZONES)?;
    Ok(utm_meridian(zone))
}

/// The central meridian of the UTM zone containing `lon`.
#[must_use]
pub fn utm_zone_central_meridian(lon: Longitude) -> Longitude {
    utm_meridian(utm_zone(lon))
}

fn utm_meridian(zone: u8) -> Longitude {
    Longitude::from_degrees(6.0 * f64::from(zone) - 183.0)
}

/// The UTM false northing of a hemisphere.
#[must_use]
pub const fn hemisphere_false_northing(north: bool) -> f64 {
    if north {
        0.0
    } else {
        SOUTHERN_FALSE_NORTHING
    }
}

/// The Gauss-Krüger 6° zone containing a longitude.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn gauss_kruger_6_zone(lon: Longitude) -> u8 {
    let zone = libm::floor(degrees_east(lon) / 6.0) as u8 + 1;
    zone.clamp(1, SIX_DEGREE_ZONES)
}

/// The central meridian of a Gauss-Krüger 6° zone.
///
/// # Errors
///
/// `InvalidParameter` if `zone` is not in 1..=60.
pub fn gauss_kruger_6_central_meridian(zone: u8) -> Result<Longitude> {
    let zone = validate_zone(zone, SIX_DEGREE_ZONES)?;
    Ok(Longitude::from_degrees(6.0 * f64::from(zone) - 3.0))
}

/// The Gauss-Krüger 3° zone containing a longitude.
/// Longitudes within 1.5° of Greenwich are in zone 120.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn gauss_kruger_3_zone(lon: Longitude) -> u8 {
    let zone = libm::floor((degrees_east(lon) + 1.5) / 3.0) as u8;
    match zone {
        0 => THREE_DEGREE_ZONES,
        _ => zone.min(THREE_DEGREE_ZONES),
    }
}

/// The central meridian of a Gauss-Krüger 3° zone.
///
/// # Errors
///
/// `InvalidParameter` if `zone` is not in 1..=120.
pub fn gauss_kruger_3_central_meridian(zone: u8) -> Result<Longitude> {
    let zone = validate_zone(zone, THREE_DEGREE_ZONES)?;
    Ok(Longitude::from_degrees(3.0 * f64::from(zone)))
}

/// The false easting of a zone in metres, optionally prefixed with the
/// zone number.
#[must_use]
pub fn zone_false_easting(zone: u8, prefix: bool) -> f64 {
    if prefix {
        f64::from(zone) * ZONE_PREFIX + FALSE_EASTING
    } else {
        FALSE_EASTING
    }
}

/// Split a zone prefixed easting into its zone number and the easting
/// without the prefix.
/// * `easting` - the prefixed easting in metres.
///
/// # Errors
///
/// `InvalidParameter` if `easting` is not finite, is negative or has a
/// prefix greater than 120.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn split_zone_prefix(easting: f64) -> Result<(u8, f64)> {
    if !easting.is_finite() || easting < 0.0 {
        return Err(GeodesyError::invalid_parameter(
            "easting",
            format!("{easting} is not a zone prefixed easting"),
        ));
    }
    let prefix = libm::floor(easting / ZONE_PREFIX);
    if prefix < 1.0 || f64::from(THREE_DEGREE_ZONES) < prefix {
        return Err(GeodesyError::invalid_parameter(
            "easting",
            format!("{easting} does not have a zone prefix"),
        ));
    }
    Ok((prefix as u8, easting - prefix * ZONE_PREFIX))
}
