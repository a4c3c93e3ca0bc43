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

//! The datum module contains transformations between geodetic datums.
//!
//! * `bursa_wolf` - the seven parameter Bursa-Wolf (Helmert) transformation
//!   of geocentric coordinates, `TransParameters`.
//! * `molodensky` - the three parameter Molodensky transformation of
//!   geodetic coordinates, `MolodenskyParameters`.
//!
//! # Examples
//! ```
//! use ellipsoid_geodesy::*;
//!
//! // WGS 72 to WGS 84, EPSG Guidance Note 7-2 example
//! let wgs72 = Ellipsoid::from_inverse_flattening(Metres(6_378_135.0), 298.26).unwrap();
//! let params = TransParameters::new(
//!     &wgs72,
//!     &WGS84_ELLIPSOID,
//!     [0.0, 0.0, 4.5],
//!     [0.0, 0.0, 0.554],
//!     0.219,
//! )
//! .unwrap();
//! let result = params.transform(&SpaceRectangularCoord::new(3_657_660.66, 255_768.55, 5_201_382.11));
//! assert!((result.x - 3_657_660.78).abs() < 0.01);
//! assert!((result.y - 255_778.43).abs() < 0.01);
//! assert!((result.z - 5_201_387.75).abs() < 0.01);
//! ```

pub mod bursa_wolf;
pub mod molodensky;

pub use bursa_wolf::TransParameters;
pub use molodensky::MolodenskyParameters;

use crate::error::{GeodesyError, Result};
use crate::point::GeoPoint;
use crate::Ellipsoid;

/// Check that a point is on the source `Ellipsoid` of a transformation.
fn ensure_on_source(point: &GeoPoint, source: &Ellipsoid) -> Result<()> {
    if point.is_on(source) {
        Ok(())
    } else {
        Err(GeodesyError::invalid_parameter(
            "point",
            "the point is not on the source ellipsoid of the transformation",
        ))
    }
}

/// Check that all the values of a parameter are finite.
fn ensure_all_finite(name: &'static str, values: &[f64]) -> Result<()> {
    values
        .iter()
        .try_for_each(|&value| crate::error::ensure_finite(name, value).map(|_| ()))
}
