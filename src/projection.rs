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

//! The projection module contains the Gauss-Krüger (transverse Mercator)
//! projection of an ellipsoid, as used by UTM and by national grids.
//!
//! * `parameters` - the grid definition, `ProjectionParameters`.
//! * `zones` - the UTM and Gauss-Krüger zone systems.
//! * `gauss_kruger` - the `TransverseMercator` projection: forward, inverse,
//!   point scale factor and meridian convergence.
//! * `correction` - the direction and distance corrections from geodesics
//!   to chords on the grid.
//!
//! # Examples
//! ```
//! use ellipsoid_geodesy::*;
//!
//! let projection = TransverseMercator::new(
//!     &WGS84_ELLIPSOID,
//!     ProjectionParameters::utm(31, true).unwrap(),
//! );
//! let lat = Latitude::from_degrees(52.0).unwrap();
//! let lon = Longitude::from_degrees(6.0);
//! let coord = projection.forward(lat, lon).unwrap();
//! assert!((coord.easting() - 705_928.919).abs() < 1e-3);
//!
//! let (lat2, lon2) = projection.inverse(&coord).unwrap();
//! assert!((lat2.radians() - lat.radians()).abs() < 1e-9);
//! assert!((lon2.radians() - lon.radians()).abs() < 1e-9);
//! ```

pub mod correction;
pub mod gauss_kruger;
pub mod parameters;
pub mod zones;

pub use gauss_kruger::{NaturalCoord, TransverseMercator};
pub use parameters::ProjectionParameters;
