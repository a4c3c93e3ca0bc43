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

//! The correction module contains the corrections from geodesics on the
//! ellipsoid to straight lines on the Gauss-Krüger plane.
//!
//! The grid bearing of the chord between two points is:
//!
//! T₁₂ = α₁₂ - γ₁ + δ₁₂
//!
//! where α₁₂ is the geodesic azimuth, γ₁ the meridian convergence and δ₁₂
//! the direction correction. The chord length is the geodesic length plus
//! the distance correction, multiplied by the central scale factor.

use super::gauss_kruger::{NaturalCoord, TransverseMercator};
use crate::error::Result;
use crate::point::ProjectedCoord;
use crate::{Metres, Radians};

/// The direction correction between natural coordinates.
/// * `p1`, `p2` - the natural coordinates of the start and end points.
/// * `radius` - the Gaussian mean radius at the mid latitude.
#[must_use]
pub fn natural_direction_correction(p1: NaturalCoord, p2: NaturalCoord, radius: Metres) -> Radians {
    Radians(-(p2.x - p1.x) * (2.0 * p1.y + p2.y) / (6.0 * radius.0 * radius.0))
}

/// The distance correction between natural coordinates.
/// * `p1`, `p2` - the natural coordinates of the start and end points.
/// * `distance` - the geodesic length between the points.
/// * `radius` - the Gaussian mean radius at the mid latitude.
#[must_use]
pub fn natural_distance_correction(
    p1: NaturalCoord,
    p2: NaturalCoord,
    distance: Metres,
    radius: Metres,
) -> Metres {
    let r_2 = radius.0 * radius.0;
    let y_m = 0.5 * (p1.y + p2.y);
    let y_m_2 = y_m * y_m;
    let delta_y = p2.y - p1.y;
    Metres(
        distance.0
            * (y_m_2 / (2.0 * r_2)
                + delta_y * delta_y / (24.0 * r_2)
                + y_m_2 * y_m_2 / (24.0 * r_2 * r_2)),
    )
}

impl TransverseMercator<'_> {
    /// The natural coordinates of two grid points and the Gaussian mean
    /// radius at their mid latitude.
    fn natural_pair(
        &self,
        p1: &ProjectedCoord,
        p2: &ProjectedCoord,
    ) -> Result<(NaturalCoord, NaturalCoord, Metres)> {
        let natural_1 = self.natural_coord(p1);
        let natural_2 = self.natural_coord(p2);
        let (lat1, _) = self.inverse_natural(natural_1)?;
        let (lat2, _) = self.inverse_natural(natural_2)?;
        let mid_lat = Radians(0.5 * (lat1.radians() + lat2.radians()));
        let radius = self.ellipsoid().gaussian_mean_radius(mid_lat.into());
        Ok((natural_1, natural_2, radius))
    }

    /// The direction correction from the geodesic between two grid points
    /// to the chord between them.
    ///
    /// # Errors
    ///
    /// `Domain` if a point is outside the domain of the inverse projection.
    pub fn direction_correction(&self, p1: &ProjectedCoord, p2: &ProjectedCoord) -> Result<Radians> {
        let (natural_1, natural_2, radius) = self.natural_pair(p1, p2)?;
        Ok(natural_direction_correction(natural_1, natural_2, radius))
    }

    /// The distance correction from the geodesic between two grid points
    /// to the chord between them on the natural plane.
    /// * `distance` - the geodesic length between the points.
    ///
    /// # Errors
    ///
    /// `Domain` if a point is outside the domain of the inverse projection.
    pub fn distance_correction(
        &self,
        p1: &ProjectedCoord,
        p2: &ProjectedCoord,
        distance: Metres,
    ) -> Result<Metres> {
        let (natural_1, natural_2, radius) = self.natural_pair(p1, p2)?;
        Ok(natural_distance_correction(natural_1, natural_2, distance, radius))
    }

    /// The grid distance of a geodesic between two grid points.
    /// * `distance` - the geodesic length between the points.
    ///
    /// # Errors
    ///
    /// `Domain` if a point is outside the domain of the inverse projection.
    pub fn grid_distance(
        &self,
        p1: &ProjectedCoord,
        p2: &ProjectedCoord,
        distance: Metres,
    ) -> Result<Metres> {
        let correction = self.distance_correction(p1, p2, distance)?;
        Ok(Metres(self.parameters().scale_factor() * (distance.0 + correction.0)))
    }
}
