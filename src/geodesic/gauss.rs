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

//! The gauss module contains the Gauss mid-latitude solutions of the
//! geodesic problems.
//!
//! The formulae expand the geodesic about its mid point in powers of `S/N`
//! to second order, so they are accurate for lines up to a few hundred
//! kilometres long. In the formulae `B` is the latitude, `L` the longitude,
//! `A` the azimuth, `t = tan B`, `η² = e'²cos²B`, `V² = 1 + η²`,
//! `N = c/V` and `M = c/V³`.

use super::{azimuth_from_pole, is_at_pole, meridian_from_pole, DirectSolution, InverseSolution};
use crate::angle::normalize_azimuth;
use crate::{Azimuth, Ellipsoid, GeoPoint, GeodesyError, Latitude, Longitude, Metres, Result};
use core::f64::consts::{FRAC_PI_2, PI};

/// The maximum number of iterations of the direct solution.
pub const MAX_ITERATIONS: u32 = 50;

/// The convergence tolerance of each of the differences, in radians.
pub const TOLERANCE: f64 = 1e-12;

/// The auxiliary quantities of the formulae at a latitude.
#[derive(Clone, Copy, Debug)]
struct MidLatitude {
    sin_b: f64,
    cos_b: f64,
    /// tan B
    t: f64,
    /// η²
    eta_2: f64,
    /// V²
    v_2: f64,
    /// N
    n: f64,
}

impl MidLatitude {
    fn new(lat: f64, ellipsoid: &Ellipsoid) -> Self {
        let (sin_b, cos_b) = libm::sincos(lat);
        let eta_2 = ellipsoid.ep_2() * cos_b * cos_b;
        let v_2 = 1.0 + eta_2;
        Self {
            sin_b,
            cos_b,
            t: sin_b / cos_b,
            eta_2,
            v_2,
            n: ellipsoid.c().0 / libm::sqrt(v_2),
        }
    }

    /// The meridian radius of curvature, M = c/V³ = N/V².
    fn m(&self) -> f64 {
        self.n / self.v_2
    }
}

/// Solve the direct geodesic problem with the Gauss mid-latitude formulae,
/// iterating on the mid latitude and mid azimuth until the latitude,
/// longitude and azimuth differences have all converged.
/// @pre `distance` is finite and not negative.
/// * `start` - the start point.
/// * `distance` - the length of the geodesic.
/// * `azimuth` - the azimuth at the start point.
///
/// returns the end point and the reverse azimuth at the end point.
///
/// # Errors
///
/// `Convergence` if the differences do not converge within
/// `MAX_ITERATIONS`, `Domain` if the end latitude is beyond a pole.
#[allow(clippy::similar_names)]
pub fn direct<'a>(
    start: &GeoPoint<'a>,
    distance: Metres,
    azimuth: Azimuth,
) -> Result<DirectSolution<'a>> {
    let ellipsoid = start.ellipsoid();
    let s = distance.0;
    let b1 = start.lat().radians();

    // At a pole follow the meridian that the azimuth selects.
    let from_pole = is_at_pole(start.lat());
    let (lon1, a1) = if from_pole {
        let lon = meridian_from_pole(start.lat(), start.lon(), azimuth);
        (lon, if 0.0 < b1 { PI } else { 0.0 })
    } else {
        (start.lon(), azimuth.radians())
    };

    let mut b_m = b1;
    let mut a_m = a1;
    let (mut delta_b, mut delta_l, mut delta_a) = (0.0, 0.0, 0.0);
    let mut iteration = 0;
    loop {
        iteration += 1;
        let mid = MidLatitude::new(b_m, ellipsoid);
        let (sin_a, cos_a) = if from_pole {
            (0.0, libm::cos(a_m))
        } else {
            libm::sincos(a_m)
        };
        let (sin_2a, cos_2a) = (sin_a * sin_a, cos_a * cos_a);
        let t_2 = mid.t * mid.t;
        let eta_2 = mid.eta_2;
        let k = s * s / (24.0 * mid.n * mid.n);

        let next_b = s * cos_a / mid.m()
            * (1.0
                + k * (sin_2a * (2.0 + 3.0 * t_2 + 2.0 * eta_2)
                    + 3.0 * eta_2 * cos_2a * (t_2 - 1.0 - eta_2 - 4.0 * eta_2 * t_2)));
        let next_l = s * sin_a / (mid.n * mid.cos_b)
            * (1.0 + k * (sin_2a * t_2 - cos_2a * (1.0 + eta_2 - 9.0 * eta_2 * t_2)));
        let next_a = s * sin_a * mid.t / mid.n
            * (1.0
                + k * (cos_2a * (2.0 + 7.0 * eta_2 + 9.0 * eta_2 * t_2 + 5.0 * eta_2 * eta_2)
                    + sin_2a * (2.0 + t_2 + 2.0 * eta_2)));

        let change_b = libm::fabs(next_b - delta_b);
        let change_l = libm::fabs(next_l - delta_l);
        let change_a = libm::fabs(next_a - delta_a);
        delta_b = next_b;
        delta_l = next_l;
        delta_a = next_a;
        tracing::trace!(iteration, change_b, change_l, change_a, "gauss direct");

        if change_b < TOLERANCE && change_l < TOLERANCE && change_a < TOLERANCE {
            tracing::debug!(iterations = iteration, "gauss direct converged");
            break;
        }
        if MAX_ITERATIONS <= iteration {
            return Err(GeodesyError::convergence("gauss direct", iteration));
        }

        b_m = b1 + 0.5 * delta_b;
        a_m = a1 + 0.5 * delta_a;
    }

    let b2 = b1 + delta_b;
    if FRAC_PI_2 < libm::fabs(b2) {
        return Err(GeodesyError::domain(
            "gauss direct",
            format!("end latitude {} degrees is beyond a pole", b2.to_degrees()),
        ));
    }

    Ok(DirectSolution {
        end: GeoPoint::new(
            Latitude::clamped(b2),
            Longitude::new(lon1.radians() + delta_l),
            ellipsoid,
        ),
        reverse_azimuth: Azimuth::new(a1 + delta_a).reverse(),
    })
}

/// The mean azimuth from `S sin A` and `S cos A`, selecting the quadrant
/// from the signs of the latitude and longitude differences.
fn mean_azimuth(v: f64, u: f64, delta_b: f64, delta_l: f64) -> f64 {
    if delta_b == 0.0 {
        return if 0.0 < delta_l { FRAC_PI_2 } else { 3.0 * FRAC_PI_2 };
    }

    let t = libm::atan(libm::fabs(v) / libm::fabs(u));
    match (0.0 < delta_b, 0.0 <= delta_l) {
        (true, true) => t,
        (false, true) => PI - t,
        (false, false) => PI + t,
        (true, false) => 2.0 * PI - t,
    }
}

/// Solve the inverse geodesic problem with the Gauss mid-latitude formulae.
/// @pre `start` and `end` are on the same `Ellipsoid`.
/// * `start`, `end` - the start and end points.
///
/// returns the length of the geodesic, the azimuth at the start point and
/// the reverse azimuth at the end point.
#[allow(clippy::similar_names)]
#[must_use]
pub fn inverse(start: &GeoPoint, end: &GeoPoint) -> InverseSolution {
    let ellipsoid = start.ellipsoid();
    let b1 = start.lat().radians();
    let b2 = end.lat().radians();
    let delta_b = b2 - b1;
    let delta_l = (end.lon() - start.lon()).radians();
    if delta_b == 0.0 && delta_l == 0.0 {
        return InverseSolution::coincident();
    }

    let mid = MidLatitude::new(0.5 * (b1 + b2), ellipsoid);
    let t_2 = mid.t * mid.t;
    let eta_2 = mid.eta_2;
    let v_4 = mid.v_2 * mid.v_2;
    let cos_2b = mid.cos_b * mid.cos_b;
    let (db_2, dl_2) = (delta_b * delta_b, delta_l * delta_l);

    let r01 = mid.n * mid.cos_b;
    let r21 = mid.n * mid.cos_b * (1.0 + eta_2 - 9.0 * eta_2 * t_2) / (24.0 * v_4);
    let r03 = -mid.n * cos_2b * mid.cos_b * t_2 / 24.0;
    let s_sin_a = delta_l * (r01 + r21 * db_2 + r03 * dl_2);

    let s10 = mid.n / mid.v_2;
    let s12 = -mid.n * cos_2b * (2.0 + 3.0 * t_2 + 2.0 * eta_2) / (24.0 * mid.v_2);
    let s30 = mid.n * eta_2 * (1.0 - t_2 + eta_2 + 4.0 * eta_2 * t_2) / (8.0 * v_4 * mid.v_2);
    let s_cos_a = delta_b * (s10 + s12 * dl_2 + s30 * db_2);

    let delta_a = delta_l
        * mid.sin_b
        * (1.0
            + cos_2b * (1.0 + eta_2) * dl_2 / 12.0
            + db_2 * (3.0 + 8.0 * eta_2 + 5.0 * eta_2 * eta_2) / (24.0 * v_4));

    let a_m = mean_azimuth(s_sin_a, s_cos_a, delta_b, delta_l);
    let a1 = normalize_azimuth(a_m - 0.5 * delta_a);
    let a2 = a_m + 0.5 * delta_a;
    tracing::trace!(mean_azimuth = a_m, delta_a, "gauss inverse");

    let azimuth = if is_at_pole(start.lat()) {
        azimuth_from_pole(start.lat(), delta_l)
    } else {
        Azimuth::new(a1)
    };
    let reverse_azimuth = if is_at_pole(end.lat()) {
        azimuth_from_pole(end.lat(), -delta_l)
    } else {
        Azimuth::new(a2).reverse()
    };

    InverseSolution {
        distance: Metres(libm::hypot(s_sin_a, s_cos_a)),
        azimuth,
        reverse_azimuth,
    }
}
