// Copyright (c) 2024-2026 Ken Barker

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

//! The bessel module solves the geodesic problems on the auxiliary sphere,
//! using the correspondence between geodesics on an ellipsoid and great
//! circle arcs on a sphere, see
//! [Karney(2013)](https://link.springer.com/article/10.1007/s00190-012-0578-z).
//!
//! The inverse solution uses Newton's method to find the azimuth at the
//! start point, with the initial estimate of nearly antipodal arcs found by
//! solving the astroid problem, so it converges where Vincenty's iteration
//! fails.

#![allow(clippy::float_cmp)]
#![allow(clippy::many_single_char_names)]

use super::{azimuth_from_pole, is_at_pole, meridian_from_pole, DirectSolution, InverseSolution};
use crate::ellipsoid::coefficients::{
    evaluate_a1, evaluate_a2, evaluate_coeffs_c1, evaluate_coeffs_c1p, evaluate_coeffs_c2,
    sin_cos_series,
};
use crate::{Azimuth, Ellipsoid, GeoPoint, GeodesyError, Latitude, Longitude, Metres, Result};
use angle_sc::trig::{cosine_from_sine, swap_sin_cos, UnitNegRange};
use angle_sc::{is_small, Angle, Radians};
use core::f64::consts::PI;
use unit_sphere::great_circle;

/// The maximum precision, in Radians.
pub const MAX_PRECISION: Radians = Radians(2.0 * f64::EPSILON);

/// The maximum number of Newton iterations of the inverse solution.
pub const MAX_ITERATIONS: u32 = 32;

/// The largest longitude residual accepted when the iterations are exhausted.
pub const CONVERGENCE_TOLERANCE: f64 = 1e-12;

/// The minimum separation of points on the auxiliary sphere.
const MIN_VALUE: UnitNegRange = UnitNegRange(2.0 * f64::EPSILON);

/// Estimate omega12 by solving the astroid problem.
/// Solve k^4+2*k^3-(x^2+y^2-1)*k^2-2*y^2*k-y^2 = 0 for positive root k.
/// * `x`, `y` - astroid parameters, see Karney section 7.
///
/// returns the solution to the astroid problem.
#[must_use]
fn calculate_astroid(x: f64, y: f64) -> f64 {
    let p = x * x;
    let q = y * y;
    let r = (p + q - 1.0) / 6.0;

    // y = 0 with |x| <= 1
    if (q <= 0.0) && (r <= 0.0) {
        0.0
    } else {
        let s = p * q / 4.0;
        let r2 = r * r;
        let r3 = r * r2;
        let mut u = r;

        // zero on the evolute curve p^(1/3)+q^(1/3) = 1
        let discriminant = s * (s + 2.0 * r3);
        if 0.0 <= discriminant {
            let mut t3 = s + r3;
            // maximize abs(T3) to avoid cancellation
            t3 += if t3 < 0.0 {
                -libm::sqrt(discriminant)
            } else {
                libm::sqrt(discriminant)
            };
            let t = libm::cbrt(t3);
            u += if t == 0.0 { 0.0 } else { t + r2 / t };
        } else {
            // T is complex but u is real, discriminant < 0 implies r < 0
            let angle = libm::atan2(libm::sqrt(-discriminant), -(s + r3));
            u += 2.0 * r * libm::cos(angle / 3.0);
        }

        let v = libm::sqrt(u * u + q);
        let uv = if u < 0.0 { q / (v - u) } else { u + v };
        let w = (uv - q) / (2.0 * v);

        uv / (libm::sqrt(uv + w * w) + w)
    }
}

/// Calculate: m12b = (reduced length)/b
#[allow(clippy::similar_names)]
#[must_use]
fn calculate_reduced_length(
    eps: f64,
    sigma12: Radians,
    sigma1: Angle,
    dn1: f64,
    sigma2: Angle,
    dn2: f64,
) -> f64 {
    let a1 = evaluate_a1(eps);
    let a2 = evaluate_a2(eps);
    let m0x = a1 - a2;

    let a1p1 = 1.0 + a1;
    let a2p1 = 1.0 + a2;

    let ca = evaluate_coeffs_c1(eps);
    let mut cb = evaluate_coeffs_c2(eps);
    for i in 1..cb.len() {
        cb[i] = a1p1 * ca[i] - a2p1 * cb[i];
    }

    let j12 = m0x * (sigma12 + (sin_cos_series(&cb, sigma2) - sin_cos_series(&cb, sigma1))).0;
    dn2 * (sigma1.cos().0 * sigma2.sin().0)
        - dn1 * (sigma1.sin().0 * sigma2.cos().0)
        - sigma1.cos().0 * sigma2.cos().0 * j12
}

/// The astroid scale factors of a geodesic starting at parametric latitude
/// `beta`: (lamscale, betscale).
#[must_use]
fn astroid_scales(beta: Angle, ellipsoid: &Ellipsoid) -> (f64, f64) {
    // assumes sin(alpha1) = 1
    let clairaut = beta.cos();
    let eps = ellipsoid.calculate_epsilon(clairaut);
    let lamscale = ellipsoid.f() * clairaut.0 * ellipsoid.calculate_a3f(eps) * PI;
    (lamscale, lamscale * clairaut.0)
}

/// Whether a pair of points lies within the astroid about the antipode of
/// the start point: the region where the geodesic between them is not
/// unique and Vincenty's iteration fails to converge.
/// * `lat1`, `lat2` - the geodetic latitudes of the points.
/// * `delta_long` - the longitude difference between the points.
/// * `ellipsoid` - the `Ellipsoid`.
#[must_use]
pub fn is_nearly_antipodal(
    lat1: Angle,
    lat2: Angle,
    delta_long: Angle,
    ellipsoid: &Ellipsoid,
) -> bool {
    let beta1 = ellipsoid.calculate_parametric_latitude(lat1);
    let beta2 = ellipsoid.calculate_parametric_latitude(lat2);
    // scale by the latitude furthest from the Equator
    let beta = if beta1.cos() < beta2.cos() { beta1 } else { beta2 };
    let (lamscale, betscale) = astroid_scales(beta, ellipsoid);
    if betscale <= f64::EPSILON {
        return false;
    }

    let x = (Radians::from(delta_long.abs()).0 - PI) / lamscale;
    let y = (beta1 + beta2).sin().0 / betscale;
    libm::cbrt(x * x) + libm::cbrt(y * y) < 1.0
}

/// Estimate the initial azimuth on the auxiliary sphere for a nearly
/// antipodal arc by solving the astroid problem.
/// * `beta1`, `beta2` - the parametric latitudes of the start and finish points
///   on the auxiliary sphere.
/// * `lambda12` - Longitude difference between start and finish points.
///
/// returns the estimate of the initial azimuth on the auxiliary sphere.
#[must_use]
fn estimate_antipodal_initial_azimuth(
    beta1: Angle,
    beta2: Angle,
    lambda12: Angle,
    ellipsoid: &Ellipsoid,
) -> Angle {
    const Y_TOLERANCE: f64 = 200.0 * f64::EPSILON;
    const X_TOLERANCE: f64 = 2000.0 / core::f64::consts::FRAC_2_SQRT_PI;

    let (lamscale, betscale) = astroid_scales(beta1, ellipsoid);
    let x = Radians::from(lambda12.opposite()).0 / lamscale;
    let y = (beta1 + beta2).sin().0 / betscale;

    if (x <= -(1.0 + X_TOLERANCE)) || (y < -Y_TOLERANCE) {
        let k = calculate_astroid(x, y);
        let omg12a = lamscale * (-x * k / (1.0 + k));

        let omega12 = Radians(PI - omg12a);
        great_circle::calculate_gc_azimuth(beta1, beta2, Angle::from(omega12))
    } else {
        let sin_alpha = UnitNegRange(if -x < 1.0 { -x } else { 1.0 });
        Angle::new(sin_alpha, cosine_from_sine(sin_alpha, -1.0))
    }
}

/// Calculate the cosine of the longitude difference from the equator crossing.
/// * `beta` the parametric latitude
/// * `cos_azimuth` the cosine of the azimuth at the parametric latitude
///
/// returns the cosine of the longitude difference, one if the parametric
/// latitude is close to the equator.
#[must_use]
fn calculate_cos_omega(beta: Angle, cos_azimuth: UnitNegRange) -> UnitNegRange {
    if is_small(libm::fabs(beta.sin().0), f64::EPSILON) {
        UnitNegRange(1.0)
    } else {
        UnitNegRange(cos_azimuth.0 * beta.cos().0)
    }
}

/// Calculate the azimuth on the auxiliary sphere at latitude beta2 given the
/// latitude beta1 and the azimuth at that latitude, alpha1.
/// * `beta1`, `beta2` - the parametric latitudes of the start and finish points
///   on the auxiliary sphere.
/// * `alpha1` - start point azimuth.
///
/// returns the finish point azimuth.
#[must_use]
fn calculate_end_azimuth(beta1: Angle, beta2: Angle, alpha1: Angle) -> Angle {
    let clairaut = UnitNegRange(alpha1.sin().0 * beta1.cos().0);

    let sin_alpha2 = if beta2.cos() == beta1.cos() {
        alpha1.sin()
    } else {
        UnitNegRange::clamp(clairaut.0 / beta2.cos().0)
    };

    // Karney's method to calculate the cosine of the end azimuth
    let cos_alpha2 =
        if (beta2.cos() != beta1.cos()) || (libm::fabs(beta2.sin().0) != -beta1.sin().0) {
            let temp1 = alpha1.cos().0 * beta1.cos().0;
            let temp2 = if beta1.cos().0 < libm::fabs(beta1.sin().0) {
                (beta2.cos().0 - beta1.cos().0) * (beta1.cos().0 + beta2.cos().0)
            } else {
                (beta1.sin().0 - beta2.sin().0) * (beta1.sin().0 + beta2.sin().0)
            };
            let temp3 = temp1 * temp1 + temp2;
            let temp4 = if 0.0 < temp3 {
                libm::sqrt(temp3) / beta2.cos().0
            } else {
                0.0
            };
            UnitNegRange::clamp(temp4)
        } else {
            UnitNegRange(libm::fabs(alpha1.cos().0))
        };

    Angle::new(sin_alpha2, cos_alpha2)
}

/// Calculate the longitude difference between the auxiliary sphere and
/// ellipsoid.
#[allow(clippy::similar_names)]
#[must_use]
fn delta_omega12(
    clairaut: UnitNegRange,
    eps: f64,
    sigma12: Radians,
    sigma1: Angle,
    sigma2: Angle,
    ellipsoid: &Ellipsoid,
) -> f64 {
    let a3c = ellipsoid.calculate_a3c(clairaut, eps);
    let c3 = ellipsoid.calculate_c3y(eps);
    let b31 = sin_cos_series(&c3, sigma1);
    let b32 = sin_cos_series(&c3, sigma2);

    a3c * (sigma12 + (b32 - b31)).0
}

/// Find the azimuth and great circle length on the auxiliary sphere.
/// It uses Newton's method to solve:
///   f(alp1) = lambda12(alp1) - lam12 = 0
/// * `lat_a`, `lat_b` - the geodetic latitudes of the start and finish points.
/// * `lambda12` - Longitude difference between start and finish points.
///
/// returns the azimuth and great circle length on the auxiliary sphere at the
/// start of the geodesic.
///
/// # Errors
///
/// `Convergence` if the longitude residual is larger than
/// `CONVERGENCE_TOLERANCE` after `MAX_ITERATIONS`.
#[allow(clippy::similar_names)]
fn find_azimuth_and_aux_length(
    lat_a: Angle,
    lat_b: Angle,
    lambda12: Angle,
    gc_length: Radians,
    ellipsoid: &Ellipsoid,
) -> Result<(Angle, Radians)> {
    let antipodal_arc_threshold: f64 = PI * ellipsoid.one_minus_f();

    // Start at the latitude furthest from the Equator
    let swap_latitudes = libm::fabs(lat_a.sin().0) < libm::fabs(lat_b.sin().0);
    let mut lat1 = if swap_latitudes { lat_b } else { lat_a };
    let mut lat2 = if swap_latitudes { lat_a } else { lat_b };

    // Start South of the Equator
    let negate_latitude = 0.0 < lat1.sin().0;
    if negate_latitude {
        lat1 = -lat1;
        lat2 = -lat2;
    }

    let beta1 = ellipsoid.calculate_parametric_latitude(lat1);
    let beta2 = ellipsoid.calculate_parametric_latitude(lat2);

    let dn1 = libm::sqrt(1.0 + ellipsoid.ep_2() * beta1.sin().0 * beta1.sin().0);
    let dn2 = libm::sqrt(1.0 + ellipsoid.ep_2() * beta2.sin().0 * beta2.sin().0);

    // Use positive lambda12, so all azimuths are positive
    let abs_lambda12 = lambda12.abs();

    let mut alpha1 = if antipodal_arc_threshold < gc_length.0 {
        estimate_antipodal_initial_azimuth(beta1, beta2, abs_lambda12, ellipsoid)
    } else {
        great_circle::calculate_gc_azimuth(lat1, lat2, abs_lambda12)
    };
    let mut alpha2 = alpha1;

    let mut sigma12_rad = gc_length;
    let mut residual = f64::INFINITY;
    let mut iterations = 0;

    while iterations < MAX_ITERATIONS {
        iterations += 1;

        let clairaut = UnitNegRange(alpha1.sin().0 * beta1.cos().0);
        let eps = ellipsoid.calculate_epsilon(clairaut);

        // Longitude (omega1) and distance (sigma1) from the Northbound
        // equator crossing
        let sin_omega1 = UnitNegRange(clairaut.0 * beta1.sin().0);
        let cos_omega1 = calculate_cos_omega(beta1, alpha1.cos());
        let omega1 = Angle::from_y_x(sin_omega1.0, cos_omega1.0);
        let sigma1 = Angle::from_y_x(beta1.sin().0, cos_omega1.0);

        alpha2 = calculate_end_azimuth(beta1, beta2, alpha1);

        let sin_omega2 = UnitNegRange(clairaut.0 * beta2.sin().0);
        let cos_omega2 = calculate_cos_omega(beta2, alpha2.cos());
        let omega2 = Angle::from_y_x(sin_omega2.0, cos_omega2.0);
        let sigma2 = Angle::from_y_x(beta2.sin().0, cos_omega2.0);

        // clamp to range 0 to Pi
        let mut omega12 = omega2 - omega1;
        if omega12.sin() < UnitNegRange(0.0) {
            omega12 = Angle::from_y_x(0.0, omega12.cos().0);
        }
        let mut sigma12 = sigma2 - sigma1;
        if sigma12.sin() < UnitNegRange(0.0) {
            sigma12 = Angle::from_y_x(0.0, sigma12.cos().0);
        }

        // Difference between geodesic and great circle longitudes
        let eta = Radians::from(omega12 - abs_lambda12);

        sigma12_rad = Radians::from(sigma12);
        let domg12 = delta_omega12(clairaut, eps, sigma12_rad, sigma1, sigma2, ellipsoid);

        let v = eta.0 - domg12;
        residual = libm::fabs(v);
        tracing::trace!(iteration = iterations, residual, "bessel inverse");
        if is_small(residual, MAX_PRECISION.0) {
            break;
        }

        // Newton's method denominator
        let dv = if is_small(libm::fabs(alpha2.cos().0), f64::EPSILON) {
            -2.0 * ellipsoid.one_minus_f() * dn1 / beta1.sin().0
        } else {
            let m12 = calculate_reduced_length(eps, sigma12_rad, sigma1, dn1, sigma2, dn2);
            ellipsoid.one_minus_f() * m12 / (alpha2.cos().0 * beta2.cos().0)
        };
        if is_small(libm::fabs(dv), MAX_PRECISION.0) {
            break;
        }

        let dalpha1 = UnitNegRange::clamp(-v / dv);
        if is_small(libm::fabs(dalpha1.0), MAX_PRECISION.0) {
            break;
        }

        alpha1 = alpha1 + Angle::from(Radians(dalpha1.0));
    }

    if CONVERGENCE_TOLERANCE <= residual {
        return Err(GeodesyError::convergence("bessel inverse", iterations));
    }
    tracing::debug!(iterations, residual, "bessel inverse converged");

    if swap_latitudes {
        alpha1 = alpha2;
    }
    if swap_latitudes != negate_latitude {
        alpha1 = alpha1.negate_cos();
    }
    if lambda12.sin().0 < 0.0 {
        alpha1 = -alpha1;
    }

    Ok((alpha1, sigma12_rad))
}

/// Calculate the initial azimuth and great circle length between a pair
/// of points on the auxiliary sphere.
/// * `lat1`, `lat2` - the geodetic latitudes of the start and finish points.
/// * `delta_long` - the geodetic longitude difference.
/// * `ellipsoid` - the `Ellipsoid`.
///
/// returns the azimuth and great circle length on the auxiliary sphere at the
/// start of the geodesic.
///
/// # Errors
///
/// `Convergence` if the Newton iteration does not converge.
pub fn aux_sphere_azimuth_length(
    lat1: Angle,
    lat2: Angle,
    delta_long: Angle,
    ellipsoid: &Ellipsoid,
) -> Result<(Angle, Radians)> {
    const MAX_LENGTH: Radians = Radians(PI - 2.0 * MIN_VALUE.0);

    let gc_azimuth = great_circle::calculate_gc_azimuth(lat1, lat2, delta_long);
    let gc_length = great_circle::calculate_gc_distance(lat1, lat2, delta_long);
    if gc_length.0 <= MIN_VALUE.0 {
        return Ok((gc_azimuth, Radians(0.0)));
    }

    // A meridional path
    let abs_delta_long = Radians::from(delta_long.abs());
    if (abs_delta_long.0 <= MIN_VALUE.0)
        || (MAX_LENGTH <= abs_delta_long)
        || (lat1.cos() <= MIN_VALUE)
        || (lat2.cos() <= MIN_VALUE)
    {
        let meridian_length = if MAX_LENGTH <= gc_length {
            Radians(PI)
        } else {
            let beta1 = ellipsoid.calculate_parametric_latitude(lat1);
            let beta2 = ellipsoid.calculate_parametric_latitude(lat2);
            great_circle::calculate_gc_distance(beta1, beta2, delta_long)
        };
        return Ok((gc_azimuth, meridian_length));
    }

    // An equatorial path, shorter than the path over a pole
    if (lat1.abs().sin() <= MIN_VALUE)
        && (lat2.abs().sin() <= MIN_VALUE)
        && (abs_delta_long.0 <= PI * ellipsoid.one_minus_f())
    {
        let equator_length = Radians(gc_length.0 * ellipsoid.recip_one_minus_f());
        return Ok((gc_azimuth, equator_length));
    }

    find_azimuth_and_aux_length(lat1, lat2, delta_long, gc_length, ellipsoid)
}

/// Convert a great circle distance on the auxiliary sphere in radians to
/// metres on the ellipsoid.
/// * `beta1`, the start parametric Latitude on the auxiliary sphere.
/// * `alpha1`, the azimuth at the start point.
/// * `gc_distance`, the great circle distance on the auxiliary sphere in radians.
/// * `ellipsoid`, the Ellipsoid
///
/// returns the geodesic distance in metres.
#[must_use]
pub fn convert_radians_to_metres(
    beta1: Angle,
    alpha1: Angle,
    gc_distance: Radians,
    ellipsoid: &Ellipsoid,
) -> Metres {
    let cos_omega1 = calculate_cos_omega(beta1, alpha1.cos());
    let sigma1 = Angle::from_y_x(beta1.sin().0, cos_omega1.0);
    let sigma_sum = sigma1 + Angle::from(gc_distance);

    let clairaut = UnitNegRange(alpha1.sin().0 * beta1.cos().0);
    let eps = ellipsoid.calculate_epsilon(clairaut);
    let a1 = evaluate_a1(eps) + 1.0;
    let c1 = evaluate_coeffs_c1(eps);
    let b11 = sin_cos_series(&c1, sigma1);
    let b12 = sin_cos_series(&c1, sigma_sum);

    Metres(ellipsoid.b().0 * a1 * (gc_distance + b12 - b11).0)
}

/// A geodesic on the auxiliary sphere, defined by its start point and
/// azimuth, with the integration constants of the distance and longitude
/// series.
#[derive(Clone, Copy, Debug)]
struct AuxiliaryGeodesic<'a> {
    /// The start point parametric latitude.
    beta: Angle,
    /// The start azimuth.
    azi: Angle,
    /// Azimuth at the Equator.
    azi0: Angle,
    /// Great circle arc distance from the first Equator crossing.
    sigma1: Angle,
    /// Integration constant: epsilon, derived from Clairaut's constant.
    eps: f64,
    /// Converts geodesic/great circle distances.
    a1: f64,
    /// Converts geodesic/great circle longitudes.
    a3c: f64,
    /// Start parameter for geodesic/great circle distance differences.
    b11: Radians,
    ellipsoid: &'a Ellipsoid,
}

impl<'a> AuxiliaryGeodesic<'a> {
    fn new(beta: Angle, azi: Angle, ellipsoid: &'a Ellipsoid) -> Self {
        let clairaut = UnitNegRange(azi.sin().0 * beta.cos().0);
        let azi0 = Angle::new(clairaut, swap_sin_cos(clairaut));
        let sigma1 = Angle::from_y_x(beta.sin().0, beta.cos().0 * azi.cos().0);

        let eps = ellipsoid.calculate_epsilon(azi0.sin());
        let c1 = evaluate_coeffs_c1(eps);
        Self {
            beta,
            azi,
            azi0,
            sigma1,
            eps,
            a1: evaluate_a1(eps) + 1.0,
            a3c: ellipsoid.calculate_a3c(azi0.sin(), eps),
            b11: sin_cos_series(&c1, sigma1),
            ellipsoid,
        }
    }

    /// Convert a distance along the geodesic to an arc length on the
    /// auxiliary sphere.
    fn metres_to_radians(&self, distance: Metres) -> Radians {
        if libm::fabs(distance.0) < great_circle::MIN_VALUE {
            Radians(0.0)
        } else {
            let tau12 = Radians(distance.0 / (self.ellipsoid.b().0 * self.a1));
            let tau_sum = Angle::from(self.b11 + tau12);
            let c1p = evaluate_coeffs_c1p(self.eps);
            let b12 = sin_cos_series(&c1p, self.sigma1 + tau_sum);

            tau12 + b12 + self.b11
        }
    }

    /// The geodetic latitude at arc length `sigma`.
    fn arc_latitude(&self, sigma: Angle) -> Angle {
        let sigma_sum = self.sigma1 + sigma;
        let sin_beta = self.azi0.cos().0 * sigma_sum.sin().0;
        let cos_beta = libm::hypot(self.azi0.sin().0, self.azi0.cos().0 * sigma_sum.cos().0);
        self.ellipsoid
            .calculate_geodetic_latitude(Angle::from_y_x(sin_beta, cos_beta))
    }

    /// The azimuth at arc length `sigma`.
    fn arc_azimuth(&self, sigma: Angle) -> Angle {
        let sigma_sum = self.sigma1 + sigma;
        Angle::from_y_x(self.azi0.sin().0, self.azi0.cos().0 * sigma_sum.cos().0)
    }

    /// The longitude difference from the start point at arc length
    /// `arc_distance`.
    fn delta_longitude(&self, arc_distance: Radians, sigma: Angle) -> Angle {
        if arc_distance.abs().0 < great_circle::MIN_VALUE {
            Angle::default()
        } else {
            let sigma_sum = self.sigma1 + sigma;

            // The longitude difference on the auxiliary sphere, omega12.
            let omega12 = Angle::from_y_x(self.azi0.sin().0 * sigma_sum.sin().0, sigma_sum.cos().0)
                - Angle::from_y_x(
                    self.azi0.sin().0 * self.beta.sin().0,
                    self.beta.cos().0 * self.azi.cos().0,
                );

            let c3 = self.ellipsoid.calculate_c3y(self.eps);
            let b31 = sin_cos_series(&c3, self.sigma1);
            let b32 = sin_cos_series(&c3, sigma_sum);

            omega12 - Angle::from(Radians(self.a3c * (arc_distance.0 + (b32.0 - b31.0))))
        }
    }
}

/// Solve the direct geodesic problem on the auxiliary sphere.
/// @pre `distance` is finite and not negative.
/// * `start` - the start point.
/// * `distance` - the length of the geodesic.
/// * `azimuth` - the azimuth at the start point.
///
/// returns the end point and the reverse azimuth at the end point.
#[must_use]
pub fn direct<'a>(start: &GeoPoint<'a>, distance: Metres, azimuth: Azimuth) -> DirectSolution<'a> {
    let ellipsoid = start.ellipsoid();
    let lat = start.lat().to_angle();
    let mut lon = start.lon();
    let mut azi = azimuth.to_angle();

    // At a pole travel along the meridian that the azimuth selects.
    let from_pole = is_at_pole(start.lat());
    if from_pole {
        lon = meridian_from_pole(start.lat(), lon, azimuth);
        azi = if 0.0 < lat.sin().0 {
            Angle::from(Radians(PI))
        } else {
            Angle::default()
        };
    }

    let geodesic = AuxiliaryGeodesic::new(ellipsoid.calculate_parametric_latitude(lat), azi, ellipsoid);
    let arc_distance = geodesic.metres_to_radians(distance);
    let sigma = Angle::from(arc_distance);

    let lat2 = geodesic.arc_latitude(sigma);
    let delta_long = if from_pole {
        // The meridian flips each time the geodesic passes a pole.
        if PI < libm::fmod(arc_distance.0, 2.0 * PI) {
            Angle::from(Radians(PI))
        } else {
            Angle::default()
        }
    } else {
        geodesic.delta_longitude(arc_distance, sigma)
    };
    let lon2 = lon.to_angle() + delta_long;
    let azi2 = geodesic.arc_azimuth(sigma);
    tracing::trace!(arc_distance = arc_distance.0, from_pole, "bessel direct");

    DirectSolution {
        end: GeoPoint::new(Latitude::from(lat2), Longitude::from(lon2), ellipsoid),
        reverse_azimuth: Azimuth::from(azi2).reverse(),
    }
}

/// Solve the inverse geodesic problem on the auxiliary sphere.
/// @pre `start` and `end` are on the same `Ellipsoid`.
/// * `start`, `end` - the start and end points.
///
/// returns the length of the geodesic, the azimuth at the start point and
/// the reverse azimuth at the end point.
///
/// # Errors
///
/// `Convergence` if the Newton iteration does not converge.
pub fn inverse(start: &GeoPoint, end: &GeoPoint) -> Result<InverseSolution> {
    let ellipsoid = start.ellipsoid();
    let lat1 = start.lat().to_angle();
    let delta_long = (end.lon() - start.lon()).to_angle();
    let (alpha1, sigma12) =
        aux_sphere_azimuth_length(lat1, end.lat().to_angle(), delta_long, ellipsoid)?;
    if sigma12.0 == 0.0 {
        return Ok(InverseSolution::coincident());
    }

    let delta_long = Radians::from(delta_long).0;
    let alpha1 = if is_at_pole(start.lat()) {
        azimuth_from_pole(start.lat(), delta_long).to_angle()
    } else {
        alpha1
    };

    let beta1 = ellipsoid.calculate_parametric_latitude(lat1);
    let distance = convert_radians_to_metres(beta1, alpha1, sigma12, ellipsoid);
    let reverse_azimuth = if is_at_pole(end.lat()) {
        azimuth_from_pole(end.lat(), -delta_long)
    } else {
        let alpha2 =
            AuxiliaryGeodesic::new(beta1, alpha1, ellipsoid).arc_azimuth(Angle::from(sigma12));
        Azimuth::from(alpha2).reverse()
    };

    Ok(InverseSolution {
        distance,
        azimuth: Azimuth::from(alpha1),
        reverse_azimuth,
    })
}
