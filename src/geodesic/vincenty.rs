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

//! The vincenty module contains Vincenty's iterative solutions of the
//! geodesic problems, see
//! [Vincenty(1975)](https://www.ngs.noaa.gov/PUBS_LIB/inverse.pdf).
//!
//! The inverse iteration fails to converge for nearly antipodal points,
//! so points within the antipodal astroid are rejected with a `Convergence`
//! error before iterating; [`bessel`](super::bessel) solves them.

use super::{azimuth_from_pole, bessel, is_at_pole, DirectSolution, InverseSolution};
use crate::{Azimuth, Ellipsoid, GeoPoint, GeodesyError, Latitude, Longitude, Metres, Result};
use core::f64::consts::PI;

/// The maximum number of iterations.
pub const MAX_ITERATIONS: u32 = 100;

/// The convergence tolerance of the iterations, in radians.
pub const TOLERANCE: f64 = 1e-12;

/// Vincenty's A and B series in u².
fn series_a_b(cos_sq_alpha: f64, ellipsoid: &Ellipsoid) -> (f64, f64) {
    let u_sq = cos_sq_alpha * ellipsoid.ep_2();
    let a = 1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
    let b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
    (a, b)
}

/// The difference between the arc length on the auxiliary sphere and the
/// scaled geodesic length.
fn delta_sigma(b: f64, sin_sigma: f64, cos_sigma: f64, cos_2sigma_m: f64) -> f64 {
    let cos_sq_2sigma_m = cos_2sigma_m * cos_2sigma_m;
    b * sin_sigma
        * (cos_2sigma_m
            + b / 4.0
                * (cos_sigma * (-1.0 + 2.0 * cos_sq_2sigma_m)
                    - b / 6.0
                        * cos_2sigma_m
                        * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                        * (-3.0 + 4.0 * cos_sq_2sigma_m)))
}

/// The longitude difference between the auxiliary sphere and the ellipsoid.
fn delta_lambda(
    f: f64,
    sin_alpha: f64,
    cos_sq_alpha: f64,
    sigma: f64,
    sin_sigma: f64,
    cos_sigma: f64,
    cos_2sigma_m: f64,
) -> f64 {
    let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
    (1.0 - c)
        * f
        * sin_alpha
        * (sigma
            + c * sin_sigma
                * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)))
}

/// Solve the direct geodesic problem with Vincenty's iteration.
/// @pre `distance` is finite and not negative.
/// * `start` - the start point.
/// * `distance` - the length of the geodesic.
/// * `azimuth` - the azimuth at the start point.
///
/// returns the end point and the reverse azimuth at the end point.
///
/// # Errors
///
/// `Convergence` if the arc length does not converge within
/// `MAX_ITERATIONS`.
#[allow(clippy::similar_names)]
pub fn direct<'a>(
    start: &GeoPoint<'a>,
    distance: Metres,
    azimuth: Azimuth,
) -> Result<DirectSolution<'a>> {
    let ellipsoid = start.ellipsoid();
    let f = ellipsoid.f();
    let (sin_alpha1, cos_alpha1) = libm::sincos(azimuth.radians());

    let beta1 = ellipsoid.calculate_parametric_latitude(start.lat().to_angle());
    let (sin_u1, cos_u1) = (beta1.sin().0, beta1.cos().0);
    let sigma1 = libm::atan2(sin_u1, cos_u1 * cos_alpha1);
    let sin_alpha = cos_u1 * sin_alpha1;
    let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
    let (a, b) = series_a_b(cos_sq_alpha, ellipsoid);

    let sigma0 = distance.0 / (ellipsoid.b().0 * a);
    let mut sigma = sigma0;
    let mut iterations = 0;
    let (sin_sigma, cos_sigma, cos_2sigma_m) = loop {
        iterations += 1;
        let cos_2sigma_m = libm::cos(2.0 * sigma1 + sigma);
        let (sin_sigma, cos_sigma) = libm::sincos(sigma);
        let next = sigma0 + delta_sigma(b, sin_sigma, cos_sigma, cos_2sigma_m);
        let change = libm::fabs(next - sigma);
        sigma = next;
        tracing::trace!(iteration = iterations, change, "vincenty direct");
        if change < TOLERANCE {
            tracing::debug!(iterations, "vincenty direct converged");
            let (sin_sigma, cos_sigma) = libm::sincos(sigma);
            break (sin_sigma, cos_sigma, libm::cos(2.0 * sigma1 + sigma));
        }
        if MAX_ITERATIONS <= iterations {
            return Err(GeodesyError::convergence("vincenty direct", iterations));
        }
    };

    let temp = sin_u1 * sin_sigma - cos_u1 * cos_sigma * cos_alpha1;
    let lat2 = libm::atan2(
        sin_u1 * cos_sigma + cos_u1 * sin_sigma * cos_alpha1,
        (1.0 - f) * libm::hypot(sin_alpha, temp),
    );
    let lambda = libm::atan2(
        sin_sigma * sin_alpha1,
        cos_u1 * cos_sigma - sin_u1 * sin_sigma * cos_alpha1,
    );
    let delta_lon = lambda
        - delta_lambda(
            f,
            sin_alpha,
            cos_sq_alpha,
            sigma,
            sin_sigma,
            cos_sigma,
            cos_2sigma_m,
        );
    let alpha2 = libm::atan2(sin_alpha, -temp);

    Ok(DirectSolution {
        end: GeoPoint::new(
            Latitude::clamped(lat2),
            Longitude::new(start.lon().radians() + delta_lon),
            ellipsoid,
        ),
        reverse_azimuth: Azimuth::new(alpha2).reverse(),
    })
}

/// Solve the inverse geodesic problem with Vincenty's iteration.
/// @pre `start` and `end` are on the same `Ellipsoid`.
/// * `start`, `end` - the start and end points.
///
/// returns the length of the geodesic, the azimuth at the start point and
/// the reverse azimuth at the end point.
///
/// # Errors
///
/// `Convergence` if the points are nearly antipodal, the longitude on the
/// auxiliary sphere exceeds π or the iteration does not converge within
/// `MAX_ITERATIONS`.
#[allow(clippy::similar_names)]
pub fn inverse(start: &GeoPoint, end: &GeoPoint) -> Result<InverseSolution> {
    let ellipsoid = start.ellipsoid();
    let f = ellipsoid.f();
    let delta_long = end.lon() - start.lon();
    if start.lat() == end.lat() && delta_long.radians() == 0.0 {
        return Ok(InverseSolution::coincident());
    }

    let lat1 = start.lat().to_angle();
    let lat2 = end.lat().to_angle();
    if bessel::is_nearly_antipodal(lat1, lat2, delta_long.to_angle(), ellipsoid) {
        tracing::debug!("vincenty inverse: points within the antipodal astroid");
        return Err(GeodesyError::convergence("vincenty inverse", 0));
    }

    let beta1 = ellipsoid.calculate_parametric_latitude(lat1);
    let beta2 = ellipsoid.calculate_parametric_latitude(lat2);
    let (sin_u1, cos_u1) = (beta1.sin().0, beta1.cos().0);
    let (sin_u2, cos_u2) = (beta2.sin().0, beta2.cos().0);

    let l = delta_long.radians();
    let mut lambda = l;
    let mut iterations = 0;
    let (sin_lambda, cos_lambda, sigma, sin_sigma, cos_sigma, cos_sq_alpha, cos_2sigma_m) = loop {
        iterations += 1;
        let (sin_lambda, cos_lambda) = libm::sincos(lambda);
        let sin_sigma = libm::hypot(
            cos_u2 * sin_lambda,
            cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda,
        );
        let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        if sin_sigma == 0.0 {
            if 0.0 < cos_sigma {
                return Ok(InverseSolution::coincident());
            }
            // exactly antipodal: the azimuth is undefined
            return Err(GeodesyError::convergence("vincenty inverse", iterations));
        }

        let sigma = libm::atan2(sin_sigma, cos_sigma);
        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
        // on the equator cos_sq_alpha is zero
        let cos_2sigma_m = if cos_sq_alpha == 0.0 {
            0.0
        } else {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        };

        let next = l + delta_lambda(
            f,
            sin_alpha,
            cos_sq_alpha,
            sigma,
            sin_sigma,
            cos_sigma,
            cos_2sigma_m,
        );
        if PI < libm::fabs(next) {
            return Err(GeodesyError::convergence("vincenty inverse", iterations));
        }

        let change = libm::fabs(next - lambda);
        lambda = next;
        tracing::trace!(iteration = iterations, change, "vincenty inverse");
        if change < TOLERANCE {
            tracing::debug!(iterations, "vincenty inverse converged");
            let (sin_lambda, cos_lambda) = libm::sincos(lambda);
            break (
                sin_lambda,
                cos_lambda,
                sigma,
                sin_sigma,
                cos_sigma,
                cos_sq_alpha,
                cos_2sigma_m,
            );
        }
        if MAX_ITERATIONS <= iterations {
            return Err(GeodesyError::convergence("vincenty inverse", iterations));
        }
    };

    let (a, b) = series_a_b(cos_sq_alpha, ellipsoid);
    let distance = ellipsoid.b().0 * a * (sigma - delta_sigma(b, sin_sigma, cos_sigma, cos_2sigma_m));

    let alpha1 = libm::atan2(
        cos_u2 * sin_lambda,
        cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda,
    );
    let alpha2 = libm::atan2(
        cos_u1 * sin_lambda,
        -sin_u1 * cos_u2 + cos_u1 * sin_u2 * cos_lambda,
    );

    let azimuth = if is_at_pole(start.lat()) {
        azimuth_from_pole(start.lat(), l)
    } else {
        Azimuth::new(alpha1)
    };
    let reverse_azimuth = if is_at_pole(end.lat()) {
        azimuth_from_pole(end.lat(), -l)
    } else {
        Azimuth::new(alpha2).reverse()
    };

    Ok(InverseSolution {
        distance: Metres(distance),
        azimuth,
        reverse_azimuth,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GRS80_ELLIPSOID, WGS84_ELLIPSOID};
    use angle_sc::is_within_tolerance;

    fn flinders_peak() -> GeoPoint<'static> {
        GeoPoint::new(
            Latitude::from_dms(-37.0, 57.0, 3.720_30).unwrap(),
            Longitude::from_dms(144.0, 25.0, 29.524_40),
            &GRS80_ELLIPSOID,
        )
    }

    fn buninyong() -> GeoPoint<'static> {
        GeoPoint::new(
            Latitude::from_dms(-37.0, 39.0, 10.156_10).unwrap(),
            Longitude::from_dms(143.0, 55.0, 35.383_90),
            &GRS80_ELLIPSOID,
        )
    }

    #[test]
    fn test_inverse_flinders_peak() {
        let result = inverse(&flinders_peak(), &buninyong()).unwrap();
        assert!(is_within_tolerance(54_972.271, result.distance.0, 1e-3));
        assert!(is_within_tolerance(
            crate::angle::dms_to_degrees(306.0, 52.0, 5.37),
            result.azimuth.degrees(),
            1e-5
        ));
        assert!(is_within_tolerance(
            crate::angle::dms_to_degrees(127.0, 10.0, 25.07),
            result.reverse_azimuth.degrees(),
            1e-5
        ));
    }

    #[test]
    fn test_direct_flinders_peak() {
        let azimuth = Azimuth::from_dms(306.0, 52.0, 5.37);
        let result = direct(&flinders_peak(), Metres(54_972.271), azimuth).unwrap();
        let expected = buninyong();
        assert!(is_within_tolerance(
            expected.lat().degrees(),
            result.end.lat().degrees(),
            1e-7
        ));
        assert!(is_within_tolerance(
            expected.lon().degrees(),
            result.end.lon().degrees(),
            1e-7
        ));
        assert!(is_within_tolerance(
            crate::angle::dms_to_degrees(127.0, 10.0, 25.07),
            result.reverse_azimuth.degrees(),
            1e-5
        ));
    }

    #[test]
    fn test_direct_along_equator_and_meridian() {
        let origin = GeoPoint::from_degrees(0.0, 0.0, &WGS84_ELLIPSOID).unwrap();

        let result = direct(&origin, Metres(111_319.49), Azimuth::from_degrees(90.0)).unwrap();
        assert!(is_within_tolerance(0.0, result.end.lat().degrees(), 1e-12));
        assert!(is_within_tolerance(1.0, result.end.lon().degrees(), 1e-7));
        assert!(is_within_tolerance(270.0, result.reverse_azimuth.degrees(), 1e-9));

        let result = direct(&origin, Metres(111_319.49), Azimuth::NORTH).unwrap();
        assert!(is_within_tolerance(1.0, result.end.lat().degrees(), 0.01));
        assert!(is_within_tolerance(0.0, result.end.lon().degrees(), 1e-12));
        assert!(is_within_tolerance(180.0, result.reverse_azimuth.degrees(), 1e-9));
    }

    #[test]
    fn test_inverse_nearly_antipodal() {
        let start = GeoPoint::from_degrees(0.0, 0.0, &WGS84_ELLIPSOID).unwrap();
        let end = GeoPoint::from_degrees(0.5, 180.0, &WGS84_ELLIPSOID).unwrap();
        let result = inverse(&start, &end);
        assert!(result.unwrap_err().is_convergence());
    }

    #[test]
    fn test_inverse_meridian() {
        let start = GeoPoint::from_degrees(0.0, 10.0, &WGS84_ELLIPSOID).unwrap();
        let end = GeoPoint::from_degrees(90.0, 10.0, &WGS84_ELLIPSOID).unwrap();
        let result = inverse(&start, &end).unwrap();
        assert!(is_within_tolerance(
            WGS84_ELLIPSOID.quarter_meridian().0,
            result.distance.0,
            1e-3
        ));
        assert_eq!(0.0, result.azimuth.degrees());
    }
}
