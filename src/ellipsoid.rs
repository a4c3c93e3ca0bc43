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

//! The ellipsoid module contains functions for the derived constants of an
//! ellipsoid of revolution given its Semimajor axis and flattening ratio,
//! its radii of curvature and the conversions between geodetic and
//! parametric latitudes.
//!
//! The `catalog` module contains the named reference ellipsoids,
//! the `coefficients` module the series used by the geodesic and
//! meridian arc calculations.

#![allow(clippy::suboptimal_flops)]

pub mod catalog;
pub mod coefficients;
pub mod wgs84;

use crate::Metres;
use angle_sc::{trig, Angle};

/// Calculate the Semiminor axis of an ellipsoid.
/// * `a` - the Semimajor axis of an ellipsoid.
/// * `f` - the flattening ratio.
/// # Examples
/// ```
/// use ellipsoid_geodesy::Metres;
/// use ellipsoid_geodesy::ellipsoid::{calculate_minor_axis, wgs84};
///
/// // The WGS 84 Semiminor axis measured in metres.
/// let b : Metres = Metres(6_356_752.314_245_179);
/// assert_eq!(b, calculate_minor_axis(wgs84::A, wgs84::F));
/// ```
#[must_use]
pub fn calculate_minor_axis(a: Metres, f: f64) -> Metres {
    Metres(a.0 * (1.0 - f))
}

/// Calculate the polar radius of curvature of an ellipsoid: `c = a²/b`.
/// * `a` - the Semimajor axis of an ellipsoid.
/// * `f` - the flattening ratio.
#[must_use]
pub fn calculate_polar_radius(a: Metres, f: f64) -> Metres {
    Metres(a.0 / (1.0 - f))
}

/// Calculate the square of the Eccentricity of an ellipsoid.
/// * `f` - the flattening ratio.
/// # Examples
/// ```
/// use ellipsoid_geodesy::ellipsoid::{calculate_sq_eccentricity, wgs84};
///
/// // The WGS 84 sq_eccentricity.
/// assert_eq!(0.0066943799901413165, calculate_sq_eccentricity(wgs84::F));
/// ```
#[must_use]
pub fn calculate_sq_eccentricity(f: f64) -> f64 {
    f * (2.0 - f)
}

/// Calculate the square of the second Eccentricity of an ellipsoid.
/// * `f` - the flattening ratio.
#[must_use]
pub fn calculate_sq_2nd_eccentricity(f: f64) -> f64 {
    let one_minus_f = 1.0 - f;
    calculate_sq_eccentricity(f) / (one_minus_f * one_minus_f)
}

/// Calculate the third flattening of an ellipsoid.
/// * `f` - the flattening ratio.
#[must_use]
pub fn calculate_3rd_flattening(f: f64) -> f64 {
    f / (2.0 - f)
}

/// Calculate `V²`, the square of the auxiliary function `V = √(1 + e'²cos²φ)`.
/// * `ep_2` - the square of the second Eccentricity of the ellipsoid.
/// * `lat` - the geodetic latitude.
#[must_use]
pub fn calculate_sq_v(ep_2: f64, lat: Angle) -> f64 {
    let cos_lat = lat.cos().0;
    1.0 + ep_2 * cos_lat * cos_lat
}

/// Calculate the radius of curvature in the prime vertical, `N`.
/// * `a` - the Semimajor axis of the ellipsoid.
/// * `e_2` - the square of the Eccentricity of the ellipsoid.
/// * `lat` - the geodetic latitude.
#[must_use]
pub fn calculate_prime_vertical_radius(a: Metres, e_2: f64, lat: Angle) -> Metres {
    let sin_lat = lat.sin().0;
    Metres(a.0 / libm::sqrt(1.0 - e_2 * sin_lat * sin_lat))
}

/// Calculate the radius of curvature in the meridian, `M`.
/// * `a` - the Semimajor axis of the ellipsoid.
/// * `e_2` - the square of the Eccentricity of the ellipsoid.
/// * `lat` - the geodetic latitude.
#[must_use]
pub fn calculate_meridian_radius(a: Metres, e_2: f64, lat: Angle) -> Metres {
    let sin_lat = lat.sin().0;
    let w_2 = 1.0 - e_2 * sin_lat * sin_lat;
    Metres(a.0 * (1.0 - e_2) / (w_2 * libm::sqrt(w_2)))
}

/// Function to calculate `epsilon`, the variable used in series expansions,
/// derived from Clairaut's constant.
///
/// Note: `epsilon` is positive and small.
/// CFF Karney, [Algorithms for geodesics](https://arxiv.org/pdf/1109.4448.pdf)
/// Eqs 9 & 16.
/// * `clairaut` - Clairaut's constant.
/// * `ep_2` - the square of the second Eccentricity of the ellipsoid.
#[must_use]
pub fn calculate_epsilon(clairaut: trig::UnitNegRange, ep_2: f64) -> f64 {
    let sq_cos_alpha0 = (1.0 - clairaut.0) * (1.0 + clairaut.0);
    let k2 = ep_2 * sq_cos_alpha0;
    let sqrt_k2_1 = libm::sqrt(1.0 + k2) + 1.0;
    k2 / (sqrt_k2_1 * sqrt_k2_1)
}

/// Function to convert a `geodetic` Latitude to a `parametric` Latitude on the
/// auxiliary sphere.
/// * `lat` - the `geodetic` Latitude
/// * `one_minus_f` - one minus the flattening ratio.
#[must_use]
pub fn calculate_parametric_latitude(lat: Angle, one_minus_f: f64) -> Angle {
    Angle::from_y_x(one_minus_f * lat.sin().0, lat.cos().0)
}

/// Function to convert a `parametric` Latitude on the auxiliary sphere to a
/// `geodetic` Latitude.
/// * `beta` - the `parametric` Latitude
/// * `one_minus_f` - one minus the flattening ratio.
#[must_use]
pub fn calculate_geodetic_latitude(beta: Angle, one_minus_f: f64) -> Angle {
    Angle::from_y_x(beta.sin().0 / one_minus_f, beta.cos().0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use angle_sc::{is_within_tolerance, Degrees, Radians};

    #[test]
    fn test_calculate_epsilon() {
        let wgs84_ep2 = calculate_sq_2nd_eccentricity(wgs84::F);
        assert_eq!(
            0.0016792203863837047,
            calculate_epsilon(trig::UnitNegRange(0.0), wgs84_ep2)
        );
        assert_eq!(
            0.0012604720416530619,
            calculate_epsilon(trig::UnitNegRange(0.5), wgs84_ep2)
        );
        assert_eq!(0.0, calculate_epsilon(trig::UnitNegRange(1.0), wgs84_ep2));
    }

    #[test]
    fn test_derived_constants() {
        let e_2 = calculate_sq_eccentricity(wgs84::F);
        let ep_2 = calculate_sq_2nd_eccentricity(wgs84::F);
        assert!(is_within_tolerance(ep_2, e_2 / (1.0 - e_2), 1e-18));

        let b = calculate_minor_axis(wgs84::A, wgs84::F);
        let a2 = wgs84::A.0 * wgs84::A.0;
        assert!(is_within_tolerance(e_2, (a2 - b.0 * b.0) / a2, 1e-15));

        let c = calculate_polar_radius(wgs84::A, wgs84::F);
        assert!(is_within_tolerance(a2 / b.0, c.0, 1e-6));
        assert!(is_within_tolerance(6_399_593.625_758, c.0, 1e-6));
    }

    #[test]
    fn test_radii_of_curvature() {
        let e_2 = calculate_sq_eccentricity(wgs84::F);
        let ep_2 = calculate_sq_2nd_eccentricity(wgs84::F);
        let c = calculate_polar_radius(wgs84::A, wgs84::F);

        // At the equator N is the Semimajor axis
        let equator = Angle::default();
        assert_eq!(
            wgs84::A,
            calculate_prime_vertical_radius(wgs84::A, e_2, equator)
        );
        assert!(is_within_tolerance(
            wgs84::A.0 * (1.0 - e_2),
            calculate_meridian_radius(wgs84::A, e_2, equator).0,
            1e-6
        ));

        // At the poles both radii are the polar radius of curvature
        let pole = Angle::from(Degrees(90.0));
        assert!(is_within_tolerance(
            c.0,
            calculate_prime_vertical_radius(wgs84::A, e_2, pole).0,
            1e-6
        ));
        assert!(is_within_tolerance(
            c.0,
            calculate_meridian_radius(wgs84::A, e_2, pole).0,
            1e-6
        ));

        // N = c/V and M = c/V³
        let lat = Angle::from(Degrees(37.5));
        let v_2 = calculate_sq_v(ep_2, lat);
        let v = libm::sqrt(v_2);
        assert!(is_within_tolerance(
            c.0 / v,
            calculate_prime_vertical_radius(wgs84::A, e_2, lat).0,
            1e-6
        ));
        assert!(is_within_tolerance(
            c.0 / (v * v_2),
            calculate_meridian_radius(wgs84::A, e_2, lat).0,
            1e-6
        ));
    }

    #[test]
    fn test_calculate_parametric_and_geodetic_latitude() {
        let one_minus_f = 1.0 - wgs84::F;

        for i in (-90..91).step_by(5) {
            let lat = Angle::from(Degrees(f64::from(i)));
            let beta = calculate_parametric_latitude(lat, one_minus_f);
            assert!(beta.abs().sin().0 <= lat.abs().sin().0);

            let result = calculate_geodetic_latitude(beta, one_minus_f);
            assert!(is_within_tolerance(
                Radians::from(lat).0,
                Radians::from(result).0,
                f64::EPSILON
            ));
        }
    }
}
