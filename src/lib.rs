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

//! ellipsoid-geodesy
//!
//! A library for geodetic calculations on an ellipsoid of revolution:
//!
//! - the `Ellipsoid` model, its derived constants, radii of curvature and
//!   meridian arc length;
//! - conversion between geodetic (latitude, longitude, height) and
//!   geocentric (X, Y, Z) coordinates;
//! - the direct and inverse geodesic problems, solved by four
//!   interchangeable methods: Vincenty, Bessel, Gauss mid-latitude and the
//!   spherical Haversine approximation;
//! - the Gauss-Krüger (transverse Mercator) projection used by UTM and
//!   national grids, together with its zones, point scale factor, meridian
//!   convergence and direction and distance corrections;
//! - seven parameter (Bursa-Wolf) and three parameter (Molodensky) datum
//!   transformations.
//!
//! ## Design
//!
//! All types are immutable values. Points hold a reference to the
//! `Ellipsoid` they are defined on, so an `Ellipsoid` is constructed once and
//! shared, e.g. the static `WGS84_ELLIPSOID`.
//!
//! Latitudes, longitudes and azimuths are the normalized `Latitude`,
//! `Longitude` and `Azimuth` types in radians, distances and heights are
//! `Metres`. Calculations that can fail return a `GeodesyError`.
//!
//! The Bessel geodesic solution uses the correspondence between geodesics
//! on an ellipsoid and great-circle arcs on an auxiliary sphere, see Charles
//! Karney's [GeographicLib](https://geographiclib.sourceforge.io/).
//!
//! The library depends upon the following crates:
//!
//! - [angle-sc](https://crates.io/crates/angle-sc) - to define `Angle`,
//!   `Degrees` and `Radians` and perform trigonometric calculations;
//! - [unit-sphere](https://crates.io/crates/unit-sphere) - to define `LatLong`
//!   and perform great-circle calculations.
//! - [icao_units](https://crates.io/crates/icao-units) - to define `Metres` and
//!   `NauticalMiles` and perform conversions between them.
//! - [thiserror](https://crates.io/crates/thiserror) - to define `GeodesyError`.
//! - [tracing](https://crates.io/crates/tracing) - to report the progress of
//!   the iterative calculations.
//!
//! # Examples
//! ```
//! use ellipsoid_geodesy::*;
//!
//! let istanbul = GeoPoint::from_degrees(42.0, 29.0, &WGS84_ELLIPSOID).unwrap();
//! let washington = GeoPoint::from_degrees(39.0, -77.0, &WGS84_ELLIPSOID).unwrap();
//!
//! let solution = GeodesicSolution::Bessel.inverse(&istanbul, &washington).unwrap();
//! println!("Istanbul-Washington initial azimuth: {:?}", solution.azimuth.degrees());
//! println!("Istanbul-Washington distance: {:?}", NauticalMiles::from(solution.distance));
//! ```

extern crate angle_sc;
extern crate icao_units;
extern crate unit_sphere;

pub mod angle;
pub mod conversion;
pub mod datum;
pub mod ellipsoid;
pub mod error;
pub mod geodesic;
pub mod point;
pub mod projection;

pub use angle::{Azimuth, Latitude, Longitude};
pub use angle_sc::{Angle, Degrees, Radians, Validate};
pub use datum::{MolodenskyParameters, TransParameters};
pub use ellipsoid::catalog::NamedEllipsoid;
pub use error::{GeodesyError, Result};
pub use geodesic::{DirectSolution, Geodesic, GeodesicSolution, InverseSolution};
pub use icao_units::non_si::NauticalMiles;
pub use icao_units::si::Metres;
pub use point::{GeoPoint, GeodeticCoord, LinearUnit, ProjectedCoord, SpaceRectangularCoord};
pub use projection::{ProjectionParameters, TransverseMercator};
pub use unit_sphere::LatLong;

use angle_sc::trig;
use core::f64::consts::FRAC_PI_2;
use ellipsoid::coefficients;
use error::ensure_finite;
use once_cell::sync::Lazy;

/// The parameters of an `Ellipsoid`.
#[derive(Clone, Debug, PartialEq)]
pub struct Ellipsoid {
    /// The Semimajor axis of the ellipsoid.
    a: Metres,
    /// The flattening of the ellipsoid, a ratio.
    f: f64,

    /// The Semiminor axis of the ellipsoid.
    b: Metres,
    /// The polar radius of curvature, a²/b.
    c: Metres,
    /// One minus the flattening ratio.
    one_minus_f: f64,
    /// The reciprocal of one minus the flattening ratio.
    recip_one_minus_f: f64,
    /// The square of the Eccentricity of the ellipsoid.
    e_2: f64,
    /// The square of the second Eccentricity of the ellipsoid.
    ep_2: f64,
    /// The third flattening of the ellipsoid.
    n: f64,

    /// The A3 series `coefficients` of the ellipsoid.
    a3: [f64; 6],
    /// The C3x series `coefficients` of the ellipsoid.
    c3x: [f64; 15],

    /// The radius of the rectifying sphere, a/(1+n) * A0.
    rectifying_radius: Metres,
    /// The meridian arc series `coefficients`, divided by A0.
    meridian_arc: [f64; 5],
    /// The footpoint latitude series `coefficients`.
    rectifying_inverse: [f64; 5],
}

impl Ellipsoid {
    /// The maximum number of iterations of the footpoint latitude calculation.
    pub const MAX_FOOTPOINT_ITERATIONS: u32 = 10;

    /// Construct an `Ellipsoid` from its Semimajor axis and flattening.
    /// * `a` - the Semimajor axis of the `Ellipsoid`.
    /// * `f` - the flattening of the `Ellipsoid`, a ratio.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `a` is not positive, `f` is outside [0, 1)
    /// or either value is not finite.
    pub fn new(a: Metres, f: f64) -> Result<Self> {
        let a_value = ensure_finite("a", a.0)?;
        if a_value <= 0.0 {
            return Err(GeodesyError::invalid_parameter(
                "a",
                format!("Semimajor axis {a_value} must be positive"),
            ));
        }
        let f = ensure_finite("f", f)?;
        if !(0.0..1.0).contains(&f) {
            return Err(GeodesyError::invalid_parameter(
                "f",
                format!("flattening {f} must be in the range [0, 1)"),
            ));
        }
        Ok(Self::from_trusted_parameters(a, f))
    }

    /// Construct an `Ellipsoid` from its Semimajor axis and inverse flattening.
    /// An inverse flattening of zero or infinity defines a sphere.
    /// * `a` - the Semimajor axis of the `Ellipsoid`.
    /// * `inverse_f` - the inverse flattening of the `Ellipsoid`.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `a` is not positive or `inverse_f` is NaN
    /// or in the range (0, 1].
    pub fn from_inverse_flattening(a: Metres, inverse_f: f64) -> Result<Self> {
        if inverse_f.is_nan() {
            return Err(GeodesyError::invalid_parameter(
                "inverse_f",
                "inverse flattening is not a number",
            ));
        }
        if inverse_f == 0.0 || inverse_f.is_infinite() {
            Self::new(a, 0.0)
        } else if inverse_f > 1.0 {
            Self::new(a, 1.0 / inverse_f)
        } else {
            Err(GeodesyError::invalid_parameter(
                "inverse_f",
                format!("inverse flattening {inverse_f} must be greater than one"),
            ))
        }
    }

    /// Construct an `Ellipsoid` from its Semimajor and Semiminor axes.
    /// * `a` - the Semimajor axis of the `Ellipsoid`.
    /// * `b` - the Semiminor axis of the `Ellipsoid`.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if either axis is not positive and finite or
    /// `b` is greater than `a`.
    pub fn from_axes(a: Metres, b: Metres) -> Result<Self> {
        let a_value = ensure_finite("a", a.0)?;
        let b_value = ensure_finite("b", b.0)?;
        if b_value <= 0.0 || a_value < b_value {
            return Err(GeodesyError::invalid_parameter(
                "b",
                format!("Semiminor axis {b_value} must be in the range (0, {a_value}]"),
            ));
        }
        Self::new(a, (a_value - b_value) / a_value)
    }

    /// Construct a sphere.
    /// * `radius` - the radius of the sphere.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `radius` is not positive and finite.
    pub fn sphere(radius: Metres) -> Result<Self> {
        Self::new(radius, 0.0)
    }

    /// Construct an `Ellipsoid` from parameters known to be valid.
    pub(crate) fn from_trusted_parameters(a: Metres, f: f64) -> Self {
        let one_minus_f = 1.0 - f;
        let n = ellipsoid::calculate_3rd_flattening(f);
        let a0 = coefficients::evaluate_meridian_a0(n);
        let mut meridian_arc = coefficients::evaluate_coeffs_meridian_arc(n);
        for coeff in &mut meridian_arc {
            *coeff /= a0;
        }
        Self {
            a,
            f,
            b: ellipsoid::calculate_minor_axis(a, f),
            c: ellipsoid::calculate_polar_radius(a, f),
            one_minus_f,
            recip_one_minus_f: 1.0 / one_minus_f,
            e_2: ellipsoid::calculate_sq_eccentricity(f),
            ep_2: ellipsoid::calculate_sq_2nd_eccentricity(f),
            n,
            a3: coefficients::evaluate_coeffs_a3(n),
            c3x: coefficients::evaluate_coeffs_c3x(n),
            rectifying_radius: Metres(a.0 * a0 / (1.0 + n)),
            meridian_arc,
            rectifying_inverse: coefficients::evaluate_coeffs_rectifying_inverse(n),
        }
    }

    /// Construct an `Ellipsoid` with the WGS-84 parameters.
    #[must_use]
    pub fn wgs84() -> Self {
        Self::from_trusted_parameters(ellipsoid::wgs84::A, ellipsoid::wgs84::F)
    }

    /// Construct an `Ellipsoid` with the GRS 80 parameters.
    #[must_use]
    pub fn grs80() -> Self {
        NamedEllipsoid::Grs80.ellipsoid()
    }

    /// Construct an `Ellipsoid` with the CGCS 2000 parameters.
    #[must_use]
    pub fn cgcs2000() -> Self {
        NamedEllipsoid::Cgcs2000.ellipsoid()
    }

    /// The Semimajor axis of the ellipsoid.
    #[must_use]
    pub const fn a(&self) -> Metres {
        self.a
    }

    /// The flattening of the ellipsoid, a ratio.
    #[must_use]
    pub const fn f(&self) -> f64 {
        self.f
    }

    /// The inverse flattening of the ellipsoid, infinite for a sphere.
    #[must_use]
    pub fn inverse_flattening(&self) -> f64 {
        if self.f == 0.0 {
            f64::INFINITY
        } else {
            1.0 / self.f
        }
    }

    /// The Semiminor axis of the ellipsoid.
    #[must_use]
    pub const fn b(&self) -> Metres {
        self.b
    }

    /// The polar radius of curvature of the ellipsoid, `c = a²/b`.
    #[must_use]
    pub const fn c(&self) -> Metres {
        self.c
    }

    /// One minus the flattening ratio.
    #[must_use]
    pub const fn one_minus_f(&self) -> f64 {
        self.one_minus_f
    }

    /// The reciprocal of one minus the flattening ratio.
    #[must_use]
    pub const fn recip_one_minus_f(&self) -> f64 {
        self.recip_one_minus_f
    }

    /// The square of the Eccentricity of the ellipsoid.
    #[must_use]
    pub const fn e_2(&self) -> f64 {
        self.e_2
    }

    /// The square of the second Eccentricity of the ellipsoid.
    #[must_use]
    pub const fn ep_2(&self) -> f64 {
        self.ep_2
    }

    /// The third flattening of the ellipsoid.
    #[must_use]
    pub const fn n(&self) -> f64 {
        self.n
    }

    /// The A3 series `coefficients` of the ellipsoid.
    #[must_use]
    pub const fn a3(&self) -> [f64; 6] {
        self.a3
    }

    /// The C3x series `coefficients` of the ellipsoid.
    #[must_use]
    pub const fn c3x(&self) -> [f64; 15] {
        self.c3x
    }

    /// Whether `other` is this `Ellipsoid`, i.e. the same instance or an
    /// instance with the same parameters.
    #[must_use]
    pub fn is_same(&self, other: &Self) -> bool {
        core::ptr::eq(self, other) || self == other
    }

    /// Calculate epsilon, the variable used in series expansions.
    /// Note: epsilon is positive and small.
    /// * `clairaut` - Clairaut's constant.
    #[must_use]
    pub fn calculate_epsilon(&self, clairaut: trig::UnitNegRange) -> f64 {
        ellipsoid::calculate_epsilon(clairaut, self.ep_2)
    }

    /// Calculate a3f from the A3 series `coefficients` of the ellipsoid.
    /// * `eps` - epsilon
    #[must_use]
    pub fn calculate_a3f(&self, eps: f64) -> f64 {
        coefficients::evaluate_polynomial(&self.a3, eps)
    }

    /// Calculate a3c from the A3 series `coefficients` of the ellipsoid.
    /// * `clairaut` - Clairaut's constant.
    /// * `eps` - epsilon
    #[must_use]
    pub fn calculate_a3c(&self, clairaut: trig::UnitNegRange, eps: f64) -> f64 {
        self.f * clairaut.0 * self.calculate_a3f(eps)
    }

    /// Calculate the coefficients `C3[l]` in the Fourier expansion of `C3`.
    /// * `eps` - epsilon
    #[must_use]
    pub fn calculate_c3y(&self, eps: f64) -> [f64; 6] {
        coefficients::evaluate_coeffs_c3y(&self.c3x, eps)
    }

    /// Convert a geodetic Latitude to a parametric Latitude on the
    /// auxiliary sphere.
    /// * `lat` - the geodetic Latitude
    #[must_use]
    pub fn calculate_parametric_latitude(&self, lat: Angle) -> Angle {
        ellipsoid::calculate_parametric_latitude(lat, self.one_minus_f)
    }

    /// Convert a parametric Latitude on the auxiliary sphere to a
    /// geodetic Latitude.
    /// * `beta` - the parametric Latitude
    #[must_use]
    pub fn calculate_geodetic_latitude(&self, beta: Angle) -> Angle {
        ellipsoid::calculate_geodetic_latitude(beta, self.one_minus_f)
    }

    /// The radius of curvature in the prime vertical at a latitude, `N`.
    /// * `lat` - the geodetic latitude.
    #[must_use]
    pub fn prime_vertical_radius(&self, lat: Angle) -> Metres {
        ellipsoid::calculate_prime_vertical_radius(self.a, self.e_2, lat)
    }

    /// The radius of curvature in the meridian at a latitude, `M`.
    /// * `lat` - the geodetic latitude.
    #[must_use]
    pub fn meridian_radius(&self, lat: Angle) -> Metres {
        ellipsoid::calculate_meridian_radius(self.a, self.e_2, lat)
    }

    /// The Gaussian mean radius of curvature at a latitude, `√(MN)`.
    /// * `lat` - the geodetic latitude.
    #[must_use]
    pub fn gaussian_mean_radius(&self, lat: Angle) -> Metres {
        Metres(libm::sqrt(
            self.meridian_radius(lat).0 * self.prime_vertical_radius(lat).0,
        ))
    }

    /// The mean radius of the ellipsoid, `R1 = (2a + b)/3`.
    #[must_use]
    pub fn mean_radius(&self) -> Metres {
        Metres((2.0 * self.a.0 + self.b.0) / 3.0)
    }

    /// The radius of the rectifying sphere: the sphere with the same
    /// meridian length as the ellipsoid.
    #[must_use]
    pub const fn rectifying_radius(&self) -> Metres {
        self.rectifying_radius
    }

    /// The length of the meridian arc from the equator to a latitude.
    /// The length is negative South of the equator.
    /// * `lat` - the geodetic latitude.
    #[must_use]
    pub fn meridian_arc_length(&self, lat: Angle) -> Metres {
        let phi = Radians::from(lat);
        let series = coefficients::sin_cos_series(&self.meridian_arc, lat);
        Metres(self.rectifying_radius.0 * (phi + series).0)
    }

    /// The length of a quarter meridian, from the equator to a pole.
    #[must_use]
    pub fn quarter_meridian(&self) -> Metres {
        Metres(self.rectifying_radius.0 * FRAC_PI_2)
    }

    /// Calculate the footpoint latitude: the latitude whose meridian arc
    /// length from the equator is `arc_length`.
    ///
    /// The rectifying latitude series gives the initial estimate, which is
    /// refined by Newton's method.
    /// * `arc_length` - the meridian arc length, negative South of the equator.
    ///
    /// # Errors
    ///
    /// `Domain` if `arc_length` is longer than the quarter meridian,
    /// `Convergence` if the iteration does not converge.
    pub fn footpoint_latitude(&self, arc_length: Metres) -> Result<Angle> {
        const TOLERANCE: f64 = 1e-12;
        let quarter_meridian = self.quarter_meridian().0;
        let arc = arc_length.0;
        if !arc.is_finite() {
            return Err(GeodesyError::convergence("footpoint latitude", 0));
        }
        if quarter_meridian * (1.0 + f64::EPSILON) < libm::fabs(arc) {
            return Err(GeodesyError::domain(
                "footpoint latitude",
                format!("meridian arc {arc} m is beyond the pole"),
            ));
        }

        let mu = Angle::from(Radians(arc / self.rectifying_radius.0));
        let mut phi = Radians::from(mu) + coefficients::sin_cos_series(&self.rectifying_inverse, mu);
        for iteration in 1..=Self::MAX_FOOTPOINT_ITERATIONS {
            let lat = Angle::from(phi);
            let delta = (arc - self.meridian_arc_length(lat).0) / self.meridian_radius(lat).0;
            phi = Radians((phi.0 + delta).clamp(-FRAC_PI_2, FRAC_PI_2));
            tracing::trace!(iteration, delta, "footpoint latitude");
            if libm::fabs(delta) < TOLERANCE {
                tracing::debug!(iterations = iteration, "footpoint latitude converged");
                return Ok(Angle::from(phi));
            }
        }
        Err(GeodesyError::convergence(
            "footpoint latitude",
            Self::MAX_FOOTPOINT_ITERATIONS,
        ))
    }
}

/// A static instance of the WGS-84 `Ellipsoid`.
pub static WGS84_ELLIPSOID: Lazy<Ellipsoid> = Lazy::new(Ellipsoid::wgs84);

/// A static instance of the GRS 80 `Ellipsoid`.
pub static GRS80_ELLIPSOID: Lazy<Ellipsoid> = Lazy::new(Ellipsoid::grs80);

/// A static instance of the CGCS 2000 `Ellipsoid`.
pub static CGCS2000_ELLIPSOID: Lazy<Ellipsoid> = Lazy::new(Ellipsoid::cgcs2000);
