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

//! The haversine module solves the geodesic problems on a sphere with the
//! mean radius of the ellipsoid, `R1 = (2a + b)/3`.
//!
//! The solutions are closed form approximations: distances are within
//! about 0.5% of the ellipsoidal distances.

use super::{azimuth_from_pole, is_at_pole, meridian_from_pole, DirectSolution, InverseSolution};
use crate::{Azimuth, GeoPoint, Latitude, Longitude, Metres};
use core::f64::consts::PI;

/// The haversine function: sin²(θ/2).
#[must_use]
pub fn haversine(theta: f64) -> f64 {
    let s = libm::sin(0.5 * theta);
    s * s
}

/// The initial bearing of the great circle from (lat1, lon1) to
/// (lat2, lon2), in radians.
fn bearing(lat1: f64, lat2: f64, delta_lon: f64) -> f64 {
    let (sin_lat1, cos_lat1) = libm::sincos(lat1);
    let (sin_lat2, cos_lat2) = libm::sincos(lat2);
    let (sin_dlon, cos_dlon) = libm::sincos(delta_lon);
    libm::atan2(
        sin_dlon * cos_lat2,
        cos_lat1 * sin_lat2 - sin_lat1 * cos_lat2 * cos_dlon,
    )
}

/// Solve the direct geodesic problem on the mean radius sphere.
/// @pre `distance` is finite and not negative.
/// * `start` - the start point.
/// * `distance` - the length of the great circle arc.
/// * `azimuth` - the azimuth at the start point.
///
/// returns the end point and the reverse azimuth at the end point.
#[must_use]
pub fn direct<'a>(start: &GeoPoint<'a>, distance: Metres, azimuth: Azimuth) -> DirectSolution<'a> {
    let ellipsoid = start.ellipsoid();
    let delta = distance.0 / ellipsoid.mean_radius().0;
    let (sin_delta, cos_delta) = libm::sincos(delta);
    let (sin_theta, cos_theta) = libm::sincos(azimuth.radians());

    let lat1 = start.lat().radians();
    let (sin_lat1, cos_lat1) = libm::sincos(lat1);
    let sin_lat2 = (sin_lat1 * cos_delta + cos_lat1 * sin_delta * cos_theta).clamp(-1.0, 1.0);
    let lat2 = libm::asin(sin_lat2);

    if is_at_pole(start.lat()) {
        // Along a meridian, flipping to the opposite one past the far pole.
        let lon = meridian_from_pole(start.lat(), start.lon(), azimuth);
        let past_pole = PI < libm::fmod(delta, 2.0 * PI);
        let end_lon = if past_pole { lon + Longitude::new(PI) } else { lon };
        let reverse_azimuth = if (0.0 < lat1) == past_pole {
            Azimuth::new(PI)
        } else {
            Azimuth::NORTH
        };
        return DirectSolution {
            end: GeoPoint::new(Latitude::clamped(lat2), end_lon, ellipsoid),
            reverse_azimuth,
        };
    }

    let delta_lon = libm::atan2(
        sin_theta * sin_delta * cos_lat1,
        cos_delta - sin_lat1 * sin_lat2,
    );

    DirectSolution {
        end: GeoPoint::new(
            Latitude::clamped(lat2),
            Longitude::new(start.lon().radians() + delta_lon),
            ellipsoid,
        ),
        reverse_azimuth: Azimuth::new(bearing(lat2, lat1, -delta_lon)),
    }
}

/// Solve the inverse geodesic problem on the mean radius sphere.
/// @pre `start` and `end` are on the same `Ellipsoid`.
/// * `start`, `end` - the start and end points.
///
/// returns the haversine distance, the initial bearing and the bearing
/// from the end point back to the start point.
#[must_use]
pub fn inverse(start: &GeoPoint, end: &GeoPoint) -> InverseSolution {
    let lat1 = start.lat().radians();
    let lat2 = end.lat().radians();
    let delta_lat = lat2 - lat1;
    let delta_lon = (end.lon() - start.lon()).radians();
    if delta_lat == 0.0 && delta_lon == 0.0 {
        return InverseSolution::coincident();
    }

    let h = haversine(delta_lat) + libm::cos(lat1) * libm::cos(lat2) * haversine(delta_lon);
    let central_angle = 2.0 * libm::asin(libm::sqrt(h).min(1.0));

    let azimuth = if is_at_pole(start.lat()) {
        azimuth_from_pole(start.lat(), delta_lon)
    } else {
        Azimuth::new(bearing(lat1, lat2, delta_lon))
    };
    let reverse_azimuth = if is_at_pole(end.lat()) {
        azimuth_from_pole(end.lat(), -delta_lon)
    } else {
        Azimuth::new(bearing(lat2, lat1, -delta_lon))
    };

    InverseSolution {
        distance: Metres(start.ellipsoid().mean_radius().0 * central_angle),
        azimuth,
        reverse_azimuth,
    }
}
