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

//! The catalog module contains the named reference ellipsoids.
//!
//! The catalogue is an immutable table keyed by `NamedEllipsoid`; the most
//! used ellipsoids are also available as the static `WGS84_ELLIPSOID`,
//! `GRS80_ELLIPSOID` and `CGCS2000_ELLIPSOID` instances.

use super::wgs84;
use crate::{Ellipsoid, GeodesyError, Metres};
use core::fmt;
use core::str::FromStr;

/// The reference ellipsoids known to the library.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NamedEllipsoid {
    /// World Geodetic System 1984.
    Wgs84,
    /// Geodetic Reference System 1980.
    Grs80,
    /// China Geodetic Coordinate System 2000.
    Cgcs2000,
    /// Krassovsky 1940, used by the Pulkovo 1942 and Beijing 1954 datums.
    Krassovsky1940,
    /// International 1924 (Hayford), used by ED50.
    International1924,
    /// Bessel 1841.
    Bessel1841,
    /// Clarke 1866, used by NAD27.
    Clarke1866,
    /// Clarke 1880 (IGN), used by NTF.
    Clarke1880Ign,
}

impl NamedEllipsoid {
    /// All of the named ellipsoids.
    pub const ALL: [Self; 8] = [
        Self::Wgs84,
        Self::Grs80,
        Self::Cgcs2000,
        Self::Krassovsky1940,
        Self::International1924,
        Self::Bessel1841,
        Self::Clarke1866,
        Self::Clarke1880Ign,
    ];

    /// The defining parameters of the ellipsoid:
    /// the Semimajor axis and the inverse flattening.
    #[must_use]
    pub const fn parameters(self) -> (Metres, f64) {
        match self {
            Self::Wgs84 => (wgs84::A, wgs84::INVERSE_F),
            Self::Grs80 | Self::Cgcs2000 => (wgs84::A, 298.257_222_101),
            Self::Krassovsky1940 => (Metres(6_378_245.0), 298.3),
            Self::International1924 => (Metres(6_378_388.0), 297.0),
            Self::Bessel1841 => (Metres(6_377_397.155), 299.152_812_8),
            Self::Clarke1866 => (Metres(6_378_206.4), 294.978_698_2),
            Self::Clarke1880Ign => (Metres(6_378_249.2), 293.466_021_3),
        }
    }

    /// The conventional name of the ellipsoid.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wgs84 => "WGS 84",
            Self::Grs80 => "GRS 1980",
            Self::Cgcs2000 => "CGCS2000",
            Self::Krassovsky1940 => "Krassowsky 1940",
            Self::International1924 => "International 1924",
            Self::Bessel1841 => "Bessel 1841",
            Self::Clarke1866 => "Clarke 1866",
            Self::Clarke1880Ign => "Clarke 1880 (IGN)",
        }
    }

    /// Construct the `Ellipsoid`.
    #[must_use]
    pub fn ellipsoid(self) -> Ellipsoid {
        let (a, inverse_f) = self.parameters();
        Ellipsoid::from_trusted_parameters(a, 1.0 / inverse_f)
    }
}

impl fmt::Display for NamedEllipsoid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NamedEllipsoid {
    type Err = GeodesyError;

    /// Look up a named ellipsoid, ignoring case, spaces, hyphens,
    /// underscores and parentheses, e.g. "WGS 84", "wgs84" or "GRS-80".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_' | '(' | ')'))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "wgs84" => Ok(Self::Wgs84),
            "grs80" | "grs1980" => Ok(Self::Grs80),
            "cgcs2000" => Ok(Self::Cgcs2000),
            "krassovsky1940" | "krassowsky1940" | "krassovsky" | "krassowsky" => {
                Ok(Self::Krassovsky1940)
            }
            "international1924" | "intl1924" | "hayford" => Ok(Self::International1924),
            "bessel1841" | "bessel" => Ok(Self::Bessel1841),
            "clarke1866" => Ok(Self::Clarke1866),
            "clarke1880ign" | "clarke1880" => Ok(Self::Clarke1880Ign),
            _ => Err(GeodesyError::invalid_parameter(
                "ellipsoid",
                format!("unknown ellipsoid name: {s}"),
            )),
        }
    }
}
