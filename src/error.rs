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

//! The error module contains the `GeodesyError` type returned by the
//! fallible calculations in this library.
//!
//! | Variant | Raised by |
//! |---------|-----------|
//! | [`InvalidParameter`](GeodesyError::InvalidParameter) | malformed ellipsoids, out of range latitudes, mismatched ellipsoids, invalid projection or datum parameters |
//! | [`Convergence`](GeodesyError::Convergence) | an iterative solver reached its iteration bound |
//! | [`Domain`](GeodesyError::Domain) | a projection input outside the valid zone of the series |
//!
//! Errors are returned at the point of detection and are never retried
//! internally.

use thiserror::Error;

/// The result type of the fallible functions in this library.
pub type Result<T> = core::result::Result<T, GeodesyError>;

/// The errors returned by geodesy calculations.
#[derive(Error, Clone, Debug, PartialEq)]
pub enum GeodesyError {
    /// A parameter is malformed or outside its valid range.
    #[error("invalid parameter `{name}`: {message}")]
    InvalidParameter {
        /// The name of the parameter.
        name: &'static str,
        /// Why the parameter is invalid.
        message: String,
    },

    /// An iterative calculation did not converge within its iteration bound.
    #[error("{operation} did not converge after {iterations} iterations")]
    Convergence {
        /// The name of the calculation.
        operation: &'static str,
        /// The number of iterations performed.
        iterations: u32,
    },

    /// An input value lies outside the valid domain of a calculation.
    #[error("{operation} input outside its valid domain: {message}")]
    Domain {
        /// The name of the calculation.
        operation: &'static str,
        /// A description of the offending input.
        message: String,
    },
}

impl GeodesyError {
    /// Construct an `InvalidParameter` error.
    /// * `name` - the parameter name.
    /// * `message` - why the parameter is invalid.
    #[must_use]
    pub fn invalid_parameter(name: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            message: message.into(),
        }
    }

    /// Construct a `Convergence` error and log it.
    /// * `operation` - the name of the iterative calculation.
    /// * `iterations` - the number of iterations performed.
    #[must_use]
    pub fn convergence(operation: &'static str, iterations: u32) -> Self {
        tracing::warn!(operation, iterations, "iteration bound reached");
        Self::Convergence {
            operation,
            iterations,
        }
    }

    /// Construct a `Domain` error and log it.
    /// * `operation` - the name of the calculation.
    /// * `message` - a description of the offending input.
    #[must_use]
    pub fn domain(operation: &'static str, message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::warn!(operation, %message, "input outside valid domain");
        Self::Domain { operation, message }
    }

    /// Whether the error is a `Convergence` error, i.e. whether a caller
    /// may retry the calculation with a different solver.
    #[must_use]
    pub const fn is_convergence(&self) -> bool {
        matches!(self, Self::Convergence { .. })
    }
}

/// Check that a value is finite.
/// * `name` - the parameter name.
/// * `value` - the value to check.
///
/// # Errors
///
/// `InvalidParameter` if `value` is NaN or infinite.
pub fn ensure_finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(GeodesyError::invalid_parameter(
            name,
            format!("{value} is not a finite number"),
        ))
    }
}
