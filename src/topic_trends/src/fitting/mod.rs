//! # Fitting
//!
//! Weighted nonlinear least squares fitting and goodness of fit statistics.
//!
//! This is the numerical core of the crate: a Levenberg-Marquardt minimizer
//! with a finite difference Jacobian ([`fit`]), the reduced chi squared
//! statistic ([`reduced_chi_square`]), and the chi squared fit probability
//! ([`fit_probability`]).
//!
// BSD 3-Clause License
//
// Copyright (c) 2026, Dar Dahlen
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice, this
//    list of conditions and the following disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice,
//    this list of conditions and the following disclaimer in the documentation
//    and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its
//    contributors may be used to endorse or promote products derived from
//    this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
// DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
// FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
// DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
// SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
// CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
// OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

mod goodness;
mod least_squares;

pub use self::goodness::{fit_probability, reduced_chi_square};
pub use self::least_squares::fit;

use serde::{Deserialize, Serialize};

/// Sentinel value reported on [`FitResult::reduced_chi_square`] when the
/// statistic is not computable (zero or negative degrees of freedom, or a
/// singular covariance at the optimum).
pub const CHI_SQUARE_UNAVAILABLE: f64 = -1.0;

/// The outcome of one fit invocation.
///
/// Constructed once per [`fit`] call and never mutated afterwards, the caller
/// decides what to do with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    /// Fitted parameter vector, same length as the initial guess.
    pub params: Vec<f64>,

    /// One standard deviation uncertainty estimate per parameter.
    ///
    /// Uncertainties are best effort, a parameter whose uncertainty cannot be
    /// computed reports 0.0 rather than failing the fit.
    pub errors: Vec<f64>,

    /// Reduced chi squared of the fit, computed with the same weighting rule
    /// as the residuals and scaled into the parameter covariance.
    ///
    /// [`CHI_SQUARE_UNAVAILABLE`] when not computable.
    pub reduced_chi_square: f64,

    /// Whether the minimizer met its convergence tolerances.
    ///
    /// Non-convergence is not an error, the parameters are whatever the
    /// minimizer last produced and callers judge fit quality themselves.
    pub converged: bool,
}
