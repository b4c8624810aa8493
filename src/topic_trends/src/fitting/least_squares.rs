//! # Weighted Least Squares
//!
//! Levenberg-Marquardt minimization of (optionally weighted) squared
//! residuals between observed data and a model function.
//
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

use nalgebra::{DMatrix, DVector};

use super::{CHI_SQUARE_UNAVAILABLE, FitResult};
use crate::errors::{Error, TrendResult};

/// Relative finite difference step for the Jacobian estimate.
const REL_STEP: f64 = 1e-4;

/// Maximum number of outer Levenberg-Marquardt iterations.
const MAX_ITER: usize = 100;

/// Initial damping factor.
const LAMBDA_INIT: f64 = 1e-3;

/// Damping is increased by this factor on a rejected step.
const LAMBDA_UP: f64 = 10.0;

/// Damping is decreased by this factor on an accepted step.
const LAMBDA_DOWN: f64 = 0.1;

/// Damping bounds, a step rejected at the upper bound ends the search.
const LAMBDA_MIN: f64 = 1e-12;
const LAMBDA_MAX: f64 = 1e10;

/// Floor applied to the damped diagonal, keeps the normal equations solvable
/// when a parameter has no local effect on the residuals.
const DIAG_FLOOR: f64 = 1e-12;

/// Relative cost improvement below which the fit is considered converged.
const FTOL: f64 = 1e-12;

/// Relative step size below which the fit is considered converged.
const XTOL: f64 = 1e-10;

/// Gradient norm below which the fit is considered converged.
const GTOL: f64 = 1e-8;

/// Fit model parameters to observed data with iterative least squares.
///
/// Minimizes the sum of squared residuals starting from `initial_params`,
/// whose length fixes the parameter count. When `y_err` is non-empty the
/// residual at each point is divided by the matching standard deviation,
/// weighting the fit; an empty `y_err` fits unweighted.
///
/// The model function may come from the catalog ([`crate::models::get_model`])
/// or be any deterministic, side effect free closure mapping a parameter
/// vector and the independent values to modeled values of equal length.
///
/// Along with the fitted parameters, the result carries a one standard
/// deviation uncertainty per parameter, derived from the residual covariance
/// scaled by the reduced chi squared (this absorbs an unknown absolute error
/// scale when the point errors are not independently calibrated), and the
/// reduced chi squared itself. When the degrees of freedom are not positive
/// or the covariance at the optimum is singular, the uncertainties are all
/// 0.0 and the reduced chi squared is [`CHI_SQUARE_UNAVAILABLE`].
///
/// ```
///     use topic_trends::fitting::fit;
///     use topic_trends::models::get_model;
///
///     let line = get_model("line").unwrap();
///     let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
///     let ys = [2.0, 4.0, 6.0, 8.0, 10.0];
///
///     let result = fit(line.initial_params, &xs, &ys, line.func, &[]).unwrap();
///     assert!(result.params[0].abs() < 1e-6);
///     assert!((result.params[1] - 2.0).abs() < 1e-6);
///     assert!(result.reduced_chi_square.abs() < 1e-9);
///     assert!(result.converged);
/// ```
///
/// # Errors
/// * [`Error::EmptyInput`] - `xs`, `ys` or `initial_params` is empty.
/// * [`Error::DimensionMismatch`] - `xs` and `ys` have different lengths, a
///   non-empty `y_err` does not match `ys`, or the model function breaks the
///   equal length contract.
///
/// Numerical non-convergence is not an error, it is reported through
/// [`FitResult::converged`].
pub fn fit<F>(
    initial_params: &[f64],
    xs: &[f64],
    ys: &[f64],
    model_func: F,
    y_err: &[f64],
) -> TrendResult<FitResult>
where
    F: Fn(&[f64], &[f64]) -> Vec<f64>,
{
    if initial_params.is_empty() || xs.is_empty() || ys.is_empty() {
        Err(Error::EmptyInput)?;
    }
    if xs.len() != ys.len() {
        Err(Error::DimensionMismatch {
            expected: xs.len(),
            found: ys.len(),
        })?;
    }
    if !y_err.is_empty() && y_err.len() != ys.len() {
        Err(Error::DimensionMismatch {
            expected: ys.len(),
            found: y_err.len(),
        })?;
    }

    let n = xs.len();
    let k = initial_params.len();
    let weighted = !y_err.is_empty();

    // The weighting rule is selected once per call and used for both the
    // residuals and the reduced chi squared.
    let residuals = |p: &[f64]| -> TrendResult<DVector<f64>> {
        let modeled = model_func(p, xs);
        if modeled.len() != n {
            Err(Error::DimensionMismatch {
                expected: n,
                found: modeled.len(),
            })?;
        }
        let mut resid = DVector::zeros(n);
        for i in 0..n {
            let diff = ys[i] - modeled[i];
            resid[i] = if weighted { diff / y_err[i] } else { diff };
        }
        Ok(resid)
    };

    // Forward finite difference Jacobian of the residual vector.
    let jacobian = |p: &DVector<f64>, resid: &DVector<f64>| -> TrendResult<DMatrix<f64>> {
        let mut jac = DMatrix::zeros(n, k);
        let mut stepped = p.clone();
        for j in 0..k {
            let h = REL_STEP * p[j].abs().max(1.0);
            stepped[j] = p[j] + h;
            let resid_stepped = residuals(stepped.as_slice())?;
            for i in 0..n {
                jac[(i, j)] = (resid_stepped[i] - resid[i]) / h;
            }
            stepped[j] = p[j];
        }
        Ok(jac)
    };

    let mut params = DVector::from_column_slice(initial_params);
    let mut resid = residuals(params.as_slice())?;
    let mut cost = resid.norm_squared();
    let mut lambda = LAMBDA_INIT;
    let mut converged = false;

    for _ in 0..MAX_ITER {
        let jac = jacobian(&params, &resid)?;
        let grad = jac.transpose() * &resid;
        if grad.norm() < GTOL * (1.0 + cost) {
            converged = true;
            break;
        }
        let jtj = jac.transpose() * &jac;

        // Inner damping search: retry with stronger damping until a step
        // reduces the cost or the damping range is exhausted.
        let mut improved = false;
        while lambda <= LAMBDA_MAX {
            let mut damped = jtj.clone();
            for d in 0..k {
                damped[(d, d)] += lambda * jtj[(d, d)].max(DIAG_FLOOR);
            }
            let Some(step) = damped.lu().solve(&(-&grad)) else {
                lambda *= LAMBDA_UP;
                continue;
            };
            let trial = &params + &step;
            let trial_resid = residuals(trial.as_slice())?;
            let trial_cost = trial_resid.norm_squared();

            if trial_cost.is_finite() && trial_cost < cost {
                let improvement = cost - trial_cost;
                let small_step = step.norm() <= XTOL * (1.0 + params.norm());
                params = trial;
                resid = trial_resid;
                cost = trial_cost;
                lambda = (lambda * LAMBDA_DOWN).max(LAMBDA_MIN);
                improved = true;
                if improvement <= FTOL * (cost + FTOL) || small_step {
                    converged = true;
                }
                break;
            }
            lambda *= LAMBDA_UP;
        }

        if !improved {
            // No downhill step exists within the damping range, the current
            // point is the best the minimizer can report.
            converged = grad.norm() < GTOL * (1.0 + cost);
            break;
        }
        if converged {
            break;
        }
    }

    // Covariance and goodness of fit, best effort. With non-positive degrees
    // of freedom or a singular covariance the sentinel values are reported
    // instead of failing, so one bad fit cannot abort a batch of fits.
    let mut errors = vec![0.0; k];
    let mut redchisq = CHI_SQUARE_UNAVAILABLE;
    if n > k {
        let jac = jacobian(&params, &resid)?;
        let jtj = jac.transpose() * &jac;
        if let Some(mut cov) = jtj.try_inverse() {
            redchisq = resid.norm_squared() / (n - k) as f64;
            cov *= redchisq;
            for (i, error) in errors.iter_mut().enumerate() {
                let var = cov[(i, i)];
                if var.is_finite() {
                    *error = var.abs().sqrt();
                }
            }
        }
    }

    Ok(FitResult {
        params: params.as_slice().to_vec(),
        errors,
        reduced_chi_square: redchisq,
        converged,
    })
}
