//! # Goodness of fit
//!
//! Standalone reduced chi squared statistic and the chi squared fit
//! probability.
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

use itertools::izip;
use statrs::distribution::{ChiSquared, ContinuousCDF};

use crate::errors::{Error, TrendResult};

/// Compute the reduced chi squared statistic for an arbitrary model.
///
/// `chisq / nu`, where `nu` is the number of degrees of freedom,
/// `observed.len() - num_params`. If per point standard deviations are
/// supplied the chi squared is the sum of squared differences divided by the
/// standard deviations, otherwise the plain sum of squared differences.
///
/// A reduced chi squared near 1 indicates a good fit given the assumed
/// uncertainties. See <https://en.wikipedia.org/wiki/Goodness_of_fit>.
///
/// ```
///     use topic_trends::fitting::reduced_chi_square;
///     let redchisq = reduced_chi_square(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0], 1, &[]).unwrap();
///     assert_eq!(redchisq, 0.0);
/// ```
///
/// # Errors
/// * [`Error::EmptyInput`] - `observed` is empty.
/// * [`Error::DimensionMismatch`] - `modeled` (or a non-empty `std_devs`)
///   does not match the length of `observed`.
/// * [`Error::DegenerateFit`] - zero or negative degrees of freedom. The
///   division by zero is guarded here rather than producing a non-finite
///   statistic, the fitter maps this case to its sentinel at its own
///   boundary.
pub fn reduced_chi_square(
    observed: &[f64],
    modeled: &[f64],
    num_params: usize,
    std_devs: &[f64],
) -> TrendResult<f64> {
    if observed.is_empty() {
        Err(Error::EmptyInput)?;
    }
    if observed.len() != modeled.len() {
        Err(Error::DimensionMismatch {
            expected: observed.len(),
            found: modeled.len(),
        })?;
    }
    if !std_devs.is_empty() && std_devs.len() != observed.len() {
        Err(Error::DimensionMismatch {
            expected: observed.len(),
            found: std_devs.len(),
        })?;
    }
    if observed.len() <= num_params {
        Err(Error::DegenerateFit {
            points: observed.len(),
            params: num_params,
        })?;
    }

    let chisq: f64 = if std_devs.is_empty() {
        izip!(observed, modeled)
            .map(|(obs, model)| (obs - model).powi(2))
            .sum()
    } else {
        izip!(observed, modeled, std_devs)
            .map(|(obs, model, sd)| ((obs - model) / sd).powi(2))
            .sum()
    };

    let dof = (observed.len() - num_params) as f64;
    Ok(chisq / dof)
}

/// Probability of exceeding the chi squared implied by a reduced chi squared.
///
/// The survival probability of `reduced_chi_square * num_params` under a chi
/// squared distribution with `num_params` degrees of freedom. This is the
/// `fit_probability` figure reported next to batch fits in the downstream
/// reports.
///
/// # Errors
/// * [`Error::EmptyInput`] - `num_params` is zero.
/// * [`Error::DegenerateFit`] - `reduced_chi_square` is negative or non
///   finite, which includes the fitter's not-computable sentinel.
#[allow(
    clippy::missing_panics_doc,
    reason = "By construction this cannot panic."
)]
pub fn fit_probability(num_params: usize, reduced_chi_square: f64) -> TrendResult<f64> {
    if num_params == 0 {
        Err(Error::EmptyInput)?;
    }
    if !reduced_chi_square.is_finite() || reduced_chi_square < 0.0 {
        Err(Error::DegenerateFit {
            points: num_params,
            params: num_params,
        })?;
    }

    let deg = num_params as f64;
    let chisq = reduced_chi_square * deg;

    // freedom is positive by the guard above
    let dist = ChiSquared::new(deg).unwrap();
    Ok((1.0 - dist.cdf(chisq)).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::{fit_probability, reduced_chi_square};
    use crate::errors::Error;
    use crate::fitting::CHI_SQUARE_UNAVAILABLE;

    #[test]
    fn test_perfect_fit() {
        // dof = 2, chisq = 0
        let redchisq = reduced_chi_square(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0], 1, &[]).unwrap();
        assert_eq!(redchisq, 0.0);
    }

    #[test]
    fn test_unweighted() {
        // chisq = 1 + 4 = 5, dof = 2
        let redchisq = reduced_chi_square(&[1.0, 2.0, 4.0], &[2.0, 2.0, 2.0], 1, &[]).unwrap();
        assert!((redchisq - 2.5).abs() < 1e-14);
    }

    #[test]
    fn test_weighted() {
        // chisq = (1/0.5)^2 + 0 + (2/2)^2 = 5, dof = 2
        let redchisq =
            reduced_chi_square(&[1.0, 2.0, 4.0], &[2.0, 2.0, 2.0], 1, &[0.5, 1.0, 2.0]).unwrap();
        assert!((redchisq - 2.5).abs() < 1e-14);
    }

    #[test]
    fn test_zero_dof_guarded() {
        // dof = 0 must report a controlled error, not a non-finite statistic
        let result = reduced_chi_square(&[1.0, 2.0], &[1.0, 3.0], 2, &[]);
        assert!(matches!(
            result,
            Err(Error::DegenerateFit {
                points: 2,
                params: 2
            })
        ));
    }

    #[test]
    fn test_structural_errors() {
        assert!(matches!(
            reduced_chi_square(&[], &[], 1, &[]),
            Err(Error::EmptyInput)
        ));
        assert!(matches!(
            reduced_chi_square(&[1.0, 2.0], &[1.0], 1, &[]),
            Err(Error::DimensionMismatch { .. })
        ));
        assert!(matches!(
            reduced_chi_square(&[1.0, 2.0], &[1.0, 2.0], 1, &[0.1]),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_fit_probability() {
        // redchisq of 0 means chisq of 0, survival probability 1
        assert!((fit_probability(2, 0.0).unwrap() - 1.0).abs() < 1e-12);

        // chi squared of 1 with 1 dof, P ~ 0.3173
        let p = fit_probability(1, 1.0).unwrap();
        assert!((p - 0.3173).abs() < 1e-3);

        // large reduced chi squared gives a vanishing probability
        let p = fit_probability(2, 50.0).unwrap();
        assert!(p < 1e-10);
    }

    #[test]
    fn test_fit_probability_sentinel() {
        let result = fit_probability(2, CHI_SQUARE_UNAVAILABLE);
        assert!(matches!(result, Err(Error::DegenerateFit { .. })));

        assert!(matches!(fit_probability(0, 1.0), Err(Error::EmptyInput)));
    }
}
