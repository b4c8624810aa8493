//! # Correlation
//!
//! Pearson and Spearman correlation tests between two aligned sequences,
//! producing the coefficient and two sided p-value pairs quoted on the
//! scatter plot reports.
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

use std::fmt;

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

use crate::errors::{Error, TrendResult};

/// Minimum number of paired points for a correlation test, the p-value needs
/// at least one degree of freedom.
const MIN_POINTS: usize = 3;

/// Which correlation test to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorrelationMethod {
    /// Linear correlation of the raw values.
    Pearson,

    /// Rank correlation, Pearson over average tie ranks.
    Spearman,
}

/// A correlation coefficient with its two sided p-value.
///
/// Displays in the `r:0.xxx p:0.xxxx` form used as a plot annotation by the
/// downstream reports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Correlation {
    /// Correlation coefficient, in `[-1, 1]`.
    pub coefficient: f64,

    /// Two sided p-value of the null hypothesis of no correlation, from the
    /// Student-t transform of the coefficient.
    pub p_value: f64,
}

impl fmt::Display for Correlation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r:{:5.3} p:{:6.4}", self.coefficient, self.p_value)
    }
}

/// Run the selected correlation test over two aligned sequences.
///
/// ```
///     use topic_trends::correlation::{CorrelationMethod, correlate};
///
///     let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
///     let ys = [2.0, 4.0, 6.0, 8.0, 10.0];
///     let corr = correlate(&xs, &ys, CorrelationMethod::Pearson).unwrap();
///     assert!((corr.coefficient - 1.0).abs() < 1e-12);
///     assert!(corr.p_value < 1e-12);
/// ```
///
/// # Errors
/// * [`Error::DimensionMismatch`] - sequences of unequal lengths.
/// * [`Error::InsufficientData`] - fewer than 3 paired points.
/// * [`Error::ConstantInput`] - either sequence has zero variance.
pub fn correlate(xs: &[f64], ys: &[f64], method: CorrelationMethod) -> TrendResult<Correlation> {
    if xs.len() != ys.len() {
        Err(Error::DimensionMismatch {
            expected: xs.len(),
            found: ys.len(),
        })?;
    }
    if xs.len() < MIN_POINTS {
        Err(Error::InsufficientData {
            required: MIN_POINTS,
            found: xs.len(),
        })?;
    }

    match method {
        CorrelationMethod::Pearson => pearson_test(xs, ys),
        CorrelationMethod::Spearman => pearson_test(&ranks(xs), &ranks(ys)),
    }
}

/// Pearson correlation coefficient and two sided p-value.
///
/// # Errors
/// See [`correlate`].
pub fn pearson(xs: &[f64], ys: &[f64]) -> TrendResult<Correlation> {
    correlate(xs, ys, CorrelationMethod::Pearson)
}

/// Spearman rank correlation coefficient and two sided p-value.
///
/// # Errors
/// See [`correlate`].
pub fn spearman(xs: &[f64], ys: &[f64]) -> TrendResult<Correlation> {
    correlate(xs, ys, CorrelationMethod::Spearman)
}

#[allow(
    clippy::missing_panics_doc,
    reason = "By construction this cannot panic."
)]
fn pearson_test(xs: &[f64], ys: &[f64]) -> TrendResult<Correlation> {
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        Err(Error::ConstantInput)?;
    }

    let coefficient = (covariance / (var_x * var_y).sqrt()).clamp(-1.0, 1.0);

    // t transform of the coefficient with n - 2 degrees of freedom
    let dof = n - 2.0;
    let p_value = if coefficient.abs() >= 1.0 {
        0.0
    } else {
        let t = coefficient * (dof / (1.0 - coefficient * coefficient)).sqrt();
        // dof is at least 1 by the minimum point count
        let dist = StudentsT::new(0.0, 1.0, dof).unwrap();
        (2.0 * (1.0 - dist.cdf(t.abs()))).clamp(0.0, 1.0)
    };

    Ok(Correlation {
        coefficient,
        p_value,
    })
}

/// Rank transform with tied values assigned their average rank (1 based).
fn ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranked = vec![0.0; values.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start;
        while end + 1 < order.len() && values[order[end + 1]] == values[order[start]] {
            end += 1;
        }
        let rank = (start + end) as f64 / 2.0 + 1.0;
        for &idx in &order[start..=end] {
            ranked[idx] = rank;
        }
        start = end + 1;
    }
    ranked
}

#[cfg(test)]
mod tests {
    use super::{Correlation, CorrelationMethod, correlate, pearson, ranks, spearman};
    use crate::errors::Error;

    #[test]
    fn test_pearson_perfect() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = [2.0, 4.0, 6.0, 8.0, 10.0];
        let corr = pearson(&xs, &ys).unwrap();
        assert!((corr.coefficient - 1.0).abs() < 1e-12);
        assert_eq!(corr.p_value, 0.0);

        let neg: Vec<f64> = ys.iter().map(|y| -y).collect();
        let corr = pearson(&xs, &neg).unwrap();
        assert!((corr.coefficient + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_known_value() {
        // scipy.stats.pearsonr reference: r = 0.8, p = 0.10404
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = [1.0, 3.0, 2.0, 5.0, 4.0];
        let corr = pearson(&xs, &ys).unwrap();
        assert!((corr.coefficient - 0.8).abs() < 1e-12);
        assert!((corr.p_value - 0.10404).abs() < 1e-4);
    }

    #[test]
    fn test_spearman_monotonic() {
        // a monotonic nonlinear relation has perfect rank correlation
        let xs: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ys: Vec<f64> = xs.iter().map(|x| x.exp()).collect();
        let corr = spearman(&xs, &ys).unwrap();
        assert!((corr.coefficient - 1.0).abs() < 1e-12);
        assert_eq!(corr.p_value, 0.0);

        // while the linear coefficient is below 1
        let linear = pearson(&xs, &ys).unwrap();
        assert!(linear.coefficient < 1.0 - 1e-6);
    }

    #[test]
    fn test_spearman_with_ties() {
        // x ranks [1, 2.5, 2.5, 4, 5], y ranks [1, 2, 3.5, 3.5, 5],
        // Pearson over the ranks gives 8.75 / 9.5
        let xs = [1.0, 2.0, 2.0, 3.0, 4.0];
        let ys = [1.0, 2.0, 3.0, 3.0, 5.0];
        let corr = spearman(&xs, &ys).unwrap();
        assert!((corr.coefficient - 8.75 / 9.5).abs() < 1e-12);
    }

    #[test]
    fn test_ranks_average_ties() {
        let ranked = ranks(&[10.0, 20.0, 20.0, 30.0]);
        assert_eq!(ranked, vec![1.0, 2.5, 2.5, 4.0]);

        let ranked = ranks(&[3.0, 1.0, 2.0]);
        assert_eq!(ranked, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_structural_errors() {
        let xs = [1.0, 2.0, 3.0];
        assert!(matches!(
            pearson(&xs, &[1.0, 2.0]),
            Err(Error::DimensionMismatch { .. })
        ));
        assert!(matches!(
            pearson(&[1.0, 2.0], &[2.0, 1.0]),
            Err(Error::InsufficientData { .. })
        ));
        assert!(matches!(
            pearson(&xs, &[5.0, 5.0, 5.0]),
            Err(Error::ConstantInput)
        ));
    }

    #[test]
    fn test_method_selector() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = [1.0, 3.0, 2.0, 5.0, 4.0];
        assert_eq!(
            correlate(&xs, &ys, CorrelationMethod::Pearson).unwrap(),
            pearson(&xs, &ys).unwrap()
        );
        assert_eq!(
            correlate(&xs, &ys, CorrelationMethod::Spearman).unwrap(),
            spearman(&xs, &ys).unwrap()
        );
    }

    #[test]
    fn test_display_annotation() {
        let corr = Correlation {
            coefficient: 0.832,
            p_value: 0.0805,
        };
        assert_eq!(format!("{corr}"), "r:0.832 p:0.0805");
    }
}
