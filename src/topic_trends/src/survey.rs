//! # Survey dataset assembly
//!
//! In-memory assembly of the per-topic report dataset: Topic Content Scores
//! computed from document inference values, paired with externally computed
//! growth metrics (CAGR and topic counts) and the derived Research Impact.
//!
//! Reading topic model artifacts from disk and all plotting stay outside this
//! crate, callers hand in plain numeric sequences and take the assembled
//! records wherever they need them.
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

use itertools::izip;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, TrendResult};

/// Default inference threshold above which a document contributes to a
/// topic's content score.
pub const DEFAULT_INFERENCE_THRESHOLD: f64 = 0.01;

/// Row major document by topic matrix of inference scores.
///
/// Each row is one document, each column one topic, each entry the topic
/// model's inference score of that topic for that document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InferenceMatrix {
    scores: Box<[f64]>,
    n_topics: usize,
}

impl InferenceMatrix {
    /// Create a matrix from row major scores and the number of topics.
    ///
    /// # Errors
    /// * [`Error::EmptyInput`] - `scores` is empty or `n_topics` is zero.
    /// * [`Error::DimensionMismatch`] - the score count is not a multiple of
    ///   the topic count.
    pub fn new(scores: Vec<f64>, n_topics: usize) -> TrendResult<Self> {
        if scores.is_empty() || n_topics == 0 {
            Err(Error::EmptyInput)?;
        }
        if scores.len() % n_topics != 0 {
            Err(Error::DimensionMismatch {
                expected: n_topics * scores.len().div_ceil(n_topics),
                found: scores.len(),
            })?;
        }
        Ok(Self {
            scores: scores.into_boxed_slice(),
            n_topics,
        })
    }

    /// Number of documents (rows).
    #[must_use]
    pub fn n_documents(&self) -> usize {
        self.scores.len() / self.n_topics
    }

    /// Number of topics (columns).
    #[must_use]
    pub fn n_topics(&self) -> usize {
        self.n_topics
    }

    /// Topic Content Score per topic.
    ///
    /// For each topic, the sum over all documents of the inference scores
    /// strictly above the threshold. Scores at or below the threshold are
    /// treated as the topic being absent from the document.
    ///
    /// ```
    ///     use topic_trends::survey::{DEFAULT_INFERENCE_THRESHOLD, InferenceMatrix};
    ///
    ///     // two documents, two topics
    ///     let matrix = InferenceMatrix::new(vec![0.5, 0.001, 0.25, 0.4], 2).unwrap();
    ///     let tcs = matrix.content_scores(DEFAULT_INFERENCE_THRESHOLD);
    ///     assert_eq!(tcs, vec![0.75, 0.4]);
    /// ```
    #[must_use]
    pub fn content_scores(&self, threshold: f64) -> Vec<f64> {
        let mut tcs = vec![0.0; self.n_topics];
        for row in self.scores.chunks_exact(self.n_topics) {
            for (total, &inference) in tcs.iter_mut().zip(row) {
                if inference > threshold {
                    *total += inference;
                }
            }
        }
        tcs
    }
}

/// Research Impact per topic, `(cagr - min_cagr) * count`.
///
/// `min_cagr` anchors the lower bound of the metric at zero for the topic
/// with the smallest growth rate.
///
/// # Errors
/// * [`Error::DimensionMismatch`] - `cagr` and `counts` have different
///   lengths.
pub fn research_impact(cagr: &[f64], counts: &[f64], min_cagr: f64) -> TrendResult<Vec<f64>> {
    if cagr.len() != counts.len() {
        Err(Error::DimensionMismatch {
            expected: cagr.len(),
            found: counts.len(),
        })?;
    }
    Ok(izip!(cagr, counts)
        .map(|(growth, count)| (growth - min_cagr) * count)
        .collect())
}

/// Options controlling [`build_dataset`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetOptions {
    /// Topic indices excluded from the dataset.
    pub ignore_topics: Vec<usize>,

    /// CAGR offset used as the Research Impact zero point.
    pub min_cagr: f64,

    /// When set, the zero point is taken from the smallest finite CAGR of
    /// the kept topics instead of [`DatasetOptions::min_cagr`].
    pub flex_min_cagr: bool,

    /// Normalization divisor for the document content score.
    ///
    /// Must be nonzero, typically the largest achievable document score so
    /// that `doc_tcs` reads as a fraction.
    pub max_doc_score: f64,
}

impl Default for DatasetOptions {
    fn default() -> Self {
        Self {
            ignore_topics: Vec::new(),
            min_cagr: 0.0,
            flex_min_cagr: false,
            max_doc_score: 1.0,
        }
    }
}

/// One assembled per-topic row of the report dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicRecord {
    /// Topic index.
    pub topic: usize,

    /// Raw document Topic Content Score.
    pub raw_doc_tcs: f64,

    /// Document Topic Content Score normalized by the maximum document score.
    pub doc_tcs: f64,

    /// Literature Topic Content Score, the per topic document count from the
    /// time series statistics.
    pub literature_tcs: f64,

    /// Compound Annual Growth Rate of the topic, externally computed.
    pub cagr: f64,

    /// Research Impact, `(cagr - min_cagr) * count`.
    pub research_impact: f64,
}

/// Assemble the per-topic report dataset.
///
/// Pairs document content scores with the externally computed growth metrics,
/// one record per topic. Topics on the ignore list are skipped, and topics
/// whose CAGR is not finite are dropped entirely (missing growth statistics
/// upstream appear as nulls).
///
/// # Errors
/// * [`Error::EmptyInput`] - `content_scores` is empty.
/// * [`Error::DimensionMismatch`] - `cagr` or `counts` do not match
///   `content_scores` in length.
pub fn build_dataset(
    content_scores: &[f64],
    cagr: &[f64],
    counts: &[f64],
    options: &DatasetOptions,
) -> TrendResult<Vec<TopicRecord>> {
    if content_scores.is_empty() {
        Err(Error::EmptyInput)?;
    }
    for found in [cagr.len(), counts.len()] {
        if found != content_scores.len() {
            Err(Error::DimensionMismatch {
                expected: content_scores.len(),
                found,
            })?;
        }
    }

    let kept = |topic: usize| !options.ignore_topics.contains(&topic);

    let min_cagr = if options.flex_min_cagr {
        cagr.iter()
            .enumerate()
            .filter(|(topic, growth)| kept(*topic) && growth.is_finite())
            .map(|(_, growth)| *growth)
            .fold(f64::INFINITY, f64::min)
    } else {
        options.min_cagr
    };

    Ok(izip!(content_scores, cagr, counts)
        .enumerate()
        .filter(|(topic, (_, growth, _))| kept(*topic) && growth.is_finite())
        .map(|(topic, (&score, &growth, &count))| TopicRecord {
            topic,
            raw_doc_tcs: score,
            doc_tcs: score / options.max_doc_score,
            literature_tcs: count,
            cagr: growth,
            research_impact: (growth - min_cagr) * count,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::{
        DEFAULT_INFERENCE_THRESHOLD, DatasetOptions, InferenceMatrix, build_dataset,
        research_impact,
    };
    use crate::errors::Error;

    #[test]
    fn test_content_scores_threshold() {
        // three documents, two topics; entries at or below the threshold do
        // not contribute
        let scores = vec![0.5, 0.01, 0.2, 0.3, 0.005, 0.25];
        let matrix = InferenceMatrix::new(scores, 2).unwrap();
        assert_eq!(matrix.n_documents(), 3);
        assert_eq!(matrix.n_topics(), 2);

        let tcs = matrix.content_scores(DEFAULT_INFERENCE_THRESHOLD);
        assert!((tcs[0] - 0.7).abs() < 1e-14);
        assert!((tcs[1] - 0.55).abs() < 1e-14);
    }

    #[test]
    fn test_inference_matrix_shape() {
        assert!(matches!(
            InferenceMatrix::new(vec![], 2),
            Err(Error::EmptyInput)
        ));
        assert!(matches!(
            InferenceMatrix::new(vec![1.0, 2.0, 3.0], 2),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_research_impact() {
        let ri = research_impact(&[0.1, 0.2, -0.05], &[10.0, 5.0, 20.0], -0.05).unwrap();
        assert!((ri[0] - 1.5).abs() < 1e-14);
        assert!((ri[1] - 1.25).abs() < 1e-14);
        // the minimum growth topic anchors at zero
        assert_eq!(ri[2], 0.0);

        assert!(matches!(
            research_impact(&[0.1], &[1.0, 2.0], 0.0),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_build_dataset_basic() {
        let tcs = [0.4, 0.8, 0.2];
        let cagr = [0.1, 0.3, 0.2];
        let counts = [10.0, 20.0, 5.0];
        let options = DatasetOptions {
            max_doc_score: 2.0,
            ..DatasetOptions::default()
        };

        let records = build_dataset(&tcs, &cagr, &counts, &options).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].topic, 0);
        assert!((records[0].doc_tcs - 0.2).abs() < 1e-14);
        assert!((records[0].raw_doc_tcs - 0.4).abs() < 1e-14);
        assert!((records[1].research_impact - 0.3 * 20.0).abs() < 1e-14);
        assert_eq!(records[2].literature_tcs, 5.0);
    }

    #[test]
    fn test_build_dataset_drops_and_ignores() {
        let tcs = [0.4, 0.8, 0.2, 0.6];
        let cagr = [0.1, f64::NAN, 0.2, 0.3];
        let counts = [10.0, 20.0, 5.0, 8.0];
        let options = DatasetOptions {
            ignore_topics: vec![3],
            ..DatasetOptions::default()
        };

        // topic 1 has no growth statistic, topic 3 is ignored
        let records = build_dataset(&tcs, &cagr, &counts, &options).unwrap();
        let topics: Vec<usize> = records.iter().map(|r| r.topic).collect();
        assert_eq!(topics, vec![0, 2]);
    }

    #[test]
    fn test_build_dataset_flex_min_cagr() {
        let tcs = [0.4, 0.8, 0.2];
        let cagr = [0.1, -0.2, 0.3];
        let counts = [10.0, 20.0, 5.0];
        let options = DatasetOptions {
            flex_min_cagr: true,
            min_cagr: 100.0, // overridden by the dataset minimum
            ..DatasetOptions::default()
        };

        let records = build_dataset(&tcs, &cagr, &counts, &options).unwrap();
        // the smallest CAGR topic has zero impact, all others are positive
        assert_eq!(records[1].research_impact, 0.0);
        assert!(records[0].research_impact > 0.0);
        assert!(records[2].research_impact > 0.0);
    }

    #[test]
    fn test_build_dataset_structural_errors() {
        assert!(matches!(
            build_dataset(&[], &[], &[], &DatasetOptions::default()),
            Err(Error::EmptyInput)
        ));
        assert!(matches!(
            build_dataset(&[0.1, 0.2], &[0.1], &[1.0, 2.0], &DatasetOptions::default()),
            Err(Error::DimensionMismatch { .. })
        ));
    }
}
