//! # Errors
//!
//! Error types for all statistics calculations in this crate.
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

/// Error types for statistics calculations.
///
/// Structural problems (wrong shapes, empty inputs, unknown model names) fail
/// fast with one of these at the call boundary. Numerical degeneracies inside
/// the fitter are absorbed locally and reported through sentinel values on
/// [`crate::fitting::FitResult`] instead, so a single bad fit in a batch does
/// not abort the batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Sequences required to be of equal length were not.
    #[error("Sequences must have equal lengths, expected {expected} found {found}.")]
    DimensionMismatch {
        /// Length the sequence was required to have.
        expected: usize,
        /// Length the sequence actually had.
        found: usize,
    },

    /// A zero-length sequence was passed where at least one point is required.
    #[error("Input data must contain at least one point.")]
    EmptyInput,

    /// Catalog lookup for a model name which is not registered.
    #[error("Unknown model '{0}'.")]
    UnknownModel(String),

    /// Degrees of freedom is zero or negative for a goodness of fit statistic.
    #[error("Degenerate fit, {points} data points with {params} free parameters.")]
    DegenerateFit {
        /// Number of data points supplied.
        points: usize,
        /// Number of free model parameters.
        params: usize,
    },

    /// Too few data points for the requested statistic.
    #[error("At least {required} data points are required, found {found}.")]
    InsufficientData {
        /// Minimum number of points required.
        required: usize,
        /// Number of points supplied.
        found: usize,
    },

    /// A sequence with zero variance was passed to a correlation test.
    #[error("Correlation is undefined for a constant sequence.")]
    ConstantInput,
}

/// Result type for statistics calculations.
pub type TrendResult<T> = Result<T, Error>;
