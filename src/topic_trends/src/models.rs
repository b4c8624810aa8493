//! # Model Catalog
//!
//! A fixed registry of the named scalar models used as fit targets by the
//! report plots. Every model is a pure function of a parameter vector and an
//! independent variable sequence, paired with a default starting guess for
//! iterative fitting.
//!
//! The catalog is a static set built at compile time, there is no runtime
//! registration. The fitter is not restricted to catalog entries, any closure
//! with the same shape may be fit directly.
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

use crate::errors::{Error, TrendResult};

/// Shape of a model function.
///
/// Maps a parameter vector and an independent variable sequence to a dependent
/// variable sequence of the same length. Must be deterministic and side effect
/// free.
pub type ModelFunc = fn(&[f64], &[f64]) -> Vec<f64>;

/// A named entry in the model catalog.
///
/// The length of [`Model::initial_params`] defines the parameter count of the
/// model. For any `xs`, `(model.func)(model.initial_params, xs)` produces a
/// sequence of the same length as `xs`.
#[derive(Debug, Clone, Copy)]
pub struct Model {
    /// Unique name of the model within the catalog.
    pub name: &'static str,

    /// The model function, evaluated pointwise over the input sequence.
    pub func: ModelFunc,

    /// Default starting guess for iterative fitting.
    pub initial_params: &'static [f64],
}

/// All registered models.
static CATALOG: [Model; 5] = [
    Model {
        name: "constant",
        func: constant,
        initial_params: &[50.0],
    },
    Model {
        name: "line",
        func: line,
        initial_params: &[0.0, 1.0],
    },
    Model {
        name: "quadratic",
        func: quadratic,
        initial_params: &[0.0, 1.0, 1.0],
    },
    Model {
        name: "step",
        func: step,
        initial_params: &[5.0, 0.1, 1.0],
    },
    Model {
        name: "gaussian",
        func: gaussian,
        initial_params: &[1.0, 5.0, 1.0],
    },
];

/// Look up a model in the catalog by name.
///
/// ```
///     use topic_trends::models::get_model;
///     let line = get_model("line").unwrap();
///     let ys = (line.func)(&[1.0, 2.0], &[0.0, 1.0, 2.0]);
///     assert_eq!(ys, vec![1.0, 3.0, 5.0]);
/// ```
///
/// # Errors
/// [`Error::UnknownModel`] if no model with the given name is registered.
pub fn get_model(name: &str) -> TrendResult<Model> {
    CATALOG
        .iter()
        .find(|model| model.name == name)
        .copied()
        .ok_or_else(|| Error::UnknownModel(name.into()))
}

/// Names of all registered models.
#[must_use]
pub fn model_names() -> Vec<&'static str> {
    CATALOG.iter().map(|model| model.name).collect()
}

/// `y = p0`
fn constant(p: &[f64], xs: &[f64]) -> Vec<f64> {
    xs.iter().map(|_| p[0]).collect()
}

/// `y = p0 + p1 * x`
fn line(p: &[f64], xs: &[f64]) -> Vec<f64> {
    xs.iter().map(|&x| p[0] + p[1] * x).collect()
}

/// `y = p0 + p1 * x + p2 * x^2`
fn quadratic(p: &[f64], xs: &[f64]) -> Vec<f64> {
    xs.iter().map(|&x| p[0] + p[1] * x + p[2] * x * x).collect()
}

/// `y = p1` below the breakpoint `p0`, `y = p2` above it.
fn step(p: &[f64], xs: &[f64]) -> Vec<f64> {
    xs.iter()
        .map(|&x| if x <= p[0] { p[1] } else { p[2] })
        .collect()
}

/// `y = p0 * exp(-(x - p1)^2 / (2 * p2^2))`
fn gaussian(p: &[f64], xs: &[f64]) -> Vec<f64> {
    xs.iter()
        .map(|&x| p[0] * (-(x - p[1]).powi(2) / (2.0 * p[2].powi(2))).exp())
        .collect()
}
