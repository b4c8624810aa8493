//! # Topic Trends
//!
//! Statistical core for exploratory analysis of topic model surveys of the
//! astronomy literature (decadal survey reports and white papers).
//!
//! Upstream tooling infers per document topic scores and per topic growth
//! statistics; this crate supplies the numerical layer that relates them:
//!
//! * [`models`] - a fixed catalog of named fit models (constant, line,
//!   quadratic, step, gaussian) with default starting parameters.
//! * [`fitting`] - weighted nonlinear least squares fitting with parameter
//!   uncertainty estimates and reduced chi squared goodness of fit.
//! * [`correlation`] - Pearson and Spearman correlation tests with two sided
//!   p-values.
//! * [`survey`] - assembly of the per topic report dataset: Topic Content
//!   Scores, Research Impact, and growth metric pairing.
//!
//! All operations are synchronous, pure computations over small in-memory
//! sequences. File formats, plotting, and report layout are deliberately
//! left to external collaborators.

pub mod correlation;
pub mod errors;
pub mod fitting;
pub mod models;
pub mod survey;

/// Common useful imports
pub mod prelude {
    pub use crate::correlation::{Correlation, CorrelationMethod, correlate, pearson, spearman};
    pub use crate::errors::{Error, TrendResult};
    pub use crate::fitting::{
        CHI_SQUARE_UNAVAILABLE, FitResult, fit, fit_probability, reduced_chi_square,
    };
    pub use crate::models::{Model, ModelFunc, get_model, model_names};
    pub use crate::survey::{
        DEFAULT_INFERENCE_THRESHOLD, DatasetOptions, InferenceMatrix, TopicRecord, build_dataset,
        research_impact,
    };
}
