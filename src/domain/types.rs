//! Shared domain types.
//!
//! These types are kept lightweight and serializable so they can be:
//!
//! - used in-memory during the subsample searches
//! - exported to JSON alongside a result graph
//! - reloaded later for display

use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const DEFAULT_PERCENT_SUBSAMPLE_SIZE: f64 = 0.5;
pub const DEFAULT_NUM_SUBSAMPLES: usize = 50;
pub const DEFAULT_PI_THRESHOLD: f64 = 0.5;
pub const DEFAULT_PENALTY_DISCOUNT: f64 = 1.0;
pub const DEFAULT_SEED: u64 = 42;

/// A named variable (dataset column).
///
/// Identity is the name: two nodes with the same name are the same variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Node {
    name: String,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Mark at one end of an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    Tail,
    Arrow,
    Circle,
}

impl Endpoint {
    /// Character used when rendering an edge, e.g. `A --> B` or `A o-o B`.
    pub fn symbol(self, left_side: bool) -> char {
        match (self, left_side) {
            (Endpoint::Tail, _) => '-',
            (Endpoint::Arrow, true) => '<',
            (Endpoint::Arrow, false) => '>',
            (Endpoint::Circle, _) => 'o',
        }
    }
}

/// Stability-selection parameters.
///
/// Serialized keys match the parameter names used on the command line help
/// and in exported result files (`percentSubsampleSize`, `numSubsamples`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StabilityConfig {
    /// Fraction of rows drawn (without replacement) for each subsample, in `(0, 1]`.
    pub percent_subsample_size: f64,
    /// Number of subsampled searches to run.
    pub num_subsamples: usize,
    /// Inclusion-frequency threshold in `[0, 1]` (inclusive).
    pub pi_threshold: f64,
    /// Name of the target variable.
    pub target_name: String,
    /// BIC penalty multiplier forwarded to the score.
    pub penalty_discount: f64,
    /// Log one line per completed subsample.
    pub verbose: bool,
    /// Base seed; subsample `i` derives its own RNG stream from `(seed, i)`.
    pub seed: u64,
    /// Worker pool size.
    pub parallelism: usize,
}

impl Default for StabilityConfig {
    fn default() -> Self {
        Self {
            percent_subsample_size: DEFAULT_PERCENT_SUBSAMPLE_SIZE,
            num_subsamples: DEFAULT_NUM_SUBSAMPLES,
            pi_threshold: DEFAULT_PI_THRESHOLD,
            target_name: String::new(),
            penalty_discount: DEFAULT_PENALTY_DISCOUNT,
            verbose: false,
            seed: DEFAULT_SEED,
            parallelism: default_parallelism(),
        }
    }
}

impl StabilityConfig {
    pub fn new(target_name: impl Into<String>) -> Self {
        Self {
            target_name: target_name.into(),
            ..Self::default()
        }
    }

    /// Reject parameter values the aggregator cannot run with.
    ///
    /// Messages name the parameter so CLI users can map them back to a flag.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.target_name.trim().is_empty() {
            return Err(AppError::config("targetName must not be empty."));
        }
        if !(self.percent_subsample_size.is_finite()
            && self.percent_subsample_size > 0.0
            && self.percent_subsample_size <= 1.0)
        {
            return Err(AppError::config(format!(
                "percentSubsampleSize must be in (0, 1], got {}.",
                self.percent_subsample_size
            )));
        }
        if self.num_subsamples < 1 {
            return Err(AppError::config(format!(
                "numSubsamples must be >= 1, got {}.",
                self.num_subsamples
            )));
        }
        if !(self.pi_threshold.is_finite() && (0.0..=1.0).contains(&self.pi_threshold)) {
            return Err(AppError::config(format!(
                "piThreshold must be in [0, 1], got {}.",
                self.pi_threshold
            )));
        }
        if !(self.penalty_discount.is_finite() && self.penalty_discount > 0.0) {
            return Err(AppError::config(format!(
                "penaltyDiscount must be finite and > 0, got {}.",
                self.penalty_discount
            )));
        }
        if self.parallelism < 1 {
            return Err(AppError::config("parallelism must be >= 1."));
        }
        Ok(())
    }

    /// Rows drawn per subsample for a dataset with `num_rows` rows.
    pub fn subsample_size(&self, num_rows: usize) -> usize {
        (self.percent_subsample_size * num_rows as f64).floor() as usize
    }
}

pub fn default_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
