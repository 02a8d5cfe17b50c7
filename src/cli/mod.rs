//! Command-line parsing for the `cstar` stability-selection tool.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! search and aggregation code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{
    DEFAULT_NUM_SUBSAMPLES, DEFAULT_PENALTY_DISCOUNT, DEFAULT_PERCENT_SUBSAMPLE_SIZE, DEFAULT_PI_THRESHOLD,
};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "cstar",
    version,
    about = "Stability selection of a target's Markov blanket over continuous data"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run subsampled Markov-blanket searches and print inclusion frequencies.
    Search(SearchArgs),
    /// Generate a linear-Gaussian dataset with a known graph.
    Simulate(SimulateArgs),
    /// Print a previously exported result JSON.
    Show(ShowArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct SearchArgs {
    /// Delimited data file with a header row.
    #[arg(short = 'd', long, value_name = "CSV")]
    pub data: PathBuf,

    /// Column delimiter (single ASCII character, `\t` for tab).
    #[arg(long, default_value = ",")]
    pub delimiter: String,

    /// Target variable (targetName).
    #[arg(short = 't', long)]
    pub target: String,

    /// Fraction of rows per subsample, in (0, 1] (percentSubsampleSize).
    #[arg(long, default_value_t = DEFAULT_PERCENT_SUBSAMPLE_SIZE)]
    pub percent_subsample_size: f64,

    /// Number of subsamples (numSubsamples).
    #[arg(short = 'n', long, default_value_t = DEFAULT_NUM_SUBSAMPLES)]
    pub num_subsamples: usize,

    /// Inclusion-frequency threshold, in [0, 1] (piThreshold).
    #[arg(long, default_value_t = DEFAULT_PI_THRESHOLD)]
    pub pi_threshold: f64,

    /// BIC penalty multiplier (penaltyDiscount).
    #[arg(long, default_value_t = DEFAULT_PENALTY_DISCOUNT)]
    pub penalty_discount: f64,

    /// Base random seed. Falls back to `CSTAR_SEED`, then 42.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Worker threads. Falls back to `CSTAR_PARALLELISM`, then available cores.
    #[arg(short = 'j', long)]
    pub parallelism: Option<usize>,

    /// Cap on blanket members per subsample search (unbounded if absent).
    #[arg(long)]
    pub max_blanket_size: Option<usize>,

    /// Print one line per completed subsample.
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Show only the top-N rows of the frequency table (0 = all).
    #[arg(long, default_value_t = 0)]
    pub top: usize,

    /// Export the result (parameters, frequencies, graph) to JSON.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Parser, Clone)]
pub struct SimulateArgs {
    /// Output CSV path.
    #[arg(short = 'o', long, value_name = "CSV")]
    pub out: PathBuf,

    #[arg(long, default_value_t = 10)]
    pub variables: usize,

    #[arg(long, default_value_t = 500)]
    pub rows: usize,

    /// Probability of each forward edge `Xi -> Xj`.
    #[arg(long, default_value_t = 0.3)]
    pub edge_probability: f64,

    #[arg(long, default_value_t = 42)]
    pub seed: u64,
}

#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Result JSON written by `cstar search --export`.
    #[arg(long, value_name = "JSON")]
    pub result: PathBuf,

    /// Re-threshold the saved frequencies instead of using the saved piThreshold.
    #[arg(long)]
    pub pi_threshold: Option<f64>,

    #[arg(long, default_value_t = 0)]
    pub top: usize,
}
