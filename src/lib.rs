//! `cstar` library crate.
//!
//! Stability selection (subsampled Markov-blanket search with inclusion
//! frequency thresholding) over continuous tabular data.
//!
//! The binary (`cstar`) is a thin wrapper around this library so that:
//!
//! - the aggregator is testable without spawning processes
//! - score and search strategies can be swapped by library callers

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod graph;
pub mod io;
pub mod logging;
pub mod math;
pub mod report;
pub mod score;
pub mod search;
pub mod stability;
