//! Dataset representation, row subsampling and synthetic data generation.

pub mod dataset;
pub mod sample;
pub mod simulate;

pub use dataset::DataSet;
pub use sample::{subsample, subsample_rng, subsample_rows};
pub use simulate::{SimulatedData, SimulationConfig, simulate_linear_sem};
