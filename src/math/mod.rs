//! Mathematical utilities: sample covariance and linear solvers.

pub mod covariance;
pub mod ols;

pub use covariance::*;
pub use ols::*;
