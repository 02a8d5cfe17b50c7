//! Stability selection of a target's Markov blanket.
//!
//! Responsibilities:
//!
//! - run the subsampled blanket searches in parallel (`aggregator`)
//! - turn inclusion counts into frequencies, a selection and a star graph (`result`)

pub mod aggregator;
pub mod result;

pub use aggregator::StabilitySelection;
pub use result::{InclusionFrequency, StabilityResult};
