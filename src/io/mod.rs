//! Input/output helpers.
//!
//! - CSV dataset ingest + write (`ingest`)
//! - result JSON read/write (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
