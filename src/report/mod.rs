//! Reporting utilities: run summaries and frequency tables.

pub mod format;

pub use format::*;
