//! Domain types used throughout the crate.
//!
//! This module defines:
//!
//! - variables (`Node`) and edge marks (`Endpoint`)
//! - the typed stability-selection configuration (`StabilityConfig`)

pub mod types;

pub use types::*;
