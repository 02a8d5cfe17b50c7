//! Graph structures consumed and produced by searches.
//!
//! - `Edge` with per-end marks and optional edge-type probabilities (`edge`)
//! - `EdgeListGraph` (`edge_list`)

pub mod edge;
pub mod edge_list;

pub use edge::*;
pub use edge_list::*;
