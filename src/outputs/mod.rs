//! Output generation for pulled batches.
//!
//! - [`console`]: the per-batch text report printed by the binary

pub mod console;
