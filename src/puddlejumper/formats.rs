//! Output format implementations for documents
//!
//! - [`printer`]: puddlejumper source text, re-parseable into the same structure
//! - [`treeviz`]: one line per entry with box-drawing connectors
//! - [`priorities`]: the `P0`..`P4` prioritized list view

pub mod priorities;
pub mod printer;
pub mod treeviz;

pub use priorities::{extract_priorities, prioritize, Priorities};
pub use printer::{to_pretty_str, PrettyPrinter};
pub use treeviz::to_treeviz_str;
