//! balance-core
//!
//! State transitions and derived values for the monthly balance ledger.
//! Depends on balance-domain. No CLI, no terminal I/O, no direct file access.

pub mod aggregation;
pub mod codec;
pub mod error;
pub mod reducer;
pub mod selection;
pub mod storage;

pub use aggregation::{annual_net, period_totals, Totals, TotalsCache};
pub use error::CoreError;
pub use reducer::{apply, Action};
pub use selection::SelectionSet;
pub use storage::{KeyValueStore, MemoryStore};
