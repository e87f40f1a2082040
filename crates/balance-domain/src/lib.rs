//! balance-domain
//!
//! Pure data model for the monthly balance ledger: periods, categories,
//! line-item sections and the twelve-period ledger. No I/O, no CLI, no storage.

pub mod category;
pub mod ledger;
pub mod period;

pub use category::*;
pub use ledger::*;
pub use period::*;
