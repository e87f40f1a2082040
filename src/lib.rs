#![doc(test(attr(deny(warnings))))]

//! Monthly Balance tracks income and expense categories across the twelve
//! months of a year and exposes them through a small command shell.

pub mod cli;
pub mod errors;
pub mod notify;
pub mod session;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Monthly Balance tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
