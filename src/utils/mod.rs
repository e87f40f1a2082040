pub mod build_info;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("monthly_balance=info"));

        fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    });
}

/// Renders an amount with exactly two decimals. Non-finite values render as zero.
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return "0.00".into();
    }
    let formatted = format!("{value:.2}");
    // Avoid "-0.00" for tiny negative values.
    if formatted == "-0.00" {
        "0.00".into()
    } else {
        formatted
    }
}
