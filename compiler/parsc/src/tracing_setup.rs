//! Tree-shaped trace output for debugging the evaluator.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Environment variable holding the filter, e.g. `PARS_LOG=pars_eval=debug`.
pub const LOG_ENV: &str = "PARS_LOG";

/// Install the subscriber if `PARS_LOG` is set. Safe to call repeatedly.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var(LOG_ENV).is_ok() {
            let filter = EnvFilter::from_env(LOG_ENV);
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}
