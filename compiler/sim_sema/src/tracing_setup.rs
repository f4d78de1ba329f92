use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing output for the analyzer.
///
/// Safe to call more than once; only the first call installs a subscriber,
/// and only if `RUST_LOG` is set, e.g. `RUST_LOG=sim_sema=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let tree = tracing_tree::HierarchicalLayer::new(2)
                .with_targets(true)
                .with_bracketed_fields(true);
            // A subscriber installed by the host wins.
            let _ = tracing_subscriber::registry().with(tree).with(filter).try_init();
        }
    });
}
