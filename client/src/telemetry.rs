use std::sync::Once;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

pub const DEFAULT_FILTER: &str = "info,spl_payment_client=debug";

/// Installs the global subscriber. `RUST_LOG` overrides [`DEFAULT_FILTER`].
/// Safe to call more than once.
pub fn setup_telemetry() {
    INIT.call_once(|| {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let stdout_layer = fmt::Layer::new().with_writer(std::io::stdout).with_ansi(true);

        if let Err(e) = tracing_subscriber::registry()
            .with(stdout_layer)
            .with(env_filter)
            .try_init()
        {
            eprintln!("Warning: tracing subscriber already installed: {}", e);
        }
    });
}
