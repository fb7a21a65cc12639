use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Environment variable holding the tracing filter directive.
pub const LOG_ENV: &str = "LOANCALC_LOG";

const DEFAULT_DIRECTIVE: &str = "loancalc=warn,loancalc_core=warn";

/// Install the stderr subscriber once. Stdout stays reserved for output.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(true)
            .try_init();
    });
}
