//! Logging setup, controlled by the `MONGOMERGE_LOG` environment variable.
//!
//! - `MONGOMERGE_LOG=debug` (or `trace`/`info`/`warn`/`error`) sets the level.
//! - Unset means no subscriber is installed and `tracing` events are dropped,
//!   matching the original tool's default silence outside of its final
//!   summary line.

use std::env;
use std::sync::Once;

static INIT: Once = Once::new();

const ENV_VAR: &str = "MONGOMERGE_LOG";

/// The configured log level, or `None` if logging wasn't requested.
fn configured_level() -> Option<String> {
    env::var(ENV_VAR).ok().filter(|v| !v.is_empty())
}

/// Install a `tracing` subscriber if `MONGOMERGE_LOG` is set. Safe to call
/// more than once; only the first call takes effect.
pub fn init() {
    INIT.call_once(|| {
        let Some(level) = configured_level() else {
            return;
        };

        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt};

            let filter = EnvFilter::try_new(format!("mongomerge={level},merge_core={level}"))
                .unwrap_or_else(|_| EnvFilter::new("info"));
            fmt().with_env_filter(filter).with_target(false).init();
        }

        #[cfg(not(feature = "tracing-subscriber"))]
        {
            let _ = level;
        }
    });
}
