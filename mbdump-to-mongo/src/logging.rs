//! Logging setup, controlled by the `MBDUMP_LOG` environment variable.
//!
//! Same idiom as `mongomerge`'s logging module — a level name enables a
//! `tracing_subscriber::fmt` subscriber; unset stays silent.

use std::env;
use std::sync::Once;

static INIT: Once = Once::new();

const ENV_VAR: &str = "MBDUMP_LOG";

fn configured_level() -> Option<String> {
    env::var(ENV_VAR).ok().filter(|v| !v.is_empty())
}

/// Install a `tracing` subscriber if `MBDUMP_LOG` is set.
pub fn init() {
    INIT.call_once(|| {
        let Some(level) = configured_level() else {
            return;
        };

        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt};

            let filter = EnvFilter::try_new(format!("mbdump_to_mongo={level},dump_loader={level}"))
                .unwrap_or_else(|_| EnvFilter::new("info"));
            fmt().with_env_filter(filter).with_target(false).init();
        }

        #[cfg(not(feature = "tracing-subscriber"))]
        {
            let _ = level;
        }
    });
}
