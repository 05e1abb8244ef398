//! Provide tracing, tailored to this program.
//!
//! At startup, the daemon calls [`init_stdout`] to install a subscriber. The
//! driver logs through the `log` facade; those records are forwarded into the
//! same subscriber, so register traffic and daemon events share one stream.
//!
//! The rest of the program can `use crate::tracing::prelude::*` for the
//! `trace!()`, `debug!()`, `info!()`, `warn!()`, and `error!()` macros.

use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    prelude::*,
};

pub mod prelude {
    #[allow(unused_imports)]
    pub use tracing::{debug, error, info, trace, warn};
}

/// Log to stdout, filtering according to RUST_LOG and defaulting to INFO.
pub fn init_stdout() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var("RUST_LOG")
        .from_env_lossy();

    // init() also installs the log -> tracing bridge
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .compact(),
        )
        .init();
}
