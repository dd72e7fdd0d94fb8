//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs a global `fmt` subscriber.
///
/// `RUST_LOG` wins when set; otherwise every Ludocast crate logs at
/// `default_level`.
pub fn init(default_level: &str) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "ludocast={default_level},ludocast_lobby={default_level},\
             ludocast_transport={default_level},ludocastd={default_level}"
        ))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init()
}
