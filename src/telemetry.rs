//! Optional tracing subscriber for hosts that do not install their own.
//!
//! The engine only emits `tracing` events and `metrics` counters; nothing is
//! recorded until the host installs a subscriber (and a metrics recorder).

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::moderation::ModerationError;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_DIRECTIVE: &str = "market_guard=info";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Install a global subscriber filtered by `RUST_LOG`, falling back to
/// `default_directive`.
///
/// # Errors
/// `InvalidConfig` when the directive does not parse or a global subscriber
/// is already installed.
pub fn init_tracing(format: LogFormat, default_directive: &str) -> Result<(), ModerationError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .map_err(|e| ModerationError::InvalidConfig(format!("log filter: {}", e)))?;

    let installed = match format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_current_span(false))
            .try_init(),
    };
    installed.map_err(|e| ModerationError::InvalidConfig(format!("tracing subscriber: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_install_is_an_error() {
        // The first call may lose to another test's subscriber; the second
        // always finds one installed.
        let _ = init_tracing(LogFormat::Json, DEFAULT_DIRECTIVE);
        let second = init_tracing(LogFormat::Pretty, DEFAULT_DIRECTIVE);
        assert!(matches!(second, Err(ModerationError::InvalidConfig(_))));
    }

    #[test]
    fn test_log_format_names() {
        assert_eq!(serde_json::to_value(LogFormat::Json).unwrap(), "json");
        assert_eq!(serde_json::to_value(LogFormat::Pretty).unwrap(), "pretty");
    }
}
