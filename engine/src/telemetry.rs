//! Telemetry and Observability
//!
//! Handles setting up `tracing-subscriber` for structured logging and defines
//! the event sink the policy operations report their failures through.
//!
//! Guard rejections and purge failures go through an injected [`EventSink`]
//! instead of calling the `tracing` macros directly, so callers can capture
//! them without installing a process-wide subscriber. [`TracingSink`] is the
//! production sink and forwards to `tracing::error!`.

use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the tracing subscriber with the given log level from config.
///
/// Priority: `RUST_LOG` env var > `log_level` parameter > default "info"
///
/// In debug builds: pretty-printed terminal output.
/// In release builds: JSON structured output with spans.
pub fn init_telemetry_with_level(log_level: &str) {
    let default_filter = format!("{},addon_engine={}", log_level, log_level);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&default_filter));

    #[cfg(debug_assertions)]
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().pretty().with_target(false).with_writer(std::io::stderr))
            .try_init()
            .ok();
    }

    #[cfg(not(debug_assertions))]
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_current_span(true).with_writer(std::io::stderr))
            .try_init()
            .ok();
    }
}

/// Error-severity event raised by a policy operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyEvent {
    /// A lifecycle operation was refused because the add-on is not installed
    GuardRejected { slug: String },
    /// Removing an add-on's data directory failed
    PurgeFailed { folder: PathBuf, error: String },
}

/// Sink for error events with structured fields
pub trait EventSink: Send + Sync {
    fn record_error(&self, event: &PolicyEvent);
}

/// Sink that emits events as `tracing` error lines
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record_error(&self, event: &PolicyEvent) {
        match event {
            PolicyEvent::GuardRejected { slug } => {
                tracing::error!(slug = %slug, "Addon {} is not installed", slug);
            }
            PolicyEvent::PurgeFailed { folder, error } => {
                tracing::error!(
                    folder = %folder.display(),
                    error = %error,
                    "Can't remove Add-on Data: {}",
                    error
                );
            }
        }
    }
}

/// Sink that keeps events in memory
///
/// Useful for embedders that surface failures in their own UI, and for tests.
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<PolicyEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events, oldest first
    pub fn events(&self) -> Vec<PolicyEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for MemorySink {
    fn record_error(&self, event: &PolicyEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_records_in_order() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());

        sink.record_error(&PolicyEvent::GuardRejected {
            slug: "a".to_string(),
        });
        sink.record_error(&PolicyEvent::PurgeFailed {
            folder: PathBuf::from("/data/addons/data/a"),
            error: "boom".to_string(),
        });

        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0],
            PolicyEvent::GuardRejected {
                slug: "a".to_string()
            }
        );
    }

    #[test]
    fn test_tracing_sink_without_subscriber() {
        // No subscriber installed; must not panic
        TracingSink.record_error(&PolicyEvent::GuardRejected {
            slug: "a".to_string(),
        });
    }
}
