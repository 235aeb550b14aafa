//! Port for structured call logging.
//!
//! Defines the [`CallLogger`] trait for recording one event per tool
//! dispatch to a structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures a
//! machine-readable audit trail (JSONL) of what was called and how it ended.

use serde_json::Value;

/// A structured call event for logging.
///
/// Each event has a type string and a JSON payload containing
/// event-specific fields. The adapter stamps the time on write.
#[derive(Debug, Clone)]
pub struct CallEvent {
    /// Event type identifier (e.g., "tool_call").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl CallEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging call events to a structured log.
///
/// Implementations write each event as a single record (e.g., one JSONL line).
/// The `log` method is synchronous and non-fallible; logging failures are
/// swallowed so they never change a call's result.
pub trait CallLogger: Send + Sync {
    /// Record a call event.
    fn log(&self, event: CallEvent);
}

/// No-op implementation for tests and when the call log is disabled.
pub struct NoCallLogger;

impl CallLogger for NoCallLogger {
    fn log(&self, _event: CallEvent) {}
}
