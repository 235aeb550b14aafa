//! Logging infrastructure: structured call logging.
//!
//! Provides [`JsonlCallLogger`], a JSONL file writer that implements
//! the [`CallLogger`](vmscope_application::CallLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlCallLogger;
