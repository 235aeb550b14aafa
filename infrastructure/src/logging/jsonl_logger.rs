//! Append-only JSONL sink for call events.
//!
//! One line per [`CallEvent`]: the payload's own fields plus `type` and a
//! UTC `timestamp` with millisecond precision. A payload that is not an
//! object is kept under `data`.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{LineWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::warn;
use vmscope_application::{CallEvent, CallLogger};

#[derive(Serialize)]
struct CallRecord<'a> {
    #[serde(rename = "type")]
    event_type: &'a str,
    timestamp: String,
    #[serde(flatten)]
    body: RecordBody<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum RecordBody<'a> {
    Fields(&'a Map<String, Value>),
    Data { data: &'a Value },
}

impl<'a> CallRecord<'a> {
    fn from_event(event: &'a CallEvent) -> Self {
        let body = match &event.payload {
            Value::Object(fields) => RecordBody::Fields(fields),
            other => RecordBody::Data { data: other },
        };
        Self {
            event_type: event.event_type,
            timestamp: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
            body,
        }
    }
}

/// Writes call events to a JSONL file.
///
/// `LineWriter` hands each record to the OS as soon as its newline is written.
pub struct JsonlCallLogger {
    file: Mutex<LineWriter<File>>,
    path: PathBuf,
    write_failed: AtomicBool,
}

impl JsonlCallLogger {
    /// Open `path` for appending, creating missing parent directories.
    pub fn open(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            file: Mutex::new(LineWriter::new(file)),
            path: path.to_path_buf(),
            write_failed: AtomicBool::new(false),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, record: &CallRecord<'_>) -> std::io::Result<()> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');
        let mut file = self
            .file
            .lock()
            .map_err(|_| std::io::Error::other("call log writer poisoned"))?;
        file.write_all(&line)
    }
}

impl CallLogger for JsonlCallLogger {
    fn log(&self, event: CallEvent) {
        let record = CallRecord::from_event(&event);
        // Warn on the first failure only; a full disk would otherwise flood stderr
        if let Err(e) = self.append(&record)
            && !self.write_failed.swap(true, Ordering::Relaxed)
        {
            warn!("Could not write call log {}: {}", self.path.display(), e);
        }
    }
}
