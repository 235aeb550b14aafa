//! Newline-delimited JSON serve loop.
//!
//! Each input line is one request, answered by exactly one output line:
//!
//! ```text
//! → {"tool": "get_vm_info", "arguments": {"vm_id": "kali"}, "id": 7}
//! ← {"id": 7, "tool": "get_vm_info", "result": {"name": "kali", ...}}
//! ```
//!
//! Requests run concurrently, each as its own task, so responses may come
//! back out of order; `id` is echoed verbatim for correlation. A line that
//! is not a valid request is answered with `{"error": ...}`.

use super::ServeRequest;
use crate::output::formatter::JsonFormatter;
use serde_json::{Map, Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use vmscope_application::DispatchToolUseCase;

/// Counters reported when the loop ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServeSummary {
    /// Requests dispatched to a tool
    pub dispatched: usize,
    /// Lines rejected before dispatch
    pub rejected: usize,
    /// Most calls that were tracked at once
    pub peak_in_flight: usize,
}

/// Serves tool calls over a line-oriented byte stream (normally stdin/stdout)
pub struct StdioServer {
    dispatcher: DispatchToolUseCase,
    cancel: CancellationToken,
}

impl StdioServer {
    pub fn new(dispatcher: DispatchToolUseCase) -> Self {
        Self {
            dispatcher,
            cancel: CancellationToken::new(),
        }
    }

    /// Stop reading and cancel every in-flight call when `cancel` fires.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Run until `input` reaches EOF or the token is cancelled, then wait
    /// for in-flight calls to finish and flush their responses.
    pub async fn run<R, W>(&self, input: R, output: W) -> std::io::Result<ServeSummary>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel::<String>();
        let writer = tokio::spawn(write_lines(rx, output));

        let mut summary = ServeSummary::default();
        let mut tasks = JoinSet::new();
        let mut lines = input.lines();

        loop {
            let line = tokio::select! {
                _ = self.cancel.cancelled() => {
                    info!("Serve loop cancelled, finishing in-flight calls");
                    break;
                }
                Some(joined) = tasks.join_next(), if !tasks.is_empty() => {
                    log_join_error(joined);
                    continue;
                }
                line = lines.next_line() => line?,
            };
            let Some(line) = line else {
                debug!("Input closed");
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            let request = match serde_json::from_str::<ServeRequest>(&line) {
                Ok(request) => request,
                Err(e) => {
                    warn!("Rejected request line: {}", e);
                    summary.rejected += 1;
                    let reply = json!({ "error": format!("Invalid request: {}", e) });
                    let _ = tx.send(JsonFormatter::compact().format(&reply));
                    continue;
                }
            };

            summary.dispatched += 1;
            let dispatcher = self.dispatcher.clone();
            let cancel = self.cancel.clone();
            let tx = tx.clone();
            tasks.spawn(async move {
                let call = request.to_tool_call();
                let response = dispatcher.execute_with_cancellation(&call, &cancel).await;
                let reply = reply_line(&request, response.into_body());
                let _ = tx.send(JsonFormatter::compact().format(&reply));
            });
            summary.peak_in_flight = summary.peak_in_flight.max(tasks.len());
        }

        while let Some(joined) = tasks.join_next().await {
            log_join_error(joined);
        }

        drop(tx);
        writer.await.map_err(std::io::Error::other)??;
        Ok(summary)
    }
}

fn log_join_error(joined: Result<(), tokio::task::JoinError>) {
    if let Err(e) = joined {
        warn!("Call task failed: {}", e);
    }
}

fn reply_line(request: &ServeRequest, result: Value) -> Value {
    let mut reply = Map::new();
    if let Some(id) = &request.id {
        reply.insert("id".to_string(), id.clone());
    }
    reply.insert("tool".to_string(), Value::String(request.tool.clone()));
    reply.insert("result".to_string(), result);
    Value::Object(reply)
}

async fn write_lines<W>(mut rx: mpsc::UnboundedReceiver<String>, mut output: W) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(line) = rx.recv().await {
        output.write_all(line.as_bytes()).await?;
        output.write_all(b"\n").await?;
        output.flush().await?;
    }
    output.shutdown().await
}
