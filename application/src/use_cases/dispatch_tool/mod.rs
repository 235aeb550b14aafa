//! Dispatch Tool use case.
//!
//! Maps one named tool call onto the fixed pipeline
//!
//! ```text
//! build ─▶ (artifact pre-flight) ─▶ execute ─▶ parse ─▶ normalize ─▶ render
//! ```
//!
//! and returns the serialized [`ToolResponse`]. Every failure tier ends as
//! `{"error": ...}`; nothing here panics or retries, and no state survives
//! a call. Calls are independent, so one dispatcher can be shared across
//! any number of concurrent tasks.

pub mod response;

use crate::config::ExecutionParams;
use crate::ports::artifact_store::ArtifactStorePort;
use crate::ports::call_logger::{CallEvent, CallLogger, NoCallLogger};
use crate::ports::process_executor::ProcessExecutorPort;
use crate::use_cases::tool_helpers::tool_args_preview;
use response::{
    TAG_ARTIFACT_STORE_ERROR, TAG_MISSING_PARAMETER, TAG_UNKNOWN_TOOL, ToolResponse, render,
    render_dumps,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use vmscope_domain::core::string::truncate;
use vmscope_domain::{
    ArgumentVector, BuildError, CommandBuilder, ExecutionOutcome, InfrastructureError,
    NormalizedResult, ToolCall, ToolKind, ToolSpec, default_tool_spec, normalize, parse,
};

/// Use case for dispatching tool calls.
#[derive(Clone)]
pub struct DispatchToolUseCase {
    builder: CommandBuilder,
    executor: Arc<dyn ProcessExecutorPort>,
    artifacts: Arc<dyn ArtifactStorePort>,
    call_logger: Arc<dyn CallLogger>,
    params: ExecutionParams,
}

impl DispatchToolUseCase {
    /// `builder` and `artifacts` must agree on the dumps directory.
    pub fn new(
        builder: CommandBuilder,
        executor: Arc<dyn ProcessExecutorPort>,
        artifacts: Arc<dyn ArtifactStorePort>,
    ) -> Self {
        Self {
            builder,
            executor,
            artifacts,
            call_logger: Arc::new(NoCallLogger),
            params: ExecutionParams::default(),
        }
    }

    /// Create with a call logger.
    pub fn with_call_logger(mut self, logger: Arc<dyn CallLogger>) -> Self {
        self.call_logger = logger;
        self
    }

    pub fn with_params(mut self, params: ExecutionParams) -> Self {
        self.params = params;
        self
    }

    pub fn params(&self) -> &ExecutionParams {
        &self.params
    }

    /// Catalogue of every tool this dispatcher accepts
    pub fn tool_spec(&self) -> ToolSpec {
        default_tool_spec()
    }

    /// Dispatch one call to completion or timeout.
    pub async fn execute(&self, call: &ToolCall) -> ToolResponse {
        self.dispatch(call, None).await
    }

    /// Dispatch one call, giving up as soon as `cancel` fires.
    ///
    /// Cancelling drops the in-flight execution, which kills the child.
    pub async fn execute_with_cancellation(
        &self,
        call: &ToolCall,
        cancel: &CancellationToken,
    ) -> ToolResponse {
        self.dispatch(call, Some(cancel)).await
    }

    async fn dispatch(&self, call: &ToolCall, cancel: Option<&CancellationToken>) -> ToolResponse {
        let started = Instant::now();

        let response = match ToolKind::from_name(&call.tool_name) {
            Some(kind) => self.run(kind, call, cancel).await,
            None => {
                warn!("Unknown tool requested: {}", call.tool_name);
                ToolResponse::error(TAG_UNKNOWN_TOOL, format!("Unknown tool: {}", call.tool_name))
            }
        };

        let duration_ms = started.elapsed().as_millis() as u64;
        info!(
            "Tool {} finished: {} ({}ms)",
            call.tool_name,
            response.tag(),
            duration_ms
        );
        self.call_logger.log(CallEvent::new(
            "tool_call",
            json!({
                "tool": call.tool_name,
                "args_preview": tool_args_preview(call),
                "outcome": response.tag(),
                "duration_ms": duration_ms,
            }),
        ));

        response
    }

    async fn run(
        &self,
        kind: ToolKind,
        call: &ToolCall,
        cancel: Option<&CancellationToken>,
    ) -> ToolResponse {
        if !kind.launches_process() {
            return self.list_dumps().await;
        }

        let argv = match self.builder.build(kind, call) {
            Ok(argv) => argv,
            Err(e) => {
                warn!("Rejected {} call: {}", kind.name(), e);
                return ToolResponse::error(build_error_tag(&e), e.to_string());
            }
        };

        if !kind.accepts_credentials() && call.credentials().is_some() {
            debug!("{} ignores the supplied credentials", kind.name());
        }

        if kind.requires_artifact() {
            let name = call.get_string("memory_dump").unwrap_or_default();
            if let Err(error) = self.artifacts.resolve(&name).await {
                warn!("Pre-flight failed for {}: {}", kind.name(), error);
                let record = kind.output_format().empty_record();
                return render(kind, call, normalize(Err(error), record, false));
            }
        }

        debug!(
            "Executing {} ({}): {}",
            kind.name(),
            tool_args_preview(call),
            argv.redacted()
        );
        let outcome = self.execute_argv(&argv, cancel).await;

        let record = match &outcome {
            Ok(output) => {
                let record = parse(kind.output_format(), &output.stdout);
                debug!(
                    "{} exited with {:?}, parsed {} record from: {}",
                    argv.program(),
                    output.exit_code,
                    record.shape(),
                    truncate(output.stdout.trim(), 200)
                );
                record
            }
            Err(_) => kind.output_format().empty_record(),
        };
        let result = normalize(outcome, record, kind.keeps_raw_stdout());

        if let NormalizedResult::ToolError { message, .. } = &result {
            warn!("{} reported an error: {}", kind.name(), message);
        } else if let NormalizedResult::InfrastructureError(error) = &result {
            warn!("{} failed ({}): {}", kind.name(), error.kind, error);
        }

        render(kind, call, result)
    }

    async fn execute_argv(
        &self,
        argv: &ArgumentVector,
        cancel: Option<&CancellationToken>,
    ) -> ExecutionOutcome {
        let timeout = self.params.timeout;
        match cancel {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => Err(InfrastructureError::cancelled(argv.program())),
                    outcome = self.executor.execute(argv, timeout) => outcome,
                }
            }
            None => self.executor.execute(argv, timeout).await,
        }
    }

    async fn list_dumps(&self) -> ToolResponse {
        match self.artifacts.list().await {
            Ok(dumps) => {
                debug!(
                    "Found {} memory dumps in {}",
                    dumps.len(),
                    self.artifacts.root().display()
                );
                render_dumps(dumps)
            }
            Err(e) => {
                warn!("{}", e);
                ToolResponse::error(TAG_ARTIFACT_STORE_ERROR, e.to_string())
            }
        }
    }
}

fn build_error_tag(error: &BuildError) -> &'static str {
    match error {
        BuildError::MissingParameter { .. } => TAG_MISSING_PARAMETER,
        BuildError::NoCommand { .. } => "no_command",
    }
}
