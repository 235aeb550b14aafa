//! Process executor backed by `tokio::process`.
//!
//! One child per call. Both output channels are drained concurrently with
//! the wait, so a chatty child never blocks on a full pipe. The child is
//! killed on timeout and whenever the execution future is dropped.

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::{debug, warn};
use vmscope_application::ProcessExecutorPort;
use vmscope_domain::{
    ArgumentVector, ExecutionOutcome, InfrastructureError, InfrastructureErrorKind, ProcessOutput,
};

/// Executor that spawns the argument vector directly, without a shell.
#[derive(Debug, Clone, Default)]
pub struct TokioProcessExecutor;

impl TokioProcessExecutor {
    pub fn new() -> Self {
        Self
    }

    fn command(argv: &ArgumentVector) -> Command {
        let mut cmd = Command::new(argv.program());
        cmd.args(argv.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        // Linux: request kernel to send SIGTERM to child when parent dies.
        // This catches cases where Drop doesn't run (SIGKILL, OOM kill).
        #[cfg(target_os = "linux")]
        unsafe {
            cmd.pre_exec(|| {
                libc::prctl(libc::PR_SET_PDEATHSIG, libc::SIGTERM);
                Ok(())
            });
        }

        cmd
    }
}

#[async_trait]
impl ProcessExecutorPort for TokioProcessExecutor {
    async fn execute(&self, argv: &ArgumentVector, timeout: Duration) -> ExecutionOutcome {
        let program = argv.program();
        let mut child = Self::command(argv)
            .spawn()
            .map_err(|e| InfrastructureError::launch_failed(program, e))?;
        debug!("Spawned {} (pid {:?})", program, child.id());

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let collected = tokio::time::timeout(timeout, async {
            tokio::try_join!(read_to_end(stdout), read_to_end(stderr), child.wait())
        })
        .await;

        match collected {
            Ok(Ok((stdout, stderr, status))) => Ok(ProcessOutput::new(
                status.code(),
                String::from_utf8_lossy(&stdout),
                String::from_utf8_lossy(&stderr),
            )),
            Ok(Err(e)) => {
                let _ = child.kill().await;
                Err(InfrastructureError::new(
                    InfrastructureErrorKind::LaunchFailed,
                    format!("Failed to collect output from {}: {}", program, e),
                ))
            }
            Err(_) => {
                warn!("{} exceeded {:?}, killing it", program, timeout);
                let _ = child.kill().await;
                Err(InfrastructureError::timeout(program, timeout))
            }
        }
    }
}

async fn read_to_end<R: AsyncRead + Unpin>(reader: Option<R>) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    if let Some(mut reader) = reader {
        reader.read_to_end(&mut buf).await?;
    }
    Ok(buf)
}
