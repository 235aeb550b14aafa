//! Result normalizer: execution outcome + parsed record → [`NormalizedResult`].
//!
//! Decision order, first match wins:
//!
//! | # | Condition | Result |
//! |---|-----------|--------|
//! | 1 | outcome is an infrastructure failure | `InfrastructureError`, message unchanged |
//! | 2 | stderr is non-empty (any exit code) | `ToolError(trimmed stderr)` |
//! | 3 | non-zero exit or killed by signal | `ToolError("Process exited with status N")` |
//! | 4 | otherwise | `Success(record)` |
//!
//! Rule 2 treats warnings on stderr as failures even on exit 0. Tools driven
//! here write real errors there, and the policy is applied uniformly.

use crate::tool::value_objects::{ExecutionOutcome, NormalizedResult, ParsedRecord};

/// Collapse one call's outcome into the tagged result.
///
/// `keep_raw_stdout` attaches the verbatim stdout to a success for tools
/// whose contract asks for it. Tool errors always carry stdout when there
/// is any, since partial progress output often accompanies a failure.
pub fn normalize(
    outcome: ExecutionOutcome,
    record: ParsedRecord,
    keep_raw_stdout: bool,
) -> NormalizedResult {
    let output = match outcome {
        Ok(output) => output,
        Err(error) => return NormalizedResult::InfrastructureError(error),
    };

    let stdout = non_blank(output.stdout);
    let stderr = output.stderr.trim();

    if !stderr.is_empty() {
        return NormalizedResult::ToolError {
            message: stderr.to_string(),
            raw_stdout: stdout,
        };
    }

    match output.exit_code {
        Some(0) => NormalizedResult::Success {
            record,
            raw_stdout: if keep_raw_stdout { stdout } else { None },
        },
        Some(code) => NormalizedResult::ToolError {
            message: format!("Process exited with status {}", code),
            raw_stdout: stdout,
        },
        None => NormalizedResult::ToolError {
            message: "Process terminated by signal".to_string(),
            raw_stdout: stdout,
        },
    }
}

fn non_blank(text: String) -> Option<String> {
    if text.trim().is_empty() { None } else { Some(text) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::parser::{OutputFormat, parse};
    use crate::tool::value_objects::{
        InfrastructureError, InfrastructureErrorKind, ListEntry, ProcessOutput,
    };

    fn opaque(text: &str) -> ParsedRecord {
        ParsedRecord::Opaque(text.to_string())
    }

    #[test]
    fn test_stderr_on_zero_exit_is_tool_error() {
        let outcome = Ok(ProcessOutput::new(Some(0), "ok", "warning: foo"));
        let result = normalize(outcome, opaque("ok"), false);
        assert_eq!(
            result,
            NormalizedResult::ToolError {
                message: "warning: foo".to_string(),
                raw_stdout: Some("ok".to_string()),
            }
        );
    }

    #[test]
    fn test_stderr_is_trimmed_and_empty_stdout_dropped() {
        let outcome = Ok(ProcessOutput::new(
            Some(1),
            "  \n",
            "VBoxManage: error: Could not find a registered machine named 'x'\n",
        ));
        let result = normalize(outcome, opaque(""), false);
        assert_eq!(
            result,
            NormalizedResult::ToolError {
                message: "VBoxManage: error: Could not find a registered machine named 'x'"
                    .to_string(),
                raw_stdout: None,
            }
        );
    }

    #[test]
    fn test_launch_failure_passes_message_through() {
        let error = InfrastructureError::new(
            InfrastructureErrorKind::LaunchFailed,
            "Failed to launch VBoxManage: No such file or directory (os error 2)",
        );
        let record = ParsedRecord::List(vec![ListEntry::new("ignored", "{x}")]);
        let result = normalize(Err(error.clone()), record, true);
        assert_eq!(result, NormalizedResult::InfrastructureError(error));
    }

    #[test]
    fn test_non_zero_exit_without_stderr() {
        let outcome = Ok(ProcessOutput::new(Some(3), "", ""));
        let result = normalize(outcome, opaque(""), false);
        assert_eq!(result.error_message(), Some("Process exited with status 3"));
    }

    #[test]
    fn test_signal_without_stderr() {
        let outcome = Ok(ProcessOutput::new(None, "partial", ""));
        let result = normalize(outcome, opaque("partial"), false);
        assert_eq!(
            result,
            NormalizedResult::ToolError {
                message: "Process terminated by signal".to_string(),
                raw_stdout: Some("partial".to_string()),
            }
        );
    }

    #[test]
    fn test_success_with_and_without_raw_stdout() {
        let stdout = "\"box1\" {uuid-a}\n";
        let record = parse(OutputFormat::QuotedNameListing, stdout);

        let plain = normalize(
            Ok(ProcessOutput::new(Some(0), stdout, "")),
            record.clone(),
            false,
        );
        assert_eq!(
            plain,
            NormalizedResult::Success {
                record: record.clone(),
                raw_stdout: None,
            }
        );

        let with_raw = normalize(Ok(ProcessOutput::new(Some(0), stdout, "")), record, true);
        match with_raw {
            NormalizedResult::Success { raw_stdout, .. } => {
                assert_eq!(raw_stdout.as_deref(), Some(stdout));
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[test]
    fn test_whitespace_only_stderr_is_not_an_error() {
        let outcome = Ok(ProcessOutput::new(Some(0), "done", "\n  \n"));
        assert!(normalize(outcome, opaque("done"), false).is_success());
    }
}
