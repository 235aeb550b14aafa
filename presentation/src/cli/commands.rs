//! CLI command definitions

use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;
use vmscope_domain::{Credentials, ToolCall};

/// CLI arguments for vmscope
#[derive(Parser, Debug)]
#[command(name = "vmscope")]
#[command(author, version, about = "VirtualBox and Volatility 3 as JSON tool calls")]
#[command(long_about = r#"
vmscope turns named tool calls into VBoxManage and Volatility 3 invocations
and returns normalized JSON results.

Every call is built into an argument vector (never a shell string), run with
a timeout, and its stdout/stderr are folded into one of:
  success        tool-specific JSON (listing, field map, message, output)
  failure        {"error": "..."}

Configuration files are loaded from (in priority order):
1. VMSCOPE_* environment variables (VMSCOPE_EXECUTION__TIMEOUT_SECS=30)
2. --config <path>     Explicit config file
3. ./vmscope.toml      Project-level config
4. ~/.config/vmscope/config.toml   Global config

Example:
  vmscope tools
  vmscope call get_all_vms
  vmscope call get_vm_info -p vm_id=kali
  vmscope call run_plugin -p plugin_name=windows.pslist -p memory_dump=win10.vmem
  echo '{"tool":"list_memory_dumps"}' | vmscope serve
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration sources and the effective configuration, then exit
    #[arg(long)]
    pub show_config: bool,

    /// Pretty-print JSON responses (`call` only; `serve` always writes one line per response)
    #[arg(long, global = true)]
    pub pretty: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the tool catalogue and whether the backend binaries are installed
    Tools,
    /// Dispatch a single tool call and print its JSON response
    Call(CallArgs),
    /// Read newline-delimited JSON requests from stdin and answer on stdout
    Serve,
}

/// Arguments of `vmscope call`
#[derive(Args, Debug)]
pub struct CallArgs {
    /// Tool name (see `vmscope tools`)
    pub tool: String,

    /// Tool parameter, repeatable
    #[arg(short = 'p', long = "param", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,

    /// All parameters as one JSON object; `-p` values override its keys
    #[arg(long, value_name = "JSON")]
    pub args: Option<String>,

    /// Guest user for guest-control tools
    #[arg(long, requires = "password")]
    pub username: Option<String>,

    /// Guest password for guest-control tools
    #[arg(long, requires = "username")]
    pub password: Option<String>,
}

/// Errors turning command-line arguments into a tool call
#[derive(Error, Debug)]
pub enum CallArgsError {
    #[error("--args is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("--args must be a JSON object")]
    NotAnObject,
}

impl CallArgs {
    /// Assemble the call: `--args` first, then `-p` pairs, then credentials.
    pub fn to_tool_call(&self) -> Result<ToolCall, CallArgsError> {
        let mut call = ToolCall::new(&self.tool);

        if let Some(raw) = &self.args {
            match serde_json::from_str::<Value>(raw)? {
                Value::Object(map) => call.arguments.extend(map),
                _ => return Err(CallArgsError::NotAnObject),
            }
        }

        for (key, value) in &self.params {
            call = call.with_arg(key, value.as_str());
        }

        if let (Some(username), Some(password)) = (&self.username, &self.password) {
            call = call.with_credentials(Credentials::new(username, password));
        }

        Ok(call)
    }
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{}'", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call_args(argv: &[&str]) -> CallArgs {
        let cli = Cli::try_parse_from(argv).unwrap();
        match cli.command {
            Some(Command::Call(args)) => args,
            other => panic!("expected call subcommand, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_tools() {
        let cli = Cli::try_parse_from(["vmscope", "-vv", "tools"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Tools)));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_parse_serve_with_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["vmscope", "serve", "--config", "lab.toml"]).unwrap();
        assert!(matches!(cli.command, Some(Command::Serve)));
        assert_eq!(cli.config, Some(PathBuf::from("lab.toml")));
    }

    #[test]
    fn test_show_config_without_subcommand() {
        let cli = Cli::try_parse_from(["vmscope", "--show-config"]).unwrap();
        assert!(cli.show_config);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_call_params_to_tool_call() {
        let args = call_args(&[
            "vmscope",
            "call",
            "execute_command_in_vm",
            "-p",
            "vm_id=kali",
            "--param",
            "command=ls -la /tmp",
            "-p",
            "exe=/bin/sh",
        ]);
        let call = args.to_tool_call().unwrap();
        assert_eq!(call.tool_name, "execute_command_in_vm");
        assert_eq!(call.get_string("command").as_deref(), Some("ls -la /tmp"));
        assert!(call.credentials().is_none());
    }

    #[test]
    fn test_value_may_contain_equals() {
        let args = call_args(&["vmscope", "call", "run_plugin", "-p", "arguments=--pid=4"]);
        assert_eq!(args.params, vec![("arguments".to_string(), "--pid=4".to_string())]);
    }

    #[test]
    fn test_param_without_equals_rejected() {
        assert!(Cli::try_parse_from(["vmscope", "call", "start_vm", "-p", "kali"]).is_err());
        assert!(Cli::try_parse_from(["vmscope", "call", "start_vm", "-p", "=kali"]).is_err());
    }

    #[test]
    fn test_json_args_overridden_by_params() {
        let args = call_args(&[
            "vmscope",
            "call",
            "copy_file_to_vm",
            "--args",
            r#"{"vm_id": "old", "host_path": "/srv/a.exe"}"#,
            "-p",
            "vm_id=new",
        ]);
        let call = args.to_tool_call().unwrap();
        assert_eq!(call.get_string("vm_id").as_deref(), Some("new"));
        assert_eq!(call.get_string("host_path").as_deref(), Some("/srv/a.exe"));
    }

    #[test]
    fn test_json_args_must_be_object() {
        let args = call_args(&["vmscope", "call", "start_vm", "--args", "[1, 2]"]);
        assert!(matches!(args.to_tool_call(), Err(CallArgsError::NotAnObject)));

        let args = call_args(&["vmscope", "call", "start_vm", "--args", "{oops"]);
        assert!(matches!(args.to_tool_call(), Err(CallArgsError::InvalidJson(_))));
    }

    #[test]
    fn test_credentials_attached() {
        let args = call_args(&[
            "vmscope",
            "call",
            "copy_file_to_vm",
            "--username",
            "analyst",
            "--password",
            "hunter2",
        ]);
        let credentials = args.to_tool_call().unwrap().credentials().unwrap();
        assert_eq!(credentials.username, "analyst");
        assert_eq!(credentials.password, "hunter2");
    }

    #[test]
    fn test_username_requires_password() {
        assert!(
            Cli::try_parse_from(["vmscope", "call", "copy_file_to_vm", "--username", "analyst"])
                .is_err()
        );
    }
}
