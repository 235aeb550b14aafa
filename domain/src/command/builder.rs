//! Argument vector builder: tool call → process arguments.
//!
//! Every tool has a fixed template. Parameter values are substituted
//! verbatim as whole tokens; nothing is quoted, escaped or re-split, since
//! the result is handed straight to the child process without a shell.
//!
//! # Templates
//!
//! | Tool | Arguments after the binary |
//! |------|----------------------------|
//! | `get_all_vms` | `list vms` |
//! | `get_vm_info` | `showvminfo <vm_id> --machinereadable` |
//! | `start_vm` | `startvm <vm_id> --type headless` |
//! | `stop_vm` | `controlvm <vm_id> poweroff` |
//! | `import_vm_from_ova` | `import <ova_path>` |
//! | `extract_memory_dump_from_vm` | `debugvm <vm_id> dumpvmcore --filename=<dump_path>` |
//! | `copy_file_to_vm` | `guestcontrol <vm_id> copyto [creds] <host_path> --target-directory=<vm_path>` |
//! | `execute_command_in_vm` | `guestcontrol <vm_id> run [creds] --exe <exe> -- <exe> -c <command>` |
//! | `run_plugin` | `-f <dumps_dir>/<memory_dump> -r json <plugin_name> [arguments]` |
//! | `list_all_available_plugins` | `--help` |
//!
//! `[creds]` is `--username=<u> --password=<p>`, emitted only when the call
//! carries a complete credential pair. No tool requires credentials; tools
//! outside guest control never emit them.

use std::path::PathBuf;

use super::argv::ArgumentVector;
use crate::core::error::BuildError;
use crate::tool::catalog::ToolKind;
use crate::tool::entities::{Backend, ToolCall};

pub const DEFAULT_VIRTUALBOX_BINARY: &str = "VBoxManage";
pub const DEFAULT_VOLATILITY_BINARY: &str = "volatility";
pub const DEFAULT_DUMPS_DIR: &str = "dumps";

/// Builds argument vectors for one deployment (binary names, dumps directory).
///
/// Pure: no filesystem access and no side effects.
#[derive(Debug, Clone)]
pub struct CommandBuilder {
    virtualbox_binary: String,
    volatility_binary: String,
    dumps_dir: PathBuf,
}

impl Default for CommandBuilder {
    fn default() -> Self {
        Self {
            virtualbox_binary: DEFAULT_VIRTUALBOX_BINARY.to_string(),
            volatility_binary: DEFAULT_VOLATILITY_BINARY.to_string(),
            dumps_dir: PathBuf::from(DEFAULT_DUMPS_DIR),
        }
    }
}

impl CommandBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_virtualbox_binary(mut self, binary: impl Into<String>) -> Self {
        self.virtualbox_binary = binary.into();
        self
    }

    pub fn with_volatility_binary(mut self, binary: impl Into<String>) -> Self {
        self.volatility_binary = binary.into();
        self
    }

    pub fn with_dumps_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dumps_dir = dir.into();
        self
    }

    pub fn binary(&self, backend: Backend) -> &str {
        match backend {
            Backend::VirtualBox => &self.virtualbox_binary,
            Backend::Volatility => &self.volatility_binary,
        }
    }

    pub fn dumps_dir(&self) -> &std::path::Path {
        &self.dumps_dir
    }

    /// Build the argument vector for `kind` from the call's parameters.
    ///
    /// Fails with [`BuildError::MissingParameter`] naming the first absent
    /// required parameter, in template order.
    pub fn build(&self, kind: ToolKind, call: &ToolCall) -> Result<ArgumentVector, BuildError> {
        let args: Vec<String> = match kind {
            ToolKind::GetAllVms => vec!["list".into(), "vms".into()],
            ToolKind::GetVmInfo => {
                let vm_id = call.require_string("vm_id")?;
                vec!["showvminfo".into(), vm_id, "--machinereadable".into()]
            }
            ToolKind::StartVm => {
                let vm_id = call.require_string("vm_id")?;
                vec!["startvm".into(), vm_id, "--type".into(), "headless".into()]
            }
            ToolKind::StopVm => {
                let vm_id = call.require_string("vm_id")?;
                vec!["controlvm".into(), vm_id, "poweroff".into()]
            }
            ToolKind::ImportVmFromOva => {
                let ova_path = call.require_string("ova_path")?;
                vec!["import".into(), ova_path]
            }
            ToolKind::ExtractMemoryDumpFromVm => {
                let vm_id = call.require_string("vm_id")?;
                let dump_path = call.require_string("dump_path")?;
                vec![
                    "debugvm".into(),
                    vm_id,
                    "dumpvmcore".into(),
                    format!("--filename={}", dump_path),
                ]
            }
            ToolKind::CopyFileToVm => {
                let vm_id = call.require_string("vm_id")?;
                let host_path = call.require_string("host_path")?;
                let vm_path = call.require_string("vm_path")?;

                let mut args = vec!["guestcontrol".into(), vm_id, "copyto".into()];
                args.extend(credential_flags(call));
                args.push(host_path);
                args.push(format!("--target-directory={}", vm_path));
                args
            }
            ToolKind::ExecuteCommandInVm => {
                let vm_id = call.require_string("vm_id")?;
                let exe = call.require_string("exe")?;
                let command = call.require_string("command")?;

                let mut args = vec!["guestcontrol".into(), vm_id, "run".into()];
                args.extend(credential_flags(call));
                // After `--` VBoxManage takes argv[0] first, then the real arguments
                args.extend(["--exe".into(), exe.clone(), "--".into(), exe, "-c".into()]);
                args.push(command);
                args
            }
            ToolKind::RunPlugin => {
                let plugin_name = call.require_string("plugin_name")?;
                let memory_dump = call.require_string("memory_dump")?;
                let dump_path = self.dumps_dir.join(&memory_dump);

                let mut args = vec![
                    "-f".into(),
                    dump_path.to_string_lossy().into_owned(),
                    "-r".into(),
                    "json".into(),
                    plugin_name,
                ];
                if let Some(arguments) = call.get_non_empty("arguments") {
                    args.push(arguments);
                }
                args
            }
            ToolKind::ListAllAvailablePlugins => vec!["--help".into()],
            ToolKind::ListMemoryDumps => {
                return Err(BuildError::NoCommand {
                    tool: kind.name().to_string(),
                });
            }
        };

        Ok(ArgumentVector::new(self.binary(kind.backend()), args))
    }
}

fn credential_flags(call: &ToolCall) -> Vec<String> {
    match call.credentials() {
        Some(credentials) => vec![
            format!("--username={}", credentials.username),
            format!("--password={}", credentials.password),
        ],
        None => Vec::new(),
    }
}
