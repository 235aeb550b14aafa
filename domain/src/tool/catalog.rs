//! The fixed, enumerated set of tools and their contracts.
//!
//! | Tool | Backend | Output format | Success shape |
//! |------|---------|---------------|---------------|
//! | `get_all_vms` | VirtualBox | quoted-name listing | `[{name, id}]` |
//! | `get_vm_info` | VirtualBox | key/value block | field map |
//! | `start_vm`, `stop_vm`, `import_vm_from_ova`, `extract_memory_dump_from_vm`, `copy_file_to_vm` | VirtualBox | opaque | `{message}` |
//! | `execute_command_in_vm` | VirtualBox | opaque | `{message, output}` |
//! | `run_plugin` | Volatility | opaque | `{output}` |
//! | `list_all_available_plugins` | Volatility | plugin help | `{plugins: [{name, description}]}` |
//! | `list_memory_dumps` | Volatility | (no process) | `{dumps}` |

use super::entities::{Backend, ToolDefinition, ToolParameter, ToolSpec};
use crate::output::parser::OutputFormat;

pub const GET_ALL_VMS: &str = "get_all_vms";
pub const GET_VM_INFO: &str = "get_vm_info";
pub const START_VM: &str = "start_vm";
pub const STOP_VM: &str = "stop_vm";
pub const IMPORT_VM_FROM_OVA: &str = "import_vm_from_ova";
pub const EXTRACT_MEMORY_DUMP_FROM_VM: &str = "extract_memory_dump_from_vm";
pub const COPY_FILE_TO_VM: &str = "copy_file_to_vm";
pub const EXECUTE_COMMAND_IN_VM: &str = "execute_command_in_vm";
pub const RUN_PLUGIN: &str = "run_plugin";
pub const LIST_MEMORY_DUMPS: &str = "list_memory_dumps";
pub const LIST_ALL_AVAILABLE_PLUGINS: &str = "list_all_available_plugins";

/// Every tool this layer knows how to translate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    GetAllVms,
    GetVmInfo,
    StartVm,
    StopVm,
    ImportVmFromOva,
    ExtractMemoryDumpFromVm,
    CopyFileToVm,
    ExecuteCommandInVm,
    RunPlugin,
    ListMemoryDumps,
    ListAllAvailablePlugins,
}

impl ToolKind {
    pub const ALL: [ToolKind; 11] = [
        ToolKind::GetAllVms,
        ToolKind::GetVmInfo,
        ToolKind::StartVm,
        ToolKind::StopVm,
        ToolKind::ImportVmFromOva,
        ToolKind::ExtractMemoryDumpFromVm,
        ToolKind::CopyFileToVm,
        ToolKind::ExecuteCommandInVm,
        ToolKind::RunPlugin,
        ToolKind::ListMemoryDumps,
        ToolKind::ListAllAvailablePlugins,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::GetAllVms => GET_ALL_VMS,
            ToolKind::GetVmInfo => GET_VM_INFO,
            ToolKind::StartVm => START_VM,
            ToolKind::StopVm => STOP_VM,
            ToolKind::ImportVmFromOva => IMPORT_VM_FROM_OVA,
            ToolKind::ExtractMemoryDumpFromVm => EXTRACT_MEMORY_DUMP_FROM_VM,
            ToolKind::CopyFileToVm => COPY_FILE_TO_VM,
            ToolKind::ExecuteCommandInVm => EXECUTE_COMMAND_IN_VM,
            ToolKind::RunPlugin => RUN_PLUGIN,
            ToolKind::ListMemoryDumps => LIST_MEMORY_DUMPS,
            ToolKind::ListAllAvailablePlugins => LIST_ALL_AVAILABLE_PLUGINS,
        }
    }

    pub fn backend(&self) -> Backend {
        match self {
            ToolKind::RunPlugin | ToolKind::ListMemoryDumps | ToolKind::ListAllAvailablePlugins => {
                Backend::Volatility
            }
            _ => Backend::VirtualBox,
        }
    }

    /// Which parser the tool's stdout goes through
    pub fn output_format(&self) -> OutputFormat {
        match self {
            ToolKind::GetAllVms => OutputFormat::QuotedNameListing,
            ToolKind::GetVmInfo => OutputFormat::KeyValueBlock,
            ToolKind::ListAllAvailablePlugins => OutputFormat::PluginHelp,
            _ => OutputFormat::Opaque,
        }
    }

    /// Whether the success response carries the verbatim stdout as well
    pub fn keeps_raw_stdout(&self) -> bool {
        matches!(self, ToolKind::ExecuteCommandInVm)
    }

    /// Whether the tool spawns the backend CLI at all
    pub fn launches_process(&self) -> bool {
        !matches!(self, ToolKind::ListMemoryDumps)
    }

    /// Whether the tool reads a memory dump that must exist before launch
    pub fn requires_artifact(&self) -> bool {
        matches!(self, ToolKind::RunPlugin)
    }

    /// Guest-control tools accept (but do not require) credentials
    pub fn accepts_credentials(&self) -> bool {
        matches!(self, ToolKind::CopyFileToVm | ToolKind::ExecuteCommandInVm)
    }

    pub fn definition(&self) -> ToolDefinition {
        let vm_id = || ToolParameter::new("vm_id", "VM name or UUID", true);
        let credentials = || {
            ToolParameter::new(
                "credentials",
                "Guest account {username, password}",
                false,
            )
            .with_type("credentials")
        };

        match self {
            ToolKind::GetAllVms => ToolDefinition::new(
                GET_ALL_VMS,
                "List all registered VirtualBox VMs",
                Backend::VirtualBox,
            ),
            ToolKind::GetVmInfo => ToolDefinition::new(
                GET_VM_INFO,
                "Show machine-readable information about a VM",
                Backend::VirtualBox,
            )
            .with_parameter(vm_id()),
            ToolKind::StartVm => ToolDefinition::new(
                START_VM,
                "Start a VM headless",
                Backend::VirtualBox,
            )
            .with_parameter(vm_id()),
            ToolKind::StopVm => ToolDefinition::new(
                STOP_VM,
                "Power off a running VM",
                Backend::VirtualBox,
            )
            .with_parameter(vm_id()),
            ToolKind::ImportVmFromOva => ToolDefinition::new(
                IMPORT_VM_FROM_OVA,
                "Import a VM from an OVA appliance",
                Backend::VirtualBox,
            )
            .with_parameter(
                ToolParameter::new("ova_path", "Path to the OVA file", true).with_type("path"),
            ),
            ToolKind::ExtractMemoryDumpFromVm => ToolDefinition::new(
                EXTRACT_MEMORY_DUMP_FROM_VM,
                "Write a core dump of a running VM's memory",
                Backend::VirtualBox,
            )
            .with_parameter(vm_id())
            .with_parameter(
                ToolParameter::new("dump_path", "Where to save the dump on the host", true)
                    .with_type("path"),
            ),
            ToolKind::CopyFileToVm => ToolDefinition::new(
                COPY_FILE_TO_VM,
                "Copy a host file into a guest directory",
                Backend::VirtualBox,
            )
            .with_parameter(vm_id())
            .with_parameter(
                ToolParameter::new("host_path", "Source file on the host", true).with_type("path"),
            )
            .with_parameter(
                ToolParameter::new("vm_path", "Target directory in the guest", true)
                    .with_type("path"),
            )
            .with_parameter(credentials()),
            ToolKind::ExecuteCommandInVm => ToolDefinition::new(
                EXECUTE_COMMAND_IN_VM,
                "Run a command line inside the guest through an interpreter",
                Backend::VirtualBox,
            )
            .with_parameter(vm_id())
            .with_parameter(
                ToolParameter::new("exe", "Interpreter path in the guest (e.g. /bin/sh)", true)
                    .with_type("path"),
            )
            .with_parameter(ToolParameter::new(
                "command",
                "Command line passed to the interpreter's -c",
                true,
            ))
            .with_parameter(credentials()),
            ToolKind::RunPlugin => ToolDefinition::new(
                RUN_PLUGIN,
                "Run a Volatility plugin against a memory dump (JSON renderer)",
                Backend::Volatility,
            )
            .with_parameter(ToolParameter::new(
                "plugin_name",
                "Plugin name, e.g. windows.pslist.PsList",
                true,
            ))
            .with_parameter(
                ToolParameter::new("memory_dump", "Dump file name in the dumps directory", true)
                    .with_type("path"),
            )
            .with_parameter(ToolParameter::new(
                "arguments",
                "Extra plugin argument, passed as one token",
                false,
            )),
            ToolKind::ListMemoryDumps => ToolDefinition::new(
                LIST_MEMORY_DUMPS,
                "List memory dumps available for analysis",
                Backend::Volatility,
            ),
            ToolKind::ListAllAvailablePlugins => ToolDefinition::new(
                LIST_ALL_AVAILABLE_PLUGINS,
                "List every Volatility plugin with its description",
                Backend::Volatility,
            ),
        }
    }
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Tool specification with every tool in the catalogue
pub fn default_tool_spec() -> ToolSpec {
    ToolKind::ALL
        .iter()
        .fold(ToolSpec::new(), |spec, kind| spec.register(kind.definition()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for kind in ToolKind::ALL {
            assert_eq!(ToolKind::from_name(kind.name()), Some(kind));
        }
        assert!(ToolKind::from_name("delete_vm").is_none());
    }

    #[test]
    fn test_default_spec_contains_every_tool() {
        let spec = default_tool_spec();
        assert_eq!(spec.len(), ToolKind::ALL.len());
        assert_eq!(spec.for_backend(Backend::Volatility).count(), 3);
    }

    #[test]
    fn test_output_format_selected_by_tool() {
        assert_eq!(
            ToolKind::GetAllVms.output_format(),
            OutputFormat::QuotedNameListing
        );
        assert_eq!(ToolKind::GetVmInfo.output_format(), OutputFormat::KeyValueBlock);
        assert_eq!(ToolKind::RunPlugin.output_format(), OutputFormat::Opaque);
        assert_eq!(
            ToolKind::ListAllAvailablePlugins.output_format(),
            OutputFormat::PluginHelp
        );
    }

    #[test]
    fn test_contract_flags() {
        assert!(ToolKind::ExecuteCommandInVm.keeps_raw_stdout());
        assert!(!ToolKind::StartVm.keeps_raw_stdout());
        assert!(!ToolKind::ListMemoryDumps.launches_process());
        assert!(ToolKind::RunPlugin.requires_artifact());
        assert!(ToolKind::CopyFileToVm.accepts_credentials());
        assert!(!ToolKind::GetVmInfo.accepts_credentials());
    }

    #[test]
    fn test_definitions_list_required_parameters() {
        let required: Vec<String> = ToolKind::CopyFileToVm
            .definition()
            .required_parameters()
            .map(|p| p.name.clone())
            .collect();
        assert_eq!(required, vec!["vm_id", "host_path", "vm_path"]);
    }
}
