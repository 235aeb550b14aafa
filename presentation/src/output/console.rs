//! Console output for the tool catalogue

use colored::Colorize;
use vmscope_domain::{Backend, ToolDefinition, ToolSpec};

/// One row of the backend availability table
#[derive(Debug, Clone)]
pub struct BackendRow {
    pub backend: Backend,
    pub binary: String,
    /// Where the binary was found, `None` if it was not
    pub location: Option<String>,
}

/// Formats the tool catalogue for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Backends first, then every tool grouped by backend
    pub fn format_tools(spec: &ToolSpec, backends: &[BackendRow]) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("vmscope tools"));
        output.push('\n');

        if !backends.is_empty() {
            output.push_str(&Self::section_header("Backends"));
            for row in backends {
                output.push_str(&Self::format_backend(row));
                output.push('\n');
            }
        }

        for backend in [Backend::VirtualBox, Backend::Volatility] {
            let tools: Vec<&ToolDefinition> = spec.for_backend(backend).collect();
            if tools.is_empty() {
                continue;
            }
            output.push_str(&Self::section_header(&format!("{} tools", backend)));
            for tool in tools {
                output.push_str(&Self::format_tool(tool));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    fn format_backend(row: &BackendRow) -> String {
        match &row.location {
            Some(location) => format!(
                "  {} {:<11} {:<12} {}",
                "✓".green(),
                row.backend.as_str(),
                row.binary,
                location.dimmed()
            ),
            None => format!(
                "  {} {:<11} {:<12} {}",
                "✗".red(),
                row.backend.as_str(),
                row.binary,
                "(not found on PATH)".red()
            ),
        }
    }

    fn format_tool(tool: &ToolDefinition) -> String {
        let mut output = format!("\n  {}\n", tool.name.yellow().bold());
        output.push_str(&Self::indent(&tool.description, "    "));
        output.push('\n');

        for param in &tool.parameters {
            let marker = if param.required {
                "required".red().to_string()
            } else {
                "optional".dimmed().to_string()
            };
            output.push_str(&format!(
                "    - {} ({}, {}): {}\n",
                param.name.cyan(),
                param.param_type,
                marker,
                param.description
            ));
        }
        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vmscope_domain::default_tool_spec;

    #[test]
    fn test_format_tools_lists_every_tool() {
        colored::control::set_override(false);
        let spec = default_tool_spec();
        let rows = vec![
            BackendRow {
                backend: Backend::VirtualBox,
                binary: "VBoxManage".to_string(),
                location: Some("/usr/bin/VBoxManage".to_string()),
            },
            BackendRow {
                backend: Backend::Volatility,
                binary: "volatility".to_string(),
                location: None,
            },
        ];

        let text = ConsoleFormatter::format_tools(&spec, &rows);
        for name in spec.names() {
            assert!(text.contains(name), "missing {}", name);
        }
        assert!(text.contains("/usr/bin/VBoxManage"));
        assert!(text.contains("(not found on PATH)"));
        assert!(text.contains("vm_id"));
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "  "), "  a\n  b");
    }
}
