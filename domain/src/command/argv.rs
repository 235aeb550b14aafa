//! Argument vectors handed to the process executor.

use serde::Serialize;

/// Flags whose value must never appear in logs
const SECRET_FLAGS: &[&str] = &["--password="];

/// Ordered process arguments; the first token is the binary.
///
/// Built fresh per call and never mutated afterwards. The tokens are passed
/// to the child as-is, without a shell in between.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArgumentVector {
    tokens: Vec<String>,
}

impl ArgumentVector {
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = String>) -> Self {
        let mut tokens = vec![program.into()];
        tokens.extend(args);
        Self { tokens }
    }

    pub fn program(&self) -> &str {
        &self.tokens[0]
    }

    pub fn args(&self) -> &[String] {
        &self.tokens[1..]
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Space-joined rendering for logs, with secret flag values masked
    pub fn redacted(&self) -> String {
        self.tokens
            .iter()
            .map(|token| {
                match SECRET_FLAGS.iter().find(|flag| token.starts_with(*flag)) {
                    Some(flag) => format!("{}***", flag),
                    None => token.clone(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_program_and_args() {
        let argv = ArgumentVector::new("VBoxManage", ["list".to_string(), "vms".to_string()]);
        assert_eq!(argv.program(), "VBoxManage");
        assert_eq!(argv.args(), ["list", "vms"]);
        assert_eq!(argv.tokens().len(), 3);
    }

    #[test]
    fn test_no_args() {
        let argv = ArgumentVector::new("volatility", Vec::new());
        assert!(argv.args().is_empty());
    }

    #[test]
    fn test_redacted_masks_password() {
        let argv = ArgumentVector::new(
            "VBoxManage",
            [
                "guestcontrol".to_string(),
                "--username=analyst".to_string(),
                "--password=hunter2".to_string(),
            ],
        );
        let rendered = argv.redacted();
        assert_eq!(
            rendered,
            "VBoxManage guestcontrol --username=analyst --password=***"
        );
    }
}
