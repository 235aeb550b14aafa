//! String helpers shared by the output layers.

/// Shorten captured process output for diagnostics (UTF-8 safe).
///
/// `max_len` is a byte budget; the cut lands on the nearest character
/// boundary at or below it and is marked with a trailing `...`.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len.saturating_sub(3).min(s.len());
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &s[..end])
}

/// Strip exactly one layer of surrounding double quotes, if both are present.
pub fn strip_outer_quotes(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_input_untouched() {
        assert_eq!(truncate("running", 32), "running");
    }

    #[test]
    fn test_truncate_long_input() {
        assert_eq!(truncate("0%...10%...20%...30%", 10), "0%...10...");
    }

    #[test]
    fn test_truncate_respects_char_boundary() {
        // "é" is two bytes; a target of 3 falls inside the second one
        assert_eq!(truncate("éééé", 6), "é...");
        assert_eq!(truncate("éééé", 7), "éé...");
        assert_eq!(truncate("éééé", 8), "éééé");
    }

    #[test]
    fn test_strip_outer_quotes() {
        assert_eq!(strip_outer_quotes("\"My VM\""), "My VM");
        assert_eq!(strip_outer_quotes("\"\"nested\"\""), "\"nested\"");
        assert_eq!(strip_outer_quotes("plain"), "plain");
        assert_eq!(strip_outer_quotes("\"unbalanced"), "\"unbalanced");
        assert_eq!(strip_outer_quotes("\""), "\"");
    }
}
