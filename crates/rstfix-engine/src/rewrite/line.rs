use regex::Regex;
use std::sync::OnceLock;

use crate::document::TERMINATOR;

/// Append a terminator if the line has none.
pub fn ensure_terminator(mut line: String) -> String {
    if !line.ends_with(TERMINATOR) {
        line.push(TERMINATOR);
    }
    line
}

/// Count of leading whitespace characters, or zero unless the line starts with a space.
pub fn indentation(line: &str) -> usize {
    if !line.starts_with(' ') {
        return 0;
    }
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Collapse whitespace runs to single spaces, keeping the leading indentation.
///
/// Expects a line body without its terminator.
pub fn normalize_interior_spacing(body: &str) -> String {
    static WHITESPACE: OnceLock<Regex> = OnceLock::new();
    let whitespace =
        WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

    let indent = indentation(body);
    let rest = body.trim_start();
    format!("{}{}", " ".repeat(indent), whitespace.replace_all(rest, " "))
}

/// Re-indent `body` to the previous line's indentation when that line is indented.
///
/// The re-indented text is trimmed on both sides first.
pub fn match_previous_indentation(body: &str, previous: Option<&str>) -> String {
    match previous {
        Some(prev) if prev.starts_with(' ') => {
            let prev_body = prev.trim_end_matches(TERMINATOR);
            format!("{}{}", " ".repeat(indentation(prev_body)), body.trim())
        }
        _ => body.to_string(),
    }
}
