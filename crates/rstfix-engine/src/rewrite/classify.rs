/// Prefix of a legacy literal line: a line-block pipe followed by an
/// opening inline-literal.
pub const PIPE_LITERAL: &str = "| ``";
/// Prefix of a legacy line carrying the `:literal:` role.
pub const PIPE_LITERAL_ROLE: &str = "| :literal:";

/// Literal marker found at column 0 of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralMarker {
    /// `| ``text```
    PipeBacktick,
    /// `| :literal:text`
    LiteralRole,
}

impl LiteralMarker {
    pub fn prefix(self) -> &'static str {
        match self {
            LiteralMarker::PipeBacktick => PIPE_LITERAL,
            LiteralMarker::LiteralRole => PIPE_LITERAL_ROLE,
        }
    }

    /// Detect a marker at the very start of the line. Indented lines never match.
    pub fn detect(line: &str) -> Option<Self> {
        if line.starts_with(PIPE_LITERAL) {
            Some(LiteralMarker::PipeBacktick)
        } else if line.starts_with(PIPE_LITERAL_ROLE) {
            Some(LiteralMarker::LiteralRole)
        } else {
            None
        }
    }
}

/// Classification of a single line containing only local facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineClass {
    /// Whitespace only, terminator included.
    pub is_blank: bool,
    /// Part of an ASCII-art table; never rewritten.
    pub is_table: bool,
    pub marker: Option<LiteralMarker>,
}

impl LineClass {
    pub fn of(line: &str) -> Self {
        LineClass {
            is_blank: is_blank(line),
            is_table: is_table_line(line),
            marker: LiteralMarker::detect(line),
        }
    }
}

/// Line text without its terminator.
pub fn body(line: &str) -> &str {
    line.strip_suffix('\n').unwrap_or(line)
}

pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Table guard.
///
/// A table row starts with `+` or `|` once trimmed and ends with the same
/// border character right before its terminator. A lone border character
/// is not a row.
pub fn is_table_line(line: &str) -> bool {
    let body = body(line);
    let trimmed = body.trim();
    if trimmed.len() < 2 {
        return false;
    }
    ['+', '|']
        .into_iter()
        .any(|border| trimmed.starts_with(border) && body.ends_with(border))
}

/// `...` or `....` standing alone on a line.
pub fn is_continuation_marker(line: &str) -> bool {
    matches!(line.trim(), "..." | "....")
}

/// A line that is exactly `|` with no terminator.
pub fn is_bare_pipe(line: &str) -> bool {
    line == "|"
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("+------+-------+\n")]
    #[case("| cell | other |\n")]
    #[case("   +===+===+\n")]
    #[case("| ``literal`` in a cell |\n")]
    #[case("+---+")]
    fn recognizes_table_lines(#[case] line: &str) {
        assert!(is_table_line(line));
    }

    #[rstest]
    #[case("| ``code``\n")]
    #[case("+ list item\n")]
    #[case("| cell |  \n")]
    #[case("|\n")]
    #[case("|")]
    #[case("plain text\n")]
    fn rejects_non_table_lines(#[case] line: &str) {
        assert!(!is_table_line(line));
    }

    #[test]
    fn detects_markers_only_at_column_zero() {
        assert_eq!(
            LiteralMarker::detect("| ``ls -l``\n"),
            Some(LiteralMarker::PipeBacktick)
        );
        assert_eq!(
            LiteralMarker::detect("| :literal:`x`\n"),
            Some(LiteralMarker::LiteralRole)
        );
        assert_eq!(LiteralMarker::detect("  | ``ls``\n"), None);
    }

    #[test]
    fn classifies_blank_lines() {
        let class = LineClass::of("   \n");
        assert!(class.is_blank);
        assert!(!class.is_table);
        assert_eq!(class.marker, None);
    }

    #[test]
    fn continuation_markers() {
        assert!(is_continuation_marker("...\n"));
        assert!(is_continuation_marker("  ....\n"));
        assert!(!is_continuation_marker(".....\n"));
        assert!(!is_continuation_marker("... more\n"));
    }

    #[test]
    fn bare_pipe_is_exact() {
        assert!(is_bare_pipe("|"));
        assert!(!is_bare_pipe("|\n"));
        assert!(!is_bare_pipe("| \n"));
    }
}
