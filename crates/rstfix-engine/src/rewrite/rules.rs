//! Single-line rewrite rules.
//!
//! Every rule is a [`Trigger`] plus an ordered list of [`Edit`]s. The
//! dispatcher in [`Rule::apply`] owns the table guard and the terminator
//! fix-up so individual rules only describe their pattern.

use super::classify::{body, is_continuation_marker, is_table_line};
use super::line::{ensure_terminator, match_previous_indentation, normalize_interior_spacing};

/// What a line must look like for a rule to fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Starts with `start` after leading whitespace, and ends with `end`
    /// followed by a terminator.
    Wrapped {
        start: &'static str,
        end: &'static str,
    },
    /// Starts with the marker after leading whitespace.
    Prefix(&'static str),
    Contains(&'static str),
    ContainsAll(&'static [&'static str]),
    /// Contains `needle` and none of the `unless` substrings.
    ContainsNone {
        needle: &'static str,
        unless: &'static [&'static str],
    },
    /// `...` or `....` alone on the line.
    ContinuationMarker,
    /// The raw line, terminator included, equals the text.
    Exact(&'static str),
}

impl Trigger {
    pub fn matches(&self, line: &str) -> bool {
        match *self {
            Trigger::Wrapped { start, end } => {
                line.trim_start().starts_with(start)
                    && line.ends_with('\n')
                    && body(line).ends_with(end)
            }
            Trigger::Prefix(marker) => line.trim_start().starts_with(marker),
            Trigger::Contains(needle) => line.contains(needle),
            Trigger::ContainsAll(needles) => needles.iter().all(|n| line.contains(n)),
            Trigger::ContainsNone { needle, unless } => {
                line.contains(needle) && !unless.iter().any(|u| line.contains(u))
            }
            Trigger::ContinuationMarker => is_continuation_marker(line),
            Trigger::Exact(text) => line == text,
        }
    }
}

/// One step applied to the body of a matched line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edit {
    /// Remove the first occurrence.
    StripFirst(&'static str),
    StripAll(&'static str),
    ReplaceAll(&'static str, &'static str),
    /// Remove a trailing closer if present.
    StripSuffix(&'static str),
    CollapseSpacing,
    /// Re-indent to the previous line when it is indented.
    AlignToPrevious,
    /// Drop the line from the document.
    Delete,
}

/// Result of running a rule over one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite {
    Keep,
    Replace(String),
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    pub name: &'static str,
    pub trigger: Trigger,
    pub edits: &'static [Edit],
}

impl Rule {
    /// Rewrite a single line.
    ///
    /// `previous` is the last line this rule emitted that was not a table line.
    pub fn apply(&self, line: &str, previous: Option<&str>) -> Rewrite {
        if is_table_line(line) || !self.trigger.matches(line) {
            return Rewrite::Keep;
        }

        let mut text = body(line).to_string();
        for edit in self.edits {
            text = match *edit {
                Edit::StripFirst(marker) => text.replacen(marker, "", 1),
                Edit::StripAll(marker) => text.replace(marker, ""),
                Edit::ReplaceAll(from, to) => text.replace(from, to),
                Edit::StripSuffix(closer) => match text.strip_suffix(closer) {
                    Some(stripped) => stripped.to_string(),
                    None => continue,
                },
                Edit::CollapseSpacing => normalize_interior_spacing(&text),
                Edit::AlignToPrevious => match_previous_indentation(&text, previous),
                Edit::Delete => return Rewrite::Delete,
            };
        }

        let text = ensure_terminator(text);
        if text == line {
            Rewrite::Keep
        } else {
            Rewrite::Replace(text)
        }
    }

    /// Run the rule over every line, returning the new lines and how many changed.
    pub fn run(&self, lines: Vec<String>) -> (Vec<String>, usize) {
        let mut out: Vec<String> = Vec::with_capacity(lines.len());
        let mut previous: Option<String> = None;
        let mut hits = 0;

        for line in lines {
            if is_table_line(&line) {
                out.push(line);
                continue;
            }
            match self.apply(&line, previous.as_deref()) {
                Rewrite::Keep => {
                    previous = Some(line.clone());
                    out.push(line);
                }
                Rewrite::Replace(text) => {
                    hits += 1;
                    previous = Some(text.clone());
                    out.push(text);
                }
                Rewrite::Delete => hits += 1,
            }
        }

        (out, hits)
    }
}

/// The single-line rules in the order they must run.
///
/// Later rules assume earlier ones already removed their markers: the
/// bold-literal wraps are only recognizable once the plain `| ``` lines are
/// gone, and the inline-literal end fixes assume every line-level wrap has
/// been stripped.
pub static RULES: [Rule; 19] = [
    Rule {
        name: "strip-literal-line",
        trigger: Trigger::Wrapped {
            start: "| ``",
            end: "``",
        },
        edits: &[Edit::StripFirst("| ``"), Edit::StripSuffix("``")],
    },
    Rule {
        name: "strip-literal-role",
        trigger: Trigger::Prefix("| :literal:"),
        edits: &[Edit::StripFirst("| :literal:")],
    },
    Rule {
        name: "refine-bold-line",
        trigger: Trigger::Wrapped {
            start: "| **",
            end: "**",
        },
        edits: &[
            Edit::StripFirst("| **"),
            Edit::StripAll("\\"),
            Edit::StripAll("`"),
            Edit::StripSuffix("**"),
            Edit::CollapseSpacing,
            Edit::AlignToPrevious,
        ],
    },
    Rule {
        name: "refine-double-backtick-bold-line",
        trigger: Trigger::Wrapped {
            start: "| `` ``",
            end: "**",
        },
        edits: &[
            Edit::StripFirst("| `` ``"),
            Edit::StripAll("\\"),
            Edit::StripAll("``"),
            Edit::StripSuffix("**"),
            Edit::StripAll("*"),
        ],
    },
    Rule {
        name: "refine-single-backtick-bold-line",
        trigger: Trigger::Wrapped {
            start: "| ``",
            end: "**",
        },
        edits: &[
            Edit::StripFirst("| ``"),
            Edit::StripAll("\\"),
            Edit::StripAll("``"),
            Edit::StripSuffix("**"),
            Edit::StripAll("*"),
        ],
    },
    Rule {
        name: "remove-escaped-bold-open",
        trigger: Trigger::Contains("``\\ **``"),
        edits: &[Edit::StripAll("``\\ **``")],
    },
    Rule {
        name: "remove-escaped-bold-close",
        trigger: Trigger::Contains("``**\\ ``"),
        edits: &[Edit::StripAll("``**\\ ``")],
    },
    Rule {
        name: "remove-empty-escaped-literal",
        trigger: Trigger::Contains("``\\ ````\\ ``"),
        edits: &[Edit::StripAll("``\\ ````\\ ``")],
    },
    Rule {
        name: "strip-bold-literal-wrap",
        trigger: Trigger::Wrapped {
            start: "| **``",
            end: "``",
        },
        edits: &[Edit::StripFirst("| **``"), Edit::StripSuffix("``")],
    },
    Rule {
        name: "strip-italic-literal-wrap",
        trigger: Trigger::Wrapped {
            start: "| *``",
            end: "``",
        },
        edits: &[
            Edit::StripAll("| *``"),
            Edit::StripSuffix("``"),
            Edit::AlignToPrevious,
        ],
    },
    Rule {
        name: "strip-literal-asterisk-end-wrap",
        trigger: Trigger::Wrapped {
            start: "| ``",
            end: "``*",
        },
        edits: &[Edit::StripFirst("| ``"), Edit::StripSuffix("``*")],
    },
    Rule {
        name: "remove-escaped-italic-open",
        trigger: Trigger::Contains("``\\ *``"),
        edits: &[Edit::StripAll("``\\ *``"), Edit::CollapseSpacing],
    },
    Rule {
        name: "remove-escaped-italic-close",
        trigger: Trigger::Contains("``*\\ ``"),
        edits: &[Edit::StripAll("``*\\ ``"), Edit::CollapseSpacing],
    },
    Rule {
        name: "align-continuation-marker",
        trigger: Trigger::ContinuationMarker,
        edits: &[Edit::AlignToPrevious],
    },
    Rule {
        name: "drop-bare-pipe",
        trigger: Trigger::Exact("|"),
        edits: &[Edit::Delete],
    },
    Rule {
        name: "strip-backtick-asterisk-wrap",
        trigger: Trigger::Wrapped {
            start: "``",
            end: "``* ",
        },
        edits: &[Edit::StripFirst("``"), Edit::StripSuffix("``* ")],
    },
    Rule {
        name: "normalize-inline-literal-pair",
        trigger: Trigger::ContainsAll(&["**``", "``**"]),
        edits: &[
            Edit::ReplaceAll("**``", "``"),
            Edit::ReplaceAll("``**", "``\\ "),
        ],
    },
    Rule {
        name: "fix-inline-literal-bold-end",
        trigger: Trigger::Contains("``**"),
        edits: &[Edit::ReplaceAll("``**", "``")],
    },
    Rule {
        name: "fix-inline-literal-italic-end",
        trigger: Trigger::ContainsNone {
            needle: "``* ",
            unless: &["*.*", "*-"],
        },
        edits: &[Edit::ReplaceAll("``* ", "`` ")],
    },
];
