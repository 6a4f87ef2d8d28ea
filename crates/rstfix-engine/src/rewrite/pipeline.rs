use crate::document::Document;

use super::literal_block::assemble_literal_blocks;
use super::rules::{RULES, Rule};

/// One pass over the whole document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Group `| ``...``` runs into literal blocks.
    LiteralBlocks,
    /// Apply one single-line rule.
    Line(&'static Rule),
}

impl Stage {
    pub fn name(&self) -> &'static str {
        match self {
            Stage::LiteralBlocks => "assemble-literal-blocks",
            Stage::Line(rule) => rule.name,
        }
    }

    fn run(&self, lines: Vec<String>) -> (Vec<String>, usize) {
        match self {
            Stage::LiteralBlocks => assemble_literal_blocks(lines),
            Stage::Line(rule) => rule.run(lines),
        }
    }
}

/// Lines changed by one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageStats {
    pub stage: &'static str,
    pub lines_rewritten: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub stages: Vec<StageStats>,
}

impl RunStats {
    pub fn lines_rewritten(&self) -> usize {
        self.stages.iter().map(|s| s.lines_rewritten).sum()
    }

    /// Stages that changed at least one line.
    pub fn active_stages(&self) -> impl Iterator<Item = &StageStats> {
        self.stages.iter().filter(|s| s.lines_rewritten > 0)
    }
}

/// Fixed, ordered list of stages.
///
/// Each stage sees only the output of the stages before it, so the order
/// is part of the behavior and must not change.
#[derive(Debug, Clone)]
pub struct Pipeline {
    stages: Vec<Stage>,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::standard()
    }
}

impl Pipeline {
    /// Literal-block assembly followed by every single-line rule.
    pub fn standard() -> Self {
        let mut stages = Vec::with_capacity(RULES.len() + 1);
        stages.push(Stage::LiteralBlocks);
        stages.extend(RULES.iter().map(Stage::Line));
        Self { stages }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    /// Rewrite the document in place.
    pub fn run(&self, document: &mut Document) -> RunStats {
        let mut lines = std::mem::take(document).into_lines();
        let mut stats = RunStats::default();

        for stage in &self.stages {
            let (next, lines_rewritten) = stage.run(lines);
            lines = next;
            if lines_rewritten > 0 {
                log::debug!("{}: {} line(s) rewritten", stage.name(), lines_rewritten);
            }
            stats.stages.push(StageStats {
                stage: stage.name(),
                lines_rewritten,
            });
        }

        document.replace_lines(lines);
        stats
    }

    /// Convenience for rewriting text directly.
    pub fn run_text(&self, text: &str) -> String {
        let mut document = Document::from_text(text);
        self.run(&mut document);
        document.to_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    fn fix(text: &str) -> String {
        Pipeline::standard().run_text(text)
    }

    #[test]
    fn standard_pipeline_order() {
        let names: Vec<_> = Pipeline::standard().stages().iter().map(Stage::name).collect();
        assert_eq!(
            names,
            [
                "assemble-literal-blocks",
                "strip-literal-line",
                "strip-literal-role",
                "refine-bold-line",
                "refine-double-backtick-bold-line",
                "refine-single-backtick-bold-line",
                "remove-escaped-bold-open",
                "remove-escaped-bold-close",
                "remove-empty-escaped-literal",
                "strip-bold-literal-wrap",
                "strip-italic-literal-wrap",
                "strip-literal-asterisk-end-wrap",
                "remove-escaped-italic-open",
                "remove-escaped-italic-close",
                "align-continuation-marker",
                "drop-bare-pipe",
                "strip-backtick-asterisk-wrap",
                "normalize-inline-literal-pair",
                "fix-inline-literal-bold-end",
                "fix-inline-literal-italic-end",
            ]
        );
    }

    #[test]
    fn assembles_literal_block() {
        assert_eq!(
            fix("\n| ``first line``\n| ``second line``\n\n"),
            "\n::\n\n    first line\n    second line\n\n"
        );
    }

    #[test]
    fn strips_bold_line() {
        assert_eq!(fix("| **Some \\`Thing\\`**\n"), "Some Thing\n");
    }

    #[test]
    fn literal_line_after_paragraph_is_unwrapped_in_place() {
        assert_eq!(fix("Run:\n| ``ipa user-show``\n"), "Run:\nipa user-show\n");
    }

    #[test]
    fn wildcard_protection() {
        assert_eq!(
            fix("see example.rst``* foo and *.* files\n"),
            "see example.rst``* foo and *.* files\n"
        );
        assert_eq!(fix("see example.rst``* foo\n"), "see example.rst`` foo\n");
    }

    #[test]
    fn bare_pipe_deletion_is_exact() {
        assert_eq!(fix("text\n|"), "text\n");
        assert_eq!(fix("text\n| \n"), "text\n| \n");
    }

    #[test]
    fn tables_survive_every_stage() {
        let table = "+--------+------------------+\n\
                     | ``**`` | ``*\\ `` and ... |\n\
                     +--------+------------------+\n";
        assert_eq!(fix(table), table);
    }

    #[test]
    fn stats_count_rewritten_lines() {
        let mut doc = Document::from_text("\n| ``a``\n| ``b``\n\ntext ``x``** more\n");
        let stats = Pipeline::standard().run(&mut doc);

        assert_eq!(stats.stages.len(), 20);
        assert_eq!(stats.lines_rewritten(), 3);
        let active: Vec<_> = stats.active_stages().map(|s| s.stage).collect();
        assert_eq!(
            active,
            ["assemble-literal-blocks", "fix-inline-literal-bold-end"]
        );
    }

    #[test]
    fn pipeline_is_idempotent() {
        let once = fix(SAMPLE);
        assert_eq!(fix(&once), once);
    }

    #[test]
    fn sample_page() {
        assert_snapshot!(fix(SAMPLE), @r#"
        Enrolling a host
        ================

        ::

            ipa host-add client.example.com
            ipa-client-install --unattended

        Check the result with
        ipa host-show client.example.com
        Kerberos principal

            kinit admin
            --force
            ...

        Use ``ipa-getkeytab``\  to fetch keys, see the ``klist`` output.

        +-------------+----------------+
        | ``option``  | meaning        |
        +-------------+----------------+
        "#);
    }

    const SAMPLE: &str = "Enrolling a host
================

| ``ipa host-add client.example.com``
| ``ipa-client-install --unattended``

Check the result with
| ``ipa host-show client.example.com``
| **Kerberos  \\`principal\\`**

    kinit admin
| *``--force``
...

Use **``ipa-getkeytab``** to fetch keys, see the ``klist``* output.

+-------------+----------------+
| ``option``  | meaning        |
+-------------+----------------+
";
}
