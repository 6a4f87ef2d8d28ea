//! Literal-block assembly.
//!
//! A run of `| ``text``` lines that follows a blank line (or the start of
//! the file) becomes an RST literal block:
//!
//! ```text
//!
//! ::
//!
//!     text
//!
//! ```

use super::classify::{LineClass, LiteralMarker};
use crate::document::TERMINATOR;

/// Opening delimiter line of a literal block.
pub const BLOCK_OPEN: &str = "::\n";
/// Indentation of every rewritten content line.
pub const BLOCK_INDENT: &str = "    ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BlockState {
    Outside,
    Inside,
}

/// Streams lines in, emitting the rewritten document.
///
/// A block that is still open at end of input is closed by the end of
/// input itself; no separator line is appended.
pub struct LiteralBlockAssembler {
    state: BlockState,
    previous_blank: bool,
    rewritten: usize,
    out: Vec<String>,
}

impl Default for LiteralBlockAssembler {
    fn default() -> Self {
        Self::new()
    }
}

impl LiteralBlockAssembler {
    pub fn new() -> Self {
        Self {
            state: BlockState::Outside,
            previous_blank: true,
            rewritten: 0,
            out: vec![],
        }
    }

    pub fn push(&mut self, line: String) {
        let class = LineClass::of(&line);

        if self.state == BlockState::Outside
            && self.previous_blank
            && !class.is_table
            && class.marker == Some(LiteralMarker::PipeBacktick)
        {
            log::trace!("opening literal block at output line {}", self.out.len() + 1);
            self.out.push(BLOCK_OPEN.to_string());
            self.out.push(TERMINATOR.to_string());
            self.state = BlockState::Inside;
        }

        self.previous_blank = class.is_blank;

        match self.state {
            BlockState::Outside => self.out.push(line),
            BlockState::Inside => self.consume_block_line(line, class),
        }
    }

    /// Finish the document, returning the lines and the count of content lines rewritten.
    pub fn finish(self) -> (Vec<String>, usize) {
        if self.state == BlockState::Inside {
            log::trace!("literal block closed by end of input");
        }
        (self.out, self.rewritten)
    }

    fn consume_block_line(&mut self, line: String, class: LineClass) {
        if class.is_blank {
            self.out.push(TERMINATOR.to_string());
            self.state = BlockState::Outside;
            return;
        }

        match class.marker {
            Some(marker) if !class.is_table => {
                self.out.push(block_content_line(&line, marker));
                self.rewritten += 1;
            }
            _ => self.out.push(line),
        }
    }
}

/// Strip the marker and closer, re-indenting the text inside the block.
fn block_content_line(line: &str, marker: LiteralMarker) -> String {
    let content = line[marker.prefix().len()..].trim_end();
    let content = match content.strip_suffix("``") {
        Some(stripped) => stripped.trim_end(),
        None => content,
    };
    format!("{BLOCK_INDENT}{content}{TERMINATOR}")
}

/// Run literal-block assembly over a whole document.
pub fn assemble_literal_blocks(lines: Vec<String>) -> (Vec<String>, usize) {
    let mut assembler = LiteralBlockAssembler::new();
    for line in lines {
        assembler.push(line);
    }
    assembler.finish()
}
