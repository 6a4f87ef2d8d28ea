/// Line terminator written by every rewrite.
pub const TERMINATOR: char = '\n';

/// An `.rst` file as an ordered sequence of raw lines.
///
/// Each line keeps its terminator, so concatenating the lines reproduces
/// the text exactly. Only the final line may lack one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    /// Split text into lines, reading `\r\n` and a lone `\r` as `\n`.
    pub fn from_text(text: &str) -> Self {
        let normalized;
        let text = if text.contains('\r') {
            normalized = text.replace("\r\n", "\n").replace('\r', "\n");
            normalized.as_str()
        } else {
            text
        };

        let lines = text.split_inclusive(TERMINATOR).map(str::to_string).collect();
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn replace_lines(&mut self, lines: Vec<String>) {
        self.lines = lines;
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn to_text(&self) -> String {
        self.lines.concat()
    }
}
