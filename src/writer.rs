//! Append-only SQL text accumulator.
//!
//! The writer knows nothing about SQL. It only keeps whitespace tidy: no
//! doubled spaces, no space after `(`, no space before `)` or `,`.

use serde::{Deserialize, Serialize};

/// How line breaks and indentation are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Clauses on their own lines, condition groups indented with tabs.
    #[default]
    Pretty,
    /// Everything on one line.
    Compact,
}

#[derive(Debug, Default)]
pub struct StatementWriter {
    buf: String,
    layout: Layout,
}

impl StatementWriter {
    pub fn new(layout: Layout) -> Self {
        Self {
            buf: String::with_capacity(128),
            layout,
        }
    }

    pub fn write(&mut self, s: &str) {
        self.buf.push_str(s);
    }

    /// Write every part in order.
    pub fn print(&mut self, parts: &[&str]) {
        for part in parts {
            self.buf.push_str(part);
        }
    }

    /// A single space, unless the text already ends in whitespace or `(`.
    pub fn blank(&mut self) {
        if !self.buf.is_empty() && !self.buf.ends_with([' ', '\n', '\t', '(']) {
            self.buf.push(' ');
        }
    }

    pub fn comma(&mut self) {
        self.trim_spaces();
        self.buf.push_str(", ");
    }

    pub fn line_break(&mut self) {
        match self.layout {
            Layout::Pretty => {
                self.trim_spaces();
                if !self.buf.is_empty() {
                    self.buf.push('\n');
                }
            }
            Layout::Compact => self.blank(),
        }
    }

    pub fn indent(&mut self, depth: usize) {
        if self.layout == Layout::Pretty {
            for _ in 0..depth {
                self.buf.push('\t');
            }
        }
    }

    pub fn open_parentheses(&mut self) {
        self.buf.push('(');
    }

    pub fn close_parentheses(&mut self) {
        self.trim_spaces();
        self.buf.push(')');
    }

    /// End the statement with `terminator`, dropping trailing whitespace.
    pub fn terminate(&mut self, terminator: &str) {
        let trimmed = self.buf.trim_end().len();
        self.buf.truncate(trimmed);
        self.buf.push_str(terminator);
    }

    pub fn into_string(self) -> String {
        self.buf
    }

    fn trim_spaces(&mut self) {
        let trimmed = self.buf.trim_end_matches(' ').len();
        self.buf.truncate(trimmed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_is_idempotent() {
        let mut w = StatementWriter::new(Layout::Pretty);
        w.write("SELECT");
        w.blank();
        w.blank();
        w.write("*");
        assert_eq!(w.into_string(), "SELECT *");
    }

    #[test]
    fn test_parentheses_and_commas() {
        let mut w = StatementWriter::new(Layout::Compact);
        w.write("IN");
        w.blank();
        w.open_parentheses();
        w.blank();
        w.write("?");
        w.blank();
        w.comma();
        w.write("?");
        w.blank();
        w.close_parentheses();
        assert_eq!(w.into_string(), "IN (?, ?)");
    }

    #[test]
    fn test_line_break_per_layout() {
        let mut pretty = StatementWriter::new(Layout::Pretty);
        pretty.print(&["SELECT", " ", "* "]);
        pretty.line_break();
        pretty.indent(2);
        pretty.write("FROM t");
        assert_eq!(pretty.into_string(), "SELECT *\n\t\tFROM t");

        let mut compact = StatementWriter::new(Layout::Compact);
        compact.write("SELECT *");
        compact.line_break();
        compact.indent(2);
        compact.write("FROM t");
        assert_eq!(compact.into_string(), "SELECT * FROM t");
    }

    #[test]
    fn test_terminate_trims() {
        let mut w = StatementWriter::new(Layout::Pretty);
        w.write("DELETE FROM t \n");
        w.terminate(";");
        assert_eq!(w.into_string(), "DELETE FROM t;");
    }
}
