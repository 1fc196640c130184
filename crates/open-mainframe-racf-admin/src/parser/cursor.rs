//! Read-only cursor over report lines.

/// A position in a slice of report lines.
#[derive(Debug, Clone)]
pub struct LineCursor<'a> {
    lines: &'a [String],
    pos: usize,
}

impl<'a> LineCursor<'a> {
    /// A cursor at the first line.
    pub fn new(lines: &'a [String]) -> Self {
        Self { lines, pos: 0 }
    }

    /// Whether every line has been consumed.
    pub fn is_done(&self) -> bool {
        self.pos >= self.lines.len()
    }

    /// The current line, or `""` past the end.
    pub fn current(&self) -> &'a str {
        self.peek(0).unwrap_or("")
    }

    /// The line `offset` lines ahead of the current one.
    pub fn peek(&self, offset: usize) -> Option<&'a str> {
        self.lines.get(self.pos + offset).map(String::as_str)
    }

    /// Whether at least `n` more lines follow the current one.
    pub fn has_ahead(&self, n: usize) -> bool {
        self.pos + n < self.lines.len()
    }

    /// Whether the current line is the last one.
    pub fn is_last(&self) -> bool {
        !self.has_ahead(1)
    }

    /// Lines left, including the current one.
    pub fn remaining(&self) -> usize {
        self.lines.len().saturating_sub(self.pos)
    }

    /// Move forward `n` lines.
    pub fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.lines.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_and_advance() {
        let lines: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        let mut cursor = LineCursor::new(&lines);
        assert_eq!(cursor.current(), "a");
        assert_eq!(cursor.peek(2), Some("c"));
        assert!(cursor.has_ahead(2));
        assert!(!cursor.has_ahead(3));

        cursor.advance(2);
        assert!(cursor.is_last());
        assert_eq!(cursor.peek(1), None);
        assert_eq!(cursor.remaining(), 1);

        cursor.advance(5);
        assert!(cursor.is_done());
        assert_eq!(cursor.current(), "");
    }
}
