use serde::{Deserialize, Serialize};
use std::fmt;

/// Location of one token in a program.
///
/// `index` is the 0-based token position; `start`/`end` are the byte range
/// of its text in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub index: usize,
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(index: usize, start: usize, end: usize) -> Self {
        Self { index, start, end }
    }

    /// Length of the token text in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "token {} (bytes {}..{})", self.index, self.start, self.end)
    }
}

/// Holds the program text for error reporting.
#[derive(Debug, Clone)]
pub struct SourceProgram {
    pub name: String,
    pub source: String,
}

impl SourceProgram {
    /// Create a new source program.
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Split the program into raw tokens separated by ASCII whitespace.
    pub fn tokens(&self) -> Vec<(Span, &str)> {
        let mut tokens = Vec::new();
        let mut start = None;
        for (offset, ch) in self.source.char_indices() {
            match (ch.is_ascii_whitespace(), start) {
                (true, Some(begin)) => {
                    tokens.push((Span::new(tokens.len(), begin, offset), &self.source[begin..offset]));
                    start = None;
                }
                (false, None) => start = Some(offset),
                _ => {}
            }
        }
        if let Some(begin) = start {
            let end = self.source.len();
            tokens.push((Span::new(tokens.len(), begin, end), &self.source[begin..end]));
        }
        tokens
    }

    /// The raw text a span covers.
    pub fn text(&self, span: Span) -> Option<&str> {
        self.source.get(span.start..span.end)
    }
}
