//! Nesting depth tracking: braces and block comments, one line at a time.
//!
//! This is a two-character lookahead scan, not a lexer. String and character literals
//! are not recognized, so `"{"` counts as an opening brace, and `//` line comments are
//! scanned like code. Conventionally formatted C rarely trips over either.

// ---------------------------------------------------------------------------
// Tracker
// ---------------------------------------------------------------------------

/// Running nesting depth across the lines of one file.
///
/// `{` and `/*` open a level, `}` and `*/` close one. Inside a block comment braces are
/// ignored, so a comment only ever contributes its own markers. The comment state carries
/// over line boundaries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NestingTracker {
    depth: i32,
    in_comment: bool,
}

impl NestingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current depth. Negative after more closers than openers.
    pub fn depth(&self) -> i32 {
        self.depth
    }

    /// True while an opened `/*` has not been closed yet.
    pub fn in_comment(&self) -> bool {
        self.in_comment
    }

    /// Net depth change contributed by `line`. Updates the comment state but not the
    /// depth; use [`NestingTracker::feed`] to do both.
    pub fn delta(&mut self, line: &str) -> i32 {
        let bytes = line.as_bytes();
        let mut delta = 0;
        let mut i = 0;

        while i < bytes.len() {
            let c = bytes[i];
            let next = bytes.get(i + 1).copied();

            if self.in_comment {
                if c == b'*' && next == Some(b'/') {
                    self.in_comment = false;
                    delta -= 1;
                    i += 2;
                    continue;
                }
                i += 1;
                continue;
            }

            match (c, next) {
                (b'/', Some(b'*')) => {
                    self.in_comment = true;
                    delta += 1;
                    i += 2;
                    continue;
                }
                (b'*', Some(b'/')) => {
                    delta -= 1;
                    i += 2;
                    continue;
                }
                (b'{', _) => delta += 1,
                (b'}', _) => delta -= 1,
                _ => {}
            }
            i += 1;
        }

        delta
    }

    /// Measure `line` and add its delta to the running depth. Returns the delta.
    pub fn feed(&mut self, line: &str) -> i32 {
        let d = self.delta(line);
        self.depth += d;
        d
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Delta of a single line scanned on its own, outside any comment.
pub fn line_delta(line: &str) -> i32 {
    NestingTracker::new().delta(line)
}
