//! Word-wrap engine: lazy line-break layout.
//!
//! [`WrapLayout`] turns text plus a glyph-position table into a sequence of
//! [`LineSpan`] records, one per wrapped visual line. The table is rebuilt in
//! a single forward pass and cached under a `(revision, width)` key, so
//! repeated reads between mutations cost nothing.
//!
//! Break rules:
//!
//! - `\n` and `\r` are hard breaks, always taken; the terminator itself
//!   belongs to no span.
//! - A soft break fires when the measured line width strictly exceeds the
//!   available width, at the last position the continuation predicate did
//!   not veto (the break character stays on the ending line).
//! - A single word wider than the line force-breaks before the overflowing
//!   character.
//!
//! A trailing terminator implies one empty visual line that is never
//! materialized in the table; [`WrapLayout::line_count`] accounts for it.

use crate::metrics::GlyphPositions;
use ropey::Rope;

/// One wrapped visual line: a half-open char range `[start, end)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineSpan {
    pub start: usize,
    pub end: usize,
}

impl LineSpan {
    /// Create a span.
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length of the span in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span covers no characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    /// Check if `offset` falls inside the span.
    #[must_use]
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }
}

/// Cache key for the last computed table.
#[derive(Clone, Copy, Debug, PartialEq)]
struct WrapKey {
    revision: u64,
    width: f32,
}

/// Lazily recomputed line-break table.
#[derive(Debug, Default)]
pub struct WrapLayout {
    spans: Vec<LineSpan>,
    key: Option<WrapKey>,
}

impl WrapLayout {
    /// Create an empty layout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The wrapped line spans, in text order.
    #[must_use]
    pub fn spans(&self) -> &[LineSpan] {
        &self.spans
    }

    /// Number of materialized spans (excludes the implicit trailing line).
    #[must_use]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Check if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Span for a wrapped line index.
    #[must_use]
    pub fn span(&self, line: usize) -> Option<LineSpan> {
        self.spans.get(line).copied()
    }

    /// Flat break-table entry: even indices are span starts, odd are ends.
    ///
    /// Cursor bookkeeping reasons about the boundary sequence
    /// `start0, end0, start1, end1, …`; this indexes into it.
    #[must_use]
    pub fn entry(&self, flat: usize) -> Option<usize> {
        let span = self.spans.get(flat / 2)?;
        Some(if flat % 2 == 0 { span.start } else { span.end })
    }

    /// Index of the first flat entry not before `cursor`.
    #[must_use]
    pub fn break_index_for(&self, cursor: usize) -> usize {
        self.spans
            .iter()
            .flat_map(|s| [s.start, s.end])
            .take_while(|&boundary| cursor > boundary)
            .count()
    }

    /// Total visual lines: materialized spans plus the implicit empty line
    /// after a trailing terminator.
    #[must_use]
    pub fn line_count(&self, rope: &Rope) -> usize {
        self.spans.len() + usize::from(ends_with_line_break(rope))
    }

    /// Force the next [`recompute`](Self::recompute) to rebuild.
    pub fn invalidate(&mut self) {
        self.key = None;
    }

    /// Rebuild the table if `(revision, available_width)` differs from the
    /// last build. Returns whether a rebuild happened.
    ///
    /// `continue_break` vetoes soft-break candidates (positions inside
    /// non-breakable sequences); width is measured through `positions`,
    /// which must describe `rope`.
    pub fn recompute<F>(
        &mut self,
        rope: &Rope,
        positions: &GlyphPositions,
        available_width: f32,
        revision: u64,
        continue_break: F,
    ) -> bool
    where
        F: Fn(usize) -> bool,
    {
        let key = WrapKey {
            revision,
            width: available_width,
        };
        if self.key == Some(key) {
            return false;
        }

        self.spans.clear();
        let mut line_start = 0usize;
        let mut last_space = 0usize;
        for (i, ch) in rope.chars().enumerate() {
            if ch == '\n' || ch == '\r' {
                self.spans.push(LineSpan::new(line_start, i));
                line_start = i + 1;
                last_space = line_start;
            } else {
                if !continue_break(i) {
                    last_space = i;
                }
                if positions.width_between(line_start, i + 1) > available_width {
                    if line_start >= last_space {
                        // No break point since the line began: a single word
                        // wider than the line. Break before this character.
                        self.spans.push(LineSpan::new(line_start, i));
                        line_start = i;
                    } else {
                        self.spans.push(LineSpan::new(line_start, last_space + 1));
                        line_start = last_space + 1;
                    }
                    last_space = line_start;
                }
            }
        }
        if line_start < rope.len_chars() {
            self.spans.push(LineSpan::new(line_start, rope.len_chars()));
        }
        self.key = Some(key);
        true
    }
}

/// Check if the text ends with a line terminator (which implies one extra
/// visual line beyond the materialized spans).
#[must_use]
pub fn ends_with_line_break(rope: &Rope) -> bool {
    let len = rope.len_chars();
    if len == 0 {
        return false;
    }
    matches!(rope.char(len - 1), '\n' | '\r')
}
