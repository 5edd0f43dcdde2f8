//! Multi-line text area core: wrapped cursor tracking and hit-testing.
//!
//! [`TextArea`] composes a [`FieldState`] (linear text, cursor, selection)
//! with a [`FontMetrics`] provider and keeps three coordinate systems in
//! sync: linear char offsets, wrapped line/column positions, and pixels.
//!
//! Layout is lazy. Mutations only bump the field's revision; the glyph
//! positions and line-break table are rebuilt on the next
//! [`TextArea::layout`] — which every navigation entry point calls first.
//! Hosts that read geometry directly ([`TextArea::cursor_x`],
//! [`TextArea::visible_spans`], …) should call `layout()` after mutating,
//! the same place a render pass would.
//!
//! Coordinates are widget-local with y growing upward, matching scene-graph
//! hosts: `y = height` is the top edge. Vertical getters return distances
//! measured down from the top of the content box.

use crate::diag::{self, LogLevel};
use crate::field::FieldState;
use crate::metrics::{FontMetrics, GlyphPositions, ScratchPool};
use crate::wrap::{LineSpan, WrapLayout, ends_with_line_break};

/// Pixel insets reserved by the host's background drawable.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Insets {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Insets {
    /// Equal insets on all four sides.
    #[must_use]
    pub fn uniform(value: f32) -> Self {
        Self {
            left: value,
            right: value,
            top: value,
            bottom: value,
        }
    }

    /// Combined left + right inset.
    #[must_use]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Combined top + bottom inset.
    #[must_use]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }
}

/// Selection highlight geometry for one visible wrapped line.
///
/// `x` is relative to the line's left edge; the host positions the row via
/// [`TextArea::line_y`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SelectionSpan {
    pub line: usize,
    pub x: f32,
    pub width: f32,
}

/// Word-wrapped multi-line editing surface.
pub struct TextArea {
    field: FieldState,
    metrics: Box<dyn FontMetrics>,
    positions: GlyphPositions,
    scratch: ScratchPool,
    wrap: WrapLayout,
    measured_revision: Option<u64>,
    /// Wrapped line the cursor sits on. May equal the span count when the
    /// cursor is on the implicit line after a trailing terminator.
    cursor_line: usize,
    /// Remembered horizontal pixel target for vertical navigation.
    move_offset: Option<f32>,
    first_line_showing: usize,
    lines_showing: usize,
    width: f32,
    height: f32,
    insets: Insets,
    min_height: f32,
    preferred_rows: f32,
}

impl TextArea {
    /// Create an empty area with the given metric provider.
    #[must_use]
    pub fn new(metrics: impl FontMetrics + 'static) -> Self {
        Self::with_text("", metrics)
    }

    /// Create an area with initial text.
    #[must_use]
    pub fn with_text(text: &str, metrics: impl FontMetrics + 'static) -> Self {
        Self {
            field: FieldState::with_text(text),
            metrics: Box::new(metrics),
            positions: GlyphPositions::new(),
            scratch: ScratchPool::new(),
            wrap: WrapLayout::new(),
            measured_revision: None,
            cursor_line: 0,
            move_offset: None,
            first_line_showing: 0,
            lines_showing: 0,
            width: 0.0,
            height: 0.0,
            insets: Insets::default(),
            min_height: 0.0,
            preferred_rows: 0.0,
        }
    }

    /// The single-line editing core.
    #[must_use]
    pub fn field(&self) -> &FieldState {
        &self.field
    }

    /// Mutable access to the editing core.
    ///
    /// Text mutations through this handle are picked up by the next
    /// [`layout`](Self::layout); cursor moves are picked up by the next
    /// navigation call.
    pub fn field_mut(&mut self) -> &mut FieldState {
        &mut self.field
    }

    /// Full text content.
    #[must_use]
    pub fn text(&self) -> String {
        self.field.text()
    }

    /// Replace the entire text.
    pub fn set_text(&mut self, text: &str) {
        self.field.set_text(text);
        self.cursor_line = 0;
        self.first_line_showing = 0;
        self.move_offset = None;
        self.layout();
    }

    /// Insert at the cursor, replacing any selection, and re-layout.
    pub fn insert(&mut self, s: &str) {
        self.field.insert(s);
        self.layout();
    }

    /// Backspace at the cursor and re-layout.
    pub fn delete_backward(&mut self) {
        self.field.delete_backward();
        self.layout();
    }

    /// Forward-delete at the cursor and re-layout.
    pub fn delete_forward(&mut self) {
        self.field.delete_forward();
        self.layout();
    }

    /// Select a range and resync the cursor line.
    pub fn select(&mut self, anchor: usize, cursor: usize) {
        self.layout();
        self.field.select(anchor, cursor);
        self.update_current_line();
    }

    /// Place the cursor at a linear offset and resync the cursor line.
    pub fn set_cursor(&mut self, offset: usize) {
        self.layout();
        self.field.set_cursor(offset);
        self.update_current_line();
    }

    /// Resize the widget, updating the visible row count. The wrap table is
    /// rebuilt lazily if the available width changed.
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.update_lines_showing();
    }

    /// Set the background insets.
    pub fn set_insets(&mut self, insets: Insets) {
        self.insets = insets;
        self.update_lines_showing();
    }

    /// Set the minimum preferred height.
    pub fn set_min_height(&mut self, min_height: f32) {
        self.min_height = min_height;
    }

    /// Set the preferred row count used by
    /// [`preferred_height`](Self::preferred_height).
    pub fn set_preferred_rows(&mut self, rows: f32) {
        self.preferred_rows = rows;
    }

    /// Preferred widget height: preferred rows times the line height, plus
    /// vertical insets, at least the configured minimum.
    #[must_use]
    pub fn preferred_height(&self) -> f32 {
        let rows = if self.preferred_rows > 0.0 {
            self.preferred_rows
        } else {
            1.0
        };
        let height = self.metrics.line_height() * rows + self.insets.vertical();
        height.max(self.min_height)
    }

    /// Bring glyph positions and the line-break table up to date.
    ///
    /// Cheap when nothing changed; on an actual rebuild the scroll window is
    /// re-anchored to the cursor.
    pub fn layout(&mut self) {
        let revision = self.field.revision();
        if self.measured_revision != Some(revision) {
            self.positions
                .rebuild(self.field.rope(), self.metrics.as_ref(), &mut self.scratch);
            self.measured_revision = Some(revision);
        }

        let width = self.available_width();
        let field = &self.field;
        let rebuilt = self.wrap.recompute(
            field.rope(),
            &self.positions,
            width,
            revision,
            |i| field.continue_cursor(i, 0),
        );
        if rebuilt {
            diag::emit_log(LogLevel::Debug, "line breaks recomputed");
            diag::emit_event(
                "wrap.recompute",
                &format!("lines={} width={width}", self.wrap.len()),
            );
            self.show_cursor();
        }
    }

    /// Total visual lines, including the implicit empty line after a
    /// trailing terminator.
    #[must_use]
    pub fn lines(&self) -> usize {
        self.wrap.line_count(self.field.rope())
    }

    /// Check if the text ends with a line terminator.
    #[must_use]
    pub fn newline_at_end(&self) -> bool {
        ends_with_line_break(self.field.rope())
    }

    /// Wrapped line the cursor is on.
    #[must_use]
    pub fn cursor_line(&self) -> usize {
        self.cursor_line
    }

    /// Topmost visible wrapped line.
    #[must_use]
    pub fn first_line_showing(&self) -> usize {
        self.first_line_showing
    }

    /// Number of visible rows, derived from the viewport height.
    #[must_use]
    pub fn lines_showing(&self) -> usize {
        self.lines_showing
    }

    /// Current linear cursor offset.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.field.cursor()
    }

    /// The break-table spans (for hosts painting text line by line).
    #[must_use]
    pub fn line_spans(&self) -> &[LineSpan] {
        self.wrap.spans()
    }

    /// Caret x relative to the current line's left edge.
    #[must_use]
    pub fn cursor_x(&self) -> f32 {
        let cursor = self.field.cursor();
        if cursor >= self.positions.boundary_count() || self.cursor_line >= self.wrap.len() {
            return 0.0;
        }
        let start = self.wrap.spans()[self.cursor_line].start;
        self.positions.width_between(start, cursor)
    }

    /// Caret bottom, measured down from the top of the content box.
    #[must_use]
    pub fn cursor_y(&self) -> f32 {
        let rows = self.cursor_line as f32 - self.first_line_showing as f32 + 1.0;
        rows * self.metrics.line_height() + self.metrics.descent() / 2.0
    }

    /// Top edge of a wrapped line, measured down from the top of the
    /// content box.
    #[must_use]
    pub fn line_y(&self, line: usize) -> f32 {
        (line as f32 - self.first_line_showing as f32) * self.metrics.line_height()
    }

    /// Linear offset of the boundary nearest pixel `x` on the current
    /// cursor line. Past the last materialized line, the end of text.
    #[must_use]
    pub fn letter_under_cursor(&self, x: f32) -> usize {
        if self.wrap.is_empty() {
            return 0;
        }
        if self.cursor_line >= self.wrap.len() {
            return self.field.len();
        }
        let span = self.wrap.spans()[self.cursor_line];
        let x = x + self.positions.position(span.start);
        let mut i = span.start;
        while i < span.end {
            if self.positions.position(i) > x {
                break;
            }
            i += 1;
        }
        if i > 0 && self.positions.position(i) - x <= x - self.positions.position(i - 1) {
            return i;
        }
        i.saturating_sub(1)
    }

    /// Move the cursor to a wrapped line, clamped to the text, keeping the
    /// remembered horizontal column across consecutive vertical moves.
    pub fn move_cursor_line(&mut self, line: i32) {
        self.layout();
        let lines = self.lines() as i32;
        if line < 0 {
            self.cursor_line = 0;
            self.field.set_cursor(0);
            self.move_offset = None;
        } else if line >= lines {
            let new_line = lines.max(1) as usize - 1;
            self.field.set_cursor(self.field.len());
            if line > lines || new_line == self.cursor_line {
                self.move_offset = None;
            }
            self.cursor_line = new_line;
        } else if line as usize != self.cursor_line {
            let target = line as usize;
            if self.move_offset.is_none() {
                let offset = match self.wrap.span(self.cursor_line) {
                    Some(span) => self
                        .positions
                        .width_between(span.start, self.field.cursor()),
                    None => 0.0,
                };
                self.move_offset = Some(offset);
            }
            self.cursor_line = target;

            let move_offset = self.move_offset.unwrap_or(0.0);
            let mut cursor = match self.wrap.span(target) {
                Some(span) => span.start,
                None => self.field.len(),
            };
            if let Some(span) = self.wrap.span(target) {
                let len = self.field.len();
                while cursor < len
                    && cursor < span.end
                    && self.positions.width_between(span.start, cursor) < move_offset
                {
                    cursor += 1;
                }
            }
            self.field.set_cursor(cursor);
            self.show_cursor();
        }
    }

    /// Step the cursor horizontally, handling the zero-width boundary
    /// between two wrapped lines: crossing it changes the cursor line
    /// without linear motion unless a word jump is requested.
    pub fn move_cursor_horizontal(&mut self, forward: bool, jump: bool) {
        self.layout();
        let cursor = self.field.cursor();
        let idx = if forward {
            Some(self.cursor_line * 2 + 1)
        } else {
            (self.cursor_line * 2).checked_sub(1)
        };
        let crossed = idx.is_some_and(|idx| {
            idx + 1 < self.wrap.len() * 2
                && self.wrap.entry(idx) == Some(cursor)
                && self.wrap.entry(idx + 1) == Some(cursor)
        });
        if crossed {
            if forward {
                self.cursor_line += 1;
            } else {
                self.cursor_line -= 1;
            }
            if jump {
                self.field.move_cursor(forward, jump);
            }
            self.show_cursor();
        } else {
            self.field.move_cursor(forward, jump);
        }
        self.update_current_line();
    }

    /// Move to the start of the text (`jump`) or of the current wrapped
    /// line.
    pub fn go_home(&mut self, jump: bool) {
        self.layout();
        if jump {
            self.field.set_cursor(0);
        } else if let Some(span) = self.wrap.span(self.cursor_line) {
            self.field.set_cursor(span.start);
        }
        self.show_cursor();
    }

    /// Move to the end of the text (`jump`) or of the current wrapped line.
    pub fn go_end(&mut self, jump: bool) {
        self.layout();
        if jump || self.cursor_line >= self.lines() {
            self.field.set_cursor(self.field.len());
        } else if let Some(span) = self.wrap.span(self.cursor_line) {
            self.field.set_cursor(span.end);
        }
        self.show_cursor();
    }

    /// Place the cursor from a click at widget-local `(x, y)`, clearing any
    /// selection.
    pub fn click(&mut self, x: f32, y: f32) {
        self.field.clear_selection();
        self.set_cursor_position(x, y);
    }

    /// Extend the selection toward widget-local `(x, y)`, anchoring it at
    /// the current cursor if none is active.
    pub fn drag(&mut self, x: f32, y: f32) {
        self.field.anchor_selection();
        self.set_cursor_position(x, y);
    }

    /// Selection highlight geometry for each visible wrapped line the
    /// selection touches.
    #[must_use]
    pub fn selection_spans(&self) -> Vec<SelectionSpan> {
        let Some((min_index, max_index)) = self.field.selection_range() else {
            return Vec::new();
        };
        let mut result = Vec::new();
        let first = self.first_line_showing;
        let last = (first + self.lines_showing).min(self.wrap.len());
        for line in first..last {
            let span = self.wrap.spans()[line];
            let outside = (min_index < span.start
                && min_index < span.end
                && max_index < span.start
                && max_index < span.end)
                || (min_index > span.start
                    && min_index > span.end
                    && max_index > span.start
                    && max_index > span.end);
            if outside {
                continue;
            }
            let start = span.start.max(min_index);
            let end = span.end.min(max_index);
            result.push(SelectionSpan {
                line,
                x: self.positions.width_between(span.start, start),
                width: self.positions.width_between(start, end),
            });
        }
        result
    }

    /// Visible wrapped lines, for text painting.
    pub fn visible_spans(&self) -> impl Iterator<Item = (usize, LineSpan)> + '_ {
        let first = self.first_line_showing;
        let last = (first + self.lines_showing).min(self.wrap.len());
        (first..last).map(move |line| (line, self.wrap.spans()[line]))
    }

    /// Scroll the window until the cursor line is visible.
    ///
    /// With a degenerate viewport (`lines_showing == 0`) the window cannot
    /// contain any line; the cursor stays off-screen and this returns after
    /// resyncing the cursor line.
    pub fn show_cursor(&mut self) {
        self.update_current_line();
        if self.lines_showing == 0 {
            return;
        }
        if self.cursor_line != self.first_line_showing {
            let before = self.first_line_showing;
            if self.cursor_line >= self.first_line_showing {
                while self.first_line_showing + self.lines_showing - 1 < self.cursor_line {
                    self.first_line_showing += 1;
                }
            } else {
                while self.first_line_showing > self.cursor_line {
                    self.first_line_showing -= 1;
                }
            }
            if self.first_line_showing != before {
                diag::emit_event("area.scroll", &format!("first={}", self.first_line_showing));
            }
        }
    }

    pub(crate) fn clear_move_offset(&mut self) {
        self.move_offset = None;
    }

    /// Resync `cursor_line` from the linear cursor.
    ///
    /// A cursor sitting exactly on the shared boundary of a soft or forced
    /// break is ambiguous between the end of one line and the start of the
    /// next; such a position does not move the cursor off the line it is
    /// already on.
    fn update_current_line(&mut self) {
        let cursor = self.field.cursor();
        let index = self.wrap.break_index_for(cursor);
        let line = index / 2;
        let size = self.wrap.len() * 2;
        if index % 2 == 0
            || index + 1 >= size
            || self.wrap.entry(index) != Some(cursor)
            || self.wrap.entry(index + 1) != self.wrap.entry(index)
        {
            if line < self.wrap.len() || self.field.is_empty() || self.newline_at_end() {
                self.cursor_line = line;
            }
        }
    }

    fn set_cursor_position(&mut self, x: f32, y: f32) {
        self.layout();
        self.move_offset = None;

        let x = (x - self.insets.left).max(0.0);
        let top = self.height - self.insets.top;
        let line_height = self.metrics.line_height();
        let row = if line_height > 0.0 {
            ((top - y) / line_height).floor() as i64
        } else {
            0
        };
        let line = row + self.first_line_showing as i64;
        let max_line = self.lines().saturating_sub(1) as i64;
        self.cursor_line = line.clamp(0, max_line) as usize;

        let offset = self.letter_under_cursor(x);
        self.field.set_cursor(offset);
        self.update_current_line();
    }

    fn available_width(&self) -> f32 {
        (self.width - self.insets.horizontal()).max(0.0)
    }

    fn update_lines_showing(&mut self) {
        let available = self.height - self.insets.vertical();
        let line_height = self.metrics.line_height();
        self.lines_showing = if line_height > 0.0 && available > 0.0 {
            (available / line_height).floor() as usize
        } else {
            0
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MonospaceMetrics;

    /// Area over unit-width cells: one pixel per column, one per row.
    fn unit_area(text: &str) -> TextArea {
        let mut area = TextArea::with_text(text, MonospaceMetrics::new(1.0, 1.0));
        area.set_size(100.0, 10.0);
        area.layout();
        area
    }

    fn narrow_area(text: &str, width: f32, rows: f32) -> TextArea {
        let mut area = TextArea::with_text(text, MonospaceMetrics::new(1.0, 1.0));
        area.set_size(width, rows);
        area.layout();
        area
    }

    #[test]
    fn test_lines_and_cursor_line() {
        let area = unit_area("ab\ncd\nef");
        assert_eq!(area.lines(), 3);
        assert_eq!(area.cursor_line(), 0);
        assert_eq!(area.lines_showing(), 10);
    }

    #[test]
    fn test_update_current_line_tracks_hard_breaks() {
        let mut area = unit_area("ab\ncd");
        area.set_cursor(3);
        assert_eq!(area.cursor_line(), 1);
        area.set_cursor(2);
        assert_eq!(area.cursor_line(), 0);
    }

    #[test]
    fn test_cursor_on_soft_boundary_stays_on_its_line() {
        // Width 4 wraps "abc def" as (0,4), (4,7); offset 4 is the shared
        // boundary.
        let mut area = narrow_area("abc def", 4.0, 5.0);
        assert_eq!(
            area.line_spans()
                .iter()
                .map(|s| (s.start, s.end))
                .collect::<Vec<_>>(),
            vec![(0, 4), (4, 7)]
        );

        // Coming from the right, the cursor lands on line 1 and the
        // ambiguous boundary must not pull it back to line 0.
        area.set_cursor(5);
        assert_eq!(area.cursor_line(), 1);
        area.set_cursor(4);
        assert_eq!(area.cursor_line(), 1);

        // Coming from the left it stays on line 0.
        area.set_cursor(1);
        assert_eq!(area.cursor_line(), 0);
        area.set_cursor(4);
        assert_eq!(area.cursor_line(), 0);
    }

    #[test]
    fn test_horizontal_crossing_soft_boundary() {
        let mut area = narrow_area("abc def", 4.0, 5.0);
        area.set_cursor(4);
        assert_eq!(area.cursor_line(), 0);

        // Forward across the zero-width boundary: line changes, offset
        // stays.
        area.move_cursor_horizontal(true, false);
        assert_eq!(area.cursor(), 4);
        assert_eq!(area.cursor_line(), 1);

        // And back.
        area.move_cursor_horizontal(false, false);
        assert_eq!(area.cursor(), 4);
        assert_eq!(area.cursor_line(), 0);

        // Away from the boundary it is plain linear motion.
        area.move_cursor_horizontal(false, false);
        assert_eq!(area.cursor(), 3);
        assert_eq!(area.cursor_line(), 0);
    }

    #[test]
    fn test_vertical_move_remembers_column() {
        let mut area = unit_area("abcdef\nghijkl");
        area.set_cursor(3);
        area.move_cursor_line(1);
        assert_eq!(area.cursor(), 10, "column 3 on line 1");
        area.move_cursor_line(0);
        assert_eq!(area.cursor(), 3, "back to the original offset");
    }

    #[test]
    fn test_vertical_move_through_short_line() {
        let mut area = unit_area("abcdef\nxy\nghijkl");
        area.set_cursor(5);
        area.move_cursor_line(1);
        assert_eq!(area.cursor(), 9, "clamped to the short line's end");
        area.move_cursor_line(2);
        assert_eq!(area.cursor(), 15, "column restored on the long line");
    }

    #[test]
    fn test_move_cursor_line_clamps() {
        let mut area = unit_area("abc\ndef");
        area.set_cursor(5);
        area.move_cursor_line(-5);
        assert_eq!(area.cursor_line(), 0);
        assert_eq!(area.cursor(), 0);

        area.move_cursor_line(i32::try_from(area.lines()).unwrap() + 5);
        assert_eq!(area.cursor(), 7);
        assert_eq!(area.cursor_line(), area.lines() - 1);
    }

    #[test]
    fn test_move_cursor_line_empty_text() {
        let mut area = unit_area("");
        area.move_cursor_line(3);
        assert_eq!(area.cursor_line(), 0);
        assert_eq!(area.cursor(), 0);
    }

    #[test]
    fn test_trailing_newline_cursor_past_table() {
        let mut area = unit_area("ab\n");
        assert_eq!(area.lines(), 2);
        area.set_cursor(3);
        assert_eq!(area.cursor_line(), 1, "implicit line after the newline");
        assert_eq!(area.letter_under_cursor(0.0), 3);
        assert_eq!(area.cursor_x(), 0.0);
    }

    #[test]
    fn test_letter_under_cursor_rounding() {
        let area = unit_area("abcd");
        // Boundaries at 0,1,2,3,4. Clicks round to the nearest boundary;
        // exact midpoints go to the later one.
        assert_eq!(area.letter_under_cursor(0.0), 0);
        assert_eq!(area.letter_under_cursor(0.4), 0);
        assert_eq!(area.letter_under_cursor(0.5), 1);
        assert_eq!(area.letter_under_cursor(2.6), 3);
        assert_eq!(area.letter_under_cursor(9.0), 4);
    }

    #[test]
    fn test_go_home_and_end() {
        let mut area = narrow_area("abc def", 4.0, 5.0);
        area.set_cursor(5);
        area.go_home(false);
        assert_eq!(area.cursor(), 4);
        area.go_end(false);
        assert_eq!(area.cursor(), 7);
        area.go_home(true);
        assert_eq!(area.cursor(), 0);
        area.go_end(true);
        assert_eq!(area.cursor(), 7);
    }

    #[test]
    fn test_show_cursor_scrolls_window() {
        let mut area = narrow_area("a\nb\nc\nd\ne\nf", 10.0, 2.0);
        assert_eq!(area.lines(), 6);
        assert_eq!(area.lines_showing(), 2);

        area.set_cursor(8); // line 4
        area.show_cursor();
        assert_eq!(area.cursor_line(), 4);
        assert_eq!(area.first_line_showing(), 3);

        area.set_cursor(0);
        area.show_cursor();
        assert_eq!(area.first_line_showing(), 0);
    }

    #[test]
    fn test_zero_height_viewport_navigation_completes() {
        let mut area = TextArea::with_text("a\nb\nc", MonospaceMetrics::new(1.0, 1.0));
        area.set_size(10.0, 0.0);
        area.layout();
        assert_eq!(area.lines_showing(), 0);

        area.move_cursor_line(2);
        assert_eq!(area.cursor_line(), 2);
        assert_eq!(area.first_line_showing(), 0, "window cannot follow");
    }

    #[test]
    fn test_click_positions_cursor() {
        // 3 lines, viewport exactly 3 rows tall, y-up coordinates.
        let mut area = narrow_area("abcd\nefgh\nijkl", 10.0, 3.0);
        // Top row.
        area.click(2.0, 2.5);
        assert_eq!(area.cursor_line(), 0);
        assert_eq!(area.cursor(), 2);
        // Bottom row.
        area.click(1.0, 0.5);
        assert_eq!(area.cursor_line(), 2);
        assert_eq!(area.cursor(), 11);
        // Far outside clamps.
        area.click(100.0, -50.0);
        assert_eq!(area.cursor_line(), 2);
        assert_eq!(area.cursor(), 14);
    }

    #[test]
    fn test_drag_builds_selection() {
        let mut area = narrow_area("abcd\nefgh", 10.0, 2.0);
        area.click(0.0, 1.5);
        assert_eq!(area.cursor(), 0);
        area.drag(3.0, 0.5);
        assert_eq!(area.field().selection_range(), Some((0, 8)));
    }

    #[test]
    fn test_selection_spans_geometry() {
        let mut area = narrow_area("abcd\nefgh\nijkl", 10.0, 3.0);
        area.select(2, 12);
        let spans = area.selection_spans();
        assert_eq!(
            spans,
            vec![
                SelectionSpan {
                    line: 0,
                    x: 2.0,
                    width: 2.0,
                },
                SelectionSpan {
                    line: 1,
                    x: 0.0,
                    width: 4.0,
                },
                SelectionSpan {
                    line: 2,
                    x: 0.0,
                    width: 2.0,
                },
            ]
        );
    }

    #[test]
    fn test_selection_spans_skip_untouched_lines() {
        let mut area = narrow_area("abcd\nefgh\nijkl", 10.0, 3.0);
        area.select(11, 13);
        let spans = area.selection_spans();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].line, 2);
    }

    #[test]
    fn test_cursor_xy() {
        let mut area = narrow_area("abcd\nefgh", 10.0, 5.0);
        area.set_cursor(7);
        assert_eq!(area.cursor_line(), 1);
        assert_eq!(area.cursor_x(), 2.0);
        // Line 1 visible at row 1; descent is -0.25 for unit metrics.
        assert_eq!(area.cursor_y(), 2.0 - 0.125);
        assert_eq!(area.line_y(1), 1.0);
    }

    #[test]
    fn test_preferred_height() {
        let mut area = TextArea::new(MonospaceMetrics::new(8.0, 16.0));
        area.set_preferred_rows(5.0);
        assert_eq!(area.preferred_height(), 80.0);

        area.set_insets(Insets::uniform(2.0));
        assert_eq!(area.preferred_height(), 84.0);

        area.set_min_height(200.0);
        assert_eq!(area.preferred_height(), 200.0);
    }

    #[test]
    fn test_edit_relayouts_and_follows_cursor() {
        let mut area = narrow_area("a\nb", 10.0, 2.0);
        area.set_cursor(3);
        area.insert("\nc\nd");
        assert_eq!(area.lines(), 4);
        assert_eq!(area.cursor_line(), 3);
        assert_eq!(area.first_line_showing(), 2, "window followed the cursor");

        area.delete_backward();
        assert_eq!(area.text(), "a\nb\nc\n");
        assert_eq!(area.cursor_line(), 3);
    }
}
