//! Single-line editing core.
//!
//! [`FieldState`] owns the rope-backed text, the linear cursor, and the
//! selection anchor, and implements the line-agnostic half of editing:
//! insertion, deletion, linear and word-jump cursor motion, and the
//! continuation predicate that marks positions the cursor (and the wrap
//! engine's soft breaks) must not land inside.
//!
//! The multi-line engine ([`TextArea`](crate::TextArea)) composes a
//! `FieldState` and layers wrapped-line awareness on top; nothing here knows
//! about line breaks or pixels.
//!
//! Every text mutation bumps a revision counter. The wrap cache keys on it,
//! so mutating through any path (including
//! [`TextArea::field_mut`](crate::TextArea::field_mut)) invalidates layout
//! without further bookkeeping.

use ropey::Rope;
use unicode_segmentation::UnicodeSegmentation;

/// Linear text, cursor, and selection state for a single editing surface.
#[derive(Clone, Debug, Default)]
pub struct FieldState {
    text: Rope,
    cursor: usize,
    selection_anchor: Option<usize>,
    revision: u64,
}

impl FieldState {
    /// Create an empty field.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a field with initial text, cursor at the start.
    #[must_use]
    pub fn with_text(text: &str) -> Self {
        Self {
            text: Rope::from_str(text),
            cursor: 0,
            selection_anchor: None,
            revision: 0,
        }
    }

    /// Replace the entire text, resetting cursor and selection.
    pub fn set_text(&mut self, text: &str) {
        self.text = Rope::from_str(text);
        self.cursor = 0;
        self.selection_anchor = None;
        self.revision += 1;
    }

    /// The underlying rope.
    #[must_use]
    pub fn rope(&self) -> &Rope {
        &self.text
    }

    /// Full text content.
    #[must_use]
    pub fn text(&self) -> String {
        self.text.to_string()
    }

    /// Text length in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len_chars()
    }

    /// Check if the text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.len_chars() == 0
    }

    /// Character at linear offset `i`, if in range.
    #[must_use]
    pub fn char_at(&self, i: usize) -> Option<char> {
        (i < self.len()).then(|| self.text.char(i))
    }

    /// Mutation counter; bumped by every text change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Current cursor offset.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Place the cursor, clamped to the text.
    pub fn set_cursor(&mut self, offset: usize) {
        self.cursor = offset.min(self.len());
    }

    /// Selection anchor, if a selection is active.
    #[must_use]
    pub fn anchor(&self) -> Option<usize> {
        self.selection_anchor
    }

    /// Check if a selection is active (it may still be empty).
    #[must_use]
    pub fn has_selection(&self) -> bool {
        self.selection_anchor.is_some()
    }

    /// Select the range between `anchor` and `cursor`, both clamped.
    pub fn select(&mut self, anchor: usize, cursor: usize) {
        self.selection_anchor = Some(anchor.min(self.len()));
        self.cursor = cursor.min(self.len());
    }

    /// Select the whole text.
    pub fn select_all(&mut self) {
        self.selection_anchor = Some(0);
        self.cursor = self.len();
    }

    /// Drop the selection, keeping the cursor in place.
    pub fn clear_selection(&mut self) {
        self.selection_anchor = None;
    }

    /// Anchor a selection at the cursor if none is active.
    pub fn anchor_selection(&mut self) {
        if self.selection_anchor.is_none() {
            self.selection_anchor = Some(self.cursor);
        }
    }

    /// Ordered selection range `(start, end)`, if a selection is active.
    #[must_use]
    pub fn selection_range(&self) -> Option<(usize, usize)> {
        self.selection_anchor.map(|anchor| {
            (anchor.min(self.cursor), anchor.max(self.cursor))
        })
    }

    /// The selected text, if the selection is non-empty.
    #[must_use]
    pub fn selected_text(&self) -> Option<String> {
        let (start, end) = self.selection_range()?;
        if start == end {
            return None;
        }
        Some(self.text.slice(start..end).to_string())
    }

    /// Insert at the cursor, replacing any active selection.
    ///
    /// Newlines are inserted verbatim; the multi-line engine always accepts
    /// them.
    pub fn insert(&mut self, s: &str) {
        self.delete_selection();
        self.text.insert(self.cursor, s);
        self.cursor += s.chars().count();
        self.revision += 1;
    }

    /// Delete the active selection. Returns true if anything was removed.
    pub fn delete_selection(&mut self) -> bool {
        let Some((start, end)) = self.selection_range() else {
            return false;
        };
        self.selection_anchor = None;
        if start == end {
            return false;
        }
        self.text.remove(start..end);
        self.cursor = start;
        self.revision += 1;
        true
    }

    /// Delete the character before the cursor (backspace), or the selection.
    pub fn delete_backward(&mut self) {
        if self.delete_selection() {
            return;
        }
        if self.cursor > 0 {
            self.cursor -= 1;
            self.text.remove(self.cursor..self.cursor + 1);
            self.revision += 1;
        }
    }

    /// Delete the character after the cursor, or the selection.
    pub fn delete_forward(&mut self) {
        if self.delete_selection() {
            return;
        }
        if self.cursor < self.len() {
            self.text.remove(self.cursor..self.cursor + 1);
            self.revision += 1;
        }
    }

    /// Step the cursor one character, or across a word when `jump` is set.
    ///
    /// A forward jump rests on the first non-word position after the word;
    /// a backward jump rests on the position after the preceding run of
    /// word characters.
    pub fn move_cursor(&mut self, forward: bool, jump: bool) {
        if forward {
            while self.cursor < self.len() {
                self.cursor += 1;
                if !(jump && self.cursor < self.len() && self.continue_cursor(self.cursor, 0)) {
                    break;
                }
            }
        } else {
            while self.cursor > 0 {
                self.cursor -= 1;
                if !(jump && self.cursor > 0 && self.continue_cursor(self.cursor, -1)) {
                    break;
                }
            }
        }
    }

    /// Check whether the position `index + offset` continues the preceding
    /// character: either a word character (cursor jumps pass through) or a
    /// grapheme continuation such as a combining mark (soft breaks and
    /// cursor stops are both vetoed there).
    #[must_use]
    pub fn continue_cursor(&self, index: usize, offset: i32) -> bool {
        let Some(pos) = checked_pos(index, offset, self.len()) else {
            return false;
        };
        let ch = self.text.char(pos);
        if is_word_char(ch) {
            return true;
        }
        pos > 0 && is_grapheme_continuation(self.text.char(pos - 1), ch)
    }
}

/// Word characters for jump motion and soft-break tracking.
#[must_use]
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric()
}

/// `index + offset` as a valid char position, if in `[0, len)`.
fn checked_pos(index: usize, offset: i32, len: usize) -> Option<usize> {
    let pos = index as i64 + i64::from(offset);
    (pos >= 0 && (pos as usize) < len).then_some(pos as usize)
}

/// Check whether `cur` extends the grapheme cluster started by `prev`.
fn is_grapheme_continuation(prev: char, cur: char) -> bool {
    let mut pair = String::with_capacity(8);
    pair.push(prev);
    pair.push(cur);
    pair.graphemes(true).count() == 1
}
