//! Navigation-key glue.
//!
//! Reproduces the text-area key-listener semantics on top of the core
//! operations: SHIFT anchors and extends the selection, vertical keys keep
//! the remembered column, and every other key clears it. Key decoding and
//! key-repeat scheduling stay in the host; this module only consumes the
//! already-resolved navigation intent.

use crate::area::TextArea;
use bitflags::bitflags;

bitflags! {
    /// Modifier flags for navigation keys.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Extend the selection instead of collapsing it.
        const SHIFT = 0b0000_0001;
        /// Word-wise motion for Left/Right; document-wise for Home/End.
        const WORD = 0b0000_0010;
    }
}

/// A resolved navigation key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NavKey {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
}

impl TextArea {
    /// Apply a navigation key with modifiers.
    pub fn handle_nav(&mut self, key: NavKey, modifiers: Modifiers) {
        let shift = modifiers.contains(Modifiers::SHIFT);
        let word = modifiers.contains(Modifiers::WORD);

        if shift {
            self.field_mut().anchor_selection();
        } else {
            self.field_mut().clear_selection();
        }

        match key {
            NavKey::Down => {
                self.move_cursor_line(self.cursor_line() as i32 + 1);
            }
            NavKey::Up => {
                self.move_cursor_line(self.cursor_line() as i32 - 1);
            }
            NavKey::Left => {
                self.clear_move_offset();
                self.move_cursor_horizontal(false, word);
            }
            NavKey::Right => {
                self.clear_move_offset();
                self.move_cursor_horizontal(true, word);
            }
            NavKey::Home => {
                self.clear_move_offset();
                self.go_home(word);
            }
            NavKey::End => {
                self.clear_move_offset();
                self.go_end(word);
            }
        }
        self.show_cursor();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MonospaceMetrics;

    fn unit_area(text: &str) -> TextArea {
        let mut area = TextArea::with_text(text, MonospaceMetrics::new(1.0, 1.0));
        area.set_size(100.0, 10.0);
        area.layout();
        area
    }

    #[test]
    fn test_down_up_round_trip_keeps_column() {
        let mut area = unit_area("abcdef\nxy\nghijkl");
        area.set_cursor(4);

        area.handle_nav(NavKey::Down, Modifiers::empty());
        assert_eq!(area.cursor(), 9, "clamped to the short middle line");
        area.handle_nav(NavKey::Down, Modifiers::empty());
        assert_eq!(area.cursor(), 14, "column restored");
        area.handle_nav(NavKey::Up, Modifiers::empty());
        area.handle_nav(NavKey::Up, Modifiers::empty());
        assert_eq!(area.cursor(), 4, "round trip returns to the origin");
    }

    #[test]
    fn test_horizontal_key_resets_remembered_column() {
        let mut area = unit_area("abcdef\nghijkl");
        area.set_cursor(4);
        area.handle_nav(NavKey::Down, Modifiers::empty());
        assert_eq!(area.cursor(), 11);

        area.handle_nav(NavKey::Left, Modifiers::empty());
        assert_eq!(area.cursor(), 10);
        area.handle_nav(NavKey::Up, Modifiers::empty());
        assert_eq!(area.cursor(), 3, "column re-captured after Left");
    }

    #[test]
    fn test_shift_down_extends_selection() {
        let mut area = unit_area("abc\ndef");
        area.set_cursor(1);
        area.handle_nav(NavKey::Down, Modifiers::SHIFT);
        assert_eq!(area.field().selection_range(), Some((1, 5)));

        // Unmodified motion collapses it again.
        area.handle_nav(NavKey::Up, Modifiers::empty());
        assert!(!area.field().has_selection());
    }

    #[test]
    fn test_word_modifier_home_end() {
        let mut area = unit_area("abc def\nghi");
        area.set_cursor(5);
        area.handle_nav(NavKey::End, Modifiers::empty());
        assert_eq!(area.cursor(), 7, "end of the wrapped line");
        area.handle_nav(NavKey::End, Modifiers::WORD);
        assert_eq!(area.cursor(), 11, "end of the text");
        area.handle_nav(NavKey::Home, Modifiers::empty());
        assert_eq!(area.cursor(), 8);
        area.handle_nav(NavKey::Home, Modifiers::WORD);
        assert_eq!(area.cursor(), 0);
    }

    #[test]
    fn test_word_jump_right() {
        let mut area = unit_area("foo bar");
        area.handle_nav(NavKey::Right, Modifiers::WORD);
        assert_eq!(area.cursor(), 3);
        area.handle_nav(NavKey::Right, Modifiers::WORD);
        assert_eq!(area.cursor(), 7);
    }
}
