//! Fuzz target for the wrap engine.
//!
//! Feeds arbitrary text and widths through recompute and checks the break
//! table stays well-formed: no panics, spans ordered and non-overlapping,
//! terminators excluded.

#![no_main]

use libfuzzer_sys::fuzz_target;
use ropey::Rope;
use textarea_core::{FieldState, GlyphPositions, MonospaceMetrics, ScratchPool, WrapLayout};

fuzz_target!(|input: (String, u16)| {
    let (text, raw_width) = input;
    let width = f32::from(raw_width) / 8.0;

    let field = FieldState::with_text(&text);
    let rope = Rope::from_str(&text);
    let mut pool = ScratchPool::new();
    let mut positions = GlyphPositions::new();
    positions.rebuild(&rope, &MonospaceMetrics::new(1.0, 1.0), &mut pool);

    let mut wrap = WrapLayout::new();
    wrap.recompute(&rope, &positions, width, 0, |i| field.continue_cursor(i, 0));

    let chars: Vec<char> = text.chars().collect();
    let mut prev_end = 0usize;
    for span in wrap.spans() {
        assert!(span.start <= span.end);
        assert!(span.start >= prev_end);
        assert!(span.start - prev_end <= 1);
        assert!(span.end <= chars.len());
        for &ch in &chars[span.start..span.end] {
            assert!(ch != '\n' && ch != '\r');
        }
        prev_end = span.end;
    }
});
