//! Font metrics and glyph-position measurement.
//!
//! The engine never shapes text itself; a [`FontMetrics`] provider supplies
//! per-character pixel advances plus vertical metrics, and the engine folds
//! them into a [`GlyphPositions`] table: one cumulative boundary per character
//! edge (text length + 1 entries). Substring width is then a subtraction of
//! two boundaries, which is what keeps the wrap scan linear.
//!
//! Measurement runs through a [`ScratchPool`] so the layout pass reuses its
//! buffers instead of reallocating; the pool hands out scoped guards that
//! return their buffer on drop.

use crate::error::{Error, Result};
use ropey::Rope;
use std::ops::{Deref, DerefMut};
use unicode_width::UnicodeWidthChar;

/// Pixel metrics for a rendered font.
///
/// Advances must be non-negative; the engine assumes boundary positions are
/// monotonic and does not defend against a provider that violates this (see
/// [`GlyphPositions::validate`] for a debugging aid).
pub trait FontMetrics {
    /// Horizontal advance of a single character, in pixels.
    fn advance(&self, ch: char) -> f32;

    /// Height of one text row, in pixels.
    fn line_height(&self) -> f32;

    /// Distance from the baseline to the bottom of the glyph box, in pixels.
    /// Negative, following the usual font convention.
    fn descent(&self) -> f32;
}

/// Fixed-cell metric provider based on Unicode column widths.
///
/// Each character advances by its terminal column count times `cell_width`,
/// so CJK and emoji occupy two cells and zero-width characters none. Suitable
/// for monospaced hosts and as the deterministic oracle in tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMetrics {
    cell_width: f32,
    line_height: f32,
    descent: f32,
}

impl MonospaceMetrics {
    /// Create metrics with the given cell width and line height.
    #[must_use]
    pub fn new(cell_width: f32, line_height: f32) -> Self {
        Self {
            cell_width,
            line_height,
            descent: -line_height * 0.25,
        }
    }

    /// Override the descent.
    #[must_use]
    pub fn with_descent(mut self, descent: f32) -> Self {
        self.descent = descent;
        self
    }
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self::new(8.0, 16.0)
    }
}

impl FontMetrics for MonospaceMetrics {
    fn advance(&self, ch: char) -> f32 {
        UnicodeWidthChar::width(ch).unwrap_or(0) as f32 * self.cell_width
    }

    fn line_height(&self) -> f32 {
        self.line_height
    }

    fn descent(&self) -> f32 {
        self.descent
    }
}

/// Cumulative glyph boundary positions for a rendered string.
///
/// `positions[i]` is the pixel x of the boundary before character `i`;
/// `positions[len]` is the right edge of the last character. Line terminators
/// are forced to zero advance so widths measured across a hard break equal
/// the visible line width.
#[derive(Clone, Debug)]
pub struct GlyphPositions {
    positions: Vec<f32>,
}

impl GlyphPositions {
    /// Create an empty table (one boundary at 0.0, for empty text).
    #[must_use]
    pub fn new() -> Self {
        Self {
            positions: vec![0.0],
        }
    }

    /// Create a table from raw boundary positions.
    ///
    /// Hosts with their own shaping pipeline can hand the engine a table
    /// directly instead of going through [`FontMetrics`].
    #[must_use]
    pub fn from_boundaries(positions: Vec<f32>) -> Self {
        let mut positions = positions;
        if positions.is_empty() {
            positions.push(0.0);
        }
        Self { positions }
    }

    /// Number of boundaries (text length + 1).
    #[must_use]
    pub fn boundary_count(&self) -> usize {
        self.positions.len()
    }

    /// Boundary position before character `i`, clamped to the table.
    #[must_use]
    pub fn position(&self, i: usize) -> f32 {
        self.positions
            .get(i)
            .or_else(|| self.positions.last())
            .copied()
            .unwrap_or(0.0)
    }

    /// Pixel width of the character range `[a, b)`.
    #[must_use]
    pub fn width_between(&self, a: usize, b: usize) -> f32 {
        self.position(b) - self.position(a)
    }

    /// Re-measure the table for `rope` using `metrics`, reusing a buffer
    /// from `pool` for the measurement pass.
    pub fn rebuild(&mut self, rope: &Rope, metrics: &dyn FontMetrics, pool: &mut ScratchPool) {
        let mut scratch = pool.acquire();
        scratch.reserve(rope.len_chars() + 1);
        scratch.push(0.0);
        let mut x = 0.0;
        for ch in rope.chars() {
            if ch != '\n' && ch != '\r' {
                x += metrics.advance(ch);
            }
            scratch.push(x);
        }
        // The freshly measured buffer becomes our storage; the old storage
        // rides the guard back into the pool.
        self.swap_storage(&mut scratch);
    }

    /// Swap the backing storage with `other`.
    pub fn swap_storage(&mut self, other: &mut Vec<f32>) {
        std::mem::swap(&mut self.positions, other);
    }

    /// Check table shape against the text it claims to describe.
    ///
    /// Verifies the boundary count is `text_chars + 1` and that boundaries
    /// never decrease. Layout does not call this; it exists so hosts can
    /// diagnose a misbehaving metric provider.
    pub fn validate(&self, text_chars: usize) -> Result<()> {
        let expected = text_chars + 1;
        if self.positions.len() != expected {
            return Err(Error::PositionCountMismatch {
                expected,
                actual: self.positions.len(),
            });
        }
        for (index, pair) in self.positions.windows(2).enumerate() {
            if pair[1] < pair[0] {
                return Err(Error::NonMonotonicPositions { index: index + 1 });
            }
        }
        Ok(())
    }
}

impl Default for GlyphPositions {
    fn default() -> Self {
        Self::new()
    }
}

/// Pool of measurement buffers.
///
/// Layout passes acquire a buffer, fill it, and let the guard return it.
/// Steady state is two buffers ping-ponging between the pool and
/// [`GlyphPositions`], with no allocation per recompute.
#[derive(Debug, Default)]
pub struct ScratchPool {
    free: Vec<Vec<f32>>,
}

impl ScratchPool {
    /// Create an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire a cleared buffer, reusing a pooled one when available.
    pub fn acquire(&mut self) -> ScratchGuard<'_> {
        let buf = self.free.pop().unwrap_or_default();
        ScratchGuard {
            pool: self,
            buf: Some(buf),
        }
    }

    /// Number of idle buffers held by the pool.
    #[must_use]
    pub fn idle(&self) -> usize {
        self.free.len()
    }
}

/// Scoped handle to a pooled measurement buffer.
///
/// Dereferences to `Vec<f32>`; the buffer is cleared and returned to the
/// pool when the guard drops, so it cannot outlive the measurement pass.
pub struct ScratchGuard<'a> {
    pool: &'a mut ScratchPool,
    buf: Option<Vec<f32>>,
}

impl Deref for ScratchGuard<'_> {
    type Target = Vec<f32>;

    fn deref(&self) -> &Vec<f32> {
        self.buf.as_ref().expect("scratch buffer present until drop")
    }
}

impl DerefMut for ScratchGuard<'_> {
    fn deref_mut(&mut self) -> &mut Vec<f32> {
        self.buf.as_mut().expect("scratch buffer present until drop")
    }
}

impl Drop for ScratchGuard<'_> {
    fn drop(&mut self) {
        if let Some(mut buf) = self.buf.take() {
            buf.clear();
            self.pool.free.push(buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monospace_advances() {
        let m = MonospaceMetrics::new(8.0, 16.0);
        assert_eq!(m.advance('a'), 8.0);
        assert_eq!(m.advance(' '), 8.0);
        assert_eq!(m.advance('中'), 16.0);
        assert_eq!(m.advance('\u{200b}'), 0.0);
        assert_eq!(m.line_height(), 16.0);
        assert!(m.descent() < 0.0);
    }

    #[test]
    fn test_rebuild_zeroes_newlines() {
        let rope = Rope::from_str("ab\ncd");
        let mut pool = ScratchPool::new();
        let mut positions = GlyphPositions::new();
        positions.rebuild(&rope, &MonospaceMetrics::new(1.0, 1.0), &mut pool);

        assert_eq!(positions.boundary_count(), 6);
        assert_eq!(positions.position(2), 2.0);
        // '\n' contributes no advance
        assert_eq!(positions.position(3), 2.0);
        assert_eq!(positions.position(5), 4.0);
        assert_eq!(positions.width_between(3, 5), 2.0);
    }

    #[test]
    fn test_position_clamps() {
        let positions = GlyphPositions::from_boundaries(vec![0.0, 4.0, 9.0]);
        assert_eq!(positions.position(2), 9.0);
        assert_eq!(positions.position(10), 9.0);
    }

    #[test]
    fn test_validate() {
        let positions = GlyphPositions::from_boundaries(vec![0.0, 4.0, 9.0]);
        assert_eq!(positions.validate(2), Ok(()));
        assert_eq!(
            positions.validate(5),
            Err(Error::PositionCountMismatch {
                expected: 6,
                actual: 3,
            })
        );

        let bad = GlyphPositions::from_boundaries(vec![0.0, 4.0, 3.0]);
        assert_eq!(
            bad.validate(2),
            Err(Error::NonMonotonicPositions { index: 2 })
        );
    }

    #[test]
    fn test_scratch_pool_reuses_buffers() {
        let mut pool = ScratchPool::new();
        {
            let mut scratch = pool.acquire();
            scratch.extend([1.0, 2.0, 3.0]);
        }
        assert_eq!(pool.idle(), 1);

        let scratch = pool.acquire();
        assert!(scratch.is_empty(), "returned buffers come back cleared");
        assert_eq!(pool.idle(), 0);
        drop(scratch);
        assert_eq!(pool.idle(), 1);
    }

    #[test]
    fn test_rebuild_ping_pongs_storage() {
        let mut pool = ScratchPool::new();
        let mut positions = GlyphPositions::new();
        let rope = Rope::from_str("hello");

        positions.rebuild(&rope, &MonospaceMetrics::new(1.0, 1.0), &mut pool);
        positions.rebuild(&rope, &MonospaceMetrics::new(1.0, 1.0), &mut pool);

        // One buffer in the table, one idle in the pool.
        assert_eq!(pool.idle(), 1);
        assert_eq!(positions.boundary_count(), 6);
        assert_eq!(positions.position(5), 5.0);
    }
}
