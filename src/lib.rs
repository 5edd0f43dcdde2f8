//! `textarea_core` - word-wrapped multi-line text editing core
//!
//! Given a character buffer, an available pixel width, and a font-metric
//! provider, this crate computes word-wrapped line boundaries lazily and
//! keeps cursor and selection positions consistent across three coordinate
//! systems: linear char offsets, wrapped line/column positions, and pixels.
//!
//! Rendering, clipboard, and key decoding stay in the host; the crate
//! produces offsets and span geometry only.
//!
//! # Example
//!
//! ```
//! use textarea_core::{Modifiers, MonospaceMetrics, NavKey, TextArea};
//!
//! let mut area = TextArea::with_text("hello world foobar", MonospaceMetrics::new(1.0, 1.0));
//! area.set_size(8.0, 4.0);
//! area.layout();
//! assert_eq!(area.lines(), 3);
//!
//! // Vertical navigation keeps the visual column.
//! area.set_cursor(2);
//! area.handle_nav(NavKey::Down, Modifiers::empty());
//! assert_eq!(area.cursor_line(), 1);
//! ```

// Crate-level lint configuration
#![allow(clippy::cast_possible_truncation)] // Intentional coordinate casts
#![allow(clippy::cast_sign_loss)] // Intentional coordinate conversions
#![allow(clippy::cast_precision_loss)] // Intentional for pixel math
#![allow(clippy::cast_possible_wrap)] // Intentional coordinate conversions
#![allow(clippy::module_name_repetitions)] // Allow WrapLayout in wrap etc
#![allow(clippy::missing_errors_doc)] // Error conditions documented on the type
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::must_use_candidate)] // Getters are obvious enough
#![allow(clippy::float_cmp)] // Exact comparisons against cached pixel values
#![allow(clippy::suboptimal_flops)] // Standard math notation is clearer than mul_add
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::items_after_statements)] // Common pattern in tests

pub mod area;
pub mod diag;
pub mod error;
pub mod field;
pub mod input;
pub mod metrics;
pub mod wrap;

// Re-export core types at crate root
pub use area::{Insets, SelectionSpan, TextArea};
pub use diag::{LogLevel, emit_event, emit_log, set_event_callback, set_log_callback};
pub use error::{Error, Result};
pub use field::FieldState;
pub use input::{Modifiers, NavKey};
pub use metrics::{FontMetrics, GlyphPositions, MonospaceMetrics, ScratchGuard, ScratchPool};
pub use wrap::{LineSpan, WrapLayout};
