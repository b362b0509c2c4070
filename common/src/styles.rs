//! Pre-computed static text styles.
//!
//! Row text is drawn for every rebuild, so fonts and alignments are `const`
//! and live in read-only data instead of being constructed per draw call.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::text::{Alignment, Baseline, TextStyle, TextStyleBuilder};
use profont::PROFONT_12_POINT;

/// Pixel colour for text and other ink.
pub const INK: BinaryColor = BinaryColor::On;

/// Pixel colour for background.
pub const PAPER: BinaryColor = BinaryColor::Off;

// =============================================================================
// Text Alignment Styles
// =============================================================================

/// Left-aligned, positioned by the glyph top. Index, line and destination columns.
pub const LEFT_TOP: TextStyle = TextStyleBuilder::new().alignment(Alignment::Left).baseline(Baseline::Top).build();

/// Right-aligned, positioned by the glyph top. Display time column.
pub const RIGHT_TOP: TextStyle = TextStyleBuilder::new().alignment(Alignment::Right).baseline(Baseline::Top).build();

/// Centered both ways. Placeholder message.
pub const CENTERED: TextStyle = TextStyleBuilder::new().alignment(Alignment::Center).baseline(Baseline::Middle).build();

// =============================================================================
// Fonts and Text Styles
// =============================================================================

/// Departure row text (6x10 pixels, fits a 16px row with padding).
pub const ROW_TEXT: MonoTextStyle<'static, BinaryColor> = MonoTextStyle::new(&FONT_6X10, INK);

/// "No departures" message (`ProFont` 12pt).
pub const MESSAGE_TEXT: MonoTextStyle<'static, BinaryColor> = MonoTextStyle::new(&PROFONT_12_POINT, INK);
