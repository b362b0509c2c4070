//! Row rendering.
//!
//! The paging engine only needs "paint this row into this rectangle"; font
//! choice and column layout belong to the [`RowRenderer`]. Everything is drawn
//! through `DrawTarget`, so the same renderer paints into the board's pixel
//! buffer, a simulator window, or a test buffer.
//!
//! Row layout (16px tall):
//! ```text
//! | 2 | 22  | 52 ...                                  time -2 |
//! | 1 | 55  | Oxford Circus                               3min |
//! ```

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::Text;
use heapless::String;

use crate::config::{DESTINATION_X, INDEX_X, LINE_X, TEXT_TOP_PADDING, TIME_RIGHT_MARGIN};
use crate::departure::Entry;
use crate::styles::{CENTERED, LEFT_TOP, MESSAGE_TEXT, PAPER, RIGHT_TOP, ROW_TEXT};
use crate::text::push_u32;

/// Paints departure rows and messages into a monochrome target.
pub trait RowRenderer {
    /// Paint `entry` into `area`, labelled with its 1-based `index`.
    ///
    /// Must not touch pixels outside `area`.
    fn paint_row<D>(
        &self,
        target: &mut D,
        area: Rectangle,
        entry: &Entry,
        index: usize,
    ) where
        D: DrawTarget<Color = BinaryColor>;

    /// Paint a free-form message centered in `area`.
    fn paint_message<D>(
        &self,
        target: &mut D,
        area: Rectangle,
        message: &str,
    ) where
        D: DrawTarget<Color = BinaryColor>;
}

/// Renderer using the built-in mono fonts.
#[derive(Clone, Copy, Debug, Default)]
pub struct MonoRowRenderer;

impl RowRenderer for MonoRowRenderer {
    fn paint_row<D>(
        &self,
        target: &mut D,
        area: Rectangle,
        entry: &Entry,
        index: usize,
    ) where
        D: DrawTarget<Color = BinaryColor>,
    {
        let mut row = target.clipped(&area);
        area.into_styled(PrimitiveStyle::with_fill(PAPER)).draw(&mut row).ok();

        let left = area.top_left.x;
        let top = area.top_left.y + TEXT_TOP_PADDING;

        let mut index_label: String<4> = String::new();
        push_u32(&mut index_label, index as u32);

        Text::with_text_style(&index_label, Point::new(left + INDEX_X, top), ROW_TEXT, LEFT_TOP)
            .draw(&mut row)
            .ok();
        Text::with_text_style(&entry.line, Point::new(left + LINE_X, top), ROW_TEXT, LEFT_TOP)
            .draw(&mut row)
            .ok();
        Text::with_text_style(&entry.destination, Point::new(left + DESTINATION_X, top), ROW_TEXT, LEFT_TOP)
            .draw(&mut row)
            .ok();

        let right = left + area.size.width as i32 - TIME_RIGHT_MARGIN;
        Text::with_text_style(&entry.display_time, Point::new(right, top), ROW_TEXT, RIGHT_TOP)
            .draw(&mut row)
            .ok();
    }

    fn paint_message<D>(
        &self,
        target: &mut D,
        area: Rectangle,
        message: &str,
    ) where
        D: DrawTarget<Color = BinaryColor>,
    {
        let mut clipped = target.clipped(&area);
        area.into_styled(PrimitiveStyle::with_fill(PAPER)).draw(&mut clipped).ok();
        Text::with_text_style(message, area.center(), MESSAGE_TEXT, CENTERED)
            .draw(&mut clipped)
            .ok();
    }
}
