//! What the display shows right now.
//!
//! [`DepartureBoard::visible_portion`] crops the header and the 3-row body
//! window out of the extended buffer; the display driver blits them at y=0 and
//! y=[`HEADER_HEIGHT`]. The remaining accessors describe the same window in
//! text for status output.

use heapless::{String, Vec};

use crate::board::DepartureBoard;
use crate::config::{HEADER_HEIGHT, PLACEHOLDER_HEIGHT, ROW_HEIGHT, ROWS_PER_PAGE, VIEWPORT_HEIGHT};
use crate::departure::DisplayTimePolicy;
use crate::framebuffer::Region;
use crate::render::RowRenderer;
use crate::text::push_u32;

/// Shown in the snapshot when there are no departures.
pub const NO_DEPARTURES_ROW: &str = "No Departures Planned";

/// Text form of the visible line range, e.g. `Line5-7`.
pub type LineRange = String<16>;

/// Text form of the scroll state, e.g. `Scroll group 2`.
pub type StateDescription = String<24>;

/// One visible body row as text. Blank past the end of the dataset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowSnapshot<'a> {
    /// 1-based row number as painted in the index column.
    pub index: usize,
    /// Route label.
    pub line: &'a str,
    /// Destination text.
    pub destination: &'a str,
    /// Right-hand time column text.
    pub display_time: &'a str,
}

impl<'a> RowSnapshot<'a> {
    const fn blank(index: usize) -> Self {
        Self {
            index,
            line: "",
            destination: "",
            display_time: "",
        }
    }
}

/// The three visible body rows.
pub type RowsSnapshot<'a> = Vec<RowSnapshot<'a>, ROWS_PER_PAGE>;

impl<R: RowRenderer, P: DisplayTimePolicy> DepartureBoard<R, P> {
    /// Header region and body region for this frame.
    ///
    /// With no departures the first region is the placeholder message and
    /// there is no body.
    pub fn visible_portion(&self) -> (Region<'_>, Option<Region<'_>>) {
        if self.is_empty() {
            return (self.placeholder().region(0, PLACEHOLDER_HEIGHT), None);
        }

        let buffer = self.buffer();
        let top = if self.layout().is_scrollable() {
            HEADER_HEIGHT + self.offset()
        } else {
            HEADER_HEIGHT
        };
        (buffer.region(0, HEADER_HEIGHT), Some(buffer.region(top, VIEWPORT_HEIGHT)))
    }

    /// Visible dataset rows as `Line{first}-{last}`, 1-based with the header
    /// as line 1.
    pub fn current_line_range(&self) -> LineRange {
        let mut text = LineRange::new();
        let len = self.dataset().len();
        if self.is_empty() {
            text.push_str("No Departures").ok();
            return text;
        }

        let (first, last) = if self.layout().is_scrollable() {
            let first = self.folded_offset() / ROW_HEIGHT + 2;
            (first, (first + 2).min(len as u32))
        } else {
            (2, len as u32)
        };

        text.push_str("Line").ok();
        push_u32(&mut text, first);
        text.push('-').ok();
        push_u32(&mut text, last);
        text
    }

    /// `No Departures`, `Static`, or `Scroll group N` for the page the cursor
    /// is in.
    pub fn state_description(&self) -> StateDescription {
        let mut text = StateDescription::new();
        if self.is_empty() {
            text.push_str("No Departures").ok();
        } else if !self.layout().is_scrollable() {
            text.push_str("Static").ok();
        } else {
            text.push_str("Scroll group ").ok();
            push_u32(&mut text, self.layout().group_at(self.offset()) as u32);
        }
        text
    }

    /// The three visible body rows.
    ///
    /// Rows inside the duplicated wrap page report the first-page rows they
    /// copy.
    pub fn current_rows_snapshot(&self) -> RowsSnapshot<'_> {
        let mut rows = RowsSnapshot::new();
        let dataset = self.dataset();
        if self.is_empty() {
            rows.push(RowSnapshot {
                index: 1,
                line: NO_DEPARTURES_ROW,
                ..RowSnapshot::blank(1)
            })
            .ok();
            return rows;
        }

        let padded = self.layout().padded_rows();
        let start = (self.folded_offset() / ROW_HEIGHT) as usize + 1;
        for slot in 0..ROWS_PER_PAGE {
            let mut row = start + slot;
            if row > padded {
                row -= padded;
            }
            let snapshot = match dataset.get(row) {
                Some(entry) => RowSnapshot {
                    index: row + 1,
                    line: &entry.line,
                    destination: &entry.destination,
                    display_time: &entry.display_time,
                },
                None => RowSnapshot::blank(row + 1),
            };
            rows.push(snapshot).ok();
        }
        rows
    }

    /// Cursor offset with the wrap page mapped back onto page 1.
    fn folded_offset(&self) -> u32 {
        match self.layout().wrap_offset() {
            0 => 0,
            wrap => self.offset() % wrap,
        }
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use super::*;
    use crate::config::ScrollConfig;
    use crate::departure::{Dataset, Entry, FrozenPolicy};
    use crate::render::MonoRowRenderer;

    type Board = DepartureBoard<MonoRowRenderer, FrozenPolicy>;

    const DESTINATIONS: [&str; 10] = [
        "Stratford",
        "Oxford Circus",
        "Brixton",
        "Walthamstow",
        "Victoria",
        "Euston",
        "Seven Sisters",
        "Green Park",
        "Pimlico",
        "Vauxhall",
    ];

    fn board_with(rows: usize) -> Board {
        let mut board = Board::new(MonoRowRenderer, FrozenPolicy, ScrollConfig::default());
        let dataset: Dataset = DESTINATIONS
            .iter()
            .take(rows)
            .map(|dest| Entry::new("VIC", dest, Duration::ZERO, "").with_display_time("2min"))
            .collect();
        let _ = board.set_dataset(dataset);
        board
    }

    /// Tick through one pause and one slide, `pages` times.
    fn scroll_pages(
        board: &mut Board,
        pages: u64,
    ) {
        board.tick(Duration::ZERO);
        for page in 1..=pages {
            board.tick(Duration::from_secs(6 * page - 1));
            board.tick(Duration::from_secs(6 * page));
        }
    }

    #[test]
    fn test_empty_board_shows_placeholder() {
        let board = board_with(0);
        let (header, body) = board.visible_portion();
        assert_eq!(header.height(), PLACEHOLDER_HEIGHT);
        assert_eq!(header, board.placeholder().region(0, PLACEHOLDER_HEIGHT));
        assert!(body.is_none());
        assert_eq!(board.state_description().as_str(), "No Departures");
        assert_eq!(board.current_line_range().as_str(), "No Departures");

        let rows = board.current_rows_snapshot();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].index, 1);
        assert_eq!(rows[0].line, NO_DEPARTURES_ROW);
    }

    #[test]
    fn test_header_only_board() {
        let board = board_with(1);
        let (header, body) = board.visible_portion();
        assert!(!header.is_blank());
        assert!(body.is_some_and(|b| b.is_blank()));
        assert_eq!(board.state_description().as_str(), "Static");
        assert_eq!(board.current_line_range().as_str(), "Line2-1");

        let rows = board.current_rows_snapshot();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], RowSnapshot::blank(2));
        assert_eq!(rows[1], RowSnapshot::blank(3));
        assert_eq!(rows[2], RowSnapshot::blank(4));
    }

    #[test]
    fn test_static_board_crops_fixed_window() {
        let board = board_with(3);
        let (header, body) = board.visible_portion();
        assert_eq!(header, board.buffer().region(0, HEADER_HEIGHT));
        assert_eq!(body, Some(board.buffer().region(HEADER_HEIGHT, VIEWPORT_HEIGHT)));
        assert_eq!(board.state_description().as_str(), "Static");
        assert_eq!(board.current_line_range().as_str(), "Line2-3");

        let rows = board.current_rows_snapshot();
        assert_eq!(rows[0].index, 2);
        assert_eq!(rows[0].destination, "Oxford Circus");
        assert_eq!(rows[1].destination, "Brixton");
        assert_eq!(rows[2], RowSnapshot::blank(4));
    }

    #[test]
    fn test_scrolling_window_follows_offset() {
        let mut board = board_with(10);
        scroll_pages(&mut board, 1);
        assert_eq!(board.offset(), 48);

        let (_, body) = board.visible_portion();
        assert_eq!(body, Some(board.buffer().region(HEADER_HEIGHT + 48, VIEWPORT_HEIGHT)));
        assert_eq!(board.state_description().as_str(), "Scroll group 2");
        assert_eq!(board.current_line_range().as_str(), "Line5-7");

        let rows = board.current_rows_snapshot();
        assert_eq!(rows[0].index, 5);
        assert_eq!(rows[0].destination, "Victoria");
        assert_eq!(rows[2].destination, "Seven Sisters");
    }

    #[test]
    fn test_partial_last_page_pads_with_blanks() {
        // 4 body rows: page 2 holds one real row and two padding rows
        let mut board = board_with(5);
        scroll_pages(&mut board, 1);
        assert_eq!(board.offset(), 48);
        assert!(!board.is_at_wrap());
        assert_eq!(board.current_line_range().as_str(), "Line5-5");
        let rows = board.current_rows_snapshot();
        assert_eq!(rows[0].index, 5);
        assert_eq!(rows[0].destination, "Victoria");
        assert_eq!(rows[1], RowSnapshot::blank(6));
        assert_eq!(rows[2], RowSnapshot::blank(7));

        let mut board = board_with(8);
        scroll_pages(&mut board, 2);
        assert_eq!(board.offset(), 96);
        assert_eq!(board.current_line_range().as_str(), "Line8-8");
        let rows = board.current_rows_snapshot();
        assert_eq!(rows[0].index, 8);
        assert_eq!(rows[0].destination, "Green Park");
        assert_eq!(rows[1], RowSnapshot::blank(9));
        assert_eq!(rows[2], RowSnapshot::blank(10));
    }

    #[test]
    fn test_wrap_page_reports_first_page_rows() {
        let mut board = board_with(10);
        scroll_pages(&mut board, 3);
        assert!(board.is_at_wrap());
        assert_eq!(board.offset(), 144);

        assert_eq!(board.state_description().as_str(), "Scroll group 4");
        assert_eq!(board.current_line_range().as_str(), "Line2-4");
        let rows = board.current_rows_snapshot();
        assert_eq!(rows[0].index, 2);
        assert_eq!(rows[0].destination, "Oxford Circus");

        // The duplicate page looks exactly like page 1
        let (_, body) = board.visible_portion();
        assert_eq!(body, Some(board.buffer().region(HEADER_HEIGHT, VIEWPORT_HEIGHT)));
    }
}
