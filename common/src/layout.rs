//! Page geometry for a given number of body rows.
//!
//! The extended buffer is laid out as:
//! ```text
//! y = 0          header row
//! y = 16         body rows 1..n, padded up to a multiple of 3
//! y = 16 + 48*g  copy of body rows 1..3 (only when scrolling)
//! ```
//! The cursor moves through the body in steps of one page (48px). Its last
//! stop is the duplicated first page, which looks identical to offset 0, so
//! snapping back to the top is invisible.

use heapless::Vec;

use crate::config::{HEADER_HEIGHT, MAX_BODY_ROWS, MAX_PAGES, PAGE_HEIGHT, ROW_HEIGHT, ROWS_PER_PAGE};

/// Page boundaries: one per real page plus the wrap page.
pub type PageOffsets = Vec<u32, { MAX_PAGES + 1 }>;

/// Derived geometry of the extended buffer for one dataset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageLayout {
    body_rows: usize,
    groups: usize,
    offsets: PageOffsets,
}

impl PageLayout {
    /// Layout with no rows at all ("no departures").
    pub fn empty() -> Self { Self::single_page(0) }

    fn single_page(body_rows: usize) -> Self {
        let mut offsets = PageOffsets::new();
        offsets.push(0).ok();
        Self {
            body_rows,
            groups: 1,
            offsets,
        }
    }

    /// Geometry for `body_rows` scrollable rows.
    ///
    /// # Panics
    /// If `body_rows` exceeds [`MAX_BODY_ROWS`]. Datasets are truncated before
    /// they get here, so this is a caller bug.
    pub fn for_body(body_rows: usize) -> Self {
        assert!(body_rows <= MAX_BODY_ROWS, "{body_rows} body rows exceed capacity {MAX_BODY_ROWS}");
        if body_rows <= ROWS_PER_PAGE {
            return Self::single_page(body_rows);
        }

        let groups = body_rows.div_ceil(ROWS_PER_PAGE);
        let offsets = (0..=groups).map(|g| g as u32 * PAGE_HEIGHT).collect();
        Self {
            body_rows,
            groups,
            offsets,
        }
    }

    /// Number of real body rows.
    #[inline]
    pub const fn body_rows(&self) -> usize { self.body_rows }

    /// Number of 3-row pages the body occupies.
    #[inline]
    pub const fn groups(&self) -> usize { self.groups }

    /// Body rows rounded up to whole pages.
    #[inline]
    pub const fn padded_rows(&self) -> usize {
        if self.is_scrollable() {
            self.groups * ROWS_PER_PAGE
        } else {
            ROWS_PER_PAGE
        }
    }

    /// Whether the body needs more than one page.
    #[inline]
    pub const fn is_scrollable(&self) -> bool { self.body_rows > ROWS_PER_PAGE }

    /// Cursor stops, strictly increasing, starting at 0.
    #[inline]
    pub fn page_offsets(&self) -> &[u32] { &self.offsets }

    /// The last stop: start of the duplicated first page (0 when static).
    #[inline]
    pub fn wrap_offset(&self) -> u32 { self.offsets.last().copied().unwrap_or(0) }

    /// Buffer row where the duplicated first page starts, if there is one.
    pub const fn duplicate_y(&self) -> Option<u32> {
        if self.is_scrollable() {
            Some(HEADER_HEIGHT + (self.groups * ROWS_PER_PAGE) as u32 * ROW_HEIGHT)
        } else {
            None
        }
    }

    /// Rows of the extended buffer in use, in pixels.
    pub const fn used_height(&self) -> u32 {
        match self.duplicate_y() {
            Some(y) => y + PAGE_HEIGHT,
            None => HEADER_HEIGHT + PAGE_HEIGHT,
        }
    }

    /// 1-based page group the cursor is in.
    ///
    /// Group `k` covers offsets in `[offsets[k-1], offsets[k])`; the wrap
    /// offset itself reports one past the last real page.
    pub fn group_at(
        &self,
        offset: u32,
    ) -> usize {
        self.offsets
            .iter()
            .position(|&stop| offset < stop)
            .unwrap_or(self.offsets.len())
    }
}

impl Default for PageLayout {
    fn default() -> Self { Self::empty() }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::config::BUFFER_HEIGHT;

    #[test]
    fn test_empty_layout() {
        let layout = PageLayout::empty();
        assert!(!layout.is_scrollable());
        assert_eq!(layout.page_offsets(), &[0]);
        assert_eq!(layout.duplicate_y(), None);
    }

    #[test]
    fn test_static_layouts() {
        for n in 0..=3 {
            let layout = PageLayout::for_body(n);
            assert!(!layout.is_scrollable(), "{n} rows");
            assert_eq!(layout.page_offsets(), &[0]);
            assert_eq!(layout.wrap_offset(), 0);
            assert_eq!(layout.used_height(), 64);
        }
    }

    #[test]
    fn test_four_rows_pad_to_two_pages() {
        let layout = PageLayout::for_body(4);
        assert_eq!(layout.groups(), 2);
        assert_eq!(layout.padded_rows(), 6);
        assert_eq!(layout.page_offsets(), &[0, 48, 96]);
        assert_eq!(layout.duplicate_y(), Some(16 + 96));
        assert_eq!(layout.used_height(), 16 + 96 + 48);
    }

    #[test]
    fn test_full_board_fills_buffer() {
        let layout = PageLayout::for_body(MAX_BODY_ROWS);
        assert_eq!(layout.page_offsets(), &[0, 48, 96, 144]);
        assert_eq!(layout.duplicate_y(), Some(160));
        assert_eq!(layout.used_height(), BUFFER_HEIGHT);
    }

    #[test]
    #[should_panic(expected = "exceed capacity")]
    fn test_too_many_rows_panics() {
        let _ = PageLayout::for_body(MAX_BODY_ROWS + 1);
    }

    #[test]
    fn test_group_at() {
        let layout = PageLayout::for_body(9);
        assert_eq!(layout.group_at(0), 1);
        assert_eq!(layout.group_at(47), 1);
        assert_eq!(layout.group_at(48), 2);
        assert_eq!(layout.group_at(143), 3);
        assert_eq!(layout.group_at(144), 4);
    }

    proptest! {
        #[test]
        fn offsets_strictly_increase_to_padded_end(n in 4usize..=MAX_BODY_ROWS) {
            let layout = PageLayout::for_body(n);
            let offsets = layout.page_offsets();
            prop_assert_eq!(offsets[0], 0);
            prop_assert!(offsets.windows(2).all(|w| w[0] < w[1]));
            prop_assert_eq!(layout.wrap_offset(), n.div_ceil(3) as u32 * 3 * ROW_HEIGHT);
        }

        #[test]
        fn wrap_window_fits_in_buffer(n in 0usize..=MAX_BODY_ROWS) {
            let layout = PageLayout::for_body(n);
            prop_assert!(HEADER_HEIGHT + layout.wrap_offset() + PAGE_HEIGHT <= BUFFER_HEIGHT);
            prop_assert!(layout.used_height() <= BUFFER_HEIGHT);
        }
    }
}
