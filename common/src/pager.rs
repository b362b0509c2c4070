//! Paged buffer manager.
//!
//! Owns the extended pixel buffer and repaints it whenever a dataset is
//! accepted. The buffer is allocated once at maximum size; a rebuild only
//! changes its contents and the derived [`PageLayout`].

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::debug;

use crate::config::{
    BUFFER_BYTES,
    DISPLAY_WIDTH,
    HEADER_HEIGHT,
    PAGE_HEIGHT,
    PLACEHOLDER_BYTES,
    PLACEHOLDER_HEIGHT,
    ROW_HEIGHT,
};
use crate::departure::Dataset;
use crate::framebuffer::Framebuffer;
use crate::layout::PageLayout;
use crate::render::RowRenderer;

/// Header text shown when there is nothing to display.
pub const NO_DEPARTURES_MESSAGE: &str = "No Scheduled Departures";

/// The board's extended buffer: header, padded body and wrap page.
pub type ExtendedBuffer = Framebuffer<BUFFER_BYTES>;

/// Pre-rendered "no departures" image.
pub type PlaceholderBuffer = Framebuffer<PLACEHOLDER_BYTES>;

/// Extended buffer plus the dataset and layout it was painted from.
pub struct PagedBuffer<R> {
    renderer: R,
    buffer: ExtendedBuffer,
    placeholder: PlaceholderBuffer,
    dataset: Dataset,
    layout: PageLayout,
}

impl<R: RowRenderer> PagedBuffer<R> {
    /// Allocate the buffers and paint the placeholder. Starts in the
    /// "no departures" state.
    pub fn new(renderer: R) -> Self {
        let mut placeholder = PlaceholderBuffer::new(DISPLAY_WIDTH);
        renderer.paint_message(
            &mut placeholder,
            Rectangle::new(Point::zero(), Size::new(DISPLAY_WIDTH, PLACEHOLDER_HEIGHT)),
            NO_DEPARTURES_MESSAGE,
        );
        Self {
            renderer,
            buffer: ExtendedBuffer::new(DISPLAY_WIDTH),
            placeholder,
            dataset: Dataset::new(),
            layout: PageLayout::empty(),
        }
    }

    /// Repaint the buffer from `dataset` and recompute the page layout.
    pub fn rebuild(
        &mut self,
        dataset: Dataset,
    ) {
        self.buffer.erase();
        self.dataset = dataset;

        if self.dataset.is_empty() {
            self.layout = PageLayout::empty();
            debug!("rebuild: no departures");
            return;
        }

        for (row, entry) in self.dataset.entries().iter().enumerate() {
            let area = Rectangle::new(
                Point::new(0, (row as u32 * ROW_HEIGHT) as i32),
                Size::new(DISPLAY_WIDTH, ROW_HEIGHT),
            );
            self.renderer.paint_row(&mut self.buffer, area, entry, row + 1);
        }

        self.layout = PageLayout::for_body(self.dataset.body_len());
        if let Some(dst_y) = self.layout.duplicate_y() {
            self.buffer.copy_rows(HEADER_HEIGHT, dst_y, PAGE_HEIGHT);
        }

        debug!(
            "rebuild: {} body rows, {} pages, wrap at {}px",
            self.layout.body_rows(),
            self.layout.groups(),
            self.layout.wrap_offset()
        );
    }

    /// Whether the board is in the "no departures" state.
    #[inline]
    pub fn is_empty(&self) -> bool { self.dataset.is_empty() }

    #[inline]
    pub fn dataset(&self) -> &Dataset { &self.dataset }

    #[inline]
    pub fn layout(&self) -> &PageLayout { &self.layout }

    #[inline]
    pub fn buffer(&self) -> &ExtendedBuffer { &self.buffer }

    #[inline]
    pub fn placeholder(&self) -> &PlaceholderBuffer { &self.placeholder }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use proptest::prelude::*;

    use super::*;
    use crate::config::{BUFFER_HEIGHT, MAX_BODY_ROWS, MAX_ENTRIES, VIEWPORT_HEIGHT};
    use crate::departure::{DESTINATION_LEN, Entry, LINE_LEN};
    use crate::render::MonoRowRenderer;

    fn dataset(rows: usize) -> Dataset {
        (0..rows)
            .map(|i| {
                let mut line = heapless::String::<4>::new();
                crate::text::push_u32(&mut line, 10 + i as u32);
                Entry::new(&line, "Walthamstow Central", Duration::from_secs(60 * i as u64), "")
                    .with_display_time("4min")
            })
            .collect()
    }

    #[test]
    fn test_starts_empty_with_placeholder() {
        let pager = PagedBuffer::new(MonoRowRenderer);
        assert!(pager.is_empty());
        assert!(pager.buffer().region(0, BUFFER_HEIGHT).is_blank());
        assert!(!pager.placeholder().region(0, PLACEHOLDER_HEIGHT).is_blank());
    }

    #[test]
    fn test_rebuild_paints_rows_in_order() {
        let mut pager = PagedBuffer::new(MonoRowRenderer);
        pager.rebuild(dataset(3));
        let buffer = pager.buffer();
        for row in 0..3 {
            assert!(!buffer.region(row * ROW_HEIGHT, ROW_HEIGHT).is_blank(), "row {row}");
        }
        // Static board: nothing painted below the rows
        assert!(buffer.region(3 * ROW_HEIGHT, BUFFER_HEIGHT - 3 * ROW_HEIGHT).is_blank());
        assert!(!pager.layout().is_scrollable());
    }

    #[test]
    fn test_header_only_is_static() {
        let mut pager = PagedBuffer::new(MonoRowRenderer);
        pager.rebuild(dataset(1));
        assert!(!pager.is_empty());
        assert_eq!(pager.layout().body_rows(), 0);
        assert_eq!(pager.layout().page_offsets(), &[0]);
    }

    #[test]
    fn test_rebuild_to_empty_clears_buffer() {
        let mut pager = PagedBuffer::new(MonoRowRenderer);
        pager.rebuild(dataset(10));
        pager.rebuild(Dataset::new());
        assert!(pager.is_empty());
        assert!(pager.buffer().region(0, BUFFER_HEIGHT).is_blank());
    }

    #[test]
    fn test_shrinking_dataset_leaves_no_stale_rows() {
        let mut pager = PagedBuffer::new(MonoRowRenderer);
        pager.rebuild(dataset(10));
        pager.rebuild(dataset(5));

        let mut fresh = PagedBuffer::new(MonoRowRenderer);
        fresh.rebuild(dataset(5));
        assert_eq!(pager.buffer().bytes(), fresh.buffer().bytes());
    }

    #[test]
    fn test_padding_rows_are_blank() {
        let mut pager = PagedBuffer::new(MonoRowRenderer);
        // 1 header + 4 body rows: body padded to 6 rows
        pager.rebuild(dataset(5));
        let buffer = pager.buffer();
        assert!(buffer.region(5 * ROW_HEIGHT, 2 * ROW_HEIGHT).is_blank());
    }

    proptest! {
        #[test]
        fn duplicate_page_matches_first_page(n in 4usize..=MAX_BODY_ROWS) {
            let mut pager = PagedBuffer::new(MonoRowRenderer);
            pager.rebuild(dataset(n + 1));
            let layout = pager.layout();
            let dup = layout.duplicate_y().unwrap();
            prop_assert_eq!(dup, HEADER_HEIGHT + layout.wrap_offset());
            prop_assert_eq!(
                pager.buffer().region(HEADER_HEIGHT, VIEWPORT_HEIGHT),
                pager.buffer().region(dup, VIEWPORT_HEIGHT)
            );
        }

        #[test]
        fn arbitrary_text_is_truncated_and_painted(
            rows in prop::collection::vec(("\\PC{0,20}", "\\PC{0,60}", "\\PC{0,12}"), 0..=12),
        ) {
            let dataset: Dataset = rows
                .iter()
                .map(|(line, destination, time)| {
                    Entry::new(line, destination, Duration::ZERO, "").with_display_time(time)
                })
                .collect();
            prop_assert_eq!(dataset.len(), rows.len().min(MAX_ENTRIES));

            for (entry, (line, destination, _)) in dataset.entries().iter().zip(&rows) {
                prop_assert!(line.starts_with(entry.line.as_str()));
                prop_assert!(destination.starts_with(entry.destination.as_str()));
                // Cut only when the next char would not fit
                if destination.len() > DESTINATION_LEN {
                    prop_assert!(entry.destination.len() > DESTINATION_LEN - 4);
                }
                if line.len() > LINE_LEN {
                    prop_assert!(entry.line.len() > LINE_LEN - 4);
                }
            }

            let mut pager = PagedBuffer::new(MonoRowRenderer);
            pager.rebuild(dataset.clone());
            prop_assert_eq!(pager.dataset(), &dataset);
            if let Some(dup) = pager.layout().duplicate_y() {
                prop_assert_eq!(
                    pager.buffer().region(HEADER_HEIGHT, VIEWPORT_HEIGHT),
                    pager.buffer().region(dup, VIEWPORT_HEIGHT)
                );
            }
        }

        #[test]
        fn rebuild_is_deterministic(n in 0usize..=MAX_BODY_ROWS + 1) {
            let mut a = PagedBuffer::new(MonoRowRenderer);
            let mut b = PagedBuffer::new(MonoRowRenderer);
            a.rebuild(dataset(n));
            b.rebuild(dataset(n));
            prop_assert_eq!(a.buffer().bytes(), b.buffer().bytes());
        }
    }
}
