//! The departure board: paged buffer, scroll cursor and deferred updates.
//!
//! A [`DepartureBoard`] is driven by one loop that calls [`tick`] and
//! [`visible_portion`] once per frame. New data may arrive at any time through
//! [`set_dataset`]; it is only painted when the cursor sits at the top of page
//! 1 with nothing in flight (the *safe point*). Until then the newest update
//! waits as the pending dataset.
//!
//! [`tick`]: DepartureBoard::tick
//! [`visible_portion`]: DepartureBoard::visible_portion
//! [`set_dataset`]: DepartureBoard::set_dataset

use core::time::Duration;

use log::{debug, info};

use crate::config::ScrollConfig;
use crate::departure::{Dataset, DisplayTimePolicy};
use crate::layout::PageLayout;
use crate::pager::{ExtendedBuffer, PagedBuffer, PlaceholderBuffer};
use crate::render::RowRenderer;
use crate::scroll::{ScrollCursor, ScrollState, Step};


/// What [`DepartureBoard::set_dataset`] did with the data.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Update {
    /// Painted right away.
    Applied,
    /// Held until the next safe point.
    Deferred,
}

/// Header row plus an auto-scrolling body of departures.
pub struct DepartureBoard<R, P> {
    pager: PagedBuffer<R>,
    cursor: ScrollCursor,
    pending: Option<Dataset>,
    policy: P,
    config: ScrollConfig,
}

impl<R: RowRenderer, P: DisplayTimePolicy> DepartureBoard<R, P> {
    /// A board showing "no departures" until the first dataset arrives.
    pub fn new(
        renderer: R,
        policy: P,
        config: ScrollConfig,
    ) -> Self {
        Self {
            pager: PagedBuffer::new(renderer),
            cursor: ScrollCursor::new(),
            pending: None,
            policy,
            config,
        }
    }

    /// Offer a new dataset.
    ///
    /// Applied immediately at the safe point, otherwise stored as pending,
    /// replacing any older pending dataset.
    pub fn set_dataset(
        &mut self,
        dataset: Dataset,
    ) -> Update {
        if self.cursor.is_at_safe_point() {
            self.pending = None;
            self.apply(dataset);
            return Update::Applied;
        }

        if self.pending.replace(dataset).is_some() {
            debug!("board: newer dataset replaces pending one");
        } else {
            debug!("board: dataset deferred until safe point (offset {}px)", self.cursor.offset());
        }
        Update::Deferred
    }

    /// Advance the board to `now`.
    ///
    /// `now` is a monotonic timestamp. Never blocks.
    pub fn tick(
        &mut self,
        now: Duration,
    ) {
        if self.cursor.is_at_safe_point()
            && let Some(pending) = self.pending.take()
        {
            debug!("board: applying pending dataset at top of page 1");
            self.apply(pending);
            return;
        }

        // Stale time text counts as a new dataset, based on the newest data we have
        let base = self.pending.as_ref().unwrap_or_else(|| self.pager.dataset());
        if let Some(refreshed) = base.refreshed(&self.policy, now)
            && self.set_dataset(refreshed) == Update::Applied
        {
            return;
        }

        match self.cursor.advance(self.pager.layout(), &self.config, now) {
            Step::Continue => {}
            Step::Wrapped => match self.pending.take() {
                Some(pending) => {
                    info!("board: applying pending dataset at wrap");
                    self.apply(pending);
                }
                None => self.cursor.begin_scroll(now),
            },
        }
    }

    fn apply(
        &mut self,
        dataset: Dataset,
    ) {
        debug!("board: accepting dataset with {} entries", dataset.len());
        // A page-1 pause only runs on a scrolling board
        let pause_running = self.pager.layout().is_scrollable();
        self.pager.rebuild(dataset);
        if pause_running {
            self.cursor.rewind();
        } else {
            self.cursor.reset();
        }
    }

    /// Dataset waiting for the next safe point, if any.
    #[inline]
    pub fn pending(&self) -> Option<&Dataset> { self.pending.as_ref() }

    /// Dataset currently painted.
    #[inline]
    pub fn dataset(&self) -> &Dataset { self.pager.dataset() }

    #[inline]
    pub fn layout(&self) -> &PageLayout { self.pager.layout() }

    /// Pixel offset of the visible body window.
    #[inline]
    pub fn offset(&self) -> u32 { self.cursor.offset() }

    #[inline]
    pub fn is_animating(&self) -> bool { self.cursor.is_animating() }

    #[inline]
    pub fn is_at_wrap(&self) -> bool { self.cursor.is_at_wrap() }

    #[inline]
    pub fn state(&self) -> ScrollState { self.cursor.state(self.pager.layout()) }

    #[inline]
    pub fn config(&self) -> &ScrollConfig { &self.config }

    /// Whether nothing is painted ("no departures").
    #[inline]
    pub fn is_empty(&self) -> bool { self.pager.is_empty() }

    #[inline]
    pub fn buffer(&self) -> &ExtendedBuffer { self.pager.buffer() }

    #[inline]
    pub fn placeholder(&self) -> &PlaceholderBuffer { self.pager.placeholder() }
}
