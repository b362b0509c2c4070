//! Scroll state machine.
//!
//! The cursor is a pixel offset into the body of the extended buffer. It
//! alternates between holding on a page boundary and sliding to the next one:
//!
//! ```text
//!            pause               scroll done, not last
//! Paused ─────────────▶ Scrolling ───────────────────▶ Paused
//!   ▲                       │
//!   │ (pending data)        │ scroll done at wrap offset
//!   │                       ▼
//!   └──────────────────── AtWrap ── pause ──▶ offset = 0, Scrolling
//! ```
//!
//! **FPS independence**: progress is computed from timestamps passed to
//! [`ScrollCursor::advance`], never from frame counts, so the slide takes the
//! same time at any frame rate.
//!
//! Timestamps are `Duration`s on a monotonic timeline chosen by the caller
//! (time since boot, or since the simulator started).

use core::time::Duration;

use log::trace;

use crate::config::{PAGE_HEIGHT, ScrollConfig};
use crate::layout::PageLayout;

/// Externally visible scroll state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollState {
    /// Three or fewer body rows; never moves.
    Static,
    /// Holding on a page boundary.
    Paused,
    /// Sliding towards the next page boundary.
    Scrolling,
    /// Holding on the duplicated first page before snapping back to the top.
    AtWrap,
}

impl ScrollState {
    /// Short label used in status output.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Static => "STATIC",
            Self::Paused => "PAUSED",
            Self::Scrolling => "SCROLLING",
            Self::AtWrap => "AT WRAP",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    /// `since` is `None` until the first tick after a reset anchors the pause.
    Paused { since: Option<Duration> },
    Scrolling { from: u32, started: Duration },
    AtWrap { since: Duration },
}

/// What a call to [`ScrollCursor::advance`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub enum Step {
    /// Nothing that needs the caller's attention.
    Continue,
    /// The wrap pause ended and the cursor snapped back to offset 0.
    ///
    /// The cursor is now at the safe point. The caller either applies
    /// pending data or calls [`ScrollCursor::begin_scroll`].
    Wrapped,
}

/// Current scroll position and phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScrollCursor {
    offset: u32,
    phase: Phase,
}

impl ScrollCursor {
    /// A cursor at the top, waiting for its first tick.
    pub const fn new() -> Self {
        Self {
            offset: 0,
            phase: Phase::Paused { since: None },
        }
    }

    /// Back to the top of page 1, not animating, pause not yet anchored.
    pub fn reset(&mut self) { *self = Self::new(); }

    /// Back to the top of page 1, keeping the anchor of a running pause.
    pub fn rewind(&mut self) {
        let since = match self.phase {
            Phase::Paused { since } => since,
            _ => None,
        };
        self.offset = 0;
        self.phase = Phase::Paused { since };
    }

    /// Pixel offset into the body of the extended buffer.
    #[inline]
    pub const fn offset(&self) -> u32 { self.offset }

    #[inline]
    pub const fn is_animating(&self) -> bool { matches!(self.phase, Phase::Scrolling { .. }) }

    #[inline]
    pub const fn is_at_wrap(&self) -> bool { matches!(self.phase, Phase::AtWrap { .. }) }

    /// Offset 0, not animating, not at wrap: the only moment the buffer may
    /// be rebuilt.
    #[inline]
    pub const fn is_at_safe_point(&self) -> bool { self.offset == 0 && matches!(self.phase, Phase::Paused { .. }) }

    /// State as seen by status output, given the active layout.
    pub const fn state(
        &self,
        layout: &PageLayout,
    ) -> ScrollState {
        if !layout.is_scrollable() {
            return ScrollState::Static;
        }
        match self.phase {
            Phase::Paused { .. } => ScrollState::Paused,
            Phase::Scrolling { .. } => ScrollState::Scrolling,
            Phase::AtWrap { .. } => ScrollState::AtWrap,
        }
    }

    /// Start sliding from the current offset.
    pub fn begin_scroll(
        &mut self,
        now: Duration,
    ) {
        trace!("scroll: start from {}px", self.offset);
        self.phase = Phase::Scrolling {
            from: self.offset,
            started: now,
        };
    }

    /// Move the cursor forward to `now`.
    pub fn advance(
        &mut self,
        layout: &PageLayout,
        config: &ScrollConfig,
        now: Duration,
    ) -> Step {
        if !layout.is_scrollable() {
            return Step::Continue;
        }

        match self.phase {
            Phase::Paused { since } => {
                let since = since.unwrap_or(now);
                self.phase = Phase::Paused { since: Some(since) };
                if now.saturating_sub(since) >= config.pause() {
                    self.begin_scroll(now);
                }
                Step::Continue
            }

            Phase::Scrolling { from, started } => {
                let wrap = layout.wrap_offset();
                let target = (from + PAGE_HEIGHT).min(wrap);
                let elapsed = now.saturating_sub(started);
                self.offset = interpolate(from, target, elapsed, config.scroll());

                if elapsed >= config.scroll() {
                    self.offset = target;
                    if target >= wrap {
                        trace!("scroll: reached wrap page at {target}px");
                        self.phase = Phase::AtWrap { since: now };
                    } else {
                        trace!("scroll: reached page at {target}px");
                        self.phase = Phase::Paused { since: Some(now) };
                    }
                }
                Step::Continue
            }

            Phase::AtWrap { since } => {
                if now.saturating_sub(since) < config.pause() {
                    return Step::Continue;
                }
                trace!("scroll: wrap pause over, back to top");
                self.offset = 0;
                self.phase = Phase::Paused { since: Some(now) };
                Step::Wrapped
            }
        }
    }
}

impl Default for ScrollCursor {
    fn default() -> Self { Self::new() }
}

/// Linear interpolation from `from` to `to`, rounded to the nearest pixel and
/// clamped at `to` once `elapsed` reaches `total`.
///
/// Integer math only; `total` must be non-zero.
pub fn interpolate(
    from: u32,
    to: u32,
    elapsed: Duration,
    total: Duration,
) -> u32 {
    if elapsed >= total {
        return to;
    }
    let distance = u64::from(to.saturating_sub(from));
    let total_us = (total.as_micros() as u64).max(1);
    let elapsed_us = elapsed.as_micros() as u64;
    from + ((distance * elapsed_us + total_us / 2) / total_us) as u32
}
