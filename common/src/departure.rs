//! Departure data model.
//!
//! An [`Entry`] is one row on the board. A [`Dataset`] is the ordered list of
//! rows the board shows: the first entry is the fixed header, the rest scroll.
//!
//! Arrival times live on the board's monotonic timeline (time since start)
//! so the core never reads a wall clock. The data source supplies the
//! wall-clock `HH:MM` label up front for departures far in the future.
//!
//! # Freshness
//!
//! The text in the time column goes stale as time passes ("5min" becomes
//! "4min"). Each tick the board asks a [`DisplayTimePolicy`] what every entry
//! should read now; any difference is handled like a brand new dataset.

use core::time::Duration;

use heapless::{String, Vec};
use log::debug;

use crate::config::MAX_ENTRIES;
use crate::text::{push_u32, truncated};

/// Maximum characters in a line name ("N29", "Overground").
pub const LINE_LEN: usize = 12;

/// Maximum characters in a destination.
pub const DESTINATION_LEN: usize = 32;

/// Maximum characters in a time column value ("Due", "12min", "14:05").
pub const DISPLAY_TIME_LEN: usize = 8;

/// Right-hand time column text.
pub type DisplayTime = String<DISPLAY_TIME_LEN>;

/// One departure row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    /// Short route label.
    pub line: String<LINE_LEN>,
    /// Destination text.
    pub destination: String<DESTINATION_LEN>,
    /// Expected arrival on the board's monotonic timeline.
    pub due_at: Duration,
    /// Wall-clock arrival label (`HH:MM`), shown for far departures.
    pub clock: String<5>,
    /// Currently displayed time text.
    pub display_time: DisplayTime,
}

impl Entry {
    /// Create an entry. Over-long text is truncated.
    pub fn new(
        line: &str,
        destination: &str,
        due_at: Duration,
        clock: &str,
    ) -> Self {
        Self {
            line: truncated(line),
            destination: truncated(destination),
            due_at,
            clock: truncated(clock),
            display_time: DisplayTime::new(),
        }
    }

    /// Replace the display time, builder style.
    #[must_use]
    pub fn with_display_time(
        mut self,
        display_time: &str,
    ) -> Self {
        self.display_time = truncated(display_time);
        self
    }

    /// This entry with its display time recomputed by `policy` at `now`.
    #[must_use]
    pub fn refreshed<P: DisplayTimePolicy + ?Sized>(
        &self,
        policy: &P,
        now: Duration,
    ) -> Self {
        let mut entry = self.clone();
        entry.display_time = policy.display_time(self, now);
        entry
    }

    /// Whether `policy` would show something different at `now`.
    pub fn is_stale<P: DisplayTimePolicy + ?Sized>(
        &self,
        policy: &P,
        now: Duration,
    ) -> bool {
        policy.display_time(self, now) != self.display_time
    }
}

// =============================================================================
// Dataset
// =============================================================================

/// An ordered set of entries: header first, then the scrollable body.
///
/// Capacity is fixed at [`MAX_ENTRIES`]; extra entries are dropped.
/// An empty dataset means "no departures".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dataset {
    entries: Vec<Entry, MAX_ENTRIES>,
}

impl Dataset {
    /// An empty dataset ("no departures").
    pub const fn new() -> Self { Self { entries: Vec::new() } }

    /// Collect entries, keeping the first [`MAX_ENTRIES`].
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = Entry>,
    {
        let mut dataset = Self::new();
        let mut dropped = 0u32;
        for entry in entries {
            if dataset.entries.push(entry).is_err() {
                dropped += 1;
            }
        }
        if dropped > 0 {
            debug!("dataset truncated to {MAX_ENTRIES} entries, dropped {dropped}");
        }
        dataset
    }

    /// All entries, header first.
    #[inline]
    pub fn entries(&self) -> &[Entry] { &self.entries }

    /// The fixed header row.
    #[inline]
    pub fn header(&self) -> Option<&Entry> { self.entries.first() }

    /// The scrollable rows.
    #[inline]
    pub fn body(&self) -> &[Entry] { self.entries.get(1..).unwrap_or(&[]) }

    /// Number of scrollable rows.
    #[inline]
    pub fn body_len(&self) -> usize { self.body().len() }

    #[inline]
    pub fn len(&self) -> usize { self.entries.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Entry at `index` (0 = header).
    #[inline]
    pub fn get(
        &self,
        index: usize,
    ) -> Option<&Entry> {
        self.entries.get(index)
    }

    /// Recompute every display time.
    ///
    /// Returns `None` when nothing changed so the caller can skip a rebuild.
    pub fn refreshed<P: DisplayTimePolicy + ?Sized>(
        &self,
        policy: &P,
        now: Duration,
    ) -> Option<Self> {
        if !self.entries.iter().any(|e| e.is_stale(policy, now)) {
            return None;
        }
        Some(Self::from_entries(self.entries.iter().map(|e| e.refreshed(policy, now))))
    }
}

impl FromIterator<Entry> for Dataset {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self { Self::from_entries(iter) }
}

// =============================================================================
// Display Time Policies
// =============================================================================

/// Decides what the time column of an entry reads at a given instant.
///
/// Implementations must be pure: the same entry and instant always give the
/// same text.
pub trait DisplayTimePolicy {
    fn display_time(
        &self,
        entry: &Entry,
        now: Duration,
    ) -> DisplayTime;
}

/// Arrivals within this window show as "Due".
pub const DUE_WINDOW: Duration = Duration::from_secs(60);

/// Arrivals at least this far away show their wall-clock time.
pub const CLOCK_THRESHOLD: Duration = Duration::from_secs(15 * 60);

/// Countdown display used on London arrival boards.
///
/// - up to a minute away: `Due`
/// - 15 minutes or more away: the `HH:MM` clock label
/// - otherwise whole minutes remaining, e.g. `7min`
#[derive(Clone, Copy, Debug, Default)]
pub struct CountdownPolicy;

impl DisplayTimePolicy for CountdownPolicy {
    fn display_time(
        &self,
        entry: &Entry,
        now: Duration,
    ) -> DisplayTime {
        let remaining = entry.due_at.saturating_sub(now);
        if remaining <= DUE_WINDOW {
            return truncated("Due");
        }
        if remaining >= CLOCK_THRESHOLD {
            return truncated(&entry.clock);
        }
        let mut text = DisplayTime::new();
        push_u32(&mut text, (remaining.as_secs() / 60) as u32);
        text.push_str("min").ok();
        text
    }
}

/// Keeps whatever time text the entry already has.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrozenPolicy;

impl DisplayTimePolicy for FrozenPolicy {
    fn display_time(
        &self,
        entry: &Entry,
        _now: Duration,
    ) -> DisplayTime {
        entry.display_time.clone()
    }
}
