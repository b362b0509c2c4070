//! Timing constants for the simulator.
//!
//! These constants use `std::time::Duration` as the main loop sleeps on
//! them. Scroll timing lives in the common crate's `ScrollConfig`.

use std::time::Duration;

/// Target frame time (~30 FPS). The main loop sleeps if the frame completes early.
pub const FRAME_TIME: Duration = Duration::from_millis(33);

/// Interval between status reports.
pub const STATUS_INTERVAL: Duration = Duration::from_secs(2);

/// Interval between departure fetches.
pub const FETCH_INTERVAL: Duration = Duration::from_secs(60);
