//! Board geometry and timing configuration.
//!
//! Layout values are compile-time constants so the pixel buffer can be sized
//! statically and no per-frame arithmetic is needed to locate rows. Timing is
//! the only runtime-tunable part and lives in [`ScrollConfig`].

use core::time::Duration;

use thiserror::Error;

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels (SSD1322 OLED: 256x64).
pub const DISPLAY_WIDTH: u32 = 256;

/// Display height in pixels.
pub const DISPLAY_HEIGHT: u32 = 64;

// =============================================================================
// Row Layout
// =============================================================================

/// Height of one departure row in pixels.
pub const ROW_HEIGHT: u32 = 16;

/// The header is a single fixed row.
pub const HEADER_HEIGHT: u32 = ROW_HEIGHT;

/// Number of body rows shown at once (one page).
pub const ROWS_PER_PAGE: usize = 3;

/// Height of the scrolling body window.
pub const VIEWPORT_HEIGHT: u32 = ROW_HEIGHT * ROWS_PER_PAGE as u32;

/// Distance the cursor travels between two page boundaries.
pub const PAGE_HEIGHT: u32 = VIEWPORT_HEIGHT;

/// Maximum number of body pages.
pub const MAX_PAGES: usize = 3;

/// Maximum number of scrollable rows.
pub const MAX_BODY_ROWS: usize = MAX_PAGES * ROWS_PER_PAGE;

/// Maximum number of entries in a dataset (header + body).
pub const MAX_ENTRIES: usize = 1 + MAX_BODY_ROWS;

/// Rows in the extended buffer: header, padded body and the duplicated first page.
pub const BUFFER_ROWS: usize = MAX_ENTRIES + ROWS_PER_PAGE;

/// Extended buffer height in pixels.
pub const BUFFER_HEIGHT: u32 = BUFFER_ROWS as u32 * ROW_HEIGHT;

/// Extended buffer size in bytes (1 bit per pixel).
pub const BUFFER_BYTES: usize = (DISPLAY_WIDTH * BUFFER_HEIGHT / 8) as usize;

/// Height of the "no departures" placeholder image.
pub const PLACEHOLDER_HEIGHT: u32 = VIEWPORT_HEIGHT;

/// Placeholder buffer size in bytes.
pub const PLACEHOLDER_BYTES: usize = (DISPLAY_WIDTH * PLACEHOLDER_HEIGHT / 8) as usize;

// =============================================================================
// Row Columns
// =============================================================================

/// X position of the row index column.
pub const INDEX_X: i32 = 2;

/// X position of the line name column.
pub const LINE_X: i32 = INDEX_X + 20;

/// X position of the destination column.
pub const DESTINATION_X: i32 = LINE_X + 30;

/// Gap between the right-aligned display time and the row's right edge.
pub const TIME_RIGHT_MARGIN: i32 = 2;

/// Vertical padding between the row top and the glyph top.
pub const TEXT_TOP_PADDING: i32 = 3;

// =============================================================================
// Timing Configuration
// =============================================================================

/// Time the board holds still on each page (and at the wrap page).
pub const DEFAULT_PAUSE: Duration = Duration::from_secs(5);

/// Time one page-to-page slide takes.
pub const DEFAULT_SCROLL: Duration = Duration::from_secs(1);

/// Rejected timing configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Interpolation divides by the scroll duration.
    #[error("scroll duration must be greater than zero")]
    ZeroScrollDuration,
}

/// Runtime timing of the scroll state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollConfig {
    pause: Duration,
    scroll: Duration,
}

impl ScrollConfig {
    /// Build a configuration, rejecting a zero scroll duration.
    ///
    /// A zero pause is allowed and makes the board scroll continuously.
    pub const fn new(
        pause: Duration,
        scroll: Duration,
    ) -> Result<Self, ConfigError> {
        if scroll.is_zero() {
            return Err(ConfigError::ZeroScrollDuration);
        }
        Ok(Self { pause, scroll })
    }

    /// Pause on a page, also used for the wrap page.
    #[inline]
    pub const fn pause(&self) -> Duration { self.pause }

    /// Duration of one page slide.
    #[inline]
    pub const fn scroll(&self) -> Duration { self.scroll }
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            pause: DEFAULT_PAUSE,
            scroll: DEFAULT_SCROLL,
        }
    }
}
