//! Paging and scrolling engine for a 256x64 departure board.
//!
//! This crate contains the platform-agnostic core shared between the desktop
//! simulator and any embedded display driver:
//!
//! - [`config`]: Board geometry and scroll timing
//! - [`departure`]: Entries, datasets and display-time policies
//! - [`framebuffer`]: 1-bpp pixel buffer and borrowed row regions
//! - [`render`]: Row renderer trait and the mono-font implementation
//! - [`styles`]: Pre-computed text styles
//! - [`layout`]: Page geometry for a given body length
//! - [`pager`]: Extended buffer rebuilds and the wrap duplicate page
//! - [`scroll`]: Pause/slide/wrap state machine
//! - [`board`]: The board itself, with deferred dataset updates
//! - [`viewport`]: Visible regions and text diagnostics
//! - [`text`]: Fixed-capacity string helpers
//!
//! # no_std Compatibility
//!
//! This crate is `no_std` and allocation-free. Time is passed in as
//! `core::time::Duration` on a caller-chosen monotonic timeline; nothing here
//! reads a clock.

#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod board;
pub mod config;
pub mod departure;
pub mod framebuffer;
pub mod layout;
pub mod pager;
pub mod render;
pub mod scroll;
pub mod styles;
pub mod text;
pub mod viewport;

// Re-export commonly used items
pub use board::{DepartureBoard, Update};
pub use config::*;
pub use departure::{CountdownPolicy, Dataset, DisplayTime, DisplayTimePolicy, Entry, FrozenPolicy};
pub use framebuffer::{Framebuffer, Region};
pub use render::{MonoRowRenderer, RowRenderer};
pub use scroll::ScrollState;
pub use viewport::{RowSnapshot, RowsSnapshot};
