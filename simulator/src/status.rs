//! Periodic status report.
//!
//! Prints what the board is showing in text form, for watching the simulator
//! without looking at the window.

use departures_common::{DepartureBoard, DisplayTimePolicy, RowRenderer, ScrollState};
use log::info;

/// Log the header row, visible range, scroll state and visible rows.
pub fn report<R: RowRenderer, P: DisplayTimePolicy>(
    board: &DepartureBoard<R, P>,
    frame_count: u32,
) {
    info!("frame {frame_count}");
    match board.dataset().header() {
        Some(header) => info!(
            "header: Line1 | {} | {} | {}",
            header.line, header.destination, header.display_time
        ),
        None => info!("header: No Departures Planned"),
    }

    let motion = match board.state() {
        ScrollState::Scrolling => "SCROLLING",
        _ => "PAUSED",
    };
    info!(
        "showing {} ({}), {motion} at {}px, state {}",
        board.current_line_range(),
        board.state_description(),
        board.offset(),
        board.state().label()
    );
    if board.pending().is_some() {
        info!("update pending until page 1");
    }

    for row in board.current_rows_snapshot() {
        info!(
            "  Line{} | {:<12} | {:<20} | {:>8}",
            row.index, row.line, row.destination, row.display_time
        );
    }
}
