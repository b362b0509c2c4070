//! Departure board simulator for desktop.
//!
//! Drives the board at ~30 FPS in an `embedded-graphics-simulator` window
//! styled like a 256x64 blue OLED, fed by a demo departure feed.
//!
//! Set `BOARD_LOG` to change the log filter, e.g.
//! `BOARD_LOG=departures_common=trace`.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_possible_wrap)]

mod feed;
mod status;
mod timing;

use std::sync::mpsc::Receiver;
use std::thread;
use std::time::Instant;

use departures_common::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH, HEADER_HEIGHT};
use departures_common::{CountdownPolicy, Dataset, DepartureBoard, MonoRowRenderer, ScrollConfig};
use embedded_graphics::image::Image;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::sdl2::Keycode;
use embedded_graphics_simulator::{BinaryColorTheme, OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};
use log::{info, warn};

use crate::feed::DemoFeed;
use crate::timing::{FRAME_TIME, STATUS_INTERVAL};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("BOARD_LOG", "info")).init();

    let mut display: SimulatorDisplay<BinaryColor> = SimulatorDisplay::new(Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT));
    let output_settings = OutputSettingsBuilder::new()
        .theme(BinaryColorTheme::OledBlue)
        .scale(3)
        .build();
    let mut window = Window::new("Departure Board Sim", &output_settings);

    let start = Instant::now();
    let mut board = DepartureBoard::new(MonoRowRenderer, CountdownPolicy, ScrollConfig::default());

    // First fetch is synchronous so the board starts with data
    let mut feed = DemoFeed::new(start);
    let _ = board.set_dataset(feed.fetch());
    let updates: Option<Receiver<Dataset>> = match feed::spawn(feed) {
        Ok(rx) => Some(rx),
        Err(e) => {
            warn!("feed thread failed to start, running without updates: {e}");
            None
        }
    };

    info!("ESC or close the window to exit");

    let mut frame_count = 0u32;
    let mut last_status = Instant::now();

    loop {
        let frame_start = Instant::now();

        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit
                | SimulatorEvent::KeyDown {
                    keycode: Keycode::Escape, ..
                } => return,
                _ => {}
            }
        }

        if let Some(rx) = &updates {
            for dataset in rx.try_iter() {
                let _ = board.set_dataset(dataset);
            }
        }

        board.tick(start.elapsed());

        display.clear(BinaryColor::Off).ok();
        let (header, body) = board.visible_portion();
        Image::new(&header, Point::zero()).draw(&mut display).ok();
        if let Some(body) = body {
            Image::new(&body, Point::new(0, HEADER_HEIGHT as i32)).draw(&mut display).ok();
        }
        window.update(&display);

        frame_count = frame_count.wrapping_add(1);

        if last_status.elapsed() >= STATUS_INTERVAL {
            status::report(&board, frame_count);
            last_status = Instant::now();
        }

        if let Some(remaining) = FRAME_TIME.checked_sub(frame_start.elapsed()) {
            thread::sleep(remaining);
        }
    }
}
