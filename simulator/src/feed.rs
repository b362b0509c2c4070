//! Demo departure feed.
//!
//! Stands in for a live arrivals API. Every fetch builds a fresh dataset from
//! two stops' timetables, merged and sorted by arrival. Fetches cycle through a
//! full board, a short static board and a failed fetch, so the simulator shows
//! scrolling, static and "no departures" screens in turn.
//!
//! Fetching happens on a background thread; datasets reach the render loop
//! over a channel so the board is only ever touched from one thread.

use std::io;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use departures_common::{CountdownPolicy, Dataset, Entry};
use log::{debug, info, warn};

use crate::timing::FETCH_INTERVAL;

// =============================================================================
// Timetables
// =============================================================================

/// A bus route calling at a stop at a fixed headway.
struct Service {
    line: &'static str,
    destination: &'static str,
    headway: u64,
    /// Seconds past each headway boundary the bus arrives.
    phase: u64,
}

const STOP_A: &[Service] = &[
    Service {
        line: "73",
        destination: "Oxford Circus",
        headway: 420,
        phase: 95,
    },
    Service {
        line: "38",
        destination: "Victoria",
        headway: 600,
        phase: 310,
    },
    Service {
        line: "N29",
        destination: "Trafalgar Square",
        headway: 1200,
        phase: 730,
    },
];

const STOP_B: &[Service] = &[
    Service {
        line: "476",
        destination: "Euston",
        headway: 540,
        phase: 20,
    },
    Service {
        line: "341",
        destination: "Waterloo",
        headway: 900,
        phase: 455,
    },
];

/// Arrivals generated per service per fetch.
const ARRIVALS_PER_SERVICE: u64 = 3;

/// Entries on the short board: header plus two body rows.
const SHORT_BOARD: usize = 3;

// =============================================================================
// Scenarios
// =============================================================================

/// What a fetch returns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scenario {
    /// Every upcoming arrival (more than fits; the board truncates).
    Full,
    /// A board that fits on one page.
    Short,
    /// The API call failed.
    Offline,
}

impl Scenario {
    const CYCLE: [Self; 3] = [Self::Full, Self::Short, Self::Offline];

    /// Scenario for the `n`th fetch.
    pub const fn nth(n: usize) -> Self { Self::CYCLE[n % Self::CYCLE.len()] }
}

// =============================================================================
// Feed
// =============================================================================

/// Produces datasets on the board's timeline (time since `start`).
pub struct DemoFeed {
    start: Instant,
    fetches: usize,
}

impl DemoFeed {
    pub fn new(start: Instant) -> Self { Self { start, fetches: 0 } }

    /// Fetch the next dataset. A failed fetch yields an empty dataset.
    pub fn fetch(&mut self) -> Dataset {
        let scenario = Scenario::nth(self.fetches);
        self.fetches += 1;

        let wall = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
        let dataset = departures(scenario, self.start.elapsed(), wall);
        match scenario {
            Scenario::Offline => warn!("feed: fetch #{} failed, no departures", self.fetches),
            _ => info!("feed: fetch #{} ({scenario:?}) returned {} departures", self.fetches, dataset.len()),
        }
        dataset
    }
}

/// Start fetching every [`FETCH_INTERVAL`] on a background thread.
pub fn spawn(mut feed: DemoFeed) -> io::Result<Receiver<Dataset>> {
    let (tx, rx) = mpsc::channel();
    thread::Builder::new().name("departure-feed".into()).spawn(move || {
        loop {
            thread::sleep(FETCH_INTERVAL);
            if tx.send(feed.fetch()).is_err() {
                debug!("feed: receiver gone, stopping");
                break;
            }
        }
    })?;
    Ok(rx)
}

/// Dataset for `scenario`, with `now` on the board's timeline and `wall` the
/// matching time since the Unix epoch.
fn departures(
    scenario: Scenario,
    now: Duration,
    wall: Duration,
) -> Dataset {
    let limit = match scenario {
        Scenario::Offline => return Dataset::new(),
        Scenario::Short => SHORT_BOARD,
        Scenario::Full => usize::MAX,
    };

    let now_s = now.as_secs();
    let mut arrivals: Vec<(u64, &Service)> = STOP_A
        .iter()
        .chain(STOP_B)
        .flat_map(|service| {
            let first = next_arrival(service, now_s);
            (0..ARRIVALS_PER_SERVICE).map(move |k| (first + k * service.headway, service))
        })
        .collect();
    arrivals.sort_by_key(|&(due, _)| due);

    let policy = CountdownPolicy;
    arrivals
        .into_iter()
        .take(limit)
        .map(|(due, service)| {
            let clock = clock_label(wall.as_secs() + (due - now_s));
            let entry = Entry::new(service.line, service.destination, Duration::from_secs(due), &clock);
            entry.refreshed(&policy, now)
        })
        .collect()
}

/// First arrival of `service` strictly after `now_s`.
fn next_arrival(
    service: &Service,
    now_s: u64,
) -> u64 {
    let boundary = now_s - now_s % service.headway;
    let due = boundary + service.phase;
    if due > now_s { due } else { due + service.headway }
}

/// `HH:MM` (UTC) for a Unix timestamp.
fn clock_label(unix_s: u64) -> String {
    let minutes = unix_s / 60 % (24 * 60);
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}
