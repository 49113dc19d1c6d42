//! Boot-sequence intro: a short burst of fake startup log lines.
//!
//! Every line gets a randomized reveal delay (30–130 ms after the previous
//! one), and the finished screen holds for 800 ms before the deck takes
//! over.  All timing is plain `Instant` deadlines computed up front; any key
//! skips the whole thing.

use std::time::{Duration, Instant};

use rand::Rng;

/// Hold time after the last line before the intro ends.
const HOLD_MS: u64 = 800;
/// Per-line reveal jitter, milliseconds.
const LINE_DELAY_MS: std::ops::Range<u64> = 30..130;

/// The demo deck's startup chatter.
pub const BOOT_LINES: &[&str] = &[
    "TERMFOLIO BIOS v0.1.0",
    "DETECTING DISPLAY ............ OK",
    "MOUNTING SECTION DECK ........ OK",
    "CALIBRATING PARTICLE FIELD ... OK",
    "LINKING NAV RAIL ............. OK",
    "AUDIO BUS .................... STANDBY",
    "READY.",
];

/// Timed reveal of the boot lines.
#[derive(Debug, Clone)]
pub struct BootSequence {
    lines: Vec<&'static str>,
    /// Reveal deadline per line, in order.
    deadlines: Vec<Instant>,
    /// When the hold after the last line ends.
    finished_at: Instant,
    skipped: bool,
}

impl BootSequence {
    /// Standard intro with randomized line delays.
    pub fn new(now: Instant) -> Self {
        let mut rng = rand::thread_rng();
        let delays: Vec<u64> = BOOT_LINES
            .iter()
            .map(|_| rng.gen_range(LINE_DELAY_MS))
            .collect();
        Self::with_delays(BOOT_LINES, &delays, now)
    }

    /// Deterministic construction; `delays[i]` is the gap in milliseconds
    /// between line `i-1` and line `i`.
    pub fn with_delays(lines: &[&'static str], delays: &[u64], now: Instant) -> Self {
        let mut at = now;
        let deadlines: Vec<Instant> = lines
            .iter()
            .enumerate()
            .map(|(i, _)| {
                at += Duration::from_millis(delays.get(i).copied().unwrap_or(0));
                at
            })
            .collect();
        let finished_at = at + Duration::from_millis(HOLD_MS);
        Self {
            lines: lines.to_vec(),
            deadlines,
            finished_at,
            skipped: false,
        }
    }

    /// Lines whose reveal deadline has passed.
    pub fn visible_lines(&self, now: Instant) -> &[&'static str] {
        let count = self
            .deadlines
            .iter()
            .take_while(|&&deadline| now >= deadline)
            .count();
        &self.lines[..count]
    }

    /// True while the reveal is still typing (drives the cursor block).
    pub fn is_typing(&self, now: Instant) -> bool {
        !self.skipped && self.visible_lines(now).len() < self.lines.len()
    }

    /// End the intro now.
    pub fn skip(&mut self) {
        self.skipped = true;
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.skipped || now >= self.finished_at
    }
}
