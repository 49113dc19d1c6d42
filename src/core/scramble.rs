//! Scramble-in text: a heading resolves out of glyph noise, left to right.
//!
//! Progress advances a fraction of a character per tick (scaled by `dt`, so
//! the visible speed does not depend on the configured frame rate).  The
//! resolved prefix only ever grows; positions past it render as random
//! glyphs from a fixed set until the sweep reaches them.

use rand::Rng;

/// Noise glyphs, ASCII only so every cell stays one column wide.
const GLYPHS: &[u8] = b"!<>-_\\/[]{}=+*^?#";

/// Characters resolved per second.
const RESOLVE_CPS: f64 = 16.0;

/// One scrambling heading.
#[derive(Debug, Clone)]
pub struct Scramble {
    target: Vec<char>,
    progress: f64,
}

impl Scramble {
    pub fn new(target: &str) -> Self {
        Self {
            target: target.chars().collect(),
            progress: 0.0,
        }
    }

    /// Begin the resolve sweep again from all-noise.
    pub fn restart(&mut self) {
        self.progress = 0.0;
    }

    /// Advance the sweep by `dt` seconds.
    pub fn tick(&mut self, dt: f64) {
        if dt <= 0.0 || self.is_done() {
            return;
        }
        self.progress = (self.progress + dt * RESOLVE_CPS).min(self.target.len() as f64);
    }

    pub fn is_done(&self) -> bool {
        self.progress >= self.target.len() as f64
    }

    /// Number of leading characters currently resolved.
    pub fn resolved(&self) -> usize {
        (self.progress.floor() as usize).min(self.target.len())
    }

    /// Render the heading: resolved prefix, then noise.  Same length as the
    /// target on every call.
    pub fn line(&self) -> String {
        let resolved = self.resolved();
        let mut rng = rand::thread_rng();
        self.target
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                if i < resolved {
                    c
                } else {
                    GLYPHS[rng.gen_range(0..GLYPHS.len())] as char
                }
            })
            .collect()
    }
}
