//! Virtual-scroll controller: wheel input → paginated section transitions.
//!
//! The deck never scrolls natively.  Wheel notches accumulate into a virtual
//! scroll scalar measured in abstract units (one section = `PAGE_HEIGHT`
//! units, regardless of terminal rows).  A gesture that accumulates past
//! `SNAP_THRESHOLD` commits a spring-animated turn to the adjacent section;
//! anything weaker produces a bounded visual drift that snaps back after a
//! short idle window.  Wheel input arriving while a turn is in flight, or
//! during the cooldown right after one, is swallowed so the spring target is
//! never retargeted mid-flight.
//!
//! All timing state (snap-back deadline, cooldown expiry) lives on the
//! controller itself as `Option<Instant>` fields, cleared before every
//! reschedule.  Nothing here is global and nothing outlives the controller.

use std::time::{Duration, Instant};

use super::spring::Spring;

/// One coherent tuning policy, used everywhere.
pub mod tuning {
    /// Virtual height of one section, in scroll units.
    pub const PAGE_HEIGHT: f64 = 1000.0;
    /// Raw delta contributed by one wheel notch.
    pub const WHEEL_NOTCH: f64 = 400.0;
    /// Raw delta → accumulated gesture units.
    pub const SCROLL_SCALE: f64 = 0.4;
    /// Accumulation (in scaled units) needed to commit a page turn.
    pub const SNAP_THRESHOLD: f64 = 300.0;
    /// Fraction of each scaled delta applied as live drift.
    pub const DRIFT_FACTOR: f64 = 0.6;
    /// Drift never strays further than this from the section boundary.
    pub const DRIFT_MAX: f64 = 180.0;
    /// Idle window after the last notch before an unresolved drift snaps back.
    pub const IDLE_SNAP_MS: u64 = 120;
    /// Wheel suppression window after a turn completes.
    pub const COOLDOWN_MS: u64 = 250;
}

use tuning::*;

/// Controller phase.  `Navigating` and `Cooldown` both swallow wheel input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPhase {
    /// Settled on a section boundary, nothing pending.
    Idle,
    /// A wheel gesture is accumulating; drift may be applied.
    UserScrolling,
    /// The spring is animating toward a section boundary.
    Navigating,
    /// A turn just completed; wheel input still swallowed.
    Cooldown,
}

/// Owns the virtual scroll scalar, its spring, and the section index.
#[derive(Debug, Clone)]
pub struct ScrollController {
    section_count: usize,
    phase: ScrollPhase,
    /// Smoothed scroll value; the raw (target) value is `spring.target()`.
    spring: Spring,
    /// Scaled gesture accumulation since the phase entered `UserScrolling`.
    accumulated: f64,
    /// Section the current gesture is anchored on (set on gesture start).
    anchor: usize,
    /// Section the in-flight navigation is heading to.
    nav_target: usize,
    /// Section of the last completed navigation.
    settled_section: usize,
    /// Unresolved-drift snap-back deadline.  Cleared on every new notch.
    snap_deadline: Option<Instant>,
    /// End of the post-turn suppression window.
    cooldown_until: Option<Instant>,
    /// Set when a turn lands on a *different* section; taken by the caller.
    arrival: Option<usize>,
}

impl ScrollController {
    pub fn new(section_count: usize) -> Self {
        Self {
            section_count: section_count.max(1),
            phase: ScrollPhase::Idle,
            spring: Spring::page_turn(0.0),
            accumulated: 0.0,
            anchor: 0,
            nav_target: 0,
            settled_section: 0,
            snap_deadline: None,
            cooldown_until: None,
            arrival: None,
        }
    }

    /// Largest legal raw scroll value.
    fn max_scroll(&self) -> f64 {
        (self.section_count - 1) as f64 * PAGE_HEIGHT
    }

    /// Smoothed scroll value, for the renderer.
    pub fn smoothed(&self) -> f64 {
        self.spring.value()
    }

    /// Raw (target) scroll value.  Always within `[0, max_scroll]`.
    pub fn raw(&self) -> f64 {
        self.spring.target()
    }

    /// Active section: nearest boundary to the smoothed value.
    pub fn active_index(&self) -> usize {
        let idx = (self.smoothed() / PAGE_HEIGHT).round() as i64;
        idx.clamp(0, self.section_count as i64 - 1) as usize
    }

    pub fn phase(&self) -> ScrollPhase {
        self.phase
    }

    pub fn section_count(&self) -> usize {
        self.section_count
    }

    /// True while wheel input would be swallowed.
    pub fn is_suppressed(&self) -> bool {
        matches!(self.phase, ScrollPhase::Navigating | ScrollPhase::Cooldown)
    }

    /// Section landed on by the last completed turn, if it differed from
    /// where the deck previously rested.  Latched; taking it clears it.
    pub fn take_arrival(&mut self) -> Option<usize> {
        self.arrival.take()
    }

    // ───────────────────────────────────────── input ─────────────

    /// Feed one wheel event.  `delta` is in raw units, positive = advance
    /// (wheel down).  Suppressed phases swallow the event entirely: no
    /// accumulation, no drift.
    pub fn handle_wheel(&mut self, delta: f64, now: Instant) {
        if self.is_suppressed() {
            return;
        }
        if self.phase == ScrollPhase::Idle {
            self.phase = ScrollPhase::UserScrolling;
            self.anchor = self.active_index();
            self.accumulated = 0.0;
        }

        self.accumulated += delta * SCROLL_SCALE;

        if self.accumulated.abs() > SNAP_THRESHOLD {
            let target = if self.accumulated > 0.0 {
                (self.anchor + 1).min(self.section_count - 1)
            } else {
                self.anchor.saturating_sub(1)
            };
            self.begin_navigation(target);
            return;
        }

        // Sub-threshold: bounded visual drift around the anchor boundary,
        // reverted by the idle snap-back if the gesture dies out.
        let boundary = self.anchor as f64 * PAGE_HEIGHT;
        let drifted = self.raw() + delta * SCROLL_SCALE * DRIFT_FACTOR;
        let bounded = drifted
            .clamp(boundary - DRIFT_MAX, boundary + DRIFT_MAX)
            .clamp(0.0, self.max_scroll());
        self.spring.set_target(bounded);
        self.snap_deadline = Some(now + Duration::from_millis(IDLE_SNAP_MS));
    }

    /// Jump to a section.  Out-of-range targets are ignored, as are calls
    /// while a turn is in flight or cooling down.
    pub fn navigate_to(&mut self, index: usize, _now: Instant) {
        if index >= self.section_count || self.is_suppressed() {
            return;
        }
        self.begin_navigation(index);
    }

    fn begin_navigation(&mut self, target: usize) {
        tracing::debug!(from = self.settled_section, to = target, "page turn");
        self.accumulated = 0.0;
        self.snap_deadline = None;
        self.nav_target = target;
        self.spring.set_target(target as f64 * PAGE_HEIGHT);
        self.phase = ScrollPhase::Navigating;
    }

    // ───────────────────────────────────────── tick ──────────────

    /// Advance the spring and the phase machine.  `now` drives deadlines,
    /// `dt` (seconds) drives the spring.
    pub fn tick(&mut self, now: Instant, dt: f64) {
        self.spring.tick(dt);

        match self.phase {
            ScrollPhase::Idle => {}
            ScrollPhase::UserScrolling => {
                // let-else keeps the happy path flat.
                let Some(deadline) = self.snap_deadline else {
                    return;
                };
                if now >= deadline {
                    // Gesture died below threshold: revert to the anchor.
                    self.begin_navigation(self.anchor);
                }
            }
            ScrollPhase::Navigating => {
                if self.spring.is_settled() {
                    if self.nav_target != self.settled_section {
                        self.arrival = Some(self.nav_target);
                    }
                    self.settled_section = self.nav_target;
                    self.phase = ScrollPhase::Cooldown;
                    self.cooldown_until = Some(now + Duration::from_millis(COOLDOWN_MS));
                }
            }
            ScrollPhase::Cooldown => {
                let Some(until) = self.cooldown_until else {
                    self.phase = ScrollPhase::Idle;
                    return;
                };
                if now >= until {
                    self.cooldown_until = None;
                    self.phase = ScrollPhase::Idle;
                }
            }
        }
    }
}
