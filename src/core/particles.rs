//! Pointer-reactive particle field.
//!
//! Two field styles share one simulation container:
//!
//! - **Trail** — a fixed chain of dots; the head eases toward the pointer
//!   and every dot behind it eases toward its leader, producing a comet
//!   tail.  Dot weight and brightness fall off along the chain.
//! - **Grid** — dots seeded on a lattice across the viewport; the pointer
//!   repels nearby dots with a force proportional to
//!   `(radius - distance) / radius` and a spring pulls each dot back to its
//!   lattice anchor.
//!
//! The simulation is a plain `step(dt)` over plain data — no drawing here.
//! The painter in `ui::cursor_fx` turns positions into cells each frame.
//! A zero-area viewport seeds nothing and steps nothing.

use std::str::FromStr;

use thiserror::Error;

/// Dots in the trail chain.
pub const TRAIL_LENGTH: usize = 35;
/// Fraction of the gap to the leader closed per frame at the reference rate.
const TRAIL_EASE: f64 = 0.25;
/// Hard ceiling on live particles, any mode.  Lattice seeding truncates
/// against this, so oversized terminals lose the outermost rows first.
pub const MAX_PARTICLES: usize = 600;
/// Frame rate the per-frame tuning constants were chosen at.
const REF_FPS: f64 = 60.0;

/// Lattice pitch, columns.
const GRID_SPACING_X: f64 = 6.0;
/// Lattice pitch, rows.
const GRID_SPACING_Y: f64 = 3.0;
/// Pointer influence radius, in column units.
const REPEL_RADIUS: f64 = 14.0;
/// Peak repulsion acceleration, cells/s².
const REPEL_ACCEL: f64 = 260.0;
/// Spring-back pull toward the lattice anchor, 1/s².
const GRID_STIFFNESS: f64 = 40.0;
/// Velocity bleed, 1/s.
const GRID_DAMPING: f64 = 8.0;
/// A terminal row is roughly twice as tall as a column is wide; distances
/// are measured with rows scaled by this so the influence circle looks
/// round on screen.
const CELL_ASPECT: f64 = 2.0;

/// Resting brightness of a grid dot.
const GRID_BASE_INTENSITY: f64 = 0.35;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One dot of the field.
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Lattice home; grid mode springs back toward it.  Trail dots keep
    /// their seed position here and never read it again.
    pub anchor: Vec2,
    /// Display weight, drives the painter's glyph ramp.
    pub size: f64,
    /// Brightness in `[0, 1]`.
    pub intensity: f64,
}

// ───────────────────────────────────────── field mode ────────

#[derive(Debug, Error)]
#[error("unknown effect '{0}', expected trail, grid or off")]
pub struct ParseEffectError(String);

/// Which field style is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMode {
    Trail,
    Grid,
    Off,
}

impl FieldMode {
    /// Config/CLI token.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldMode::Trail => "trail",
            FieldMode::Grid => "grid",
            FieldMode::Off => "off",
        }
    }

    /// Human-readable label for the settings overlay.
    pub fn label(self) -> &'static str {
        match self {
            FieldMode::Trail => "Trail",
            FieldMode::Grid => "Grid",
            FieldMode::Off => "Off",
        }
    }

    /// Next mode in the toggle cycle.
    pub fn cycle(self) -> Self {
        match self {
            FieldMode::Trail => FieldMode::Grid,
            FieldMode::Grid => FieldMode::Off,
            FieldMode::Off => FieldMode::Trail,
        }
    }
}

impl FromStr for FieldMode {
    type Err = ParseEffectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trail" => Ok(FieldMode::Trail),
            "grid" => Ok(FieldMode::Grid),
            "off" | "none" => Ok(FieldMode::Off),
            other => Err(ParseEffectError(other.to_string())),
        }
    }
}

// ───────────────────────────────────────── field ─────────────

/// The particle field: owns the dots, the last pointer sample and the
/// viewport dimensions.  All coordinates are in cells (columns, rows).
#[derive(Debug, Clone)]
pub struct ParticleField {
    mode: FieldMode,
    width: f64,
    height: f64,
    /// Last observed pointer sample.  `None` until the first mouse event;
    /// readers see the viewport center instead so the field does not lurch
    /// in from the origin.
    pointer: Option<Vec2>,
    particles: Vec<Particle>,
}

impl ParticleField {
    pub fn new(mode: FieldMode, width: u16, height: u16) -> Self {
        let mut field = Self {
            mode,
            width: width as f64,
            height: height as f64,
            pointer: None,
            particles: Vec::new(),
        };
        field.reseed();
        field
    }

    pub fn mode(&self) -> FieldMode {
        self.mode
    }

    /// Switch field style and reseed for it.
    pub fn set_mode(&mut self, mode: FieldMode) {
        if mode != self.mode {
            self.mode = mode;
            self.reseed();
        }
    }

    /// Viewport changed: remember the new size and redistribute
    /// density-seeded dots across it.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width as f64;
        self.height = height as f64;
        if let Some(p) = &mut self.pointer {
            p.x = p.x.min(self.width);
            p.y = p.y.min(self.height);
        }
        self.reseed();
    }

    /// Record a pointer sample (cell coordinates).
    pub fn observe_pointer(&mut self, x: u16, y: u16) {
        self.pointer = Some(Vec2::new(x as f64, y as f64));
    }

    /// Effective pointer position: last sample, or the viewport center
    /// before any mouse movement has been seen.
    pub fn pointer(&self) -> Vec2 {
        self.pointer
            .unwrap_or_else(|| Vec2::new(self.width / 2.0, self.height / 2.0))
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    fn reseed(&mut self) {
        self.particles.clear();
        if self.width <= 0.0 || self.height <= 0.0 {
            return;
        }
        match self.mode {
            FieldMode::Off => {}
            FieldMode::Trail => self.seed_trail(),
            FieldMode::Grid => self.seed_grid(),
        }
        debug_assert!(self.particles.len() <= MAX_PARTICLES);
    }

    fn seed_trail(&mut self) {
        let center = Vec2::new(self.width / 2.0, self.height / 2.0);
        for i in 0..TRAIL_LENGTH {
            self.particles.push(Particle {
                pos: center,
                vel: Vec2::new(0.0, 0.0),
                anchor: center,
                size: ((TRAIL_LENGTH - i) as f64 * 0.25).max(0.5),
                intensity: (1.0 - i as f64 / TRAIL_LENGTH as f64).max(0.1),
            });
        }
    }

    fn seed_grid(&mut self) {
        let mut y = GRID_SPACING_Y / 2.0;
        'rows: while y < self.height {
            let mut x = GRID_SPACING_X / 2.0;
            while x < self.width {
                if self.particles.len() >= MAX_PARTICLES {
                    break 'rows;
                }
                let home = Vec2::new(x, y);
                self.particles.push(Particle {
                    pos: home,
                    vel: Vec2::new(0.0, 0.0),
                    anchor: home,
                    size: 1.0,
                    intensity: GRID_BASE_INTENSITY,
                });
                x += GRID_SPACING_X;
            }
            y += GRID_SPACING_Y;
        }
    }

    /// Advance the simulation by `dt` seconds.
    pub fn step(&mut self, dt: f64) {
        if dt <= 0.0 || self.particles.is_empty() {
            return;
        }
        match self.mode {
            FieldMode::Off => {}
            FieldMode::Trail => self.step_trail(dt),
            FieldMode::Grid => self.step_grid(dt),
        }
    }

    fn step_trail(&mut self, dt: f64) {
        // Per-frame ease rescaled so the chain moves the same regardless of
        // the configured tick rate.
        let k = 1.0 - (1.0 - TRAIL_EASE).powf(dt * REF_FPS);
        let mut leader = self.pointer();
        for p in &mut self.particles {
            p.pos.x += (leader.x - p.pos.x) * k;
            p.pos.y += (leader.y - p.pos.y) * k;
            leader = p.pos;
        }
    }

    fn step_grid(&mut self, dt: f64) {
        let ptr = self.pointer();
        let damp = (-GRID_DAMPING * dt).exp();
        for p in &mut self.particles {
            let dx = p.pos.x - ptr.x;
            let dy = (p.pos.y - ptr.y) * CELL_ASPECT;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist < REPEL_RADIUS && dist > f64::EPSILON {
                let strength = (REPEL_RADIUS - dist) / REPEL_RADIUS;
                p.vel.x += dx / dist * strength * REPEL_ACCEL * dt;
                p.vel.y += dy / dist * strength * REPEL_ACCEL * dt / CELL_ASPECT;
            }
            p.vel.x += (p.anchor.x - p.pos.x) * GRID_STIFFNESS * dt;
            p.vel.y += (p.anchor.y - p.pos.y) * GRID_STIFFNESS * dt;
            p.vel.x *= damp;
            p.vel.y *= damp;
            p.pos.x += p.vel.x * dt;
            p.pos.y += p.vel.y * dt;

            // Displaced dots glow brighter, easing back as they come home.
            let ox = p.pos.x - p.anchor.x;
            let oy = (p.pos.y - p.anchor.y) * CELL_ASPECT;
            let displacement = (ox * ox + oy * oy).sqrt();
            p.intensity = (GRID_BASE_INTENSITY + displacement / 6.0).min(1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 1.0 / 60.0;

    #[test]
    fn trail_seeds_fixed_chain_with_falloff() {
        let f = ParticleField::new(FieldMode::Trail, 80, 24);
        assert_eq!(f.particles().len(), TRAIL_LENGTH);

        let head = &f.particles()[0];
        assert_eq!(head.size, 8.75);
        assert_eq!(head.intensity, 1.0);

        let tail = f.particles().last().unwrap();
        assert_eq!(tail.size, 0.5);
        assert_eq!(tail.intensity, 0.1);
    }

    #[test]
    fn field_rests_at_center_before_any_pointer_sample() {
        let mut f = ParticleField::new(FieldMode::Trail, 80, 24);
        assert_eq!(f.pointer(), Vec2::new(40.0, 12.0));
        for _ in 0..10 {
            f.step(DT);
        }
        for p in f.particles() {
            assert_eq!(p.pos, Vec2::new(40.0, 12.0));
        }
    }

    #[test]
    fn trail_head_closes_a_quarter_of_the_gap_per_frame() {
        let mut f = ParticleField::new(FieldMode::Trail, 80, 24);
        f.observe_pointer(60, 12);
        f.step(DT);
        // Head: 40 + (60 - 40) * 0.25.
        assert!((f.particles()[0].pos.x - 45.0).abs() < 1e-9);
        // Second dot chases the head's updated position.
        assert!((f.particles()[1].pos.x - 41.25).abs() < 1e-9);
    }

    #[test]
    fn motionless_pointer_stream_never_grows_the_field() {
        for mode in [FieldMode::Trail, FieldMode::Grid] {
            let mut f = ParticleField::new(mode, 120, 40);
            let seeded = f.particles().len();
            assert!(seeded <= MAX_PARTICLES);
            for _ in 0..1000 {
                f.observe_pointer(60, 20);
                f.step(DT);
                assert_eq!(f.particles().len(), seeded);
            }
        }
    }

    #[test]
    fn grid_truncates_at_the_cap_on_large_viewports() {
        let f = ParticleField::new(FieldMode::Grid, 300, 90);
        assert_eq!(f.particles().len(), MAX_PARTICLES);
    }

    #[test]
    fn grid_redistributes_anchors_on_resize() {
        let mut f = ParticleField::new(FieldMode::Grid, 120, 40);
        f.resize(60, 20);
        assert!(!f.particles().is_empty());
        assert!(f.particles().len() <= MAX_PARTICLES);
        for p in f.particles() {
            assert!(p.anchor.x >= 0.0 && p.anchor.x < 60.0);
            assert!(p.anchor.y >= 0.0 && p.anchor.y < 20.0);
            assert_eq!(p.pos, p.anchor);
        }
    }

    #[test]
    fn repulsion_only_reaches_the_influence_radius() {
        let mut f = ParticleField::new(FieldMode::Grid, 100, 30);
        f.observe_pointer(50, 15);
        f.step(DT);

        for p in f.particles() {
            let dx = p.anchor.x - 50.0;
            let dy = (p.anchor.y - 15.0) * 2.0;
            let dist = (dx * dx + dy * dy).sqrt();
            let moved = p.pos != p.anchor;
            if dist > REPEL_RADIUS {
                assert!(!moved, "dot at distance {dist:.1} should be untouched");
            }
        }
        // At least something inside the radius was pushed.
        assert!(f.particles().iter().any(|p| p.pos != p.anchor));
    }

    #[test]
    fn closer_dots_are_pushed_harder_and_outward() {
        let mut f = ParticleField::new(FieldMode::Grid, 100, 30);
        f.observe_pointer(50, 15);
        f.step(DT);

        let mut samples: Vec<(f64, f64, f64)> = Vec::new();
        for p in f.particles() {
            let dx = p.anchor.x - 50.0;
            let dy = (p.anchor.y - 15.0) * 2.0;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist > f64::EPSILON && dist < REPEL_RADIUS {
                let speed = (p.vel.x * p.vel.x + p.vel.y * p.vel.y).sqrt();
                samples.push((dist, speed, p.vel.x * dx));
            }
        }
        assert!(samples.len() >= 2);
        samples.sort_by(|a, b| a.0.total_cmp(&b.0));
        // Nearest sample moves faster than the farthest one.
        assert!(samples.first().unwrap().1 > samples.last().unwrap().1);
        // Horizontal push points away from the pointer.
        for (_, _, outward) in &samples {
            assert!(*outward >= 0.0);
        }
    }

    #[test]
    fn zero_area_viewport_seeds_and_does_nothing() {
        for mode in [FieldMode::Trail, FieldMode::Grid] {
            let mut f = ParticleField::new(mode, 0, 0);
            assert!(f.particles().is_empty());
            f.observe_pointer(0, 0);
            f.step(DT);
            assert!(f.particles().is_empty());
        }
    }

    #[test]
    fn switching_modes_reseeds() {
        let mut f = ParticleField::new(FieldMode::Trail, 80, 24);
        assert_eq!(f.particles().len(), TRAIL_LENGTH);
        f.set_mode(FieldMode::Off);
        assert!(f.particles().is_empty());
        f.set_mode(FieldMode::Grid);
        assert!(!f.particles().is_empty());
    }

    #[test]
    fn effect_tokens_round_trip() {
        for mode in [FieldMode::Trail, FieldMode::Grid, FieldMode::Off] {
            assert_eq!(mode.as_str().parse::<FieldMode>().unwrap(), mode);
        }
        assert!("sparkles".parse::<FieldMode>().is_err());
        assert_eq!(FieldMode::Trail.cycle(), FieldMode::Grid);
        assert_eq!(FieldMode::Off.cycle(), FieldMode::Trail);
    }
}
