//! Core simulation and mapping logic – springs, scrolling, panel
//! transforms, particles, and the intro effects.
//!
//! Nothing in this module depends on any TUI or rendering crate.  Every
//! piece is a plain state + `step`/`tick` function pair, unit-testable
//! without a terminal.

pub mod boot;
pub mod panel;
pub mod particles;
pub mod scramble;
pub mod scroll;
pub mod spring;
