//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the *core* data structures and turns them into cells on
//! the terminal.  Nothing here mutates application state.

pub mod boot;
pub mod cursor_fx;
pub mod hint;
pub mod layout;
pub mod nav;
pub mod popup;
pub mod stage;
pub mod theme;
