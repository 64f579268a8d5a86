//! Driver layer for browser automation.
//!
//! This crate wraps a `fantoccini` WebDriver client with the page and
//! element helpers the rest of the workspace drives pages through.
//!
//! - [`browser::driver::ScoutDriver`]: WebDriver client wrapper
//! - [`browser::page::ScoutPage`]: navigation, waits, frames, windows,
//!   alerts, script execution, screenshots
//! - [`browser::page::ScoutElement`]: per-element reads and interactions
//! - [`browser::pacing::Pacing`]: watchable demo timings
pub mod browser;
