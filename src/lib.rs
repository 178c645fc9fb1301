//! Library exports for chromanote.
//!
//! The binary is a thin terminal front end; everything it does is reachable
//! from here so other front ends can drive the same controller and store.

pub mod config;
pub mod controller;
pub mod handoff;
pub mod notes;
pub mod shell;
pub mod store;
pub mod ui;

pub use config::Config;
pub use controller::{Intent, MainController, Outcome};
pub use store::NoteStore;
