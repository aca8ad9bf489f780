//! tick, a tiny single-user task list.
//!
//! The core (model, store, view projection, operations) is display-free and
//! fully testable; the `tui` and `cli` modules are thin adapters over it.

pub mod cli;
pub mod io;
pub mod model;
pub mod ops;
pub mod tui;
pub mod view;
