//! `kzz-snapshot` library crate.
//!
//! The binary (`kzz`) is a thin wrapper around this library so that the whole
//! fetch -> decode -> archive -> report workflow is testable without spawning
//! processes or touching the network.

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod report;
