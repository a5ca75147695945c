//! # User Interface
//!
//! Colored terminal output for the command-line front end.

pub mod log;

pub use log::{debug, error, genres, header, info, print_logo, success, warn, Log};
