// fieldstrip/src/lib.rs
//! # fieldstrip CLI
//!
//! Command-line front end for `fieldstrip-core`: argument parsing, command
//! implementations, terminal output and file handling.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
pub mod utils;
