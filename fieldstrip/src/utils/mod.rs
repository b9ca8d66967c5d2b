// fieldstrip/src/utils/mod.rs
//! Filesystem helpers used by the commands.

pub mod file_io;
