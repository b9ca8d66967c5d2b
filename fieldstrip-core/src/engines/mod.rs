// fieldstrip-core/src/engines/mod.rs
//! Concrete `StripEngine` implementations.
//!
//! * `regex_engine` applies one substitution per rule, in sequence, exactly
//!   as a text pattern would.
//! * `structured_engine` scans object literals and deletes whole entries.
//!
//! # License
//! MIT OR Apache-2.0

pub mod regex_engine;
pub mod structured_engine;
