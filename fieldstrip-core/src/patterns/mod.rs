//! Regex pattern generation and compilation for field rules.
//!
//! Field rules are declarative (field name plus value kind); this module
//! turns them into the regular expressions the regex engine applies. The
//! structured engine does not use compiled patterns, only the rules.

pub mod compiler;
