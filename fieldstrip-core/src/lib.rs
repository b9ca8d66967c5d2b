// fieldstrip-core/src/lib.rs
//! # fieldstrip Core Library
//!
//! `fieldstrip-core` provides the platform-independent logic for removing
//! named fields from JavaScript and JSON data files. It defines the field
//! rule model, compiles rules into regular expressions, scans object
//! literals, and implements a pluggable `StripEngine` trait.
//!
//! The library is pure: it transforms strings and never touches the files
//! it is asked about. Reading, writing and reporting belong to the CLI.
//!
//! ## Modules
//!
//! * `config`: `FieldRule`, `ValueKind` and `StripConfig`, with loading, merging and filtering.
//! * `patterns`: Regex generation and cached compilation of field rules.
//! * `object_literal`: A tolerant scanner for `{ ... }` object literals.
//! * `engine`: The `StripEngine` trait.
//! * `engines`: The regex and structured engines.
//! * `strip_match`: Records of removed occurrences and their summaries.
//! * `headless`: One-shot helpers for non-interactive use.
//! * `errors`: The `StripError` type.
//!
//! ## Usage Example
//!
//! ```rust
//! use fieldstrip_core::{headless_strip_string, HeadlessEngineType, StripConfig};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let config = StripConfig::load_default_rules()?;
//!     let input = r#"{"name": "Dish A", "isSpicy": true, "cookingTime": 30, "tags": ["x"]}"#;
//!
//!     let output = headless_strip_string(config, input, "inline", HeadlessEngineType::Structured)?;
//!     assert_eq!(output, r#"{"name": "Dish A", "tags": ["x"]}"#);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Fallible operations return `anyhow::Result`; the underlying cause is a
//! [`StripError`] where the library itself detected the problem.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod headless;
pub mod object_literal;
pub mod patterns;
pub mod strip_match;

/// Re-exports the public configuration types and functions for managing field rules.
pub use config::{
    merge_rules, FieldRule, RuleConfigNotFoundError, StripConfig, StripSummaryItem, ValueKind,
    MAX_PATTERN_LENGTH,
};

/// Re-exports the custom error type.
pub use errors::StripError;

/// Re-exports the engine trait and its implementations.
pub use engine::StripEngine;
pub use engines::regex_engine::RegexEngine;
pub use engines::structured_engine::StructuredEngine;

/// Re-exports match records and summary helpers.
pub use strip_match::{content_digest, total_occurrences, StripMatch};

/// Re-exports types and functions for one-shot, non-interactive use.
pub use headless::{build_engine, headless_strip_string, HeadlessEngineType};

/// Re-exports compiled rule types for advanced usage.
pub use patterns::compiler::{compile_rules, field_pattern, CompiledRule, CompiledRules};
