// fieldstrip-core/src/engine.rs
//! Defines the core `StripEngine` trait.
//!
//! The `StripEngine` trait provides a pluggable interface for different
//! field removal strategies (plain regex substitution, object-literal aware
//! deletion). Both the CLI and the headless helpers talk to engines only
//! through this trait.
//!
//! License: MIT OR APACHE 2.0

use anyhow::Result;

use crate::config::{StripConfig, StripSummaryItem};
use crate::strip_match::StripMatch;

/// A trait that defines the core functionality of a stripping engine.
pub trait StripEngine: Send + Sync {
    /// Removes every configured field occurrence from `content`.
    ///
    /// Returns the new content and a per-rule summary of what was removed.
    ///
    /// # Arguments
    /// * `content` - The input text.
    /// * `source_id` - The name or identifier of the source being processed.
    fn strip(&self, content: &str, source_id: &str) -> Result<(String, Vec<StripSummaryItem>)>;

    /// Reports what `strip` would remove without producing new content.
    fn analyze_for_stats(&self, content: &str, source_id: &str) -> Result<Vec<StripSummaryItem>> {
        self.strip(content, source_id).map(|(_, summary)| summary)
    }

    /// Returns every removal as a [`StripMatch`], in application order.
    fn find_matches(&self, content: &str, source_id: &str) -> Result<Vec<StripMatch>>;

    /// A short identifier for logs and reports.
    fn name(&self) -> &'static str;

    /// Returns a reference to the engine's configuration.
    fn get_rules(&self) -> &StripConfig;
}
