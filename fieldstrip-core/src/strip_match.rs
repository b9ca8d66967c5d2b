//! Data structures describing removed field occurrences, plus the helpers
//! that turn them into per-rule summaries.

use log::debug;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::StripSummaryItem;

/// A single removed occurrence of a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StripMatch {
    pub rule_name: String,
    pub field: String,
    /// The exact text that was (or would be) deleted, separators included.
    pub removed_text: String,
    /// Byte offsets into the text the rule was applied to.
    pub start: u64,
    pub end: u64,
    /// 1-based line of `start`.
    #[serde(default)]
    pub line_number: Option<u64>,
    #[serde(default)]
    pub source_id: String,
}

/// Newline offsets of a text, built once so that line lookups are
/// `O(log n)` however many matches a file has.
#[derive(Debug, Clone)]
pub struct LineIndex {
    newlines: Vec<usize>,
}

impl LineIndex {
    pub fn new(content: &str) -> Self {
        let newlines = content
            .bytes()
            .enumerate()
            .filter(|(_, b)| *b == b'\n')
            .map(|(i, _)| i)
            .collect();
        Self { newlines }
    }

    /// Returns the 1-based line number of a byte offset.
    pub fn line_of(&self, offset: usize) -> u64 {
        self.newlines.partition_point(|&nl| nl < offset) as u64 + 1
    }
}

/// Hex-encoded SHA-256 of a text, used to identify inputs and outputs in reports.
pub fn content_digest(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}

/// Groups matches into one summary item per rule.
///
/// `rule_order` lists `(rule_name, field)` pairs; items come out in that order
/// and rules without matches are omitted.
pub fn summarize(matches: &[StripMatch], rule_order: &[(String, String)]) -> Vec<StripSummaryItem> {
    let mut summary = Vec::new();
    for (rule_name, field) in rule_order {
        let removed_texts: Vec<String> = matches
            .iter()
            .filter(|m| &m.rule_name == rule_name)
            .map(|m| m.removed_text.clone())
            .collect();
        if removed_texts.is_empty() {
            continue;
        }
        debug!("Rule '{}' removed {} occurrence(s).", rule_name, removed_texts.len());
        summary.push(StripSummaryItem {
            rule_name: rule_name.clone(),
            field: field.clone(),
            occurrences: removed_texts.len(),
            removed_texts,
        });
    }
    summary
}

/// Total number of removals across a summary.
pub fn total_occurrences(summary: &[StripSummaryItem]) -> usize {
    summary.iter().map(|s| s.occurrences).sum()
}
