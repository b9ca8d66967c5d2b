// fieldstrip-core/src/engines/structured_engine.rs
//! A `StripEngine` that removes whole object entries.
//!
//! The input is scanned with [`crate::object_literal`]; every entry whose
//! quoted key names a rule's field and whose value fits the rule's value kind
//! is deleted together with exactly one separating comma. Unquoted keys are
//! only matched by rules with `bare_keys` set. The rest of the text is copied
//! through untouched, so formatting, comments and key order survive.
//!
//! Comma rules, per object without comments between its entries:
//! * a removed entry that has a kept entry somewhere after it is deleted up
//!   to the start of the next entry;
//! * the trailing run of removed entries is deleted from the end of the last
//!   kept entry, which keeps any trailing comma the object already had;
//! * an object that loses every entry becomes `{}`.
//!
//! When comments sit between entries, only the entry, its own comma and the
//! whitespace after that comma go; a trailing run without a comma of its own
//! takes the comma of the last kept entry instead.
//!
//! License: MIT OR APACHE 2.0

use anyhow::{Context, Result};
use log::debug;

use crate::config::{validate_rules, FieldRule, StripConfig, StripSummaryItem};
use crate::engine::StripEngine;
use crate::object_literal::{self, Entry, ObjectLiteral, Span};
use crate::strip_match::{summarize, LineIndex, StripMatch};

/// A byte range to delete and the field occurrences it accounts for.
#[derive(Debug)]
struct Deletion {
    span: Span,
    matches: Vec<StripMatch>,
}

impl Deletion {
    fn separator(start: usize, end: usize) -> Self {
        Deletion {
            span: Span { start, end },
            matches: Vec::new(),
        }
    }
}

/// Per-scan context shared by the planning steps.
struct Source<'a> {
    content: &'a str,
    id: &'a str,
    lines: LineIndex,
}

/// True when a comment sits anywhere between the entries of `obj`.
///
/// Outside entry spans an object holds only whitespace, commas and
/// comments, so any `/` there starts a comment.
fn has_comment_trivia(obj: &ObjectLiteral, content: &str) -> bool {
    let mut cursor = obj.open + 1;
    for entry in &obj.entries {
        if content[cursor..entry.span.start].contains('/') {
            return true;
        }
        cursor = entry.span.end;
    }
    content[cursor..obj.close].contains('/')
}

fn skip_whitespace(content: &str, mut pos: usize) -> usize {
    let bytes = content.as_bytes();
    while pos < bytes.len() && matches!(bytes[pos], b' ' | b'\t' | b'\r' | b'\n') {
        pos += 1;
    }
    pos
}

#[derive(Debug)]
pub struct StructuredEngine {
    config: StripConfig,
    active_rules: Vec<FieldRule>,
}

impl StructuredEngine {
    pub fn new(config: StripConfig) -> Result<Self> {
        validate_rules(&config.rules).context("Invalid rules for StructuredEngine")?;
        let active_rules: Vec<FieldRule> = config
            .rules
            .iter()
            .filter(|r| r.is_enabled())
            .cloned()
            .collect();
        debug!("StructuredEngine ready with {} active rule(s).", active_rules.len());
        Ok(Self {
            config,
            active_rules,
        })
    }

    /// The first rule that claims `entry`, if any.
    fn rule_for(&self, entry: &Entry, content: &str) -> Option<&FieldRule> {
        let key = entry.key.as_ref()?;
        let value = entry.value?.text(content);
        self.active_rules.iter().find(|r| {
            r.field_name() == key.name
                && (key.quote.is_some() || r.bare_keys)
                && r.value_kind.accepts(value)
        })
    }

    fn entry_match(&self, rule: &FieldRule, entry: &Entry, src: &Source<'_>) -> StripMatch {
        StripMatch {
            rule_name: rule.name.clone(),
            field: rule.field_name().to_string(),
            removed_text: entry.span.text(src.content).to_string(),
            start: entry.span.start as u64,
            end: entry.span.end as u64,
            line_number: Some(src.lines.line_of(entry.span.start)),
            source_id: src.id.to_string(),
        }
    }

    fn plan_object(&self, obj: &ObjectLiteral, src: &Source<'_>, out: &mut Vec<Deletion>) {
        let claimed: Vec<Option<&FieldRule>> = obj
            .entries
            .iter()
            .map(|e| self.rule_for(e, src.content))
            .collect();
        if claimed.iter().all(Option::is_none) {
            return;
        }

        if has_comment_trivia(obj, src.content) {
            self.plan_around_comments(obj, &claimed, src, out);
            return;
        }

        let matches_in = |range: std::ops::Range<usize>| -> Vec<StripMatch> {
            range
                .filter_map(|i| claimed[i].map(|rule| self.entry_match(rule, &obj.entries[i], src)))
                .collect()
        };

        let entries = &obj.entries;
        match claimed.iter().rposition(Option::is_none) {
            None => out.push(Deletion {
                span: Span {
                    start: obj.open + 1,
                    end: obj.close,
                },
                matches: matches_in(0..entries.len()),
            }),
            Some(last_kept) => {
                for i in 0..last_kept {
                    if claimed[i].is_some() {
                        out.push(Deletion {
                            span: Span {
                                start: entries[i].span.start,
                                end: entries[i + 1].span.start,
                            },
                            matches: matches_in(i..i + 1),
                        });
                    }
                }
                if last_kept + 1 < entries.len() {
                    out.push(Deletion {
                        span: Span {
                            start: entries[last_kept].span.end,
                            end: entries[entries.len() - 1].span.end,
                        },
                        matches: matches_in(last_kept + 1..entries.len()),
                    });
                }
            }
        }
    }

    /// Deletes entries and their own commas only, so comments stay in place.
    fn plan_around_comments(
        &self,
        obj: &ObjectLiteral,
        claimed: &[Option<&FieldRule>],
        src: &Source<'_>,
        out: &mut Vec<Deletion>,
    ) {
        let entries = &obj.entries;
        for (entry, rule) in entries.iter().zip(claimed) {
            let Some(rule) = rule else { continue };
            out.push(Deletion {
                span: entry.span,
                matches: vec![self.entry_match(rule, entry, src)],
            });
            if let Some(comma) = entry.comma {
                out.push(Deletion::separator(comma, skip_whitespace(src.content, comma + 1)));
            }
        }

        let Some(last_kept) = claimed.iter().rposition(Option::is_none) else {
            return;
        };
        let trailing_run = last_kept + 1 < entries.len();
        let run_has_own_comma = entries.last().is_some_and(|e| e.comma.is_some());
        if trailing_run && !run_has_own_comma {
            if let Some(comma) = entries[last_kept].comma {
                out.push(Deletion::separator(comma, comma + 1));
            }
        }
    }

    /// Computes the non-overlapping deletions for `content`, sorted by offset.
    fn plan(&self, content: &str, source_id: &str) -> Result<Vec<Deletion>> {
        let objects = object_literal::scan(content)
            .with_context(|| format!("Failed to scan object literals in {}", source_id))?;
        debug!("Scanned {} object literal(s) in {}.", objects.len(), source_id);

        let src = Source {
            content,
            id: source_id,
            lines: LineIndex::new(content),
        };
        let mut deletions = Vec::new();
        for obj in &objects {
            self.plan_object(obj, &src, &mut deletions);
        }

        // Deletions either nest or are disjoint; an outer one wins.
        deletions.sort_by(|a, b| {
            a.span
                .start
                .cmp(&b.span.start)
                .then(b.span.end.cmp(&a.span.end))
        });
        let mut kept: Vec<Deletion> = Vec::with_capacity(deletions.len());
        let mut last_end = 0usize;
        for deletion in deletions {
            if deletion.span.start < last_end {
                debug!(
                    "Dropping nested deletion at {}..{}; its entry is already removed.",
                    deletion.span.start, deletion.span.end
                );
                continue;
            }
            last_end = deletion.span.end;
            kept.push(deletion);
        }
        Ok(kept)
    }

    fn rule_order(&self) -> Vec<(String, String)> {
        self.active_rules
            .iter()
            .map(|r| (r.name.clone(), r.field_name().to_string()))
            .collect()
    }
}

impl StripEngine for StructuredEngine {
    fn strip(&self, content: &str, source_id: &str) -> Result<(String, Vec<StripSummaryItem>)> {
        let deletions = self.plan(content, source_id)?;

        let mut stripped = String::with_capacity(content.len());
        let mut cursor = 0usize;
        for deletion in &deletions {
            stripped.push_str(&content[cursor..deletion.span.start]);
            cursor = deletion.span.end;
        }
        stripped.push_str(&content[cursor..]);

        let matches: Vec<StripMatch> = deletions.into_iter().flat_map(|d| d.matches).collect();
        debug!(
            "StructuredEngine removed {} entr(ies); length {} -> {}.",
            matches.len(),
            content.len(),
            stripped.len()
        );
        Ok((stripped, summarize(&matches, &self.rule_order())))
    }

    fn find_matches(&self, content: &str, source_id: &str) -> Result<Vec<StripMatch>> {
        Ok(self
            .plan(content, source_id)?
            .into_iter()
            .flat_map(|d| d.matches)
            .collect())
    }

    fn name(&self) -> &'static str {
        "structured"
    }

    fn get_rules(&self) -> &StripConfig {
        &self.config
    }
}
