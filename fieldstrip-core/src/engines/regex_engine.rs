// fieldstrip-core/src/engines/regex_engine.rs
//! A `StripEngine` that deletes fields by regular expression substitution.
//!
//! Each rule is applied globally and the rules run in sequence, so rule
//! *n + 1* operates on the output of rule *n*. Matches are replaced with
//! nothing. This reproduces plain text substitution exactly, including its
//! blind spot: a removed first key leaves `{, ...` behind.
//!
//! License: MIT OR APACHE 2.0

use anyhow::{Context, Result};
use log::debug;
use std::borrow::Cow;
use std::sync::Arc;

use crate::config::{StripConfig, StripSummaryItem};
use crate::engine::StripEngine;
use crate::patterns::compiler::{get_or_compile_rules, CompiledRules};
use crate::strip_match::{summarize, LineIndex, StripMatch};

#[derive(Debug)]
pub struct RegexEngine {
    compiled_rules: Arc<CompiledRules>,
    config: StripConfig,
}

impl RegexEngine {
    pub fn new(config: StripConfig) -> Result<Self> {
        let compiled_rules = get_or_compile_rules(&config)
            .context("Failed to compile field rules for RegexEngine")?;
        Ok(Self {
            compiled_rules,
            config,
        })
    }

    fn run(&self, content: &str, source_id: &str) -> (String, Vec<StripMatch>) {
        let mut current: Cow<'_, str> = Cow::Borrowed(content);
        let mut matches = Vec::new();

        for rule in &self.compiled_rules.rules {
            let mut hits = rule.regex.find_iter(&current).peekable();
            if hits.peek().is_none() {
                debug!("Rule '{}' matched 0 time(s) in {}.", rule.name, source_id);
                continue;
            }

            let lines = LineIndex::new(&current);
            let found: Vec<StripMatch> = hits
                .map(|m| StripMatch {
                    rule_name: rule.name.clone(),
                    field: rule.field.clone(),
                    removed_text: m.as_str().to_string(),
                    start: m.start() as u64,
                    end: m.end() as u64,
                    line_number: Some(lines.line_of(m.start())),
                    source_id: source_id.to_string(),
                })
                .collect();

            debug!(
                "Rule '{}' matched {} time(s) in {}.",
                rule.name,
                found.len(),
                source_id
            );

            current = Cow::Owned(rule.regex.replace_all(&current, "").into_owned());
            matches.extend(found);
        }

        (current.into_owned(), matches)
    }

    fn rule_order(&self) -> Vec<(String, String)> {
        self.compiled_rules
            .rules
            .iter()
            .map(|r| (r.name.clone(), r.field.clone()))
            .collect()
    }
}

impl StripEngine for RegexEngine {
    fn strip(&self, content: &str, source_id: &str) -> Result<(String, Vec<StripSummaryItem>)> {
        let (stripped, matches) = self.run(content, source_id);
        debug!(
            "RegexEngine removed {} occurrence(s); length {} -> {}.",
            matches.len(),
            content.len(),
            stripped.len()
        );
        Ok((stripped, summarize(&matches, &self.rule_order())))
    }

    fn find_matches(&self, content: &str, source_id: &str) -> Result<Vec<StripMatch>> {
        Ok(self.run(content, source_id).1)
    }

    fn name(&self) -> &'static str {
        "regex"
    }

    fn get_rules(&self) -> &StripConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FieldRule, ValueKind};

    fn default_engine() -> RegexEngine {
        RegexEngine::new(StripConfig::load_default_rules().unwrap()).unwrap()
    }

    #[test]
    fn strips_end_to_end_example() {
        let engine = default_engine();
        let input = r#"{"name": "Dish A", "isSpicy": true, "cookingTime": 30, "tags": ["x"]}"#;
        let (out, summary) = engine.strip(input, "test").unwrap();
        assert_eq!(out, r#"{"name": "Dish A", "tags": ["x"]}"#);
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].rule_name, "isSpicy");
        assert_eq!(summary[0].removed_texts, vec![r#", "isSpicy": true"#]);
    }

    #[test]
    fn keeps_first_key_comma_like_plain_substitution() {
        let engine = default_engine();
        let (out, _) = engine
            .strip(r#"{"isSpicy": false, "name": "x"}"#, "test")
            .unwrap();
        assert_eq!(out, r#"{, "name": "x"}"#);
    }

    #[test]
    fn later_rules_see_earlier_output() {
        let config = StripConfig {
            rules: vec![
                FieldRule {
                    pattern: Some("AB".into()),
                    ..FieldRule::new("first", ValueKind::Any)
                },
                FieldRule {
                    pattern: Some("XY".into()),
                    ..FieldRule::new("second", ValueKind::Any)
                },
            ],
        };
        let engine = RegexEngine::new(config).unwrap();
        let (out, summary) = engine.strip("XABY", "test").unwrap();
        assert_eq!(out, "");
        assert_eq!(summary.len(), 2);
    }

    #[test]
    fn match_offsets_refer_to_intermediate_text() {
        let engine = default_engine();
        let input = "{\"a\": 1, \"isSpicy\": true,\n \"cookingTime\": 5}";
        let matches = engine.find_matches(input, "test").unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].start, 7);
        assert_eq!(matches[1].removed_text, ",\n \"cookingTime\": 5");
        assert_eq!(matches[1].start, 7);
        assert_eq!(matches[1].line_number, Some(1));
    }
}
