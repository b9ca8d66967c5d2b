//! Configuration management for `fieldstrip-core`.
//!
//! This module defines the core data structures for field removal rules. It
//! handles serialization/deserialization of YAML configurations and provides
//! utilities for loading, merging, filtering, and validating these configs.
//!
//! Rule order matters: engines apply rules in the order they appear in
//! [`StripConfig::rules`], so every operation here preserves it.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use lazy_static::lazy_static;
use log::{debug, info, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::str::FromStr;

use crate::errors::StripError;

/// Maximum allowed length for an explicit regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// The class of values that qualify a field for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// `true` or `false`.
    Boolean,
    /// One or more decimal digits.
    Integer,
    /// A JSON-style number, optionally signed, with fraction and exponent.
    Number,
    /// A quoted string literal.
    String,
    /// Any value at all.
    #[default]
    Any,
}

impl ValueKind {
    /// The regex fragment matching a value of this kind.
    pub fn value_pattern(&self) -> &'static str {
        match self {
            ValueKind::Boolean => r"(true|false)",
            ValueKind::Integer => r"\d+",
            ValueKind::Number => r"-?\d+(?:\.\d+)?(?:[eE][+-]?\d+)?",
            ValueKind::String => r#""(?:[^"\\]|\\.)*""#,
            ValueKind::Any => r#"(?:"(?:[^"\\]|\\.)*"|[^,}\]\s]+)"#,
        }
    }

    /// Checks the literal source text of a value against this kind.
    ///
    /// `text` must already be trimmed of surrounding whitespace and comments.
    pub fn accepts(&self, text: &str) -> bool {
        match self {
            ValueKind::Boolean => text == "true" || text == "false",
            ValueKind::Integer => matches_whole(&INTEGER_VALUE, text),
            ValueKind::Number => matches_whole(&NUMBER_VALUE, text),
            ValueKind::String => is_string_literal(text),
            ValueKind::Any => !text.is_empty(),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValueKind::Boolean => "boolean",
            ValueKind::Integer => "integer",
            ValueKind::Number => "number",
            ValueKind::String => "string",
            ValueKind::Any => "any",
        };
        f.write_str(s)
    }
}

impl FromStr for ValueKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "boolean" | "bool" => Ok(ValueKind::Boolean),
            "integer" | "int" => Ok(ValueKind::Integer),
            "number" | "num" => Ok(ValueKind::Number),
            "string" | "str" => Ok(ValueKind::String),
            "any" => Ok(ValueKind::Any),
            other => Err(anyhow!(
                "Unknown value kind '{}'. Expected one of: boolean, integer, number, string, any.",
                other
            )),
        }
    }
}

lazy_static! {
    /// Whole-value forms of the numeric fragments. `\d` is Unicode-aware here
    /// exactly as in the generated removal patterns.
    static ref INTEGER_VALUE: Option<Regex> = anchored(ValueKind::Integer);
    static ref NUMBER_VALUE: Option<Regex> = anchored(ValueKind::Number);
}

fn anchored(kind: ValueKind) -> Option<Regex> {
    Regex::new(&format!("^(?:{})$", kind.value_pattern())).ok()
}

fn matches_whole(re: &Option<Regex>, text: &str) -> bool {
    re.as_ref().is_some_and(|re| re.is_match(text))
}

fn is_string_literal(text: &str) -> bool {
    let mut chars = text.chars();
    let quote = match chars.next() {
        Some(q @ ('"' | '\'' | '`')) => q,
        _ => return false,
    };
    text.len() >= 2 && text.ends_with(quote)
}

/// Represents a single field removal rule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FieldRule {
    /// Unique identifier for the rule (e.g., "is_spicy").
    pub name: String,
    /// The object key to remove. Falls back to `name` when empty.
    pub field: String,
    /// Which values make an occurrence removable.
    pub value_kind: ValueKind,
    /// Explicit regex replacing the generated one. Only the regex engine uses it.
    pub pattern: Option<String>,
    /// Human-readable description of what the rule targets.
    pub description: Option<String>,
    /// Explicit override for enabling/disabling the rule.
    pub enabled: Option<bool>,
    /// If true, the rule is inactive unless explicitly enabled.
    pub opt_in: bool,
    /// Also match unquoted keys (`isSpicy: true`). Structured engine only.
    pub bare_keys: bool,
}

impl Default for FieldRule {
    fn default() -> Self {
        Self {
            name: String::new(),
            field: String::new(),
            value_kind: ValueKind::Any,
            pattern: None,
            description: None,
            enabled: None,
            opt_in: false,
            bare_keys: false,
        }
    }
}

impl Hash for FieldRule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.field_name().hash(state);
        self.value_kind.hash(state);
        self.pattern.hash(state);
        self.enabled.hash(state);
        self.opt_in.hash(state);
        self.bare_keys.hash(state);
    }
}

impl FieldRule {
    /// Creates a rule whose name and field are both `field`.
    pub fn new(field: impl Into<String>, value_kind: ValueKind) -> Self {
        let field = field.into();
        Self {
            name: field.clone(),
            field,
            value_kind,
            ..Self::default()
        }
    }

    /// The key this rule removes.
    pub fn field_name(&self) -> &str {
        if self.field.is_empty() {
            &self.name
        } else {
            &self.field
        }
    }

    /// False only when the rule has been switched off with `enabled: false`.
    pub fn is_enabled(&self) -> bool {
        self.enabled != Some(false)
    }
}

/// Represents the top-level configuration structure for fieldstrip.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct StripConfig {
    /// Field rules, applied in order.
    pub rules: Vec<FieldRule>,
}

/// Represents a single item in the removal summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StripSummaryItem {
    pub rule_name: String,
    pub field: String,
    pub occurrences: usize,
    pub removed_texts: Vec<String>,
}

/// Error type for a named rule set that could not be located.
#[derive(Debug)]
pub struct RuleConfigNotFoundError {
    pub config_name: String,
}

impl fmt::Display for RuleConfigNotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Rule configuration '{}' not found.", self.config_name)
    }
}

impl std::error::Error for RuleConfigNotFoundError {}

impl StripConfig {
    /// Loads field rules from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(RuleConfigNotFoundError {
                config_name: path.display().to_string(),
            }
            .into());
        }
        info!("Loading custom rules from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: StripConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        validate_rules(&config.rules)?;
        info!("Loaded {} rules from file {}.", config.rules.len(), path.display());

        Ok(config)
    }

    /// Loads the default field rules from the embedded configuration.
    pub fn load_default_rules() -> Result<Self> {
        debug!("Loading default rules from embedded string...");
        let default_yaml = include_str!("../config/default_fields.yaml");
        let config: StripConfig =
            serde_yml::from_str(default_yaml).context("Failed to parse default rules")?;

        debug!("Loaded {} default rules.", config.rules.len());
        Ok(config)
    }

    /// Builds a rule set from `name[:kind]` specifications.
    ///
    /// A spec without a kind accepts any value.
    pub fn from_fields<S: AsRef<str>>(specs: &[S]) -> Result<Self> {
        let mut rules = Vec::with_capacity(specs.len());
        for spec in specs {
            let spec = spec.as_ref().trim();
            let (field, kind) = match spec.rsplit_once(':') {
                Some((field, kind)) => (field.trim(), kind.parse::<ValueKind>()?),
                None => (spec, ValueKind::Any),
            };
            rules.push(FieldRule::new(field, kind));
        }
        validate_rules(&rules)?;
        debug!("Built {} ad-hoc rules from field specs.", rules.len());
        Ok(StripConfig { rules })
    }

    /// Filters active rules based on enable/disable lists provided via CLI.
    pub fn set_active_rules(&mut self, enable_rules: &[String], disable_rules: &[String]) {
        let enable_set: HashSet<&str> = enable_rules.iter().map(String::as_str).collect();
        let disable_set: HashSet<&str> = disable_rules.iter().map(String::as_str).collect();

        debug!("Initial rules count before filtering: {}", self.rules.len());

        let all_rule_names: HashSet<&str> = self.rules.iter().map(|r| r.name.as_str()).collect();

        for rule_name in enable_set.difference(&all_rule_names) {
            warn!("Rule '{}' in `enable` list does not exist.", rule_name);
        }

        for rule_name in disable_set.difference(&all_rule_names) {
            warn!("Rule '{}' in `disable` list does not exist.", rule_name);
        }

        self.rules.retain_mut(|rule| {
            let rule_name = rule.name.as_str();
            if disable_set.contains(rule_name) {
                return false;
            }
            if enable_set.contains(rule_name) {
                rule.enabled = Some(true);
                return true;
            }
            rule.is_enabled() && !rule.opt_in
        });

        debug!("Final active rules count after filtering: {}", self.rules.len());
    }

    /// Lets every rule match unquoted keys as well.
    pub fn allow_bare_keys(&mut self) {
        for rule in &mut self.rules {
            rule.bare_keys = true;
        }
    }

    /// The field names targeted by the active rules, in rule order, without duplicates.
    pub fn field_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.rules
            .iter()
            .filter(|r| r.is_enabled())
            .map(FieldRule::field_name)
            .filter(|f| seen.insert(*f))
            .collect()
    }
}

/// Merges user-defined rules with defaults.
///
/// A user rule replaces the default rule with the same name in place; any
/// other user rule is appended after the defaults, in file order.
pub fn merge_rules(default_config: StripConfig, user_config: Option<StripConfig>) -> StripConfig {
    debug!(
        "merge_rules called. Initial default rules count: {}",
        default_config.rules.len()
    );

    let mut final_rules = default_config.rules;

    if let Some(user_cfg) = user_config {
        debug!("User config provided. Merging {} user rules.", user_cfg.rules.len());
        for user_rule in user_cfg.rules {
            match final_rules.iter_mut().find(|r| r.name == user_rule.name) {
                Some(existing) => {
                    debug!("Overriding default rule '{}'.", user_rule.name);
                    *existing = user_rule;
                }
                None => final_rules.push(user_rule),
            }
        }
    }

    debug!("Final total rules after merge: {}", final_rules.len());
    StripConfig { rules: final_rules }
}

/// Validates rule integrity (names, fields, explicit patterns).
///
/// Every problem found is reported, one per line, in a single
/// [`StripError::InvalidRule`].
pub(crate) fn validate_rules(rules: &[FieldRule]) -> Result<(), StripError> {
    let mut rule_names = HashSet::new();
    let mut errors = Vec::new();

    for rule in rules {
        if rule.name.is_empty() {
            errors.push("A rule has an empty `name` field.".to_string());
        } else if !rule_names.insert(rule.name.as_str()) {
            errors.push(format!("Duplicate rule name found: '{}'.", rule.name));
        }

        if rule.field_name().trim().is_empty() {
            errors.push(format!("Rule '{}' has an empty `field`.", rule.name));
        }

        if let Some(pattern) = &rule.pattern {
            if pattern.is_empty() {
                errors.push(format!("Rule '{}' has an empty `pattern` field.", rule.name));
            } else if pattern.len() > MAX_PATTERN_LENGTH {
                errors.push(format!(
                    "Rule '{}': pattern length ({}) exceeds maximum allowed ({}).",
                    rule.name,
                    pattern.len(),
                    MAX_PATTERN_LENGTH
                ));
            } else if let Err(e) = Regex::new(pattern) {
                errors.push(format!("Rule '{}' has an invalid regex pattern: {}", rule.name, e));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(StripError::InvalidRule(errors.join("\n")))
    }
}
