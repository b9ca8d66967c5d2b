//! compiler.rs - Manages the compilation and caching of field rules.
//!
//! This module provides a thread-safe, cached mechanism to convert a
//! `StripConfig` into `CompiledRules`. Compilation happens once per distinct
//! ordered rule list for the life of the process.
//!
//! License: MIT OR APACHE 2.0

use anyhow::{anyhow, Result};
use lazy_static::lazy_static;
use log::debug;
use regex::{Regex, RegexBuilder};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};

use crate::config::{FieldRule, StripConfig, MAX_PATTERN_LENGTH};
use crate::errors::StripError;

/// A single compiled field rule.
#[derive(Debug)]
pub struct CompiledRule {
    /// The compiled regular expression used for matching.
    pub regex: Regex,
    /// The unique name of the rule.
    pub name: String,
    /// The key the rule removes.
    pub field: String,
}

/// All compiled rules, in application order.
#[derive(Debug)]
pub struct CompiledRules {
    pub rules: Vec<CompiledRule>,
}

lazy_static! {
    /// Process-wide cache keyed by a hash of the ordered rule list.
    static ref COMPILED_RULES_CACHE: RwLock<HashMap<u64, Arc<CompiledRules>>> = RwLock::new(HashMap::new());
}

/// Hashes the rule list. Order is part of the key because rules apply sequentially.
fn hash_config(config: &StripConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    config.rules.hash(&mut hasher);
    hasher.finish()
}

/// Builds the removal pattern for a rule: an optional leading comma, optional
/// whitespace, the quoted field name, a colon, optional whitespace and a value.
pub fn field_pattern(rule: &FieldRule) -> String {
    if let Some(explicit) = &rule.pattern {
        return explicit.clone();
    }
    format!(
        r#",?\s*"{}":\s*{}"#,
        regex::escape(rule.field_name()),
        rule.value_kind.value_pattern()
    )
}

/// Compiles a list of `FieldRule`s into `CompiledRules`.
///
/// Disabled rules are skipped. Every failing rule is reported in one error.
pub fn compile_rules(rules_to_compile: Vec<FieldRule>) -> Result<CompiledRules, StripError> {
    debug!("Starting compilation of {} rules.", rules_to_compile.len());

    let mut compiled_rules = Vec::new();
    let mut compilation_errors = Vec::new();

    for rule in rules_to_compile {
        if !rule.is_enabled() {
            debug!("Skipping disabled rule '{}'.", rule.name);
            continue;
        }

        let pattern = field_pattern(&rule);
        debug!("Attempting to compile rule: '{}' with pattern '{}'", rule.name, pattern);

        if pattern.len() > MAX_PATTERN_LENGTH {
            compilation_errors.push(StripError::PatternLengthExceeded(
                rule.name,
                pattern.len(),
                MAX_PATTERN_LENGTH,
            ));
            continue;
        }

        let regex_result = RegexBuilder::new(&pattern)
            .size_limit(10 * (1 << 20))
            .build();

        match regex_result {
            Ok(regex) => {
                log::debug!(
                    target: "fieldstrip_core::patterns::compiler",
                    "Rule '{}' compiled successfully.",
                    &rule.name
                );
                let field = rule.field_name().to_string();
                compiled_rules.push(CompiledRule {
                    regex,
                    name: rule.name,
                    field,
                });
            }
            Err(e) => compilation_errors.push(StripError::RuleCompilationError(rule.name, e)),
        }
    }

    if !compilation_errors.is_empty() {
        let error_message = compilation_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        return Err(StripError::Fatal(format!(
            "Failed to compile {} rule(s):\n{}",
            compilation_errors.len(),
            error_message
        )));
    }

    debug!("Finished compiling rules. Total compiled: {}.", compiled_rules.len());
    Ok(CompiledRules { rules: compiled_rules })
}

/// Gets a `CompiledRules` instance from the cache or compiles it if not found.
pub fn get_or_compile_rules(config: &StripConfig) -> Result<Arc<CompiledRules>> {
    let cache_key = hash_config(config);

    {
        let cache = COMPILED_RULES_CACHE
            .read()
            .map_err(|_| anyhow!("Compiled rules cache lock poisoned"))?;
        if let Some(rules) = cache.get(&cache_key) {
            debug!("Serving compiled rules from cache for key: {}", cache_key);
            return Ok(Arc::clone(rules));
        }
    }

    debug!("Compiled rules not found in cache. Compiling now.");
    let compiled_arc = Arc::new(compile_rules(config.rules.clone())?);

    COMPILED_RULES_CACHE
        .write()
        .map_err(|_| anyhow!("Compiled rules cache lock poisoned"))?
        .insert(cache_key, Arc::clone(&compiled_arc));

    debug!("Successfully compiled and cached rules for key: {}", cache_key);
    Ok(compiled_arc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValueKind;

    #[test]
    fn generates_original_boolean_pattern() {
        let rule = FieldRule::new("isSpicy", ValueKind::Boolean);
        assert_eq!(field_pattern(&rule), r#",?\s*"isSpicy":\s*(true|false)"#);
    }

    #[test]
    fn generates_original_integer_pattern() {
        let rule = FieldRule::new("cookingTime", ValueKind::Integer);
        assert_eq!(field_pattern(&rule), r#",?\s*"cookingTime":\s*\d+"#);
    }

    #[test]
    fn escapes_field_names() {
        let rule = FieldRule::new("a.b", ValueKind::Any);
        assert!(field_pattern(&rule).contains(r#""a\.b""#));
    }

    #[test]
    fn skips_disabled_rules() {
        let rules = vec![
            FieldRule::new("a", ValueKind::Boolean),
            FieldRule {
                enabled: Some(false),
                ..FieldRule::new("b", ValueKind::Boolean)
            },
        ];
        let compiled = compile_rules(rules).unwrap();
        assert_eq!(compiled.rules.len(), 1);
        assert_eq!(compiled.rules[0].name, "a");
    }

    #[test]
    fn reports_bad_explicit_pattern() {
        let rules = vec![FieldRule {
            pattern: Some("(unclosed".into()),
            ..FieldRule::new("a", ValueKind::Any)
        }];
        let err = compile_rules(rules).unwrap_err();
        assert!(err.to_string().contains("Failed to compile 1 rule(s)"));
    }

    #[test]
    fn cache_returns_same_instance() {
        let config = StripConfig {
            rules: vec![FieldRule::new("cachedField", ValueKind::Integer)],
        };
        let first = get_or_compile_rules(&config).unwrap();
        let second = get_or_compile_rules(&config).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
