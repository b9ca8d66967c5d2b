// File: fieldstrip-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for using core engines without the CLI.
//! Provides engine construction by type and a one-shot string helper.

use anyhow::Result;
use std::fmt;
use std::str::FromStr;

use crate::config::StripConfig;
use crate::engine::StripEngine;
use crate::engines::regex_engine::RegexEngine;
use crate::engines::structured_engine::StructuredEngine;

/// Selects which stripping engine to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeadlessEngineType {
    /// Sequential regex substitution.
    Regex,
    /// Object-literal aware entry removal.
    #[default]
    Structured,
}

impl fmt::Display for HeadlessEngineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeadlessEngineType::Regex => f.write_str("regex"),
            HeadlessEngineType::Structured => f.write_str("structured"),
        }
    }
}

impl FromStr for HeadlessEngineType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "regex" => Ok(HeadlessEngineType::Regex),
            "structured" => Ok(HeadlessEngineType::Structured),
            other => Err(anyhow::anyhow!("Unknown engine '{}'", other)),
        }
    }
}

/// Instantiates the selected engine behind the `StripEngine` trait.
pub fn build_engine(config: StripConfig, engine_type: HeadlessEngineType) -> Result<Box<dyn StripEngine>> {
    let engine: Box<dyn StripEngine> = match engine_type {
        HeadlessEngineType::Regex => Box::new(RegexEngine::new(config)?),
        HeadlessEngineType::Structured => Box::new(StructuredEngine::new(config)?),
    };
    Ok(engine)
}

/// Strips every configured field from `content` in one call.
///
/// # Arguments
///
/// * `config` - The merged `StripConfig` (defaults + optional user overrides).
/// * `content` - The text to transform.
/// * `source_id` - A stable identifier for the input (file path or pseudo id).
/// * `engine_type` - Which engine to use.
pub fn headless_strip_string(
    config: StripConfig,
    content: &str,
    source_id: &str,
    engine_type: HeadlessEngineType,
) -> Result<String> {
    let engine = build_engine(config, engine_type)?;
    let (stripped, _) = engine.strip(content, source_id)?;
    Ok(stripped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FieldRule, ValueKind};

    #[test]
    fn test_headless_strip_string_regex() -> Result<()> {
        let config = StripConfig {
            rules: vec![FieldRule::new("secret", ValueKind::String)],
        };
        let content = r#"[{"id": 1, "secret": "a"}, {"id": 2, "secret": "b\"c"}]"#;

        let stripped = headless_strip_string(config, content, "test_input", HeadlessEngineType::Regex)?;

        assert_eq!(stripped, r#"[{"id": 1}, {"id": 2}]"#);
        Ok(())
    }

    #[test]
    fn test_headless_strip_string_structured() -> Result<()> {
        let config = StripConfig::load_default_rules()?;
        let content = "module.exports = [{ 'hasGarlic': true, name: 'A' }];";

        let stripped =
            headless_strip_string(config, content, "test_input", HeadlessEngineType::Structured)?;

        assert_eq!(stripped, "module.exports = [{ name: 'A' }];");
        Ok(())
    }

    #[test]
    fn engine_type_round_trips_through_strings() {
        assert_eq!("Regex".parse::<HeadlessEngineType>().unwrap(), HeadlessEngineType::Regex);
        assert_eq!(HeadlessEngineType::Structured.to_string(), "structured");
        assert!("entropy".parse::<HeadlessEngineType>().is_err());
    }
}
