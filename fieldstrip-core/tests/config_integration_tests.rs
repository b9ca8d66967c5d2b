// fieldstrip-core/tests/config_integration_tests.rs
use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;

use fieldstrip_core::config::{self, FieldRule, StripConfig, ValueKind};

#[test]
fn test_load_default_rules() {
    let config = StripConfig::load_default_rules().unwrap();
    let fields = config.field_names();
    assert_eq!(
        fields,
        vec!["isSpicy", "hasScallions", "hasCilantro", "hasGarlic", "cookingTime"]
    );
    let cooking = config.rules.iter().find(|r| r.name == "cookingTime").unwrap();
    assert_eq!(cooking.value_kind, ValueKind::Integer);
    assert!(config.rules[..4].iter().all(|r| r.value_kind == ValueKind::Boolean));
}

#[test]
fn test_load_from_file() -> Result<()> {
    let yaml_content = r#"
rules:
  - name: drop_notes
    field: notes
    value_kind: string
    description: "Free-text notes"
  - name: legacy_flag
    value_kind: boolean
    opt_in: true
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    let config = StripConfig::load_from_file(file.path())?;
    assert_eq!(config.rules.len(), 2);
    assert_eq!(config.rules[0].field_name(), "notes");
    assert_eq!(config.rules[0].value_kind, ValueKind::String);
    assert_eq!(config.rules[1].field_name(), "legacy_flag");
    assert!(config.rules[1].opt_in);
    assert_eq!(config.rules[1].pattern, None);
    Ok(())
}

#[test]
fn test_value_kind_defaults_to_any() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(b"rules:\n  - name: anything\n")?;
    let config = StripConfig::load_from_file(file.path())?;
    assert_eq!(config.rules[0].value_kind, ValueKind::Any);
    Ok(())
}

#[test]
fn test_load_from_missing_file() {
    let err = StripConfig::load_from_file("/definitely/not/here.yaml").unwrap_err();
    assert!(err.downcast_ref::<config::RuleConfigNotFoundError>().is_some());
}

#[test]
fn test_invalid_rules_are_rejected_together() -> Result<()> {
    let yaml_content = r#"
rules:
  - name: dup
  - name: dup
  - name: bad_pattern
    pattern: "(unclosed"
"#;
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml_content.as_bytes())?;
    let err = StripConfig::load_from_file(file.path()).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("Duplicate rule name found: 'dup'"), "{msg}");
    assert!(msg.contains("invalid regex pattern"), "{msg}");
    Ok(())
}

#[test]
fn test_unknown_value_kind_fails_to_parse() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    file.write_all(b"rules:\n  - name: x\n    value_kind: date\n")?;
    assert!(StripConfig::load_from_file(file.path()).is_err());
    Ok(())
}

#[test]
fn test_merge_rules_user_override_in_place() {
    let default_config = StripConfig::load_default_rules().unwrap();
    let user_config = StripConfig {
        rules: vec![
            FieldRule::new("price", ValueKind::Number),
            FieldRule {
                enabled: Some(false),
                ..FieldRule::new("hasGarlic", ValueKind::Boolean)
            },
        ],
    };
    let mut merged = config::merge_rules(default_config, Some(user_config));
    assert_eq!(merged.rules.len(), 6);
    assert_eq!(merged.rules[3].name, "hasGarlic");
    assert_eq!(merged.rules[5].name, "price");

    merged.set_active_rules(&[], &[]);
    assert_eq!(
        merged.field_names(),
        vec!["isSpicy", "hasScallions", "hasCilantro", "cookingTime", "price"]
    );
}

#[test]
fn test_merge_rules_no_user_config() {
    let default_config = StripConfig::load_default_rules().unwrap();
    let merged = config::merge_rules(default_config.clone(), None);
    assert_eq!(merged, default_config);
}
