// fieldstrip/src/commands/fields.rs
//! The `fields` command: list the rules a run would apply.

use anyhow::Result;
use fieldstrip_core::{FieldRule, StripConfig};
use std::io::Write;

use crate::ui::summary;

/// Writes the enabled rules of `config` as a table.
pub fn run_fields<W: Write>(config: &StripConfig, writer: &mut W, colored: bool) -> Result<()> {
    let active: Vec<FieldRule> = config
        .rules
        .iter()
        .filter(|r| r.is_enabled())
        .cloned()
        .collect();
    writeln!(writer, "{}", summary::render_rules(&active, colored))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_default_fields() {
        let mut buf = Vec::new();
        run_fields(&StripConfig::load_default_rules().unwrap(), &mut buf, false).unwrap();
        let out = String::from_utf8(buf).unwrap();
        for field in ["isSpicy", "hasScallions", "hasCilantro", "hasGarlic", "cookingTime"] {
            assert!(out.contains(field), "missing {field}");
        }
    }

    #[test]
    fn disabled_rules_are_hidden() {
        let mut config = StripConfig::load_default_rules().unwrap();
        config.set_active_rules(&[], &["hasGarlic".to_string()]);
        let mut buf = Vec::new();
        run_fields(&config, &mut buf, false).unwrap();
        assert!(!String::from_utf8(buf).unwrap().contains("hasGarlic"));
    }
}
