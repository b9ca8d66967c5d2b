// fieldstrip/src/commands/mod.rs
//! Command implementations and the rule loading they share.

pub mod fields;
pub mod scan;
pub mod strip;

use anyhow::{Context, Result, bail};
use fieldstrip_core::{StripConfig, merge_rules};
use log::{debug, info};

use crate::cli::RuleArgs;

/// Resolves the active rule set from the command-line rule arguments.
///
/// Base rules are the embedded defaults, or the `--field` specs when any are
/// given. A `--config` file is merged over the base, then enable/disable
/// filtering is applied. `--bare-keys` extends every rule to unquoted keys.
pub fn load_rules(args: &RuleArgs) -> Result<StripConfig> {
    let base = if args.fields.is_empty() {
        StripConfig::load_default_rules()?
    } else {
        info!("Using {} ad-hoc field(s) instead of the default rules.", args.fields.len());
        StripConfig::from_fields(&args.fields).context("Invalid --field specification")?
    };

    let user = match &args.config {
        Some(path) => Some(
            StripConfig::load_from_file(path)
                .with_context(|| format!("Failed to load rules from {}", path.display()))?,
        ),
        None => None,
    };

    let mut config = merge_rules(base, user);
    if args.bare_keys {
        config.allow_bare_keys();
    }
    config.set_active_rules(&args.enable, &args.disable);
    debug!("Active fields: {:?}", config.field_names());
    Ok(config)
}

/// Like [`load_rules`], but fails when no rule is left to apply.
pub fn load_active_rules(args: &RuleArgs) -> Result<StripConfig> {
    let config = load_rules(args)?;
    if config.field_names().is_empty() {
        bail!("No active field rules; nothing to strip.");
    }
    Ok(config)
}
