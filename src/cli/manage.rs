//! Enable, disable, add and remove highlighters

use std::path::Path;

use pgtail_core::{
    error::Result,
    highlighting::{HighlightError, HighlighterRegistry},
    CustomPattern,
};
use tracing::info;

use super::helpers::{is_known_name, load_config, save_config};

/// Handle enable/disable
pub fn handle_toggle(config_path: &Path, name: &str, enabled: bool) -> Result<()> {
    let mut config = load_config(config_path)?;
    let registry = HighlighterRegistry::with_builtins()?;

    if !is_known_name(&registry, &config, name) {
        return Err(HighlightError::UnknownHighlighter(name.to_string()).into());
    }

    config.set_highlighter_enabled(name, enabled);
    save_config(config_path, &config)?;

    let state = if enabled { "enabled" } else { "disabled" };
    info!("Highlighter '{}' {}", name, state);
    println!("Highlighter '{}' {}", name, state);
    Ok(())
}

/// Handle add: validate the pattern, then persist it
pub fn handle_add(
    config_path: &Path,
    name: &str,
    pattern: &str,
    style: &str,
    priority: Option<i32>,
) -> Result<()> {
    let mut config = load_config(config_path)?;
    let registry = HighlighterRegistry::with_builtins()?;

    if registry.contains(name) {
        return Err(HighlightError::DuplicateName(name.to_string()).into());
    }

    let mut custom = CustomPattern::new(name, pattern, style);
    if let Some(priority) = priority {
        custom = custom.with_priority(priority);
    }
    let priority = custom.priority;

    config.add_custom_pattern(custom)?;
    save_config(config_path, &config)?;

    info!("Added custom pattern '{}'", name);
    println!(
        "Added custom pattern '{}' ({} -> {}, priority {})",
        name, pattern, style, priority
    );
    Ok(())
}

/// Handle remove
pub fn handle_remove(config_path: &Path, name: &str) -> Result<()> {
    let mut config = load_config(config_path)?;

    if !config.remove_custom_pattern(name) {
        return Err(HighlightError::UnknownHighlighter(name.to_string()).into());
    }
    config.per_highlighter_enabled.remove(name);
    save_config(config_path, &config)?;

    info!("Removed custom pattern '{}'", name);
    println!("Removed custom pattern '{}'", name);
    Ok(())
}
