//! Shared helpers for CLI commands

use std::path::Path;

use once_cell::sync::Lazy;
use pgtail_core::{
    error::Result,
    highlighting::{HighlighterChain, HighlighterRegistry},
    HighlightingConfig, ThemeMap,
};

/// Palette used for terminal output
pub static THEME: Lazy<ThemeMap> = Lazy::new(ThemeMap::default_dark);

/// Load the config file, falling back to defaults when it does not exist
pub fn load_config(path: &Path) -> Result<HighlightingConfig> {
    Ok(HighlightingConfig::load_or_default(path)?)
}

pub fn save_config(path: &Path, config: &HighlightingConfig) -> Result<()> {
    config.to_file(path)?;
    Ok(())
}

/// Build the active chain, reporting custom patterns that were skipped
pub fn build_chain(
    registry: &HighlighterRegistry,
    config: &HighlightingConfig,
) -> HighlighterChain {
    let build = registry.create_chain(config);
    for err in &build.rejected {
        eprintln!("Skipping custom pattern: {}", err);
    }
    build.chain
}

/// Whether `name` refers to a built-in or a configured custom highlighter
pub fn is_known_name(
    registry: &HighlighterRegistry,
    config: &HighlightingConfig,
    name: &str,
) -> bool {
    registry.contains(name) || config.custom_patterns.iter().any(|p| p.name == name)
}
