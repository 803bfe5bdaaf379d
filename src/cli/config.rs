//! Export, import and validate the highlighting config

use std::path::{Path, PathBuf};

use pgtail_core::{
    error::{PgtailError, Result},
    highlighting::HighlighterRegistry,
    HighlightingConfig,
};
use tracing::debug;

use super::helpers::{load_config, save_config};

/// Handle export: print the TOML or write it to `output`
pub fn handle_export(config_path: &Path, output: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path)?;

    match output {
        Some(path) => {
            save_config(&path, &config)?;
            println!("Exported highlighting config to {}", path.display());
        }
        None => print!("{}", config.to_toml()?),
    }
    Ok(())
}

/// Handle import: the file must parse, validate and have no rejected patterns
pub fn handle_import(config_path: &Path, file: &Path) -> Result<()> {
    debug!("Importing highlighting config from {}", file.display());
    let config = HighlightingConfig::from_file(file)?;
    check_patterns(&config)?;

    save_config(config_path, &config)?;
    println!(
        "Imported {} into {}",
        file.display(),
        config_path.display()
    );
    Ok(())
}

/// Handle validate for `file`, or the active config file
pub fn handle_validate(config_path: &Path, file: Option<PathBuf>) -> Result<()> {
    let path = file.unwrap_or_else(|| config_path.to_path_buf());
    let config = if path.exists() {
        HighlightingConfig::from_file(&path)?
    } else {
        println!("{} does not exist; checking defaults", path.display());
        HighlightingConfig::default()
    };
    check_patterns(&config)?;

    println!(
        "{}: ok ({} custom patterns, {} toggles)",
        path.display(),
        config.custom_patterns.len(),
        config.per_highlighter_enabled.len()
    );
    Ok(())
}

/// Compile every custom pattern against the built-in registry
fn check_patterns(config: &HighlightingConfig) -> Result<()> {
    let registry = HighlighterRegistry::with_builtins()?;
    let rejected = registry.create_chain(config).rejected;
    if rejected.is_empty() {
        return Ok(());
    }

    for err in &rejected {
        eprintln!("  {}", err);
    }
    Err(PgtailError::Other(format!(
        "{} custom pattern(s) rejected",
        rejected.len()
    )))
}
