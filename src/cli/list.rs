//! Listing and previewing highlighters

use std::path::Path;

use pgtail_core::{
    error::Result,
    highlighting::{catalog, HighlighterRegistry},
    markup, Category,
};
use serde::Serialize;

use super::helpers::{build_chain, load_config, THEME};

/// One row of `pgtail list`
#[derive(Debug, Serialize)]
struct HighlighterInfo {
    name: String,
    category: Category,
    priority: i32,
    enabled: bool,
    description: String,
}

/// Handle the list command
pub fn handle_list(config_path: &Path, category: Option<Category>, format: &str) -> Result<()> {
    let config = load_config(config_path)?;
    let registry = HighlighterRegistry::with_builtins()?;

    let mut rows: Vec<HighlighterInfo> = registry
        .iter()
        .map(|h| HighlighterInfo {
            name: h.name().to_string(),
            category: h.category(),
            priority: h.priority(),
            enabled: config.is_highlighter_enabled(h.name()),
            description: h.description().to_string(),
        })
        .collect();

    rows.extend(config.custom_patterns.iter().map(|p| HighlighterInfo {
        name: p.name.clone(),
        category: Category::Custom,
        priority: p.priority,
        enabled: config.is_highlighter_enabled(&p.name),
        description: format!("{} -> {}", p.pattern, p.style),
    }));

    if let Some(category) = category {
        rows.retain(|row| row.category == category);
    }
    rows.sort_by_key(|row| row.priority);

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(&rows)
                .map_err(|e| pgtail_core::PgtailError::Other(e.to_string()))?;
            println!("{}", json);
        }
        _ => {
            let status = if config.enabled { "on" } else { "off" };
            println!("Highlighting: {} (max_length {})", status, config.max_length);
            println!();
            println!(
                "{:<20} {:<12} {:>8}  {:<8} DESCRIPTION",
                "NAME", "CATEGORY", "PRIORITY", "STATE"
            );
            for row in &rows {
                println!(
                    "{:<20} {:<12} {:>8}  {:<8} {}",
                    row.name,
                    row.category,
                    row.priority,
                    if row.enabled { "enabled" } else { "disabled" },
                    row.description
                );
            }
        }
    }

    Ok(())
}

/// Handle the preview command
pub fn handle_preview(config_path: &Path, category: Option<Category>) -> Result<()> {
    let config = load_config(config_path)?;
    let registry = HighlighterRegistry::with_builtins()?;
    let chain = build_chain(&registry, &config);

    let mut current = None;
    for (sample_category, line) in catalog::sample_lines() {
        if category.is_some_and(|c| c != *sample_category) {
            continue;
        }
        if current != Some(*sample_category) {
            println!("[{}]", sample_category);
            current = Some(*sample_category);
        }
        let annotated = chain.apply(line, &*THEME, &config);
        println!("  {}", markup::to_ansi(&annotated));
    }

    Ok(())
}
