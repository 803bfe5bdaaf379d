//! Catalog of known highlighters and chain construction

use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use lru::LruCache;
use regex::Regex;
use tracing::{debug, warn};

use super::{
    catalog,
    chain::HighlighterChain,
    highlighter::{validate_pattern, Category, Highlighter},
    matchers::CustomHighlighter,
    HighlightError, Result,
};
use crate::config::{CustomPattern, HighlightingConfig};

/// Compiled custom regexes kept across chain rebuilds
const CUSTOM_CACHE_CAPACITY: usize = 64;

/// Result of [`HighlighterRegistry::create_chain`]
#[derive(Debug)]
pub struct ChainBuild {
    pub chain: HighlighterChain,
    /// Custom patterns left out of the chain, with the reason
    pub rejected: Vec<HighlightError>,
}

/// Owns every known highlighter, built-in and user-defined
pub struct HighlighterRegistry {
    highlighters: Vec<Arc<dyn Highlighter>>,
    /// pattern string -> compiled regex
    custom_cache: Mutex<LruCache<String, Regex>>,
}

impl HighlighterRegistry {
    /// Empty registry
    pub fn new() -> Self {
        let capacity = NonZeroUsize::new(CUSTOM_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN);
        Self {
            highlighters: Vec::new(),
            custom_cache: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Registry holding the full built-in catalog
    pub fn with_builtins() -> Result<Self> {
        let mut registry = Self::new();
        for highlighter in catalog::builtin_highlighters()? {
            registry.register(highlighter)?;
        }
        debug!("Registered {} built-in highlighters", registry.len());
        Ok(registry)
    }

    /// Add a highlighter; names must be unique
    pub fn register(&mut self, highlighter: Arc<dyn Highlighter>) -> Result<()> {
        if self.contains(highlighter.name()) {
            return Err(HighlightError::DuplicateName(highlighter.name().to_string()));
        }
        self.highlighters.push(highlighter);
        Ok(())
    }

    /// Validate and register a custom pattern permanently
    pub fn register_custom(&mut self, pattern: &CustomPattern) -> Result<()> {
        let highlighter = self.compile_custom(pattern)?;
        self.register(Arc::new(highlighter))
    }

    /// Remove a highlighter by name
    pub fn unregister(&mut self, name: &str) -> Result<Arc<dyn Highlighter>> {
        let index = self
            .highlighters
            .iter()
            .position(|h| h.name() == name)
            .ok_or_else(|| HighlightError::UnknownHighlighter(name.to_string()))?;
        Ok(self.highlighters.remove(index))
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Highlighter>> {
        self.highlighters.iter().find(|h| h.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.highlighters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.highlighters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Highlighter>> {
        self.highlighters.iter()
    }

    /// Names in registration order
    pub fn all_names(&self) -> Vec<&str> {
        self.highlighters.iter().map(|h| h.name()).collect()
    }

    /// Categories present, in band order
    pub fn all_categories(&self) -> Vec<Category> {
        let mut categories: Vec<Category> = self.highlighters.iter().map(|h| h.category()).collect();
        categories.sort();
        categories.dedup();
        categories
    }

    /// Highlighters of one category, sorted by priority
    pub fn by_category(&self, category: Category) -> Vec<&Arc<dyn Highlighter>> {
        let mut found: Vec<_> = self
            .highlighters
            .iter()
            .filter(|h| h.category() == category)
            .collect();
        found.sort_by_key(|h| h.priority());
        found
    }

    /// Compile a custom pattern, reusing a cached regex for a known pattern string
    pub fn compile_custom(&self, pattern: &CustomPattern) -> Result<CustomHighlighter> {
        if let Ok(mut cache) = self.custom_cache.lock() {
            if let Some(regex) = cache.get(&pattern.pattern) {
                return Ok(CustomHighlighter::from_compiled(pattern, regex.clone()));
            }
        }

        let regex = validate_pattern(&pattern.name, &pattern.pattern)?;
        if let Ok(mut cache) = self.custom_cache.lock() {
            cache.put(pattern.pattern.clone(), regex.clone());
        }
        Ok(CustomHighlighter::from_compiled(pattern, regex))
    }

    /// Build a chain from the enabled highlighters and the config's custom patterns
    ///
    /// Highlighters are enabled unless the config disables them by name. Each
    /// custom pattern is validated on its own; a bad one is reported in
    /// [`ChainBuild::rejected`] and the others stay active.
    pub fn create_chain(&self, config: &HighlightingConfig) -> ChainBuild {
        let mut selected: Vec<Arc<dyn Highlighter>> = self
            .highlighters
            .iter()
            .filter(|h| config.is_highlighter_enabled(h.name()))
            .map(|h| h.configured(config).unwrap_or_else(|| Arc::clone(h)))
            .collect();

        let mut rejected = Vec::new();
        let mut custom_names: HashSet<&str> = HashSet::new();

        for custom in &config.custom_patterns {
            if !config.is_highlighter_enabled(&custom.name) {
                continue;
            }
            if self.contains(&custom.name) || !custom_names.insert(custom.name.as_str()) {
                warn!("Custom pattern '{}' rejected: name already in use", custom.name);
                rejected.push(HighlightError::DuplicateName(custom.name.clone()));
                continue;
            }
            match self.compile_custom(custom) {
                Ok(highlighter) => selected.push(Arc::new(highlighter)),
                Err(err) => {
                    warn!("Custom pattern '{}' rejected: {}", custom.name, err);
                    rejected.push(err);
                }
            }
        }

        let chain = HighlighterChain::new(selected);
        debug!(
            "Built highlighter chain with {} highlighters ({} rejected)",
            chain.len(),
            rejected.len()
        );

        ChainBuild { chain, rejected }
    }
}

impl Default for HighlighterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlighting::{HighlighterMeta, RegexHighlighter};

    fn simple(name: &str, priority: i32) -> Arc<dyn Highlighter> {
        Arc::new(
            RegexHighlighter::new(
                HighlighterMeta::new(name, Category::Misc, priority, "test"),
                r"\d+",
                "number",
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_register_rejects_duplicates() {
        let mut registry = HighlighterRegistry::new();
        registry.register(simple("n", 1)).unwrap();
        let err = registry.register(simple("n", 2)).unwrap_err();
        assert_eq!(err, HighlightError::DuplicateName("n".to_string()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_builtins_register() {
        let registry = HighlighterRegistry::with_builtins().unwrap();
        assert!(registry.len() > 30);
        assert!(registry.contains("timestamp"));
        assert!(registry.contains("sql_keyword"));
        assert!(registry.contains("duration"));
        assert!(!registry.all_categories().contains(&Category::Custom));
    }

    #[test]
    fn test_create_chain_respects_disable() {
        let mut registry = HighlighterRegistry::new();
        registry.register(simple("a", 2)).unwrap();
        registry.register(simple("b", 1)).unwrap();

        let mut config = HighlightingConfig::default();
        config.set_highlighter_enabled("a", false);

        let build = registry.create_chain(&config);
        assert_eq!(build.chain.names(), vec!["b"]);
        assert!(build.rejected.is_empty());
    }

    #[test]
    fn test_create_chain_custom_patterns() {
        let registry = HighlighterRegistry::new();
        let mut config = HighlightingConfig::default();
        config
            .custom_patterns
            .push(CustomPattern::new("good", "tenant_[0-9]+", "custom"));
        config.custom_patterns.push(CustomPattern::new("bad", "a*", "custom"));
        config
            .custom_patterns
            .push(CustomPattern::new("broken", "(", "custom"));

        let build = registry.create_chain(&config);
        assert_eq!(build.chain.names(), vec!["good"]);
        assert_eq!(build.rejected.len(), 2);
        assert!(matches!(build.rejected[0], HighlightError::EmptyMatch { .. }));
        assert!(matches!(build.rejected[1], HighlightError::InvalidPattern { .. }));
    }

    #[test]
    fn test_custom_name_collision_rejected() {
        let mut registry = HighlighterRegistry::new();
        registry.register(simple("pid", 1)).unwrap();

        let mut config = HighlightingConfig::default();
        config.custom_patterns.push(CustomPattern::new("pid", "x+", "custom"));

        let build = registry.create_chain(&config);
        assert_eq!(build.chain.len(), 1);
        assert_eq!(build.rejected, vec![HighlightError::DuplicateName("pid".to_string())]);
    }

    #[test]
    fn test_unregister() {
        let mut registry = HighlighterRegistry::new();
        registry.register(simple("a", 1)).unwrap();
        assert!(registry.unregister("a").is_ok());
        assert!(registry.unregister("a").is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_by_category_sorted() {
        let mut registry = HighlighterRegistry::new();
        registry.register(simple("late", 9)).unwrap();
        registry.register(simple("early", 3)).unwrap();
        let names: Vec<_> = registry
            .by_category(Category::Misc)
            .iter()
            .map(|h| h.name().to_string())
            .collect();
        assert_eq!(names, vec!["early", "late"]);
    }

    #[test]
    fn test_compile_custom_cache_hit() {
        let registry = HighlighterRegistry::new();
        let first = registry
            .compile_custom(&CustomPattern::new("one", "job-[0-9]+", "custom"))
            .unwrap();
        let second = registry
            .compile_custom(&CustomPattern::new("two", "job-[0-9]+", "bold red"))
            .unwrap();
        assert_eq!(first.pattern(), second.pattern());
        assert_eq!(second.name(), "two");
        assert_eq!(second.style(), "bold red");
    }
}
