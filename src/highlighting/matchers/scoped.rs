//! Restrict a highlighter to the part of a line after a marker

use std::sync::Arc;

use regex::Regex;

use crate::config::HighlightingConfig;
use crate::highlighting::{
    highlighter::{compile_pattern, Highlighter, HighlighterMeta},
    Match, Result,
};
use crate::theme::Theme;

/// Runs `inner` only on the region selected by a scope pattern
///
/// The region starts at the `body` capture group of the first scope match
/// (or at the end of the match when the pattern has no such group) and runs to
/// the end of the line. Lines without a scope match get no highlights.
pub struct ScopedHighlighter {
    inner: Arc<dyn Highlighter>,
    scope: Regex,
}

impl ScopedHighlighter {
    pub fn new(inner: Arc<dyn Highlighter>, scope_pattern: &str) -> Result<Self> {
        let scope = compile_pattern(inner.name(), scope_pattern)?;
        Ok(Self { inner, scope })
    }

    /// Byte offset where the scoped region begins, if any
    pub fn region_start(&self, line: &str) -> Option<usize> {
        let caps = self.scope.captures(line)?;
        match caps.name("body") {
            Some(body) => Some(body.start()),
            None => caps.get(0).map(|m| m.end()),
        }
    }
}

impl Highlighter for ScopedHighlighter {
    fn meta(&self) -> &HighlighterMeta {
        self.inner.meta()
    }

    fn find_matches(&self, line: &str, theme: &dyn Theme) -> Vec<Match> {
        let Some(start) = self.region_start(line) else {
            return Vec::new();
        };
        let Some(region) = line.get(start..) else {
            return Vec::new();
        };
        self.inner
            .find_matches(region, theme)
            .into_iter()
            .map(|m| m.shifted(start))
            .collect()
    }

    fn configured(&self, config: &HighlightingConfig) -> Option<Arc<dyn Highlighter>> {
        let inner = self.inner.configured(config)?;
        Some(Arc::new(Self {
            inner,
            scope: self.scope.clone(),
        }))
    }
}
