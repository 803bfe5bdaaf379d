//! User-defined regex highlighters

use regex::Regex;

use crate::config::CustomPattern;
use crate::highlighting::{
    highlighter::{validate_pattern, Category, Highlighter, HighlighterMeta},
    Match, Result,
};
use crate::theme::Theme;

/// A highlighter compiled from a [`CustomPattern`] config entry
pub struct CustomHighlighter {
    meta: HighlighterMeta,
    regex: Regex,
    style: String,
}

impl CustomHighlighter {
    /// Validate and compile a config entry
    pub fn from_pattern(pattern: &CustomPattern) -> Result<Self> {
        let regex = validate_pattern(&pattern.name, &pattern.pattern)?;
        Ok(Self::from_compiled(pattern, regex))
    }

    /// Wrap an already validated regex for `pattern`
    pub(crate) fn from_compiled(pattern: &CustomPattern, regex: Regex) -> Self {
        Self {
            meta: HighlighterMeta::new(
                pattern.name.clone(),
                Category::Custom,
                pattern.priority,
                format!("Custom pattern: {}", pattern.pattern),
            ),
            regex,
            style: pattern.style.clone(),
        }
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub fn style(&self) -> &str {
        &self.style
    }
}

impl Highlighter for CustomHighlighter {
    fn meta(&self) -> &HighlighterMeta {
        &self.meta
    }

    fn find_matches(&self, line: &str, _theme: &dyn Theme) -> Vec<Match> {
        self.regex
            .find_iter(line)
            .filter_map(|m| Match::new(line, m.start(), m.end(), self.style.as_str()))
            .collect()
    }
}
