//! Single-pattern, single-style matcher

use regex::Regex;

use crate::highlighting::{
    highlighter::{validate_pattern, Highlighter, HighlighterMeta},
    Match, Result,
};
use crate::theme::Theme;

/// Emits one match per non-overlapping pattern occurrence, all with one style
///
/// Used for single-shape tokens: PID brackets, LSNs, UUIDs, file paths.
pub struct RegexHighlighter {
    meta: HighlighterMeta,
    regex: Regex,
    style: String,
}

impl RegexHighlighter {
    pub fn new(meta: HighlighterMeta, pattern: &str, style: impl Into<String>) -> Result<Self> {
        let regex = validate_pattern(&meta.name, pattern)?;
        Ok(Self {
            meta,
            regex,
            style: style.into(),
        })
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

impl Highlighter for RegexHighlighter {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlighting::Category;
    use crate::theme::ThemeMap;

    fn pid_highlighter() -> RegexHighlighter {
        RegexHighlighter::new(
            HighlighterMeta::builtin("pid", Category::Structural, 0, "PID"),
            r"\[\d+\]",
            "pid",
        )
        .unwrap()
    }

    #[test]
    fn test_finds_all_occurrences() {
        let theme = ThemeMap::new("test");
        let line = "[12] then [345]";
        let matches = pid_highlighter().find_matches(line, &theme);

        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].text(), "[12]");
        assert_eq!(matches[1].text(), "[345]");
        assert!(matches.iter().all(|m| m.style() == "pid"));
    }

    #[test]
    fn test_no_match_is_empty_vec() {
        let theme = ThemeMap::new("test");
        assert!(pid_highlighter().find_matches("nothing", &theme).is_empty());
        assert!(pid_highlighter().find_matches("", &theme).is_empty());
    }

    #[test]
    fn test_rejects_empty_pattern() {
        let result = RegexHighlighter::new(
            HighlighterMeta::builtin("bad", Category::Misc, 0, ""),
            "z*",
            "x",
        );
        assert!(result.is_err());
    }
}
