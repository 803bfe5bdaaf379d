//! Multi-keyword matcher built on an Aho-Corasick automaton
//!
//! One pass over the line finds every keyword of a table with hundreds of
//! entries (SQL keywords, lock modes, backend types). Keywords are matched
//! ASCII case-insensitively and only on word boundaries. Among the hits that
//! pass the boundary check, the leftmost-longest ones are kept, so a shorter
//! keyword still matches where a longer one runs into a word
//! (`ORDER` in `ORDER BYTES`).

use std::collections::BTreeMap;

use aho_corasick::{AhoCorasick, MatchKind};

use crate::highlighting::{
    highlighter::{Highlighter, HighlighterMeta},
    HighlightError, Match, Result,
};
use crate::theme::Theme;

pub struct KeywordHighlighter {
    meta: HighlighterMeta,
    automaton: AhoCorasick,
    /// Style per automaton pattern id
    styles: Vec<String>,
    /// Whether keyword edges must sit on word boundaries
    word_boundaries: bool,
}

impl KeywordHighlighter {
    /// Build from a `keyword -> style` table
    ///
    /// Keywords are case-folded; when two fold to the same text the later
    /// entry's style wins.
    pub fn new<'a>(
        meta: HighlighterMeta,
        keywords: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self> {
        let mut table: BTreeMap<String, String> = BTreeMap::new();
        for (keyword, style) in keywords {
            if keyword.is_empty() {
                return Err(HighlightError::EmptyMatch {
                    name: meta.name.clone(),
                    pattern: String::new(),
                });
            }
            table.insert(keyword.to_ascii_lowercase(), style.to_string());
        }

        if table.is_empty() {
            return Err(HighlightError::InvalidPattern {
                name: meta.name.clone(),
                reason: "keyword table is empty".to_string(),
            });
        }

        let (patterns, styles): (Vec<String>, Vec<String>) = table.into_iter().unzip();

        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::Standard)
            .build(&patterns)
            .map_err(|e| HighlightError::InvalidPattern {
                name: meta.name.clone(),
                reason: format!("failed to build keyword automaton: {}", e),
            })?;

        Ok(Self {
            meta,
            automaton,
            styles,
            word_boundaries: true,
        })
    }

    /// Build with a single style for every keyword
    pub fn with_style<'a>(
        meta: HighlighterMeta,
        keywords: impl IntoIterator<Item = &'a str>,
        style: &'a str,
    ) -> Result<Self> {
        Self::new(meta, keywords.into_iter().map(|k| (k, style)))
    }

    /// Allow matches inside longer words
    pub fn without_word_boundaries(mut self) -> Self {
        self.word_boundaries = false;
        self
    }

    pub fn keyword_count(&self) -> usize {
        self.styles.len()
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Keyword edges that are word characters must not touch other word characters
fn on_word_boundary(line: &str, start: usize, end: usize) -> bool {
    let matched = &line[start..end];

    let starts_with_word = matched.chars().next().is_some_and(is_word_char);
    if starts_with_word && line[..start].chars().next_back().is_some_and(is_word_char) {
        return false;
    }

    let ends_with_word = matched.chars().next_back().is_some_and(is_word_char);
    if ends_with_word && line[end..].chars().next().is_some_and(is_word_char) {
        return false;
    }

    true
}

impl Highlighter for KeywordHighlighter {
    fn meta(&self) -> &HighlighterMeta {
        &self.meta
    }

    fn find_matches(&self, line: &str, _theme: &dyn Theme) -> Vec<Match> {
        let mut hits: Vec<(usize, usize, usize)> = self
            .automaton
            .find_overlapping_iter(line)
            .filter(|m| !self.word_boundaries || on_word_boundary(line, m.start(), m.end()))
            .map(|m| (m.start(), m.end(), m.pattern().as_usize()))
            .collect();

        // leftmost first, longest first at the same start
        hits.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

        let mut matches = Vec::new();
        let mut last_end = 0;
        for (start, end, pattern) in hits {
            if start < last_end {
                continue;
            }
            let Some(style) = self.styles.get(pattern) else {
                continue;
            };
            if let Some(m) = Match::new(line, start, end, style.as_str()) {
                last_end = end;
                matches.push(m);
            }
        }
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlighting::Category;
    use crate::theme::ThemeMap;

    fn sql() -> KeywordHighlighter {
        KeywordHighlighter::with_style(
            HighlighterMeta::builtin("sql_keyword", Category::Sql, 0, "SQL keywords"),
            ["SELECT", "FROM", "WHERE", "ORDER BY", "ORDER"],
            "sql_keyword",
        )
        .unwrap()
    }

    #[test]
    fn test_case_insensitive() {
        let theme = ThemeMap::new("test");
        let matches = sql().find_matches("select id From users where x", &theme);
        let texts: Vec<_> = matches.iter().map(|m| m.text()).collect();
        assert_eq!(texts, vec!["select", "From", "where"]);
    }

    #[test]
    fn test_word_boundaries() {
        let theme = ThemeMap::new("test");
        assert!(sql().find_matches("SELECTED FROMAGE somewhere", &theme).is_empty());
    }

    #[test]
    fn test_without_word_boundaries() {
        let theme = ThemeMap::new("test");
        let matches = sql()
            .without_word_boundaries()
            .find_matches("SELECTED", &theme);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].text(), "SELECT");
    }

    #[test]
    fn test_longest_keyword_wins() {
        let theme = ThemeMap::new("test");
        let matches = sql().find_matches("x ORDER BY y", &theme);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].text(), "ORDER BY");
    }

    #[test]
    fn test_shorter_keyword_when_longer_runs_into_word() {
        let theme = ThemeMap::new("test");
        let matches = sql().find_matches("x ORDER BYTES", &theme);
        let texts: Vec<_> = matches.iter().map(|m| m.text()).collect();
        assert_eq!(texts, vec!["ORDER"]);
    }

    #[test]
    fn test_overlapping_hits_do_not_overlap_in_output() {
        let theme = ThemeMap::new("test");
        let matches = sql().find_matches("SELECT a FROM t ORDER BY b ORDER c", &theme);
        let texts: Vec<_> = matches.iter().map(|m| m.text()).collect();
        assert_eq!(texts, vec!["SELECT", "FROM", "ORDER BY", "ORDER"]);
    }

    #[test]
    fn test_per_keyword_styles() {
        let theme = ThemeMap::new("test");
        let levels = KeywordHighlighter::new(
            HighlighterMeta::builtin("log_level", Category::Structural, 0, "levels"),
            [("ERROR:", "level_error"), ("LOG:", "level_log")],
        )
        .unwrap();

        let matches = levels.find_matches("LOG: then ERROR: boom", &theme);
        assert_eq!(matches[0].style(), "level_log");
        assert_eq!(matches[1].style(), "level_error");
    }

    #[test]
    fn test_unicode_neighbours() {
        let theme = ThemeMap::new("test");
        assert!(sql().find_matches("éSELECT", &theme).is_empty());
        assert_eq!(sql().find_matches("«SELECT»", &theme).len(), 1);
    }

    #[test]
    fn test_empty_keyword_rejected() {
        let result = KeywordHighlighter::with_style(
            HighlighterMeta::builtin("bad", Category::Misc, 0, ""),
            ["ok", ""],
            "x",
        );
        assert!(matches!(result, Err(HighlightError::EmptyMatch { .. })));
    }

    #[test]
    fn test_empty_table_rejected() {
        let result = KeywordHighlighter::with_style(
            HighlighterMeta::builtin("bad", Category::Misc, 0, ""),
            std::iter::empty(),
            "x",
        );
        assert!(result.is_err());
    }
}
