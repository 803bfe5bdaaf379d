//! One pattern, several named groups, one style per group

use regex::Regex;

use crate::highlighting::{
    highlighter::{validate_pattern, Highlighter, HighlighterMeta},
    HighlightError, Match, Result,
};
use crate::theme::Theme;

/// Emits a match per participating named group of each occurrence
///
/// A timestamp pattern with `date`, `time`, `ms` and `tz` groups yields four
/// separately styled spans from one occurrence. Text between groups stays
/// unclaimed so lower-priority matchers may still use it.
pub struct GroupedRegexHighlighter {
    meta: HighlighterMeta,
    regex: Regex,
    /// (capture group index, style key)
    groups: Vec<(usize, String)>,
}

impl GroupedRegexHighlighter {
    /// `groups` maps capture group names to style keys
    ///
    /// Every named group must exist in the pattern.
    pub fn new<'a>(
        meta: HighlighterMeta,
        pattern: &str,
        groups: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> Result<Self> {
        let regex = validate_pattern(&meta.name, pattern)?;

        let mut resolved = Vec::new();
        for (group, style) in groups {
            let index = regex
                .capture_names()
                .position(|name| name == Some(group))
                .ok_or_else(|| HighlightError::InvalidPattern {
                    name: meta.name.clone(),
                    reason: format!("pattern has no group named '{}'", group),
                })?;
            resolved.push((index, style.to_string()));
        }

        if resolved.is_empty() {
            return Err(HighlightError::InvalidPattern {
                name: meta.name.clone(),
                reason: "no capture groups mapped to styles".to_string(),
            });
        }

        Ok(Self {
            meta,
            regex,
            groups: resolved,
        })
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

impl Highlighter for GroupedRegexHighlighter {
    fn meta(&self) -> &HighlighterMeta {
        &self.meta
    }

    fn find_matches(&self, line: &str, _theme: &dyn Theme) -> Vec<Match> {
        let mut matches = Vec::new();
        for caps in self.regex.captures_iter(line) {
            for (index, style) in &self.groups {
                if let Some(group) = caps.get(*index) {
                    if let Some(m) = Match::new(line, group.start(), group.end(), style.as_str()) {
                        matches.push(m);
                    }
                }
            }
        }
        matches
    }
}
