//! The highlighter chain: candidate collection, overlap resolution, output
//!
//! A chain is immutable once built. Changing the enabled set means building a
//! new chain and swapping it in through a [`ChainHandle`].

use std::sync::Arc;

use arc_swap::ArcSwap;

use super::{
    highlighter::Highlighter,
    registry::HighlighterRegistry,
    span::{Match, OccupancyTracker},
    HighlightError,
};
use crate::config::HighlightingConfig;
use crate::markup;
use crate::theme::Theme;

/// `NO_COLOR` convention: present and non-empty disables styling
pub fn color_disabled_by_env() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty())
}

/// Largest char boundary in `line` that is `<= limit`
fn floor_char_boundary(line: &str, limit: usize) -> usize {
    if limit >= line.len() {
        return line.len();
    }
    let mut idx = limit;
    while !line.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

/// A match tagged with the producing highlighter's rank
struct Candidate {
    priority: i32,
    order: usize,
    m: Match,
}

/// Priority-sorted, immutable list of enabled highlighters
#[derive(Clone, Default)]
pub struct HighlighterChain {
    highlighters: Vec<Arc<dyn Highlighter>>,
}

impl std::fmt::Debug for HighlighterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HighlighterChain")
            .field("highlighters", &self.names())
            .finish()
    }
}

impl HighlighterChain {
    /// Build a chain; highlighters are stably sorted by ascending priority
    pub fn new(mut highlighters: Vec<Arc<dyn Highlighter>>) -> Self {
        highlighters.sort_by_key(|h| h.priority());
        Self { highlighters }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.highlighters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.highlighters.is_empty()
    }

    /// Highlighter names in application order
    pub fn names(&self) -> Vec<&str> {
        self.highlighters.iter().map(|h| h.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Highlighter>> {
        self.highlighters.iter()
    }

    /// Annotate `line`, honouring the `NO_COLOR` environment convention
    pub fn apply(&self, line: &str, theme: &dyn Theme, config: &HighlightingConfig) -> String {
        self.apply_with_color(line, theme, config, !color_disabled_by_env())
    }

    /// Annotate `line` with an explicit color switch
    pub fn apply_with_color(
        &self,
        line: &str,
        theme: &dyn Theme,
        config: &HighlightingConfig,
        color: bool,
    ) -> String {
        if !config.enabled || !color {
            return markup::escape(line);
        }

        let limit = floor_char_boundary(line, config.max_length);
        let (prefix, suffix) = line.split_at(limit);

        if self.highlighters.is_empty() || prefix.is_empty() {
            return markup::escape(line);
        }

        let (accepted, tracker) = self.resolve_prefix(prefix, theme);

        let mut out = String::with_capacity(line.len() + accepted.len() * 24);
        let mut gaps = tracker.available_ranges().into_iter().peekable();

        for m in &accepted {
            while let Some(gap) = gaps.next_if(|gap| gap.start < m.start()) {
                markup::escape_into(&mut out, &prefix[gap]);
            }
            match theme.get_style(m.style()) {
                Some(style) => markup::push_styled(&mut out, &style, m.text()),
                None => markup::escape_into(&mut out, m.text()),
            }
        }
        for gap in gaps {
            markup::escape_into(&mut out, &prefix[gap]);
        }
        markup::escape_into(&mut out, suffix);

        out
    }

    /// Accepted, non-overlapping matches for the depth-limited part of `line`
    pub fn resolve(&self, line: &str, theme: &dyn Theme, config: &HighlightingConfig) -> Vec<Match> {
        if !config.enabled {
            return Vec::new();
        }
        let limit = floor_char_boundary(line, config.max_length);
        self.resolve_prefix(&line[..limit], theme).0
    }

    /// Collect candidates from every highlighter and keep the overlap-free subset
    ///
    /// Candidates are ordered by start offset, then priority, then chain
    /// position, and accepted greedily while their span is unclaimed.
    fn resolve_prefix(&self, prefix: &str, theme: &dyn Theme) -> (Vec<Match>, OccupancyTracker) {
        let mut tracker = OccupancyTracker::new(prefix.len());
        if prefix.is_empty() {
            return (Vec::new(), tracker);
        }

        let mut candidates: Vec<Candidate> = Vec::new();
        for (order, highlighter) in self.highlighters.iter().enumerate() {
            let priority = highlighter.priority();
            candidates.extend(
                highlighter
                    .find_matches(prefix, theme)
                    .into_iter()
                    .filter(|m| m.end() <= prefix.len())
                    .map(|m| Candidate { priority, order, m }),
            );
        }

        candidates.sort_by(|a, b| {
            a.m.start()
                .cmp(&b.m.start())
                .then(a.priority.cmp(&b.priority))
                .then(a.order.cmp(&b.order))
        });

        let mut accepted = Vec::new();
        for candidate in candidates {
            let (start, end) = (candidate.m.start(), candidate.m.end());
            if tracker.is_available(start, end) {
                tracker.mark_occupied(start, end);
                accepted.push(candidate.m);
            }
        }

        (accepted, tracker)
    }
}

/// Shared slot holding the active chain
///
/// Readers take a snapshot with [`ChainHandle::load`]; writers publish a fully
/// built replacement. Nobody ever sees a half-updated chain.
pub struct ChainHandle {
    current: ArcSwap<HighlighterChain>,
}

impl ChainHandle {
    pub fn new(chain: HighlighterChain) -> Self {
        Self {
            current: ArcSwap::from_pointee(chain),
        }
    }

    /// Snapshot of the active chain
    pub fn load(&self) -> Arc<HighlighterChain> {
        self.current.load_full()
    }

    /// Publish `chain`, returning the previous one
    pub fn replace(&self, chain: HighlighterChain) -> Arc<HighlighterChain> {
        self.current.swap(Arc::new(chain))
    }

    /// Build a chain for `config` and publish it
    ///
    /// Returns the custom patterns that were rejected; the rest are active.
    pub fn rebuild(
        &self,
        registry: &HighlighterRegistry,
        config: &HighlightingConfig,
    ) -> Vec<HighlightError> {
        let build = registry.create_chain(config);
        self.replace(build.chain);
        build.rejected
    }
}

impl Default for ChainHandle {
    fn default() -> Self {
        Self::new(HighlighterChain::empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlighting::{Category, HighlighterMeta, RegexHighlighter};
    use crate::theme::{ColorStyle, ThemeMap};
    use ratatui::style::Color;

    fn regex(name: &str, priority: i32, pattern: &str, style: &str) -> Arc<dyn Highlighter> {
        Arc::new(
            RegexHighlighter::new(
                HighlighterMeta::new(name, Category::Misc, priority, ""),
                pattern,
                style,
            )
            .unwrap(),
        )
    }

    fn theme() -> ThemeMap {
        ThemeMap::new("test")
            .with_style("a", ColorStyle::fg(Color::Red))
            .with_style("b", ColorStyle::fg(Color::Blue))
    }

    #[test]
    fn test_sorted_by_priority() {
        let chain = HighlighterChain::new(vec![
            regex("late", 50, "x+", "a"),
            regex("early", 10, "y+", "b"),
        ]);
        assert_eq!(chain.names(), vec!["early", "late"]);
    }

    #[test]
    fn test_lower_priority_value_wins_same_start() {
        let line = "abcdef";
        let chain = HighlighterChain::new(vec![
            regex("long", 20, "abcdef", "b"),
            regex("short", 10, "abc", "a"),
        ]);

        let accepted = chain.resolve(line, &theme(), &HighlightingConfig::default());
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].text(), "abc");
        assert_eq!(accepted[0].style(), "a");
    }

    #[test]
    fn test_earlier_start_wins_overlap() {
        let line = "abcdef";
        let chain = HighlighterChain::new(vec![
            regex("first", 20, "abcd", "b"),
            regex("second", 10, "cdef", "a"),
        ]);

        let accepted = chain.resolve(line, &theme(), &HighlightingConfig::default());
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].text(), "abcd");
    }

    #[test]
    fn test_output_assembly() {
        let chain = HighlighterChain::new(vec![regex("digits", 10, r"\d+", "a")]);
        let out = chain.apply_with_color(
            "id [42] ok",
            &theme(),
            &HighlightingConfig::default(),
            true,
        );
        assert_eq!(out, "id \\[[red]42[/]] ok");
        assert_eq!(markup::strip(&out), "id [42] ok");
    }

    #[test]
    fn test_missing_theme_style_is_plain() {
        let chain = HighlighterChain::new(vec![regex("digits", 10, r"\d+", "unknown")]);
        let out = chain.apply_with_color("n=42", &theme(), &HighlightingConfig::default(), true);
        assert_eq!(out, "n=42");
    }

    #[test]
    fn test_disabled_and_no_color_escape_only() {
        let chain = HighlighterChain::new(vec![regex("digits", 10, r"\d+", "a")]);
        let mut config = HighlightingConfig::default();

        let no_color = chain.apply_with_color("arr[1]", &theme(), &config, false);
        assert_eq!(no_color, "arr\\[1]");

        config.enabled = false;
        let disabled = chain.apply_with_color("arr[1]", &theme(), &config, true);
        assert_eq!(disabled, "arr\\[1]");
    }

    #[test]
    fn test_empty_line() {
        let chain = HighlighterChain::new(vec![regex("digits", 10, r"\d+", "a")]);
        assert_eq!(
            chain.apply_with_color("", &theme(), &HighlightingConfig::default(), true),
            ""
        );
    }

    #[test]
    fn test_depth_limit() {
        let chain = HighlighterChain::new(vec![regex("digits", 10, r"\d+", "a")]);
        let config = HighlightingConfig {
            max_length: 3,
            ..Default::default()
        };

        let out = chain.apply_with_color("12 34 56", &theme(), &config, true);
        assert_eq!(out, "[red]12[/] 34 56");
    }

    #[test]
    fn test_depth_limit_splits_token() {
        let chain = HighlighterChain::new(vec![regex("digits", 10, r"\d+", "a")]);
        let config = HighlightingConfig {
            max_length: 3,
            ..Default::default()
        };
        let out = chain.apply_with_color("1234", &theme(), &config, true);
        assert_eq!(out, "[red]123[/]4");
    }

    #[test]
    fn test_depth_limit_char_boundary() {
        assert_eq!(floor_char_boundary("aé", 2), 1);
        assert_eq!(floor_char_boundary("aé", 3), 3);
        assert_eq!(floor_char_boundary("aé", 99), 3);
    }

    #[test]
    fn test_chain_handle_swap() {
        let handle = ChainHandle::default();
        assert!(handle.load().is_empty());

        let old = handle.replace(HighlighterChain::new(vec![regex("d", 1, r"\d", "a")]));
        assert!(old.is_empty());
        assert_eq!(handle.load().len(), 1);
    }
}
