//! Semantic highlighting for PostgreSQL log lines
//!
//! Turns a raw log message into inline markup (see [`crate::markup`]) by
//! running a priority-ordered set of pattern matchers over the line and
//! keeping a non-overlapping subset of their matches.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────┐
//! │  HighlighterRegistry                       │
//! │  - built-in catalog + custom patterns      │
//! │  - create_chain(config) -> HighlighterChain│
//! └─────────────────┬──────────────────────────┘
//!                   │ enabled subset, sorted by priority
//! ┌─────────────────▼──────────────────────────┐
//! │  HighlighterChain::apply(line, theme, cfg) │
//! │  1. disabled / NO_COLOR short-circuit      │
//! │  2. depth limit (max_length)               │
//! │  3. collect candidates from every matcher  │
//! │  4. sort by (start, priority), occupancy   │
//! │  5. emit escaped text + style tags         │
//! └────────────────────────────────────────────┘
//! ```
//!
//! Matchers come in four shapes: [`RegexHighlighter`] (one pattern, one
//! style), [`GroupedRegexHighlighter`] (named groups, one style each),
//! [`KeywordHighlighter`] (Aho-Corasick over a keyword table) and
//! [`DurationHighlighter`] (regex plus threshold classification). User
//! patterns are compiled into [`CustomHighlighter`]s.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pgtail_core::config::HighlightingConfig;
//! use pgtail_core::highlighting::HighlighterRegistry;
//! use pgtail_core::theme::ThemeMap;
//!
//! let registry = HighlighterRegistry::with_builtins()?;
//! let config = HighlightingConfig::default();
//! let chain = registry.create_chain(&config).chain;
//!
//! let theme = ThemeMap::default_dark();
//! let markup = chain.apply("2024-01-15 10:23:45 UTC [42] LOG:  ok", &theme, &config);
//! # Ok::<(), pgtail_core::highlighting::HighlightError>(())
//! ```

pub mod catalog;
pub mod chain;
pub mod highlighter;
pub mod matchers;
pub mod registry;
pub mod span;

// Re-exports
pub use chain::{color_disabled_by_env, ChainHandle, HighlighterChain};
pub use highlighter::{
    compile_pattern, validate_pattern, Category, Highlighter, HighlighterMeta,
    CUSTOM_PRIORITY_BAND,
};
pub use matchers::{
    CustomHighlighter, DurationHighlighter, GroupedRegexHighlighter, KeywordHighlighter,
    RegexHighlighter, ScopedHighlighter,
};
pub use registry::{ChainBuild, HighlighterRegistry};
pub use span::{Match, OccupancyTracker};

/// Result type for highlighting operations
pub type Result<T> = std::result::Result<T, HighlightError>;

/// Errors raised while building highlighters or registries
///
/// Applying a chain to a line never fails; these only occur at construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HighlightError {
    #[error("Invalid pattern '{name}': {reason}")]
    InvalidPattern { name: String, reason: String },

    #[error("Pattern '{name}' can match an empty string: {pattern}")]
    EmptyMatch { name: String, pattern: String },

    #[error("Highlighter already registered: {0}")]
    DuplicateName(String),

    #[error("Unknown highlighter: {0}")]
    UnknownHighlighter(String),
}
