//! The `Highlighter` trait and shared matcher plumbing

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use super::{HighlightError, Match, Result};
use crate::config::HighlightingConfig;
use crate::theme::Theme;

/// Lowest priority value reserved for user-defined patterns
pub const CUSTOM_PRIORITY_BAND: i32 = 1100;

/// Compiled size cap for user patterns
const PATTERN_SIZE_LIMIT: usize = 1 << 20;

/// Inputs used to catch patterns that can match an empty span
const EMPTY_MATCH_PROBES: &[&str] = &[
    "",
    "a",
    " \t",
    "SELECT 1;",
    "2024-01-15 10:23:45.123 UTC [12345] LOG:  duration: 1.5 ms",
];

/// Grouping for listings, previews and priority bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Structural,
    Diagnostic,
    Performance,
    Objects,
    Wal,
    Connection,
    Sql,
    Lock,
    Checkpoint,
    Misc,
    Custom,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Structural,
        Category::Diagnostic,
        Category::Performance,
        Category::Objects,
        Category::Wal,
        Category::Connection,
        Category::Sql,
        Category::Lock,
        Category::Checkpoint,
        Category::Misc,
        Category::Custom,
    ];

    /// First priority value of this category's band
    pub fn base_priority(&self) -> i32 {
        match self {
            Category::Structural => 100,
            Category::Diagnostic => 200,
            Category::Performance => 300,
            Category::Objects => 400,
            Category::Wal => 500,
            Category::Connection => 600,
            Category::Sql => 700,
            Category::Lock => 800,
            Category::Checkpoint => 900,
            Category::Misc => 1000,
            Category::Custom => CUSTOM_PRIORITY_BAND,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Structural => "structural",
            Category::Diagnostic => "diagnostic",
            Category::Performance => "performance",
            Category::Objects => "objects",
            Category::Wal => "wal",
            Category::Connection => "connection",
            Category::Sql => "sql",
            Category::Lock => "lock",
            Category::Checkpoint => "checkpoint",
            Category::Misc => "misc",
            Category::Custom => "custom",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = HighlightError;

    fn from_str(s: &str) -> Result<Self> {
        Category::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| HighlightError::UnknownHighlighter(format!("category '{}'", s)))
    }
}

/// Identity shared by every highlighter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlighterMeta {
    /// Stable identifier used for enable/disable and config persistence
    pub name: String,
    pub category: Category,
    /// Lower values are resolved first and win overlaps
    pub priority: i32,
    pub description: String,
}

impl HighlighterMeta {
    pub fn new(
        name: impl Into<String>,
        category: Category,
        priority: i32,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            category,
            priority,
            description: description.into(),
        }
    }

    /// Built-in entry placed `offset` into its category's band
    pub fn builtin(
        name: impl Into<String>,
        category: Category,
        offset: i32,
        description: impl Into<String>,
    ) -> Self {
        Self::new(name, category, category.base_priority() + offset, description)
    }
}

/// Something that proposes highlighted spans for a line
///
/// Implementations compile their patterns once, at construction. They must
/// not panic on any input and must never return empty matches; the chain
/// decides which of the returned spans survive.
pub trait Highlighter: Send + Sync {
    fn meta(&self) -> &HighlighterMeta;

    /// Candidate matches for `line`, in any order
    fn find_matches(&self, line: &str, theme: &dyn Theme) -> Vec<Match>;

    /// A copy bound to config values (thresholds etc.), if this highlighter uses any
    fn configured(&self, _config: &HighlightingConfig) -> Option<Arc<dyn Highlighter>> {
        None
    }

    fn name(&self) -> &str {
        &self.meta().name
    }

    fn priority(&self) -> i32 {
        self.meta().priority
    }

    fn category(&self) -> Category {
        self.meta().category
    }

    fn description(&self) -> &str {
        &self.meta().description
    }
}

impl fmt::Debug for dyn Highlighter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Highlighter")
            .field("name", &self.name())
            .field("priority", &self.priority())
            .field("category", &self.category())
            .finish()
    }
}

/// Compile a pattern, reporting syntax errors against `name`
pub fn compile_pattern(name: &str, pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .size_limit(PATTERN_SIZE_LIMIT)
        .build()
        .map_err(|e| HighlightError::InvalidPattern {
            name: name.to_string(),
            reason: e.to_string(),
        })
}

/// Whether some input lets `pattern` match a zero-length span
///
/// Decided from the parsed pattern's minimum match length, so context-only
/// assertions such as `\B` or `^` are caught whatever the input.
fn can_match_empty(name: &str, pattern: &str) -> Result<bool> {
    let hir = regex_syntax::Parser::new()
        .parse(pattern)
        .map_err(|e| HighlightError::InvalidPattern {
            name: name.to_string(),
            reason: e.to_string(),
        })?;
    Ok(hir.properties().minimum_len() == Some(0))
}

/// Compile a pattern and reject it if it can match an empty span
pub fn validate_pattern(name: &str, pattern: &str) -> Result<Regex> {
    let empty_match = || HighlightError::EmptyMatch {
        name: name.to_string(),
        pattern: pattern.to_string(),
    };

    if pattern.is_empty() {
        return Err(empty_match());
    }

    let regex = compile_pattern(name, pattern)?;

    if can_match_empty(name, pattern)? {
        return Err(empty_match());
    }

    let matches_empty = EMPTY_MATCH_PROBES
        .iter()
        .any(|probe| regex.find_iter(probe).any(|m| m.start() == m.end()));
    if matches_empty {
        return Err(empty_match());
    }

    Ok(regex)
}
