//! SQLSTATE codes and condition names

use std::sync::Arc;

use regex::Regex;

use super::keywords;
use crate::highlighting::{
    highlighter::{validate_pattern, HighlighterMeta},
    Category, Highlighter, Match, Result,
};
use crate::theme::Theme;

const SQLSTATE: &str = r"(?P<label>\bSQLSTATE[\s=:]*)?\b(?P<code>[0-9A-Z]{5})\b(?P<colon>:)?";

/// Code classes that never indicate a failure
const SUCCESS_CLASSES: &[&str] = &["00"];

const WARNING_CLASSES: &[&str] = &["01", "02"];

/// Resource exhaustion, operator intervention and internal errors
const FATAL_CLASSES: &[&str] = &["53", "57", "58", "XX"];

const ERROR_CLASSES: &[&str] = &[
    "03", "08", "09", "0A", "0B", "0F", "0L", "0P", "0Z", "20", "21", "22", "23", "24", "25", "26",
    "27", "28", "2B", "2D", "2F", "34", "38", "39", "3B", "3D", "3F", "40", "42", "44", "54", "55",
    "72", "F0", "HV", "P0",
];

const ERROR_NAMES: &[&str] = &[
    "unique_violation",
    "foreign_key_violation",
    "not_null_violation",
    "check_violation",
    "exclusion_violation",
    "restrict_violation",
    "deadlock_detected",
    "serialization_failure",
    "lock_not_available",
    "query_canceled",
    "undefined_table",
    "undefined_column",
    "undefined_function",
    "undefined_object",
    "duplicate_table",
    "duplicate_object",
    "syntax_error",
    "division_by_zero",
    "invalid_text_representation",
    "numeric_value_out_of_range",
    "string_data_right_truncation",
    "insufficient_privilege",
    "invalid_password",
    "out_of_memory",
    "disk_full",
    "too_many_connections",
    "admin_shutdown",
    "crash_shutdown",
    "cannot_connect_now",
    "connection_failure",
    "idle_in_transaction_session_timeout",
    "data_corrupted",
    "index_corrupted",
    "deadlock detected",
    "duplicate key value violates unique constraint",
    "could not serialize access",
    "canceling statement due to statement timeout",
    "canceling statement due to lock timeout",
    "canceling statement due to user request",
    "permission denied",
    "out of memory",
    "could not connect to server",
    "connection refused",
    "server closed the connection unexpectedly",
    "terminating connection due to administrator command",
    "password authentication failed",
    "too many connections",
    "syntax error",
];

/// SQLSTATE codes styled by their two-character class
///
/// A bare five-character token only counts as a code when it contains a
/// digit and belongs to a known class. All-digit tokens additionally need a
/// `SQLSTATE` label or a trailing colon, so plain numbers stay numbers.
pub struct SqlstateHighlighter {
    meta: HighlighterMeta,
    regex: Regex,
}

impl SqlstateHighlighter {
    pub fn new(meta: HighlighterMeta) -> Result<Self> {
        let regex = validate_pattern(&meta.name, SQLSTATE)?;
        Ok(Self { meta, regex })
    }

    /// Style key for a code, or `None` if the class is unknown
    pub fn classify(code: &str) -> Option<&'static str> {
        let class = code.get(..2)?;
        if SUCCESS_CLASSES.contains(&class) {
            Some("sqlstate_success")
        } else if WARNING_CLASSES.contains(&class) {
            Some("sqlstate_warning")
        } else if FATAL_CLASSES.contains(&class) {
            Some("sqlstate_fatal")
        } else if ERROR_CLASSES.contains(&class) {
            Some("sqlstate_error")
        } else {
            None
        }
    }
}

impl Highlighter for SqlstateHighlighter {
    fn meta(&self) -> &HighlighterMeta {
        &self.meta
    }

    fn find_matches(&self, line: &str, _theme: &dyn Theme) -> Vec<Match> {
        let mut matches = Vec::new();
        for caps in self.regex.captures_iter(line) {
            let Some(code) = caps.name("code") else {
                continue;
            };
            let text = code.as_str();
            if !text.bytes().any(|b| b.is_ascii_digit()) {
                continue;
            }
            let labelled = caps.name("label").is_some() || caps.name("colon").is_some();
            if text.bytes().all(|b| b.is_ascii_digit()) && !labelled {
                continue;
            }
            let Some(style) = Self::classify(text) else {
                continue;
            };
            if let Some(m) = Match::new(line, code.start(), code.end(), style) {
                matches.push(m);
            }
        }
        matches
    }
}

pub(super) fn highlighters() -> Result<Vec<Arc<dyn Highlighter>>> {
    let c = Category::Diagnostic;
    let names: Vec<(&str, &str)> = ERROR_NAMES.iter().map(|n| (*n, "error_name")).collect();
    Ok(vec![
        Arc::new(SqlstateHighlighter::new(HighlighterMeta::builtin(
            "sqlstate",
            c,
            0,
            "SQLSTATE codes colored by class",
        ))?),
        Arc::new(keywords(
            "error_name",
            c,
            1,
            "Condition names and common error phrases",
            &names,
        )?),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeMap;

    fn codes(line: &str) -> Vec<(String, String)> {
        let theme = ThemeMap::new("test");
        let sqlstate =
            SqlstateHighlighter::new(HighlighterMeta::builtin("sqlstate", Category::Diagnostic, 0, ""))
                .unwrap();
        sqlstate
            .find_matches(line, &theme)
            .into_iter()
            .map(|m| (m.text().to_string(), m.style().to_string()))
            .collect()
    }

    #[test]
    fn test_classify() {
        assert_eq!(SqlstateHighlighter::classify("00000"), Some("sqlstate_success"));
        assert_eq!(SqlstateHighlighter::classify("01000"), Some("sqlstate_warning"));
        assert_eq!(SqlstateHighlighter::classify("23505"), Some("sqlstate_error"));
        assert_eq!(SqlstateHighlighter::classify("53100"), Some("sqlstate_fatal"));
        assert_eq!(SqlstateHighlighter::classify("XX000"), Some("sqlstate_fatal"));
        assert_eq!(SqlstateHighlighter::classify("ZZ999"), None);
    }

    #[test]
    fn test_labelled_codes() {
        assert_eq!(
            codes("failed SQLSTATE 23505 here"),
            vec![("23505".to_string(), "sqlstate_error".to_string())]
        );
        assert_eq!(
            codes("40001: could not serialize"),
            vec![("40001".to_string(), "sqlstate_error".to_string())]
        );
    }

    #[test]
    fn test_alphanumeric_codes_need_no_label() {
        assert_eq!(
            codes("deadlock 40P01 seen"),
            vec![("40P01".to_string(), "sqlstate_error".to_string())]
        );
    }

    #[test]
    fn test_plain_numbers_and_words_ignored() {
        assert!(codes("wrote 12345 buffers").is_empty());
        assert!(codes("ERROR happened").is_empty());
        assert!(codes("code A1234").is_empty());
    }

    #[test]
    fn test_error_names() {
        let theme = ThemeMap::new("test");
        let all = highlighters().unwrap();
        let names = all.iter().find(|h| h.name() == "error_name").unwrap();
        let found: Vec<_> = names
            .find_matches("ERROR:  deadlock detected (unique_violation)", &theme)
            .into_iter()
            .map(|m| m.text().to_string())
            .collect();
        assert_eq!(found, vec!["deadlock detected", "unique_violation"]);
    }
}
