//! Built-in highlighter tables, one module per category
//!
//! Each module lists its patterns as typed table entries and turns them into
//! highlighters once, when the registry is built.

use std::sync::Arc;

use super::{
    highlighter::{Category, Highlighter, HighlighterMeta},
    matchers::{GroupedRegexHighlighter, KeywordHighlighter, RegexHighlighter},
    Result,
};

mod checkpoint;
mod connection;
mod diagnostic;
mod lock;
mod misc;
mod objects;
mod performance;
mod sql;
mod structural;
mod wal;

pub use diagnostic::SqlstateHighlighter;

/// Every built-in highlighter, in category order
pub fn builtin_highlighters() -> Result<Vec<Arc<dyn Highlighter>>> {
    let mut all = Vec::new();
    all.extend(structural::highlighters()?);
    all.extend(diagnostic::highlighters()?);
    all.extend(performance::highlighters()?);
    all.extend(objects::highlighters()?);
    all.extend(wal::highlighters()?);
    all.extend(connection::highlighters()?);
    all.extend(sql::highlighters()?);
    all.extend(lock::highlighters()?);
    all.extend(checkpoint::highlighters()?);
    all.extend(misc::highlighters()?);
    Ok(all)
}

/// Representative log lines used by previews and benchmarks
pub fn sample_lines() -> &'static [(Category, &'static str)] {
    SAMPLE_LINES
}

const SAMPLE_LINES: &[(Category, &str)] = &[
    (
        Category::Structural,
        "2024-01-15 10:23:45.123 UTC [12345] LOG:  database system is ready to accept connections",
    ),
    (
        Category::Structural,
        "2024-01-15 10:23:46.001 CEST [4711-2] FATAL:  terminating connection due to administrator command",
    ),
    (
        Category::Diagnostic,
        "2024-01-15 10:24:01.517 UTC [23456] ERROR:  duplicate key value violates unique constraint \"users_pkey\"",
    ),
    (
        Category::Diagnostic,
        "ERROR:  deadlock detected SQLSTATE 40P01; process 812 waits for ShareLock on transaction 1234",
    ),
    (
        Category::Performance,
        "LOG:  duration: 6000.0 ms  statement: SELECT count(*) FROM orders WHERE total > 100",
    ),
    (
        Category::Performance,
        "LOG:  temporary file: path \"base/pgsql_tmp/pgsql_tmp1234.0\", size 10485760 bytes (42.5%)",
    ),
    (
        Category::Objects,
        "ERROR:  relation \"public.accounts\" does not exist at character 15 (oid 16384)",
    ),
    (
        Category::Wal,
        "LOG:  redo starts at 0/16B3748 on timeline 1, segment 000000010000000000000001",
    ),
    (
        Category::Connection,
        "LOG:  connection authorized: user=postgres database=app application_name=psql host=192.168.1.20:5432",
    ),
    (
        Category::Connection,
        "LOG:  connection received: host=2001:db8::1 port=51234 for client backend",
    ),
    (
        Category::Sql,
        "LOG:  execute S_1: UPDATE users SET name = $1, active = true WHERE id = $2 AND note IS NULL",
    ),
    (
        Category::Sql,
        "STATEMENT:  INSERT INTO audit (event, payload) VALUES ('login', lower('X'))",
    ),
    (
        Category::Lock,
        "LOG:  process 812 still waiting for AccessExclusiveLock on tuple (0,1) of relation 16390",
    ),
    (
        Category::Checkpoint,
        "LOG:  checkpoint complete: wrote 45 buffers (0.3%); write=4.512 s, sync=0.003 s, total=4.530 s",
    ),
    (
        Category::Checkpoint,
        "LOG:  checkpoint starting: immediate force wait",
    ),
    (
        Category::Misc,
        "DEBUG:  session 6f1c2a9e-3b4d-4c5e-8f70-123456789abc flags 0x1F at /var/lib/postgresql/data/postgresql.conf is false",
    ),
];

/// Single-style regex entry
fn single(
    name: &str,
    category: Category,
    offset: i32,
    description: &str,
    pattern: &str,
    style: &str,
) -> Result<Arc<dyn Highlighter>> {
    let meta = HighlighterMeta::builtin(name, category, offset, description);
    Ok(Arc::new(RegexHighlighter::new(meta, pattern, style)?))
}

/// Regex entry with a style per named group
fn grouped(
    name: &str,
    category: Category,
    offset: i32,
    description: &str,
    pattern: &str,
    groups: &[(&str, &str)],
) -> Result<Arc<dyn Highlighter>> {
    let meta = HighlighterMeta::builtin(name, category, offset, description);
    Ok(Arc::new(GroupedRegexHighlighter::new(
        meta,
        pattern,
        groups.iter().copied(),
    )?))
}

/// Keyword table entry
fn keywords(
    name: &str,
    category: Category,
    offset: i32,
    description: &str,
    table: &[(&str, &str)],
) -> Result<KeywordHighlighter> {
    let meta = HighlighterMeta::builtin(name, category, offset, description);
    KeywordHighlighter::new(meta, table.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use crate::config::HighlightingConfig;
    use crate::highlighting::HighlighterChain;
    use crate::markup;
    use crate::theme::{Theme, ThemeMap};

    #[test]
    fn test_builtins_compile_with_unique_names() {
        let all = builtin_highlighters().unwrap();
        let names: HashSet<_> = all.iter().map(|h| h.name().to_string()).collect();
        assert_eq!(names.len(), all.len());
    }

    #[test]
    fn test_priorities_stay_in_category_band() {
        for highlighter in builtin_highlighters().unwrap() {
            let base = highlighter.category().base_priority();
            let priority = highlighter.priority();
            assert!(
                priority >= base && priority < base + 100,
                "{} has priority {} outside its band",
                highlighter.name(),
                priority
            );
        }
    }

    #[test]
    fn test_every_category_has_a_sample() {
        let builtins = builtin_highlighters().unwrap();
        let categories: HashSet<_> = builtins.iter().map(|h| h.category()).collect();
        for category in categories {
            assert!(
                sample_lines().iter().any(|(c, _)| *c == category),
                "no sample for {}",
                category
            );
        }
    }

    #[test]
    fn test_default_theme_covers_builtin_styles() {
        let theme = ThemeMap::default_dark();
        let chain = HighlighterChain::new(builtin_highlighters().unwrap());
        let config = HighlightingConfig::default();

        for (_, line) in sample_lines() {
            for m in chain.resolve(line, &theme, &config) {
                assert!(
                    theme.get_style(m.style()).is_some(),
                    "style '{}' missing from default theme",
                    m.style()
                );
            }
        }
    }

    #[test]
    fn test_samples_round_trip() {
        let theme = ThemeMap::default_dark();
        let chain = HighlighterChain::new(builtin_highlighters().unwrap());
        let config = HighlightingConfig::default();

        for (_, line) in sample_lines() {
            let out = chain.apply_with_color(line, &theme, &config, true);
            assert_eq!(markup::strip(&out), *line);
            assert!(markup::count_styled(&out) > 0, "nothing styled in {}", line);
        }
    }
}
