//! Durations, sizes, ratios and row counts

use std::sync::Arc;

use super::{grouped, single};
use crate::config::DurationThresholds;
use crate::highlighting::{
    highlighter::HighlighterMeta, Category, DurationHighlighter, Highlighter, Result,
};

const MEMORY_SIZE: &str = r"\b\d+(?:\.\d+)?\s?(?:[kKMGT]B|bytes?)\b";

const PERCENTAGE: &str = r"\b\d+(?:\.\d+)?%";

const ROW_COUNT: &str =
    r"\b(?P<count>\d+)\s+(?:rows?|tuples?|buffers?|pages?)\b|\brows=(?P<rows>\d+)\b";

pub(super) fn highlighters() -> Result<Vec<Arc<dyn Highlighter>>> {
    let c = Category::Performance;
    Ok(vec![
        Arc::new(DurationHighlighter::new(
            HighlighterMeta::builtin(
                "duration",
                c,
                0,
                "Durations colored by the configured slow/critical thresholds",
            ),
            DurationThresholds::default(),
        )?),
        single(
            "memory_size",
            c,
            1,
            "Memory and disk sizes (8 kB, 1.5 GB, 512 bytes)",
            MEMORY_SIZE,
            "memory_size",
        )?,
        single("percentage", c, 2, "Percentages", PERCENTAGE, "percentage")?,
        grouped(
            "row_count",
            c,
            3,
            "Row, tuple, buffer and page counts",
            ROW_COUNT,
            &[("count", "count"), ("rows", "count")],
        )?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeMap;

    fn texts(name: &str, line: &str) -> Vec<String> {
        let theme = ThemeMap::new("test");
        let all = highlighters().unwrap();
        let highlighter = all.iter().find(|h| h.name() == name).unwrap();
        highlighter
            .find_matches(line, &theme)
            .into_iter()
            .map(|m| m.text().to_string())
            .collect()
    }

    #[test]
    fn test_memory_sizes() {
        assert_eq!(
            texts("memory_size", "distance=123 kB, size 10485760 bytes, 1.5GB"),
            vec!["123 kB", "10485760 bytes", "1.5GB"]
        );
        assert!(texts("memory_size", "kB alone").is_empty());
    }

    #[test]
    fn test_percentage() {
        assert_eq!(texts("percentage", "wrote 45 buffers (0.3%)"), vec!["0.3%"]);
    }

    #[test]
    fn test_row_counts() {
        assert_eq!(
            texts("row_count", "removed 12 rows, 3 pages; rows=400"),
            vec!["12", "3", "400"]
        );
    }

    #[test]
    fn test_duration_uses_default_thresholds() {
        let theme = ThemeMap::new("test");
        let all = highlighters().unwrap();
        let duration = all.iter().find(|h| h.name() == "duration").unwrap();
        let found = duration.find_matches("duration: 250.5 ms", &theme);
        assert_eq!(found[0].style(), "duration_slow");
    }
}
