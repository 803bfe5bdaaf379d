//! Duration matcher with threshold classification
//!
//! Matches a number followed by a time unit, converts it to milliseconds and
//! picks one of four severity styles using the configured thresholds.

use std::sync::Arc;

use regex::Regex;

use crate::config::{DurationThresholds, HighlightingConfig};
use crate::highlighting::{
    highlighter::{validate_pattern, Highlighter, HighlighterMeta},
    Match, Result,
};
use crate::theme::Theme;

const DURATION_PATTERN: &str = r"\b(?P<value>\d+(?:\.\d+)?)\s?(?P<unit>ms|us|µs|s|secs?|seconds?|min|mins|minutes?|h|hours?)\b";

#[derive(Clone)]
pub struct DurationHighlighter {
    meta: HighlighterMeta,
    regex: Regex,
    thresholds: DurationThresholds,
}

impl DurationHighlighter {
    pub fn new(meta: HighlighterMeta, thresholds: DurationThresholds) -> Result<Self> {
        let regex = validate_pattern(&meta.name, DURATION_PATTERN)?;
        Ok(Self {
            meta,
            regex,
            thresholds,
        })
    }

    pub fn thresholds(&self) -> DurationThresholds {
        self.thresholds
    }
}

/// Convert a value in `unit` to milliseconds
fn to_millis(value: f64, unit: &str) -> f64 {
    match unit {
        "us" | "µs" => value / 1000.0,
        "ms" => value,
        "min" | "mins" | "minute" | "minutes" => value * 60_000.0,
        "h" | "hour" | "hours" => value * 3_600_000.0,
        // s, sec, secs, second, seconds
        _ => value * 1000.0,
    }
}

impl Highlighter for DurationHighlighter {
    fn meta(&self) -> &HighlighterMeta {
        &self.meta
    }

    fn find_matches(&self, line: &str, _theme: &dyn Theme) -> Vec<Match> {
        let mut matches = Vec::new();
        for caps in self.regex.captures_iter(line) {
            let (Some(whole), Some(value), Some(unit)) =
                (caps.get(0), caps.name("value"), caps.name("unit"))
            else {
                continue;
            };
            let Ok(number) = value.as_str().parse::<f64>() else {
                continue;
            };
            let level = self.thresholds.classify(to_millis(number, unit.as_str()));
            if let Some(m) = Match::new(line, whole.start(), whole.end(), level.style_key()) {
                matches.push(m);
            }
        }
        matches
    }

    fn configured(&self, config: &HighlightingConfig) -> Option<Arc<dyn Highlighter>> {
        Some(Arc::new(Self {
            thresholds: config.duration_thresholds,
            ..self.clone()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlighting::Category;
    use crate::theme::ThemeMap;

    fn duration() -> DurationHighlighter {
        DurationHighlighter::new(
            HighlighterMeta::builtin("duration", Category::Performance, 0, "durations"),
            DurationThresholds {
                slow: 100.0,
                very_slow: 500.0,
                critical: 5000.0,
            },
        )
        .unwrap()
    }

    fn styles(line: &str) -> Vec<(String, String)> {
        let theme = ThemeMap::new("test");
        duration()
            .find_matches(line, &theme)
            .into_iter()
            .map(|m| (m.text().to_string(), m.style().to_string()))
            .collect()
    }

    #[test]
    fn test_critical_duration() {
        assert_eq!(
            styles("duration: 6000.0 ms"),
            vec![("6000.0 ms".to_string(), "duration_critical".to_string())]
        );
    }

    #[test]
    fn test_levels() {
        assert_eq!(styles("0.042 ms")[0].1, "duration_fast");
        assert_eq!(styles("250 ms")[0].1, "duration_slow");
        assert_eq!(styles("0.75 s")[0].1, "duration_very_slow");
        assert_eq!(styles("2 min")[0].1, "duration_critical");
        assert_eq!(styles("900 us")[0].1, "duration_fast");
    }

    #[test]
    fn test_non_durations_ignored() {
        assert!(styles("wrote 12 buffers").is_empty());
        assert!(styles("3 sync files").is_empty());
        assert!(styles("v12ms").is_empty());
    }

    #[test]
    fn test_configured_uses_config_thresholds() {
        let mut config = HighlightingConfig::default();
        config.duration_thresholds = DurationThresholds {
            slow: 1.0,
            very_slow: 2.0,
            critical: 3.0,
        };

        let theme = ThemeMap::new("test");
        let configured = duration().configured(&config).unwrap();
        let matches = configured.find_matches("duration: 10 ms", &theme);
        assert_eq!(matches[0].style(), "duration_critical");
    }
}
