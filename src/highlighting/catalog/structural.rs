//! Log line framing: timestamps, process ids, severity labels

use std::sync::Arc;

use super::{grouped, keywords};
use crate::highlighting::{Category, Highlighter, Result};

const TIMESTAMP: &str = r"\b(?P<date>\d{4}-\d{2}-\d{2})[ T](?P<time>\d{2}:\d{2}:\d{2})(?:[.,](?P<ms>\d{1,6}))?(?:\s?(?P<tz>UTC|GMT|[A-Z]{2,4}T\b|[+-]\d{2}(?::?\d{2})?))?";

/// Not glued to an identifier or a preceding subscript, so `arr[1]` stays SQL
const PID: &str = r"(?:^|[^\w\]])(?P<pid>\[\d+(?:-\d+)?\])";

const PROCESS_ID: &str = r"(?i)\b(?:process|pid)[=: ]\s*(?P<pid>\d+)\b";

const LOG_LEVELS: &[(&str, &str)] = &[
    ("PANIC:", "level_panic"),
    ("FATAL:", "level_fatal"),
    ("ERROR:", "level_error"),
    ("WARNING:", "level_warning"),
    ("NOTICE:", "level_notice"),
    ("INFO:", "level_info"),
    ("LOG:", "level_log"),
    ("DEBUG:", "level_debug"),
    ("DEBUG1:", "level_debug"),
    ("DEBUG2:", "level_debug"),
    ("DEBUG3:", "level_debug"),
    ("DEBUG4:", "level_debug"),
    ("DEBUG5:", "level_debug"),
    ("DETAIL:", "level_detail"),
    ("HINT:", "level_detail"),
    ("CONTEXT:", "level_detail"),
    ("STATEMENT:", "level_detail"),
    ("QUERY:", "level_detail"),
    ("LOCATION:", "level_detail"),
];

pub(super) fn highlighters() -> Result<Vec<Arc<dyn Highlighter>>> {
    let c = Category::Structural;
    Ok(vec![
        grouped(
            "timestamp",
            c,
            0,
            "Log timestamps split into date, time, fraction and zone",
            TIMESTAMP,
            &[
                ("date", "timestamp_date"),
                ("time", "timestamp_time"),
                ("ms", "timestamp_ms"),
                ("tz", "timestamp_tz"),
            ],
        )?,
        grouped(
            "pid",
            c,
            1,
            "Bracketed backend PID such as [12345]",
            PID,
            &[("pid", "pid")],
        )?,
        grouped(
            "process_id",
            c,
            2,
            "Process ids written as 'process 123' or 'pid=123'",
            PROCESS_ID,
            &[("pid", "pid")],
        )?,
        Arc::new(keywords(
            "log_level",
            c,
            3,
            "Severity and detail labels (LOG:, ERROR:, DETAIL:)",
            LOG_LEVELS,
        )?),
    ])
}
