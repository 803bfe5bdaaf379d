//! Write-ahead log positions, segment files and timelines

use std::sync::Arc;

use super::{grouped, single};
use crate::highlighting::{Category, Highlighter, Result};

const LSN: &str = r"\b[0-9A-F]{1,8}/[0-9A-F]{1,8}\b";

const WAL_SEGMENT: &str = r"\b[0-9A-F]{24}\b";

const TIMELINE: &str = r"(?i)\b(?:timeline|tli)[ =:]\s*(?P<tli>\d+)\b";

pub(super) fn highlighters() -> Result<Vec<Arc<dyn Highlighter>>> {
    let c = Category::Wal;
    Ok(vec![
        single("lsn", c, 0, "Log sequence numbers such as 0/16B3748", LSN, "lsn")?,
        single(
            "wal_segment",
            c,
            1,
            "24-digit WAL segment file names",
            WAL_SEGMENT,
            "wal_segment",
        )?,
        grouped(
            "timeline",
            c,
            2,
            "Timeline ids",
            TIMELINE,
            &[("tli", "timeline")],
        )?,
    ])
}
