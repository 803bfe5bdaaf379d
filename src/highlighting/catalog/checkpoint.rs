//! Checkpoint and restartpoint progress lines

use std::sync::Arc;

use super::grouped;
use crate::highlighting::{Category, Highlighter, Result};

const CHECKPOINT_PHASE: &str = r"(?i)\b(?P<phase>(?:checkpoint|restartpoint)\s+(?:starting|complete))(?::\s*(?P<reason>(?:shutdown|end-of-recovery|immediate|force|wait|time|wal|xlog|flush-all)(?:\s+(?:shutdown|end-of-recovery|immediate|force|wait|time|wal|xlog|flush-all))*))?";

const CHECKPOINT_STAT: &str = r"\b(?P<key>write|sync|total|longest|average|distance|estimate|sync files|lsn|redo lsn)=(?P<value>[0-9A-F]+/[0-9A-F]+|\d+(?:\.\d+)?(?:\s?(?:s|ms|kB|MB|GB)\b)?)";

pub(super) fn highlighters() -> Result<Vec<Arc<dyn Highlighter>>> {
    let c = Category::Checkpoint;
    Ok(vec![
        grouped(
            "checkpoint_phase",
            c,
            0,
            "Checkpoint start/complete with its trigger",
            CHECKPOINT_PHASE,
            &[("phase", "checkpoint_phase"), ("reason", "checkpoint_reason")],
        )?,
        grouped(
            "checkpoint_stat",
            c,
            1,
            "Checkpoint timing and distance statistics",
            CHECKPOINT_STAT,
            &[("key", "checkpoint_key"), ("value", "checkpoint_value")],
        )?,
    ])
}
