//! Lock modes, lock waits and tuple ids

use std::sync::Arc;

use super::{grouped, keywords, single};
use crate::highlighting::{Category, Highlighter, Result};

/// Modes that do not conflict with ordinary reads are styled as shared
const LOCK_MODES: &[(&str, &str)] = &[
    ("AccessShareLock", "lock_share"),
    ("RowShareLock", "lock_share"),
    ("RowExclusiveLock", "lock_share"),
    ("ShareUpdateExclusiveLock", "lock_share"),
    ("ShareLock", "lock_share"),
    ("ShareRowExclusiveLock", "lock_exclusive"),
    ("ExclusiveLock", "lock_exclusive"),
    ("AccessExclusiveLock", "lock_exclusive"),
    ("ACCESS SHARE", "lock_share"),
    ("ROW SHARE", "lock_share"),
    ("ROW EXCLUSIVE", "lock_share"),
    ("SHARE UPDATE EXCLUSIVE", "lock_share"),
    ("SHARE ROW EXCLUSIVE", "lock_exclusive"),
    ("ACCESS EXCLUSIVE", "lock_exclusive"),
];

const LOCK_WAIT: &str = r"\bprocess \d+ (?P<state>still waiting|acquired|avoided deadlock|detected deadlock)\b";

const TUPLE_ID: &str = r"\(\d+,\d+\)";

pub(super) fn highlighters() -> Result<Vec<Arc<dyn Highlighter>>> {
    let c = Category::Lock;
    Ok(vec![
        Arc::new(keywords(
            "lock_mode",
            c,
            0,
            "Lock modes by conflict strength",
            LOCK_MODES,
        )?),
        grouped(
            "lock_wait",
            c,
            1,
            "Lock wait and acquisition states",
            LOCK_WAIT,
            &[("state", "lock_state")],
        )?,
        single(
            "tuple_id",
            c,
            2,
            "Tuple ids such as (0,1)",
            TUPLE_ID,
            "tuple_id",
        )?,
    ])
}
