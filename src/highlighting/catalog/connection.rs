//! Connection parameters, addresses and backend process types

use std::sync::Arc;

use super::{grouped, keywords, single};
use crate::highlighting::{Category, Highlighter, Result};

const IPV4: &str = r"\b(?P<ip>(?:25[0-5]|2[0-4]\d|1?\d?\d)(?:\.(?:25[0-5]|2[0-4]\d|1?\d?\d)){3})(?:/\d{1,2})?(?::(?P<port>\d{1,5}))?\b";

/// Full eight-group form, or a `::` compressed form with at least one group after it
const IPV6: &str = r"(?i)(?:\b(?:[0-9a-f]{1,4}:){7}[0-9a-f]{1,4}|\b(?:[0-9a-f]{1,4}:){1,6}:[0-9a-f]{1,4}(?::[0-9a-f]{1,4})*|::[0-9a-f]{1,4}(?::[0-9a-f]{1,4})*)\b";

const CONNECTION_PARAM: &str = r"\b(?P<key>user|database|db|dbname|host|hostaddr|port|application_name|app|client|client_addr|remote|session|sslmode|method|identity|authenticated|SSL|protocol|cipher|bits|compression)=(?P<value>[^\s,;]+)";

const BACKEND_TYPES: &[&str] = &[
    "autovacuum launcher",
    "autovacuum worker",
    "background writer",
    "background worker",
    "checkpointer",
    "walwriter",
    "wal writer",
    "walsender",
    "wal sender",
    "walreceiver",
    "wal receiver",
    "walsummarizer",
    "startup process",
    "archiver",
    "stats collector",
    "client backend",
    "logical replication launcher",
    "logical replication worker",
    "logical replication apply worker",
    "logical replication tablesync worker",
    "parallel worker",
    "postmaster",
    "io worker",
    "slotsync worker",
];

pub(super) fn highlighters() -> Result<Vec<Arc<dyn Highlighter>>> {
    let c = Category::Connection;
    let backends: Vec<(&str, &str)> = BACKEND_TYPES.iter().map(|b| (*b, "backend_type")).collect();
    Ok(vec![
        grouped(
            "ipv4",
            c,
            0,
            "IPv4 addresses with optional port",
            IPV4,
            &[("ip", "ip_address"), ("port", "port")],
        )?,
        single("ipv6", c, 1, "IPv6 addresses", IPV6, "ip_address")?,
        grouped(
            "connection_param",
            c,
            2,
            "Connection key=value pairs (user=, database=, host=)",
            CONNECTION_PARAM,
            &[("key", "conn_key"), ("value", "conn_value")],
        )?,
        Arc::new(keywords(
            "backend_type",
            c,
            3,
            "Backend process types",
            &backends,
        )?),
    ])
}
