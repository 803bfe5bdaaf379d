//! SQL text embedded in log messages
//!
//! Keywords, identifiers and function calls are only looked for inside the
//! SQL region of a line so ordinary message prose ("connection to server",
//! "could not open file") is left alone. Literals and `$n` parameters are
//! distinctive enough to match anywhere.

use std::sync::Arc;

use super::{grouped, keywords, single};
use crate::highlighting::{Category, Highlighter, Result, ScopedHighlighter};

/// Start of the SQL region: a statement label or a line that opens with a verb
const SQL_SCOPE: &str = r"(?i)(?:\b(?:statement|query|execute\s+[^:\s]+|parse\s+[^:\s]+|bind\s+[^:\s]+):\s*|^\s*)(?P<body>(?:select|insert|update|delete|with|create|alter|drop|begin|commit|rollback|explain|vacuum|analyze|truncate|grant|revoke|copy|set|show|values|call|do|lock|prepare|deallocate|refresh|reindex|cluster|comment|listen|notify|fetch|declare|close|savepoint|release|start|end|abort|checkpoint|discard|reset|merge|table)\b)";

/// TRUE, FALSE and NULL are left to the literal highlighters
const SQL_KEYWORDS: &[&str] = &[
    "SELECT", "FROM", "WHERE", "AND", "OR", "NOT", "IN", "IS", "AS", "ON", "JOIN", "LEFT",
    "RIGHT", "INNER", "OUTER", "FULL", "CROSS", "NATURAL", "LATERAL", "USING", "GROUP BY",
    "ORDER BY", "PARTITION BY", "GROUP", "ORDER", "BY", "HAVING", "LIMIT", "OFFSET", "UNION",
    "INTERSECT", "EXCEPT", "ALL", "ANY", "DISTINCT", "INSERT", "INTO", "VALUES", "UPDATE", "SET",
    "DELETE", "RETURNING", "MERGE", "MATCHED", "CREATE", "ALTER", "DROP", "TABLE", "INDEX",
    "VIEW", "SEQUENCE", "SCHEMA", "DATABASE", "FUNCTION", "TRIGGER", "IF", "ONLY", "EXISTS",
    "BEGIN", "COMMIT", "ROLLBACK", "SAVEPOINT", "RELEASE", "TRANSACTION", "START", "WITH",
    "RECURSIVE", "CASE", "WHEN", "THEN", "ELSE", "END", "BETWEEN", "LIKE", "ILIKE", "SIMILAR",
    "ASC", "DESC", "NULLS", "FIRST", "LAST", "PRIMARY KEY", "FOREIGN KEY", "REFERENCES",
    "UNIQUE", "CHECK", "DEFAULT", "CONSTRAINT", "CASCADE", "RESTRICT", "EXPLAIN", "ANALYZE",
    "VERBOSE", "VACUUM", "TRUNCATE", "GRANT", "REVOKE", "COPY", "LOCK", "FOR", "NOWAIT",
    "SKIP LOCKED", "CONFLICT", "DO", "NOTHING", "PREPARE", "EXECUTE", "DEALLOCATE", "LISTEN",
    "NOTIFY", "FETCH", "DECLARE", "CURSOR", "CLOSE", "SHOW", "RESET", "INTERVAL", "CAST",
    "OVER", "WINDOW", "FILTER", "COLLATE", "CONCURRENTLY", "REFRESH", "MATERIALIZED",
];

const SQL_IDENTIFIER: &str = r#"(?i)\b(?:from|join|into|update|table)\s+(?P<ident>"(?:[^"]|"")+"|[a-z_][a-z0-9_$]*(?:\.[a-z_][a-z0-9_$]*)?)"#;

const SQL_STRING: &str = r"'(?:[^']|'')*'";

const SQL_PARAMETER: &str = r"\$\d+";

const SQL_FUNCTION: &str = r"(?i)\b(?P<func>[a-z_][a-z0-9_]*)\s*\(";

fn scoped(inner: Arc<dyn Highlighter>) -> Result<Arc<dyn Highlighter>> {
    Ok(Arc::new(ScopedHighlighter::new(inner, SQL_SCOPE)?))
}

pub(super) fn highlighters() -> Result<Vec<Arc<dyn Highlighter>>> {
    let c = Category::Sql;
    let table: Vec<(&str, &str)> = SQL_KEYWORDS.iter().map(|k| (*k, "sql_keyword")).collect();
    Ok(vec![
        scoped(Arc::new(keywords(
            "sql_keyword",
            c,
            0,
            "SQL keywords inside statement text",
            &table,
        )?))?,
        scoped(grouped(
            "sql_identifier",
            c,
            1,
            "Table names after FROM, JOIN, INTO, UPDATE and TABLE",
            SQL_IDENTIFIER,
            &[("ident", "identifier")],
        )?)?,
        single(
            "sql_string",
            c,
            2,
            "Single-quoted string literals",
            SQL_STRING,
            "sql_string",
        )?,
        single(
            "sql_parameter",
            c,
            3,
            "Positional parameters ($1, $2)",
            SQL_PARAMETER,
            "sql_param",
        )?,
        scoped(grouped(
            "sql_function",
            c,
            4,
            "Function calls inside statement text",
            SQL_FUNCTION,
            &[("func", "sql_function")],
        )?)?,
    ])
}
