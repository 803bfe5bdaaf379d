//! Database object references

use std::sync::Arc;

use super::{grouped, single};
use crate::highlighting::{Category, Highlighter, Result};

/// Server messages quote object names: `relation "users"`, `index "users_pkey"`
const OBJECT_REF: &str = r#"\b(?P<kind>relation|table|index|view|materialized view|sequence|function|procedure|schema|database|role|column|constraint|type|extension|trigger|tablespace|publication|subscription|replication slot|operator|collation)\s+(?P<name>"(?:[^"]|"")+")"#;

const QUALIFIED_NAME: &str = r"\b[a-z_][a-z0-9_]*\.[a-z_][a-z0-9_]*\b";

const QUOTED_IDENTIFIER: &str = r#""(?:[^"]|"")+""#;

const OID: &str = r"(?i)\b(?:oid|relfilenode|relid)\s*[=:]?\s*(?P<oid>\d+)\b";

pub(super) fn highlighters() -> Result<Vec<Arc<dyn Highlighter>>> {
    let c = Category::Objects;
    Ok(vec![
        grouped(
            "object_ref",
            c,
            0,
            "Object kind followed by a quoted name",
            OBJECT_REF,
            &[("kind", "object_type"), ("name", "identifier")],
        )?,
        single(
            "qualified_name",
            c,
            1,
            "schema.object names",
            QUALIFIED_NAME,
            "identifier",
        )?,
        single(
            "quoted_identifier",
            c,
            2,
            "Double-quoted identifiers",
            QUOTED_IDENTIFIER,
            "identifier",
        )?,
        grouped("oid", c, 3, "Object ids", OID, &[("oid", "oid")])?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::ThemeMap;

    fn found(name: &str, line: &str) -> Vec<(String, String)> {
        let theme = ThemeMap::new("test");
        let all = highlighters().unwrap();
        let highlighter = all.iter().find(|h| h.name() == name).unwrap();
        highlighter
            .find_matches(line, &theme)
            .into_iter()
            .map(|m| (m.text().to_string(), m.style().to_string()))
            .collect()
    }

    #[test]
    fn test_object_ref() {
        assert_eq!(
            found("object_ref", r#"relation "public.users" does not exist"#),
            vec![
                ("relation".to_string(), "object_type".to_string()),
                ("\"public.users\"".to_string(), "identifier".to_string()),
            ]
        );
        assert!(found("object_ref", "CREATE TABLE users").is_empty());
    }

    #[test]
    fn test_quoted_identifier_with_escaped_quote() {
        assert_eq!(
            found("quoted_identifier", r#"column "a""b" of"#),
            vec![("\"a\"\"b\"".to_string(), "identifier".to_string())]
        );
    }

    #[test]
    fn test_qualified_name() {
        assert_eq!(
            found("qualified_name", "vacuum pg_catalog.pg_class now"),
            vec![("pg_catalog.pg_class".to_string(), "identifier".to_string())]
        );
        assert!(found("qualified_name", "took 1.5 ms").is_empty());
    }

    #[test]
    fn test_oid() {
        assert_eq!(
            found("oid", "(oid 16384) relfilenode=16390"),
            vec![
                ("16384".to_string(), "oid".to_string()),
                ("16390".to_string(), "oid".to_string()),
            ]
        );
    }
}
