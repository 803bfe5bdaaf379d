//! Generic literals: booleans, NULL, UUIDs, hex, paths, numbers

use std::sync::Arc;

use super::{grouped, single};
use crate::highlighting::{Category, Highlighter, Result};

const BOOLEAN: &str = r"(?i)\b(?:true|false)\b";

const NULL: &str = r"(?i)\bnull\b";

const UUID: &str = r"(?i)\b[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}\b";

const HEX_NUMBER: &str = r"\b0[xX][0-9a-fA-F]+\b";

/// Absolute, home or dot-relative paths, plus data-directory relative ones
const FILE_PATH: &str = r#"(?:^|[\s"'=(])(?P<path>(?:/|\./|\.\./|~/|(?:base|global|pg_wal|pg_xact|pg_tblspc|pg_multixact|pg_logical|pg_replslot|pg_stat_tmp)/)[\w.+-]+(?:/[\w.+-]+)*/?)"#;

const NUMBER: &str = r"\b\d+(?:\.\d+)?\b";

pub(super) fn highlighters() -> Result<Vec<Arc<dyn Highlighter>>> {
    let c = Category::Misc;
    Ok(vec![
        single("boolean", c, 0, "true / false", BOOLEAN, "boolean")?,
        single("null", c, 1, "NULL", NULL, "null")?,
        single("uuid", c, 2, "UUIDs", UUID, "uuid")?,
        single("hex_number", c, 3, "Hexadecimal literals (0x1F)", HEX_NUMBER, "hex")?,
        grouped(
            "file_path",
            c,
            4,
            "File system paths",
            FILE_PATH,
            &[("path", "file_path")],
        )?,
        single("number", c, 5, "Any remaining number", NUMBER, "number")?,
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
    fn test_boolean_and_null() {
        assert_eq!(texts("boolean", "a = TRUE or false, untrue"), vec!["TRUE", "false"]);
        assert_eq!(texts("null", "IS NOT NULL, nullable"), vec!["NULL"]);
    }

    #[test]
    fn test_uuid_and_hex() {
        assert_eq!(
            texts("uuid", "session 6f1c2a9e-3b4d-4c5e-8f70-123456789abc ok"),
            vec!["6f1c2a9e-3b4d-4c5e-8f70-123456789abc"]
        );
        assert_eq!(texts("hex_number", "flags 0x1F and 0xZZ"), vec!["0x1F"]);
    }

    #[test]
    fn test_file_paths() {
        assert_eq!(
            texts(
                "file_path",
                "could not open \"/var/lib/postgresql/data/pg_hba.conf\" or base/16384/1259"
            ),
            vec!["/var/lib/postgresql/data/pg_hba.conf", "base/16384/1259"]
        );
        assert!(texts("file_path", "ratio 1/2 and 0/16B3748").is_empty());
    }

    #[test]
    fn test_numbers() {
        assert_eq!(texts("number", "wrote 45 buffers (0.3%) v2"), vec!["45", "0.3"]);
    }
}
