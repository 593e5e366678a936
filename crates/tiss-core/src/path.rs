//! Key parsing: turns an object key into display fields.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::{Category, FileType};

const PROCESSED_PREFIX: &str = "processed-tiss/";
const INCOMING_PREFIX: &str = "incoming/";

/// Display fields extracted from a key. Absence of a match falls back to
/// `Category::Other`, no date, and `FileType::Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedKey {
    pub file_name: String,
    pub category: Category,
    /// `DD/MM/YYYY`
    pub date: Option<String>,
    pub file_type: FileType,
}

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\d{4})/(\d{2})/(\d{2})").expect("valid regex"))
}

/// Lowercase text after the last dot of a file name, so `.zip` is "zip".
pub fn file_extension(file_name: &str) -> Option<String> {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
}

pub fn category_for_key(key: &str) -> Category {
    if key.starts_with(PROCESSED_PREFIX) {
        Category::Processed
    } else if key.starts_with(INCOMING_PREFIX) {
        Category::Received
    } else {
        Category::Other
    }
}

/// First `YYYY/MM/DD` segment of the key, reformatted as `DD/MM/YYYY`.
pub fn extract_date(key: &str) -> Option<String> {
    date_pattern()
        .captures(key)
        .map(|caps| format!("{}/{}/{}", &caps[3], &caps[2], &caps[1]))
}

pub fn parse_key(key: &str) -> ParsedKey {
    let file_name = key.rsplit('/').next().unwrap_or(key).to_string();
    let file_type = FileType::from_file_name(&file_name);

    ParsedKey {
        file_name,
        category: category_for_key(key),
        date: extract_date(key),
        file_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_extension_uses_last_dot() {
        assert_eq!(file_extension("lote.TAR.ZIP").as_deref(), Some("zip"));
        assert_eq!(file_extension(".zip").as_deref(), Some("zip"));
        assert_eq!(file_extension("README"), None);
    }

    #[test]
    fn parses_processed_key() {
        let parsed = parse_key("processed-tiss/recurso_glosa/2025/07/05/prd001_xmls.zip");
        assert_eq!(parsed.file_name, "prd001_xmls.zip");
        assert_eq!(parsed.category, Category::Processed);
        assert_eq!(parsed.date.as_deref(), Some("05/07/2025"));
        assert_eq!(parsed.file_type, FileType::Zip);
    }

    #[test]
    fn parses_incoming_key_without_date() {
        let parsed = parse_key("incoming/Relatorio Glosas.XLSX");
        assert_eq!(parsed.file_name, "Relatorio Glosas.XLSX");
        assert_eq!(parsed.category, Category::Received);
        assert_eq!(parsed.date, None);
        assert_eq!(parsed.file_type, FileType::Xlsx);
    }

    #[test]
    fn prefix_must_be_at_start() {
        assert_eq!(category_for_key("archive/processed-tiss/a.zip"), Category::Other);
        assert_eq!(category_for_key("incoming-old/a.zip"), Category::Other);
        assert_eq!(category_for_key("processed-tiss"), Category::Other);
        assert_eq!(category_for_key("incoming/"), Category::Received);
    }

    #[test]
    fn key_without_slash_is_its_own_file_name() {
        let parsed = parse_key("manual.pdf");
        assert_eq!(parsed.file_name, "manual.pdf");
        assert_eq!(parsed.category, Category::Other);
        assert_eq!(parsed.file_type, FileType::Pdf);
    }

    #[test]
    fn takes_first_date_match() {
        assert_eq!(
            extract_date("processed-tiss/2024/12/31/retry/2025/01/02/x.xml").as_deref(),
            Some("31/12/2024")
        );
        assert_eq!(extract_date("incoming/2024/1/31/x.xml"), None);
    }

    #[test]
    fn trailing_slash_yields_empty_file_name() {
        let parsed = parse_key("incoming/");
        assert_eq!(parsed.file_name, "");
        assert_eq!(parsed.file_type, FileType::Other);
    }
}
