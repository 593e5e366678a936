//! View-model projection: storage objects to rows, rows to the visible subset.
//!
//! Everything here is recomputed from scratch on demand; nothing is cached
//! between calls.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::format::{format_date, format_size, parse_timestamp};
use crate::models::{Category, DisplayRow, FileType, StorageObject};
use crate::path::parse_key;

/// Folder placeholder object the gateway lists for the upload area.
const INCOMING_FOLDER_KEY: &str = "incoming/";

/// Current filter inputs. An unset dimension matches every row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub search_term: String,
    pub category: Option<Category>,
    pub file_type: Option<FileType>,
}

impl FilterState {
    pub fn is_empty(&self) -> bool {
        self.search_term.is_empty() && self.category.is_none() && self.file_type.is_none()
    }

    pub fn matches(&self, row: &DisplayRow) -> bool {
        let matches_search = self.search_term.is_empty()
            || row
                .file_name
                .to_lowercase()
                .contains(&self.search_term.to_lowercase());
        let matches_category = self.category.is_none_or(|c| row.category == c);
        let matches_file_type = self.file_type.is_none_or(|t| row.file_type == t);

        matches_search && matches_category && matches_file_type
    }
}

/// Rows satisfying all three predicates, in their original order.
pub fn apply_filters<'a>(rows: &'a [DisplayRow], filter: &FilterState) -> Vec<&'a DisplayRow> {
    rows.iter().filter(|row| filter.matches(row)).collect()
}

pub fn to_display_row(object: &StorageObject) -> DisplayRow {
    let parsed = parse_key(&object.key);
    DisplayRow {
        file_name: parsed.file_name,
        category: parsed.category,
        extracted_date: parsed.date,
        file_type: parsed.file_type,
        size: object.size,
        formatted_size: format_size(object.size),
        last_modified: object.last_modified.clone(),
        formatted_date: format_date(&object.last_modified),
        source_key: object.key.clone(),
    }
}

/// Build display rows from a listing.
///
/// Skips the bare `incoming/` folder placeholder and zero-byte objects, then
/// sorts newest first. Objects with an unparseable timestamp sort last.
pub fn build_rows(objects: &[StorageObject]) -> Vec<DisplayRow> {
    let mut rows: Vec<DisplayRow> = objects
        .iter()
        .filter(|obj| obj.key != INCOMING_FOLDER_KEY && obj.size > 0)
        .map(to_display_row)
        .collect();

    rows.sort_by_cached_key(|row| Reverse(parse_timestamp(&row.last_modified)));
    rows
}

/// Aggregates shown above the listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_files: usize,
    pub processed_files: usize,
    pub received_files: usize,
    pub total_size: u64,
    pub total_size_formatted: String,
}

impl DashboardStats {
    pub fn from_rows(rows: &[DisplayRow]) -> Self {
        let count = |category: Category| rows.iter().filter(|r| r.category == category).count();
        let total_size = rows.iter().map(|r| r.size).sum();

        Self {
            total_files: rows.len(),
            processed_files: count(Category::Processed),
            received_files: count(Category::Received),
            total_size,
            total_size_formatted: format_size(total_size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(key: &str, size: u64, last_modified: &str) -> StorageObject {
        StorageObject {
            key: key.to_string(),
            last_modified: last_modified.to_string(),
            etag: "\"etag\"".to_string(),
            size,
            storage_class: "STANDARD".to_string(),
        }
    }

    fn sample_rows() -> Vec<DisplayRow> {
        let objects = vec![
            object("processed-tiss/glosa/2025/07/01/lote_a.zip", 1024, "2025-07-01T10:00:00Z"),
            object("processed-tiss/glosa/2025/07/02/lote_b.xml", 2048, "2025-07-02T10:00:00Z"),
            object("processed-tiss/glosa/2025/07/03/Relatorio.xlsx", 512, "2025-07-03T10:00:00Z"),
            object("incoming/lote_c.zip", 100, "2025-07-04T10:00:00Z"),
            object("incoming/recurso.pdf", 100, "2025-07-05T10:00:00Z"),
            object("incoming/planilha.xls", 100, "2025-07-06T10:00:00Z"),
            object("backup/lote_d.zip", 100, "2025-07-07T10:00:00Z"),
            object("backup/notes.txt", 100, "2025-07-08T10:00:00Z"),
            object("backup/2025/07/09/dump.xml", 100, "2025-07-09T10:00:00Z"),
            object("misc/LOTE_E.ZIP", 100, "2025-07-10T10:00:00Z"),
        ];
        build_rows(&objects)
    }

    #[test]
    fn unset_filter_matches_everything() {
        let rows = sample_rows();
        let filter = FilterState::default();
        assert!(filter.is_empty());
        assert_eq!(apply_filters(&rows, &filter).len(), 10);
    }

    #[test]
    fn category_only_filter() {
        let rows = sample_rows();
        let filter = FilterState {
            category: Some(Category::Processed),
            ..Default::default()
        };
        let visible = apply_filters(&rows, &filter);
        assert_eq!(visible.len(), 3);
        assert!(visible.iter().all(|r| r.category == Category::Processed));
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let rows = sample_rows();
        let filter = FilterState {
            search_term: "LoTe".to_string(),
            ..Default::default()
        };
        assert_eq!(apply_filters(&rows, &filter).len(), 5);
    }

    #[test]
    fn predicates_are_conjunctive() {
        let rows = sample_rows();
        let filter = FilterState {
            search_term: "lote".to_string(),
            category: Some(Category::Received),
            file_type: Some(FileType::Zip),
        };
        let visible = apply_filters(&rows, &filter);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].source_key, "incoming/lote_c.zip");

        let filter = FilterState {
            file_type: Some(FileType::Xlsx),
            ..Default::default()
        };
        assert_eq!(apply_filters(&rows, &filter).len(), 2);
    }

    #[test]
    fn build_rows_skips_placeholder_and_empty_objects() {
        let objects = vec![
            object("incoming/", 0, "2025-07-01T10:00:00Z"),
            object("incoming/empty.zip", 0, "2025-07-01T10:00:00Z"),
            object("incoming/real.zip", 10, "2025-07-01T10:00:00Z"),
        ];
        let rows = build_rows(&objects);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].file_name, "real.zip");
        assert_eq!(rows[0].formatted_size, "10 Bytes");
        assert_eq!(rows[0].formatted_date, "01/07/2025, 10:00");
    }

    #[test]
    fn build_rows_sorts_newest_first() {
        let objects = vec![
            object("a.zip", 1, "2025-01-01T00:00:00Z"),
            object("b.zip", 1, "not a date"),
            object("c.zip", 1, "2025-03-01T00:00:00Z"),
        ];
        let names: Vec<String> = build_rows(&objects)
            .into_iter()
            .map(|r| r.file_name)
            .collect();
        assert_eq!(names, vec!["c.zip", "a.zip", "b.zip"]);
    }

    #[test]
    fn stats_from_rows() {
        let rows = sample_rows();
        let stats = DashboardStats::from_rows(&rows);
        assert_eq!(stats.total_files, 10);
        assert_eq!(stats.processed_files, 3);
        assert_eq!(stats.received_files, 3);
        assert_eq!(stats.total_size, 1024 + 2048 + 512 + 700);
        assert_eq!(stats.total_size_formatted, "4.18 KB");
    }

    #[test]
    fn stats_for_empty_listing() {
        let stats = DashboardStats::from_rows(&[]);
        assert_eq!(stats.total_files, 0);
        assert_eq!(stats.total_size_formatted, "0 Bytes");
    }
}
