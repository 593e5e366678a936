//! Display rows derived from storage objects.
//!
//! Rows are never authoritative: they are rebuilt from the listing every time
//! it is refreshed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Bucket area an object belongs to, derived from its key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Processed,
    Received,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Processed => "Processed",
            Category::Received => "Received",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "processed" => Ok(Category::Processed),
            "received" | "incoming" => Ok(Category::Received),
            "other" => Ok(Category::Other),
            other => Err(format!(
                "Invalid category '{}'. Must be: processed, received, or other",
                other
            )),
        }
    }
}

/// File type derived from the extension of the file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileType {
    #[serde(rename = "ZIP")]
    Zip,
    #[serde(rename = "XLSX")]
    Xlsx,
    #[serde(rename = "XML")]
    Xml,
    #[serde(rename = "PDF")]
    Pdf,
    Other,
}

impl FileType {
    /// Map a file name to its type using the lowercase extension.
    pub fn from_file_name(file_name: &str) -> Self {
        let Some(extension) = crate::path::file_extension(file_name) else {
            return FileType::Other;
        };

        match extension.as_str() {
            "zip" => FileType::Zip,
            "xlsx" | "xls" => FileType::Xlsx,
            "xml" => FileType::Xml,
            "pdf" => FileType::Pdf,
            _ => FileType::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileType::Zip => "ZIP",
            FileType::Xlsx => "XLSX",
            FileType::Xml => "XML",
            FileType::Pdf => "PDF",
            FileType::Other => "Other",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FileType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "zip" => Ok(FileType::Zip),
            "xlsx" | "xls" | "excel" => Ok(FileType::Xlsx),
            "xml" => Ok(FileType::Xml),
            "pdf" => Ok(FileType::Pdf),
            "other" => Ok(FileType::Other),
            other => Err(format!(
                "Invalid file type '{}'. Must be: zip, xlsx, xml, pdf, or other",
                other
            )),
        }
    }
}

/// One listing row ready for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRow {
    pub file_name: String,
    pub category: Category,
    /// `DD/MM/YYYY` taken from a `YYYY/MM/DD` segment of the key
    pub extracted_date: Option<String>,
    pub file_type: FileType,
    pub size: u64,
    pub formatted_size: String,
    pub last_modified: String,
    pub formatted_date: String,
    pub source_key: String,
}
