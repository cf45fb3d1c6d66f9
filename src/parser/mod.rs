//! Parser layer for reading tabular data formats

mod csv;
mod excel;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::config::Config;
use crate::model::Table;

pub use self::csv::CsvParser;
pub use self::excel::ExcelParser;

/// Trait for parsing tabular data files
pub trait Parser: Send + Sync {
    /// Parse a file and return a Table
    fn parse(&self, path: &Path, config: &Config) -> Result<Table>;

    /// Check if this parser can handle the given file extension
    fn supports_extension(&self, ext: &str) -> bool;
}

/// Factory for creating parsers based on file extension
pub struct ParserFactory {
    parsers: Vec<Box<dyn Parser>>,
}

impl Default for ParserFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserFactory {
    /// Create a new parser factory with all supported parsers
    pub fn new() -> Self {
        Self {
            parsers: vec![Box::new(CsvParser), Box::new(ExcelParser)],
        }
    }

    /// Get a parser for the given file path
    ///
    /// Files without an extension are sniffed by content.
    pub fn get_parser(&self, path: &Path) -> Result<&dyn Parser> {
        let ext = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => ext.to_lowercase(),
            None => detect_format(path)
                .with_context(|| format!("Failed to detect format of {}", path.display()))?
                .to_string(),
        };

        for parser in &self.parsers {
            if parser.supports_extension(&ext) {
                return Ok(parser.as_ref());
            }
        }

        bail!("Unsupported file format: {}", ext)
    }

    /// Parse a file using the appropriate parser
    pub fn parse(&self, path: &Path, config: &Config) -> Result<Table> {
        let parser = self.get_parser(path)?;
        let table = parser.parse(path, config)?;
        log::info!(
            "loaded {} ({} rows, {} columns)",
            path.display(),
            table.row_count(),
            table.column_count()
        );
        Ok(table)
    }
}

/// Detect file format from content (for files without extension)
pub fn detect_format(path: &Path) -> Result<&'static str> {
    let mut file =
        File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
    let mut buffer = [0u8; 4];
    let bytes_read = file.read(&mut buffer)?;

    if bytes_read == 4 {
        // Excel ZIP container (xlsx, xlsm)
        if &buffer == b"PK\x03\x04" {
            return Ok("xlsx");
        }
        // OLE compound document (xls)
        if &buffer == b"\xD0\xCF\x11\xE0" {
            return Ok("xls");
        }
    }

    Ok("csv")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_get_parser_by_extension() {
        let factory = ParserFactory::new();
        assert!(factory.get_parser(Path::new("a.CSV")).is_ok());
        assert!(factory.get_parser(Path::new("a.xlsx")).is_ok());
        assert!(factory.get_parser(Path::new("a.ods")).is_ok());
        assert!(factory.get_parser(Path::new("a.parquet")).is_err());
    }

    #[test]
    fn test_detect_format() {
        let dir = tempfile::tempdir().unwrap();

        let zip = dir.path().join("book");
        std::fs::File::create(&zip)
            .unwrap()
            .write_all(b"PK\x03\x04rest")
            .unwrap();
        assert_eq!(detect_format(&zip).unwrap(), "xlsx");

        let text = dir.path().join("data");
        std::fs::File::create(&text)
            .unwrap()
            .write_all(b"a,b\n1,2\n")
            .unwrap();
        assert_eq!(detect_format(&text).unwrap(), "csv");
    }
}
