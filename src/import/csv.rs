//! CSV parsing for import uploads
//!
//! The upload contract is deliberately narrow: comma-separated with a
//! header row, no quoting, no embedded newlines. The reader is configured
//! to match — quoting is disabled so commas split literally, rows may be
//! short or long, and every value is trimmed.

use csv::{ReaderBuilder, Trim};

use super::ImportError;

/// A parsed upload: trimmed header names plus the data rows in file order
#[derive(Debug, Clone)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Parse raw file text. Fails with `EmptyFile` unless there is a header
    /// line and at least one data row.
    pub fn parse(text: &str) -> Result<Self, ImportError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .quoting(false)
            .trim(Trim::All)
            .from_reader(text.as_bytes());

        let headers: Vec<String> = rdr
            .headers()
            .map_err(|e| ImportError::Parse(e.to_string()))?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record.map_err(|e| ImportError::Parse(e.to_string()))?;
            rows.push(record.iter().map(|v| v.to_string()).collect());
        }

        if headers.is_empty() || rows.is_empty() {
            return Err(ImportError::EmptyFile);
        }

        Ok(Self { headers, rows })
    }

    /// Index of a header by exact name; duplicate headers resolve to the
    /// first occurrence.
    pub fn header_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header_and_rows() {
        let table = CsvTable::parse("Name, Host ,Port\nweb1, 10.0.0.1 ,80\n").unwrap();
        assert_eq!(table.headers, vec!["Name", "Host", "Port"]);
        assert_eq!(table.rows, vec![vec!["web1", "10.0.0.1", "80"]]);
    }

    #[test]
    fn test_empty_file_rejected() {
        assert!(matches!(CsvTable::parse(""), Err(ImportError::EmptyFile)));
        assert!(matches!(
            CsvTable::parse("Name,Host\n"),
            Err(ImportError::EmptyFile)
        ));
    }

    #[test]
    fn test_short_and_long_rows_tolerated() {
        let table = CsvTable::parse("a,b,c\n1,2\n1,2,3,4\n").unwrap();
        assert_eq!(table.rows[0], vec!["1", "2"]);
        assert_eq!(table.rows[1], vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_quotes_are_not_interpreted() {
        // quoted commas are out of contract; the quote chars pass through
        let table = CsvTable::parse("name,notes\nweb1,\"a,b\"\n").unwrap();
        assert_eq!(table.rows[0], vec!["web1", "\"a", "b\""]);
    }

    #[test]
    fn test_duplicate_headers_resolve_to_first() {
        let table = CsvTable::parse("name,name\nx,y\n").unwrap();
        assert_eq!(table.header_index("name"), Some(0));
    }
}
