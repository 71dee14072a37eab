use adlens_core::AdLensResult;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// A delimited source exactly as read: the header row plus every data row
/// as uninterpreted strings. Nothing here is trimmed of meaning yet; the
/// normalization pass decides what the labels and cells denote.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn from_path(path: &Path) -> AdLensResult<Self> {
        debug!(path = %path.display(), "reading raw report");
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Read a comma-delimited table from any reader. Cells are whitespace
    /// trimmed. Rows may be ragged; a row shorter than the header simply
    /// has no cell for the trailing columns.
    pub fn from_reader<R: Read>(reader: R) -> AdLensResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        metrics::counter!("ingest.rows_read").increment(rows.len() as u64);
        Ok(Self { headers, rows })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_reader_splits_headers_and_rows() {
        let data = "Campaign Name,Results\nSummer Push,10\nBrand Lift,4\n";
        let table = RawTable::from_reader(data.as_bytes()).unwrap();

        assert_eq!(table.headers, vec!["Campaign Name", "Results"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0], vec!["Summer Push", "10"]);
    }

    #[test]
    fn test_cells_are_trimmed() {
        let data = "Campaign Name , Results\n  Summer Push ,  10 \n";
        let table = RawTable::from_reader(data.as_bytes()).unwrap();

        assert_eq!(table.headers, vec!["Campaign Name", "Results"]);
        assert_eq!(table.rows[0], vec!["Summer Push", "10"]);
    }

    #[test]
    fn test_ragged_rows_are_accepted() {
        let data = "a,b,c\n1,2,3\n4,5\n6\n";
        let table = RawTable::from_reader(data.as_bytes()).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.rows[1], vec!["4", "5"]);
        assert_eq!(table.rows[2], vec!["6"]);
    }

    #[test]
    fn test_empty_input_has_no_rows() {
        let table = RawTable::from_reader("".as_bytes()).unwrap();
        assert!(table.is_empty());
        assert!(table.headers.is_empty());
    }
}
