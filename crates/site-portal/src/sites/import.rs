use std::io::Read;
use std::path::Path;

use serde_json::{Map, Value};

use crate::evaluation::SiteInputs;

use super::domain::SiteSubmission;

#[derive(Debug)]
pub enum SiteImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingNameColumn,
}

impl std::fmt::Display for SiteImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SiteImportError::Io(err) => write!(f, "failed to read site sheet: {}", err),
            SiteImportError::Csv(err) => write!(f, "invalid site CSV data: {}", err),
            SiteImportError::MissingNameColumn => {
                write!(f, "site sheet needs a 'name' column")
            }
        }
    }
}

impl std::error::Error for SiteImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SiteImportError::Io(err) => Some(err),
            SiteImportError::Csv(err) => Some(err),
            SiteImportError::MissingNameColumn => None,
        }
    }
}

impl From<std::io::Error> for SiteImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for SiteImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads a spreadsheet of candidate sites, one row per site.
///
/// `name` is required and `location` optional; every other header is treated as
/// an evaluation input keyed by its form field name (`gasVolume`, `zoning`, ...).
/// Blank cells are left unset.
pub struct SiteCsvImporter;

impl SiteCsvImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<SiteSubmission>, SiteImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<SiteSubmission>, SiteImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let name_column = column(&headers, "name").ok_or(SiteImportError::MissingNameColumn)?;
        let location_column = column(&headers, "location");

        let mut submissions = Vec::new();
        for row in csv_reader.records() {
            let row = row?;
            let name = row.get(name_column).unwrap_or_default().to_string();
            if name.is_empty() {
                continue;
            }

            let location = location_column
                .and_then(|index| row.get(index))
                .unwrap_or_default()
                .to_string();

            let mut bag = Map::new();
            for (index, (header, cell)) in headers.iter().zip(row.iter()).enumerate() {
                if index == name_column || Some(index) == location_column || cell.is_empty() {
                    continue;
                }
                bag.insert(header.to_string(), Value::String(cell.to_string()));
            }

            submissions.push(SiteSubmission {
                name,
                location,
                inputs: SiteInputs::from_attribute_bag(Value::Object(bag)),
            });
        }

        Ok(submissions)
    }
}

fn column(headers: &csv::StringRecord, wanted: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case(wanted))
}
