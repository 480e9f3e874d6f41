//! Turns an uploaded CSV file into a header row and string records.
//!
//! Column checks belong to the domain; this only decodes the file.

use csv::ReaderBuilder;

use crate::domain::voucher::VoucherImportError;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A decoded sheet. Records may be shorter or longer than the header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    pub headers: Vec<String>,
    pub records: Vec<Vec<String>>,
}

/// # Errors
///
/// `EmptyFile` for an empty upload, `MalformedFile` when the bytes are not
/// valid UTF-8 CSV.
pub fn read_sheet(bytes: &[u8]) -> Result<Sheet, VoucherImportError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(VoucherImportError::EmptyFile);
    }

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| VoucherImportError::MalformedFile(e.to_string()))?
        .iter()
        .map(str::to_string)
        .collect();

    let records = reader
        .records()
        .map(|record| {
            record
                .map(|r| r.iter().map(str::to_string).collect())
                .map_err(|e| VoucherImportError::MalformedFile(e.to_string()))
        })
        .collect::<Result<Vec<Vec<String>>, _>>()?;

    Ok(Sheet { headers, records })
}
