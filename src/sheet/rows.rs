use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::Path;

use crate::error::{ConfigError, RowError};

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Streaming row reader over a product spreadsheet.
///
/// Yields the header row once via [`headers`](Self::headers) and data rows
/// through the `Iterator` impl. The iterator is forward-only and single-pass:
/// once consumed it yields nothing more, and re-reading requires reopening
/// the source.
///
/// `.csv` input is streamed straight from the file. `.xlsx` input goes
/// through the first worksheet, which is buffered in memory as converted CSV
/// text before streaming: the xlsx reader has no row-streaming mode, so only
/// the csv path avoids holding the whole sheet at once.
pub struct RowSource {
    headers: Vec<String>,
    reader: csv::Reader<Box<dyn Read>>,
}

impl RowSource {
    pub fn open(path: &Path) -> Result<Self, ConfigError> {
        let input: Box<dyn Read> = if is_xlsx(path)? {
            Box::new(Cursor::new(xlsx_to_csv(path)?))
        } else {
            let file = File::open(path).map_err(|e| {
                ConfigError::Sheet(format!("failed to open {}: {}", path.display(), e))
            })?;
            Box::new(file)
        };
        Self::from_reader(input)
    }

    fn from_reader(input: Box<dyn Read>) -> Result<Self, ConfigError> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(input);
        let headers = reader
            .headers()
            .map_err(|e| ConfigError::Sheet(format!("failed to read header row: {}", e)))?
            .iter()
            .map(|header| header.trim().to_string())
            .collect();
        Ok(Self { headers, reader })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }
}

impl Iterator for RowSource {
    type Item = Result<Vec<String>, RowError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut record = csv::StringRecord::new();
        match self.reader.read_record(&mut record) {
            Ok(true) => Some(Ok(record.iter().map(|cell| cell.to_string()).collect())),
            Ok(false) => None,
            Err(e) => Some(Err(RowError::from(e))),
        }
    }
}

/// Decide the input format: by extension when it is recognizable, otherwise
/// by sniffing the leading bytes.
fn is_xlsx(path: &Path) -> Result<bool, ConfigError> {
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        match ext.to_ascii_lowercase().as_str() {
            "xlsx" => return Ok(true),
            "csv" | "txt" => return Ok(false),
            _ => {}
        }
    }
    let mut prefix = [0u8; 8192];
    let mut file = File::open(path)
        .map_err(|e| ConfigError::Sheet(format!("failed to open {}: {}", path.display(), e)))?;
    let read = read_prefix(&mut file, &mut prefix)
        .map_err(|e| ConfigError::Sheet(format!("failed to read {}: {}", path.display(), e)))?;
    let mime = infer::get(&prefix[..read]).map(|kind| kind.mime_type());
    Ok(matches!(mime, Some(XLSX_MIME) | Some("application/zip")))
}

fn read_prefix(file: &mut File, buffer: &mut [u8]) -> io::Result<usize> {
    let mut total = 0;
    while total < buffer.len() {
        let n = file.read(&mut buffer[total..])?;
        if n == 0 {
            break;
        }
        total += n;
    }
    Ok(total)
}

/// Convert the first worksheet of an xlsx file to CSV text so the same
/// streaming reader handles both input formats.
fn xlsx_to_csv(path: &Path) -> Result<String, ConfigError> {
    let document = ooxml::document::SpreadsheetDocument::open(path)
        .map_err(|e| ConfigError::Sheet(format!("failed to open xlsx: {}", e)))?;
    let workbook = document.get_workbook();
    let sheet_names = workbook.worksheet_names();
    let first = sheet_names
        .first()
        .ok_or_else(|| ConfigError::Sheet("no sheets found in xlsx file".to_string()))?;
    let worksheet = workbook
        .get_worksheet_by_name(first)
        .ok_or_else(|| ConfigError::Sheet(format!("sheet '{}' not found", first)))?;

    let mut output = Vec::new();
    {
        let mut writer = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(&mut output);
        for row in worksheet.rows() {
            let cells: Vec<String> = row
                .map(|cell| cell.to_string().unwrap_or_default())
                .collect();
            writer
                .write_record(&cells)
                .map_err(|e| ConfigError::Sheet(format!("failed to convert sheet row: {}", e)))?;
        }
        writer
            .flush()
            .map_err(|e| ConfigError::Sheet(format!("failed to flush csv writer: {}", e)))?;
    }
    String::from_utf8(output)
        .map_err(|e| ConfigError::Sheet(format!("sheet is not valid UTF-8: {}", e)))
}
