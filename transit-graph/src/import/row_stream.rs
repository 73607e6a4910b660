use super::{FieldSpec, ImportError, Record};
use csv::{ReaderBuilder, StringRecord};
use std::{collections::HashMap, fs::File, io::Read, path::Path};

/// a lazy, forward-only stream of [`Record`]s extracted from a comma-delimited
/// file with a header row.
///
/// cells are split on commas with no quote or escape handling. every row
/// must have as many cells as the header; the first row that does not ends
/// the stream with [`ImportError::MalformedRow`]. rows rejected by a field's
/// inclusion predicate are skipped and counted.
///
/// the underlying reader is owned by the stream and released when the
/// stream is dropped, whether or not it was read to the end.
pub struct RowStream<R = File> {
    file: String,
    reader: csv::Reader<R>,
    columns: Vec<(usize, FieldSpec)>,
    row: StringRecord,
    rows_read: usize,
    rejected: usize,
    finished: bool,
}

impl RowStream<File> {
    /// opens `path` and resolves every field to a header column.
    pub fn open(path: &Path, fields: &[FieldSpec]) -> Result<RowStream<File>, ImportError> {
        let file = path.display().to_string();
        let reader = reader_builder()
            .from_path(path)
            .map_err(|source| ImportError::OpenSourceError {
                file: file.clone(),
                source,
            })?;
        RowStream::new(file, reader, fields)
    }
}

impl<R: Read> RowStream<R> {
    /// streams rows from any reader, labelled `file` in errors.
    pub fn from_reader(file: &str, rdr: R, fields: &[FieldSpec]) -> Result<RowStream<R>, ImportError> {
        RowStream::new(file.to_string(), reader_builder().from_reader(rdr), fields)
    }

    fn new(file: String, mut reader: csv::Reader<R>, fields: &[FieldSpec]) -> Result<RowStream<R>, ImportError> {
        let header = reader
            .headers()
            .map_err(|source| ImportError::HeaderError {
                file: file.clone(),
                source,
            })?;
        let lookup: HashMap<&str, usize> = header
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.trim_start_matches('\u{feff}').trim(), idx))
            .collect();
        let columns = fields
            .iter()
            .map(|field| match lookup.get(field.name()) {
                Some(idx) => Ok((*idx, field.clone())),
                None => Err(ImportError::MissingColumn {
                    file: file.clone(),
                    column: field.name().to_string(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RowStream {
            file,
            reader,
            columns,
            row: StringRecord::new(),
            rows_read: 0,
            rejected: 0,
            finished: false,
        })
    }

    /// data rows read so far, including rejected ones
    pub fn rows_read(&self) -> usize {
        self.rows_read
    }

    /// data rows dropped so far by an inclusion predicate
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    fn line(&self) -> u64 {
        self.row.position().map(|p| p.line()).unwrap_or_default()
    }

    /// builds the record for the current row, or `None` if a field rejects it
    fn extract(&self) -> Result<Option<Record>, ImportError> {
        let mut record = Record::new();
        for (idx, field) in self.columns.iter() {
            let raw = self.row.get(*idx).unwrap_or_default();
            match field.extract(raw) {
                Ok(Some(value)) => {
                    record.insert(field.name().to_string(), value);
                }
                Ok(None) => return Ok(None),
                Err(message) => {
                    return Err(ImportError::FieldTransformError {
                        file: self.file.clone(),
                        line: self.line(),
                        field: field.name().to_string(),
                        message,
                    })
                }
            }
        }
        Ok(Some(record))
    }
}

impl<R: Read> Iterator for RowStream<R> {
    type Item = Result<Record, ImportError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        loop {
            match self.reader.read_record(&mut self.row) {
                Ok(false) => {
                    self.finished = true;
                    return None;
                }
                Err(source) => {
                    self.finished = true;
                    let line = source
                        .position()
                        .map(|p| p.line())
                        .unwrap_or_else(|| self.reader.position().line());
                    return Some(Err(ImportError::MalformedRow {
                        file: self.file.clone(),
                        line,
                        source,
                    }));
                }
                Ok(true) => {
                    self.rows_read += 1;
                    match self.extract() {
                        Ok(Some(record)) => return Some(Ok(record)),
                        Ok(None) => self.rejected += 1,
                        Err(e) => {
                            self.finished = true;
                            return Some(Err(e));
                        }
                    }
                }
            }
        }
    }
}

fn reader_builder() -> ReaderBuilder {
    let mut builder = ReaderBuilder::new();
    builder
        .delimiter(b',')
        .has_headers(true)
        .quoting(false)
        .flexible(false);
    builder
}
