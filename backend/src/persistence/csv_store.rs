//! Append-only CSV history of successful extractions.
//!
//! The first row ever written defines the header. Later rows are written in
//! their own key order with no column reconciliation, so extractions with a
//! different key set produce ragged rows. That is kept as-is; a mismatch is
//! logged and reported as [`AppendOutcome::HeaderMismatch`]. A header that
//! cannot be read at all does not stop the append either.
//!
//! The file is opened and closed on every append. Concurrent appends are not
//! serialized.

use common::ExtractedFields;
use csv::{ReaderBuilder, Terminator, WriterBuilder};
use log::warn;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("cannot write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendOutcome {
    /// The file did not exist; header and row were written.
    Created,
    /// Row appended under a header with the same labels in the same order.
    Appended,
    /// Row appended, but its labels differ from the existing header.
    HeaderMismatch { header: Vec<String> },
    /// Row appended to an existing file whose header could not be read.
    UnreadableHeader,
}

#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, fields: &ExtractedFields) -> Result<AppendOutcome, PersistError> {
        let labels = fields.labels();
        let exists = self.path.exists();

        let outcome = if exists {
            match self.read_header() {
                Ok(header) if header == labels => AppendOutcome::Appended,
                Ok(header) => {
                    warn!(
                        "Row labels do not match the header of {}; columns will not line up",
                        self.path.display()
                    );
                    AppendOutcome::HeaderMismatch { header }
                }
                Err(e) => {
                    warn!(
                        "Cannot read the header of {}, appending anyway: {}",
                        self.path.display(),
                        e
                    );
                    AppendOutcome::UnreadableHeader
                }
            }
        } else {
            AppendOutcome::Created
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| self.io_error(source))?;
        let mut writer = WriterBuilder::new()
            .terminator(Terminator::Any(b'\n'))
            .from_writer(file);

        if !exists {
            writer.write_record(&labels)?;
        }
        writer.write_record(fields.cells())?;
        writer.flush().map_err(|source| self.io_error(source))?;

        Ok(outcome)
    }

    fn read_header(&self) -> Result<Vec<String>, PersistError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)?;
        Ok(reader.headers()?.iter().map(str::to_string).collect())
    }

    fn io_error(&self, source: std::io::Error) -> PersistError {
        PersistError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}
