//! Snapshot file writers
//!
//! Writes the row batch to a CSV or Parquet file, creating the output
//! directory first.

use super::schema::rows_to_batch;
use crate::error::{Error, Result, ResultExt};
use crate::types::AnimeRow;
use arrow::csv::WriterBuilder;
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// File format of the snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Comma-separated values with a header row
    #[default]
    Csv,
    /// Parquet file
    Parquet,
}

impl OutputFormat {
    /// File extension for this format
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Parquet => "parquet",
        }
    }

    /// Default snapshot location, relative to the working directory
    pub fn default_path(self) -> PathBuf {
        PathBuf::from(format!("data/anime_data.{}", self.extension()))
    }
}

/// Writes a complete row collection in one go
pub trait RowWriter {
    /// Write all rows, replacing any previous file; returns rows written
    fn write(&self, rows: &[AnimeRow]) -> Result<usize>;

    /// Where the rows go
    fn path(&self) -> &Path;
}

/// Build the writer for a format
pub fn writer_for(format: OutputFormat, path: impl Into<PathBuf>) -> Box<dyn RowWriter> {
    match format {
        OutputFormat::Csv => Box::new(CsvRowWriter::new(path)),
        OutputFormat::Parquet => Box::new(ParquetRowWriter::new(path)),
    }
}

/// Create the directory a file will live in
pub fn create_parent_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    }
    Ok(())
}

// ============================================================================
// CSV
// ============================================================================

/// CSV writer: header row, UTF-8, nulls as empty cells
#[derive(Debug, Clone)]
pub struct CsvRowWriter {
    path: PathBuf,
}

impl CsvRowWriter {
    /// Create a comma-delimited writer
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Render a batch to CSV bytes
    fn render(batch: &RecordBatch) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        {
            let mut writer = WriterBuilder::new().with_header(true).build(&mut buf);
            writer.write(batch)?;
        }
        Ok(buf)
    }
}

impl RowWriter for CsvRowWriter {
    fn write(&self, rows: &[AnimeRow]) -> Result<usize> {
        let batch = rows_to_batch(rows)?;
        // Render fully before touching the file so a failure leaves no partial CSV
        let bytes = Self::render(&batch)?;

        create_parent_dir(&self.path)?;
        fs::write(&self.path, bytes)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(batch.num_rows())
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

// ============================================================================
// Parquet
// ============================================================================

/// Parquet writer with the same columns as the CSV output, Snappy-compressed
#[derive(Debug, Clone)]
pub struct ParquetRowWriter {
    path: PathBuf,
}

impl ParquetRowWriter {
    /// Create a writer for `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn properties() -> WriterProperties {
        WriterProperties::builder()
            .set_compression(Compression::SNAPPY)
            .build()
    }
}

impl RowWriter for ParquetRowWriter {
    fn write(&self, rows: &[AnimeRow]) -> Result<usize> {
        let batch = rows_to_batch(rows)?;

        create_parent_dir(&self.path)?;
        let file = File::create(&self.path)
            .map_err(|e| Error::output(format!("Failed to create {}: {e}", self.path.display())))?;

        let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(Self::properties()))?;
        writer.write(&batch)?;
        writer.close()?;

        Ok(batch.num_rows())
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
