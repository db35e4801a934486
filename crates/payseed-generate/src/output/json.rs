use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::debug;

use payseed_core::Dataset;

use crate::errors::GenerationError;
use crate::model::TableReport;

/// File name of the run report written next to the tables.
pub const REPORT_FILE_NAME: &str = "generation_report.json";

/// Write every table of `dataset` as `<dir>/<table>.json`.
///
/// The directory must already exist; creating it is the caller's job.
/// Tables are written in dependency order, empty ones included.
pub fn write_dataset(dir: &Path, dataset: &Dataset) -> Result<Vec<TableReport>, GenerationError> {
    if !dir.is_dir() {
        return Err(GenerationError::MissingOutputDir(dir.to_path_buf()));
    }

    let mut reports = Vec::new();
    for document in dataset.documents()? {
        let table = document.kind.table_name();
        let path = dir.join(format!("{table}.json"));
        write_bytes_atomic(&path, &document.bytes)?;
        debug!(table, rows = document.rows, path = %path.display(), "table written");

        reports.push(TableReport {
            table: table.to_string(),
            rows: document.rows as u64,
            bytes: document.bytes.len() as u64,
            sha256: hex::encode(Sha256::digest(&document.bytes)),
        });
    }
    Ok(reports)
}

pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<(), GenerationError> {
    let data = serde_json::to_vec_pretty(value)?;
    write_bytes_atomic(path, &data)
}

fn write_bytes_atomic(path: &Path, data: &[u8]) -> Result<(), GenerationError> {
    let tmp_path = temp_path(path)?;
    let mut file = OpenOptions::new()
        .create(true)
        .truncate(true)
        .write(true)
        .open(&tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;

    std::fs::rename(&tmp_path, path)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            sync_dir(parent)?;
        }
    }

    Ok(())
}

fn temp_path(path: &Path) -> Result<PathBuf, GenerationError> {
    let file_name = path.file_name().ok_or_else(|| {
        GenerationError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid path for atomic write: {}", path.display()),
        ))
    })?;
    let tmp_name = format!("{}.tmp", file_name.to_string_lossy());
    Ok(path.with_file_name(tmp_name))
}

fn sync_dir(path: &Path) -> io::Result<()> {
    let dir = OpenOptions::new().read(true).open(path)?;
    dir.sync_all()
}
