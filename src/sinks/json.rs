use std::path::Path;

use tokio::io::{AsyncWriteExt, BufWriter};

use crate::domain::RunResult;
use crate::error::{AppError, AppResult, SinkError};

/// Writes the run as pretty-printed JSON, creating parent directories.
pub(super) async fn write_report(result: &RunResult, path: &Path) -> AppResult<()> {
    let write_err = |err: std::io::Error| {
        AppError::sink(SinkError::WriteReport {
            path: path.to_path_buf(),
            source: err,
        })
    };
    let json = serde_json::to_vec_pretty(result)
        .map_err(|err| AppError::sink(SinkError::SerializeReport { source: err }))?;

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
    }
    let file = tokio::fs::File::create(path).await.map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&json).await.map_err(write_err)?;
    writer.write_all(b"\n").await.map_err(write_err)?;
    writer.flush().await.map_err(write_err)?;
    Ok(())
}

/// Reads a report written by [`write_report`].
///
/// # Errors
///
/// Returns an error when the file cannot be read or is not a valid report.
pub async fn read_report(path: &Path) -> AppResult<RunResult> {
    let bytes = tokio::fs::read(path).await?;
    Ok(serde_json::from_slice(&bytes)?)
}
