//! Output chunking
//!
//! Large converted files are split into fixed-size chunks for ingestion:
//! `slice_20240319.json` becomes `slice_20240319_0.json`,
//! `slice_20240319_1.json`, ... of at most `chunk_size` elements each,
//! preserving element order.

use crate::{Error, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::info;

/// Summary of one split operation
#[derive(Debug, Clone)]
pub struct SplitReport {
    /// Chunk files written, in order
    pub chunks: Vec<PathBuf>,
    /// Total elements across all chunks
    pub total_elements: usize,
}

/// Split a JSON array file into sibling chunk files.
///
/// # Errors
///
/// Returns a fatal [`Error`] when the file is unreadable, not a JSON array,
/// the chunk size is zero, or a chunk cannot be written.
pub fn split_file(path: &Path, chunk_size: usize) -> Result<SplitReport> {
    let path_display = path.display().to_string();
    if chunk_size == 0 {
        return Err(Error::split(&path_display, "chunk size must be at least 1"));
    }

    let content =
        std::fs::read_to_string(path).map_err(|e| Error::split(&path_display, e.to_string()))?;
    let parsed: Value =
        serde_json::from_str(&content).map_err(|e| Error::split(&path_display, e.to_string()))?;
    let Value::Array(elements) = parsed else {
        return Err(Error::split(&path_display, "expected a JSON array"));
    };

    info!(path = %path_display, elements = elements.len(), chunk_size, "splitting");

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| Error::split(&path_display, "path has no file stem"))?;
    let parent = path.parent().unwrap_or_else(|| Path::new("."));

    let total_elements = elements.len();
    let mut chunks = Vec::new();

    for (index, chunk) in elements.chunks(chunk_size).enumerate() {
        let chunk_path = parent.join(format!("{stem}_{index}.json"));
        let json = serde_json::to_string_pretty(chunk)
            .map_err(|e| Error::split(&path_display, e.to_string()))?;
        std::fs::write(&chunk_path, json)
            .map_err(|e| Error::output(chunk_path.display().to_string(), e.to_string()))?;
        info!(chunk = %chunk_path.display(), elements = chunk.len(), "chunk written");
        chunks.push(chunk_path);
    }

    Ok(SplitReport {
        chunks,
        total_elements,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write_array(dir: &tempfile::TempDir, name: &str, value: &Value) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, serde_json::to_string(value).unwrap()).unwrap();
        path
    }

    #[test]
    fn splits_into_ordered_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_array(&dir, "data.json", &json!([1, 2, 3, 4, 5]));

        let report = split_file(&path, 2).unwrap();
        assert_eq!(report.total_elements, 5);
        assert_eq!(report.chunks.len(), 3);
        assert_eq!(report.chunks[0], dir.path().join("data_0.json"));

        let first: Vec<i64> =
            serde_json::from_str(&std::fs::read_to_string(&report.chunks[0]).unwrap()).unwrap();
        let last: Vec<i64> =
            serde_json::from_str(&std::fs::read_to_string(&report.chunks[2]).unwrap()).unwrap();
        assert_eq!(first, vec![1, 2]);
        assert_eq!(last, vec![5]);
    }

    #[test]
    fn empty_array_produces_no_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_array(&dir, "empty.json", &json!([]));

        let report = split_file(&path, 50).unwrap();
        assert_eq!(report.total_elements, 0);
        assert!(report.chunks.is_empty());
    }

    #[test]
    fn non_array_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_array(&dir, "object.json", &json!({"not": "an array"}));

        let err = split_file(&path, 10).unwrap_err();
        assert!(err.to_string().contains("expected a JSON array"));
    }

    #[test]
    fn zero_chunk_size_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_array(&dir, "data.json", &json!([1]));

        assert!(split_file(&path, 0).is_err());
    }

    #[test]
    fn missing_file_is_fatal() {
        assert!(split_file(Path::new("/not/here.json"), 10).is_err());
    }
}
