//! Reading and writing the playlist document.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::error::StoreError;
use super::model::{AnyDocument, Document};

/// Read and parse the document at `path`.
///
/// `Ok(None)` means there is no file yet; parse failures come back as
/// `StoreError::StoreCorrupt` so the caller can decide to start fresh.
pub(super) fn read_document(path: &Path) -> Result<Option<Document>, StoreError> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let doc: AnyDocument = serde_json::from_str(&text)?;
    Ok(Some(doc.into_document()))
}

/// Serialize `doc` and replace `path` with it. The bytes go to a sibling
/// temp file first, so a crash never leaves a half-written document behind.
/// The temp file is removed again when writing or renaming fails.
pub(super) fn write_document(path: &Path, doc: &Document) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(doc)?;
    let tmp = temp_path(path);
    if let Err(e) = write_and_swap(&tmp, path, json.as_bytes()) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}

fn write_and_swap(tmp: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut f = fs::File::create(tmp)?;
    f.write_all(bytes)?;
    f.write_all(b"\n")?;
    f.sync_all()?;
    drop(f);
    fs::rename(tmp, path)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
