use std::path::{Path, PathBuf};
use crate::errors::CityScanError;
use tracing::{info, warn};

pub const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif"];

/// Lowercased extension after the last dot, if any.
fn extension(filename: &str) -> Option<String> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
}

/// Extension check on the client-supplied name only; content is not sniffed here.
pub fn allowed_file(filename: &str) -> bool {
    extension(filename).is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
}

/// Reduce a client-supplied filename to a safe basename: path components
/// dropped, whitespace collapsed to `_`, only `[A-Za-z0-9_.-]` kept, and
/// leading/trailing dots and underscores trimmed. May return an empty string.
pub fn secure_filename(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let joined = base.split_whitespace().collect::<Vec<_>>().join("_");
    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect();
    kept.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Name the upload is stored under: a unique prefix plus the sanitized name,
/// falling back to `upload.<ext>` when sanitizing lost the extension.
pub fn stored_filename(filename: &str) -> String {
    let safe = secure_filename(filename);
    let safe = if allowed_file(&safe) {
        safe
    } else {
        format!("upload.{}", extension(filename).unwrap_or_else(|| "bin".to_string()))
    };
    format!("{}_{}", uuid::Uuid::new_v4().simple(), safe)
}

/// An uploaded image written to the upload directory. The file is removed
/// when the guard is dropped, whichever way the request ends.
#[derive(Debug)]
pub struct TempUpload {
    path: PathBuf,
}

impl TempUpload {
    pub async fn persist(dir: &Path, filename: &str, bytes: &[u8]) -> Result<Self, CityScanError> {
        let upload = Self { path: dir.join(stored_filename(filename)) };
        tokio::fs::write(&upload.path, bytes).await?;
        Ok(upload)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempUpload {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => info!(path = %self.path.display(), "Cleaned up temporary file"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), error = %e, "Failed to remove temporary file"),
        }
    }
}
