use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::Result;
use crate::resource::ARCHIVE_EXTENSION;

/// Deletes every `*.zip` file directly inside `dir`.
///
/// Returns the number of files removed. Running it on an already clean
/// directory is a no-op.
pub async fn cleanup(dir: &Path) -> Result<usize> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut removed = 0;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !entry.file_type().await?.is_file() {
            continue;
        }
        let is_archive = path
            .extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(ARCHIVE_EXTENSION))
            .unwrap_or(false);
        if !is_archive {
            continue;
        }

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!(?path, "removed leftover archive");
                removed += 1;
            }
            // a worker may have removed it in the meantime
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                warn!(?path, "could not remove leftover archive: {}", e);
            }
        }
    }

    Ok(removed)
}
