use std::fs::File;
use std::path::Path;

use tracing::debug;
use zip::ZipArchive;

use crate::core::error::{LauncherError, LauncherResult};

/// Extract a zip archive into `dest_dir`, creating it if necessary.
///
/// Existing files are overwritten; pack updates rely on this to force
/// managed content back to the server-side state.
pub fn extract_zip(archive_path: &Path, dest_dir: &Path) -> LauncherResult<()> {
    std::fs::create_dir_all(dest_dir).map_err(|e| LauncherError::io(dest_dir, e))?;

    let file = File::open(archive_path).map_err(|e| LauncherError::io(archive_path, e))?;
    let mut archive = ZipArchive::new(file)?;
    archive.extract(dest_dir)?;

    debug!("Extracted {:?} -> {:?}", archive_path, dest_dir);
    Ok(())
}
