// ─── Java Runtime ───
// Provisions the bundled Temurin 17 runtime on first launch.

use std::path::PathBuf;

use tracing::info;

use crate::core::archive;
use crate::core::config::{self, LauncherConfig};
use crate::core::downloader::Downloader;
use crate::core::error::{LauncherError, LauncherResult};

const RUNTIME_URL: &str = "https://github.com/adoptium/temurin17-binaries/releases/download/jdk-17.0.16%2B8/OpenJDK17U-jdk_x64_windows_hotspot_17.0.16_8.zip";

/// Top-level directory inside the runtime archive.
const RUNTIME_DIR_NAME: &str = "jdk-17.0.16+8";

/// Ensure a usable Java binary exists and return its path.
///
/// A previously provisioned runtime is reused as long as the recorded binary
/// still exists; otherwise the archive is fetched and unpacked under the
/// data directory and the config is updated in place.
pub async fn ensure_runtime(
    config: &mut LauncherConfig,
    downloader: &Downloader,
) -> LauncherResult<PathBuf> {
    if config.java_downloaded && !config.java_path.is_empty() {
        let existing = PathBuf::from(&config.java_path);
        if existing.exists() {
            return Ok(existing);
        }
        info!("Recorded Java binary is gone, re-provisioning: {:?}", existing);
    }

    let install_root = config::data_dir()?.join("java17");
    std::fs::create_dir_all(&install_root).map_err(|e| LauncherError::io(&install_root, e))?;

    let archive_path = install_root.join("runtime.zip");
    info!("Downloading Java runtime from {}", RUNTIME_URL);
    downloader.download_file(RUNTIME_URL, &archive_path, None).await?;
    archive::extract_zip(&archive_path, &install_root)?;
    let _ = std::fs::remove_file(&archive_path);

    let binary_name = if cfg!(target_os = "windows") { "java.exe" } else { "java" };
    let java_binary = install_root.join(RUNTIME_DIR_NAME).join("bin").join(binary_name);
    if !java_binary.exists() {
        return Err(LauncherError::Java(format!(
            "runtime archive did not contain {java_binary:?}"
        )));
    }

    config.java_path = java_binary.display().to_string();
    config.java_downloaded = true;
    info!("Java runtime ready: {:?}", java_binary);
    Ok(java_binary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn existing_runtime_is_reused_without_network() {
        let dir = std::env::temp_dir().join(format!("java-test-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let binary = dir.join("java");
        std::fs::write(&binary, b"").unwrap();

        let mut config = LauncherConfig::default();
        config.java_downloaded = true;
        config.java_path = binary.display().to_string();

        let downloader = Downloader::new().unwrap();
        let resolved = ensure_runtime(&mut config, &downloader).await.unwrap();
        assert_eq!(resolved, binary);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
