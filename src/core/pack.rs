// ─── Pack Synchronization ───
// Compares the remote pack manifest against the installed version and, on
// mismatch, replaces the launcher-managed content wholesale.

use std::path::Path;

use chrono::Utc;
use serde::Deserialize;
use tracing::{info, warn};

use crate::core::archive;
use crate::core::config::LauncherConfig;
use crate::core::downloader::Downloader;
use crate::core::error::LauncherResult;

/// Directories owned by the pack. Anything inside them is replaced on every
/// sync; player data (saves, options, screenshots) lives outside and is
/// never touched.
pub const WIPED_DIRS: [&str; 4] = ["config", "fancymenu_data", "mods", "shaderpacks"];

const PACK_ARCHIVE_NAME: &str = "pack.zip";

#[derive(Debug, Deserialize)]
pub struct PackManifest {
    #[serde(default = "default_pack_version")]
    pub version: String,
}

fn default_pack_version() -> String {
    "0.0.0".to_string()
}

/// Bring the game directory up to the remote pack version.
///
/// Returns `true` when an update was applied. The installed version and the
/// sync timestamp are recorded in `config`; the caller persists it.
pub async fn sync_pack(
    config: &mut LauncherConfig,
    game_dir: &Path,
    downloader: &Downloader,
) -> LauncherResult<bool> {
    if config.pack_manifest_url.is_empty() || config.pack_url.is_empty() {
        info!("No pack configured, skipping sync");
        return Ok(false);
    }

    let manifest: PackManifest = downloader.fetch_json(&config.pack_manifest_url).await?;
    if manifest.version == config.pack_version {
        info!("Pack is up to date ({})", config.pack_version);
        return Ok(false);
    }

    info!(
        "Updating pack {} -> {}",
        if config.pack_version.is_empty() { "<none>" } else { config.pack_version.as_str() },
        manifest.version
    );

    wipe_managed_content(game_dir);

    let archive_path = game_dir.join(PACK_ARCHIVE_NAME);
    downloader
        .download_file(&config.pack_url, &archive_path, None)
        .await?;
    archive::extract_zip(&archive_path, game_dir)?;
    if let Err(e) = std::fs::remove_file(&archive_path) {
        warn!("Could not remove pack archive {:?}: {}", archive_path, e);
    }

    config.pack_version = manifest.version;
    config.last_synced = Some(Utc::now());
    Ok(true)
}

/// Delete pack-managed content ahead of an update. Individual failures are
/// logged and skipped so one locked file cannot abort the whole sync.
pub fn wipe_managed_content(game_dir: &Path) {
    let servers = game_dir.join("servers.dat");
    if servers.exists() {
        if let Err(e) = std::fs::remove_file(&servers) {
            warn!("Could not remove {:?}: {}", servers, e);
        }
    }

    for name in WIPED_DIRS {
        let dir = game_dir.join(name);
        if !dir.exists() {
            continue;
        }
        if let Err(e) = std::fs::remove_dir_all(&dir) {
            warn!("Could not remove {:?}: {}", dir, e);
        }
    }
}
