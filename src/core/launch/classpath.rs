// ─── Classpath Assembly ───
// Walks the descriptor's library list in order, materializes native
// libraries on first launch, and produces the joined classpath string.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::core::archive;
use crate::core::downloader::Downloader;
use crate::core::error::{LauncherError, LauncherResult};
use crate::core::version::{LibraryEntry, VersionDescriptor};

/// Platform path-list separator used between classpath entries.
pub fn classpath_separator() -> &'static str {
    if cfg!(target_os = "windows") {
        ";"
    } else {
        ":"
    }
}

/// Build the launch classpath for `descriptor`.
///
/// Entries appear in descriptor order with the client jar last. Libraries
/// that are incompatible with `current_os`, download-only, or missing from
/// disk are skipped; a missing client jar is fatal. The result is also
/// persisted to `classpath.txt` in the game directory for debugging.
pub async fn build_classpath(
    descriptor: &VersionDescriptor,
    game_dir: &Path,
    version_id: &str,
    downloader: &Downloader,
    current_os: &str,
) -> LauncherResult<String> {
    let libraries_dir = game_dir.join("libraries");
    let natives_dir = game_dir.join("natives");
    let natives_missing = dir_absent_or_empty(&natives_dir);

    let mut entries: Vec<PathBuf> = Vec::new();

    for library in &descriptor.libraries {
        let label = library.name.as_deref().unwrap_or("<unnamed>");

        if !library.is_compatible(current_os) {
            debug!("Skipping incompatible library: {}", label);
            continue;
        }

        if let Some(classifier) = library.native_classifier(current_os) {
            if natives_missing {
                materialize_natives(library, &classifier, &natives_dir, downloader).await;
            }
        }

        if library.download_only {
            debug!("Library is download-only, not on classpath: {}", label);
            continue;
        }

        let Some(relative) = library.artifact_path() else {
            warn!("Library has no resolvable artifact path: {}", label);
            continue;
        };

        let full = libraries_dir.join(relative);
        if !full.exists() {
            warn!("Library jar missing, skipping: {:?}", full);
            continue;
        }
        entries.push(full);
    }

    let client_jar = game_dir
        .join("versions")
        .join(version_id)
        .join(format!("{version_id}.jar"));
    if !client_jar.exists() {
        return Err(LauncherError::MissingClientJar(client_jar));
    }
    entries.push(client_jar);

    let classpath = entries
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(classpath_separator());

    // Later stages read this back, so a write failure aborts the launch.
    let cache = game_dir.join("classpath.txt");
    std::fs::write(&cache, &classpath).map_err(|e| LauncherError::io(&cache, e))?;

    info!("Classpath assembled: {} entries", entries.len());
    Ok(classpath)
}

/// Fetch and unpack one library's native classifier into the natives
/// directory. Failures are logged and swallowed; the launch continues with
/// whatever natives the pack shipped.
async fn materialize_natives(
    library: &LibraryEntry,
    classifier: &str,
    natives_dir: &Path,
    downloader: &Downloader,
) {
    let Some(artifact) = library.native_artifact(classifier) else {
        return;
    };
    let Some(url) = artifact.url.as_deref() else {
        return;
    };

    let temp_jar = natives_dir.join("temp_natives.jar");
    debug!("Fetching natives {} -> {:?}", url, natives_dir);

    if let Err(e) = downloader
        .download_file(url, &temp_jar, artifact.sha1.as_deref())
        .await
    {
        warn!("Native download failed for {}: {}", url, e);
        return;
    }

    if let Err(e) = archive::extract_zip(&temp_jar, natives_dir) {
        warn!("Native extraction failed for {:?}: {}", temp_jar, e);
    }

    let _ = std::fs::remove_file(&temp_jar);
}

fn dir_absent_or_empty(dir: &Path) -> bool {
    match std::fs::read_dir(dir) {
        Ok(mut it) => it.next().is_none(),
        Err(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("classpath-{tag}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn place_jar(root: &Path, relative: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"jar").unwrap();
    }

    fn descriptor(value: serde_json::Value) -> VersionDescriptor {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn assembles_entries_in_order_with_client_jar_last() {
        let game_dir = scratch("order");
        place_jar(&game_dir, "libraries/org/example/a/1.0/a-1.0.jar");
        place_jar(&game_dir, "libraries/org/example/b/2.0/b-2.0.jar");
        place_jar(&game_dir, "versions/test/test.jar");

        let d = descriptor(serde_json::json!({
            "libraries": [
                {"name": "org.example:a:1.0"},
                {"name": "org.example:missing:9.9"},
                {"name": "org.example:b:2.0"},
                {
                    "name": "org.example:winonly:1.0",
                    "rules": [{"action": "allow", "os": {"name": "windows"}}]
                },
                {"name": "org.example:sideload:1.0", "downloadOnly": true}
            ]
        }));

        let downloader = Downloader::new().unwrap();
        let classpath = build_classpath(&d, &game_dir, "test", &downloader, "linux")
            .await
            .unwrap();

        let parts: Vec<&str> = classpath.split(classpath_separator()).collect();
        assert_eq!(parts.len(), 3);
        assert!(parts[0].ends_with("a-1.0.jar"));
        assert!(parts[1].ends_with("b-2.0.jar"));
        assert!(parts[2].ends_with("test.jar"));

        assert_eq!(
            std::fs::read_to_string(game_dir.join("classpath.txt")).unwrap(),
            classpath
        );

        let _ = std::fs::remove_dir_all(&game_dir);
    }

    #[tokio::test]
    async fn missing_client_jar_is_fatal() {
        let game_dir = scratch("noclient");
        let d = descriptor(serde_json::json!({"libraries": []}));
        let downloader = Downloader::new().unwrap();

        let err = build_classpath(&d, &game_dir, "test", &downloader, "linux")
            .await
            .unwrap_err();
        assert!(matches!(err, LauncherError::MissingClientJar(_)));

        let _ = std::fs::remove_dir_all(&game_dir);
    }

    #[tokio::test]
    async fn explicit_artifact_path_is_respected() {
        let game_dir = scratch("explicit");
        place_jar(&game_dir, "libraries/custom/place/lib.jar");
        place_jar(&game_dir, "versions/v/v.jar");

        let d = descriptor(serde_json::json!({
            "libraries": [{
                "name": "org.example:lib:1.0",
                "downloads": {"artifact": {"path": "custom/place/lib.jar"}}
            }]
        }));

        let downloader = Downloader::new().unwrap();
        let classpath = build_classpath(&d, &game_dir, "v", &downloader, "linux")
            .await
            .unwrap();
        assert!(classpath.contains("custom"));

        let _ = std::fs::remove_dir_all(&game_dir);
    }

    #[test]
    fn dir_absent_or_empty_detects_all_three_states() {
        let dir = scratch("emptiness");
        let missing = dir.join("nope");
        assert!(dir_absent_or_empty(&missing));

        let empty = dir.join("empty");
        std::fs::create_dir_all(&empty).unwrap();
        assert!(dir_absent_or_empty(&empty));

        std::fs::write(empty.join("x"), b"x").unwrap();
        assert!(!dir_absent_or_empty(&empty));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
