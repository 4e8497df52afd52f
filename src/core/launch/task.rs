// ─── Process Spawn ───
// Hands the launch plan to the JVM and detaches.

use std::path::{Path, PathBuf};
use std::process::{Child, Command};

use tracing::info;

use crate::core::error::{LauncherError, LauncherResult};

/// Spawn the game with the response file produced by the plan writer.
///
/// On Windows non-debug launches prefer the `javaw.exe` sibling of the
/// configured binary so no console window sticks around. The child is
/// returned detached; the launcher does not wait on it.
pub fn spawn_game(
    java_path: &Path,
    game_dir: &Path,
    plan_path: &Path,
    debug: bool,
) -> LauncherResult<Child> {
    let binary = if cfg!(target_os = "windows") && !debug {
        javaw_sibling(java_path)
    } else {
        java_path.to_path_buf()
    };

    info!("Launching game: {:?} @{:?}", binary, plan_path);

    Command::new(&binary)
        .arg(format!("@{}", plan_path.display()))
        .current_dir(game_dir)
        .spawn()
        .map_err(|e| LauncherError::Launch(format!("failed to start {binary:?}: {e}")))
}

/// `javaw.exe` next to the given `java.exe`, falling back to the original
/// path when there is no such sibling on disk.
fn javaw_sibling(java_path: &Path) -> PathBuf {
    let candidate = java_path.with_file_name("javaw.exe");
    if candidate.exists() {
        candidate
    } else {
        java_path.to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn javaw_sibling_prefers_existing_javaw() {
        let dir = std::env::temp_dir().join(format!("task-test-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let java = dir.join("java.exe");
        std::fs::write(&java, b"").unwrap();

        // No javaw yet: keep the original binary.
        assert_eq!(javaw_sibling(&java), java);

        std::fs::write(dir.join("javaw.exe"), b"").unwrap();
        assert_eq!(javaw_sibling(&java), dir.join("javaw.exe"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn spawning_a_missing_binary_reports_launch_error() {
        let dir = std::env::temp_dir().join(format!("task-spawn-test-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let err = spawn_game(
            Path::new("/definitely/not/a/java/binary"),
            &dir,
            &dir.join("launch_args.txt"),
            true,
        )
        .unwrap_err();
        assert!(matches!(err, LauncherError::Launch(_)));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
