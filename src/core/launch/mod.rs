// ─── Launch Assembly ───
// Turns a version descriptor plus an authenticated session into a classpath,
// an ordered argument list and finally a spawned game process.

pub mod args;
pub mod classpath;
pub mod placeholders;
pub mod plan;
pub mod rules;
pub mod task;

use std::path::{Path, PathBuf};

use crate::core::auth::AuthSession;
use crate::core::launch::placeholders::PlaceholderMap;

pub const LAUNCHER_NAME: &str = "PurrLauncher";
pub const LAUNCHER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Everything the argument assembler needs to know about one launch.
#[derive(Debug, Clone)]
pub struct LaunchEnv {
    pub game_dir: PathBuf,
    pub version_id: String,
    pub asset_index: String,
    pub api_url: String,
    /// Descriptor-dialect OS name; injected so rule evaluation is testable
    /// off-platform.
    pub current_os: String,
    pub session: AuthSession,
}

impl LaunchEnv {
    pub fn natives_dir(&self) -> PathBuf {
        self.game_dir.join("natives")
    }

    pub fn libraries_dir(&self) -> PathBuf {
        self.game_dir.join("libraries")
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.game_dir.join("assets")
    }

    /// Build the substitution mapping for this launch. Keys mirror the
    /// descriptor dialect; unknown descriptor placeholders simply stay
    /// unresolved and are passed through.
    pub fn placeholder_map(&self, classpath: &str) -> PlaceholderMap {
        let mut vars = PlaceholderMap::new();

        vars.insert("auth_player_name", &self.session.username);
        vars.insert("auth_uuid", &self.session.uuid);
        vars.insert("auth_access_token", &self.session.access_token);
        vars.insert("user_type", &self.session.user_type);

        vars.insert("version_name", &self.version_id);
        vars.insert("version_type", "release");
        vars.insert("game_directory", path_str(&self.game_dir));
        vars.insert("assets_root", path_str(&self.assets_dir()));
        vars.insert("assets_index_name", &self.asset_index);
        vars.insert("natives_directory", path_str(&self.natives_dir()));
        vars.insert("library_directory", path_str(&self.libraries_dir()));

        vars.insert("classpath", classpath);
        vars.insert("classpath_separator", classpath::classpath_separator());

        vars.insert("launcher_name", LAUNCHER_NAME);
        vars.insert("launcher_version", LAUNCHER_VERSION);

        vars.insert("resolution_width", "854");
        vars.insert("resolution_height", "480");

        // Accounts on the custom backend have no Microsoft identity.
        vars.insert("clientid", "");
        vars.insert("auth_xuid", "");

        // Quick-play is feature-gated and those arguments are dropped, but
        // older descriptors reference the keys from plain strings.
        vars.insert("quickPlayPath", "");
        vars.insert("quickPlaySingleplayer", "");
        vars.insert("quickPlayMultiplayer", "");
        vars.insert("quickPlayRealms", "");

        // Pack-pinned loader constants.
        vars.insert("fml.forgeVersion", "47.4.6");
        vars.insert("fml.mcVersion", "1.20.1");
        vars.insert("fml.forgeGroup", "net.minecraftforge");
        vars.insert("fml.mcpVersion", "20230612.114412");

        vars
    }
}

fn path_str(path: &Path) -> String {
    path.display().to_string()
}
