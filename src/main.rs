mod core;

use std::io::Write;
use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::core::auth::{self, identity};
use crate::core::config::{self, LauncherConfig};
use crate::core::downloader::Downloader;
use crate::core::error::{LauncherError, LauncherResult};
use crate::core::launch::rules::current_os_name;
use crate::core::launch::{args, classpath, plan, task, LaunchEnv};
use crate::core::version::VersionDescriptor;
use crate::core::{java, pack};

const AUTH_AGENT_URL: &str =
    "https://authlib-injector.yushi.moe/artifact/53/authlib-injector-1.2.5.jar";

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Launcher failed: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> LauncherResult<()> {
    let config_path = config::config_path()?;
    let mut config = LauncherConfig::load_or_default(&config_path);
    init_tracing(&config)?;
    info!("PurrLauncher {} starting", env!("CARGO_PKG_VERSION"));

    if !config.max_ram.is_empty() && !config::is_valid_ram_value(&config.max_ram) {
        warn!("Invalid max_ram {:?}, falling back to 4G", config.max_ram);
        config.max_ram = "4G".to_string();
    }

    let downloader = Downloader::new()?;
    let java_binary = java::ensure_runtime(&mut config, &downloader).await?;

    if config.auth_token.is_empty() {
        config.auth_token = prompt_for_token()?;
    }

    let session = match identity::hardware_fingerprint() {
        Ok(hwid) => {
            auth::authenticate(
                downloader.client(),
                &config.api_url,
                &config.auth_token,
                &hwid,
                &config.username,
            )
            .await
        }
        Err(e) => {
            warn!("Hardware fingerprint unavailable, launching offline: {}", e);
            auth::AuthSession::offline(&config.username)
        }
    };
    config.username = session.username.clone();
    config.uuid = session.uuid.clone();

    let game_dir = config::data_dir()?.join("minecraft");
    std::fs::create_dir_all(&game_dir).map_err(|e| LauncherError::io(&game_dir, e))?;

    match pack::sync_pack(&mut config, &game_dir, &downloader).await {
        Ok(true) => info!("Pack updated to {}", config.pack_version),
        Ok(false) => {}
        // Stale content is better than no launch.
        Err(e) => warn!("Pack sync failed, launching existing content: {}", e),
    }
    config.save(&config_path)?;

    ensure_auth_agent(&game_dir, &downloader).await;

    let version_id = config.version.clone();
    let descriptor_path = game_dir
        .join("versions")
        .join(&version_id)
        .join(format!("{version_id}.json"));
    let descriptor = VersionDescriptor::load(&descriptor_path)?;

    let env = LaunchEnv {
        asset_index: descriptor.asset_index_id().to_string(),
        game_dir,
        version_id,
        api_url: config.api_url.clone(),
        current_os: current_os_name().to_string(),
        session,
    };

    let classpath = classpath::build_classpath(
        &descriptor,
        &env.game_dir,
        &env.version_id,
        &downloader,
        &env.current_os,
    )
    .await?;

    let vars = env.placeholder_map(&classpath);
    let jvm_args = args::build_jvm_args(&descriptor, &env, &vars);
    let game_args = args::build_game_args(&descriptor, &env, &vars);

    let plan_path = plan::write_launch_plan(
        &env.game_dir,
        &config.max_ram,
        &jvm_args,
        descriptor.main_class(),
        &game_args,
    )?;

    task::spawn_game(&java_binary, &env.game_dir, &plan_path, config.debug)?;
    info!("Game process started");
    Ok(())
}

/// Stdout logging always; an extra plain-text file layer when debug mode is
/// on.
fn init_tracing(config: &LauncherConfig) -> LauncherResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = if config.debug {
        let path = config::data_dir()?.join(&config.log_file);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| LauncherError::io(parent, e))?;
        }
        let file = std::fs::File::create(&path).map_err(|e| LauncherError::io(&path, e))?;
        Some(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::new(file)),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();
    Ok(())
}

/// Fetch the auth agent jar when the pack did not ship one. Failure is not
/// fatal; the launch simply proceeds without online auth.
async fn ensure_auth_agent(game_dir: &std::path::Path, downloader: &Downloader) {
    let agent_jar = game_dir.join("libraries").join("authlib-injector.jar");
    if agent_jar.exists() {
        return;
    }
    if let Err(e) = downloader.download_file(AUTH_AGENT_URL, &agent_jar, None).await {
        warn!("Could not fetch auth agent: {}", e);
    }
}

fn prompt_for_token() -> LauncherResult<String> {
    print!("Enter your launcher token: ");
    std::io::stdout()
        .flush()
        .map_err(|e| LauncherError::Other(format!("stdout unavailable: {e}")))?;

    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .map_err(|e| LauncherError::Other(format!("could not read token: {e}")))?;
    Ok(line.trim().to_string())
}
