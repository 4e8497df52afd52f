// ─── Launch Plan ───
// Writes the response file consumed by `java @launch_args.txt`. Keeping the
// argument list on disk sidesteps Windows command-line length limits and
// leaves a launch record behind for debugging.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::error::{LauncherError, LauncherResult};

pub const PLAN_FILE_NAME: &str = "launch_args.txt";

/// Write the full argument list, one token per line, and return the file
/// path. Order: memory cap, JVM arguments, main class, game arguments. The
/// file is fsynced before returning so the spawned JVM never reads a partial
/// plan.
pub fn write_launch_plan(
    game_dir: &Path,
    max_ram: &str,
    jvm_args: &[String],
    main_class: &str,
    game_args: &[String],
) -> LauncherResult<PathBuf> {
    let path = game_dir.join(PLAN_FILE_NAME);
    let file = File::create(&path).map_err(|e| LauncherError::io(&path, e))?;
    let mut writer = BufWriter::new(file);

    let io = |e| LauncherError::io(&path, e);

    if !max_ram.is_empty() {
        writeln!(writer, "-Xmx{max_ram}").map_err(io)?;
    }
    for arg in jvm_args {
        writeln!(writer, "{}", quote_token(arg)).map_err(io)?;
    }
    writeln!(writer, "{main_class}").map_err(io)?;
    for arg in game_args {
        writeln!(writer, "{}", quote_token(arg)).map_err(io)?;
    }

    writer.flush().map_err(io)?;
    writer.get_ref().sync_all().map_err(io)?;

    debug!("Launch plan written: {:?}", path);
    Ok(path)
}

/// Tokens with spaces get naive double quoting, which is what the JVM's
/// `@argfile` parser expects for paths.
fn quote_token(token: &str) -> String {
    if token.contains(' ') {
        format!("\"{token}\"")
    } else {
        token.to_string()
    }
}
