use std::env;
use std::path::{Path, PathBuf};

use crate::config::{home_dir, Config};
use crate::error::{Result, TicklistError};

const DATA_DIR_NAME: &str = ".ticklist";
const DATA_DIR_ENV: &str = "TICKLIST_DIR";

/// Resolve the data directory. The first root given wins:
/// 1. --dir CLI flag
/// 2. TICKLIST_DIR environment variable
/// 3. Config file ticklistDirectory
///
/// With none of them the data lives in `~/.ticklist`.
pub fn resolve_ticklist_directory(cli_dir: Option<&Path>, config: &Config) -> Result<PathBuf> {
    let env_dir = env::var(DATA_DIR_ENV).ok();
    resolve_with(cli_dir, env_dir.as_deref(), config)
}

fn resolve_with(cli_dir: Option<&Path>, env_dir: Option<&str>, config: &Config) -> Result<PathBuf> {
    match custom_root(cli_dir, env_dir, config)? {
        Some(root) => data_dir_in(&root),
        None => Ok(home_dir()?.join(DATA_DIR_NAME)),
    }
}

/// The root the user asked for, with `~` expanded. A config value naming
/// the home directory is the default and counts as unset.
fn custom_root(
    cli_dir: Option<&Path>,
    env_dir: Option<&str>,
    config: &Config,
) -> Result<Option<PathBuf>> {
    if let Some(dir) = cli_dir {
        let dir = dir.to_string_lossy();
        if dir.trim().is_empty() {
            return Err(TicklistError::MissingDirValue);
        }
        return Config::expand_home(dir.trim()).map(Some);
    }

    if let Some(dir) = env_dir.map(str::trim).filter(|d| !d.is_empty()) {
        return Config::expand_home(dir).map(Some);
    }

    let configured = config.ticklist_directory.trim();
    if configured.is_empty() {
        return Ok(None);
    }
    let root = Config::expand_home(configured)?;
    if root == home_dir()? {
        Ok(None)
    } else {
        Ok(Some(root))
    }
}

/// `root/.ticklist`, or `root` itself when it is already named `.ticklist`.
/// The directory holding the data directory must exist; the data directory
/// is created when the store opens.
fn data_dir_in(root: &Path) -> Result<PathBuf> {
    let parent = if root.file_name().is_some_and(|name| name == DATA_DIR_NAME) {
        match root.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    } else {
        root
    };

    let parent = parent
        .canonicalize()
        .ok()
        .filter(|p| p.is_dir())
        .ok_or_else(|| TicklistError::InvalidDirectory(root.display().to_string()))?;
    Ok(parent.join(DATA_DIR_NAME))
}
