//! Config file location.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Config file name inside the config directory.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name under the XDG config home.
const APP_DIR_NAME: &str = "theoneapi";

/// Resolves the config file path.
///
/// - If `dir` is `Some`, returns `{dir}/config.toml`.
/// - Else if `XDG_CONFIG_HOME` is set and absolute, returns
///   `$XDG_CONFIG_HOME/theoneapi/config.toml`.
/// - Otherwise returns `~/.config/theoneapi/config.toml`.
///
/// # Errors
///
/// Returns an error if no directory is given and `HOME` is not set.
pub fn resolve_config_path(dir: Option<&Path>) -> Result<PathBuf> {
    resolve_with_env(
        dir,
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

fn resolve_with_env(
    dir: Option<&Path>,
    xdg_config_home: Option<PathBuf>,
    home: Option<PathBuf>,
) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join(CONFIG_FILE_NAME));
    }

    if let Some(xdg) = xdg_config_home.filter(|p| p.is_absolute()) {
        return Ok(xdg.join(APP_DIR_NAME).join(CONFIG_FILE_NAME));
    }

    let home = home
        .filter(|h| !h.as_os_str().is_empty())
        .context("HOME environment variable is not set")?;
    Ok(home
        .join(".config")
        .join(APP_DIR_NAME)
        .join(CONFIG_FILE_NAME))
}
