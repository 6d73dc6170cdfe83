use crate::error::Result;
use crate::utils::constants::{DATA_HOME_ENV, DEFAULT_DATA_HOME};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Return the path of the directory used to cache downloaded data sets.
///
/// Priority: an explicit `data_home`, then the `PALEOCLIMATE_SCIPY_DATA`
/// environment variable, then `~/paleoclimate_scipy`. A leading `~` is
/// expanded to the user's home directory. Nothing is created on disk.
pub fn get_data_home(data_home: Option<&Path>) -> PathBuf {
    let from_env = std::env::var(DATA_HOME_ENV).ok();
    resolve_data_home(data_home, from_env.as_deref())
}

/// Like [`get_data_home`], but creates the directory (and any parents) if it
/// does not already exist.
pub fn ensure_data_home(data_home: Option<&Path>) -> Result<PathBuf> {
    let path = get_data_home(data_home);
    if !path.is_dir() {
        debug!(path = %path.display(), "Creating data home");
    }
    std::fs::create_dir_all(&path)?;
    Ok(path)
}

fn resolve_data_home(explicit: Option<&Path>, from_env: Option<&str>) -> PathBuf {
    let raw = match (explicit, from_env) {
        (Some(path), _) => path.to_string_lossy().into_owned(),
        (None, Some(value)) if !value.is_empty() => value.to_string(),
        _ => DEFAULT_DATA_HOME.to_string(),
    };

    PathBuf::from(shellexpand::tilde(&raw).into_owned())
}
