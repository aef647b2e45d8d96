// Configuration module: locates the credential file, reads the API key
// out of it and writes it back when the user runs `configure`.
//
// The credential file is a plain list of `KEY=value` lines. Only the
// `THOTH_API_KEY` line matters to this client; other lines are kept as-is
// when the file is rewritten.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Base URL of the hosted Thoth API.
pub const DEFAULT_BASE_URL: &str = "https://www.usethoth.com/api";

/// Name of the key line inside the credential file.
pub const API_KEY_VAR: &str = "THOTH_API_KEY";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("API key not found. Please create {path} with:\nTHOTH_API_KEY=your_api_key_here")]
    MissingApiKey { path: String },
    #[error("home directory could not be determined")]
    NoHomeDir,
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("failed to write {path}: {source}")]
    Write { path: String, source: io::Error },
}

/// Returns `~/.config/thoth/config`.
pub fn default_config_path() -> Result<PathBuf, Error> {
    let home = dirs::home_dir().ok_or(Error::NoHomeDir)?;
    Ok(home.join(".config").join("thoth").join("config"))
}

/// Extract the API key from the contents of a credential file.
pub fn parse_api_key(contents: &str) -> Option<String> {
    contents
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix(API_KEY_VAR)?.strip_prefix('='))
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Read the API key from `path`. A missing file is not an error.
pub fn load_api_key(path: &Path) -> Result<Option<String>, Error> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(parse_api_key(&contents)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(Error::Read {
            path: path.display().to_string(),
            source,
        }),
    }
}

/// Resolve the key to use for this invocation: a non-empty override wins,
/// otherwise the credential file at `path` (or the default path, which is
/// only looked up when the file is needed).
pub fn resolve_api_key(override_key: Option<&str>, path: Option<&Path>) -> Result<String, Error> {
    if let Some(key) = override_key.map(str::trim).filter(|k| !k.is_empty()) {
        tracing::debug!("using API key from command line or environment");
        return Ok(key.to_string());
    }
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => default_config_path()?,
    };
    match load_api_key(&path)? {
        Some(key) => {
            tracing::debug!(path = %path.display(), "using API key from config file");
            Ok(key)
        }
        None => Err(Error::MissingApiKey {
            path: path.display().to_string(),
        }),
    }
}

/// Store `key` in the credential file, replacing a previous key line and
/// keeping every other line.
pub fn save_api_key(path: &Path, key: &str) -> Result<(), Error> {
    let existing = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => String::new(),
        Err(source) => {
            return Err(Error::Read {
                path: path.display().to_string(),
                source,
            })
        }
    };

    let prefix = format!("{API_KEY_VAR}=");
    let key_line = format!("{prefix}{}", key.trim());
    let mut replaced = false;
    let mut lines = Vec::new();
    for line in existing.lines() {
        if !line.trim().starts_with(&prefix) {
            lines.push(line.to_string());
        } else if !replaced {
            lines.push(key_line.clone());
            replaced = true;
        }
    }
    if !replaced {
        lines.push(key_line);
    }

    let write_err = |source| Error::Write {
        path: path.display().to_string(),
        source,
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(write_err)?;
    }
    fs::write(path, lines.join("\n") + "\n").map_err(write_err)?;
    restrict_permissions(path).map_err(write_err)?;
    Ok(())
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> io::Result<()> {
    Ok(())
}
