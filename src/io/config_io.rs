use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::config::{AccountConfig, AppConfig};

/// Error type for configuration I/O
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine the user config directory")]
    NoConfigDir,
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
    #[error("could not parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("could not edit config: {0}")]
    EditError(#[from] toml_edit::TomlError),
    #[error("no credentials found: run `htui login <USER_ID> <API_KEY>` or create ~/.habiticarc")]
    MissingCredentials,
}

/// `$XDG_CONFIG_HOME/habitui/config.toml` (or the platform equivalent)
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(dir.join("habitui").join("config.toml"))
}

/// Read the config file. A missing file yields the defaults.
pub fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(AppConfig::default()),
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    Ok(toml::from_str(&text)?)
}

/// Parse a `.habiticarc`: user id on the first line, API key on the second
pub fn parse_legacy_credentials(text: &str) -> Option<AccountConfig> {
    let mut lines = text.lines().map(str::trim).filter(|l| !l.is_empty());
    let user_id = lines.next()?.to_string();
    let api_key = lines.next()?.to_string();
    Some(AccountConfig { user_id, api_key })
}

/// Credentials from `[account]`, falling back to `~/.habiticarc`
pub fn resolve_account(config: &AppConfig) -> Result<AccountConfig, ConfigError> {
    if let Some(account) = &config.account {
        return Ok(account.clone());
    }
    let home = dirs::home_dir().ok_or(ConfigError::MissingCredentials)?;
    let legacy = home.join(".habiticarc");
    match fs::read_to_string(&legacy) {
        Ok(text) => {
            tracing::debug!(path = %legacy.display(), "using legacy credentials file");
            parse_legacy_credentials(&text).ok_or(ConfigError::MissingCredentials)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(ConfigError::MissingCredentials),
        Err(e) => Err(ConfigError::ReadError {
            path: legacy,
            source: e,
        }),
    }
}

/// Set the `[account]` table, leaving the rest of the document untouched
pub fn set_credentials(doc: &mut toml_edit::DocumentMut, account: &AccountConfig) {
    if !doc.contains_key("account") {
        doc["account"] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    doc["account"]["user_id"] = toml_edit::value(&account.user_id);
    doc["account"]["api_key"] = toml_edit::value(&account.api_key);
}

/// Store credentials in the config file, creating it if needed
pub fn write_credentials(path: &Path, account: &AccountConfig) -> Result<(), ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
        Err(e) => {
            return Err(ConfigError::ReadError {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };
    let mut doc: toml_edit::DocumentMut = text.parse()?;
    set_credentials(&mut doc, account);

    let write_err = |e: io::Error| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    };
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(write_err)?;
    }
    atomic_write(path, doc.to_string().as_bytes()).map_err(write_err)
}

/// Write `content` to `path` atomically using a temp file + rename.
fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
