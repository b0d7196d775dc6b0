use std::io::ErrorKind;
use std::num::NonZeroU64;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use toml_edit::DocumentMut;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Values present in `config.toml`. Absent or unusable keys are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileConfig {
    pub endpoint: Option<String>,
    pub request_timeout_secs: Option<NonZeroU64>,
}

#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn new_default() -> anyhow::Result<Self> {
        let Some(home) = dirs::home_dir() else {
            anyhow::bail!("cannot determine home directory for config path");
        };
        Ok(Self::new(default_config_path(&home)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the config file. A missing file yields the empty config, and so does TOML that fails
    /// to parse (with a warning). Only I/O failures are errors.
    pub fn load(&self) -> anyhow::Result<FileConfig> {
        let Some(content) = read_document_string(&self.path)? else {
            return Ok(FileConfig::default());
        };

        let doc = match content.parse::<DocumentMut>() {
            Ok(doc) => doc,
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    "ignoring invalid config.toml: {err}"
                );
                return Ok(FileConfig::default());
            }
        };

        Ok(FileConfig {
            endpoint: read_endpoint(&doc),
            request_timeout_secs: read_request_timeout_secs(&doc),
        })
    }
}

/// Effective settings after layering CLI flags over the config file over defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub endpoint: String,
    pub request_timeout: Duration,
}

impl Settings {
    pub fn resolve(
        cli_endpoint: Option<String>,
        cli_timeout_secs: Option<NonZeroU64>,
        file: FileConfig,
    ) -> Self {
        let endpoint = cli_endpoint
            .or(file.endpoint)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let request_timeout = cli_timeout_secs
            .or(file.request_timeout_secs)
            .map_or(DEFAULT_REQUEST_TIMEOUT, |secs| Duration::from_secs(secs.get()));
        Self {
            endpoint,
            request_timeout,
        }
    }
}

pub fn translatica_home(home: &Path) -> PathBuf {
    home.join(".translatica")
}

fn default_config_path(home: &Path) -> PathBuf {
    translatica_home(home).join("config.toml")
}

fn read_endpoint(doc: &DocumentMut) -> Option<String> {
    let item = doc.get("endpoint")?;
    match item.as_str().map(str::trim) {
        Some(endpoint) if !endpoint.is_empty() => Some(endpoint.to_string()),
        _ => {
            tracing::warn!("ignoring `endpoint` in config.toml: expected a non-empty string");
            None
        }
    }
}

fn read_request_timeout_secs(doc: &DocumentMut) -> Option<NonZeroU64> {
    let item = doc.get("request_timeout_secs")?;
    let secs = item
        .as_integer()
        .and_then(|secs| u64::try_from(secs).ok())
        .and_then(NonZeroU64::new);
    if secs.is_none() {
        tracing::warn!("ignoring `request_timeout_secs` in config.toml: expected a positive integer");
    }
    secs
}

fn read_document_string(path: &Path) -> anyhow::Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(anyhow::Error::new(err).context("read config.toml")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store_with(contents: &str) -> (tempfile::TempDir, ConfigStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(&path, contents).expect("write config");
        (dir, ConfigStore::new(path))
    }

    #[test]
    fn reads_endpoint_and_timeout() {
        let (_dir, store) = store_with(
            r#"# local model server
endpoint = "http://translate.internal:9000/"
request_timeout_secs = 12
"#,
        );

        assert_eq!(
            store.load().expect("load"),
            FileConfig {
                endpoint: Some("http://translate.internal:9000/".to_string()),
                request_timeout_secs: NonZeroU64::new(12),
            }
        );
    }

    #[test]
    fn missing_file_is_empty_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = ConfigStore::new(dir.path().join("config.toml"));
        assert_eq!(store.load().expect("load"), FileConfig::default());
    }

    #[test]
    fn invalid_toml_falls_back_to_empty_config() {
        let (_dir, store) = store_with(
            r#"# broken table header makes this TOML invalid
[other
endpoint = "http://example.com"
"#,
        );
        assert_eq!(store.load().expect("load"), FileConfig::default());
    }

    #[test]
    fn unusable_values_are_ignored() {
        let (_dir, store) = store_with(
            r#"endpoint = 42
request_timeout_secs = 0
"#,
        );
        assert_eq!(store.load().expect("load"), FileConfig::default());

        let (_dir, store) = store_with("endpoint = \"   \"\nrequest_timeout_secs = -5\n");
        assert_eq!(store.load().expect("load"), FileConfig::default());
    }

    #[test]
    fn cli_overrides_file_which_overrides_defaults() {
        let file = FileConfig {
            endpoint: Some("http://from-file:8000".to_string()),
            request_timeout_secs: NonZeroU64::new(5),
        };

        assert_eq!(
            Settings::resolve(None, None, FileConfig::default()),
            Settings {
                endpoint: DEFAULT_ENDPOINT.to_string(),
                request_timeout: DEFAULT_REQUEST_TIMEOUT,
            }
        );
        assert_eq!(
            Settings::resolve(None, None, file.clone()),
            Settings {
                endpoint: "http://from-file:8000".to_string(),
                request_timeout: Duration::from_secs(5),
            }
        );
        assert_eq!(
            Settings::resolve(
                Some("http://from-cli:7000".to_string()),
                NonZeroU64::new(60),
                file,
            ),
            Settings {
                endpoint: "http://from-cli:7000".to_string(),
                request_timeout: Duration::from_secs(60),
            }
        );
    }

    #[test]
    fn default_config_path_uses_translatica_home_dir() {
        let home = Path::new("home");
        assert_eq!(
            default_config_path(home),
            home.join(".translatica").join("config.toml")
        );
    }
}
