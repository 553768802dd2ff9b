use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the config file picked up from the working directory.
pub const CONFIG_FILE: &str = "slidedeck.toml";

/// Settings read from `slidedeck.toml`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct CliConfig {
    /// tracing filter used when `RUST_LOG` is unset
    pub log_filter: Option<String>,
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Treat validation warnings as failures
    pub strict: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_filter: None,
            pretty: true,
            strict: false,
        }
    }
}

impl CliConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid slidedeck config")
    }

    /// Load `explicit` if given, else `slidedeck.toml` in `dir` if it exists,
    /// else defaults. A missing explicit file is an error.
    pub async fn load(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        let path: PathBuf = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = dir.join(CONFIG_FILE);
                if !candidate.exists() {
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let content = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("in {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        assert_eq!(CliConfig::from_toml("").unwrap(), CliConfig::default());
    }

    #[test]
    fn parses_all_keys() {
        let config = CliConfig::from_toml(
            r#"
log-filter = "slidedeck_core=debug"
pretty = false
strict = true
"#,
        )
        .unwrap();
        assert_eq!(config.log_filter.as_deref(), Some("slidedeck_core=debug"));
        assert!(!config.pretty);
        assert!(config.strict);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(CliConfig::from_toml("colour = true").is_err());
    }

    #[tokio::test]
    async fn loads_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "strict = true\n").unwrap();

        let config = CliConfig::load(None, dir.path()).await.unwrap();
        assert!(config.strict);
        assert!(config.pretty);
    }

    #[tokio::test]
    async fn missing_directory_config_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = CliConfig::load(None, dir.path()).await.unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[tokio::test]
    async fn missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(CliConfig::load(Some(&missing), dir.path()).await.is_err());
    }
}
