//! Configuration file loading with environment variable overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Default base URL for the local Stable Diffusion WebUI backend.
pub const SDWEBUI_DEFAULT_URL: &str = "http://127.0.0.1:7860";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// API token configuration.
    #[serde(default)]
    pub keys: KeysConfig,

    /// Local Stable Diffusion WebUI settings.
    #[serde(default)]
    pub sdwebui: SdWebuiConfig,
}

/// API token configuration.
#[derive(Debug, Default, Deserialize)]
pub struct KeysConfig {
    /// Hugging Face API token.
    pub huggingface: Option<String>,
}

/// Settings for the local Stable Diffusion WebUI backend.
#[derive(Debug, Default, Deserialize)]
pub struct SdWebuiConfig {
    /// Base URL of the WebUI API.
    pub url: Option<String>,
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }

    /// Get the Hugging Face API token, preferring the environment variable.
    #[must_use]
    pub fn huggingface_token(&self) -> Option<String> {
        std::env::var("HF_TOKEN").ok().or_else(|| self.keys.huggingface.clone())
    }

    /// Get the Stable Diffusion WebUI base URL, falling back to the default.
    #[must_use]
    pub fn sdwebui_url(&self) -> String {
        self.sdwebui.url.clone().unwrap_or_else(|| SDWEBUI_DEFAULT_URL.to_string())
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `RETOUCH_CONFIG` environment variable
/// 3. `~/.config/retouch/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("RETOUCH_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

/// Default config path: `~/.config/retouch/config.toml`.
fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/retouch/config.toml")
    } else {
        PathBuf::from("retouch.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert!(config.keys.huggingface.is_none());
        assert!(config.sdwebui.url.is_none());
        assert_eq!(config.sdwebui_url(), SDWEBUI_DEFAULT_URL);
    }

    #[test]
    fn load_nonexistent_returns_defaults() {
        let config = Config::load(Path::new("/nonexistent/path/config.toml")).unwrap();
        assert!(config.keys.huggingface.is_none());
    }

    #[test]
    fn load_valid_toml() {
        let dir = std::env::temp_dir().join("retouch_config_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(
            &path,
            r#"
[keys]
huggingface = "test-hf-token"

[sdwebui]
url = "http://192.168.1.20:7860"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.keys.huggingface.as_deref(), Some("test-hf-token"));
        assert_eq!(config.sdwebui_url(), "http://192.168.1.20:7860");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_invalid_toml() {
        let dir = std::env::temp_dir().join("retouch_config_bad_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("bad.toml");
        std::fs::write(&path, "this is not valid toml {{{").unwrap();

        assert!(Config::load(&path).is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn huggingface_token_env_override() {
        let config = Config {
            keys: KeysConfig { huggingface: Some("from-file".into()) },
            ..Config::default()
        };

        // Without env var, returns file value
        std::env::remove_var("HF_TOKEN");
        assert_eq!(config.huggingface_token().as_deref(), Some("from-file"));
    }

    #[test]
    fn discover_explicit_path() {
        let path = discover_config_path(Some("/tmp/my-config.toml"));
        assert_eq!(path, PathBuf::from("/tmp/my-config.toml"));
    }
}
