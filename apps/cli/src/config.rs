//! Deploy configuration management.
//!
//! Configuration is stored as TOML:
//! - Linux: `~/.config/worldbuilder/deploy.toml`
//! - Windows: `%APPDATA%/worldbuilder/deploy.toml`
//!
//! `WORLDBUILDER_API_URL` overrides `api_url`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::bail;
use serde::{Deserialize, Serialize};
use worldbuilder_deploy::{DeployOptions, VerifyPolicy};
use worldbuilder_protocol::constants::{DEFAULT_BASE_DOMAIN, DEFAULT_OWNER};
use worldbuilder_site_api::ClientConfig;

/// Environment variable holding the registration endpoint.
pub const API_URL_ENV: &str = "WORLDBUILDER_API_URL";

/// Deploy configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Registration endpoint (or API base) URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Domain games are published under.
    #[serde(default = "default_base_domain")]
    pub base_domain: String,

    /// Owner sent to the registry when none is given.
    #[serde(default = "default_owner")]
    pub owner: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Check label availability before publishing.
    #[serde(default = "default_true")]
    pub check_availability: bool,

    /// Check the public URL after publishing.
    #[serde(default = "default_true")]
    pub verify: bool,

    #[serde(default = "default_verify_attempts")]
    pub verify_attempts: u32,

    #[serde(default = "default_verify_interval_secs")]
    pub verify_interval_secs: u64,
}

fn default_base_domain() -> String {
    DEFAULT_BASE_DOMAIN.into()
}

fn default_owner() -> String {
    DEFAULT_OWNER.into()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_verify_attempts() -> u32 {
    3
}

fn default_verify_interval_secs() -> u64 {
    2
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: None,
            base_domain: default_base_domain(),
            owner: default_owner(),
            timeout_secs: default_timeout_secs(),
            check_availability: default_true(),
            verify: default_true(),
            verify_attempts: default_verify_attempts(),
            verify_interval_secs: default_verify_interval_secs(),
        }
    }
}

impl Config {
    /// Loads configuration from `path` (or the platform location), creating
    /// a default file if none exists.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => config_path()?,
        };
        Self::load_from(&path)
    }

    /// Loads configuration from a specific file.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Saves the configuration to a specific file.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        // Restrict permissions on Unix.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
        }

        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// Effective API URL: environment first, then the file.
    pub fn api_url(&self) -> Option<String> {
        pick_api_url(std::env::var(API_URL_ENV).ok(), self.api_url.as_deref())
    }

    /// Registration client settings.
    pub fn client_config(&self) -> anyhow::Result<ClientConfig> {
        let Some(url) = self.api_url() else {
            bail!("server configuration error: set {API_URL_ENV} or api_url in the config file");
        };
        Ok(ClientConfig {
            register_url: url,
            timeout: Duration::from_secs(self.timeout_secs),
        })
    }

    /// Workflow options derived from the file.
    pub fn deploy_options(&self) -> DeployOptions {
        DeployOptions {
            base_domain: self.base_domain.clone(),
            default_owner: self.owner.clone(),
            check_availability: self.check_availability,
            verify: self.verify.then(|| self.verify_policy()),
        }
    }

    pub fn verify_policy(&self) -> VerifyPolicy {
        VerifyPolicy {
            attempts: self.verify_attempts,
            interval: Duration::from_secs(self.verify_interval_secs),
        }
    }
}

fn pick_api_url(env: Option<String>, configured: Option<&str>) -> Option<String> {
    env.filter(|u| !u.trim().is_empty())
        .or_else(|| configured.map(str::to_string))
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
}

/// Returns the platform-specific configuration file path.
pub fn config_path() -> anyhow::Result<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        Ok(PathBuf::from(home)
            .join(".config")
            .join("worldbuilder")
            .join("deploy.toml"))
    }

    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        Ok(PathBuf::from(appdata).join("worldbuilder").join("deploy.toml"))
    }

    #[cfg(not(any(target_os = "linux", target_os = "windows")))]
    {
        Ok(PathBuf::from("/tmp/worldbuilder/deploy.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert!(config.api_url.is_none());
        assert_eq!(config.base_domain, "app.worldbuilder.space");
        assert_eq!(config.owner, "anonymous");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.check_availability);
        assert!(config.verify);
        assert_eq!(config.verify_policy(), VerifyPolicy::default());
    }

    #[test]
    fn config_partial_toml() {
        let toml_str = r#"
            api_url = "https://api.test/prod/register-subdomain"
            verify = false
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.api_url.as_deref(),
            Some("https://api.test/prod/register-subdomain")
        );
        assert_eq!(config.base_domain, "app.worldbuilder.space");
        assert!(config.deploy_options().verify.is_none());
        assert!(config.deploy_options().check_availability);
    }

    #[test]
    fn config_save_and_load() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("deploy.toml");

        let config = Config {
            api_url: Some("https://api.test".into()),
            owner: "alice".into(),
            verify_attempts: 5,
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn missing_file_creates_default() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("deploy.toml");

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn env_wins_over_file() {
        assert_eq!(
            pick_api_url(Some("https://env.test".into()), Some("https://file.test")).as_deref(),
            Some("https://env.test")
        );
        assert_eq!(
            pick_api_url(Some("  ".into()), Some("https://file.test")).as_deref(),
            Some("https://file.test")
        );
        assert!(pick_api_url(None, Some("")).is_none());
        assert!(pick_api_url(None, None).is_none());
    }

    #[test]
    fn deploy_options_follow_file() {
        let config = Config {
            base_domain: "games.test".into(),
            verify_attempts: 1,
            verify_interval_secs: 0,
            ..Config::default()
        };
        let opts = config.deploy_options();
        assert_eq!(opts.public_url("space-game"), "https://space-game.games.test");
        assert_eq!(
            opts.verify,
            Some(VerifyPolicy {
                attempts: 1,
                interval: Duration::ZERO
            })
        );
    }

    #[test]
    fn config_path_not_empty() {
        let path = config_path().unwrap();
        assert!(path.to_string_lossy().contains("worldbuilder"));
    }
}
