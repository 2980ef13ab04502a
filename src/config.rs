// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::error::{BfgError, Result};
use crate::paths;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const ENV_PREFIX: &str = "BFGM";

pub const DEFAULT_METADATA_URL: &str =
    "https://repo1.maven.org/maven2/com/madgag/bfg/maven-metadata.xml";
pub const DEFAULT_REPOSITORY_BASE: &str = "https://repo1.maven.org/maven2/com/madgag/bfg";
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
const DEFAULT_MAX_SIZE_MB: u64 = 256;
const DEFAULT_MAX_AGE_HOURS: u64 = 24;
const DEFAULT_JAVA_COMMAND: &str = "java";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BfgmConfig {
    #[serde(skip)]
    home: PathBuf,

    #[serde(default)]
    pub metadata: MetadataConfig,

    #[serde(default)]
    pub download: DownloadConfig,

    #[serde(default)]
    pub workspace: WorkspaceConfig,

    #[serde(default)]
    pub bfg: BfgConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataConfig {
    #[serde(default = "default_metadata_url")]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Base URL that `{version}/bfg-{version}.jar` is appended to
    #[serde(default = "default_repository_base")]
    pub repository_base: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_max_size_mb")]
    pub max_size_mb: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    #[serde(default = "default_max_age_hours")]
    pub max_age_hours: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BfgConfig {
    #[serde(default = "default_java_command")]
    pub java_command: String,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            url: default_metadata_url(),
        }
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            repository_base: default_repository_base(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            max_size_mb: DEFAULT_MAX_SIZE_MB,
        }
    }
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            max_age_hours: DEFAULT_MAX_AGE_HOURS,
        }
    }
}

impl Default for BfgConfig {
    fn default() -> Self {
        Self {
            java_command: default_java_command(),
        }
    }
}

fn default_metadata_url() -> String {
    DEFAULT_METADATA_URL.to_string()
}

fn default_repository_base() -> String {
    DEFAULT_REPOSITORY_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_max_size_mb() -> u64 {
    DEFAULT_MAX_SIZE_MB
}

fn default_max_age_hours() -> u64 {
    DEFAULT_MAX_AGE_HOURS
}

fn default_java_command() -> String {
    DEFAULT_JAVA_COMMAND.to_string()
}

/// Load the configuration for the resolved application home.
pub fn new_bfgm_config() -> Result<BfgmConfig> {
    let home = paths::resolve_home()?;
    BfgmConfig::load(&home)
}

impl BfgmConfig {
    /// Defaults rooted at `home`, ignoring any config file or environment.
    pub fn with_home(home: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            ..Self::default()
        }
    }

    /// Layer `config.toml` under `home` and `BFGM_*` environment variables
    /// over the defaults.
    pub fn load(home: &Path) -> Result<Self> {
        let config_path = home.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            log::debug!("Config file not found at {config_path:?}, using defaults");
        }

        let settings = Config::builder()
            .add_source(
                File::new(&config_path.to_string_lossy(), FileFormat::Toml).required(false),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| BfgError::ConfigError(format!("Failed to load config.toml: {e}")))?;

        let mut config: BfgmConfig = settings
            .try_deserialize()
            .map_err(|e| BfgError::ConfigError(format!("Failed to parse config.toml: {e}")))?;
        config.home = home.to_path_buf();

        if config.download.timeout_secs == 0 {
            return Err(BfgError::ConfigError(
                "download.timeout_secs must be greater than 0".to_string(),
            ));
        }

        log::debug!("Loaded config rooted at {home:?}");
        Ok(config)
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn bfg_dir(&self) -> PathBuf {
        paths::bfg_dir(&self.home)
    }

    pub fn working_dir(&self) -> PathBuf {
        paths::working_dir(&self.home)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.download.timeout_secs)
    }

    pub fn max_download_size(&self) -> u64 {
        self.download.max_size_mb.saturating_mul(1024 * 1024)
    }
}
