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
use crate::paths::shared::ensure_child_directory;
use std::env;
use std::path::{Path, PathBuf};

pub const HOME_ENV: &str = "BFGM_HOME";
pub const APP_DIR: &str = "bfgm";
pub const BFG_DIR: &str = "bfg";
pub const WORKING_DIR: &str = "working";

/// Resolve the application home directory.
///
/// `BFGM_HOME` wins when set and non-empty; otherwise the platform data
/// directory is used (`~/.local/share/bfgm`, `~/Library/Application Support/bfgm`,
/// `%APPDATA%\bfgm`), falling back to `~/.bfgm`.
pub fn resolve_home() -> Result<PathBuf> {
    if let Ok(home) = env::var(HOME_ENV)
        && !home.trim().is_empty()
    {
        return Ok(PathBuf::from(home));
    }

    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join(APP_DIR));
    }

    dirs::home_dir()
        .map(|home| home.join(format!(".{APP_DIR}")))
        .ok_or_else(|| {
            BfgError::ConfigError(format!(
                "Unable to determine a data directory; set {HOME_ENV}"
            ))
        })
}

pub fn bfg_dir(home: &Path) -> PathBuf {
    home.join(BFG_DIR)
}

pub fn working_dir(home: &Path) -> PathBuf {
    home.join(WORKING_DIR)
}

pub fn ensure_working_dir(home: &Path) -> Result<PathBuf> {
    ensure_child_directory(home, WORKING_DIR)
}
