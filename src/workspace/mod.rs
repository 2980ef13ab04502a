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

//! Scratch space for mirrored repositories.
//!
//! Each cleanup run clones into its own subdirectory of `<home>/working`.
//! The whole directory is wiped at startup and stale clones are pruned by
//! age.

use crate::error::Result;
use crate::paths::shared::ensure_directory;
use chrono::Utc;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

const FALLBACK_REPOSITORY_NAME: &str = "repo";

pub struct WorkingDirectory {
    path: PathBuf,
}

impl WorkingDirectory {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Wipe any leftovers from a previous session and create the directory.
    /// Failures are logged and leave [`is_ready`](Self::is_ready) false.
    pub fn initialize(path: PathBuf) -> Self {
        let working = Self::new(path);

        if working.path.exists() {
            info!("Cleaning existing working directory...");
            working.clean();
        }

        match ensure_directory(working.path.clone()) {
            Ok(path) => info!("Working directory initialized: {}", path.display()),
            Err(e) => warn!("Error initializing working directory: {e}"),
        }

        working
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_ready(&self) -> bool {
        self.path.is_dir()
    }

    /// Remove every entry. If that fails, the directory is recreated from
    /// scratch.
    pub fn clean(&self) {
        if !self.path.exists() {
            return;
        }

        match self.remove_entries() {
            Ok(()) => info!("Working directory cleaned"),
            Err(e) => {
                warn!("Error cleaning working directory: {e}");
                let recreated = fs::remove_dir_all(&self.path)
                    .or_else(|e| {
                        if self.path.exists() {
                            Err(e)
                        } else {
                            Ok(())
                        }
                    })
                    .and_then(|_| fs::create_dir_all(&self.path));
                match recreated {
                    Ok(()) => info!("Working directory recreated after cleaning failure"),
                    Err(e) => warn!("Error recreating working directory: {e}"),
                }
            }
        }
    }

    fn remove_entries(&self) -> std::io::Result<()> {
        for entry in fs::read_dir(&self.path)? {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type()?.is_dir() {
                fs::remove_dir_all(&path)?;
            } else {
                fs::remove_file(&path)?;
            }
        }
        Ok(())
    }

    /// Create `name` as an empty subdirectory, replacing any existing one.
    pub fn create_subdirectory(&self, name: &str) -> Result<PathBuf> {
        let path = self.path.join(name);

        if path.exists() {
            fs::remove_dir_all(&path)?;
        }

        ensure_directory(path)
    }

    /// Delete subdirectories last modified more than `max_age_hours` ago.
    /// Returns the names of the removed directories.
    pub fn cleanup_old_repositories(&self, max_age_hours: u64) -> Vec<String> {
        let mut removed = Vec::new();
        let max_age = Duration::from_secs(max_age_hours.saturating_mul(60 * 60));
        let now = SystemTime::now();

        let entries = match fs::read_dir(&self.path) {
            Ok(entries) => entries,
            Err(e) => {
                if self.path.exists() {
                    warn!("Error cleaning up old repositories: {e}");
                }
                return removed;
            }
        };

        for entry in entries.flatten() {
            let name = entry.file_name().to_string_lossy().into_owned();
            let age = match entry.metadata().and_then(|m| {
                if m.is_dir() {
                    m.modified().map(Some)
                } else {
                    Ok(None)
                }
            }) {
                Ok(Some(modified)) => now.duration_since(modified).unwrap_or_default(),
                Ok(None) => continue,
                Err(e) => {
                    warn!("Error processing item {name}: {e}");
                    continue;
                }
            };

            if age > max_age {
                info!(
                    "Removing old repository directory: {name} ({} hours old)",
                    age.as_secs() / 3600
                );
                match fs::remove_dir_all(entry.path()) {
                    Ok(()) => removed.push(name),
                    Err(e) => warn!("Error removing {name}: {e}"),
                }
            }
        }

        removed
    }
}

/// `https://github.com/org/project.git` -> `project-1718000000000`
pub fn repository_directory_name(repo_url: &str) -> String {
    let name = repo_url
        .trim_end_matches('/')
        .rsplit(['/', ':'])
        .next()
        .map(|segment| segment.strip_suffix(".git").unwrap_or(segment))
        .filter(|segment| !segment.is_empty())
        .unwrap_or(FALLBACK_REPOSITORY_NAME);

    format!("{name}-{}", Utc::now().timestamp_millis())
}
