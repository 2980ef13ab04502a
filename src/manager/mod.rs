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

//! Lifecycle of the locally cached BFG Repo-Cleaner jar.
//!
//! [`BfgJarManager`] owns one cache directory holding at most one
//! `bfg-<version>.jar`. It reconciles that directory with the Maven
//! metadata feed, downloads specific versions on request, and reports a
//! status snapshot for display.
//!
//! The public operations never return `Err`: failures come back as a
//! [`DownloadResult`] with `success == false` (or an empty version list),
//! so a polling UI always has something to show.

mod cache;
mod guard;
mod models;

pub use cache::{JarCache, jar_file_name, parse_jar_version};
pub use models::{DownloadResult, ManagerStatus};

use crate::config::BfgmConfig;
use crate::download::{
    AttohttpcClient, DownloadOptions, HttpClient, HttpFileDownloader, IndicatifProgressReporter,
};
use crate::error::{BfgError, Result};
use crate::metadata::{MavenMetadataClient, VersionInfo};
use crate::paths::shared::ensure_directory;
use crate::user_agent;
use crate::version::{compare_versions, validate_version};
use guard::DownloadGuard;
use log::{info, warn};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use std::sync::atomic::{self, AtomicBool};
use std::sync::{Arc, Mutex};

/// Owner of the jar cache directory.
///
/// Build exactly one per process at the composition root and hand out
/// references. All operations take `&self` and may be called from several
/// threads; only one download runs at a time and concurrent download
/// requests are rejected rather than queued.
pub struct BfgJarManager {
    cache: JarCache,
    metadata: MavenMetadataClient,
    http_client: Arc<dyn HttpClient>,
    repository_base: String,
    download_options: DownloadOptions,
    show_progress: bool,
    downloading: AtomicBool,
    current_version: Mutex<Option<String>>,
    last_error: Mutex<Option<String>>,
}

impl BfgJarManager {
    /// Manager backed by attohttpc clients honoring the configured timeout.
    pub fn new(config: &BfgmConfig) -> Self {
        let mut metadata_http =
            AttohttpcClient::new().with_user_agent(user_agent::metadata_client());
        metadata_http.set_timeout(config.timeout());

        let mut download_http = AttohttpcClient::new();
        download_http.set_timeout(config.timeout());

        Self::with_clients(config, Arc::new(metadata_http), Arc::new(download_http))
    }

    /// Manager using one client for both the feed and the jar downloads.
    pub fn with_http_client(config: &BfgmConfig, http_client: Arc<dyn HttpClient>) -> Self {
        Self::with_clients(config, http_client.clone(), http_client)
    }

    fn with_clients(
        config: &BfgmConfig,
        metadata_http: Arc<dyn HttpClient>,
        download_http: Arc<dyn HttpClient>,
    ) -> Self {
        let dir = config.bfg_dir();
        let dir = std::path::absolute(&dir).unwrap_or(dir);

        // A missing directory is not fatal here; downloads retry the
        // creation and report the failure.
        let init_error = match ensure_directory(dir.clone()) {
            Ok(_) => None,
            Err(e) => {
                warn!("Could not prepare BFG directory: {e}");
                Some(e.to_string())
            }
        };

        Self {
            cache: JarCache::new(dir),
            metadata: MavenMetadataClient::new(config.metadata.url.clone(), metadata_http),
            http_client: download_http,
            repository_base: config.download.repository_base.clone(),
            download_options: DownloadOptions {
                max_size: config.max_download_size(),
            },
            show_progress: false,
            downloading: AtomicBool::new(false),
            current_version: Mutex::new(None),
            last_error: Mutex::new(init_error),
        }
    }

    /// Render a terminal progress bar while downloading.
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn cache_dir(&self) -> &Path {
        self.cache.dir()
    }

    /// Version most recently downloaded or confirmed by this manager.
    pub fn current_version(&self) -> Option<String> {
        lock(&self.current_version).clone()
    }

    pub(crate) fn fetch_latest_version_info(&self) -> Result<VersionInfo> {
        self.metadata.fetch_version_info()
    }

    /// Version of the cached jar, or `None` if the cache is empty or unreadable.
    pub fn current_local_version(&self) -> Option<String> {
        self.cache.current_version()
    }

    fn current_jar_path(&self) -> Option<PathBuf> {
        let version = self.current_local_version()?;
        let path = self.cache.jar_path(&version);
        path.is_file().then_some(path)
    }

    /// Path of the cached jar, for handing to `java -jar`.
    pub fn jar_path(&self) -> Result<PathBuf> {
        self.current_jar_path().ok_or_else(|| BfgError::JarNotFound {
            cache_dir: self.cache.dir().display().to_string(),
        })
    }

    fn jar_url(&self, version: &str) -> String {
        format!(
            "{}/{version}/{}",
            self.repository_base.trim_end_matches('/'),
            jar_file_name(version)
        )
    }

    /// Bring the cache in line with the feed's `latest` version.
    ///
    /// Downloads when nothing is cached or the cached jar is older. A
    /// cached jar that is newer than the feed is left alone.
    pub fn check_and_update(&self) -> DownloadResult {
        info!("Checking for BFG updates...");

        let result = self.reconcile().unwrap_or_else(|e| {
            warn!("Error checking for BFG updates: {e}");
            DownloadResult::failed(
                format!("Failed to check for updates: {e}"),
                Some(e.to_string()),
            )
        });

        self.record(&result);
        result
    }

    fn reconcile(&self) -> Result<DownloadResult> {
        let info = self.fetch_latest_version_info()?;
        let local = self.current_local_version();

        info!(
            "Latest version: {}, Local version: {}",
            info.latest,
            local.as_deref().unwrap_or("none")
        );

        let Some(local) = local else {
            info!("No local BFG version found, downloading latest...");
            return Ok(self.download_bfg_jar(&info.latest, false));
        };

        if compare_versions(&info.latest, &local) == Ordering::Greater {
            info!(
                "Local version {local} is outdated, downloading {}...",
                info.latest
            );
            return Ok(self.download_bfg_jar(&info.latest, true));
        }

        *lock(&self.current_version) = Some(local.clone());
        Ok(DownloadResult::succeeded(
            local.clone(),
            self.current_jar_path(),
            format!("BFG {local} is up to date"),
        ))
    }

    /// Download `version` without consulting the feed.
    pub fn download_specific_version(&self, version: &str) -> DownloadResult {
        let result = self.download_bfg_jar(version, false);
        self.record(&result);
        result
    }

    /// Every published version in feed order; empty if the feed is unreachable.
    pub fn available_versions(&self) -> Vec<String> {
        match self.fetch_latest_version_info() {
            Ok(info) => info.all_versions,
            Err(e) => {
                warn!("Error fetching available versions: {e}");
                Vec::new()
            }
        }
    }

    pub fn status(&self) -> ManagerStatus {
        let version = self.current_local_version();
        let path = version
            .as_deref()
            .map(|version| self.cache.jar_path(version))
            .filter(|path| path.is_file());

        ManagerStatus {
            is_available: path.is_some(),
            version,
            path,
            is_downloading: self.downloading.load(atomic::Ordering::Acquire),
            error: lock(&self.last_error).clone(),
        }
    }

    fn download_bfg_jar(&self, version: &str, remove_stale: bool) -> DownloadResult {
        let Some(_guard) = DownloadGuard::try_acquire(&self.downloading) else {
            info!("Rejected download of BFG {version}: another download is running");
            return DownloadResult::failed(BfgError::DownloadInProgress.to_string(), None);
        };

        match self.fetch_jar(version, remove_stale) {
            Ok(path) => {
                *lock(&self.current_version) = Some(version.to_string());
                info!("Downloaded BFG {version} to {}", path.display());
                DownloadResult::succeeded(
                    version.to_string(),
                    Some(path),
                    format!("Successfully downloaded BFG {version}"),
                )
            }
            Err(e) => {
                warn!("Failed to download BFG {version}: {e}");
                DownloadResult::failed(
                    format!("Failed to download BFG jar: {e}"),
                    Some(e.to_string()),
                )
            }
        }
    }

    fn fetch_jar(&self, version: &str, remove_stale: bool) -> Result<PathBuf> {
        validate_version(version)?;

        let dir = ensure_directory(self.cache.dir().to_path_buf())?;
        if remove_stale {
            self.cache.remove_all_jars()?;
        }

        let target = self.cache.jar_path(version);
        self.cache.remove_jar(version)?;

        let mut downloader = HttpFileDownloader::with_client(self.http_client.clone());
        if self.show_progress {
            downloader = downloader
                .with_progress_reporter(Box::new(IndicatifProgressReporter::for_jar_download(
                    version,
                )));
        }

        let url = self.jar_url(version);
        info!("Downloading {url} into {}", dir.display());
        downloader.download(&url, &target, &self.download_options)
    }

    fn record(&self, result: &DownloadResult) {
        let mut last_error = lock(&self.last_error);
        if result.success {
            *last_error = None;
        } else if let Some(error) = &result.error {
            *last_error = Some(error.clone());
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
