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

use crate::download::{HttpClient, read_text};
use crate::error::{BfgError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, LazyLock};

// The feed layout is fixed, so plain pattern extraction is enough here.
static LATEST_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<latest>(.+?)</latest>").expect("latest regex is valid"));
static RELEASE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<release>(.+?)</release>").expect("release regex is valid"));
static LAST_UPDATED_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<lastUpdated>(.+?)</lastUpdated>").expect("lastUpdated regex is valid")
});
static VERSION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<version>(.+?)</version>").expect("version regex is valid"));

/// Snapshot of the upstream Maven metadata feed. Never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    pub latest: String,
    pub release: String,
    /// Every published version, in feed order
    pub all_versions: Vec<String>,
    /// Passed through verbatim; empty when the feed omits it
    pub last_updated: String,
}

/// Extract [`VersionInfo`] from a `maven-metadata.xml` body.
///
/// The first `<latest>`, `<release>` and `<lastUpdated>` match wins; every
/// `<version>` element is collected. The body is never echoed back in the
/// error.
pub fn parse_maven_metadata(body: &str) -> Result<VersionInfo> {
    let latest = first_capture(&LATEST_PATTERN, body)
        .ok_or_else(|| BfgError::MetadataParse("missing <latest> element".to_string()))?;
    let release = first_capture(&RELEASE_PATTERN, body)
        .ok_or_else(|| BfgError::MetadataParse("missing <release> element".to_string()))?;
    let last_updated = first_capture(&LAST_UPDATED_PATTERN, body).unwrap_or_default();

    let all_versions = VERSION_PATTERN
        .captures_iter(body)
        .filter_map(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
        .collect();

    Ok(VersionInfo {
        latest,
        release,
        all_versions,
        last_updated,
    })
}

fn first_capture(pattern: &Regex, body: &str) -> Option<String> {
    pattern
        .captures(body)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
}

/// Fetches the metadata feed over HTTP.
pub struct MavenMetadataClient {
    url: String,
    http_client: Arc<dyn HttpClient>,
}

impl MavenMetadataClient {
    pub fn new(url: String, http_client: Arc<dyn HttpClient>) -> Self {
        Self { url, http_client }
    }

    /// Single attempt; failures surface immediately.
    pub fn fetch_version_info(&self) -> Result<VersionInfo> {
        let response = self
            .http_client
            .get(
                &self.url,
                vec![("Accept".to_string(), "application/xml".to_string())],
            )
            .map_err(|e| match e {
                BfgError::NetworkError(msg) => {
                    BfgError::NetworkError(format!("Failed to fetch Maven metadata: {msg}"))
                }
                other => other,
            })?;

        let body = read_text(response).map_err(|e| match e {
            BfgError::NetworkError(msg) => {
                BfgError::NetworkError(format!("Failed to fetch Maven metadata: {msg}"))
            }
            other => other,
        })?;

        let info = parse_maven_metadata(&body)?;
        log::debug!(
            "Maven metadata: latest={}, release={}, {} versions",
            info.latest,
            info.release,
            info.all_versions.len()
        );
        Ok(info)
    }
}
