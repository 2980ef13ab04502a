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

use serde::Serialize;
use std::path::PathBuf;

/// Point-in-time view of the jar cache, recomputed on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManagerStatus {
    /// A cached jar exists on disk right now
    pub is_available: bool,
    pub version: Option<String>,
    pub path: Option<PathBuf>,
    pub is_downloading: bool,
    /// Last recorded failure, cleared by the next successful operation
    pub error: Option<String>,
}

/// Outcome of a reconciliation or download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadResult {
    pub success: bool,
    pub version: Option<String>,
    pub path: Option<PathBuf>,
    pub message: String,
    pub error: Option<String>,
}

impl DownloadResult {
    pub fn succeeded(version: String, path: Option<PathBuf>, message: String) -> Self {
        Self {
            success: true,
            version: Some(version),
            path,
            message,
            error: None,
        }
    }

    pub fn failed(message: String, error: Option<String>) -> Self {
        Self {
            success: false,
            version: None,
            path: None,
            message,
            error,
        }
    }
}
