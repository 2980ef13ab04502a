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

mod context;
mod exit_codes;
mod format;

pub use context::ErrorContext;
pub use exit_codes::get_exit_code;
pub use format::{format_error_chain, format_error_with_color};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BfgError {
    #[error("Invalid version format: {0}")]
    InvalidVersion(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Failed to parse Maven metadata: {0}")]
    MetadataParse(String),

    #[error("Filesystem error: {0}")]
    Filesystem(String),

    #[error("Download already in progress")]
    DownloadInProgress,

    #[error("No BFG jar is available")]
    JarNotFound { cache_dir: String },

    #[error("Repository path does not exist: {0}")]
    RepositoryNotFound(String),

    #[error("Java executable '{0}' not found in PATH")]
    JavaNotFound(String),

    #[error("Command '{command}' failed with exit code {code:?}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("{0}")]
    OperationFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BfgError>;
