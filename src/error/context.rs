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

use crate::error::BfgError;
use std::fmt;

pub struct ErrorContext<'a> {
    pub error: &'a BfgError,
    pub suggestion: Option<String>,
    pub details: Option<String>,
}

impl<'a> ErrorContext<'a> {
    pub fn new(error: &'a BfgError) -> Self {
        let (suggestion, details) = match error {
            BfgError::InvalidVersion(msg) => {
                let suggestion = Some(
                    "Run 'bfgm versions' to list the published BFG versions (e.g., '1.14.0')."
                        .to_string(),
                );
                let details = Some(format!("Invalid format: {msg}"));
                (suggestion, details)
            }
            BfgError::NetworkError(msg) => {
                let suggestion = if msg.contains("timed out") || msg.contains("Timeout") {
                    Some(
                        "Try increasing 'download.timeout_secs' in config.toml (e.g., 600)."
                            .to_string(),
                    )
                } else if msg.contains("HTTP 404") {
                    Some(
                        "The requested version was not found. Run 'bfgm versions' to list \
                         published versions."
                            .to_string(),
                    )
                } else {
                    Some(
                        "Check your internet connection and proxy settings, then run 'bfgm \
                         update' again."
                            .to_string(),
                    )
                };
                let details = Some(format!("Network issue: {msg}"));
                (suggestion, details)
            }
            BfgError::MetadataParse(_) => {
                let suggestion = Some(
                    "The Maven metadata feed returned an unexpected document. Check \
                     'metadata.url' in config.toml."
                        .to_string(),
                );
                (suggestion, None)
            }
            BfgError::Filesystem(msg) => {
                let suggestion = Some(
                    "Ensure the bfgm home directory is writable or point BFGM_HOME elsewhere."
                        .to_string(),
                );
                let details = Some(msg.clone());
                (suggestion, details)
            }
            BfgError::DownloadInProgress => {
                let suggestion =
                    Some("Wait for the running download to finish and try again.".to_string());
                (suggestion, None)
            }
            BfgError::JarNotFound { cache_dir } => {
                let suggestion = Some(
                    "Run 'bfgm update' to download the latest BFG jar, or pass --jar <PATH>."
                        .to_string(),
                );
                let details = Some(format!("No bfg-<version>.jar found in {cache_dir}"));
                (suggestion, details)
            }
            BfgError::RepositoryNotFound(path) => {
                let suggestion = Some(format!("Ensure the repository exists: {path}"));
                (suggestion, None)
            }
            BfgError::JavaNotFound(java) => {
                let suggestion = Some(format!(
                    "Install a Java runtime and make sure '{java}' is on your PATH, or set \
                     'bfg.java_command' in config.toml."
                ));
                (suggestion, None)
            }
            BfgError::CommandFailed { stderr, .. } => {
                let details = if stderr.trim().is_empty() {
                    None
                } else {
                    Some(stderr.trim().to_string())
                };
                (None, details)
            }
            BfgError::PermissionDenied(path) => {
                let suggestion = if cfg!(unix) {
                    Some(format!(
                        "Try running with sudo or ensure you have write permissions to: {path}"
                    ))
                } else {
                    Some(format!(
                        "Run as Administrator or ensure you have write permissions to: {path}"
                    ))
                };
                (suggestion, None)
            }
            BfgError::Io(io_err) => {
                let suggestion = match io_err.kind() {
                    std::io::ErrorKind::PermissionDenied => {
                        if cfg!(unix) {
                            Some("Try running with sudo or check file permissions.".to_string())
                        } else {
                            Some("Run as Administrator or check file permissions.".to_string())
                        }
                    }
                    std::io::ErrorKind::NotFound => Some(
                        "Ensure the file or directory exists and the path is correct.".to_string(),
                    ),
                    _ => None,
                };
                let details = Some(format!("I/O error: {io_err}"));
                (suggestion, details)
            }
            _ => (None, None),
        };

        ErrorContext {
            error,
            suggestion,
            details,
        }
    }
}

impl<'a> fmt::Display for ErrorContext<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\n\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}
