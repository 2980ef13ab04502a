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

use crate::download::client::{HttpClient, HttpResponse};
use crate::download::options::DownloadOptions;
use crate::error::{BfgError, Result};
use std::fs;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const DOWNLOAD_CHUNK_SIZE: usize = 8192;
const TEMP_FILE_PREFIX: &str = ".bfgm-download-";
/// Anything else, including other 2xx codes, aborts the transfer.
const HTTP_OK: u16 = 200;

pub trait ProgressReporter: Send + Sync {
    fn on_start(&mut self, total_bytes: u64);

    fn on_progress(&mut self, bytes_downloaded: u64);

    fn on_complete(&mut self);
}

/// Streams an HTTP response into a file.
///
/// The body is written to a temporary file next to the destination and
/// renamed into place only after the last byte arrived, so a failed
/// transfer never leaves a partial file at `destination`.
pub struct HttpFileDownloader {
    http_client: Arc<dyn HttpClient>,
    progress_reporter: Option<Box<dyn ProgressReporter>>,
}

impl HttpFileDownloader {
    pub fn with_client(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            progress_reporter: None,
        }
    }

    pub fn with_progress_reporter(mut self, reporter: Box<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    pub fn download(
        &mut self,
        url: &str,
        destination: &Path,
        options: &DownloadOptions,
    ) -> Result<PathBuf> {
        let parent = destination
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        let response = self.http_client.get(url, Vec::new())?;

        self.validate_response(response.as_ref(), options.max_size)?;

        let total_size = self.get_total_size(response.as_ref());

        if let Some(reporter) = &mut self.progress_reporter {
            reporter.on_start(total_size);
        }

        // Dropping the temp file on an error path removes it
        let temp_file = tempfile::Builder::new()
            .prefix(TEMP_FILE_PREFIX)
            .tempfile_in(parent)?;

        let temp_file = self.download_to_file(response, temp_file)?;

        temp_file.persist(destination).map_err(|e| {
            BfgError::Filesystem(format!(
                "Failed to move download into {}: {}",
                destination.display(),
                e.error
            ))
        })?;

        if let Some(reporter) = &mut self.progress_reporter {
            reporter.on_complete();
        }

        Ok(destination.to_path_buf())
    }

    fn validate_response(&self, response: &dyn HttpResponse, max_size: u64) -> Result<()> {
        let status = response.status();

        if status != HTTP_OK {
            return Err(BfgError::NetworkError(format!("HTTP {status}")));
        }

        if let Some(content_length) = response.header("Content-Length")
            && let Ok(length) = content_length.parse::<u64>()
            && length > max_size
        {
            return Err(BfgError::ValidationError(format!(
                "Download size {length} exceeds maximum allowed size {max_size}"
            )));
        }

        Ok(())
    }

    fn get_total_size(&self, response: &dyn HttpResponse) -> u64 {
        // 0 means unknown
        response
            .header("Content-Length")
            .and_then(|length| length.parse::<u64>().ok())
            .unwrap_or(0)
    }

    fn download_to_file(
        &mut self,
        mut response: Box<dyn HttpResponse>,
        temp_file: tempfile::NamedTempFile,
    ) -> Result<tempfile::NamedTempFile> {
        let mut writer = BufWriter::new(temp_file);
        let mut downloaded = 0u64;
        let mut buffer = vec![0; DOWNLOAD_CHUNK_SIZE];

        loop {
            match response.read(&mut buffer) {
                Ok(0) => break, // EOF
                Ok(n) => {
                    writer.write_all(&buffer[..n])?;
                    downloaded += n as u64;

                    if let Some(reporter) = &mut self.progress_reporter {
                        reporter.on_progress(downloaded);
                    }
                }
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    return Err(BfgError::NetworkError(format!(
                        "Connection failed after {downloaded} bytes: {e}"
                    )));
                }
            }
        }

        writer.flush()?;
        let temp_file = writer
            .into_inner()
            .map_err(|e| BfgError::Io(e.into_error()))?;
        log::debug!("Received {downloaded} bytes");
        Ok(temp_file)
    }
}

/// Read an entire response body as text after checking the status.
/// Invalid UTF-8 sequences become U+FFFD.
pub(crate) fn read_text(mut response: Box<dyn HttpResponse>) -> Result<String> {
    let status = response.status();
    if status != HTTP_OK {
        return Err(BfgError::NetworkError(format!("HTTP {status}")));
    }

    let mut body = Vec::new();
    response
        .read_to_end(&mut body)
        .map_err(|e| BfgError::NetworkError(format!("Failed to read response body: {e}")))?;
    Ok(String::from_utf8_lossy(&body).into_owned())
}

#[cfg(test)]
#[path = "http_file_downloader_tests.rs"]
mod http_file_downloader_tests;
