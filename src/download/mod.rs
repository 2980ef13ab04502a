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

//! HTTP plumbing for fetching the metadata feed and BFG jars.
//!
//! - `HttpClient`/`HttpResponse` abstract the transport so tests can inject
//!   mock responses
//! - `HttpFileDownloader` streams a response body into a file atomically
//! - `IndicatifProgressReporter` renders a progress bar in the CLI
mod client;
mod http_file_downloader;
mod options;
mod progress;

pub use client::{AttohttpcClient, HttpClient, HttpResponse};
pub use http_file_downloader::{HttpFileDownloader, ProgressReporter};
pub(crate) use http_file_downloader::read_text;
pub use options::{DownloadOptions, MAX_DOWNLOAD_SIZE};
pub use progress::IndicatifProgressReporter;
