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

/// Maximum allowed download size (256MB)
pub const MAX_DOWNLOAD_SIZE: u64 = 268_435_456;

/// Options for configuring download behavior
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    /// Maximum allowed file size, checked against Content-Length
    pub max_size: u64,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            max_size: MAX_DOWNLOAD_SIZE,
        }
    }
}
