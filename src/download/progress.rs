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

use super::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Terminal progress bar for jar downloads.
pub struct IndicatifProgressReporter {
    progress_bar: Option<ProgressBar>,
    context: String,
}

impl IndicatifProgressReporter {
    pub fn new(context: String) -> Self {
        Self {
            progress_bar: None,
            context,
        }
    }

    pub fn for_jar_download(version: &str) -> Self {
        Self::new(format!("bfg-{version}.jar"))
    }

    fn template(total_bytes: u64) -> &'static str {
        if total_bytes > 0 {
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] \
             {bytes}/{total_bytes} {msg} ({bytes_per_sec}, {eta})"
        } else {
            "{spinner:.green} [{elapsed_precise}] {bytes} {msg}"
        }
    }
}

impl ProgressReporter for IndicatifProgressReporter {
    fn on_start(&mut self, total_bytes: u64) {
        let pb = if total_bytes > 0 {
            ProgressBar::new(total_bytes)
        } else {
            ProgressBar::new_spinner()
        };

        if let Ok(style) = ProgressStyle::default_bar().template(Self::template(total_bytes)) {
            pb.set_style(
                style
                    .progress_chars("█▓░")
                    .tick_chars("⣾⣽⣻⢿⡿⣟⣯⣷"),
            );
        }

        pb.set_message(format!("Downloading {}", self.context));
        pb.enable_steady_tick(Duration::from_millis(100));
        self.progress_bar = Some(pb);
    }

    fn on_progress(&mut self, bytes_downloaded: u64) {
        if let Some(pb) = &self.progress_bar {
            pb.set_position(bytes_downloaded);
        }
    }

    fn on_complete(&mut self) {
        if let Some(pb) = self.progress_bar.take() {
            pb.finish_with_message("Download complete");
        }
    }
}
