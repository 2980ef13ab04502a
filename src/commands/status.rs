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

use crate::config::BfgmConfig;
use crate::error::Result;
use crate::manager::{BfgJarManager, ManagerStatus};
use colored::Colorize;

pub struct StatusCommand {
    manager: BfgJarManager,
}

impl StatusCommand {
    pub fn new(config: &BfgmConfig) -> Result<Self> {
        Ok(Self {
            manager: BfgJarManager::new(config),
        })
    }

    pub fn execute(&self, json: bool) -> Result<()> {
        let status = self.manager.status();

        if json {
            println!("{}", serde_json::to_string_pretty(&status)?);
        } else {
            print!("{}", render_status(&status, self.manager.cache_dir().display()));
        }

        Ok(())
    }
}

fn render_status(status: &ManagerStatus, cache_dir: impl std::fmt::Display) -> String {
    let mut out = String::new();

    match (&status.version, &status.path) {
        (Some(version), Some(path)) if status.is_available => {
            out.push_str(&format!("{} BFG {version}\n", "✓".green()));
            out.push_str(&format!("  Path: {}\n", path.display()));
        }
        _ => {
            out.push_str(&format!("{} No BFG jar cached\n", "✗".red()));
            out.push_str(&format!("  Cache: {cache_dir}\n"));
            out.push_str("  Run 'bfgm update' to download the latest version\n");
        }
    }

    if status.is_downloading {
        out.push_str("  A download is in progress\n");
    }
    if let Some(error) = &status.error {
        out.push_str(&format!("  {} {error}\n", "Last error:".yellow()));
    }

    out
}
