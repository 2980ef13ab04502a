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
use crate::manager::BfgJarManager;
use crate::version::compare_versions;
use comfy_table::{Cell, CellAlignment, Table};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct VersionEntry {
    version: String,
    latest: bool,
    installed: bool,
}

pub struct VersionsCommand {
    manager: BfgJarManager,
}

impl VersionsCommand {
    pub fn new(config: &BfgmConfig) -> Result<Self> {
        Ok(Self {
            manager: BfgJarManager::new(config),
        })
    }

    pub fn execute(&self, json: bool) -> Result<()> {
        let info = self.manager.fetch_latest_version_info()?;
        let installed = self.manager.current_local_version();
        let entries = entries(&info.all_versions, &info.latest, installed.as_deref());

        if json {
            println!("{}", serde_json::to_string_pretty(&entries)?);
            return Ok(());
        }

        if entries.is_empty() {
            println!("No BFG versions published");
            return Ok(());
        }

        println!("{}", build_table(&entries));
        println!();
        println!(
            "{} version{} available",
            entries.len(),
            if entries.len() == 1 { "" } else { "s" }
        );

        Ok(())
    }
}

/// Newest first, flagging the feed's latest and the cached version.
fn entries(versions: &[String], latest: &str, installed: Option<&str>) -> Vec<VersionEntry> {
    let mut sorted = versions.to_vec();
    sorted.sort_by(|a, b| compare_versions(b, a));
    sorted.dedup();

    sorted
        .into_iter()
        .map(|version| VersionEntry {
            latest: version == latest,
            installed: installed == Some(version.as_str()),
            version,
        })
        .collect()
}

fn build_table(entries: &[VersionEntry]) -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_BORDERS_ONLY);
    table.set_header(vec![Cell::new("Version"), Cell::new("Status")]);

    for entry in entries {
        let status = match (entry.latest, entry.installed) {
            (true, true) => "latest, installed",
            (true, false) => "latest",
            (false, true) => "installed",
            (false, false) => "",
        };
        table.add_row(vec![
            Cell::new(&entry.version).set_alignment(CellAlignment::Right),
            Cell::new(status),
        ]);
    }

    table
}
