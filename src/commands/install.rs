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

use crate::commands::update::report;
use crate::config::BfgmConfig;
use crate::error::Result;
use crate::manager::BfgJarManager;
use crate::version::validate_version;
use log::info;

pub struct InstallCommand {
    manager: BfgJarManager,
}

impl InstallCommand {
    pub fn new(config: &BfgmConfig, no_progress: bool) -> Result<Self> {
        Ok(Self {
            manager: BfgJarManager::new(config).with_progress(!no_progress),
        })
    }

    pub fn execute(&self, version: &str, json: bool) -> Result<()> {
        validate_version(version)?;
        info!("Installing BFG {version}");

        report(self.manager.download_specific_version(version), json)
    }
}
