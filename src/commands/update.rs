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
use crate::error::{BfgError, Result};
use crate::manager::{BfgJarManager, DownloadResult};
use colored::Colorize;

pub struct UpdateCommand {
    manager: BfgJarManager,
}

impl UpdateCommand {
    pub fn new(config: &BfgmConfig, no_progress: bool) -> Result<Self> {
        Ok(Self {
            manager: BfgJarManager::new(config).with_progress(!no_progress),
        })
    }

    pub fn execute(&self, json: bool) -> Result<()> {
        report(self.manager.check_and_update(), json)
    }
}

/// Print a download result, turning a failure into an error for the exit code.
pub(crate) fn report(result: DownloadResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else if result.success {
        println!("{} {}", "✓".green(), result.message);
        if let Some(path) = &result.path {
            println!("  Path: {}", path.display());
        }
    }

    if result.success {
        Ok(())
    } else {
        Err(BfgError::OperationFailed(result.message))
    }
}
