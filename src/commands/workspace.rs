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
use crate::paths::ensure_working_dir;
use crate::workspace::WorkingDirectory;
use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum WorkspaceCommand {
    /// Print the working directory used for mirror clones
    Path,

    /// Remove everything in the working directory
    Clean,

    /// Remove mirror clones older than the configured age
    Prune {
        /// Override workspace.max_age_hours
        #[arg(long, value_name = "HOURS")]
        max_age_hours: Option<u64>,
    },
}

impl WorkspaceCommand {
    pub fn execute(&self, config: &BfgmConfig) -> Result<()> {
        let working = WorkingDirectory::new(config.working_dir());

        match self {
            WorkspaceCommand::Path => {
                println!("{}", working.path().display());
            }
            WorkspaceCommand::Clean => {
                let working = WorkingDirectory::initialize(config.working_dir());
                if !working.is_ready() {
                    ensure_working_dir(config.home())?;
                }
                println!("Cleaned {}", working.path().display());
            }
            WorkspaceCommand::Prune { max_age_hours } => {
                let max_age = max_age_hours.unwrap_or(config.workspace.max_age_hours);
                let removed = working.cleanup_old_repositories(max_age);
                if removed.is_empty() {
                    println!("No repositories older than {max_age} hours");
                } else {
                    for name in &removed {
                        println!("Removed {name}");
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_clean_empties_working_directory() {
        let temp = TempDir::new().unwrap();
        let config = BfgmConfig::with_home(temp.path());
        let stale = config.working_dir().join("project-1");
        fs::create_dir_all(&stale).unwrap();

        WorkspaceCommand::Clean.execute(&config).unwrap();

        assert!(config.working_dir().is_dir());
        assert!(!stale.exists());
    }

    #[test]
    fn test_prune_keeps_recent_clones() {
        let temp = TempDir::new().unwrap();
        let config = BfgmConfig::with_home(temp.path());
        let recent = config.working_dir().join("project-1");
        fs::create_dir_all(&recent).unwrap();

        WorkspaceCommand::Prune {
            max_age_hours: None,
        }
        .execute(&config)
        .unwrap();

        assert!(recent.exists());
    }
}
