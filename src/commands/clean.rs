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

use crate::cleaner::{BfgCleaner, CleanOptions, CleanOutcome};
use crate::config::BfgmConfig;
use crate::error::{BfgError, Result};
use crate::git::GitRepository;
use crate::manager::BfgJarManager;
use crate::workspace::{WorkingDirectory, repository_directory_name};
use colored::Colorize;
use log::{info, warn};
use std::path::{Path, PathBuf};

pub struct CleanArgs {
    /// Local mirror path or remote URL
    pub repo: String,
    pub replace_text: Vec<String>,
    pub strip_blobs_bigger_than: Option<String>,
    pub jar: Option<PathBuf>,
    pub push: bool,
    pub no_gc: bool,
}

pub struct CleanCommand<'a> {
    config: &'a BfgmConfig,
    manager: BfgJarManager,
    cleaner: BfgCleaner,
}

impl<'a> CleanCommand<'a> {
    pub fn new(config: &'a BfgmConfig) -> Result<Self> {
        Ok(Self {
            config,
            manager: BfgJarManager::new(config),
            cleaner: BfgCleaner::new(config),
        })
    }

    pub fn execute(&self, args: &CleanArgs) -> Result<()> {
        let bfg_path = match &args.jar {
            Some(jar) => jar.clone(),
            None => self.manager.jar_path()?,
        };

        let repository = self.prepare_repository(&args.repo)?;

        let options = CleanOptions {
            repo_path: repository.path().to_path_buf(),
            bfg_path,
            text_replacements: args.replace_text.clone(),
            strip_blobs_bigger_than: args.strip_blobs_bigger_than.clone(),
        };

        let outcome = self.cleaner.clean_repository(&options);
        if !outcome.success {
            return Err(failure(outcome));
        }

        if outcome.no_dirty_commits {
            println!("{} No dirty commits found, nothing to rewrite", "✓".green());
            return Ok(());
        }
        println!("{} {}", "✓".green(), outcome.message);

        if !args.no_gc {
            info!("Expiring reflog and collecting garbage");
            repository.expire_reflog()?;
            repository.gc()?;
        }

        if args.push {
            repository.push_mirror()?;
            println!("{} Pushed rewritten history", "✓".green());
        } else {
            println!(
                "  Review {} and push with 'git push --mirror'",
                repository.path().display()
            );
        }

        Ok(())
    }

    fn prepare_repository(&self, repo: &str) -> Result<GitRepository> {
        if !is_remote_url(repo) {
            let path = Path::new(repo);
            if !path.exists() {
                return Err(BfgError::RepositoryNotFound(repo.to_string()));
            }
            return GitRepository::open(path);
        }

        let working = WorkingDirectory::new(self.config.working_dir());
        let removed = working.cleanup_old_repositories(self.config.workspace.max_age_hours);
        if !removed.is_empty() {
            warn!("Pruned {} stale mirror clone(s)", removed.len());
        }

        let dest = working.create_subdirectory(&repository_directory_name(repo))?;
        GitRepository::clone_mirror(repo, &dest)
    }
}

fn failure(outcome: CleanOutcome) -> BfgError {
    match outcome.error {
        Some(error) => {
            BfgError::OperationFailed(format!("{}: {}", outcome.message, error.trim()))
        }
        None => BfgError::OperationFailed(outcome.message),
    }
}

/// `https://`, `ssh://`, `file://` and scp-style `git@host:path` are cloned.
pub fn is_remote_url(repo: &str) -> bool {
    repo.contains("://") || (repo.starts_with("git@") && repo.contains(':'))
}
