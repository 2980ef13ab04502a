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

use crate::error::{BfgError, Result};
use log::{debug, info};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Captured output of a successful git invocation.
#[derive(Debug, Clone, Default)]
pub struct GitOutput {
    pub stdout: String,
    pub stderr: String,
}

/// A bare mirror clone driven through the `git` CLI.
pub struct GitRepository {
    path: PathBuf,
    git_command: String,
}

impl GitRepository {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !path.is_dir() {
            return Err(BfgError::RepositoryNotFound(path.display().to_string()));
        }
        Ok(Self {
            path,
            git_command: "git".to_string(),
        })
    }

    /// `git clone --mirror <url> <dest>`
    pub fn clone_mirror(url: &str, dest: &Path) -> Result<Self> {
        info!("Cloning mirror of {url} into {}", dest.display());
        let args = [
            OsStr::new("clone"),
            OsStr::new("--mirror"),
            OsStr::new(url),
            dest.as_os_str(),
        ];
        run_git("git", None, args)?;
        Self::open(dest)
    }

    pub fn with_git_command(mut self, git_command: impl Into<String>) -> Self {
        self.git_command = git_command.into();
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn expire_reflog(&self) -> Result<GitOutput> {
        self.git(&["reflog", "expire", "--expire=now", "--all"])
    }

    pub fn gc(&self) -> Result<GitOutput> {
        self.git(&["gc", "--prune=now", "--aggressive"])
    }

    pub fn push_mirror(&self) -> Result<GitOutput> {
        self.git(&["push", "--mirror"])
    }

    fn git(&self, args: &[&str]) -> Result<GitOutput> {
        run_git(&self.git_command, Some(&self.path), args.iter().copied().map(OsStr::new))
    }
}

fn run_git<'a>(
    git: &str,
    cwd: Option<&Path>,
    args: impl IntoIterator<Item = &'a OsStr>,
) -> Result<GitOutput> {
    let args: Vec<&OsStr> = args.into_iter().collect();
    let rendered = std::iter::once(git.to_string())
        .chain(args.iter().map(|a| a.to_string_lossy().into_owned()))
        .collect::<Vec<_>>()
        .join(" ");
    debug!("Running {rendered}");

    let mut command = Command::new(git);
    command.args(&args);
    if let Some(cwd) = cwd {
        command.current_dir(cwd);
    }

    let output = command.output().map_err(|e| BfgError::CommandFailed {
        command: rendered.clone(),
        code: None,
        stderr: e.to_string(),
    })?;

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    if !output.status.success() {
        return Err(BfgError::CommandFailed {
            command: rendered,
            code: output.status.code(),
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(GitOutput { stdout, stderr })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_missing_repository() {
        let temp = TempDir::new().unwrap();
        let result = GitRepository::open(temp.path().join("missing.git"));

        assert!(matches!(result, Err(BfgError::RepositoryNotFound(_))));
    }

    #[test]
    fn test_missing_git_binary() {
        let temp = TempDir::new().unwrap();
        let repo = GitRepository::open(temp.path())
            .unwrap()
            .with_git_command("bfgm-no-such-git");

        match repo.gc() {
            Err(BfgError::CommandFailed { command, code, .. }) => {
                assert_eq!(command, "bfgm-no-such-git gc --prune=now --aggressive");
                assert_eq!(code, None);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_non_zero_exit_is_command_failed() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let fake = temp.path().join("fake-git");
        std::fs::write(&fake, "#!/bin/sh\necho \"fatal: $1 refused\" >&2\nexit 128\n").unwrap();
        std::fs::set_permissions(&fake, std::fs::Permissions::from_mode(0o755)).unwrap();

        let repo = GitRepository::open(temp.path())
            .unwrap()
            .with_git_command(fake.to_string_lossy());

        match repo.push_mirror() {
            Err(BfgError::CommandFailed { code, stderr, .. }) => {
                assert_eq!(code, Some(128));
                assert_eq!(stderr, "fatal: push refused");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_command_runs_in_repository() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let fake = temp.path().join("fake-git");
        std::fs::write(&fake, "#!/bin/sh\necho \"$*\"\npwd\n").unwrap();
        std::fs::set_permissions(&fake, std::fs::Permissions::from_mode(0o755)).unwrap();

        let repo = GitRepository::open(temp.path())
            .unwrap()
            .with_git_command(fake.to_string_lossy());
        let output = repo.expire_reflog().unwrap();

        let mut lines = output.stdout.lines();
        assert_eq!(lines.next(), Some("reflog expire --expire=now --all"));
        let cwd = PathBuf::from(lines.next().unwrap());
        assert_eq!(
            cwd.canonicalize().unwrap(),
            temp.path().canonicalize().unwrap()
        );
    }
}
