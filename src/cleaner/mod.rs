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

//! Runs the BFG jar against a mirrored repository.

use crate::config::BfgmConfig;
use crate::error::BfgError;
use log::{debug, info, warn};
use serde::Serialize;
use std::env;
use std::ffi::OsString;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

const REPLACEMENTS_FILE_NAME: &str = "bfg-replacements.txt";
const NO_DIRTY_COMMITS_MARKER: &str = "no dirty commits found";

#[derive(Debug, Clone, Default)]
pub struct CleanOptions {
    pub repo_path: PathBuf,
    pub bfg_path: PathBuf,
    pub text_replacements: Vec<String>,
    pub strip_blobs_bigger_than: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanOutcome {
    pub success: bool,
    pub message: String,
    pub output: Option<String>,
    pub error: Option<String>,
    pub no_dirty_commits: bool,
}

impl CleanOutcome {
    fn failed(message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            output: None,
            error,
            no_dirty_commits: false,
        }
    }
}

/// A fully assembled `java -jar` command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BfgInvocation {
    program: String,
    bfg_path: PathBuf,
    replacements_file: Option<PathBuf>,
    strip_blobs_bigger_than: Option<String>,
    repo_path: PathBuf,
}

impl BfgInvocation {
    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-jar".into(), self.bfg_path.clone().into()];
        if let Some(file) = &self.replacements_file {
            args.push("--replace-text".into());
            args.push(file.clone().into());
        }
        if let Some(size) = &self.strip_blobs_bigger_than {
            args.push("--strip-blobs-bigger-than".into());
            args.push(size.into());
        }
        args.push(self.repo_path.clone().into());
        args
    }
}

impl fmt::Display for BfgInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -jar \"{}\"", self.program, self.bfg_path.display())?;
        if let Some(file) = &self.replacements_file {
            write!(f, " --replace-text \"{}\"", file.display())?;
        }
        if let Some(size) = &self.strip_blobs_bigger_than {
            write!(f, " --strip-blobs-bigger-than {size}")?;
        }
        write!(f, " \"{}\"", self.repo_path.display())
    }
}

pub struct BfgCleaner {
    java_command: String,
    replacements_dir: PathBuf,
}

impl BfgCleaner {
    pub fn new(config: &BfgmConfig) -> Self {
        Self::with_java_command(config.bfg.java_command.clone())
    }

    pub fn with_java_command(java_command: impl Into<String>) -> Self {
        Self {
            java_command: java_command.into(),
            replacements_dir: env::temp_dir(),
        }
    }

    /// Directory that receives the text replacement file.
    pub fn with_replacements_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.replacements_dir = dir.into();
        self
    }

    pub fn replacements_file(&self) -> PathBuf {
        self.replacements_dir.join(REPLACEMENTS_FILE_NAME)
    }

    pub fn build_invocation(&self, options: &CleanOptions) -> BfgInvocation {
        let replacements_file = if options.text_replacements.is_empty() {
            None
        } else {
            Some(self.replacements_file())
        };

        let strip_blobs_bigger_than = options
            .strip_blobs_bigger_than
            .as_deref()
            .map(str::trim)
            .filter(|size| !size.is_empty())
            .map(str::to_string);

        BfgInvocation {
            program: self.java_command.clone(),
            bfg_path: options.bfg_path.clone(),
            replacements_file,
            strip_blobs_bigger_than,
            repo_path: options.repo_path.clone(),
        }
    }

    pub fn clean_repository(&self, options: &CleanOptions) -> CleanOutcome {
        if !options.repo_path.exists() {
            return CleanOutcome::failed("Repository path does not exist", None);
        }
        if !options.bfg_path.exists() {
            return CleanOutcome::failed("BFG jar file path does not exist", None);
        }

        let java = match which::which(&self.java_command) {
            Ok(path) => path,
            Err(e) => {
                debug!("Failed to locate {}: {e}", self.java_command);
                let error = BfgError::JavaNotFound(self.java_command.clone());
                return CleanOutcome::failed("Error cleaning repository", Some(error.to_string()));
            }
        };

        let invocation = self.build_invocation(options);
        if let Some(file) = &invocation.replacements_file
            && let Err(e) = fs::write(file, options.text_replacements.join("\n"))
        {
            return CleanOutcome::failed(
                "Error cleaning repository",
                Some(format!("Failed to write {}: {e}", file.display())),
            );
        }

        info!("Executing BFG command: {invocation}");
        let outcome = run(&java, &invocation);

        if let Some(file) = &invocation.replacements_file
            && let Err(e) = fs::remove_file(file)
        {
            warn!("Failed to remove {}: {e}", file.display());
        }

        outcome
    }
}

fn run(java: &Path, invocation: &BfgInvocation) -> CleanOutcome {
    let output = match Command::new(java).args(invocation.args()).output() {
        Ok(output) => output,
        Err(e) => {
            return CleanOutcome::failed(
                "Error cleaning repository",
                Some(format!("Failed to execute {}: {e}", java.display())),
            );
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    debug!("BFG stdout: {stdout}");
    if !stderr.is_empty() {
        debug!("BFG stderr: {stderr}");
    }

    let no_dirty_commits =
        reports_no_dirty_commits(&stdout) || reports_no_dirty_commits(&stderr);
    let error = (!stderr.trim().is_empty()).then_some(stderr);

    if output.status.success() {
        CleanOutcome {
            success: true,
            message: "Repository cleaned successfully".to_string(),
            output: Some(stdout),
            error,
            no_dirty_commits,
        }
    } else {
        let error = error.or_else(|| match output.status.code() {
            Some(code) => Some(format!("BFG exited with code {code}")),
            None => Some("BFG terminated by signal".to_string()),
        });
        CleanOutcome {
            success: false,
            message: "Error cleaning repository".to_string(),
            output: Some(stdout),
            error,
            no_dirty_commits,
        }
    }
}

pub fn reports_no_dirty_commits(output: &str) -> bool {
    output.to_lowercase().contains(NO_DIRTY_COMMITS_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn options(temp: &TempDir) -> CleanOptions {
        let repo_path = temp.path().join("project.git");
        let bfg_path = temp.path().join("bfg-1.14.0.jar");
        fs::create_dir_all(&repo_path).unwrap();
        fs::write(&bfg_path, b"PK").unwrap();
        CleanOptions {
            repo_path,
            bfg_path,
            ..Default::default()
        }
    }

    #[test]
    fn test_invocation_minimal() {
        let cleaner = BfgCleaner::with_java_command("java");
        let invocation = cleaner.build_invocation(&CleanOptions {
            repo_path: PathBuf::from("/work/project.git"),
            bfg_path: PathBuf::from("/data/bfg/bfg-1.14.0.jar"),
            ..Default::default()
        });

        assert_eq!(
            invocation.to_string(),
            "java -jar \"/data/bfg/bfg-1.14.0.jar\" \"/work/project.git\""
        );
        assert_eq!(invocation.args().len(), 3);
    }

    #[test]
    fn test_invocation_argument_order() {
        let cleaner = BfgCleaner::with_java_command("java").with_replacements_dir("/tmp/x");
        let invocation = cleaner.build_invocation(&CleanOptions {
            repo_path: PathBuf::from("/work/project.git"),
            bfg_path: PathBuf::from("/data/bfg/bfg-1.14.0.jar"),
            text_replacements: vec!["password1".to_string(), "token==>***".to_string()],
            strip_blobs_bigger_than: Some(" 100M ".to_string()),
        });

        assert_eq!(
            invocation.to_string(),
            "java -jar \"/data/bfg/bfg-1.14.0.jar\" --replace-text \"/tmp/x/bfg-replacements.txt\" \
             --strip-blobs-bigger-than 100M \"/work/project.git\""
        );
        let args: Vec<String> = invocation
            .args()
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            vec![
                "-jar",
                "/data/bfg/bfg-1.14.0.jar",
                "--replace-text",
                "/tmp/x/bfg-replacements.txt",
                "--strip-blobs-bigger-than",
                "100M",
                "/work/project.git",
            ]
        );
    }

    #[test]
    fn test_blank_size_filter_is_skipped() {
        let cleaner = BfgCleaner::with_java_command("java");
        let invocation = cleaner.build_invocation(&CleanOptions {
            repo_path: PathBuf::from("/r"),
            bfg_path: PathBuf::from("/b.jar"),
            strip_blobs_bigger_than: Some("   ".to_string()),
            ..Default::default()
        });

        assert!(!invocation.to_string().contains("--strip-blobs-bigger-than"));
    }

    #[test]
    fn test_missing_repository() {
        let temp = TempDir::new().unwrap();
        let mut options = options(&temp);
        options.repo_path = temp.path().join("missing.git");

        let outcome = BfgCleaner::with_java_command("java").clean_repository(&options);

        assert!(!outcome.success);
        assert_eq!(outcome.message, "Repository path does not exist");
    }

    #[test]
    fn test_missing_jar() {
        let temp = TempDir::new().unwrap();
        let mut options = options(&temp);
        options.bfg_path = temp.path().join("missing.jar");

        let outcome = BfgCleaner::with_java_command("java").clean_repository(&options);

        assert!(!outcome.success);
        assert_eq!(outcome.message, "BFG jar file path does not exist");
    }

    #[test]
    fn test_java_not_found() {
        let temp = TempDir::new().unwrap();
        let outcome = BfgCleaner::with_java_command("bfgm-no-such-java-binary")
            .clean_repository(&options(&temp));

        assert!(!outcome.success);
        assert_eq!(outcome.message, "Error cleaning repository");
        assert!(outcome.error.unwrap().contains("bfgm-no-such-java-binary"));
    }

    #[test]
    fn test_reports_no_dirty_commits() {
        assert!(reports_no_dirty_commits(
            "BFG aborting: No refs to update - no dirty commits found??"
        ));
        assert!(reports_no_dirty_commits("No Dirty Commits Found"));
        assert!(!reports_no_dirty_commits("Cleaning commits: 100% (12/12)"));
    }

    #[cfg(unix)]
    fn fake_java(temp: &TempDir, script: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = temp.path().join("fake-java");
        fs::write(&path, format!("#!/bin/sh\n{script}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn test_successful_run_captures_output() {
        let temp = TempDir::new().unwrap();
        let java = fake_java(&temp, "echo \"args: $*\"\necho \"$(cat \"$4\")\"");
        let mut options = options(&temp);
        options.text_replacements = vec!["hunter2".to_string()];

        let cleaner = BfgCleaner::with_java_command(java.to_string_lossy())
            .with_replacements_dir(temp.path());
        let outcome = cleaner.clean_repository(&options);

        assert!(outcome.success, "{outcome:?}");
        assert_eq!(outcome.message, "Repository cleaned successfully");
        let output = outcome.output.unwrap();
        assert!(output.contains("--replace-text"));
        assert!(output.contains("hunter2"));
        assert!(!outcome.no_dirty_commits);
        assert!(!cleaner.replacements_file().exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_no_dirty_commits_detected() {
        let temp = TempDir::new().unwrap();
        let java = fake_java(
            &temp,
            "echo 'BFG aborting: No refs to update - no dirty commits found??'",
        );

        let outcome = BfgCleaner::with_java_command(java.to_string_lossy())
            .clean_repository(&options(&temp));

        assert!(outcome.success);
        assert!(outcome.no_dirty_commits);
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_run_reports_stderr() {
        let temp = TempDir::new().unwrap();
        let java = fake_java(&temp, "echo 'not a git repository' >&2\nexit 3");

        let outcome = BfgCleaner::with_java_command(java.to_string_lossy())
            .clean_repository(&options(&temp));

        assert!(!outcome.success);
        assert_eq!(outcome.message, "Error cleaning repository");
        assert!(outcome.error.unwrap().contains("not a git repository"));
    }
}
