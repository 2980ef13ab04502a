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
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const JAR_PREFIX: &str = "bfg-";
pub const JAR_SUFFIX: &str = ".jar";

pub fn jar_file_name(version: &str) -> String {
    format!("{JAR_PREFIX}{version}{JAR_SUFFIX}")
}

/// `bfg-1.15.0.jar` -> `1.15.0`
pub fn parse_jar_version(file_name: &str) -> Option<&str> {
    file_name
        .strip_prefix(JAR_PREFIX)?
        .strip_suffix(JAR_SUFFIX)
        .filter(|version| !version.is_empty())
}

/// The directory holding the cached `bfg-<version>.jar`.
#[derive(Debug, Clone)]
pub struct JarCache {
    dir: PathBuf,
}

impl JarCache {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn jar_path(&self, version: &str) -> PathBuf {
        self.dir.join(jar_file_name(version))
    }

    /// Names of the entries following the jar naming convention, sorted.
    pub fn jar_names(&self) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let name = entry?.file_name().to_string_lossy().into_owned();
            if parse_jar_version(&name).is_some() {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    /// Version of the first cached jar; unreadable directories count as empty.
    pub fn current_version(&self) -> Option<String> {
        match self.jar_names() {
            Ok(names) => names
                .first()
                .and_then(|name| parse_jar_version(name))
                .map(str::to_string),
            Err(e) => {
                log::warn!("Error reading BFG directory {}: {e}", self.dir.display());
                None
            }
        }
    }

    pub fn remove_jar(&self, version: &str) -> Result<()> {
        let path = self.jar_path(version);
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                BfgError::Filesystem(format!("Failed to remove {}: {e}", path.display()))
            })?;
        }
        Ok(())
    }

    /// Remove every cached jar, returning the removed file names.
    pub fn remove_all_jars(&self) -> Result<Vec<String>> {
        let names = self.jar_names().map_err(|e| {
            BfgError::Filesystem(format!("Failed to read {}: {e}", self.dir.display()))
        })?;

        for name in &names {
            let path = self.dir.join(name);
            fs::remove_file(&path).map_err(|e| {
                BfgError::Filesystem(format!("Failed to remove {}: {e}", path.display()))
            })?;
            log::info!("Removed old BFG jar: {name}");
        }

        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::fixtures::place_jar;
    use tempfile::TempDir;

    #[test]
    fn test_jar_naming() {
        assert_eq!(jar_file_name("1.14.0"), "bfg-1.14.0.jar");
        assert_eq!(parse_jar_version("bfg-1.14.0.jar"), Some("1.14.0"));
        assert_eq!(parse_jar_version("bfg-1.15.0-SNAPSHOT.jar"), Some("1.15.0-SNAPSHOT"));
        assert_eq!(parse_jar_version("bfg-.jar"), None);
        assert_eq!(parse_jar_version("bfg.jar"), None);
        assert_eq!(parse_jar_version("bfg-1.14.0.jar.part"), None);
        assert_eq!(parse_jar_version("notes.txt"), None);
    }

    #[test]
    fn test_current_version_ignores_other_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("notes.txt"), b"hi").unwrap();
        fs::write(temp.path().join("bfg.jar"), b"hi").unwrap();
        let cache = JarCache::new(temp.path().to_path_buf());

        assert_eq!(cache.current_version(), None);

        place_jar(temp.path(), "1.14.0");
        assert_eq!(cache.current_version(), Some("1.14.0".to_string()));
    }

    #[test]
    fn test_current_version_missing_directory() {
        let temp = TempDir::new().unwrap();
        let cache = JarCache::new(temp.path().join("does-not-exist"));

        assert_eq!(cache.current_version(), None);
    }

    #[test]
    fn test_remove_all_jars() {
        let temp = TempDir::new().unwrap();
        place_jar(temp.path(), "1.13.0");
        place_jar(temp.path(), "1.14.0");
        fs::write(temp.path().join("keep.txt"), b"keep").unwrap();
        let cache = JarCache::new(temp.path().to_path_buf());

        let removed = cache.remove_all_jars().unwrap();

        assert_eq!(removed, vec!["bfg-1.13.0.jar", "bfg-1.14.0.jar"]);
        assert!(cache.jar_names().unwrap().is_empty());
        assert!(temp.path().join("keep.txt").exists());
    }

    #[test]
    fn test_remove_jar_is_noop_when_missing() {
        let temp = TempDir::new().unwrap();
        let cache = JarCache::new(temp.path().to_path_buf());

        assert!(cache.remove_jar("1.14.0").is_ok());

        place_jar(temp.path(), "1.14.0");
        cache.remove_jar("1.14.0").unwrap();
        assert!(!cache.jar_path("1.14.0").exists());
    }
}
