use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary BFGM_HOME, removed when the guard is dropped.
pub struct TestHomeGuard {
    temp: TempDir,
}

#[allow(dead_code)]
impl TestHomeGuard {
    pub fn new() -> Self {
        let temp = tempfile::Builder::new()
            .prefix("bfgm-home-")
            .tempdir()
            .expect("Failed to create test home directory");
        Self { temp }
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn bfg_dir(&self) -> PathBuf {
        self.path().join("bfg")
    }

    pub fn working_dir(&self) -> PathBuf {
        self.path().join("working")
    }

    pub fn setup_bfgm_structure(&self) -> &Self {
        fs::create_dir_all(self.bfg_dir()).expect("Failed to create bfg directory");
        fs::create_dir_all(self.working_dir()).expect("Failed to create working directory");
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creates_and_cleans_up_directory() {
        let test_path = {
            let guard = TestHomeGuard::new();
            let path = guard.path().to_path_buf();
            assert!(path.exists());
            path
        };
        assert!(!test_path.exists());
    }

    #[test]
    fn test_setup_bfgm_structure() {
        let guard = TestHomeGuard::new();
        guard.setup_bfgm_structure();

        assert!(guard.bfg_dir().is_dir());
        assert!(guard.working_dir().is_dir());
    }
}
