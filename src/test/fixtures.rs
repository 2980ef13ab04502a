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

use std::fs;
use std::path::{Path, PathBuf};

pub const METADATA_URL: &str = "https://repo.test/maven2/com/madgag/bfg/maven-metadata.xml";
pub const REPOSITORY_BASE: &str = "https://repo.test/maven2/com/madgag/bfg";

pub fn jar_url(version: &str) -> String {
    format!("{REPOSITORY_BASE}/{version}/bfg-{version}.jar")
}

/// Maven metadata document shaped like the one served by Maven Central.
pub fn maven_metadata_xml(latest: &str, release: &str, versions: &[&str]) -> String {
    let versions = versions
        .iter()
        .map(|v| format!("      <version>{v}</version>"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<metadata>
  <groupId>com.madgag</groupId>
  <artifactId>bfg</artifactId>
  <versioning>
    <latest>{latest}</latest>
    <release>{release}</release>
    <versions>
{versions}
    </versions>
    <lastUpdated>20240923212711</lastUpdated>
  </versioning>
</metadata>
"#
    )
}

pub fn jar_bytes(version: &str) -> Vec<u8> {
    format!("PK\u{3}\u{4} fake bfg {version} jar").into_bytes()
}

pub fn place_jar(dir: &Path, version: &str) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join(format!("bfg-{version}.jar"));
    fs::write(&path, jar_bytes(version)).unwrap();
    path
}

pub fn jar_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("bfg-") && name.ends_with(".jar"))
        .collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maven_metadata_xml_lists_versions() {
        let xml = maven_metadata_xml("1.15.0", "1.15.0", &["1.13.0", "1.14.0", "1.15.0"]);
        assert!(xml.contains("<latest>1.15.0</latest>"));
        assert_eq!(xml.matches("<version>").count(), 3);
    }
}
