use mockito::{Mock, ServerGuard};
use std::fs;
use std::path::{Path, PathBuf};

pub const METADATA_PATH: &str = "/maven2/com/madgag/bfg/maven-metadata.xml";
pub const REPOSITORY_PATH: &str = "/maven2/com/madgag/bfg";

/// Maven metadata document shaped like the one served by Maven Central.
#[allow(dead_code)]
pub fn maven_metadata_xml(latest: &str, versions: &[&str]) -> String {
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
    <release>{latest}</release>
    <versions>
{versions}
    </versions>
    <lastUpdated>20240923212711</lastUpdated>
  </versioning>
</metadata>
"#
    )
}

#[allow(dead_code)]
pub fn jar_bytes(version: &str) -> Vec<u8> {
    format!("PK\u{3}\u{4} fake bfg {version} jar").into_bytes()
}

#[allow(dead_code)]
pub fn jar_path(version: &str) -> String {
    format!("{REPOSITORY_PATH}/{version}/bfg-{version}.jar")
}

#[allow(dead_code)]
pub fn mock_metadata(server: &mut ServerGuard, latest: &str, versions: &[&str]) -> Mock {
    server
        .mock("GET", METADATA_PATH)
        .with_status(200)
        .with_header("content-type", "text/xml")
        .with_body(maven_metadata_xml(latest, versions))
        .create()
}

#[allow(dead_code)]
pub fn mock_jar(server: &mut ServerGuard, version: &str) -> Mock {
    let body = jar_bytes(version);
    server
        .mock("GET", jar_path(version).as_str())
        .with_status(200)
        .with_header("content-type", "application/java-archive")
        .with_header("content-length", &body.len().to_string())
        .with_body(body)
        .create()
}

#[allow(dead_code)]
pub fn metadata_url(server: &ServerGuard) -> String {
    format!("{}{METADATA_PATH}", server.url())
}

#[allow(dead_code)]
pub fn repository_base(server: &ServerGuard) -> String {
    format!("{}{REPOSITORY_PATH}", server.url())
}

#[allow(dead_code)]
pub fn place_jar(dir: &Path, version: &str) -> PathBuf {
    fs::create_dir_all(dir).unwrap();
    let path = dir.join(format!("bfg-{version}.jar"));
    fs::write(&path, jar_bytes(version)).unwrap();
    path
}

#[allow(dead_code)]
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
