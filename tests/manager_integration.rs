mod common;
use bfgm::config::BfgmConfig;
use bfgm::manager::BfgJarManager;
use common::*;
use mockito::Server;
use std::fs;
use std::sync::Arc;
use std::thread;

fn config_for(server: &mockito::ServerGuard, home: &TestHomeGuard) -> BfgmConfig {
    let mut config = BfgmConfig::with_home(home.path());
    config.metadata.url = metadata_url(server);
    config.download.repository_base = repository_base(server);
    config.download.timeout_secs = 10;
    config
}

#[test]
fn test_first_run_downloads_latest() {
    let mut server = Server::new();
    let metadata = mock_metadata(&mut server, "1.14.0", &["1.13.0", "1.14.0"]);
    let jar = mock_jar(&mut server, "1.14.0");

    let home = TestHomeGuard::new();
    let manager = BfgJarManager::new(&config_for(&server, &home));

    let result = manager.check_and_update();

    assert!(result.success, "{result:?}");
    assert_eq!(result.version.as_deref(), Some("1.14.0"));
    assert_eq!(result.message, "Successfully downloaded BFG 1.14.0");
    metadata.assert();
    jar.assert();

    let path = home.bfg_dir().join("bfg-1.14.0.jar");
    assert_eq!(fs::read(&path).unwrap(), jar_bytes("1.14.0"));
    assert_eq!(manager.jar_path().unwrap(), path);
}

#[test]
fn test_outdated_jar_is_replaced() {
    let mut server = Server::new();
    let _metadata = mock_metadata(&mut server, "1.14.0", &["1.13.0", "1.14.0"]);
    let _jar = mock_jar(&mut server, "1.14.0");

    let home = TestHomeGuard::new();
    place_jar(&home.bfg_dir(), "1.13.0");
    let manager = BfgJarManager::new(&config_for(&server, &home));

    let result = manager.check_and_update();

    assert!(result.success, "{result:?}");
    assert_eq!(jar_files(&home.bfg_dir()), vec!["bfg-1.14.0.jar"]);
    assert_eq!(manager.current_version().as_deref(), Some("1.14.0"));
}

#[test]
fn test_up_to_date_jar_makes_no_download() {
    let mut server = Server::new();
    let _metadata = mock_metadata(&mut server, "1.14.0", &["1.14.0"]);
    let jar = server
        .mock("GET", jar_path("1.14.0").as_str())
        .expect(0)
        .create();

    let home = TestHomeGuard::new();
    place_jar(&home.bfg_dir(), "1.14.0");
    let manager = BfgJarManager::new(&config_for(&server, &home));

    let result = manager.check_and_update();

    assert!(result.success);
    assert_eq!(result.message, "BFG 1.14.0 is up to date");
    jar.assert();
}

#[test]
fn test_missing_version_reports_http_status() {
    let mut server = Server::new();
    let _missing = server
        .mock("GET", jar_path("9.9.9").as_str())
        .with_status(404)
        .create();

    let home = TestHomeGuard::new();
    let manager = BfgJarManager::new(&config_for(&server, &home));

    let result = manager.download_specific_version("9.9.9");

    assert!(!result.success);
    assert!(result.message.contains("HTTP 404"), "{}", result.message);
    assert!(jar_files(&home.bfg_dir()).is_empty());
    assert_eq!(manager.status().error, result.error);
}

#[test]
fn test_feed_outage_keeps_cached_jar() {
    let mut server = Server::new();
    let _metadata = server.mock("GET", METADATA_PATH).with_status(503).create();

    let home = TestHomeGuard::new();
    place_jar(&home.bfg_dir(), "1.13.0");
    let manager = BfgJarManager::new(&config_for(&server, &home));

    let result = manager.check_and_update();
    let status = manager.status();

    assert!(!result.success);
    assert!(result.message.starts_with("Failed to check for updates"));
    assert!(status.is_available);
    assert_eq!(status.version.as_deref(), Some("1.13.0"));
    assert!(status.error.is_some());
}

#[test]
fn test_available_versions_in_feed_order() {
    let mut server = Server::new();
    let _metadata = mock_metadata(&mut server, "1.14.0", &["1.12.3", "1.13.0", "1.14.0"]);

    let home = TestHomeGuard::new();
    let manager = BfgJarManager::new(&config_for(&server, &home));

    assert_eq!(
        manager.available_versions(),
        vec!["1.12.3", "1.13.0", "1.14.0"]
    );
}

#[test]
fn test_parallel_updates_leave_one_jar() {
    let mut server = Server::new();
    let _metadata = mock_metadata(&mut server, "1.14.0", &["1.14.0"]);
    let _jar = mock_jar(&mut server, "1.14.0");

    let home = TestHomeGuard::new();
    let manager = Arc::new(BfgJarManager::new(&config_for(&server, &home)));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let manager = Arc::clone(&manager);
            thread::spawn(move || manager.check_and_update())
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert!(results.iter().any(|r| r.success));
    for result in results.iter().filter(|r| !r.success) {
        assert_eq!(result.message, "Download already in progress");
    }
    assert_eq!(jar_files(&home.bfg_dir()), vec!["bfg-1.14.0.jar"]);
    assert!(!manager.status().is_downloading);
}
