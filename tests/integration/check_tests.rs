use sitewatch::checker::{fingerprint_bytes, run_check, DigestAlgorithm};
use sitewatch::config::Config;
use sitewatch::output::{MemoryNotifier, Severity};
use sitewatch::store::{FileStore, Properties, StateStore};
use sitewatch::{ConfigError, WatchError};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the given state file
fn create_test_config(state_path: &Path) -> Config {
    let mut config = Config::default();
    config.state.path = Some(state_path.to_path_buf());
    config.fetch.timeout_secs = 5;
    config.fetch.connect_timeout_secs = 2;
    config
}

/// Writes a state file into a fresh temp directory
fn write_state(dir: &TempDir, content: &str) -> PathBuf {
    let state_path = dir.path().join(".websitechangetracker").join(".properties");
    fs::create_dir_all(state_path.parent().unwrap()).unwrap();
    fs::write(&state_path, content).unwrap();
    state_path
}

fn load_state(state_path: &Path) -> Properties {
    FileStore::open(state_path).unwrap().load().unwrap()
}

fn sha256_hex(body: &str) -> String {
    fingerprint_bytes(DigestAlgorithm::Sha256, body.as_bytes())
        .as_str()
        .to_string()
}

async fn mount_page(server: &MockServer, page: &str, status: u16, body: &str, times: Option<u64>) {
    let mock = Mock::given(method("GET"))
        .and(path(page))
        .respond_with(ResponseTemplate::new(status).set_body_string(body));
    let mock = match times {
        Some(n) => mock.up_to_n_times(n),
        None => mock,
    };
    mock.mount(server).await;
}

#[tokio::test]
async fn test_new_site_is_added() {
    let server = MockServer::start().await;
    mount_page(&server, "/alpha", 200, "<html>alpha v1</html>", None).await;

    let dir = TempDir::new().unwrap();
    let state_path = write_state(
        &dir,
        &format!("sites=alpha\nurl_alpha={}/alpha\n", server.uri()),
    );

    let mut notifier = MemoryNotifier::new();
    let report = run_check(&create_test_config(&state_path), &mut notifier)
        .await
        .expect("check should succeed");

    assert_eq!(report.added, vec!["alpha"]);
    assert!(report.changed.is_empty() && report.up.is_empty() && report.down.is_empty());

    let state = load_state(&state_path);
    assert_eq!(
        state.get("hash_alpha"),
        Some(sha256_hex("<html>alpha v1</html>").as_str())
    );
    assert_eq!(state.get("down_alpha"), Some("false"));

    assert_eq!(notifier.messages(Severity::Info), vec!["Websites added: alpha"]);
    assert!(notifier.messages(Severity::Warning).is_empty());
}

#[tokio::test]
async fn test_second_run_without_changes_is_quiet() {
    let server = MockServer::start().await;
    mount_page(&server, "/alpha", 200, "stable", None).await;
    mount_page(&server, "/beta", 200, "also stable", None).await;

    let dir = TempDir::new().unwrap();
    let state_path = write_state(
        &dir,
        &format!(
            "sites=alpha, beta\nurl_alpha={uri}/alpha\nurl_beta={uri}/beta\n",
            uri = server.uri()
        ),
    );
    let config = create_test_config(&state_path);

    let first = run_check(&config, &mut MemoryNotifier::new()).await.unwrap();
    assert_eq!(first.added, vec!["alpha", "beta"]);

    let mut notifier = MemoryNotifier::new();
    let second = run_check(&config, &mut notifier).await.unwrap();

    assert!(second.is_empty(), "unexpected report {:?}", second);
    assert_eq!(second.checked, 2);
    assert!(notifier.notifications.is_empty());
}

#[tokio::test]
async fn test_outage_and_recovery_cycle() {
    let server = MockServer::start().await;
    // Mocks registered first take precedence until exhausted
    mount_page(&server, "/alpha", 200, "version 1", Some(1)).await;
    mount_page(&server, "/alpha", 503, "maintenance", Some(1)).await;
    mount_page(&server, "/alpha", 200, "version 2", None).await;

    let dir = TempDir::new().unwrap();
    let state_path = write_state(
        &dir,
        &format!("sites=alpha\nurl_alpha={}/alpha\n", server.uri()),
    );
    let config = create_test_config(&state_path);

    let first = run_check(&config, &mut MemoryNotifier::new()).await.unwrap();
    assert_eq!(first.added, vec!["alpha"]);

    let mut notifier = MemoryNotifier::new();
    let second = run_check(&config, &mut notifier).await.unwrap();
    assert_eq!(second.down, vec!["alpha"]);
    assert!(second.added.is_empty() && second.changed.is_empty() && second.up.is_empty());
    assert_eq!(notifier.messages(Severity::Warning), vec!["Websites down: alpha"]);

    let state = load_state(&state_path);
    assert_eq!(state.get("down_alpha"), Some("true"));
    assert_eq!(state.get("hash_alpha"), Some(sha256_hex("version 1").as_str()));

    let mut notifier = MemoryNotifier::new();
    let third = run_check(&config, &mut notifier).await.unwrap();
    assert_eq!(third.up, vec!["alpha"]);
    assert_eq!(third.changed, vec!["alpha"]);
    assert!(third.down.is_empty());
    assert_eq!(
        notifier.messages(Severity::Info),
        vec!["Websites up again: alpha"]
    );
    assert_eq!(
        notifier.messages(Severity::Warning),
        vec!["Websites changed: alpha"]
    );

    let state = load_state(&state_path);
    assert_eq!(state.get("down_alpha"), Some("false"));
    assert_eq!(state.get("hash_alpha"), Some(sha256_hex("version 2").as_str()));
}

#[tokio::test]
async fn test_new_unreachable_site_is_added_and_down() {
    let server = MockServer::start().await;
    mount_page(&server, "/gone", 404, "not found", None).await;

    let dir = TempDir::new().unwrap();
    let state_path = write_state(
        &dir,
        &format!("sites=gone\nurl_gone={}/gone\n", server.uri()),
    );
    let config = create_test_config(&state_path);

    let report = run_check(&config, &mut MemoryNotifier::new()).await.unwrap();
    assert_eq!(report.added, vec!["gone"]);
    assert_eq!(report.down, vec!["gone"]);

    let state = load_state(&state_path);
    assert_eq!(state.get("hash_gone"), Some("null"));
    assert_eq!(state.get("down_gone"), Some("true"));

    // Still down: nothing new to report
    let again = run_check(&config, &mut MemoryNotifier::new()).await.unwrap();
    assert!(again.is_empty());
}

#[tokio::test]
async fn test_missing_url_is_fatal_and_state_untouched() {
    let server = MockServer::start().await;
    mount_page(&server, "/alpha", 200, "alpha", None).await;

    let dir = TempDir::new().unwrap();
    let before = format!("sites=alpha, beta\nurl_alpha={}/alpha\n", server.uri());
    let state_path = write_state(&dir, &before);

    let mut notifier = MemoryNotifier::new();
    let err = run_check(&create_test_config(&state_path), &mut notifier)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        WatchError::Config(ConfigError::MissingUrl { ref site }) if site == "beta"
    ));
    assert_eq!(fs::read_to_string(&state_path).unwrap(), before);
    assert_eq!(notifier.notifications.len(), 1);
    assert_eq!(
        notifier.messages(Severity::Error),
        vec!["Missing url for: beta"]
    );
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_malformed_url_is_fatal() {
    let dir = TempDir::new().unwrap();
    let state_path = write_state(&dir, "sites=alpha\nurl_alpha=://nowhere\n");

    let mut notifier = MemoryNotifier::new();
    let err = run_check(&create_test_config(&state_path), &mut notifier)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        WatchError::Config(ConfigError::MalformedUrl { .. })
    ));
    assert_eq!(
        notifier.messages(Severity::Error),
        vec!["Malformed url: ://nowhere"]
    );
}

#[tokio::test]
async fn test_reads_escaped_state_from_older_tools() {
    let server = MockServer::start().await;
    mount_page(&server, "/alpha", 200, "same", None).await;

    let escaped_uri = server.uri().replace(':', "\\:");
    let dir = TempDir::new().unwrap();
    let state_path = write_state(
        &dir,
        &format!(
            "#\n#Mon Jan 01 00:00:00 UTC 2024\ndebug=\nsites=alpha\nurl_alpha={}/alpha\nhash_alpha={}\ndown_alpha=false\n",
            escaped_uri,
            sha256_hex("same").to_lowercase()
        ),
    );

    let mut notifier = MemoryNotifier::new();
    let report = run_check(&create_test_config(&state_path), &mut notifier)
        .await
        .unwrap();

    assert!(report.is_empty(), "unexpected report {:?}", report);
    assert_eq!(notifier.messages(Severity::Info), vec!["Debug flag set"]);

    let state = load_state(&state_path);
    assert_eq!(
        state.get("url_alpha"),
        Some(format!("{}/alpha", server.uri()).as_str())
    );
    assert!(state.contains("debug"));
}

#[tokio::test]
async fn test_state_file_created_when_missing() {
    let dir = TempDir::new().unwrap();
    let state_path = dir.path().join("fresh").join(".properties");

    let mut notifier = MemoryNotifier::new();
    let err = run_check(&create_test_config(&state_path), &mut notifier)
        .await
        .unwrap_err();

    assert!(matches!(err, WatchError::Config(ConfigError::NoSites)));
    assert!(state_path.is_file());
    assert_eq!(notifier.messages(Severity::Error), vec!["No sites specified!"]);
}

#[tokio::test]
async fn test_md5_state_from_older_tools_is_unchanged() {
    let server = MockServer::start().await;
    mount_page(&server, "/a", 200, "abc", None).await;

    let dir = TempDir::new().unwrap();
    let state_path = write_state(
        &dir,
        &format!(
            "#\n#Mon Jan 01 00:00:00 UTC 2024\nsites=a\nurl_a={}/a\nhash_a=900150983CD24FB0D6963F7D28E17F72\ndown_a=false\n",
            server.uri().replace(':', "\\:")
        ),
    );
    let mut config = create_test_config(&state_path);
    config.fetch.digest = "md5".to_string();

    let mut notifier = MemoryNotifier::new();
    let report = run_check(&config, &mut notifier).await.unwrap();

    assert!(report.is_empty(), "unexpected report {:?}", report);
    assert!(notifier.notifications.is_empty());
    assert_eq!(
        load_state(&state_path).get("hash_a"),
        Some("900150983CD24FB0D6963F7D28E17F72")
    );
}
