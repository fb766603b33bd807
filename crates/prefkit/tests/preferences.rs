//! End-to-end behavior of `Preferences` over the SQLite and memory stores.

use std::time::Duration;

use futures::StreamExt;
use prefkit::{MemoryStore, Preferences, PreferencesConfig};
use proptest::prelude::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn open_in(dir: &tempfile::TempDir) -> Preferences<prefkit::SqliteStore> {
    let config = PreferencesConfig::default().with_directory(dir.path());
    Preferences::open(&config).unwrap()
}

#[tokio::test]
async fn concrete_scenarios() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let prefs = open_in(&dir);

    prefs.set_int("retries", 3).await.unwrap();
    assert_eq!(prefs.get_int("retries", -1).await.unwrap(), 3);

    assert!(!prefs.get_bool("unset_flag", false).await.unwrap());

    let mut names = prefs.string_flow("name", Some("anon".into())).unwrap();
    assert_eq!(names.next().await.unwrap().unwrap(), "anon");

    prefs.set_string("name", "alice").await.unwrap();
    let next = tokio::time::timeout(Duration::from_secs(2), names.next())
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    assert_eq!(next, "alice");
}

#[tokio::test]
async fn values_survive_reopen() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();

    {
        let prefs = open_in(&dir);
        prefs.set_bool("onboarded", true).await.unwrap();
        prefs.set_float("volume", 0.75).await.unwrap();
        prefs.set_long("last_sync", 1_700_000_000_123).await.unwrap();
    }

    let prefs = open_in(&dir);
    assert!(prefs.get_bool("onboarded", false).await.unwrap());
    assert_eq!(prefs.get_float("volume", -1.0).await.unwrap(), 0.75);
    assert_eq!(prefs.get_long("last_sync", -1).await.unwrap(), 1_700_000_000_123);
    assert!(dir.path().join("API_SETTINGS_FILE.db").exists());
}

#[tokio::test]
async fn open_creates_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    let config = PreferencesConfig::default()
        .with_name("settings")
        .with_directory(&nested);

    let prefs = Preferences::open(&config).unwrap();
    prefs.set_int("x", 1).await.unwrap();
    assert!(nested.join("settings.db").exists());
}

#[tokio::test]
async fn flows_on_different_keys_are_independent() {
    let prefs = Preferences::new(MemoryStore::new());
    let mut retries = prefs.int_flow("retries", -1).unwrap();
    let mut ratio = prefs.double_flow("ratio", -1.0).unwrap();

    assert_eq!(retries.next().await.unwrap().unwrap(), -1);
    assert_eq!(ratio.next().await.unwrap().unwrap(), -1.0);

    prefs.set_int("retries", 5).await.unwrap();
    let next = tokio::time::timeout(Duration::from_secs(1), retries.next())
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    assert_eq!(next, 5);

    // Other keys re-emit their current value on any change
    let ratio_next = tokio::time::timeout(Duration::from_secs(1), ratio.next())
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    assert_eq!(ratio_next, -1.0);
}

#[tokio::test]
async fn concurrent_writers_last_commit_wins() {
    let prefs = Preferences::new(MemoryStore::new());

    let mut handles = Vec::new();
    for i in 0..16 {
        let prefs = prefs.clone();
        handles.push(tokio::spawn(async move {
            prefs.set_int(&format!("key{}", i), i).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let snapshot = prefs.snapshot().await.unwrap();
    assert_eq!(snapshot.len(), 16);
    for i in 0..16 {
        assert_eq!(prefs.get_int(&format!("key{}", i), -1).await.unwrap(), i);
    }
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn set_then_get_ignores_default(name in "[a-z][a-z0-9_]{0,15}", value in any::<i32>(), default in any::<i32>()) {
        let got = runtime().block_on(async {
            let prefs = Preferences::new(MemoryStore::new());
            prefs.set_int(&name, value).await.unwrap();
            prefs.get_int(&name, default).await.unwrap()
        });
        prop_assert_eq!(got, value);
    }

    #[test]
    fn unwritten_keys_return_default(name in "[a-z][a-z0-9_]{0,15}", default in ".*") {
        let got = runtime().block_on(async {
            let prefs = Preferences::new(MemoryStore::new());
            prefs.get_string(&name, default.clone()).await.unwrap()
        });
        prop_assert_eq!(got, default);
    }

    #[test]
    fn double_roundtrip_through_sqlite(value in -1.0e12f64..1.0e12) {
        let got = runtime().block_on(async {
            let prefs = Preferences::new(prefkit::SqliteStore::open_memory().unwrap());
            prefs.set_double("ratio", value).await.unwrap();
            prefs.get_double("ratio", -1.0).await.unwrap()
        });
        prop_assert_eq!(got, value);
    }
}
