//! Integration Test: チェックパス
//!
//! プローブ → 永続化 → レポート生成のパイプライン全体を検証する。

use sqlx::SqlitePool;
use upcheck::checker::UptimeChecker;
use upcheck::db::{self, checks};
use upcheck::report::Reporter;
use upcheck_common::config::MonitorConfig;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePool::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");
    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

fn test_config(urls: Vec<String>, report_path: &std::path::Path) -> MonitorConfig {
    MonitorConfig {
        urls,
        timeout_secs: 5,
        warning_threshold_ms: Some(500),
        critical_threshold_ms: Some(1000),
        report_path: report_path.to_string_lossy().into_owned(),
        ..MonitorConfig::default()
    }
}

/// 1パスにつき設定URLごとにちょうど1レコードが追記される
#[tokio::test]
async fn test_run_pass_appends_one_record_per_url() {
    let mock_ok = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_ok)
        .await;

    let mock_err = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_err)
        .await;

    let pool = setup_test_db().await;
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(
        vec![mock_ok.uri(), mock_err.uri()],
        &dir.path().join("uptime.md"),
    );

    let checker = UptimeChecker::new(config, pool.clone());

    checker.run_pass().await.unwrap();
    let summaries = checks::aggregate_by_url(&pool).await.unwrap();
    assert_eq!(summaries.len(), 2);
    for summary in &summaries {
        assert_eq!(summary.total, 1);
    }

    // 2パス目で各URLのレコードが2件になる（重複も欠落もなし）
    checker.run_pass().await.unwrap();
    let summaries = checks::aggregate_by_url(&pool).await.unwrap();
    for summary in &summaries {
        assert_eq!(summary.total, 2);
    }

    let ok_summary = summaries.iter().find(|s| s.url == mock_ok.uri()).unwrap();
    assert_eq!(ok_summary.ok_count, 2);
    let err_summary = summaries.iter().find(|s| s.url == mock_err.uri()).unwrap();
    assert_eq!(err_summary.ok_count, 0);
}

/// レコードの内容がプローブ結果を正しく反映する
#[tokio::test]
async fn test_run_pass_records_classification() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock)
        .await;

    let pool = setup_test_db().await;
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(vec![mock.uri()], &dir.path().join("uptime.md"));

    UptimeChecker::new(config, pool.clone())
        .run_pass()
        .await
        .unwrap();

    let rows: Vec<(i64, String, i64)> =
        sqlx::query_as("SELECT status_code, state, latency_ms FROM checks")
            .fetch_all(&pool)
            .await
            .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].0, 403);
    assert_eq!(rows[0].1, "blocked");
}

/// 不変条件: status_code == 0 ⟺ レスポンスなし状態
#[tokio::test]
async fn test_no_response_invariant_holds_for_all_records() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock)
        .await;

    let pool = setup_test_db().await;
    let dir = tempfile::tempdir().unwrap();
    // 正常なURLと到達不能なURLを混在させる
    let config = test_config(
        vec![mock.uri(), "http://127.0.0.1:59999".to_string()],
        &dir.path().join("uptime.md"),
    );

    UptimeChecker::new(config, pool.clone())
        .run_pass()
        .await
        .unwrap();

    let rows: Vec<(i64, String, i64)> =
        sqlx::query_as("SELECT status_code, state, latency_ms FROM checks")
            .fetch_all(&pool)
            .await
            .unwrap();

    assert_eq!(rows.len(), 2);
    for (status_code, state, latency_ms) in &rows {
        let no_response = state == "timeout" || state == "connection_error";
        assert_eq!(*status_code == 0, no_response);
        if no_response {
            assert_eq!(*latency_ms, 0);
        }
    }
}

/// パスの最後にレポートが生成され、再生成で全体が上書きされる
#[tokio::test]
async fn test_run_pass_writes_report() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock)
        .await;

    let pool = setup_test_db().await;
    let dir = tempfile::tempdir().unwrap();
    let report_path = dir.path().join("reports").join("uptime.md");
    let config = test_config(vec![mock.uri()], &report_path);

    UptimeChecker::new(config, pool.clone())
        .run_pass()
        .await
        .unwrap();

    let content = std::fs::read_to_string(&report_path).unwrap();
    assert!(content.starts_with("# Uptime Report"));
    assert!(content.contains(&mock.uri()));
    assert!(content.contains("all healthy"));
}

/// ストアが変化しなければ再レンダリングは生成時刻の行以外同一
#[tokio::test]
async fn test_report_rendering_is_idempotent() {
    let mock = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock)
        .await;

    let pool = setup_test_db().await;
    let dir = tempfile::tempdir().unwrap();
    let report_path = dir.path().join("uptime.md");
    let config = test_config(vec![mock.uri()], &report_path);

    UptimeChecker::new(config, pool.clone())
        .run_pass()
        .await
        .unwrap();
    let first = std::fs::read_to_string(&report_path).unwrap();

    // ストアを変えずにレポートだけ再生成
    Reporter::new(pool.clone(), &report_path).render().await.unwrap();
    let second = std::fs::read_to_string(&report_path).unwrap();

    let first_stable: Vec<&str> = first
        .lines()
        .filter(|l| !l.starts_with("Generated:"))
        .collect();
    let second_stable: Vec<&str> = second
        .lines()
        .filter(|l| !l.starts_with("Generated:"))
        .collect();
    assert_eq!(first_stable, second_stable);
}
