//! Upcheck Monitor Entry Point

use clap::Parser;
use tracing::info;
use upcheck::cli::Cli;
use upcheck::{api, checker, db, logging};
use upcheck_common::config::MonitorConfig;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::init().expect("failed to initialize logging");
    info!("Upcheck v{}", env!("CARGO_PKG_VERSION"));

    // 設定の読み込みと検証（プローブ開始前にfail fast）
    let config = MonitorConfig::load(&cli.config).expect("Failed to load configuration");
    config.validate().expect("Invalid configuration");

    let db_pool = db::init_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");

    // スキーマを冪等に作成
    db::run_migrations(&db_pool)
        .await
        .expect("Failed to run database migrations");

    let checker = checker::UptimeChecker::new(config.clone(), db_pool.clone());

    if cli.once {
        // 単発実行モード: 1パス実行して終了。永続化失敗は即異常終了
        checker.run_pass().await.expect("Check pass failed");
        return;
    }

    // 定期実行モード: バックグラウンドループ（初回tickは即時）＋死活エンドポイント
    checker.start();

    let app = api::create_router();
    let bind_addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .expect("Failed to bind to address");

    info!("Liveness endpoint listening on {}", bind_addr);

    axum::serve(listener, app).await.expect("Server error");
}
