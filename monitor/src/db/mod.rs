//! データベースアクセス層
//!
//! SQLiteベースのチェックレコード永続化

/// チェックレコードの挿入・集計
pub mod checks;

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::SqlitePool;
use std::str::FromStr;

/// データベース接続プールを作成
///
/// ファイルベースのSQLite URLの場合、親ディレクトリが存在しないと
/// ファイルを作成できないため先に作成する。接続はプールから各呼び出し
/// 単位で取得され、すべての経路で確実に解放される。
pub async fn init_pool(database_url: &str) -> sqlx::Result<SqlitePool> {
    if let Some(path) = database_url.strip_prefix("sqlite:") {
        // `sqlite::memory:` のような特殊指定はスキップ
        if !path.starts_with(':') {
            // `sqlite://` 形式に備えてスラッシュを除去し、クエリ部分を除外
            let normalized = path.trim_start_matches("//");
            let path_without_params = normalized.split('?').next().unwrap_or(normalized);
            let db_path = std::path::Path::new(path_without_params);
            if let Some(parent) = db_path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(sqlx::Error::Io)?;
                }
            }
        }
    }

    let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    SqlitePool::connect_with(connect_options).await
}

/// スキーマを冪等に作成する
///
/// 既にスキーマが存在する場合は何もしない。毎回の起動時に安全に呼べる
pub async fn run_migrations(pool: &SqlitePool) -> sqlx::Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| sqlx::Error::Migrate(Box::new(e)))
}
