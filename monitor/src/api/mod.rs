//! 死活確認用HTTPエンドポイント
//!
//! 監視パイプラインからは独立した、オーケストレーション基盤向けの
//! 固定レスポンスのみを返す境界

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

/// APIルーターを作成
pub fn create_router() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
}

/// GET / - 名前とバージョンを返す
async fn root() -> Json<Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /health - 固定の死活応答
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
