//! Upcheck Monitor
//!
//! URLリストを巡回してアップタイムを記録・集計するモニター

#![warn(missing_docs)]

/// 死活確認用HTTPエンドポイント
pub mod api;

/// チェック実行（プローブ → 永続化 → コンソール分類）
pub mod checker;

/// CLIインターフェース
pub mod cli;

/// データベースアクセス
pub mod db;

/// ロギング初期化ユーティリティ
pub mod logging;

/// プローブエンジン（HTTP GETと状態分類）
pub mod probe;

/// レポート生成
pub mod report;
