//! エラー型定義
//!
//! MonitorError / MonitorResult

use thiserror::Error;

/// モニター全体で使用するエラー型
#[derive(Debug, Error)]
pub enum MonitorError {
    /// 設定の読み込み・検証エラー
    #[error("Configuration error: {0}")]
    Config(String),

    /// データベースアクセスエラー
    #[error("Database error: {0}")]
    Database(String),

    /// レポート出力エラー
    #[error("Report error: {0}")]
    Report(String),
}

/// モニター用のResult型エイリアス
pub type MonitorResult<T> = Result<T, MonitorError>;
