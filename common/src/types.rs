//! 型定義
//!
//! CheckState, CheckRecord, UrlSummary等の共有型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// プローブ結果の分類状態
///
/// 排他的かつ網羅的な閉じた列挙。レスポンスが得られなかった場合は
/// Timeout / ConnectionError のいずれかになり、status_codeは0になる。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CheckState {
    /// HTTP 200
    Ok,
    /// HTTP 403（意図的な遮断）
    Blocked,
    /// HTTP 400-499（403を除く）
    ClientError,
    /// HTTP 500-599
    ServerError,
    /// 上記以外のステータスコード（1xx/3xx等）
    #[default]
    Unknown,
    /// タイムアウト（レスポンスなし）
    Timeout,
    /// 接続失敗（DNS・TCP・TLS等、レスポンスなし）
    ConnectionError,
}

impl CheckState {
    /// CheckStateを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Blocked => "blocked",
            Self::ClientError => "client_error",
            Self::ServerError => "server_error",
            Self::Unknown => "unknown",
            Self::Timeout => "timeout",
            Self::ConnectionError => "connection_error",
        }
    }

    /// 稼働中とみなす状態か（アップタイム集計の分子）
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// レスポンスを受信できなかった状態か
    ///
    /// この状態のレコードはstatus_code=0, latency_ms=0で記録される
    pub fn is_no_response(&self) -> bool {
        matches!(self, Self::Timeout | Self::ConnectionError)
    }
}

impl FromStr for CheckState {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "ok" => Self::Ok,
            "blocked" => Self::Blocked,
            "client_error" => Self::ClientError,
            "server_error" => Self::ServerError,
            "timeout" => Self::Timeout,
            "connection_error" => Self::ConnectionError,
            _ => Self::Unknown,
        })
    }
}

impl std::fmt::Display for CheckState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// チェックレコード
///
/// 1回のプローブ結果を表す不変の行。書き込み後は更新・削除されない。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRecord {
    /// 自動インクリメントID（DBが採番、挿入順に単調増加）
    pub id: i64,
    /// プローブ対象URL（設定に書かれたままの文字列）
    pub url: String,
    /// プローブ開始時刻（UTC）
    pub checked_at: DateTime<Utc>,
    /// HTTPステータスコード（レスポンスなしの場合は0）
    pub status_code: u16,
    /// 分類結果
    pub state: CheckState,
    /// 所要時間（ミリ秒、レスポンスなしの場合は0）
    pub latency_ms: u32,
}

/// URL別の集計結果
///
/// レポート生成時に全履歴から計算される一時的な行。永続化されない。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UrlSummary {
    /// 対象URL
    pub url: String,
    /// 全チェック回数
    pub total: i64,
    /// ok状態のチェック回数
    pub ok_count: i64,
    /// 平均レイテンシ（ミリ秒）。レコードが無い場合はNone
    pub avg_latency_ms: Option<f64>,
}

impl UrlSummary {
    /// アップタイム率（%、小数第2位まで）
    ///
    /// total=0の場合はゼロ除算にせず0を返す
    pub fn uptime_percent(&self) -> f64 {
        if self.total > 0 {
            let raw = self.ok_count as f64 / self.total as f64 * 100.0;
            (raw * 100.0).round() / 100.0
        } else {
            0.0
        }
    }

    /// 健全性ラベル（アップタイム100%なら "all healthy"）
    pub fn health_label(&self) -> &'static str {
        if self.total > 0 && self.ok_count == self.total {
            "all healthy"
        } else {
            "has incidents"
        }
    }
}
