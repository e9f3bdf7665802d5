//! プローブエンジン
//!
//! 1 URLにつき1回のHTTP GETを発行し、結果をCheckStateに分類する。
//! リトライなし・状態なし。トランスポート障害はエラーではなく
//! 分類結果として返す

use reqwest::Client;
use std::time::{Duration, Instant};
use upcheck_common::types::CheckState;

/// 1回のプローブの結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeOutcome {
    /// HTTPステータスコード（レスポンスなしの場合は0）
    pub status_code: u16,
    /// 分類結果
    pub state: CheckState,
    /// 所要時間（ミリ秒、レスポンスなしの場合は0）
    pub latency_ms: u32,
}

/// プローブ用HTTPクライアントを作成
///
/// タイムアウトを設定し、リダイレクトは追跡しない（3xxは分類対象）
pub fn build_client(timeout_secs: u64) -> reqwest::Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .redirect(reqwest::redirect::Policy::none())
        .build()
}

/// ステータスコードをCheckStateに分類する
pub fn classify_status(status_code: u16) -> CheckState {
    match status_code {
        200 => CheckState::Ok,
        403 => CheckState::Blocked,
        400..=499 => CheckState::ClientError,
        500..=599 => CheckState::ServerError,
        _ => CheckState::Unknown,
    }
}

/// 単一URLをプローブする
///
/// タイムアウトはクライアント構築時の設定に従う。レスポンスが
/// 得られなかった場合はstatus_code=0, latency_ms=0で返す
pub async fn probe(client: &Client, url: &str) -> ProbeOutcome {
    let start = Instant::now();

    match client.get(url).send().await {
        Ok(response) => {
            let latency_ms = start.elapsed().as_millis() as u32;
            let status_code = response.status().as_u16();
            ProbeOutcome {
                status_code,
                state: classify_status(status_code),
                latency_ms,
            }
        }
        Err(e) if e.is_timeout() => ProbeOutcome {
            status_code: 0,
            state: CheckState::Timeout,
            latency_ms: 0,
        },
        Err(_) => ProbeOutcome {
            status_code: 0,
            state: CheckState::ConnectionError,
            latency_ms: 0,
        },
    }
}
