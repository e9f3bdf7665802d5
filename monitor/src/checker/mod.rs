//! チェック実行
//!
//! 設定されたURLを順番にプローブし、結果を永続化してコンソールに
//! 分類ラインを出力する。1パスの最後にレポートを1回だけ生成する

use reqwest::Client;
use sqlx::SqlitePool;
use std::time::Duration;
use tokio::time::interval;
use tracing::{error, info, warn};
use upcheck_common::config::MonitorConfig;
use upcheck_common::error::{MonitorError, MonitorResult};
use upcheck_common::types::{CheckRecord, CheckState};

use crate::db::checks;
use crate::probe;
use crate::report::Reporter;

/// コンソール出力の分類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// 成功かつ警告しきい値未満
    Ok,
    /// 成功だが警告しきい値以上
    Warning,
    /// 成功だが重大しきい値以上
    Critical,
    /// 成功状態ではない
    Alert,
}

impl Severity {
    /// Severityを文字列に変換
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
            Self::Alert => "ALERT",
        }
    }
}

/// レイテンシしきい値に基づいてコンソール分類を決定する
///
/// 成功状態でなければ常にALERT。しきい値が未設定の段階は判定しない
pub fn classify_severity(
    state: CheckState,
    latency_ms: u32,
    warning_threshold_ms: Option<u32>,
    critical_threshold_ms: Option<u32>,
) -> Severity {
    if !state.is_success() {
        return Severity::Alert;
    }
    if let Some(crit) = critical_threshold_ms {
        if latency_ms >= crit {
            return Severity::Critical;
        }
    }
    if let Some(warn) = warning_threshold_ms {
        if latency_ms >= warn {
            return Severity::Warning;
        }
    }
    Severity::Ok
}

/// アップタイムチェッカー
///
/// 1パスにつき設定されたURLを設定順に逐次プローブする。
/// 並列プローブは行わない
pub struct UptimeChecker {
    config: MonitorConfig,
    client: Client,
    pool: SqlitePool,
    reporter: Reporter,
}

impl UptimeChecker {
    /// 新しいチェッカーを作成
    pub fn new(config: MonitorConfig, pool: SqlitePool) -> Self {
        let client =
            probe::build_client(config.timeout_secs).expect("Failed to create HTTP client");
        let reporter = Reporter::new(pool.clone(), config.report_path.clone());

        Self {
            config,
            client,
            pool,
            reporter,
        }
    }

    /// バックグラウンドで定期実行を開始
    pub fn start(self) {
        tokio::spawn(async move {
            self.monitor_loop().await;
        });
    }

    /// 監視ループ
    async fn monitor_loop(&self) {
        let mut timer = interval(Duration::from_secs(self.config.check_interval_secs));

        info!(
            interval_secs = self.config.check_interval_secs,
            url_count = self.config.urls.len(),
            "Uptime checker started"
        );

        loop {
            timer.tick().await;

            if let Err(e) = self.run_pass().await {
                error!("Check pass failed: {}", e);
            }
        }
    }

    /// 1パス実行: 全URLをプローブ → 永続化 → コンソール分類 → レポート生成
    ///
    /// ストレージエラーはそのパスでは回復不能として即座に伝播する
    /// （永続化できなかったプローブ結果に価値はない）
    pub async fn run_pass(&self) -> MonitorResult<()> {
        for url in &self.config.urls {
            let checked_at = chrono::Utc::now();
            let outcome = probe::probe(&self.client, url).await;

            let record = CheckRecord {
                id: 0, // DBで自動採番
                url: url.clone(),
                checked_at,
                status_code: outcome.status_code,
                state: outcome.state,
                latency_ms: outcome.latency_ms,
            };

            checks::insert_check(&self.pool, &record)
                .await
                .map_err(|e| MonitorError::Database(e.to_string()))?;

            let severity = classify_severity(
                outcome.state,
                outcome.latency_ms,
                self.config.warning_threshold_ms,
                self.config.critical_threshold_ms,
            );

            match severity {
                Severity::Ok => info!(
                    url = %url,
                    latency_ms = outcome.latency_ms,
                    "OK"
                ),
                Severity::Warning => warn!(
                    url = %url,
                    latency_ms = outcome.latency_ms,
                    "WARNING: latency above warning threshold"
                ),
                Severity::Critical => error!(
                    url = %url,
                    latency_ms = outcome.latency_ms,
                    "CRITICAL: latency above critical threshold"
                ),
                Severity::Alert => error!(
                    url = %url,
                    state = %outcome.state,
                    status_code = outcome.status_code,
                    "ALERT: endpoint unavailable"
                ),
            }
        }

        self.reporter.render().await
    }
}
