//! レポート生成
//!
//! 全履歴の集計からMarkdownのサマリーを生成し、固定パスに上書き出力する。
//! レポートはバージョン管理されず、常に最新の1枚のみ

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use std::path::PathBuf;
use upcheck_common::error::{MonitorError, MonitorResult};
use upcheck_common::types::UrlSummary;

use crate::db::checks;

/// アップタイムレポートのレンダラー
pub struct Reporter {
    pool: SqlitePool,
    report_path: PathBuf,
}

impl Reporter {
    /// 新しいレポーターを作成
    pub fn new(pool: SqlitePool, report_path: impl Into<PathBuf>) -> Self {
        Self {
            pool,
            report_path: report_path.into(),
        }
    }

    /// レポートを生成してファイルに上書き出力する
    pub async fn render(&self) -> MonitorResult<()> {
        let rows = checks::aggregate_by_url(&self.pool)
            .await
            .map_err(|e| MonitorError::Database(e.to_string()))?;

        let content = render_markdown(&rows, Utc::now());

        if let Some(parent) = self.report_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| MonitorError::Report(e.to_string()))?;
            }
        }

        tokio::fs::write(&self.report_path, content)
            .await
            .map_err(|e| MonitorError::Report(e.to_string()))?;

        Ok(())
    }
}

/// 集計行からMarkdownドキュメントを生成する
///
/// 同じ集計行に対しては生成時刻の行を除きバイト単位で同一の出力になる
pub fn render_markdown(rows: &[UrlSummary], generated_at: DateTime<Utc>) -> String {
    let mut out = String::new();
    out.push_str("# Uptime Report\n\n");
    out.push_str(&format!(
        "Generated: {}\n\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    if rows.is_empty() {
        out.push_str("No checks recorded yet.\n");
        return out;
    }

    out.push_str("| URL | Checks | Uptime | Avg latency | Status |\n");
    out.push_str("|-----|--------|--------|-------------|--------|\n");

    for row in rows {
        let avg = match row.avg_latency_ms {
            Some(v) => format!("{} ms", v.round() as i64),
            None => "n/a".to_string(),
        };
        out.push_str(&format!(
            "| {} | {} | {:.2}% | {} | {} |\n",
            row.url,
            row.total,
            row.uptime_percent(),
            avg,
            row.health_label()
        ));
    }

    out
}
