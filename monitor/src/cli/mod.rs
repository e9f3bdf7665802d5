//! CLI module for upcheck
//!
//! Provides command-line interface for the uptime monitor.

use clap::Parser;

/// Upcheck - Recurring endpoint availability monitor
#[derive(Parser, Debug)]
#[command(name = "upcheck")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    UPCHECK_LOG_LEVEL        Log level (default: info)
    UPCHECK_DATABASE_URL     Database URL (default: sqlite:upcheck.db)
    UPCHECK_REPORT_PATH      Report output path (default: reports/uptime.md)
    UPCHECK_TIMEOUT_SECS     Per-request timeout in seconds (default: 10)
    UPCHECK_HOST             Liveness endpoint bind address (default: 0.0.0.0)
    UPCHECK_PORT             Liveness endpoint port (default: 8080)
"#)]
pub struct Cli {
    /// 設定ファイルのパス
    #[arg(short, long, default_value = "upcheck.yaml")]
    pub config: String,

    /// 1パスだけ実行して終了する（外部スケジューラ向け）
    #[arg(long)]
    pub once: bool,
}
