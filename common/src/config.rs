//! 設定管理
//!
//! MonitorConfig（監視対象URL・タイムアウト・しきい値等）

use crate::error::{MonitorError, MonitorResult};
use serde::{Deserialize, Serialize};

/// モニター設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// 監視対象URLのリスト（設定された順にプローブされる）
    #[serde(default)]
    pub urls: Vec<String>,

    /// リクエストタイムアウト（秒）(デフォルト: 10)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// レイテンシ警告しきい値（ミリ秒、省略可）
    #[serde(default)]
    pub warning_threshold_ms: Option<u32>,

    /// レイテンシ重大しきい値（ミリ秒、省略可）
    #[serde(default)]
    pub critical_threshold_ms: Option<u32>,

    /// データベースURL (デフォルト: "sqlite:upcheck.db")
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// レポート出力パス (デフォルト: "reports/uptime.md")
    #[serde(default = "default_report_path")]
    pub report_path: String,

    /// チェック間隔（秒）(デフォルト: 300)
    #[serde(default = "default_check_interval")]
    pub check_interval_secs: u64,

    /// ホストアドレス (デフォルト: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// ポート番号 (デフォルト: 8080)
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_database_url() -> String {
    "sqlite:upcheck.db".to_string()
}

fn default_report_path() -> String {
    "reports/uptime.md".to_string()
}

fn default_check_interval() -> u64 {
    300
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            timeout_secs: default_timeout_secs(),
            warning_threshold_ms: None,
            critical_threshold_ms: None,
            database_url: default_database_url(),
            report_path: default_report_path(),
            check_interval_secs: default_check_interval(),
            host: default_host(),
            port: default_port(),
        }
    }
}

impl MonitorConfig {
    /// 設定ファイルと環境変数（UPCHECK_*）から設定を読み込む
    ///
    /// ファイルが存在しない場合は環境変数とデフォルト値のみで構築する
    pub fn load(path: &str) -> MonitorResult<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(config::Environment::with_prefix("UPCHECK"))
            .build()
            .map_err(|e| MonitorError::Config(e.to_string()))?;

        settings
            .try_deserialize()
            .map_err(|e| MonitorError::Config(e.to_string()))
    }

    /// 設定の妥当性を検証（プローブ開始前にfail fastする）
    pub fn validate(&self) -> MonitorResult<()> {
        if self.urls.is_empty() {
            return Err(MonitorError::Config(
                "urls must contain at least one target".to_string(),
            ));
        }
        if self.timeout_secs == 0 {
            return Err(MonitorError::Config(
                "timeout_secs must be positive".to_string(),
            ));
        }
        if let (Some(warn), Some(crit)) = (self.warning_threshold_ms, self.critical_threshold_ms) {
            if warn > crit {
                return Err(MonitorError::Config(
                    "warning_threshold_ms must not exceed critical_threshold_ms".to_string(),
                ));
            }
        }
        Ok(())
    }
}
