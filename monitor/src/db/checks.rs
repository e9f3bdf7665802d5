//! チェックレコードデータベース操作

use sqlx::SqlitePool;
use upcheck_common::types::{CheckRecord, CheckState, UrlSummary};

/// チェックレコードを1件挿入する
///
/// idはDBが採番する。挿入は単一のINSERTでアトミックに行われる
pub async fn insert_check(pool: &SqlitePool, record: &CheckRecord) -> Result<i64, sqlx::Error> {
    let checked_at = record.checked_at.to_rfc3339();

    let result = sqlx::query(
        r#"
        INSERT INTO checks (url, checked_at, status_code, state, latency_ms)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(&record.url)
    .bind(&checked_at)
    .bind(record.status_code as i32)
    .bind(record.state.as_str())
    .bind(record.latency_ms as i64)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// URL別の集計を取得する
///
/// 全履歴レコードを対象に、チェック回数・ok回数・平均レイテンシを返す。
/// 平均はレスポンスなし（latency_ms=0で記録）の行も分母に含むため、
/// 失敗が混ざると実際より低い値になる。行順はURL昇順で決定的
pub async fn aggregate_by_url(pool: &SqlitePool) -> Result<Vec<UrlSummary>, sqlx::Error> {
    let rows = sqlx::query_as::<_, UrlSummaryRow>(
        r#"
        SELECT url,
               COUNT(*) AS total,
               COALESCE(SUM(CASE WHEN state = ? THEN 1 ELSE 0 END), 0) AS ok_count,
               AVG(latency_ms) AS avg_latency_ms
        FROM checks
        GROUP BY url
        ORDER BY url
        "#,
    )
    .bind(CheckState::Ok.as_str())
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|r| r.into()).collect())
}

// --- Internal Row Types ---

#[derive(sqlx::FromRow)]
struct UrlSummaryRow {
    url: String,
    total: i64,
    ok_count: i64,
    avg_latency_ms: Option<f64>,
}

impl From<UrlSummaryRow> for UrlSummary {
    fn from(row: UrlSummaryRow) -> Self {
        UrlSummary {
            url: row.url,
            total: row.total,
            ok_count: row.ok_count,
            avg_latency_ms: row.avg_latency_ms,
        }
    }
}
