//! Aggregate queries backing the reports endpoints.

use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::report::{
    CategoryCount, StatusCount, TransactionReport, TransactionTypeTotals,
};

/// Provides read-only reporting aggregates.
pub struct ReportRepo;

impl ReportRepo {
    /// Event counts per status, every seeded status included.
    pub async fn events_by_status(pool: &PgPool) -> Result<Vec<StatusCount>, sqlx::Error> {
        sqlx::query_as::<_, StatusCount>(
            "SELECT s.id AS status_id, s.name, COUNT(e.id)::bigint AS count
             FROM event_statuses s
             LEFT JOIN events e ON e.status_id = s.id
             GROUP BY s.id, s.name
             ORDER BY s.id ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Money totals per transaction type over an optional date range.
    /// Only `completed` transactions count toward the totals.
    pub async fn transaction_totals(
        pool: &PgPool,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<TransactionReport, sqlx::Error> {
        let types = sqlx::query_as::<_, TransactionTypeTotals>(
            "SELECT tt.id AS type_id, tt.name,
                    COALESCE(SUM(CASE WHEN t.direction = 'income'
                                      THEN t.amount_cents ELSE 0 END), 0)::bigint
                        AS income_cents,
                    COALESCE(SUM(CASE WHEN t.direction = 'expense'
                                      THEN t.amount_cents ELSE 0 END), 0)::bigint
                        AS expense_cents,
                    COUNT(t.id)::bigint AS count
             FROM transaction_types tt
             LEFT JOIN transactions t
               ON t.type_id = tt.id
              AND t.status = 'completed'
              AND ($1::date IS NULL OR t.txn_date >= $1)
              AND ($2::date IS NULL OR t.txn_date <= $2)
             GROUP BY tt.id, tt.name
             ORDER BY tt.id ASC",
        )
        .bind(from)
        .bind(to)
        .fetch_all(pool)
        .await?;

        let income_cents: i64 = types.iter().map(|t| t.income_cents).sum();
        let expense_cents: i64 = types.iter().map(|t| t.expense_cents).sum();
        Ok(TransactionReport {
            income_cents,
            expense_cents,
            net_cents: income_cents - expense_cents,
            types,
        })
    }

    /// Playlist entry counts per category across all events. Categories
    /// nobody has used are absent; uncategorized entries come back under
    /// an empty-string name.
    pub async fn playlist_by_category(pool: &PgPool) -> Result<Vec<CategoryCount>, sqlx::Error> {
        sqlx::query_as::<_, CategoryCount>(
            "SELECT COALESCE(pc.name, '') AS category, COUNT(pe.id)::bigint AS entry_count
             FROM playlist_entries pe
             LEFT JOIN playlist_categories pc ON pc.id = pe.category_id
             GROUP BY COALESCE(pc.name, '')
             ORDER BY entry_count DESC, category ASC",
        )
        .fetch_all(pool)
        .await
    }
}
