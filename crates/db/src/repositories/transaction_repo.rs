//! Repository for the `transactions` and `transaction_types` tables.

use encore_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::transaction::{
    CreateTransaction, Transaction, TransactionFilter, TransactionType, UpdateTransaction,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, event_id, direction, status, type_id, amount_cents, \
                       source, description, txn_date, created_by, created_at, updated_at";

/// Provides CRUD operations for transactions.
pub struct TransactionRepo;

impl TransactionRepo {
    /// Record a transaction, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateTransaction,
        created_by: Option<DbId>,
    ) -> Result<Transaction, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::create_conn(&mut conn, input, created_by).await
    }

    /// Record a transaction inside an existing transaction. Used by the
    /// payment bookkeeping in `EventRepo::apply_payment`.
    pub async fn create_conn(
        conn: &mut PgConnection,
        input: &CreateTransaction,
        created_by: Option<DbId>,
    ) -> Result<Transaction, sqlx::Error> {
        let query = format!(
            "INSERT INTO transactions
                (event_id, direction, status, type_id, amount_cents,
                 source, description, txn_date, created_by)
             VALUES ($1, $2, COALESCE($3, 'completed'), $4, $5, $6, $7,
                     COALESCE($8, CURRENT_DATE), $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Transaction>(&query)
            .bind(input.event_id)
            .bind(&input.direction)
            .bind(&input.status)
            .bind(input.type_id)
            .bind(input.amount_cents)
            .bind(&input.source)
            .bind(&input.description)
            .bind(input.txn_date)
            .bind(created_by)
            .fetch_one(conn)
            .await
    }

    /// Find a transaction by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Transaction>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM transactions WHERE id = $1");
        sqlx::query_as::<_, Transaction>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List transactions with optional filters, newest transaction date first.
    pub async fn list(
        pool: &PgPool,
        filter: &TransactionFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Transaction>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM transactions
             WHERE ($1::bigint IS NULL OR event_id = $1)
               AND ($2::smallint IS NULL OR type_id = $2)
               AND ($3::text IS NULL OR direction = $3)
               AND ($4::date IS NULL OR txn_date >= $4)
               AND ($5::date IS NULL OR txn_date <= $5)
             ORDER BY txn_date DESC, id DESC
             LIMIT $6 OFFSET $7"
        );
        sqlx::query_as::<_, Transaction>(&query)
            .bind(filter.event_id)
            .bind(filter.type_id)
            .bind(filter.direction.as_deref())
            .bind(filter.from)
            .bind(filter.to)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a transaction. Only non-`None` fields in `input` are applied.
    /// Changing the status is plain bookkeeping; nothing cascades.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTransaction,
    ) -> Result<Option<Transaction>, sqlx::Error> {
        let query = format!(
            "UPDATE transactions SET
                status = COALESCE($2, status),
                type_id = COALESCE($3, type_id),
                amount_cents = COALESCE($4, amount_cents),
                source = COALESCE($5, source),
                description = COALESCE($6, description),
                txn_date = COALESCE($7, txn_date),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Transaction>(&query)
            .bind(id)
            .bind(&input.status)
            .bind(input.type_id)
            .bind(input.amount_cents)
            .bind(&input.source)
            .bind(&input.description)
            .bind(input.txn_date)
            .fetch_optional(pool)
            .await
    }

    /// Delete a transaction. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM transactions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List the seeded transaction types in id order.
    pub async fn list_types(pool: &PgPool) -> Result<Vec<TransactionType>, sqlx::Error> {
        sqlx::query_as::<_, TransactionType>(
            "SELECT id, name FROM transaction_types ORDER BY id ASC",
        )
        .fetch_all(pool)
        .await
    }
}
