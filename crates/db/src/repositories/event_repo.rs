//! Repository for the `events` and `event_employees` tables.
//!
//! Besides plain CRUD this repo owns the two multi-statement writes the
//! status engine needs: `apply_transition` and `apply_payment`, each of
//! which persists the event change and its journal/transaction rows in a
//! single database transaction.

use chrono::NaiveDate;
use encore_core::status::StatusId;
use encore_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::event::{
    CreateEvent, CreateEventEmployee, Event, EventEmployee, EventExportRow, EventFilter,
    UpdateEvent,
};
use crate::models::journal::NewJournalEntry;
use crate::models::transaction::CreateTransaction;
use crate::repositories::{JournalRepo, TransactionRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, status_id, event_date, start_time, end_time, setup_time, \
                       client_id, primary_employee_id, venue_id, venue_name, venue_address, \
                       package_cost_cents, addons_cost_cents, travel_cost_cents, \
                       additional_cost_cents, discount_cents, price_total_cents, \
                       deposit_cents, deposit_paid, balance_paid, \
                       playlist_enabled, playlist_limit, \
                       client_notes, employee_notes, admin_notes, \
                       balance_reminder_sent_at, playlist_notified_at, \
                       created_at, updated_at";

const EMPLOYEE_COLUMNS: &str =
    "id, event_id, employee_id, role_label, wage_cents, created_at, updated_at";

/// Provides CRUD and workflow operations for events.
pub struct EventRepo;

impl EventRepo {
    /// Insert a new event, returning the created row.
    ///
    /// `status_id` is the resolved initial status; `price_total_cents` is
    /// always derived from the breakdown, never taken from the caller.
    pub async fn create(
        pool: &PgPool,
        input: &CreateEvent,
        status_id: StatusId,
    ) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events (
                status_id, event_date, start_time, end_time, setup_time,
                client_id, primary_employee_id, venue_id, venue_name, venue_address,
                package_cost_cents, addons_cost_cents, travel_cost_cents,
                additional_cost_cents, discount_cents, price_total_cents,
                deposit_cents, playlist_enabled, playlist_limit,
                client_notes, employee_notes, admin_notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                     $11, $12, $13, $14, $15, $16,
                     $17, COALESCE($18, true), COALESCE($19, 0), $20, $21, $22)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(status_id)
            .bind(input.event_date)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.setup_time)
            .bind(input.client_id)
            .bind(input.primary_employee_id)
            .bind(input.venue_id)
            .bind(&input.venue_name)
            .bind(&input.venue_address)
            .bind(input.package_cost_cents)
            .bind(input.addons_cost_cents)
            .bind(input.travel_cost_cents)
            .bind(input.additional_cost_cents)
            .bind(input.discount_cents)
            .bind(input.breakdown().total())
            .bind(input.deposit_cents)
            .bind(input.playlist_enabled)
            .bind(input.playlist_limit)
            .bind(&input.client_notes)
            .bind(&input.employee_notes)
            .bind(&input.admin_notes)
            .fetch_one(pool)
            .await
    }

    /// Find an event by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List events with optional filters, soonest event date first.
    ///
    /// `employee_id` matches the primary employee or any `event_employees`
    /// assignment.
    pub async fn list(
        pool: &PgPool,
        filter: &EventFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events
             WHERE ($1::smallint IS NULL OR status_id = $1)
               AND ($2::bigint IS NULL OR client_id = $2)
               AND ($3::bigint IS NULL OR primary_employee_id = $3 OR EXISTS (
                       SELECT 1 FROM event_employees ee
                       WHERE ee.event_id = events.id AND ee.employee_id = $3))
               AND ($4::date IS NULL OR event_date >= $4)
               AND ($5::date IS NULL OR event_date <= $5)
             ORDER BY event_date ASC, id ASC
             LIMIT $6 OFFSET $7"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(filter.status_id)
            .bind(filter.client_id)
            .bind(filter.employee_id)
            .bind(filter.from)
            .bind(filter.to)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update event details. Only non-`None` fields in `input` are applied.
    /// The stored total is recomputed from the post-update cost parts in
    /// the same statement.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEvent,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "UPDATE events SET
                event_date = COALESCE($2, event_date),
                start_time = COALESCE($3, start_time),
                end_time = COALESCE($4, end_time),
                setup_time = COALESCE($5, setup_time),
                primary_employee_id = COALESCE($6, primary_employee_id),
                venue_id = COALESCE($7, venue_id),
                venue_name = COALESCE($8, venue_name),
                venue_address = COALESCE($9, venue_address),
                package_cost_cents = COALESCE($10, package_cost_cents),
                addons_cost_cents = COALESCE($11, addons_cost_cents),
                travel_cost_cents = COALESCE($12, travel_cost_cents),
                additional_cost_cents = COALESCE($13, additional_cost_cents),
                discount_cents = COALESCE($14, discount_cents),
                price_total_cents =
                    COALESCE($10, package_cost_cents) + COALESCE($11, addons_cost_cents)
                  + COALESCE($12, travel_cost_cents) + COALESCE($13, additional_cost_cents)
                  - COALESCE($14, discount_cents),
                deposit_cents = COALESCE($15, deposit_cents),
                playlist_enabled = COALESCE($16, playlist_enabled),
                playlist_limit = COALESCE($17, playlist_limit),
                client_notes = COALESCE($18, client_notes),
                employee_notes = COALESCE($19, employee_notes),
                admin_notes = COALESCE($20, admin_notes),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(input.event_date)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.setup_time)
            .bind(input.primary_employee_id)
            .bind(input.venue_id)
            .bind(&input.venue_name)
            .bind(&input.venue_address)
            .bind(input.package_cost_cents)
            .bind(input.addons_cost_cents)
            .bind(input.travel_cost_cents)
            .bind(input.additional_cost_cents)
            .bind(input.discount_cents)
            .bind(input.deposit_cents)
            .bind(input.playlist_enabled)
            .bind(input.playlist_limit)
            .bind(&input.client_notes)
            .bind(&input.employee_notes)
            .bind(&input.admin_notes)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete an event, but only while it still carries `status_id`.
    /// The status guard and the delete race-safely share one statement.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete_if_status(
        pool: &PgPool,
        id: DbId,
        status_id: StatusId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1 AND status_id = $2")
            .bind(id)
            .bind(status_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Flattened rows for the CSV export, same filters as [`Self::list`].
    /// Export is unpaginated; the whole filtered set goes out.
    pub async fn export_rows(
        pool: &PgPool,
        filter: &EventFilter,
    ) -> Result<Vec<EventExportRow>, sqlx::Error> {
        sqlx::query_as::<_, EventExportRow>(
            "SELECT e.id, e.event_date, s.name AS status,
                    c.display_name AS client_name, c.email AS client_email,
                    COALESCE(v.name, e.venue_name, '') AS venue,
                    e.price_total_cents, e.deposit_cents, e.deposit_paid, e.balance_paid
             FROM events e
             JOIN event_statuses s ON s.id = e.status_id
             JOIN users c ON c.id = e.client_id
             LEFT JOIN venues v ON v.id = e.venue_id
             WHERE ($1::smallint IS NULL OR e.status_id = $1)
               AND ($2::bigint IS NULL OR e.client_id = $2)
               AND ($3::bigint IS NULL OR e.primary_employee_id = $3 OR EXISTS (
                       SELECT 1 FROM event_employees ee
                       WHERE ee.event_id = e.id AND ee.employee_id = $3))
               AND ($4::date IS NULL OR e.event_date >= $4)
               AND ($5::date IS NULL OR e.event_date <= $5)
             ORDER BY e.event_date ASC, e.id ASC",
        )
        .bind(filter.status_id)
        .bind(filter.client_id)
        .bind(filter.employee_id)
        .bind(filter.from)
        .bind(filter.to)
        .fetch_all(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Workflow writes
    // -----------------------------------------------------------------------

    /// Persist a status change and its journal entry atomically.
    ///
    /// When `clear_balance_reminder` is set the reminder stamp is nulled so
    /// the balance-reminder task picks the event up again.
    pub async fn apply_transition(
        pool: &PgPool,
        id: DbId,
        new_status_id: StatusId,
        clear_balance_reminder: bool,
        journal: &NewJournalEntry,
    ) -> Result<Event, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE events SET
                status_id = $2,
                balance_reminder_sent_at = CASE WHEN $3 THEN NULL
                                                ELSE balance_reminder_sent_at END,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let event = sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(new_status_id)
            .bind(clear_balance_reminder)
            .fetch_one(&mut *tx)
            .await?;

        JournalRepo::append_conn(&mut *tx, journal).await?;

        tx.commit().await?;
        Ok(event)
    }

    /// Persist payment flag changes plus their income transactions and
    /// journal entries atomically.
    pub async fn apply_payment(
        pool: &PgPool,
        id: DbId,
        set_deposit_paid: Option<bool>,
        set_balance_paid: Option<bool>,
        transactions: &[CreateTransaction],
        journals: &[NewJournalEntry],
        created_by: Option<DbId>,
    ) -> Result<Event, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE events SET
                deposit_paid = COALESCE($2, deposit_paid),
                balance_paid = COALESCE($3, balance_paid),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let event = sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(set_deposit_paid)
            .bind(set_balance_paid)
            .fetch_one(&mut *tx)
            .await?;

        for input in transactions {
            TransactionRepo::create_conn(&mut *tx, input, created_by).await?;
        }
        for journal in journals {
            JournalRepo::append_conn(&mut *tx, journal).await?;
        }

        tx.commit().await?;
        Ok(event)
    }

    // -----------------------------------------------------------------------
    // Scheduled-task queries
    // -----------------------------------------------------------------------

    /// Events in `status_id` whose date is strictly before `before`.
    /// Used by the complete-events task with the approved status.
    pub async fn list_dated_before(
        pool: &PgPool,
        status_id: StatusId,
        before: NaiveDate,
    ) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events
             WHERE status_id = $1 AND event_date < $2
             ORDER BY event_date ASC, id ASC"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(status_id)
            .bind(before)
            .fetch_all(pool)
            .await
    }

    /// Events in `status_id` created before `created_before`.
    /// Used by the fail-enquiries task with the enquiry status.
    pub async fn list_created_before(
        pool: &PgPool,
        status_id: StatusId,
        created_before: Timestamp,
    ) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events
             WHERE status_id = $1 AND created_at < $2
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(status_id)
            .bind(created_before)
            .fetch_all(pool)
            .await
    }

    /// Completed events with an unpaid balance, no reminder stamp, and an
    /// event date on or before `dated_on_or_before`.
    pub async fn list_balance_reminder_due(
        pool: &PgPool,
        status_id: StatusId,
        dated_on_or_before: NaiveDate,
    ) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events
             WHERE status_id = $1
               AND balance_paid = false
               AND balance_reminder_sent_at IS NULL
               AND event_date <= $2
             ORDER BY event_date ASC, id ASC"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(status_id)
            .bind(dated_on_or_before)
            .fetch_all(pool)
            .await
    }

    /// Approved events inside the notification window that have a primary
    /// employee, at least one playlist entry, and no notify stamp.
    pub async fn list_playlist_notify_due(
        pool: &PgPool,
        status_id: StatusId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events
             WHERE status_id = $1
               AND playlist_notified_at IS NULL
               AND primary_employee_id IS NOT NULL
               AND event_date >= $2 AND event_date <= $3
               AND EXISTS (SELECT 1 FROM playlist_entries pe WHERE pe.event_id = events.id)
             ORDER BY event_date ASC, id ASC"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(status_id)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }

    /// Stamp `balance_reminder_sent_at` after a reminder went out.
    pub async fn stamp_balance_reminder(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE events SET balance_reminder_sent_at = NOW(), updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Stamp `playlist_notified_at` after the employee notification went out.
    pub async fn stamp_playlist_notified(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE events SET playlist_notified_at = NOW(), updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Additional staffing
    // -----------------------------------------------------------------------

    /// Assign an employee to an event. The (event, employee) pair is unique.
    pub async fn add_employee(
        pool: &PgPool,
        event_id: DbId,
        input: &CreateEventEmployee,
    ) -> Result<EventEmployee, sqlx::Error> {
        let query = format!(
            "INSERT INTO event_employees (event_id, employee_id, role_label, wage_cents)
             VALUES ($1, $2, $3, $4)
             RETURNING {EMPLOYEE_COLUMNS}"
        );
        sqlx::query_as::<_, EventEmployee>(&query)
            .bind(event_id)
            .bind(input.employee_id)
            .bind(&input.role_label)
            .bind(input.wage_cents)
            .fetch_one(pool)
            .await
    }

    /// List the additional staffing rows for an event.
    pub async fn list_employees(
        pool: &PgPool,
        event_id: DbId,
    ) -> Result<Vec<EventEmployee>, sqlx::Error> {
        let query = format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM event_employees
             WHERE event_id = $1 ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, EventEmployee>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }

    /// Remove one employee assignment. Returns `true` if a row was removed.
    pub async fn remove_employee(
        pool: &PgPool,
        event_id: DbId,
        employee_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM event_employees WHERE event_id = $1 AND employee_id = $2")
                .bind(event_id)
                .bind(employee_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
