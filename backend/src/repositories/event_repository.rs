//! Database repository for event management operations.
//!
//! Reads join each event with its customer so callers receive the populated
//! `{c_id, mobileNo}` reference in one query.

use crate::database::models::{CreateEvent, Event, EventWithCustomer};
use anyhow::Result;
use sqlx::SqlitePool;

const EVENT_WITH_CUSTOMER_SELECT: &str = r#"
    SELECT
    e.id, e.title, e.date, e.hall, e.dining, e.decorations,
    c.id AS c_id, c.mobile_no
    FROM events e
    JOIN customers c ON c.id = e.customer_id
"#;

/// Repository for event database operations.
pub struct EventRepository<'a> {
    /// Shared SQLite connection pool
    pool: &'a SqlitePool,
}

impl<'a> EventRepository<'a> {
    /// Creates a new EventRepository instance.
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a new event in the database.
    pub async fn create_event(&self, event: CreateEvent) -> Result<Event> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (id, title, date, hall, dining, decorations, customer_id)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id, title, date, hall, dining, decorations, customer_id
            "#,
        )
        .bind(event.id)
        .bind(event.title)
        .bind(event.date)
        .bind(event.opts.hall)
        .bind(event.opts.dining)
        .bind(event.opts.decorations)
        .bind(event.customer_id)
        .fetch_one(self.pool)
        .await?;

        Ok(event)
    }

    /// Retrieves an event by ID without its customer.
    pub async fn get_event_by_id(&self, id: &str) -> Result<Option<Event>> {
        let event = sqlx::query_as::<_, Event>(
            r#"
            SELECT id, title, date, hall, dining, decorations, customer_id
            FROM events WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(event)
    }

    /// Retrieves an event by ID with its customer populated.
    pub async fn get_event_with_customer(&self, id: &str) -> Result<Option<EventWithCustomer>> {
        let query = format!("{} WHERE e.id = ?", EVENT_WITH_CUSTOMER_SELECT);
        let event = sqlx::query_as::<_, EventWithCustomer>(&query)
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(event)
    }

    /// Lists events ordered by date, optionally restricted to one customer.
    pub async fn list_events(&self, customer_id: Option<&str>) -> Result<Vec<EventWithCustomer>> {
        let events = match customer_id {
            Some(customer_id) => {
                let query = format!(
                    "{} WHERE e.customer_id = ? ORDER BY e.date ASC, e.id ASC",
                    EVENT_WITH_CUSTOMER_SELECT
                );
                sqlx::query_as::<_, EventWithCustomer>(&query)
                    .bind(customer_id)
                    .fetch_all(self.pool)
                    .await?
            }
            None => {
                let query = format!(
                    "{} ORDER BY e.date ASC, e.id ASC",
                    EVENT_WITH_CUSTOMER_SELECT
                );
                sqlx::query_as::<_, EventWithCustomer>(&query)
                    .fetch_all(self.pool)
                    .await?
            }
        };

        Ok(events)
    }

    /// Deletes an event by ID.
    ///
    /// # Returns
    /// `true` if a row was removed
    pub async fn delete_event(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
