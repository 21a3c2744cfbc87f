//! `SQLite` implementation of [`EventRepository`] and [`EventTransaction`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, Sqlite, SqlitePool, Transaction};

use ticketing_app::ports::{EventRepository, EventTransaction};
use ticketing_domain::error::TicketingError;
use ticketing_domain::event::{Event, NewEvent};
use ticketing_domain::id::EventId;

use crate::error::StorageError;
use crate::pool::Database;

/// Wrapper for converting database rows into domain [`Event`].
struct Wrapper(Event);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Event> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let available_tickets: i64 = row.try_get("available_tickets")?;

        let event = Event {
            id: EventId::new(id),
            name,
            available_tickets,
        };
        event
            .validate()
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(event))
    }
}

// `BEGIN IMMEDIATE` takes the write lock up front, so the read that follows
// is already exclusive.
const BEGIN_IMMEDIATE: &str = "BEGIN IMMEDIATE";

const INSERT: &str = "INSERT INTO events (name, available_tickets) VALUES (?, ?) RETURNING id";
const SELECT_BY_ID: &str = "SELECT id, name, available_tickets FROM events WHERE id = ?";
const SELECT_ALL: &str = "SELECT id, name, available_tickets FROM events ORDER BY id";
const COUNT: &str = "SELECT COUNT(*) FROM events";
const UPSERT: &str = r"
    INSERT INTO events (id, name, available_tickets)
    VALUES (?, ?, ?)
    ON CONFLICT (id) DO UPDATE SET
        name = excluded.name,
        available_tickets = excluded.available_tickets
";

/// `SQLite`-backed event repository.
///
/// Lookups and listings use the reader pool; inserts and transactions use
/// the writer pool.
#[derive(Clone)]
pub struct SqliteEventRepository {
    writer: SqlitePool,
    reader: SqlitePool,
}

impl SqliteEventRepository {
    /// Create a new repository over the pools of `db`.
    #[must_use]
    pub fn new(db: &Database) -> Self {
        Self {
            writer: db.pool().clone(),
            reader: db.reader().clone(),
        }
    }
}

fn row_count(count: i64) -> Result<u64, TicketingError> {
    u64::try_from(count).map_err(|err| TicketingError::Storage(Box::new(err)))
}

impl EventRepository for SqliteEventRepository {
    type Transaction = SqliteEventTransaction;

    async fn create(&self, event: NewEvent) -> Result<Event, TicketingError> {
        let id: i64 = sqlx::query_scalar(INSERT)
            .bind(&event.name)
            .bind(event.available_tickets)
            .fetch_one(&self.writer)
            .await
            .map_err(StorageError::from)?;

        Ok(event.with_id(EventId::new(id)))
    }

    async fn get_by_id(&self, id: EventId) -> Result<Option<Event>, TicketingError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.get())
            .fetch_optional(&self.reader)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<Event>, TicketingError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.reader)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn count(&self) -> Result<u64, TicketingError> {
        let count: i64 = sqlx::query_scalar(COUNT)
            .fetch_one(&self.reader)
            .await
            .map_err(StorageError::from)?;

        row_count(count)
    }

    async fn begin(&self) -> Result<SqliteEventTransaction, TicketingError> {
        let tx = self
            .writer
            .begin_with(BEGIN_IMMEDIATE)
            .await
            .map_err(StorageError::from)?;

        Ok(SqliteEventTransaction { tx })
    }
}

/// A `BEGIN IMMEDIATE` transaction holding the database write lock.
///
/// Dropping it without [`EventTransaction::commit`] rolls back.
pub struct SqliteEventTransaction {
    tx: Transaction<'static, Sqlite>,
}

impl EventTransaction for SqliteEventTransaction {
    async fn get_by_id_for_update(
        &mut self,
        id: EventId,
    ) -> Result<Option<Event>, TicketingError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.get())
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn count(&mut self) -> Result<u64, TicketingError> {
        let count: i64 = sqlx::query_scalar(COUNT)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(StorageError::from)?;

        row_count(count)
    }

    async fn create(&mut self, event: NewEvent) -> Result<Event, TicketingError> {
        let id: i64 = sqlx::query_scalar(INSERT)
            .bind(&event.name)
            .bind(event.available_tickets)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(StorageError::from)?;

        Ok(event.with_id(EventId::new(id)))
    }

    async fn save(&mut self, event: &Event) -> Result<(), TicketingError> {
        sqlx::query(UPSERT)
            .bind(event.id.get())
            .bind(&event.name)
            .bind(event.available_tickets)
            .execute(&mut *self.tx)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }

    async fn commit(self) -> Result<(), TicketingError> {
        self.tx.commit().await.map_err(StorageError::from)?;
        Ok(())
    }
}
