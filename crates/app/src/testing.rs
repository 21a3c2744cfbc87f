//! In-memory event store with one async lock per event, for service tests.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::OwnedMutexGuard;

use ticketing_domain::error::{ContentionError, TicketingError};
use ticketing_domain::event::{Event, NewEvent};
use ticketing_domain::id::EventId;

use crate::ports::{EventRepository, EventTransaction};

type Row = Arc<tokio::sync::Mutex<Event>>;

struct Inner {
    rows: Mutex<BTreeMap<EventId, Row>>,
    // taken by transactions that count or create, like a table lock
    table: Arc<tokio::sync::Mutex<()>>,
    next_id: AtomicI64,
    lock_timeout: Duration,
    begins: AtomicUsize,
    commits: AtomicUsize,
    fail_saves: AtomicBool,
}

impl Inner {
    fn row(&self, id: EventId) -> Option<Row> {
        self.rows.lock().unwrap().get(&id).cloned()
    }
}

/// Cloning shares the same underlying table.
#[derive(Clone)]
pub(crate) struct InMemoryEventRepo {
    inner: Arc<Inner>,
}

impl Default for InMemoryEventRepo {
    fn default() -> Self {
        Self::with_lock_timeout(Duration::from_secs(5))
    }
}

impl InMemoryEventRepo {
    pub(crate) fn with_lock_timeout(lock_timeout: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                rows: Mutex::new(BTreeMap::new()),
                table: Arc::new(tokio::sync::Mutex::new(())),
                next_id: AtomicI64::new(1),
                lock_timeout,
                begins: AtomicUsize::new(0),
                commits: AtomicUsize::new(0),
                fail_saves: AtomicBool::new(false),
            }),
        }
    }

    pub(crate) async fn insert(&self, name: &str, available_tickets: i64) -> EventId {
        let event = NewEvent::builder()
            .name(name)
            .available_tickets(available_tickets)
            .build()
            .unwrap();
        self.create(event).await.unwrap().id
    }

    pub(crate) async fn available(&self, id: EventId) -> Option<i64> {
        self.get_by_id(id)
            .await
            .unwrap()
            .map(|event| event.available_tickets)
    }

    pub(crate) fn begins(&self) -> usize {
        self.inner.begins.load(Ordering::SeqCst)
    }

    pub(crate) fn commits(&self) -> usize {
        self.inner.commits.load(Ordering::SeqCst)
    }

    /// Make every later `save` fail with a storage error.
    pub(crate) fn fail_saves(&self) {
        self.inner.fail_saves.store(true, Ordering::SeqCst);
    }
}

impl EventRepository for InMemoryEventRepo {
    type Transaction = InMemoryTransaction;

    async fn create(&self, event: NewEvent) -> Result<Event, TicketingError> {
        let id = EventId::new(self.inner.next_id.fetch_add(1, Ordering::SeqCst));
        let event = event.with_id(id);
        self.inner
            .rows
            .lock()
            .unwrap()
            .insert(id, Arc::new(tokio::sync::Mutex::new(event.clone())));
        Ok(event)
    }

    async fn get_by_id(&self, id: EventId) -> Result<Option<Event>, TicketingError> {
        let Some(row) = self.inner.row(id) else {
            return Ok(None);
        };
        let event = row.lock().await.clone();
        Ok(Some(event))
    }

    async fn get_all(&self) -> Result<Vec<Event>, TicketingError> {
        let rows: Vec<Row> = self.inner.rows.lock().unwrap().values().cloned().collect();
        let mut events = Vec::with_capacity(rows.len());
        for row in rows {
            events.push(row.lock().await.clone());
        }
        Ok(events)
    }

    async fn count(&self) -> Result<u64, TicketingError> {
        let len = self.inner.rows.lock().unwrap().len();
        Ok(len as u64)
    }

    async fn begin(&self) -> Result<InMemoryTransaction, TicketingError> {
        self.inner.begins.fetch_add(1, Ordering::SeqCst);
        Ok(InMemoryTransaction {
            inner: Arc::clone(&self.inner),
            table: None,
            locked: Vec::new(),
            pending: Vec::new(),
        })
    }
}

/// Holds the per-event guards it took until commit or drop.
pub(crate) struct InMemoryTransaction {
    inner: Arc<Inner>,
    table: Option<OwnedMutexGuard<()>>,
    locked: Vec<OwnedMutexGuard<Event>>,
    pending: Vec<Event>,
}

impl InMemoryTransaction {
    async fn lock_table(&mut self) -> Result<(), TicketingError> {
        if self.table.is_none() {
            let table = Arc::clone(&self.inner.table);
            let guard = tokio::time::timeout(self.inner.lock_timeout, table.lock_owned())
                .await
                .map_err(|_| ContentionError)?;
            self.table = Some(guard);
        }
        Ok(())
    }
}

impl EventTransaction for InMemoryTransaction {
    async fn get_by_id_for_update(&mut self, id: EventId) -> Result<Option<Event>, TicketingError> {
        // own writes win over the locked snapshot
        if let Some(event) = self.pending.iter().rev().find(|event| event.id == id) {
            return Ok(Some(event.clone()));
        }
        if let Some(guard) = self.locked.iter().find(|guard| guard.id == id) {
            return Ok(Some((**guard).clone()));
        }
        let Some(row) = self.inner.row(id) else {
            return Ok(None);
        };
        let guard = tokio::time::timeout(self.inner.lock_timeout, row.lock_owned())
            .await
            .map_err(|_| ContentionError)?;
        let event = (*guard).clone();
        self.locked.push(guard);
        Ok(Some(event))
    }

    async fn count(&mut self) -> Result<u64, TicketingError> {
        self.lock_table().await?;
        let rows = self.inner.rows.lock().unwrap();
        let created = self
            .pending
            .iter()
            .filter(|event| !rows.contains_key(&event.id))
            .count();
        Ok((rows.len() + created) as u64)
    }

    async fn create(&mut self, event: NewEvent) -> Result<Event, TicketingError> {
        self.lock_table().await?;
        let id = EventId::new(self.inner.next_id.fetch_add(1, Ordering::SeqCst));
        let event = event.with_id(id);
        self.pending.push(event.clone());
        Ok(event)
    }

    async fn save(&mut self, event: &Event) -> Result<(), TicketingError> {
        if self.inner.fail_saves.load(Ordering::SeqCst) {
            return Err(TicketingError::Storage("injected save failure".into()));
        }
        self.pending.push(event.clone());
        Ok(())
    }

    async fn commit(mut self) -> Result<(), TicketingError> {
        for event in std::mem::take(&mut self.pending) {
            if let Some(guard) = self.locked.iter_mut().find(|guard| guard.id == event.id) {
                **guard = event;
            } else {
                self.inner
                    .rows
                    .lock()
                    .unwrap()
                    .insert(event.id, Arc::new(tokio::sync::Mutex::new(event)));
            }
        }
        self.inner.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_return_own_pending_write_on_repeated_locked_read() {
        let repo = InMemoryEventRepo::default();
        let id = repo.insert("Concert", 10).await;

        let mut tx = repo.begin().await.unwrap();
        let mut event = tx.get_by_id_for_update(id).await.unwrap().unwrap();
        event.available_tickets = 4;
        tx.save(&event).await.unwrap();

        let again = tx.get_by_id_for_update(id).await.unwrap().unwrap();
        assert_eq!(again.available_tickets, 4);

        drop(tx);
        assert_eq!(repo.available(id).await, Some(10));
    }

    #[tokio::test]
    async fn should_count_created_events_and_drop_them_without_commit() {
        let repo = InMemoryEventRepo::default();
        repo.insert("Existing", 1).await;

        {
            let mut tx = repo.begin().await.unwrap();
            tx.create(NewEvent::builder().name("Pending").build().unwrap())
                .await
                .unwrap();
            assert_eq!(tx.count().await.unwrap(), 2);
        }

        assert_eq!(repo.count().await.unwrap(), 1);
    }
}
