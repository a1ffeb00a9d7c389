//! Live queries over the document store.
//!
//! A [`Subscription`] follows one collection: it starts with the current
//! contents and reports every later write as a new [`Snapshot`]. Only the
//! newest revision is ever observed; intermediate revisions written while the
//! subscriber was busy are skipped. Dropping the subscription releases it.

use std::sync::Arc;

use tokio::sync::watch;

use crate::app::Result;
use crate::domain::{Category, Doa, Hadith};
use crate::pipeline::Snapshot;
use crate::store::{CategoryKind, Collection, SqliteStore, Store};

type Loader<V> = Box<dyn Fn(&SqliteStore) -> Result<V> + Send + Sync>;

pub struct Subscription<T> {
    store: Arc<SqliteStore>,
    collection: Collection,
    revisions: watch::Receiver<u64>,
    load: Loader<Vec<T>>,
}

impl<T> Subscription<T> {
    fn new(store: &Arc<SqliteStore>, collection: Collection, load: Loader<Vec<T>>) -> Self {
        let revisions = store.revision_sender(collection).subscribe();
        tracing::debug!("Subscribed to {}", collection.name());
        Self {
            store: store.clone(),
            collection,
            revisions,
            load,
        }
    }

    pub fn collection(&self) -> Collection {
        self.collection
    }

    /// Whether a write happened since the last snapshot was taken.
    pub fn has_changed(&self) -> bool {
        self.revisions.has_changed().unwrap_or(false)
    }

    /// Read the collection at its current revision and mark that revision seen.
    pub fn snapshot(&mut self) -> Result<Snapshot<T>> {
        let revision = *self.revisions.borrow_and_update();
        let items = (self.load)(&self.store)?;
        Ok(Snapshot { revision, items })
    }

    /// Wait for the next write to the collection, then read it.
    pub async fn changed(&mut self) -> Result<Snapshot<T>> {
        // The sender lives in the store, which this subscription keeps alive.
        if self.revisions.changed().await.is_err() {
            tracing::warn!("Revision channel for {} closed", self.collection.name());
        }
        self.snapshot()
    }
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        tracing::debug!("Released subscription to {}", self.collection.name());
    }
}

/// Follows a single document by id. The value is `None` while the document
/// does not exist (never created, or deleted).
pub struct DocumentSubscription<T> {
    inner: Subscription<Option<T>>,
}

impl<T> DocumentSubscription<T> {
    pub fn has_changed(&self) -> bool {
        self.inner.has_changed()
    }

    pub fn current(&mut self) -> Result<(u64, Option<T>)> {
        let snapshot = self.inner.snapshot()?;
        Ok((snapshot.revision, snapshot.items.into_iter().next().flatten()))
    }

    pub async fn changed(&mut self) -> Result<(u64, Option<T>)> {
        let snapshot = self.inner.changed().await?;
        Ok((snapshot.revision, snapshot.items.into_iter().next().flatten()))
    }
}

impl SqliteStore {
    /// All doas ordered by title.
    pub fn subscribe_doas(self: &Arc<Self>) -> Subscription<Doa> {
        Subscription::new(
            self,
            Collection::Doas,
            Box::new(|store: &SqliteStore| store.get_all_doas()),
        )
    }

    /// All hadiths ordered by title.
    pub fn subscribe_hadiths(self: &Arc<Self>) -> Subscription<Hadith> {
        Subscription::new(
            self,
            Collection::Hadiths,
            Box::new(|store: &SqliteStore| store.get_all_hadiths()),
        )
    }

    /// Category records of one kind ordered by name.
    pub fn subscribe_categories(self: &Arc<Self>, kind: CategoryKind) -> Subscription<Category> {
        Subscription::new(
            self,
            kind.collection(),
            Box::new(move |store: &SqliteStore| store.get_categories(kind)),
        )
    }

    pub fn subscribe_doa(self: &Arc<Self>, id: &str) -> DocumentSubscription<Doa> {
        let id = id.to_string();
        DocumentSubscription {
            inner: Subscription::new(
                self,
                Collection::Doas,
                Box::new(move |store: &SqliteStore| Ok(vec![store.get_doa(&id)?])),
            ),
        }
    }

    pub fn subscribe_hadith(self: &Arc<Self>, id: &str) -> DocumentSubscription<Hadith> {
        let id = id.to_string();
        DocumentSubscription {
            inner: Subscription::new(
                self,
                Collection::Hadiths,
                Box::new(move |store: &SqliteStore| Ok(vec![store.get_hadith(&id)?])),
            ),
        }
    }
}
