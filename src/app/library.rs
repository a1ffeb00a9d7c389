use std::sync::Arc;

use crate::app::Result;
use crate::domain::{Category, Doa, Hadith};
use crate::pipeline::{ContentView, Entry, SearchScope};
use crate::store::{CategoryKind, SqliteStore, Subscription};

/// A [`ContentView`] fed by live store subscriptions.
///
/// [`poll`](Self::poll) is cheap when nothing changed, so callers can run it
/// on every UI tick.
pub struct LiveLibrary<T: Entry> {
    view: ContentView<T>,
    items: Subscription<T>,
    categories: Subscription<Category>,
}

impl<T: Entry> LiveLibrary<T> {
    fn open(
        view: ContentView<T>,
        items: Subscription<T>,
        categories: Subscription<Category>,
    ) -> Result<Self> {
        let mut library = Self {
            view,
            items,
            categories,
        };
        library.refresh()?;
        Ok(library)
    }

    pub fn view(&self) -> &ContentView<T> {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ContentView<T> {
        &mut self.view
    }

    /// Apply whatever the store published since the last call. Returns `true`
    /// if the view changed.
    pub fn poll(&mut self) -> Result<bool> {
        let mut changed = false;
        if self.items.has_changed() {
            changed |= self.view.apply_items(self.items.snapshot()?);
        }
        if self.categories.has_changed() {
            changed |= self.view.apply_categories(self.categories.snapshot()?);
        }
        Ok(changed)
    }

    /// Re-read both collections and take the result unconditionally. This
    /// also picks up rows written through another store handle, which never
    /// bump this handle's revisions.
    pub fn refresh(&mut self) -> Result<()> {
        let items = self.items.snapshot()?;
        let categories = self.categories.snapshot()?;
        self.view.replace_items(items);
        self.view.replace_categories(categories);
        Ok(())
    }
}

/// Bundled doas followed by stored ones.
pub fn doa_library(
    store: &Arc<SqliteStore>,
    static_doas: Arc<[Doa]>,
    scope: SearchScope,
) -> Result<LiveLibrary<Doa>> {
    LiveLibrary::open(
        ContentView::new(static_doas, scope),
        store.subscribe_doas(),
        store.subscribe_categories(CategoryKind::Doa),
    )
}

pub fn hadith_library(store: &Arc<SqliteStore>, scope: SearchScope) -> Result<LiveLibrary<Hadith>> {
    LiveLibrary::open(
        ContentView::remote_only(scope),
        store.subscribe_hadiths(),
        store.subscribe_categories(CategoryKind::Hadith),
    )
}
