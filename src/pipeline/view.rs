use std::sync::Arc;

use crate::domain::Category;

use super::{
    derive_categories, matches_filter, merge, CategoryFilter, Entry, FilterState, Remote,
    SearchScope, Snapshot,
};

/// Derived state of one presenting view.
///
/// Holds the latest value of every pipeline input and the three derived
/// sequences. Each setter reruns only the stages that depend on the input it
/// changed; setters return `true` when something was recomputed.
#[derive(Debug, Clone)]
pub struct ContentView<T: Entry> {
    static_items: Arc<[T]>,
    remote_items: Remote<T>,
    remote_categories: Remote<Category>,
    filter: FilterState,
    scope: SearchScope,
    merged: Vec<T>,
    categories: Vec<Category>,
    filtered: Vec<T>,
    filtered_static: Vec<bool>,
}

impl<T: Entry> ContentView<T> {
    pub fn new(static_items: Arc<[T]>, scope: SearchScope) -> Self {
        let mut view = Self {
            static_items,
            remote_items: Remote::Loading,
            remote_categories: Remote::Loading,
            filter: FilterState::default(),
            scope,
            merged: Vec::new(),
            categories: Vec::new(),
            filtered: Vec::new(),
            filtered_static: Vec::new(),
        };
        view.recompute_merged();
        view.recompute_categories();
        view
    }

    /// A view over store documents only, as the admin screens show them.
    pub fn remote_only(scope: SearchScope) -> Self {
        Self::new(Arc::from(Vec::new()), scope)
    }

    pub fn filtered(&self) -> &[T] {
        &self.filtered
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn merged(&self) -> &[T] {
        &self.merged
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn scope(&self) -> SearchScope {
        self.scope
    }

    pub fn static_len(&self) -> usize {
        self.static_items.len()
    }

    /// Whether row `index` of [`filtered`](Self::filtered) came from the
    /// bundled data. Decided by merge position, so ids shared between the
    /// two sources do not matter.
    pub fn is_static_at(&self, index: usize) -> bool {
        self.filtered_static.get(index).copied().unwrap_or(false)
    }

    /// True until both remote inputs have delivered their first snapshot.
    pub fn is_loading(&self) -> bool {
        self.remote_items.is_loading() || self.remote_categories.is_loading()
    }

    pub fn set_category(&mut self, category: CategoryFilter) -> bool {
        if self.filter.category == category {
            return false;
        }
        self.filter.category = category;
        self.recompute_filtered();
        true
    }

    pub fn set_query(&mut self, query: impl Into<String>) -> bool {
        let query = query.into();
        if self.filter.query == query {
            return false;
        }
        self.filter.query = query;
        self.recompute_filtered();
        true
    }

    /// Apply a new item snapshot. Snapshots not newer than the current one
    /// are dropped.
    pub fn apply_items(&mut self, snapshot: Snapshot<T>) -> bool {
        if !is_newer(&self.remote_items, snapshot.revision) {
            tracing::debug!(
                "Dropping stale item snapshot at revision {}",
                snapshot.revision
            );
            return false;
        }
        self.remote_items = snapshot.into();
        self.recompute_merged();
        true
    }

    /// Take `snapshot` even if its revision is not newer. Used for explicit
    /// reloads, where the rows may have been written by another store handle
    /// whose revisions this view never saw.
    pub fn replace_items(&mut self, snapshot: Snapshot<T>) {
        self.remote_items = snapshot.into();
        self.recompute_merged();
    }

    pub fn replace_categories(&mut self, snapshot: Snapshot<Category>) {
        self.remote_categories = snapshot.into();
        self.recompute_categories();
    }

    pub fn apply_categories(&mut self, snapshot: Snapshot<Category>) -> bool {
        if !is_newer(&self.remote_categories, snapshot.revision) {
            tracing::debug!(
                "Dropping stale category snapshot at revision {}",
                snapshot.revision
            );
            return false;
        }
        self.remote_categories = snapshot.into();
        self.recompute_categories();
        true
    }

    fn recompute_merged(&mut self) {
        self.merged = merge(&self.static_items, &self.remote_items);
        self.recompute_filtered();
    }

    fn recompute_categories(&mut self) {
        self.categories = derive_categories(&self.static_items, &self.remote_categories);
    }

    fn recompute_filtered(&mut self) {
        let query = self.filter.query.to_lowercase();
        let static_len = self.static_items.len();
        let (filtered, origins): (Vec<T>, Vec<bool>) = self
            .merged
            .iter()
            .enumerate()
            .filter(|(_, item)| matches_filter(*item, &self.filter.category, &query, self.scope))
            .map(|(index, item)| (item.clone(), index < static_len))
            .unzip();
        self.filtered = filtered;
        self.filtered_static = origins;
    }
}

fn is_newer<T>(current: &Remote<T>, revision: u64) -> bool {
    current.revision().is_none_or(|current| revision > current)
}
