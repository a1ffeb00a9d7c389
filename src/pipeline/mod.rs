//! Aggregation-filter pipeline shared by the doa and hadith views.
//!
//! ```text
//! static items ─┐
//!               ├─ merge ─────────────┐
//! remote items ─┘                     ├─ apply_filter ─> filtered items
//!                       FilterState ──┘
//! static items ─┐
//!               ├─ derive_categories ──────────────────> category list
//! remote cats  ─┘
//! ```
//!
//! All three stages are pure and total. [`ContentView`] owns the inputs of one
//! presenting view and reruns the stages whose inputs changed.

pub mod view;

use std::collections::BTreeSet;

use crate::domain::{Category, Doa, Hadith};

pub use view::ContentView;

/// Which set of fields a text query is matched against.
///
/// The public hadith screen also matches the narrator; the admin screen does
/// not. Doa fields are the same in both scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchScope {
    #[default]
    Public,
    Admin,
}

/// Capability the pipeline needs from an item: an id, an optional category
/// and a fixed list of searchable text fields.
pub trait Entry: Clone {
    fn id(&self) -> &str;

    /// Category label, `None` when absent or empty.
    fn category(&self) -> Option<&str>;

    fn search_fields(&self, scope: SearchScope) -> Vec<&str>;
}

impl Entry for Doa {
    fn id(&self) -> &str {
        &self.id
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    fn search_fields(&self, _scope: SearchScope) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.arabic.as_str(),
            self.latin.as_str(),
            self.translation.as_str(),
        ]
    }
}

impl Entry for Hadith {
    fn id(&self) -> &str {
        &self.id
    }

    fn category(&self) -> Option<&str> {
        Some(self.category.as_str()).filter(|c| !c.is_empty())
    }

    fn search_fields(&self, scope: SearchScope) -> Vec<&str> {
        let mut fields = vec![
            self.title.as_str(),
            self.arabic.as_str(),
            self.translation.as_str(),
            self.explanation.as_str(),
        ];
        if scope == SearchScope::Public {
            fields.push(&self.narrator);
        }
        fields
    }
}

/// A remote input: either still waiting for its first snapshot, or the latest
/// snapshot delivered by the store.
#[derive(Debug, Clone, PartialEq)]
pub enum Remote<T> {
    Loading,
    Ready { revision: u64, items: Vec<T> },
}

impl<T> Remote<T> {
    pub fn items(&self) -> &[T] {
        match self {
            Remote::Loading => &[],
            Remote::Ready { items, .. } => items,
        }
    }

    pub fn revision(&self) -> Option<u64> {
        match self {
            Remote::Loading => None,
            Remote::Ready { revision, .. } => Some(*revision),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Remote::Loading)
    }
}

impl<T> Default for Remote<T> {
    fn default() -> Self {
        Remote::Loading
    }
}

/// One delivery from a live collection. Revisions increase with every write to
/// the collection, so a lower revision is always older.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    pub revision: u64,
    pub items: Vec<T>,
}

impl<T> From<Snapshot<T>> for Remote<T> {
    fn from(snapshot: Snapshot<T>) -> Self {
        Remote::Ready {
            revision: snapshot.revision,
            items: snapshot.items,
        }
    }
}

/// Category selector: everything, or one exact label.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(name) => name,
        }
    }
}

impl From<Option<String>> for CategoryFilter {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(name) => CategoryFilter::Only(name),
            None => CategoryFilter::All,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub category: CategoryFilter,
    pub query: String,
}

impl FilterState {
    pub fn is_active(&self) -> bool {
        self.category != CategoryFilter::All || !self.query.is_empty()
    }
}

/// Static items followed by the remote snapshot. A remote source that has not
/// loaded yet contributes nothing. No de-duplication.
pub fn merge<T: Clone>(static_items: &[T], remote: &Remote<T>) -> Vec<T> {
    let remote_items = remote.items();
    let mut merged = Vec::with_capacity(static_items.len() + remote_items.len());
    merged.extend_from_slice(static_items);
    merged.extend_from_slice(remote_items);
    merged
}

/// Union of the non-empty categories found on static items and the names of
/// remote category records, sorted ascending, with `cat-<index>` ids.
pub fn derive_categories<T: Entry>(
    static_items: &[T],
    remote_categories: &Remote<Category>,
) -> Vec<Category> {
    let names: BTreeSet<&str> = static_items
        .iter()
        .filter_map(|item| item.category())
        .chain(
            remote_categories
                .items()
                .iter()
                .map(|c| c.name.as_str())
                .filter(|name| !name.is_empty()),
        )
        .collect();

    names
        .into_iter()
        .enumerate()
        .map(|(index, name)| Category {
            id: format!("cat-{}", index),
            name: name.to_string(),
        })
        .collect()
}

/// Category filter AND case-insensitive substring match on any searchable field.
/// Preserves input order.
pub fn apply_filter<T: Entry>(items: &[T], filter: &FilterState, scope: SearchScope) -> Vec<T> {
    let query = filter.query.to_lowercase();
    items
        .iter()
        .filter(|item| matches_filter(*item, &filter.category, &query, scope))
        .cloned()
        .collect()
}

/// `query` must already be lower-cased.
pub(crate) fn matches_filter<T: Entry>(
    item: &T,
    category: &CategoryFilter,
    query: &str,
    scope: SearchScope,
) -> bool {
    let in_category = match category {
        CategoryFilter::All => true,
        CategoryFilter::Only(name) => item.category() == Some(name.as_str()),
    };
    in_category
        && (query.is_empty()
            || item
                .search_fields(scope)
                .iter()
                .any(|field| field.to_lowercase().contains(query)))
}
