pub mod live;
pub mod sqlite;

use crate::app::Result;
use crate::domain::{Category, Doa, DoaUpdate, Hadith, HadithUpdate};

pub use live::{DocumentSubscription, Subscription};
pub use sqlite::SqliteStore;

/// A named collection in the document store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Doas,
    Hadiths,
    DoaCategories,
    HadithCategories,
}

impl Collection {
    pub fn name(self) -> &'static str {
        match self {
            Collection::Doas => "doas",
            Collection::Hadiths => "hadiths",
            Collection::DoaCategories => "doaCategories",
            Collection::HadithCategories => "hadithCategories",
        }
    }

    fn index(self) -> usize {
        match self {
            Collection::Doas => 0,
            Collection::Hadiths => 1,
            Collection::DoaCategories => 2,
            Collection::HadithCategories => 3,
        }
    }
}

/// Which content type a category collection belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryKind {
    Doa,
    Hadith,
}

impl CategoryKind {
    pub fn collection(self) -> Collection {
        match self {
            CategoryKind::Doa => Collection::DoaCategories,
            CategoryKind::Hadith => Collection::HadithCategories,
        }
    }

    fn table(self) -> &'static str {
        match self {
            CategoryKind::Doa => "doa_categories",
            CategoryKind::Hadith => "hadith_categories",
        }
    }
}

pub trait Store {
    // Doa operations
    fn add_doa(&self, doa: &Doa) -> Result<String>;
    fn add_doas(&self, doas: &[Doa]) -> Result<usize>;
    fn get_doa(&self, id: &str) -> Result<Option<Doa>>;
    fn get_all_doas(&self) -> Result<Vec<Doa>>;
    fn update_doa(&self, id: &str, update: &DoaUpdate) -> Result<()>;
    fn delete_doa(&self, id: &str) -> Result<()>;

    // Hadith operations
    fn add_hadith(&self, hadith: &Hadith) -> Result<String>;
    fn add_hadiths(&self, hadiths: &[Hadith]) -> Result<usize>;
    fn get_hadith(&self, id: &str) -> Result<Option<Hadith>>;
    fn get_all_hadiths(&self) -> Result<Vec<Hadith>>;
    fn update_hadith(&self, id: &str, update: &HadithUpdate) -> Result<()>;
    fn delete_hadith(&self, id: &str) -> Result<()>;

    // Category operations
    fn add_category(&self, kind: CategoryKind, name: &str) -> Result<String>;
    fn get_categories(&self, kind: CategoryKind) -> Result<Vec<Category>>;
    fn delete_category(&self, kind: CategoryKind, id: &str) -> Result<()>;
}
