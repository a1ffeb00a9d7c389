use ratatui::widgets::ListState;

use crate::app::{LiveLibrary, Result};
use crate::auth::Session;
use crate::domain::{Doa, Hadith};
use crate::pipeline::{CategoryFilter, ContentView, Entry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePane {
    Categories,
    Items,
    Preview,
}

impl ActivePane {
    pub fn next(self) -> Self {
        match self {
            ActivePane::Categories => ActivePane::Items,
            ActivePane::Items => ActivePane::Preview,
            ActivePane::Preview => ActivePane::Categories,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            ActivePane::Categories => ActivePane::Preview,
            ActivePane::Items => ActivePane::Categories,
            ActivePane::Preview => ActivePane::Items,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Doa,
    Hadith,
}

impl Tab {
    pub fn toggle(self) -> Self {
        match self {
            Tab::Doa => Tab::Hadith,
            Tab::Hadith => Tab::Doa,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Tab::Doa => "Doa",
            Tab::Hadith => "Hadith",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

/// One line of the items pane.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRow {
    pub id: String,
    pub title: String,
    pub category: String,
    pub is_static: bool,
}

/// Everything the preview pane shows for the selected entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub title: String,
    pub category: String,
    pub arabic: String,
    pub latin: String,
    pub translation: String,
    pub explanation: Option<String>,
    pub narrator: Option<String>,
}

impl From<&Doa> for Preview {
    fn from(doa: &Doa) -> Self {
        Self {
            title: doa.title.clone(),
            category: doa.display_category().to_string(),
            arabic: doa.arabic.clone(),
            latin: doa.latin.clone(),
            translation: doa.translation.clone(),
            explanation: None,
            narrator: None,
        }
    }
}

impl From<&Hadith> for Preview {
    fn from(hadith: &Hadith) -> Self {
        Self {
            title: hadith.title.clone(),
            category: hadith.category.clone(),
            arabic: hadith.arabic.clone(),
            latin: hadith.latin.clone(),
            translation: hadith.translation.clone(),
            explanation: Some(hadith.explanation.clone()),
            narrator: Some(hadith.narrator.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDelete {
    pub tab: Tab,
    pub id: String,
    pub title: String,
}

pub const PAGE_SIZE: usize = 10;

pub struct TuiApp {
    pub active_pane: ActivePane,
    pub tab: Tab,
    pub mode: InputMode,
    pub doas: LiveLibrary<Doa>,
    pub hadiths: LiveLibrary<Hadith>,
    pub session: Option<Session>,
    pub category_index: usize,
    pub item_index: usize,
    pub preview_scroll: u16,
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub maximized: bool,
    pub category_list_state: ListState,
    pub item_list_state: ListState,
    pub pending_delete: Option<PendingDelete>,
}

fn rows<T: Entry>(view: &ContentView<T>, title: impl Fn(&T) -> &str, category: impl Fn(&T) -> &str) -> Vec<ItemRow> {
    view.filtered()
        .iter()
        .enumerate()
        .map(|(index, item)| ItemRow {
            id: item.id().to_string(),
            title: title(item).to_string(),
            category: category(item).to_string(),
            is_static: view.is_static_at(index),
        })
        .collect()
}

impl TuiApp {
    pub fn new(doas: LiveLibrary<Doa>, hadiths: LiveLibrary<Hadith>, session: Option<Session>) -> Self {
        let mut category_list_state = ListState::default();
        category_list_state.select(Some(0));
        let mut item_list_state = ListState::default();
        item_list_state.select(Some(0));

        Self {
            active_pane: ActivePane::Items,
            tab: Tab::Doa,
            mode: InputMode::Normal,
            doas,
            hadiths,
            session,
            category_index: 0,
            item_index: 0,
            preview_scroll: 0,
            should_quit: false,
            status_message: None,
            maximized: false,
            category_list_state,
            item_list_state,
            pending_delete: None,
        }
    }

    /// Category labels of the current tab, "All" first.
    pub fn category_labels(&self) -> Vec<String> {
        let categories = match self.tab {
            Tab::Doa => self.doas.view().categories(),
            Tab::Hadith => self.hadiths.view().categories(),
        };
        std::iter::once(CategoryFilter::All.label().to_string())
            .chain(categories.iter().map(|c| c.name.clone()))
            .collect()
    }

    pub fn item_rows(&self) -> Vec<ItemRow> {
        match self.tab {
            Tab::Doa => rows(self.doas.view(), |d| d.title.as_str(), |d| d.display_category()),
            Tab::Hadith => rows(self.hadiths.view(), |h| h.title.as_str(), |h| h.category.as_str()),
        }
    }

    pub fn selected_preview(&self) -> Option<Preview> {
        match self.tab {
            Tab::Doa => self.doas.view().filtered().get(self.item_index).map(Preview::from),
            Tab::Hadith => self
                .hadiths
                .view()
                .filtered()
                .get(self.item_index)
                .map(Preview::from),
        }
    }

    pub fn query(&self) -> &str {
        match self.tab {
            Tab::Doa => &self.doas.view().filter().query,
            Tab::Hadith => &self.hadiths.view().filter().query,
        }
    }

    pub fn category_filter(&self) -> &CategoryFilter {
        match self.tab {
            Tab::Doa => &self.doas.view().filter().category,
            Tab::Hadith => &self.hadiths.view().filter().category,
        }
    }

    pub fn is_loading(&self) -> bool {
        match self.tab {
            Tab::Doa => self.doas.view().is_loading(),
            Tab::Hadith => self.hadiths.view().is_loading(),
        }
    }

    fn item_count(&self) -> usize {
        match self.tab {
            Tab::Doa => self.doas.view().filtered().len(),
            Tab::Hadith => self.hadiths.view().filtered().len(),
        }
    }

    fn category_count(&self) -> usize {
        match self.tab {
            Tab::Doa => self.doas.view().categories().len() + 1,
            Tab::Hadith => self.hadiths.view().categories().len() + 1,
        }
    }

    /// Apply pending store updates for both tabs.
    pub fn poll(&mut self) -> Result<bool> {
        let doas = self.doas.poll()?;
        let hadiths = self.hadiths.poll()?;
        if doas || hadiths {
            self.clamp_selection();
        }
        Ok(doas || hadiths)
    }

    pub fn refresh(&mut self) -> Result<()> {
        self.doas.refresh()?;
        self.hadiths.refresh()?;
        self.clamp_selection();
        Ok(())
    }

    pub fn switch_tab(&mut self) {
        self.tab = self.tab.toggle();
        self.mode = InputMode::Normal;
        self.pending_delete = None;
        self.category_index = self.category_index_of_filter();
        self.category_list_state.select(Some(self.category_index));
        self.select_item(0);
    }

    pub fn start_search(&mut self) {
        self.mode = InputMode::Search;
        self.active_pane = ActivePane::Items;
    }

    pub fn end_search(&mut self) {
        self.mode = InputMode::Normal;
    }

    pub fn push_query_char(&mut self, c: char) {
        let mut query = self.query().to_string();
        query.push(c);
        self.set_query(query);
    }

    pub fn pop_query_char(&mut self) {
        let mut query = self.query().to_string();
        if query.pop().is_some() {
            self.set_query(query);
        }
    }

    fn set_query(&mut self, query: String) {
        let changed = match self.tab {
            Tab::Doa => self.doas.view_mut().set_query(query),
            Tab::Hadith => self.hadiths.view_mut().set_query(query),
        };
        if changed {
            self.select_item(0);
        }
    }

    /// Filter by the highlighted category and move to the items pane.
    pub fn apply_selected_category(&mut self) {
        let filter = if self.category_index == 0 {
            CategoryFilter::All
        } else {
            match self.category_labels().into_iter().nth(self.category_index) {
                Some(name) => CategoryFilter::Only(name),
                None => CategoryFilter::All,
            }
        };
        let changed = match self.tab {
            Tab::Doa => self.doas.view_mut().set_category(filter),
            Tab::Hadith => self.hadiths.view_mut().set_category(filter),
        };
        if changed {
            self.select_item(0);
        }
        self.active_pane = ActivePane::Items;
    }

    pub fn clear_filter(&mut self) {
        match self.tab {
            Tab::Doa => {
                let view = self.doas.view_mut();
                view.set_category(CategoryFilter::All);
                view.set_query("");
            }
            Tab::Hadith => {
                let view = self.hadiths.view_mut();
                view.set_category(CategoryFilter::All);
                view.set_query("");
            }
        }
        self.category_index = 0;
        self.category_list_state.select(Some(0));
        self.select_item(0);
    }

    /// Ask for confirmation before deleting the selected entry. Bundled
    /// entries and sessions without an admin login are refused.
    pub fn request_delete(&mut self) {
        if self.session.is_none() {
            self.set_status("Deleting requires an admin login (sajadah tui -u <user>)".to_string());
            return;
        }
        let Some(row) = self.item_rows().into_iter().nth(self.item_index) else {
            return;
        };
        if row.is_static {
            self.set_status(format!("\"{}\" is bundled and cannot be deleted", row.title));
            return;
        }
        self.pending_delete = Some(PendingDelete {
            tab: self.tab,
            id: row.id,
            title: row.title,
        });
    }

    pub fn move_up(&mut self) {
        match self.active_pane {
            ActivePane::Categories => self.select_category(self.category_index.saturating_sub(1)),
            ActivePane::Items => self.select_item(self.item_index.saturating_sub(1)),
            ActivePane::Preview => {
                self.preview_scroll = self.preview_scroll.saturating_sub(1);
            }
        }
    }

    pub fn move_down(&mut self) {
        match self.active_pane {
            ActivePane::Categories => self.select_category(self.category_index + 1),
            ActivePane::Items => self.select_item(self.item_index + 1),
            ActivePane::Preview => {
                self.preview_scroll = self.preview_scroll.saturating_add(1);
            }
        }
    }

    pub fn next_page(&mut self) {
        match self.active_pane {
            ActivePane::Categories => self.select_category(self.category_index + PAGE_SIZE),
            ActivePane::Items => self.select_item(self.item_index + PAGE_SIZE),
            ActivePane::Preview => {
                self.preview_scroll = self.preview_scroll.saturating_add(PAGE_SIZE as u16);
            }
        }
    }

    pub fn prev_page(&mut self) {
        match self.active_pane {
            ActivePane::Categories => {
                self.select_category(self.category_index.saturating_sub(PAGE_SIZE))
            }
            ActivePane::Items => self.select_item(self.item_index.saturating_sub(PAGE_SIZE)),
            ActivePane::Preview => {
                self.preview_scroll = self.preview_scroll.saturating_sub(PAGE_SIZE as u16);
            }
        }
    }

    fn select_category(&mut self, index: usize) {
        self.category_index = index.min(self.category_count().saturating_sub(1));
        self.category_list_state.select(Some(self.category_index));
    }

    fn select_item(&mut self, index: usize) {
        let index = index.min(self.item_count().saturating_sub(1));
        if index != self.item_index {
            self.preview_scroll = 0;
        }
        self.item_index = index;
        self.item_list_state.select(Some(index));
    }

    fn clamp_selection(&mut self) {
        self.select_category(self.category_index);
        self.select_item(self.item_index);
    }

    fn category_index_of_filter(&self) -> usize {
        match self.category_filter() {
            CategoryFilter::All => 0,
            CategoryFilter::Only(name) => self
                .category_labels()
                .iter()
                .skip(1)
                .position(|label| label == name)
                .map_or(0, |i| i + 1),
        }
    }

    pub fn toggle_maximize(&mut self) {
        self.maximized = !self.maximized;
        if self.maximized {
            self.active_pane = ActivePane::Preview;
        }
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::app::library::{doa_library, hadith_library};
    use crate::auth::{hash_password, AdminConfig, ConfigIdentity, IdentityProvider};
    use crate::pipeline::SearchScope;
    use crate::store::{CategoryKind, SqliteStore, Store};

    fn bundled() -> Arc<[Doa]> {
        let mut pagi = Doa::new("Doa Pagi", "ayat", "latin", "arti").with_category("Harian");
        pagi.id = "static-1".into();
        let mut makan = Doa::new("Doa Makan", "ayat", "latin", "arti").with_category("Makan");
        makan.id = "static-2".into();
        Arc::from(vec![pagi, makan])
    }

    fn app(store: &Arc<SqliteStore>, session: Option<Session>) -> TuiApp {
        TuiApp::new(
            doa_library(store, bundled(), SearchScope::Public).unwrap(),
            hadith_library(store, SearchScope::Public).unwrap(),
            session,
        )
    }

    fn session() -> Session {
        ConfigIdentity::new(&AdminConfig {
            username: "admin".into(),
            password_sha256: Some(hash_password("rahasia")),
        })
        .verify("admin", "rahasia")
        .unwrap()
    }

    #[test]
    fn test_pane_cycle() {
        assert_eq!(ActivePane::Categories.next(), ActivePane::Items);
        assert_eq!(ActivePane::Categories.prev(), ActivePane::Preview);
        assert_eq!(ActivePane::Preview.next().next(), ActivePane::Items);
    }

    #[test]
    fn test_search_updates_items_live() {
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        let mut app = app(&store, None);
        assert_eq!(app.item_rows().len(), 2);

        app.start_search();
        for c in "maKAN".chars() {
            app.push_query_char(c);
        }
        let rows = app.item_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Doa Makan");

        app.pop_query_char();
        assert_eq!(app.query(), "maKA");
        app.end_search();
        assert_eq!(app.mode, InputMode::Normal);
    }

    #[test]
    fn test_category_selection_filters_items() {
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        let mut app = app(&store, None);
        assert_eq!(app.category_labels(), vec!["All", "Harian", "Makan"]);

        app.active_pane = ActivePane::Categories;
        app.move_down();
        app.apply_selected_category();
        assert_eq!(app.active_pane, ActivePane::Items);
        assert_eq!(app.item_rows().len(), 1);
        assert_eq!(app.category_filter(), &CategoryFilter::Only("Harian".into()));

        app.clear_filter();
        assert_eq!(app.item_rows().len(), 2);
    }

    #[test]
    fn test_poll_shows_new_store_entries() {
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        let mut app = app(&store, None);
        app.switch_tab();
        assert_eq!(app.tab, Tab::Hadith);
        assert!(app.item_rows().is_empty());

        store.add_category(CategoryKind::Hadith, "Akhlak").unwrap();
        store
            .add_hadith(&Hadith {
                id: String::new(),
                title: "Senyum".into(),
                category: "Akhlak".into(),
                arabic: "arab".into(),
                latin: "latin".into(),
                translation: "arti".into(),
                explanation: "penjelasan".into(),
                narrator: "HR. Tirmidzi".into(),
            })
            .unwrap();

        assert!(app.poll().unwrap());
        assert_eq!(app.item_rows().len(), 1);
        let preview = app.selected_preview().unwrap();
        assert_eq!(preview.narrator.as_deref(), Some("HR. Tirmidzi"));
        assert!(!app.poll().unwrap());
    }

    #[test]
    fn test_delete_requires_session() {
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        store
            .add_doa(&Doa::new("Doa Safar", "a", "b", "c"))
            .unwrap();
        let mut app = app(&store, None);
        app.select_item(2);
        app.request_delete();
        assert!(app.pending_delete.is_none());
        assert!(app.status_message.is_some());
    }

    #[test]
    fn test_delete_refuses_bundled_items() {
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        let id = store
            .add_doa(&Doa::new("Doa Safar", "a", "b", "c"))
            .unwrap();
        let mut app = app(&store, Some(session()));

        app.request_delete();
        assert!(app.pending_delete.is_none());

        app.select_item(2);
        app.request_delete();
        let pending = app.pending_delete.clone().unwrap();
        assert_eq!(pending.id, id);
        assert_eq!(pending.tab, Tab::Doa);
    }

    #[test]
    fn test_stored_doa_sharing_bundled_id_is_deletable() {
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        let mut safar = Doa::new("Doa Safar", "a", "b", "c");
        safar.id = "static-1".into();
        store.add_doa(&safar).unwrap();
        let mut app = app(&store, Some(session()));

        let flags: Vec<(String, bool)> = app
            .item_rows()
            .into_iter()
            .map(|row| (row.title, row.is_static))
            .collect();
        assert_eq!(
            flags,
            vec![
                ("Doa Pagi".to_string(), true),
                ("Doa Makan".to_string(), true),
                ("Doa Safar".to_string(), false),
            ]
        );

        app.select_item(2);
        app.request_delete();
        let pending = app.pending_delete.clone().unwrap();
        assert_eq!(pending.id, "static-1");
        assert_eq!(pending.title, "Doa Safar");
    }

    #[test]
    fn test_selection_clamped_after_removal() {
        let store = Arc::new(SqliteStore::in_memory().unwrap());
        let id = store
            .add_doa(&Doa::new("Doa Safar", "a", "b", "c"))
            .unwrap();
        let mut app = app(&store, None);
        app.select_item(2);
        assert_eq!(app.item_index, 2);

        store.delete_doa(&id).unwrap();
        app.poll().unwrap();
        assert_eq!(app.item_index, 1);
    }
}
