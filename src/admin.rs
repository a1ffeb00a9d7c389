//! Content management for stored doas, hadiths and their categories.
//!
//! Every operation goes through a [`ContentManager`], which can only be built
//! from an authenticated [`Session`]. Bundled doas are never touched here;
//! they are not in the store.

use std::path::Path;

use crate::app::{Result, SajadahError};
use crate::auth::Session;
use crate::domain::{Doa, DoaUpdate, Hadith, HadithUpdate, DEFAULT_DOA_CATEGORY};
use crate::store::{CategoryKind, Store};

pub struct ContentManager<'a, S: Store + ?Sized> {
    store: &'a S,
    session: &'a Session,
    bundled: &'a [Doa],
}

impl<'a, S: Store + ?Sized> ContentManager<'a, S> {
    pub fn new(store: &'a S, session: &'a Session) -> Self {
        Self {
            store,
            session,
            bundled: &[],
        }
    }

    /// Bundled doas to check imported ids against.
    pub fn with_bundled(mut self, bundled: &'a [Doa]) -> Self {
        self.bundled = bundled;
        self
    }

    pub fn add_doa(&self, mut doa: Doa) -> Result<String> {
        doa.validate()?;
        fill_doa_category(&mut doa);
        let id = self.store.add_doa(&doa)?;
        tracing::info!(
            "{} added doa '{}' ({})",
            self.session.username(),
            doa.title,
            id
        );
        Ok(id)
    }

    /// Apply a partial update. The merged document must still be valid.
    pub fn update_doa(&self, id: &str, update: &DoaUpdate) -> Result<()> {
        let mut current = self.store.get_doa(id)?.ok_or_else(|| SajadahError::NotFound {
            kind: "doa",
            id: id.to_string(),
        })?;
        current.apply(update);
        current.validate()?;
        self.store.update_doa(id, update)?;
        tracing::info!("{} updated doa {}", self.session.username(), id);
        Ok(())
    }

    pub fn delete_doa(&self, id: &str) -> Result<()> {
        self.store.delete_doa(id)?;
        tracing::info!("{} deleted doa {}", self.session.username(), id);
        Ok(())
    }

    pub fn add_hadith(&self, hadith: Hadith) -> Result<String> {
        hadith.validate()?;
        let id = self.store.add_hadith(&hadith)?;
        tracing::info!(
            "{} added hadith '{}' ({})",
            self.session.username(),
            hadith.title,
            id
        );
        Ok(id)
    }

    pub fn update_hadith(&self, id: &str, update: &HadithUpdate) -> Result<()> {
        let mut current = self
            .store
            .get_hadith(id)?
            .ok_or_else(|| SajadahError::NotFound {
                kind: "hadith",
                id: id.to_string(),
            })?;
        current.apply(update);
        current.validate()?;
        self.store.update_hadith(id, update)?;
        tracing::info!("{} updated hadith {}", self.session.username(), id);
        Ok(())
    }

    pub fn delete_hadith(&self, id: &str) -> Result<()> {
        self.store.delete_hadith(id)?;
        tracing::info!("{} deleted hadith {}", self.session.username(), id);
        Ok(())
    }

    /// Add a category record. The name is trimmed; blank names are rejected.
    pub fn add_category(&self, kind: CategoryKind, name: &str) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SajadahError::Validation(
                "category name must not be empty".into(),
            ));
        }
        let id = self.store.add_category(kind, name)?;
        tracing::info!(
            "{} added {:?} category '{}'",
            self.session.username(),
            kind,
            name
        );
        Ok(id)
    }

    pub fn delete_category(&self, kind: CategoryKind, id: &str) -> Result<()> {
        self.store.delete_category(kind, id)?;
        tracing::info!(
            "{} deleted {:?} category {}",
            self.session.username(),
            kind,
            id
        );
        Ok(())
    }

    /// Import a JSON array of doas. The whole file is validated before
    /// anything is written. Returns the number of new documents.
    pub fn import_doas(&self, json: &str) -> Result<usize> {
        let mut doas: Vec<Doa> = serde_json::from_str(json)?;
        for (index, doa) in doas.iter_mut().enumerate() {
            doa.validate().map_err(|e| at_entry(index, e))?;
            fill_doa_category(doa);
        }
        for id in self.bundled_ids_in(&doas) {
            tracing::warn!("Imported doa id {} is also used by a bundled doa", id);
        }
        let added = self.store.add_doas(&doas)?;
        tracing::info!(
            "{} imported {} of {} doas",
            self.session.username(),
            added,
            doas.len()
        );
        Ok(added)
    }

    pub fn import_hadiths(&self, json: &str) -> Result<usize> {
        let hadiths: Vec<Hadith> = serde_json::from_str(json)?;
        for (index, hadith) in hadiths.iter().enumerate() {
            hadith.validate().map_err(|e| at_entry(index, e))?;
        }
        let added = self.store.add_hadiths(&hadiths)?;
        tracing::info!(
            "{} imported {} of {} hadiths",
            self.session.username(),
            added,
            hadiths.len()
        );
        Ok(added)
    }

    fn bundled_ids_in<'d>(&self, doas: &'d [Doa]) -> Vec<&'d str> {
        doas.iter()
            .map(|doa| doa.id.as_str())
            .filter(|id| !id.is_empty() && self.bundled.iter().any(|b| b.id == *id))
            .collect()
    }

    pub fn import_doas_file<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let json = std::fs::read_to_string(path)?;
        self.import_doas(&json)
    }

    pub fn import_hadiths_file<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let json = std::fs::read_to_string(path)?;
        self.import_hadiths(&json)
    }
}

fn fill_doa_category(doa: &mut Doa) {
    let missing = doa.category.as_deref().is_none_or(|c| c.trim().is_empty());
    if missing {
        doa.category = Some(DEFAULT_DOA_CATEGORY.to_string());
    }
}

fn at_entry(index: usize, err: SajadahError) -> SajadahError {
    match err {
        SajadahError::Validation(msg) => {
            SajadahError::Validation(format!("entry {}: {}", index + 1, msg))
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{hash_password, AdminConfig, ConfigIdentity, IdentityProvider};
    use crate::store::SqliteStore;

    fn session() -> Session {
        ConfigIdentity::new(&AdminConfig {
            username: "admin".into(),
            password_sha256: Some(hash_password("rahasia")),
        })
        .verify("admin", "rahasia")
        .unwrap()
    }

    fn hadith(title: &str) -> Hadith {
        Hadith {
            id: String::new(),
            title: title.into(),
            category: "Akhlak".into(),
            arabic: "arab".into(),
            latin: "latin".into(),
            translation: "arti".into(),
            explanation: "penjelasan".into(),
            narrator: "HR. Bukhari".into(),
        }
    }

    #[test]
    fn test_add_doa_defaults_category() {
        let store = SqliteStore::in_memory().unwrap();
        let session = session();
        let cms = ContentManager::new(&store, &session);

        let id = cms
            .add_doa(Doa::new("Doa Pagi", "ayat", "latin", "arti"))
            .unwrap();
        let stored = store.get_doa(&id).unwrap().unwrap();
        assert_eq!(stored.category.as_deref(), Some(DEFAULT_DOA_CATEGORY));
    }

    #[test]
    fn test_add_doa_rejects_blank_field() {
        let store = SqliteStore::in_memory().unwrap();
        let session = session();
        let cms = ContentManager::new(&store, &session);

        let result = cms.add_doa(Doa::new("Doa Pagi", "  ", "latin", "arti"));
        assert!(matches!(result, Err(SajadahError::Validation(_))));
        assert!(store.get_all_doas().unwrap().is_empty());
    }

    #[test]
    fn test_update_must_leave_valid_document() {
        let store = SqliteStore::in_memory().unwrap();
        let session = session();
        let cms = ContentManager::new(&store, &session);
        let id = cms
            .add_doa(Doa::new("Doa Pagi", "ayat", "latin", "arti"))
            .unwrap();

        let blanking = DoaUpdate {
            latin: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(
            cms.update_doa(&id, &blanking),
            Err(SajadahError::Validation(_))
        ));
        assert_eq!(store.get_doa(&id).unwrap().unwrap().latin, "latin");

        let retitle = DoaUpdate {
            title: Some("Doa Pagi Hari".into()),
            ..Default::default()
        };
        cms.update_doa(&id, &retitle).unwrap();
        assert_eq!(store.get_doa(&id).unwrap().unwrap().title, "Doa Pagi Hari");
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let store = SqliteStore::in_memory().unwrap();
        let session = session();
        let cms = ContentManager::new(&store, &session);
        assert!(matches!(
            cms.update_hadith("nope", &HadithUpdate::default()),
            Err(SajadahError::NotFound { kind: "hadith", .. })
        ));
    }

    #[test]
    fn test_bundled_doa_cannot_be_deleted() {
        let store = SqliteStore::in_memory().unwrap();
        let session = session();
        let cms = ContentManager::new(&store, &session);
        assert!(matches!(
            cms.delete_doa("static-1"),
            Err(SajadahError::NotFound { .. })
        ));
    }

    #[test]
    fn test_hadith_requires_every_field() {
        let store = SqliteStore::in_memory().unwrap();
        let session = session();
        let cms = ContentManager::new(&store, &session);

        let mut incomplete = hadith("Niat");
        incomplete.narrator.clear();
        assert!(cms.add_hadith(incomplete).is_err());

        let id = cms.add_hadith(hadith("Niat")).unwrap();
        cms.delete_hadith(&id).unwrap();
        assert!(store.get_hadith(&id).unwrap().is_none());
    }

    #[test]
    fn test_category_name_trimmed() {
        let store = SqliteStore::in_memory().unwrap();
        let session = session();
        let cms = ContentManager::new(&store, &session);

        cms.add_category(CategoryKind::Doa, "  Safar ").unwrap();
        let categories = store.get_categories(CategoryKind::Doa).unwrap();
        assert_eq!(categories[0].name, "Safar");

        assert!(matches!(
            cms.add_category(CategoryKind::Doa, "   "),
            Err(SajadahError::Validation(_))
        ));
    }

    #[test]
    fn test_import_doas_validates_before_writing() {
        let store = SqliteStore::in_memory().unwrap();
        let session = session();
        let cms = ContentManager::new(&store, &session);

        let bad = r#"[
            {"doa": "Doa A", "ayat": "a", "latin": "a", "artinya": "a"},
            {"doa": "Doa B", "ayat": "", "latin": "b", "artinya": "b"}
        ]"#;
        let err = cms.import_doas(bad).unwrap_err();
        assert!(err.to_string().contains("entry 2"));
        assert!(store.get_all_doas().unwrap().is_empty());

        let good = r#"[
            {"id": "imp-1", "doa": "Doa A", "ayat": "a", "latin": "a", "artinya": "a"},
            {"id": "imp-2", "doa": "Doa B", "ayat": "b", "latin": "b", "artinya": "b", "kategori": "Harian"}
        ]"#;
        assert_eq!(cms.import_doas(good).unwrap(), 2);
        assert_eq!(cms.import_doas(good).unwrap(), 0);

        let stored = store.get_doa("imp-1").unwrap().unwrap();
        assert_eq!(stored.category.as_deref(), Some(DEFAULT_DOA_CATEGORY));
    }

    #[test]
    fn test_import_keeps_ids_that_clash_with_bundled() {
        let store = SqliteStore::in_memory().unwrap();
        let session = session();
        let bundled = vec![Doa {
            id: "static-1".into(),
            ..Doa::new("Doa Pagi", "ayat", "latin", "arti")
        }];
        let cms = ContentManager::new(&store, &session).with_bundled(&bundled);

        let json = r#"[
            {"id": "static-1", "doa": "Doa Safar", "ayat": "a", "latin": "b", "artinya": "c"},
            {"id": "own-1", "doa": "Doa Pulang", "ayat": "a", "latin": "b", "artinya": "c"},
            {"doa": "Doa Pasar", "ayat": "a", "latin": "b", "artinya": "c"}
        ]"#;
        let parsed: Vec<Doa> = serde_json::from_str(json).unwrap();
        assert_eq!(cms.bundled_ids_in(&parsed), vec!["static-1"]);

        assert_eq!(cms.import_doas(json).unwrap(), 3);
        let stored = store.get_doa("static-1").unwrap().unwrap();
        assert_eq!(stored.title, "Doa Safar");
    }

    #[test]
    fn test_import_hadiths_from_file() {
        let store = SqliteStore::in_memory().unwrap();
        let session = session();
        let cms = ContentManager::new(&store, &session);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hadiths.json");
        let json = serde_json::to_string(&vec![hadith("Niat"), hadith("Senyum")]).unwrap();
        std::fs::write(&path, json).unwrap();

        assert_eq!(cms.import_hadiths_file(&path).unwrap(), 2);
        assert_eq!(store.get_all_hadiths().unwrap().len(), 2);
    }
}
