use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};
use rusqlite_migration::{Migrations, M};
use tokio::sync::watch;

use crate::app::{Result, SajadahError};
use crate::domain::{generate_id, Category, Doa, DoaUpdate, Hadith, HadithUpdate};
use crate::store::{CategoryKind, Collection, Store};

const DOA_COLUMNS: &str = "id, title, arabic, latin, translation, category";
const HADITH_COLUMNS: &str =
    "id, title, category, arabic, latin, translation, explanation, narrator";

/// SQLite-backed document store.
///
/// Every write bumps the revision of the collection it touched; live
/// subscriptions (see [`crate::store::live`]) watch those revisions.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    revisions: [watch::Sender<u64>; 4],
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        let store = Self {
            conn: Mutex::new(conn),
            revisions: std::array::from_fn(|_| watch::channel(0).0),
        };
        store.run_migrations()?;
        Ok(store)
    }

    fn run_migrations(&self) -> Result<()> {
        let migrations = Migrations::new(vec![M::up(include_str!(
            "../../migrations/001-initial/up.sql"
        ))]);

        let mut conn = self.conn()?;
        migrations
            .to_latest(&mut conn)
            .map_err(|e| SajadahError::Other(format!("Migration failed: {}", e)))?;

        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|e| {
            SajadahError::Database(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(1),
                Some(e.to_string()),
            ))
        })
    }

    pub(crate) fn revision_sender(&self, collection: Collection) -> &watch::Sender<u64> {
        &self.revisions[collection.index()]
    }

    /// Current revision of a collection. Starts at 0 and grows by one per write.
    pub fn revision(&self, collection: Collection) -> u64 {
        *self.revision_sender(collection).borrow()
    }

    fn notify(&self, collection: Collection) {
        self.revision_sender(collection).send_modify(|revision| *revision += 1);
        tracing::debug!(
            "Collection {} now at revision {}",
            collection.name(),
            self.revision(collection)
        );
    }

    fn new_id(collection: Collection, content: &str) -> String {
        let nonce = Utc::now().timestamp_nanos_opt().unwrap_or_default();
        generate_id(collection.name(), &format!("{}:{}", content, nonce))
    }

    fn row_to_doa(row: &Row<'_>) -> rusqlite::Result<Doa> {
        Ok(Doa {
            id: row.get(0)?,
            title: row.get(1)?,
            arabic: row.get(2)?,
            latin: row.get(3)?,
            translation: row.get(4)?,
            category: row.get(5)?,
        })
    }

    fn row_to_hadith(row: &Row<'_>) -> rusqlite::Result<Hadith> {
        Ok(Hadith {
            id: row.get(0)?,
            title: row.get(1)?,
            category: row.get(2)?,
            arabic: row.get(3)?,
            latin: row.get(4)?,
            translation: row.get(5)?,
            explanation: row.get(6)?,
            narrator: row.get(7)?,
        })
    }

    fn insert_doa(conn: &Connection, id: &str, doa: &Doa, or_ignore: bool) -> Result<usize> {
        let verb = if or_ignore { "INSERT OR IGNORE" } else { "INSERT" };
        let inserted = conn.execute(
            &format!(
                "{} INTO doas ({}, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                verb, DOA_COLUMNS
            ),
            params![
                id,
                doa.title,
                doa.arabic,
                doa.latin,
                doa.translation,
                doa.category,
                Utc::now().to_rfc3339()
            ],
        )?;
        Ok(inserted)
    }

    fn insert_hadith(
        conn: &Connection,
        id: &str,
        hadith: &Hadith,
        or_ignore: bool,
    ) -> Result<usize> {
        let verb = if or_ignore { "INSERT OR IGNORE" } else { "INSERT" };
        let inserted = conn.execute(
            &format!(
                "{} INTO hadiths ({}, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                verb, HADITH_COLUMNS
            ),
            params![
                id,
                hadith.title,
                hadith.category,
                hadith.arabic,
                hadith.latin,
                hadith.translation,
                hadith.explanation,
                hadith.narrator,
                Utc::now().to_rfc3339()
            ],
        )?;
        Ok(inserted)
    }

    fn id_or_new(collection: Collection, id: &str, content: &str) -> String {
        if id.is_empty() {
            Self::new_id(collection, content)
        } else {
            id.to_string()
        }
    }

    fn set_text(conn: &Connection, table: &str, column: &str, id: &str, value: &str) -> Result<()> {
        conn.execute(
            &format!("UPDATE {} SET {} = ?1 WHERE id = ?2", table, column),
            params![value, id],
        )?;
        Ok(())
    }
}

impl Store for SqliteStore {
    fn add_doa(&self, doa: &Doa) -> Result<String> {
        let id = Self::id_or_new(Collection::Doas, &doa.id, &doa.title);
        {
            let conn = self.conn()?;
            Self::insert_doa(&conn, &id, doa, false)?;
        }
        self.notify(Collection::Doas);
        Ok(id)
    }

    fn add_doas(&self, doas: &[Doa]) -> Result<usize> {
        let count = {
            let mut conn = self.conn()?;
            let tx = conn.transaction()?;
            let mut count = 0;
            for doa in doas {
                let id = Self::id_or_new(Collection::Doas, &doa.id, &doa.title);
                count += Self::insert_doa(&tx, &id, doa, true)?;
            }
            tx.commit()?;
            count
        };
        if count > 0 {
            self.notify(Collection::Doas);
        }
        Ok(count)
    }

    fn get_doa(&self, id: &str) -> Result<Option<Doa>> {
        let conn = self.conn()?;
        let result = conn
            .query_row(
                &format!("SELECT {} FROM doas WHERE id = ?1", DOA_COLUMNS),
                params![id],
                Self::row_to_doa,
            )
            .optional()?;
        Ok(result)
    }

    fn get_all_doas(&self) -> Result<Vec<Doa>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM doas ORDER BY title, id",
            DOA_COLUMNS
        ))?;
        let doas = stmt
            .query_map([], Self::row_to_doa)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(doas)
    }

    fn update_doa(&self, id: &str, update: &DoaUpdate) -> Result<()> {
        {
            let mut conn = self.conn()?;
            let tx = conn.transaction()?;
            let exists: i64 =
                tx.query_row("SELECT COUNT(*) FROM doas WHERE id = ?1", params![id], |row| {
                    row.get(0)
                })?;
            if exists == 0 {
                return Err(SajadahError::NotFound {
                    kind: "doa",
                    id: id.to_string(),
                });
            }

            let fields = [
                ("title", &update.title),
                ("arabic", &update.arabic),
                ("latin", &update.latin),
                ("translation", &update.translation),
                ("category", &update.category),
            ];
            for (column, value) in fields {
                if let Some(value) = value {
                    Self::set_text(&tx, "doas", column, id, value)?;
                }
            }
            tx.commit()?;
        }
        self.notify(Collection::Doas);
        Ok(())
    }

    fn delete_doa(&self, id: &str) -> Result<()> {
        let deleted = {
            let conn = self.conn()?;
            conn.execute("DELETE FROM doas WHERE id = ?1", params![id])?
        };
        if deleted == 0 {
            return Err(SajadahError::NotFound {
                kind: "doa",
                id: id.to_string(),
            });
        }
        self.notify(Collection::Doas);
        Ok(())
    }

    fn add_hadith(&self, hadith: &Hadith) -> Result<String> {
        let id = Self::id_or_new(Collection::Hadiths, &hadith.id, &hadith.title);
        {
            let conn = self.conn()?;
            Self::insert_hadith(&conn, &id, hadith, false)?;
        }
        self.notify(Collection::Hadiths);
        Ok(id)
    }

    fn add_hadiths(&self, hadiths: &[Hadith]) -> Result<usize> {
        let count = {
            let mut conn = self.conn()?;
            let tx = conn.transaction()?;
            let mut count = 0;
            for hadith in hadiths {
                let id = Self::id_or_new(Collection::Hadiths, &hadith.id, &hadith.title);
                count += Self::insert_hadith(&tx, &id, hadith, true)?;
            }
            tx.commit()?;
            count
        };
        if count > 0 {
            self.notify(Collection::Hadiths);
        }
        Ok(count)
    }

    fn get_hadith(&self, id: &str) -> Result<Option<Hadith>> {
        let conn = self.conn()?;
        let result = conn
            .query_row(
                &format!("SELECT {} FROM hadiths WHERE id = ?1", HADITH_COLUMNS),
                params![id],
                Self::row_to_hadith,
            )
            .optional()?;
        Ok(result)
    }

    fn get_all_hadiths(&self) -> Result<Vec<Hadith>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM hadiths ORDER BY title, id",
            HADITH_COLUMNS
        ))?;
        let hadiths = stmt
            .query_map([], Self::row_to_hadith)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(hadiths)
    }

    fn update_hadith(&self, id: &str, update: &HadithUpdate) -> Result<()> {
        {
            let mut conn = self.conn()?;
            let tx = conn.transaction()?;
            let exists: i64 = tx.query_row(
                "SELECT COUNT(*) FROM hadiths WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )?;
            if exists == 0 {
                return Err(SajadahError::NotFound {
                    kind: "hadith",
                    id: id.to_string(),
                });
            }

            let fields = [
                ("title", &update.title),
                ("category", &update.category),
                ("arabic", &update.arabic),
                ("latin", &update.latin),
                ("translation", &update.translation),
                ("explanation", &update.explanation),
                ("narrator", &update.narrator),
            ];
            for (column, value) in fields {
                if let Some(value) = value {
                    Self::set_text(&tx, "hadiths", column, id, value)?;
                }
            }
            tx.commit()?;
        }
        self.notify(Collection::Hadiths);
        Ok(())
    }

    fn delete_hadith(&self, id: &str) -> Result<()> {
        let deleted = {
            let conn = self.conn()?;
            conn.execute("DELETE FROM hadiths WHERE id = ?1", params![id])?
        };
        if deleted == 0 {
            return Err(SajadahError::NotFound {
                kind: "hadith",
                id: id.to_string(),
            });
        }
        self.notify(Collection::Hadiths);
        Ok(())
    }

    fn add_category(&self, kind: CategoryKind, name: &str) -> Result<String> {
        let id = Self::new_id(kind.collection(), name);
        {
            let conn = self.conn()?;
            conn.execute(
                &format!(
                    "INSERT INTO {} (id, name, created_at) VALUES (?1, ?2, ?3)",
                    kind.table()
                ),
                params![id, name, Utc::now().to_rfc3339()],
            )?;
        }
        self.notify(kind.collection());
        Ok(id)
    }

    fn get_categories(&self, kind: CategoryKind) -> Result<Vec<Category>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT id, name FROM {} ORDER BY name, id",
            kind.table()
        ))?;
        let categories = stmt
            .query_map([], |row| {
                Ok(Category {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    fn delete_category(&self, kind: CategoryKind, id: &str) -> Result<()> {
        let deleted = {
            let conn = self.conn()?;
            conn.execute(
                &format!("DELETE FROM {} WHERE id = ?1", kind.table()),
                params![id],
            )?
        };
        if deleted == 0 {
            return Err(SajadahError::NotFound {
                kind: "category",
                id: id.to_string(),
            });
        }
        self.notify(kind.collection());
        Ok(())
    }
}
