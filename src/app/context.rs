use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::{Result, SajadahError};
use crate::app::library::{doa_library, hadith_library, LiveLibrary};
use crate::auth::{ConfigIdentity, IdentityProvider, Session};
use crate::bundle;
use crate::config::Config;
use crate::domain::{Doa, Hadith};
use crate::fetcher::{Fetcher, HttpFetcher};
use crate::pipeline::SearchScope;
use crate::services::{HijriCalendar, QiblaFinder, ScheduleService};
use crate::store::sqlite::SqliteStore;

pub struct AppContext {
    pub store: Arc<SqliteStore>,
    pub static_doas: Arc<[Doa]>,
    pub schedule: ScheduleService,
    pub calendar: HijriCalendar,
    pub qibla: QiblaFinder,
    identity: Box<dyn IdentityProvider + Send + Sync>,
}

impl AppContext {
    pub fn new(db_path: Option<PathBuf>, config: &Config) -> Result<Self> {
        let db_path = match db_path {
            Some(p) => p,
            None => Self::default_db_path()?,
        };

        let store = Arc::new(SqliteStore::new(&db_path)?);
        let fetcher: Arc<dyn Fetcher> = Arc::new(HttpFetcher::new(&config.api)?);
        Self::with_parts(store, fetcher, config)
    }

    pub fn in_memory(config: &Config) -> Result<Self> {
        let store = Arc::new(SqliteStore::in_memory()?);
        let fetcher: Arc<dyn Fetcher> = Arc::new(HttpFetcher::new(&config.api)?);
        Self::with_parts(store, fetcher, config)
    }

    /// Build a context around an existing store and API client.
    pub fn with_parts(
        store: Arc<SqliteStore>,
        fetcher: Arc<dyn Fetcher>,
        config: &Config,
    ) -> Result<Self> {
        Ok(Self {
            store,
            static_doas: bundle::static_doas()?,
            schedule: ScheduleService::new(fetcher.clone(), &config.api),
            calendar: HijriCalendar::new(fetcher.clone(), &config.api),
            qibla: QiblaFinder::new(fetcher),
            identity: Box::new(ConfigIdentity::new(&config.admin)),
        })
    }

    pub fn login(&self, username: &str, password: &str) -> Result<Session> {
        self.identity.verify(username, password)
    }

    pub fn doas(&self, scope: SearchScope) -> Result<LiveLibrary<Doa>> {
        match scope {
            SearchScope::Public => doa_library(&self.store, self.static_doas.clone(), scope),
            // Admin screens manage stored documents only.
            SearchScope::Admin => doa_library(&self.store, Arc::from(Vec::new()), scope),
        }
    }

    pub fn hadiths(&self, scope: SearchScope) -> Result<LiveLibrary<Hadith>> {
        hadith_library(&self.store, scope)
    }

    fn default_db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| SajadahError::Config("Could not find data directory".into()))?;
        let sajadah_dir = data_dir.join("sajadah");
        std::fs::create_dir_all(&sajadah_dir)?;
        Ok(sajadah_dir.join("sajadah.db"))
    }
}
