use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use site_portal::evaluation::FundSettings;
use site_portal::sites::{FundSettingsStore, RepositoryError, SiteId, SiteRecord, SiteRepository};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

fn poisoned<T>(_: PoisonError<T>) -> RepositoryError {
    RepositoryError::Unavailable("in-memory store lock poisoned".to_string())
}

#[derive(Default, Clone)]
pub(crate) struct InMemorySiteRepository {
    records: Arc<Mutex<HashMap<SiteId, SiteRecord>>>,
}

impl SiteRepository for InMemorySiteRepository {
    fn insert(&self, record: SiteRecord) -> Result<SiteRecord, RepositoryError> {
        let mut guard = self.records.lock().map_err(poisoned)?;
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: SiteRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().map_err(poisoned)?;
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &SiteId) -> Result<Option<SiteRecord>, RepositoryError> {
        let guard = self.records.lock().map_err(poisoned)?;
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<SiteRecord>, RepositoryError> {
        let guard = self.records.lock().map_err(poisoned)?;
        Ok(guard.values().cloned().collect())
    }
}

/// Holds the active fund record; seeded from configuration at startup.
#[derive(Clone)]
pub(crate) struct InMemoryFundSettingsStore {
    active: Arc<Mutex<FundSettings>>,
}

impl InMemoryFundSettingsStore {
    pub(crate) fn new(initial: FundSettings) -> Self {
        Self {
            active: Arc::new(Mutex::new(initial)),
        }
    }
}

impl FundSettingsStore for InMemoryFundSettingsStore {
    fn active(&self) -> Result<FundSettings, RepositoryError> {
        let guard = self.active.lock().map_err(poisoned)?;
        Ok(guard.clone())
    }

    fn replace(&self, settings: FundSettings) -> Result<(), RepositoryError> {
        let mut guard = self.active.lock().map_err(poisoned)?;
        *guard = settings;
        Ok(())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
