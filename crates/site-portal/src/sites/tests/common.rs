use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::body::to_bytes;
use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::evaluation::{FundSettings, PoliticalClimate, SiteInputs, Zoning};
use crate::sites::domain::{SiteId, SiteRecord, SiteSubmission};
use crate::sites::repository::{FundSettingsStore, RepositoryError, SiteRepository};
use crate::sites::SitePipelineService;

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 6).expect("valid date")
}

pub(super) fn fund() -> FundSettings {
    FundSettings {
        fund_size: 10_000_000.0,
        pref_return: 0.16,
        lp_split: 0.6,
        gp_split: 0.4,
        management_fee: 0.02,
        commitment_fee_per_m: 10_000.0,
    }
}

pub(super) fn submission() -> SiteSubmission {
    SiteSubmission {
        name: "Brazos Yard".to_string(),
        location: "Freeport, TX".to_string(),
        inputs: SiteInputs {
            acreage: 220.0,
            asking_price: 3_400_000.0,
            gas_volume: 14_400.0,
            gas_pressure: 600.0,
            pipeline_distance: 1.2,
            pipeline_diameter: 30.0,
            political_climate: Some(PoliticalClimate::Unknown),
            zoning: Some(Zoning::VarianceNeeded),
            ..SiteInputs::default()
        },
    }
}

pub(super) fn build_service() -> (
    Arc<SitePipelineService<MemoryRepository, MemoryFunds>>,
    Arc<MemoryRepository>,
) {
    let repository = Arc::new(MemoryRepository::default());
    let funds = Arc::new(MemoryFunds::new(fund()));
    let service = Arc::new(SitePipelineService::new(repository.clone(), funds));
    (service, repository)
}

pub(super) async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    records: Mutex<HashMap<SiteId, SiteRecord>>,
}

impl MemoryRepository {
    pub(super) fn len(&self) -> usize {
        self.records.lock().expect("repository mutex poisoned").len()
    }
}

impl SiteRepository for MemoryRepository {
    fn insert(&self, record: SiteRecord) -> Result<SiteRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: SiteRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        match guard.get_mut(&record.id) {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &SiteId) -> Result<Option<SiteRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<SiteRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

pub(super) struct MemoryFunds {
    active: Mutex<FundSettings>,
}

impl MemoryFunds {
    pub(super) fn new(settings: FundSettings) -> Self {
        Self {
            active: Mutex::new(settings),
        }
    }
}

impl FundSettingsStore for MemoryFunds {
    fn active(&self) -> Result<FundSettings, RepositoryError> {
        Ok(self.active.lock().expect("fund mutex poisoned").clone())
    }

    fn replace(&self, settings: FundSettings) -> Result<(), RepositoryError> {
        *self.active.lock().expect("fund mutex poisoned") = settings;
        Ok(())
    }
}

pub(super) struct UnavailableRepository;

impl SiteRepository for UnavailableRepository {
    fn insert(&self, _record: SiteRecord) -> Result<SiteRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: SiteRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &SiteId) -> Result<Option<SiteRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list(&self) -> Result<Vec<SiteRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}
