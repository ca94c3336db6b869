use crate::evaluation::FundSettings;

use super::domain::{SiteId, SiteRecord};

/// Storage abstraction for site records.
pub trait SiteRepository: Send + Sync {
    fn insert(&self, record: SiteRecord) -> Result<SiteRecord, RepositoryError>;
    fn update(&self, record: SiteRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &SiteId) -> Result<Option<SiteRecord>, RepositoryError>;
    fn list(&self) -> Result<Vec<SiteRecord>, RepositoryError>;
}

/// Holder of the single active fund settings record.
pub trait FundSettingsStore: Send + Sync {
    fn active(&self) -> Result<FundSettings, RepositoryError>;
    fn replace(&self, settings: FundSettings) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
