//! Site acquisition pipeline: records, activity history, storage seams, the
//! service feeding stored inputs into the evaluation engine, and HTTP routes.

pub mod domain;
pub mod import;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    ActivityEntry, ActivityKind, SiteId, SiteRecord, SiteStage, SiteSubmission, SiteView,
};
pub use import::{SiteCsvImporter, SiteImportError};
pub use repository::{FundSettingsStore, RepositoryError, SiteRepository};
pub use router::{site_router, EvaluationRequest};
pub use service::{SiteEvaluation, SitePipelineService, SiteServiceError};
