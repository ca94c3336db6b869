use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use crate::evaluation::{evaluate, EvaluationResult, FundSettings, FundSettingsError, SiteInputs};

use super::domain::{ActivityKind, SiteId, SiteRecord, SiteStage, SiteSubmission};
use super::repository::{FundSettingsStore, RepositoryError, SiteRepository};

static SITE_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_site_id() -> SiteId {
    let id = SITE_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SiteId(format!("site-{id:06}"))
}

/// Evaluation of a stored site against the fund settings active at request time.
#[derive(Debug, Clone, Serialize)]
pub struct SiteEvaluation {
    pub site_id: SiteId,
    pub name: String,
    pub stage: SiteStage,
    pub fund: FundSettings,
    pub result: EvaluationResult,
}

/// Service composing the site repository, the fund settings store, and the engine.
pub struct SitePipelineService<R, F> {
    repository: Arc<R>,
    funds: Arc<F>,
}

impl<R, F> SitePipelineService<R, F>
where
    R: SiteRepository + 'static,
    F: FundSettingsStore + 'static,
{
    pub fn new(repository: Arc<R>, funds: Arc<F>) -> Self {
        Self { repository, funds }
    }

    /// Register a new site at the start of the pipeline.
    pub fn create(
        &self,
        submission: SiteSubmission,
        on: NaiveDate,
    ) -> Result<SiteRecord, SiteServiceError> {
        let name = submission.name.trim().to_string();
        if name.is_empty() {
            return Err(SiteServiceError::MissingName);
        }

        let mut record = SiteRecord {
            id: next_site_id(),
            name,
            location: submission.location.trim().to_string(),
            stage: SiteStage::Identified,
            inputs: submission.inputs,
            created_on: on,
            activity: Vec::new(),
        };
        record.log(on, ActivityKind::Created, "site added to pipeline");

        let stored = self.repository.insert(record)?;
        info!(site_id = %stored.id, name = %stored.name, "site created");
        Ok(stored)
    }

    /// All sites, furthest-behind stage first and alphabetical within a stage.
    pub fn list(&self) -> Result<Vec<SiteRecord>, SiteServiceError> {
        let mut records = self.repository.list()?;
        records.sort_by(|a, b| {
            a.stage
                .cmp(&b.stage)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        Ok(records)
    }

    pub fn get(&self, site_id: &SiteId) -> Result<SiteRecord, SiteServiceError> {
        let record = self
            .repository
            .fetch(site_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Replace the evaluation form inputs wholesale.
    pub fn update_inputs(
        &self,
        site_id: &SiteId,
        inputs: SiteInputs,
        on: NaiveDate,
    ) -> Result<SiteRecord, SiteServiceError> {
        let mut record = self.get(site_id)?;
        record.inputs = inputs;
        record.log(on, ActivityKind::InputsUpdated, "evaluation inputs updated");

        self.repository.update(record.clone())?;
        debug!(site_id = %record.id, "site inputs replaced");
        Ok(record)
    }

    /// Move a site one stage forward.
    pub fn advance(&self, site_id: &SiteId, on: NaiveDate) -> Result<SiteRecord, SiteServiceError> {
        let mut record = self.get(site_id)?;
        let from = record.stage;
        let to = from
            .next()
            .ok_or_else(|| SiteServiceError::StageClosed(site_id.clone()))?;

        record.stage = to;
        record.log(
            on,
            ActivityKind::StageAdvanced,
            format!("{} -> {}", from.label(), to.label()),
        );

        self.repository.update(record.clone())?;
        info!(site_id = %record.id, from = from.label(), to = to.label(), "site advanced");
        Ok(record)
    }

    /// Evaluate a stored site with the currently active fund settings.
    pub fn evaluate_site(&self, site_id: &SiteId) -> Result<SiteEvaluation, SiteServiceError> {
        let record = self.get(site_id)?;
        let fund = self.funds.active()?;
        let result = evaluate(&record.inputs, &fund);

        debug!(
            site_id = %record.id,
            risk_score = result.risk_score,
            estimated_mw = result.estimated_mw,
            "site evaluated"
        );

        Ok(SiteEvaluation {
            site_id: record.id,
            name: record.name,
            stage: record.stage,
            fund,
            result,
        })
    }

    /// Evaluate ad-hoc inputs, using the active fund unless one is supplied.
    ///
    /// A supplied fund is range-checked like a replacement record.
    pub fn evaluate_inputs(
        &self,
        inputs: &SiteInputs,
        fund: Option<FundSettings>,
    ) -> Result<EvaluationResult, SiteServiceError> {
        let fund = match fund {
            Some(fund) => {
                fund.validate()?;
                fund
            }
            None => self.funds.active()?,
        };
        Ok(evaluate(inputs, &fund))
    }

    pub fn fund_settings(&self) -> Result<FundSettings, SiteServiceError> {
        Ok(self.funds.active()?)
    }

    /// Range-check and activate a new fund settings record.
    pub fn replace_fund_settings(
        &self,
        settings: FundSettings,
    ) -> Result<FundSettings, SiteServiceError> {
        settings.validate()?;
        self.funds.replace(settings.clone())?;
        info!(fund_size = settings.fund_size, "fund settings replaced");
        Ok(settings)
    }
}

/// Error raised by the site pipeline service.
#[derive(Debug, thiserror::Error)]
pub enum SiteServiceError {
    #[error("site name is required")]
    MissingName,
    #[error("site {0} has already closed")]
    StageClosed(SiteId),
    #[error(transparent)]
    FundSettings(#[from] FundSettingsError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
