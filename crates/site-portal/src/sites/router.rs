use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use chrono::Local;
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::evaluation::{FundSettings, SiteInputs};

use super::domain::{SiteId, SiteSubmission, SiteView};
use super::repository::{FundSettingsStore, RepositoryError, SiteRepository};
use super::service::{SitePipelineService, SiteServiceError};

/// Ad-hoc evaluation request; omitting `fund` uses the active fund settings.
#[derive(Debug, Deserialize)]
pub struct EvaluationRequest {
    #[serde(default)]
    pub inputs: SiteInputs,
    #[serde(default)]
    pub fund: Option<FundSettings>,
}

/// Router builder exposing the site pipeline and evaluation endpoints.
pub fn site_router<R, F>(service: Arc<SitePipelineService<R, F>>) -> Router
where
    R: SiteRepository + 'static,
    F: FundSettingsStore + 'static,
{
    Router::new()
        .route("/api/v1/evaluations", post(evaluate_handler::<R, F>))
        .route(
            "/api/v1/sites",
            post(create_handler::<R, F>).get(list_handler::<R, F>),
        )
        .route("/api/v1/sites/:site_id", get(site_handler::<R, F>))
        .route(
            "/api/v1/sites/:site_id/inputs",
            put(update_inputs_handler::<R, F>),
        )
        .route(
            "/api/v1/sites/:site_id/advance",
            post(advance_handler::<R, F>),
        )
        .route(
            "/api/v1/sites/:site_id/evaluation",
            get(site_evaluation_handler::<R, F>),
        )
        .route(
            "/api/v1/fund-settings",
            get(fund_settings_handler::<R, F>).put(replace_fund_settings_handler::<R, F>),
        )
        .with_state(service)
}

pub(crate) async fn evaluate_handler<R, F>(
    State(service): State<Arc<SitePipelineService<R, F>>>,
    axum::Json(request): axum::Json<EvaluationRequest>,
) -> Response
where
    R: SiteRepository + 'static,
    F: FundSettingsStore + 'static,
{
    match service.evaluate_inputs(&request.inputs, request.fund) {
        Ok(result) => (StatusCode::OK, axum::Json(result)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn create_handler<R, F>(
    State(service): State<Arc<SitePipelineService<R, F>>>,
    axum::Json(submission): axum::Json<SiteSubmission>,
) -> Response
where
    R: SiteRepository + 'static,
    F: FundSettingsStore + 'static,
{
    match service.create(submission, Local::now().date_naive()) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record.view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_handler<R, F>(
    State(service): State<Arc<SitePipelineService<R, F>>>,
) -> Response
where
    R: SiteRepository + 'static,
    F: FundSettingsStore + 'static,
{
    match service.list() {
        Ok(records) => {
            let views: Vec<SiteView> = records.iter().map(|record| record.view()).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn site_handler<R, F>(
    State(service): State<Arc<SitePipelineService<R, F>>>,
    Path(site_id): Path<String>,
) -> Response
where
    R: SiteRepository + 'static,
    F: FundSettingsStore + 'static,
{
    match service.get(&SiteId(site_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn update_inputs_handler<R, F>(
    State(service): State<Arc<SitePipelineService<R, F>>>,
    Path(site_id): Path<String>,
    axum::Json(bag): axum::Json<serde_json::Value>,
) -> Response
where
    R: SiteRepository + 'static,
    F: FundSettingsStore + 'static,
{
    if !bag.is_object() {
        let payload = json!({ "error": "site inputs must be a JSON object" });
        return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
    }

    let inputs = SiteInputs::from_attribute_bag(bag);
    match service.update_inputs(&SiteId(site_id), inputs, Local::now().date_naive()) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn advance_handler<R, F>(
    State(service): State<Arc<SitePipelineService<R, F>>>,
    Path(site_id): Path<String>,
) -> Response
where
    R: SiteRepository + 'static,
    F: FundSettingsStore + 'static,
{
    match service.advance(&SiteId(site_id), Local::now().date_naive()) {
        Ok(record) => (StatusCode::OK, axum::Json(record.view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn site_evaluation_handler<R, F>(
    State(service): State<Arc<SitePipelineService<R, F>>>,
    Path(site_id): Path<String>,
) -> Response
where
    R: SiteRepository + 'static,
    F: FundSettingsStore + 'static,
{
    match service.evaluate_site(&SiteId(site_id)) {
        Ok(evaluation) => (StatusCode::OK, axum::Json(evaluation)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn fund_settings_handler<R, F>(
    State(service): State<Arc<SitePipelineService<R, F>>>,
) -> Response
where
    R: SiteRepository + 'static,
    F: FundSettingsStore + 'static,
{
    match service.fund_settings() {
        Ok(settings) => (StatusCode::OK, axum::Json(settings)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn replace_fund_settings_handler<R, F>(
    State(service): State<Arc<SitePipelineService<R, F>>>,
    axum::Json(settings): axum::Json<FundSettings>,
) -> Response
where
    R: SiteRepository + 'static,
    F: FundSettingsStore + 'static,
{
    match service.replace_fund_settings(settings) {
        Ok(settings) => (StatusCode::OK, axum::Json(settings)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: SiteServiceError) -> Response {
    let status = match &err {
        SiteServiceError::MissingName | SiteServiceError::FundSettings(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        SiteServiceError::StageClosed(_) => StatusCode::CONFLICT,
        SiteServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        SiteServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        SiteServiceError::Repository(RepositoryError::Unavailable(_)) => {
            error!(error = %err, "site storage unavailable");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": err.to_string() });
    (status, axum::Json(payload)).into_response()
}
