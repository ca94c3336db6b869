use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use site_portal::sites::{site_router, FundSettingsStore, SitePipelineService, SiteRepository};
use std::sync::Arc;

pub(crate) fn with_site_routes<R, F>(service: Arc<SitePipelineService<R, F>>) -> axum::Router
where
    R: SiteRepository + 'static,
    F: FundSettingsStore + 'static,
{
    site_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{InMemoryFundSettingsStore, InMemorySiteRepository};
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use site_portal::evaluation::FundSettings;
    use std::sync::atomic::AtomicBool;
    use tower::ServiceExt;

    fn app(ready: bool) -> axum::Router {
        let repository = Arc::new(InMemorySiteRepository::default());
        let funds = Arc::new(InMemoryFundSettingsStore::new(FundSettings::default()));
        let service = Arc::new(SitePipelineService::new(repository, funds));
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        with_site_routes(service).layer(Extension(state))
    }

    async fn status_of(app: axum::Router, method: &str, uri: &str, body: Body) -> StatusCode {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)
            .expect("request builds");
        app.oneshot(request).await.expect("router responds").status()
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn readiness_tracks_flag() {
        assert_eq!(
            status_of(app(false), "GET", "/ready", Body::empty()).await,
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            status_of(app(true), "GET", "/ready", Body::empty()).await,
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn metrics_endpoint_renders_text() {
        assert_eq!(
            status_of(app(true), "GET", "/metrics", Body::empty()).await,
            StatusCode::OK
        );
    }

    #[tokio::test]
    async fn site_routes_are_mounted() {
        let created = status_of(
            app(true),
            "POST",
            "/api/v1/sites",
            Body::from(r#"{"name":"Okmulgee Compressor Yard"}"#),
        )
        .await;
        assert_eq!(created, StatusCode::CREATED);

        let evaluated = status_of(
            app(true),
            "POST",
            "/api/v1/evaluations",
            Body::from(r#"{"inputs":{"gasVolume":"14400","gasPressure":600}}"#),
        )
        .await;
        assert_eq!(evaluated, StatusCode::OK);
    }
}
