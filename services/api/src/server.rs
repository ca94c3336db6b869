use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryFundSettingsStore, InMemorySiteRepository};
use crate::routes::with_site_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use site_portal::config::AppConfig;
use site_portal::error::AppError;
use site_portal::sites::SitePipelineService;
use site_portal::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemorySiteRepository::default());
    let funds = Arc::new(InMemoryFundSettingsStore::new(config.fund.clone()));
    let site_service = Arc::new(SitePipelineService::new(repository, funds));

    let app = with_site_routes(site_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        fund_size = config.fund.fund_size,
        "site portal ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
