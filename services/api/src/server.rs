use crate::cli::ServeArgs;
use crate::infra::{build_stores, AppState, SeedData};
use crate::routes::with_service_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use jobster::applications::{ApplicationServices, InMemoryStores};
use jobster::config::AppConfig;
use jobster::error::AppError;
use jobster::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let memory = InMemoryStores::default();
    if let Some(path) = args.seed.take() {
        SeedData::from_path(&path)?.apply(&memory)?;
    }
    let stores = build_stores(&memory, &config.storage)?;
    let services = Arc::new(ApplicationServices::new(stores, config.applications));

    let app = with_service_routes(services)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, page_size = config.applications.page_size, "application lifecycle service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
