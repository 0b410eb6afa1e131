use crate::cli::ServeArgs;
use crate::infra::{demo_store, eligibility_config, AppState};
use crate::routes::with_compliance_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use chrono::Local;
use fieldforce::config::AppConfig;
use fieldforce::error::AppError;
use fieldforce::telemetry;
use fieldforce::workflows::eligibility::EligibilityService;
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

    // Reference deployment backed by the seeded in-memory store; a SQL-backed
    // ComplianceStore slots in here without touching the routes.
    let store = Arc::new(demo_store(Local::now().date_naive()));
    let service = Arc::new(EligibilityService::new(
        store,
        eligibility_config(&config.eligibility),
    ));

    let app = with_compliance_routes(service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "compliance service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
