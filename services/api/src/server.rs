use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryKpiRepository, InMemoryPipelineRepository, OutreachDesk};
use crate::routes::with_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use dealcommand::config::AppConfig;
use dealcommand::error::AppError;
use dealcommand::telemetry;
use dealcommand::workflows::pipeline::PipelineService;
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

    let pipeline_service = Arc::new(PipelineService::new(
        Arc::new(InMemoryPipelineRepository::default()),
        Arc::new(InMemoryKpiRepository::default()),
    ));
    let outreach_desk = Arc::new(OutreachDesk::new(config.outreach.sender_name.clone()));

    let app = with_routes(pipeline_service, outreach_desk)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "deal command service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
