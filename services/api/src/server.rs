use crate::cli::ServeArgs;
use crate::infra::{gateway_from_config, AppState, InMemoryContactInbox};
use crate::routes::with_site_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use driving_school::config::AppConfig;
use driving_school::error::AppError;
use driving_school::registration::{CourseCatalog, RegistrationFormProcessor};
use driving_school::site::{ContactDesk, SchoolProfile};
use driving_school::telemetry;
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

    let gateway = Arc::new(gateway_from_config(&config.payments));
    let processor = Arc::new(RegistrationFormProcessor::new(
        Arc::new(CourseCatalog::standard()),
        gateway,
    ));
    let desk = Arc::new(ContactDesk::new(Arc::new(InMemoryContactInbox::default())));
    let profile = Arc::new(SchoolProfile::standard());

    let app = with_site_routes(processor, desk, profile)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        payment_delay_ms = config.payments.delay.as_millis() as u64,
        simulate_decline = config.payments.simulate_decline,
        "registration service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
