use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySessionStore};
use crate::routes::with_wizard_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use cpa_intake::config::AppConfig;
use cpa_intake::error::AppError;
use cpa_intake::telemetry;
use cpa_intake::wizard::{WizardPages, WizardRouteState, WizardService};
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

    let sessions = Arc::new(InMemorySessionStore::new(config.session.idle_timeout));
    let wizard_state = WizardRouteState {
        service: Arc::new(WizardService::new(sessions)),
        pages: Arc::new(WizardPages::new()?),
        cookie: config.session.clone(),
    };

    let app = with_wizard_routes(wizard_state)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        cookie = %config.session.cookie_name,
        "interest form ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
