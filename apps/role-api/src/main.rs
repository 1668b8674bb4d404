use axum::http::{header, HeaderName, HeaderValue, Method, StatusCode};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use role_lib::role_service::RoleService;
use role_lib::util::connect_with_retry;

use role_api::auth::AuthConfig;
use role_api::build_router;
use role_api::config::MiddlewareConfig;
use role_api::constants::{DATABASE_URL, DEFAULT_PORT, ENV, LOCAL_ENV, ROLE_API_PORT, SERVICE};
use role_api::shutdown::shutdown_signal;
use role_api::state::AppState;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Setup tracing subscriber
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let env = std::env::var(ENV)
        .map_err(|_| format!("{} environment variable must be set", ENV))?;

    let registry = tracing_subscriber::registry().with(filter);

    let json_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true);

    if env == LOCAL_ENV {
        let pretty_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .pretty();
        registry.with(json_layer).with(pretty_layer).init();
    } else {
        registry.with(json_layer).init();
    }

    tracing::info!(service = SERVICE, env = %env, "tracing initialized");

    let middleware_config = MiddlewareConfig::from_env();
    tracing::info!(
        rate_limit_per_minute = middleware_config.rate_limit_per_minute,
        rate_limit_burst = middleware_config.rate_limit_burst,
        request_timeout_secs = middleware_config.request_timeout.as_secs(),
        max_body_size = middleware_config.max_body_size,
        cors_origins = ?middleware_config.cors_allowed_origins,
        "middleware configuration loaded"
    );

    let auth_config = AuthConfig::from_env()?;
    tracing::info!(token_ttl_secs = auth_config.token_ttl_secs, "authentication configured");

    // Setup database pool
    let database_url = std::env::var(DATABASE_URL)
        .map_err(|_| format!("{} environment variable must be set", DATABASE_URL))?;

    let pool = connect_with_retry(&database_url, 10).await?;

    let app_state = AppState::new(RoleService::new(pool), auth_config, env.clone());

    let mut app = build_router(app_state);

    // ============================================
    // Middleware stack (applied inner to outer)
    // Order: Request → Rate Limit → Timeout → CORS → Body Limit → Request ID → Trace → Handler
    // ============================================

    app = app.layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(tracing::Level::DEBUG))
            .on_response(DefaultOnResponse::new().level(tracing::Level::DEBUG)),
    );

    let x_request_id = HeaderName::from_static("x-request-id");
    app = app
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid));

    app = app.layer(RequestBodyLimitLayer::new(middleware_config.max_body_size));

    let methods = [Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS];
    let headers = [header::CONTENT_TYPE, header::AUTHORIZATION, x_request_id];
    let cors_layer = if middleware_config.allows_any_origin() {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = middleware_config
            .cors_allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new().allow_origin(origins)
    };
    app = app.layer(cors_layer.allow_methods(methods).allow_headers(headers));

    // Returns 408 Request Timeout
    app = app.layer(TimeoutLayer::with_status_code(
        StatusCode::REQUEST_TIMEOUT,
        middleware_config.request_timeout,
    ));

    // Rate limiting (outermost)
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(middleware_config.replenish_interval_ms())
            .burst_size(middleware_config.rate_limit_burst)
            .finish()
            .ok_or("failed to build rate limiter configuration")?,
    );
    app = app.layer(GovernorLayer {
        config: governor_conf,
    });

    let port: u16 = std::env::var(ROLE_API_PORT)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_PORT);

    let addr = format!("0.0.0.0:{}", port);
    let public_url = format!("http://127.0.0.1:{}", port);

    let listener = TcpListener::bind(&addr).await
        .map_err(|e| format!("Failed to bind to {}: {}", addr, e))?;

    tracing::info!("role-api is ready to accept requests at: {}", public_url);
    tracing::info!("API v1 endpoints available at: {}/v1", public_url);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(middleware_config.shutdown_timeout))
    .await
    .map_err(|e| format!("Server error: {}", e))?;

    Ok(())
}
