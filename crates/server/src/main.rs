//! AaharSetu server entry point.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use aaharsetu_api::{AppState, SessionCookie, app};
use aaharsetu_common::{Config, config::RedisConfig};
use aaharsetu_core::{
    CertificateService, DonationRequestService, DonationService, HttpCertificateGenerator,
    HttpDonationScorer, MemorySessionStore, RecommendationService, RedisSessionStore,
    RegistrationService, SessionService, SessionStore, UserService,
};
use aaharsetu_db::repositories::{
    DonationRepository, DonationRequestRepository, NgoProfileRepository, UserRepository,
    VolunteerProfileRepository,
};
use anyhow::Context;
use axum::http::{HeaderValue, Method, header};
use fred::prelude::*;
use tokio::signal;
use tower_http::{
    cors::CorsLayer, limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

/// Session store backed by Redis when configured, process memory otherwise.
async fn session_store(redis: Option<&RedisConfig>) -> anyhow::Result<Arc<dyn SessionStore>> {
    let Some(redis) = redis else {
        warn!("No Redis configured; sessions are kept in memory and lost on restart");
        return Ok(Arc::new(MemorySessionStore::new()));
    };

    info!("Connecting to Redis...");
    let fred_config =
        fred::types::config::Config::from_url(&redis.url).context("Invalid Redis URL")?;
    let client = fred::clients::Client::new(fred_config, None, None, None);
    client.connect();
    client
        .wait_for_connect()
        .await
        .context("Failed to connect to Redis")?;
    info!("Connected to Redis session store");

    Ok(Arc::new(RedisSessionStore::new(
        Arc::new(client),
        redis.prefix.clone(),
    )))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "aaharsetu=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting AaharSetu server...");

    let config = Config::load().context("Failed to load configuration")?;

    let db = aaharsetu_db::init(&config).await?;
    info!("Connected to database");

    info!("Running database migrations...");
    aaharsetu_db::migrate(&db).await?;
    info!("Migrations completed");

    let store = session_store(config.redis.as_ref()).await?;

    // Initialize repositories
    let db = Arc::new(db);
    let user_repo = UserRepository::new(Arc::clone(&db));
    let donation_repo = DonationRepository::new(Arc::clone(&db));
    let request_repo = DonationRequestRepository::new(Arc::clone(&db));
    let ngo_repo = NgoProfileRepository::new(Arc::clone(&db));
    let volunteer_repo = VolunteerProfileRepository::new(Arc::clone(&db));

    // Outbound collaborators
    let outbound_timeout = Duration::from_secs(config.services.timeout_secs);
    let scorer = HttpDonationScorer::new(config.services.scorer_url.clone(), outbound_timeout)?;
    let certificates =
        HttpCertificateGenerator::new(config.services.certificate_url.clone(), outbound_timeout)?;

    let state = AppState {
        user_service: UserService::new(user_repo.clone()),
        session_service: SessionService::new(
            store,
            user_repo.clone(),
            config.session.ttl_secs(),
        ),
        donation_service: DonationService::new(donation_repo, user_repo),
        request_service: DonationRequestService::new(request_repo),
        registration_service: RegistrationService::new(ngo_repo, volunteer_repo),
        recommendation_service: RecommendationService::new(Arc::new(scorer)),
        certificate_service: CertificateService::new(Arc::new(certificates)),
        session_cookie: SessionCookie {
            name: config.session.cookie_name.clone(),
            secure: config.session.secure_cookie,
            max_age_secs: config.session.ttl_secs(),
        },
    };

    let app = app(state)
        .layer(RequestBodyLimitLayer::new(config.server.body_limit_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.server.cors_origins));

    // Start server with graceful shutdown
    let ip = config
        .server
        .host
        .parse::<std::net::IpAddr>()
        .context("Invalid server host")?;
    let addr = SocketAddr::from((ip, config.server.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
