use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::{Json, Router, routing::get};
use backpack_core::{CipherKeys, UnixClock, encode, encode_request, encrypt, synthesize};
use backpack_types::{PlainRecord, to_plain_mapping};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::config::{RegionCredentials, ServerConfig};
use crate::error::AppError;
use crate::health::health_router;
use crate::upstream::UpstreamClient;

/// State for `/player-data`.
#[derive(Clone)]
pub struct PlayerDataState {
    pub cipher: Arc<CipherKeys>,
    pub clock: Arc<dyn UnixClock>,
}

/// State for `/player-info`.
#[derive(Clone)]
pub struct ProxyState {
    pub cipher: Arc<CipherKeys>,
    pub clock: Arc<dyn UnixClock>,
    pub client: UpstreamClient,
    pub credentials: Arc<RegionCredentials>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PlayerQuery {
    pub uid: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EncryptionInfo {
    pub algorithm: &'static str,
    pub key_size: u32,
    pub padding: &'static str,
}

const ENCRYPTION_INFO: EncryptionInfo = EncryptionInfo {
    algorithm: "AES-CBC",
    key_size: 128,
    padding: "PKCS7",
};

#[derive(Debug, Serialize)]
pub struct PlayerDataResponse {
    pub json_data: PlainRecord,
    pub encrypted_data: String,
    pub encryption_info: EncryptionInfo,
    pub timestamp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_region: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PlayerInfoResponse {
    pub status: &'static str,
    pub message: String,
    pub sample_data: PlainRecord,
    pub upstream: UpstreamSummary,
}

#[derive(Debug, Serialize)]
pub struct UpstreamSummary {
    pub status: u16,
    pub body_hex: String,
}

/// Build the service router. `/player-info` is only mounted when `proxy` is
/// `Some`.
pub fn router(data: PlayerDataState, proxy: Option<ProxyState>, started_at: Instant) -> Router {
    let mut app = Router::new()
        .route("/player-data", get(player_data))
        .with_state(data)
        .merge(health_router(started_at));

    if let Some(proxy) = proxy {
        app = app.merge(
            Router::new()
                .route("/player-info", get(player_info))
                .with_state(proxy),
        );
    }

    app
}

/// Build the full application from `config`: shared state plus [`router`].
pub fn app(
    config: &ServerConfig,
    clock: Arc<dyn UnixClock>,
    started_at: Instant,
) -> Result<Router, reqwest::Error> {
    let cipher = Arc::new(config.cipher.clone());

    let proxy = match &config.upstream {
        Some(upstream) => {
            info!(
                token_url = %upstream.token_url,
                upstream_path = %upstream.upstream_path,
                regions = upstream.credentials.len(),
                timeout_secs = upstream.timeout.as_secs(),
                "Upstream proxy enabled"
            );
            Some(ProxyState {
                cipher: cipher.clone(),
                clock: clock.clone(),
                client: UpstreamClient::new(upstream)?,
                credentials: Arc::new(upstream.credentials.clone()),
            })
        }
        None => {
            info!("BACKPACK_TOKEN_URL not set, /player-info disabled");
            None
        }
    };

    Ok(router(PlayerDataState { cipher, clock }, proxy, started_at))
}

/// Serves [`app`] on `0.0.0.0:{config.port}` until SIGINT/SIGTERM.
pub async fn serve(
    config: ServerConfig,
    clock: Arc<dyn UnixClock>,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let service = app(&config, clock, Instant::now())?;

    warn!("Payloads use AES-128-CBC with a static IV; identical plaintexts encrypt identically");

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "Backpack server listening");

    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Backpack server stopped");
    Ok(())
}

#[instrument(
    name = "backpack.player_data",
    skip_all,
    fields(uid = tracing::field::Empty, region = tracing::field::Empty)
)]
async fn player_data(
    State(state): State<PlayerDataState>,
    query: Result<Query<PlayerQuery>, QueryRejection>,
) -> Result<Json<PlayerDataResponse>, AppError> {
    let Query(query) = query?;
    let uid = parse_uid(query.uid.as_deref())?;
    let region = normalize_region(query.region.as_deref());

    let span = tracing::Span::current();
    span.record("uid", uid);
    if let Some(region) = &region {
        span.record("region", region.as_str());
    }

    let now = state.clock.unix_now();
    let record = synthesize(uid, now);
    let encrypted_data = encrypt(&encode(&record), &state.cipher);

    info!(bytes = encrypted_data.len() / 2, "Served player data");

    Ok(Json(PlayerDataResponse {
        json_data: to_plain_mapping(&record),
        encrypted_data,
        encryption_info: ENCRYPTION_INFO,
        timestamp: now,
        request_region: region,
    }))
}

#[instrument(
    name = "backpack.player_info",
    skip_all,
    fields(
        uid = tracing::field::Empty,
        region = tracing::field::Empty,
        correlation_id = tracing::field::Empty,
    )
)]
async fn player_info(
    State(state): State<ProxyState>,
    query: Result<Query<PlayerQuery>, QueryRejection>,
) -> Result<Json<PlayerInfoResponse>, AppError> {
    let Query(query) = query?;
    let uid = parse_uid(query.uid.as_deref())?;
    let region =
        normalize_region(query.region.as_deref()).ok_or(AppError::MissingParameter("region"))?;
    let correlation_id = Uuid::new_v4().to_string();

    let span = tracing::Span::current();
    span.record("uid", uid);
    span.record("region", region.as_str());
    span.record("correlation_id", correlation_id.as_str());

    let account = state
        .credentials
        .get(&region)
        .ok_or_else(|| AppError::UnsupportedRegion(region.clone()))?;

    let grant = state
        .client
        .fetch_token(&account.uid, &account.password)
        .await?;
    tracing::debug!(server_url = %grant.server_url, "Obtained upstream token");

    let payload = encrypt(&encode_request(uid, &region), &state.cipher);
    let reply = state
        .client
        .post_encrypted(&grant.server_url, &grant.token, &payload)
        .await?;

    info!(
        upstream_status = reply.status,
        upstream_bytes = reply.body.len(),
        "Upstream request completed"
    );

    let record = synthesize(uid, state.clock.unix_now());

    Ok(Json(PlayerInfoResponse {
        status: "success",
        message: format!("Upstream server for region {region} answered HTTP {}", reply.status),
        sample_data: to_plain_mapping(&record),
        upstream: UpstreamSummary {
            status: reply.status,
            body_hex: hex::encode(&reply.body),
        },
    }))
}

/// `None` or blank → missing; anything that is not a non-negative integer →
/// invalid.
pub fn parse_uid(raw: Option<&str>) -> Result<u64, AppError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(AppError::MissingParameter("uid"))?;
    raw.parse().map_err(|_| AppError::InvalidUid)
}

fn normalize_region(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_uppercase)
}

async fn shutdown_signal() {
    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(error) => {
                warn!(error = %error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        result = tokio::signal::ctrl_c() => match result {
            Ok(()) => info!("Received SIGINT, shutting down"),
            Err(error) => {
                warn!(error = %error, "Failed to listen for Ctrl+C");
                std::future::pending::<()>().await;
            }
        },
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
