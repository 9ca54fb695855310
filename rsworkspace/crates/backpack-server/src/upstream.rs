//! Client for the token service and the upstream game server.
//!
//! Two calls, never retried:
//! 1. `GET {token_url}?uid=..&password=..` → `{"token": "...", "serverUrl": "..."}`
//! 2. `POST {serverUrl}{upstream_path}` with the raw ciphertext bytes and
//!    the headers a mobile game client sends.

use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::Deserialize;
use thiserror::Error;

use crate::config::UpstreamConfig;

const CLIENT_USER_AGENT: &str = "Dalvik/2.1.0 (Linux; U; Android 9; ASUS_Z01QD Build/PI)";
const UNITY_VERSION: &str = "2018.4.11f1";
const GA_HEADER: &str = "v1 1";
const PAYLOAD_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Token service failures. Surfaced to callers as HTTP 500.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token service unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("token service answered HTTP {status}")]
    Rejected { status: u16 },

    #[error("token service response is invalid: {0}")]
    InvalidResponse(String),
}

/// Game server failures. Surfaced to callers as HTTP 502.
#[derive(Debug, Error)]
pub enum ForwardError {
    #[error("payload is not valid hex: {0}")]
    InvalidPayload(#[from] hex::FromHexError),

    #[error("game server unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("game server answered HTTP {status}")]
    Status { status: u16 },
}

/// A bearer token plus the game server it is valid for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenGrant {
    pub token: String,
    pub server_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: Vec<u8>,
}

#[derive(Deserialize)]
struct TokenResponse {
    #[serde(default)]
    token: Option<String>,
    #[serde(default, alias = "serverUrl")]
    server_url: Option<String>,
}

#[derive(Clone)]
pub struct UpstreamClient {
    http: Client,
    token_url: String,
    upstream_path: String,
    release_version: String,
}

impl UpstreamClient {
    /// Every request made through this client is bounded by `config.timeout`.
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            token_url: config.token_url.clone(),
            upstream_path: config.upstream_path.clone(),
            release_version: config.release_version.clone(),
        })
    }

    pub async fn fetch_token(&self, uid: &str, password: &str) -> Result<TokenGrant, TokenError> {
        let resp = self
            .http
            .get(&self.token_url)
            .query(&[("uid", uid), ("password", password)])
            .send()
            .await
            .map_err(TokenError::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TokenError::Rejected {
                status: status.as_u16(),
            });
        }

        let body: TokenResponse = resp
            .json()
            .await
            .map_err(|e| TokenError::InvalidResponse(e.to_string()))?;

        let token = body
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| TokenError::InvalidResponse("missing token".to_string()))?;
        let server_url = body
            .server_url
            .filter(|u| !u.is_empty())
            .ok_or_else(|| TokenError::InvalidResponse("missing serverUrl".to_string()))?;

        Ok(TokenGrant { token, server_url })
    }

    pub async fn post_encrypted(
        &self,
        server_url: &str,
        token: &str,
        hex_payload: &str,
    ) -> Result<UpstreamReply, ForwardError> {
        let body = hex::decode(hex_payload)?;
        let url = format!("{}{}", server_url.trim_end_matches('/'), self.upstream_path);

        let resp = self
            .http
            .post(&url)
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .header(CONTENT_TYPE, PAYLOAD_CONTENT_TYPE)
            .header("X-Unity-Version", UNITY_VERSION)
            .header("X-GA", GA_HEADER)
            .header("ReleaseVersion", &self.release_version)
            .body(body)
            .send()
            .await
            .map_err(ForwardError::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ForwardError::Status {
                status: status.as_u16(),
            });
        }

        let body = resp.bytes().await.map_err(ForwardError::Transport)?;

        Ok(UpstreamReply {
            status: status.as_u16(),
            body: body.to_vec(),
        })
    }
}
