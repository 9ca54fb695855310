//! # backpack-server
//!
//! HTTP service that synthesizes a player's backpack from their uid and
//! returns it both as JSON and as an AES-128-CBC encrypted protobuf blob.
//!
//! ## Endpoints
//!
//! - `GET /player-data?uid=..&region=..` returns the plain projection, the
//!   hex ciphertext of the encoded record and the encryption parameters.
//! - `GET /player-info?uid=..&region=..` obtains a bearer token for the
//!   region's service account, posts an encrypted backpack request to the
//!   game server it names, and reports the reply alongside a sample record.
//!   Only mounted when `BACKPACK_TOKEN_URL` is set.
//! - `GET /health` reports liveness and uptime.
//!
//! Errors are returned as `{"error": "..."}` with status 400 (bad input),
//! 500 (token service failure) or 502 (game server failure).
//!
//! ## Configuration (env vars)
//!
//! | Variable | Default | Description |
//! |---|---|---|
//! | `BACKPACK_CIPHER_KEY` | required | AES key; first 16 bytes are used |
//! | `BACKPACK_CIPHER_IV` | required | AES IV; first 16 bytes are used |
//! | `BACKPACK_PORT` | `5000` | HTTP listening port (`--port` overrides) |
//! | `BACKPACK_TOKEN_URL` | unset | Token service URL; enables `/player-info` |
//! | `BACKPACK_REGION_CREDENTIALS` | empty | `REGION=uid:password` pairs, comma separated |
//! | `BACKPACK_UPSTREAM_PATH` | `/GetBackpack` | Path appended to the game server URL |
//! | `BACKPACK_RELEASE_VERSION` | `OB50` | `ReleaseVersion` header sent upstream |
//! | `BACKPACK_UPSTREAM_TIMEOUT_SECS` | `10` | Per-request upstream timeout (minimum 1) |
//! | `RUST_LOG` | `info` | Log filter |

pub mod config;
pub mod env;
pub mod error;
pub mod health;
pub mod server;
pub mod upstream;

pub use config::{Args, ConfigError, RegionCredentials, ServerConfig, UpstreamConfig};
pub use error::AppError;
pub use server::{PlayerDataState, ProxyState, app, router, serve};
