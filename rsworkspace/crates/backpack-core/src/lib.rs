//! # backpack-core
//!
//! The synthesize → encode → encrypt pipeline behind the backpack service.
//!
//! ```text
//! identifier ──synthesize──▶ PlayerRecord ──encode──▶ protobuf bytes ──encrypt──▶ hex
//!                                 │
//!                                 └──to_plain_mapping──▶ JSON view
//! ```
//!
//! Everything here is pure apart from [`clock::SystemClock`]; callers read
//! the clock once and pass the reading to [`synthesize`].

pub mod cipher;
pub mod clock;
pub mod codec;
pub mod error;
pub mod schema;
pub mod synth;

pub use cipher::{CipherKeys, decrypt, encrypt};
pub use clock::{SystemClock, UnixClock};
pub use codec::{decode, encode, encode_request};
pub use error::{CipherError, EncodingError};
pub use synth::synthesize;

#[cfg(any(test, feature = "test-support"))]
pub use clock::FixedClock;
