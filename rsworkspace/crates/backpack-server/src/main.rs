use std::sync::Arc;

use backpack_core::SystemClock;
use backpack_server::env::SystemEnv;
use backpack_server::{Args, ServerConfig, serve};
use clap::Parser;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = ServerConfig::from_args(args, &SystemEnv).expect("Invalid configuration");

    serve(config, Arc::new(SystemClock)).await.expect("Server failed");
}
