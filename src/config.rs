//! CLI arguments and server configuration defaults.

use clap::{Parser, ValueEnum};
use shadow_rs::formatcp;

use crate::build;

const VERSION_INFO: &str = formatcp!(
    r#"{}\ncommit_hash: {}\nbuild_time: {}\nbuild_env: {},{}"#,
    build::PKG_VERSION,
    build::SHORT_COMMIT,
    build::BUILD_TIME,
    build::RUST_VERSION,
    build::RUST_CHANNEL
);

pub const DEFAULT_HTTP_PORT: u16 = 9711;
pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_MOCK_CONFIRM_AFTER: u32 = 1;
pub const SHUTDOWN_GRACE_SECS: u64 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ProviderKind {
    /// Built-in sample data, no network access.
    Mock,
    /// JSON gateway reachable at `--gateway-url`.
    Gateway,
}

/// CLI arguments and environment configuration for the server.
#[derive(Parser, Debug)]
#[command(name = "pan-proxy", version = VERSION_INFO, about = "Cloud drive proxy server")]
pub struct Args {
    #[arg(
        short = 'b',
        long,
        env = "PAN_BIND",
        default_value = "0.0.0.0",
        help = "Bind address for HTTP"
    )]
    pub host: String,
    #[arg(
        short = 'p',
        long,
        env = "PAN_HTTP_PORT",
        default_value_t = DEFAULT_HTTP_PORT,
        help = "HTTP port"
    )]
    pub http_port: u16,
    #[arg(long, env = "PAN_CORS_ORIGINS", help = "Comma separated CORS origins")]
    pub cors_origins: Option<String>,
    #[arg(
        long,
        env = "PAN_PROVIDER",
        value_enum,
        default_value_t = ProviderKind::Mock,
        help = "Storage provider backend"
    )]
    pub provider: ProviderKind,
    #[arg(
        long,
        env = "PAN_GATEWAY_URL",
        required_if_eq("provider", "gateway"),
        help = "Base URL of the provider gateway"
    )]
    pub gateway_url: Option<String>,
    #[arg(
        long,
        env = "PAN_PROVIDER_TIMEOUT_SECS",
        default_value_t = DEFAULT_PROVIDER_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Timeout for a single provider call in seconds (at least 1)"
    )]
    pub provider_timeout_secs: u64,
    #[arg(
        long,
        env = "PAN_DEMO_MODE",
        help = "Serve sample listings while logged out"
    )]
    pub demo_mode: bool,
    #[arg(
        long,
        env = "PAN_MOCK_CONFIRM_AFTER",
        default_value_t = DEFAULT_MOCK_CONFIRM_AFTER,
        help = "Polls before the mock provider confirms a QR login"
    )]
    pub mock_confirm_after: u32,
}
