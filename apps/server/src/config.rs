use std::{net::SocketAddr, str::FromStr, time::Duration};

use anyhow::Context;
use rust_decimal::Decimal;

use ajo_core::constants::DEFAULT_COMMISSION_RATE;

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    /// Rate applied to businesses without a commission configuration.
    pub default_commission_rate: Decimal,
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("AJO_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid AJO_LISTEN_ADDR")?;
        let db_path = std::env::var("AJO_DB_PATH").unwrap_or_else(|_| "./db/ajo.db".into());
        let cors_allow = std::env::var("AJO_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("AJO_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let default_commission_rate = Decimal::from_str(
            &std::env::var("AJO_DEFAULT_COMMISSION_RATE")
                .unwrap_or_else(|_| DEFAULT_COMMISSION_RATE.into()),
        )
        .context("Invalid AJO_DEFAULT_COMMISSION_RATE")?;
        let log_format = std::env::var("AJO_LOG_FORMAT").unwrap_or_else(|_| "text".into());
        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            default_commission_rate,
            log_format,
        })
    }
}
