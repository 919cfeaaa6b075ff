use std::time::Duration;

pub struct Config {
    pub log_format: String,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let log_format =
            std::env::var("PORTFOLIO_EXPORT_LOG_FORMAT").unwrap_or_else(|_| "text".into());
        let timeout_ms: u64 = std::env::var("PORTFOLIO_EXPORT_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        Self {
            log_format,
            request_timeout: Duration::from_millis(timeout_ms),
        }
    }
}
