use std::net::SocketAddr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Simulated handshake latency before the extract phase, in milliseconds.
    pub connect_delay_ms: u64,
    /// Simulated per-job extraction latency, in milliseconds.
    pub extract_delay_ms: u64,
    /// How long a transient Completed/Failed status stays visible, in milliseconds.
    pub status_linger_ms: u64,
    /// Key for the generative-text classifier; sentiment analysis is disabled
    /// when unset.
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub sentiment_timeout_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("connect_delay_ms", &self.connect_delay_ms)
            .field("extract_delay_ms", &self.extract_delay_ms)
            .field("status_linger_ms", &self.status_linger_ms)
            .field(
                "gemini_api_key",
                &self.gemini_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("gemini_model", &self.gemini_model)
            .field("sentiment_timeout_secs", &self.sentiment_timeout_secs)
            .finish()
    }
}
