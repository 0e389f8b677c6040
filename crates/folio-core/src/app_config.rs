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

/// Runtime configuration for the service, loaded from environment variables.
///
/// `cms_url` is stored with any trailing slash stripped so it can be used
/// directly as the origin prefix for relative asset URLs.
#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub cms_url: String,
    pub cms_timeout_secs: u64,
    pub snapshot_ttl_secs: u64,
    pub contact_rate_limit: usize,
    pub contact_rate_window_secs: u64,
    pub resend_api_key: Option<String>,
    pub resend_from_email: String,
    pub revalidate_secret: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("cms_url", &self.cms_url)
            .field("cms_timeout_secs", &self.cms_timeout_secs)
            .field("snapshot_ttl_secs", &self.snapshot_ttl_secs)
            .field("contact_rate_limit", &self.contact_rate_limit)
            .field(
                "contact_rate_window_secs",
                &self.contact_rate_window_secs,
            )
            .field(
                "resend_api_key",
                &self.resend_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("resend_from_email", &self.resend_from_email)
            .field(
                "revalidate_secret",
                &self.revalidate_secret.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}
