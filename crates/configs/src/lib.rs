use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub sms: SmsConfig,
    #[serde(default = "default_frontend_dir")]
    pub frontend_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            sms: SmsConfig::default(),
            frontend_dir: default_frontend_dir(),
        }
    }
}

fn default_frontend_dir() -> String { "frontend".into() }

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 5000, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 1 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

/// Credentials and defaults for the outbound SMS provider.
///
/// All three credential fields must be present for delivery to be enabled;
/// otherwise the server runs with notifications disabled.
#[derive(Debug, Clone, Deserialize)]
pub struct SmsConfig {
    #[serde(default)]
    pub account_sid: Option<String>,
    #[serde(default)]
    pub auth_token: Option<String>,
    #[serde(default)]
    pub from_number: Option<String>,
    #[serde(default = "default_country_code")]
    pub country_code: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_sms_timeout")]
    pub timeout_secs: u64,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            account_sid: None,
            auth_token: None,
            from_number: None,
            country_code: default_country_code(),
            api_base: default_api_base(),
            timeout_secs: default_sms_timeout(),
        }
    }
}

fn default_country_code() -> String { "+91".into() }
fn default_api_base() -> String { "https://api.twilio.com".into() }
fn default_sms_timeout() -> u64 { 10 }

/// Config file location: `CONFIG_PATH`, else `config.toml` in the working directory.
pub fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Read the config file if present (defaults otherwise), fill gaps from
    /// the environment, and validate.
    pub fn load_or_env() -> Result<Self> {
        let path = config_path();
        let mut cfg = if std::path::Path::new(&path).exists() {
            load_from_file(&path)?
        } else {
            AppConfig::default()
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize_from_env();
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        self.sms.normalize_from_env();
        self.sms.validate()?;
        if self.frontend_dir.trim().is_empty() {
            self.frontend_dir = default_frontend_dir();
        }
        Ok(())
    }
}

impl ServerConfig {
    fn normalize_from_env(&mut self) {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            self.port = port;
        }
    }

    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        if let Some(w) = self.worker_threads {
            if w == 0 { self.worker_threads = Some(4); }
        } else {
            self.worker_threads = Some(4);
        }
        Ok(())
    }
}

impl DatabaseConfig {
    /// Fill the URL from `DATABASE_URL`, or assemble a MySQL URL from the
    /// discrete `DB_HOST`/`DB_USER`/`DB_PASSWORD`/`DB_NAME` variables.
    pub fn normalize_from_env(&mut self) {
        if !self.url.trim().is_empty() {
            return;
        }
        if let Ok(url) = std::env::var("DATABASE_URL") {
            self.url = url;
            return;
        }
        let host = std::env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string());
        let user = std::env::var("DB_USER").unwrap_or_else(|_| "root".to_string());
        let password = std::env::var("DB_PASSWORD").unwrap_or_default();
        let name = std::env::var("DB_NAME").unwrap_or_else(|_| "disaster_db".to_string());
        self.url = mysql_url(&host, &user, &password, &name);
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        let supported = ["mysql://", "postgres://", "postgresql://", "sqlite:"];
        if !supported.iter().any(|scheme| lower.starts_with(scheme)) {
            return Err(anyhow!("database.url must start with mysql://, postgres:// or sqlite:"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

// Userinfo must not carry URL delimiters; everything outside unreserved is escaped
const USERINFO: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

fn mysql_url(host: &str, user: &str, password: &str, name: &str) -> String {
    let user = utf8_percent_encode(user, USERINFO);
    if password.is_empty() {
        format!("mysql://{user}@{host}/{name}")
    } else {
        let password = utf8_percent_encode(password, USERINFO);
        format!("mysql://{user}:{password}@{host}/{name}")
    }
}

impl SmsConfig {
    pub fn normalize_from_env(&mut self) {
        fn fill(slot: &mut Option<String>, var: &str) {
            if slot.as_deref().map_or(true, |s| s.trim().is_empty()) {
                *slot = std::env::var(var).ok().filter(|v| !v.trim().is_empty());
            }
        }
        fill(&mut self.account_sid, "TWILIO_ACCOUNT_SID");
        fill(&mut self.auth_token, "TWILIO_AUTH_TOKEN");
        fill(&mut self.from_number, "TWILIO_PHONE_NUMBER");
        if let Ok(code) = std::env::var("SMS_COUNTRY_CODE") {
            if !code.trim().is_empty() {
                self.country_code = code;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.country_code.starts_with('+') {
            return Err(anyhow!("sms.country_code must start with '+'"));
        }
        if self.timeout_secs == 0 {
            return Err(anyhow!("sms.timeout_secs must be positive"));
        }
        Ok(())
    }

    /// True when every credential needed to reach the provider is present.
    pub fn is_enabled(&self) -> bool {
        self.account_sid.is_some() && self.auth_token.is_some() && self.from_number.is_some()
    }
}
