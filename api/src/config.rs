use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    /// Interface the HTTP server binds to
    pub server_address: String,
    pub server_port: u16,
    /// Shown as the tray icon tooltip
    pub application_name: String,
    /// Active profile; method logging is only enabled when one is set
    pub profile: Option<String>,
    /// Image file for the tray icon
    pub tray_icon: Option<PathBuf>,
    pub tray_enabled: bool,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| "sqlite://hostocars.db?mode=rwc".to_string()),
            server_address: lookup("SERVER_ADDRESS").unwrap_or_else(|| "127.0.0.1".to_string()),
            server_port: lookup("SERVER_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            application_name: lookup("APPLICATION_NAME")
                .unwrap_or_else(|| "Hostocars".to_string()),
            profile: lookup("APP_PROFILE").filter(|p| !p.trim().is_empty()),
            tray_icon: lookup("TRAY_ICON").map(PathBuf::from),
            tray_enabled: lookup("TRAY_ENABLED")
                .map(|v| !matches!(v.trim().to_ascii_lowercase().as_str(), "false" | "0" | "no"))
                .unwrap_or(true),
        }
    }

    /// The URL the tray's open action browses to
    pub fn application_url(&self) -> String {
        format!("http://{}:{}", self.server_address, self.server_port)
    }
}
