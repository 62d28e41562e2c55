// --- File: crates/calbridge_config/src/models.rs ---

use serde::{Deserialize, Serialize};

pub const DEFAULT_BOOKINGS_URL: &str = "https://api.cal.com/v2/bookings";
pub const DEFAULT_API_VERSION: &str = "2024-08-13";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MCP_TIMEZONE: &str = "Europe/Amsterdam";

// --- General Server Config ---
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
        }
    }
}

// --- Cal.com Config ---
// The key and event type come from CAL_API_KEY / CAL_EVENT_TYPE_ID.
#[derive(Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct CalConfig {
    pub api_key: Option<String>,
    pub event_type_id: Option<i64>,
    pub bookings_url: String,
    pub api_version: String,
    /// Upper bound for a single booking call.
    pub timeout_secs: u64,
}

impl Default for CalConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            event_type_id: None,
            bookings_url: DEFAULT_BOOKINGS_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

// Keeps the API key out of debug logs.
impl std::fmt::Debug for CalConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("event_type_id", &self.event_type_id)
            .field("bookings_url", &self.bookings_url)
            .field("api_version", &self.api_version)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

// --- MCP tool endpoint Config ---
#[derive(Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct McpConfig {
    /// Shared secret for the X-MCP-SECRET header (MCP_SECRET). Loaded but not enforced.
    pub secret: Option<String>,
    /// Timezone assumed by the MCP tool endpoint when the caller sends none.
    pub default_timezone: String,
}

impl Default for McpConfig {
    fn default() -> Self {
        Self {
            secret: None,
            default_timezone: DEFAULT_MCP_TIMEZONE.to_string(),
        }
    }
}

impl std::fmt::Debug for McpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("McpConfig")
            .field("secret", &self.secret.as_ref().map(|_| "***"))
            .field("default_timezone", &self.default_timezone)
            .finish()
    }
}

// --- Unified App Configuration ---
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub cal: CalConfig,
    pub mcp: McpConfig,
}

/// The two values a booking cannot be made without.
#[derive(Debug, Clone)]
pub struct BookingCredentials {
    pub api_key: String,
    pub event_type_id: i64,
}
