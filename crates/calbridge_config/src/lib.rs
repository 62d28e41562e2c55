use config::{Config, Environment, File, Map};
use once_cell::sync::OnceCell;
use std::env;
use thiserror::Error;
use tracing::warn;

pub mod models;
pub use models::*;

/// Prefix for structured overrides, e.g. `CALBRIDGE__SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "CALBRIDGE";

/// Flat variable names the service has always read; they win over files and prefixed vars.
const LEGACY_ENV_VARS: [(&str, &str); 3] = [
    ("cal.api_key", "CAL_API_KEY"),
    ("cal.event_type_id", "CAL_EVENT_TYPE_ID"),
    ("mcp.secret", "MCP_SECRET"),
];

#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("{0} is not set")]
    Missing(&'static str),
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Loads the dotenv file into the process environment, once.
///
/// The path is taken from `DOTENV_OVERRIDE`, then from a first command line
/// argument starting with `.env`, and falls back to `.env`. Returns the path used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

/// Loads the configuration from files and the process environment.
pub fn load_config() -> Result<AppConfig, ConfigurationError> {
    ensure_dotenv_loaded();
    load_config_from_env(env::vars().collect())
}

/// Loads the configuration against an explicit environment map.
///
/// Sources, lowest precedence first: struct defaults, `<CONFIG_DIR>/default`,
/// `<CONFIG_DIR>/<RUN_ENV>`, `CALBRIDGE__*` variables, then the flat
/// `CAL_API_KEY`, `CAL_EVENT_TYPE_ID` and `MCP_SECRET` variables.
pub fn load_config_from_env(vars: Map<String, String>) -> Result<AppConfig, ConfigurationError> {
    let run_env = vars
        .get("RUN_ENV")
        .cloned()
        .unwrap_or_else(|| "debug".to_string());
    let config_dir = vars
        .get("CONFIG_DIR")
        .cloned()
        .unwrap_or_else(|| "config".to_string());

    let mut builder = Config::builder()
        .add_source(File::with_name(&format!("{config_dir}/default")).required(false))
        .add_source(File::with_name(&format!("{config_dir}/{run_env}")).required(false))
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .source(Some(vars.clone())),
        );

    for (key, var) in LEGACY_ENV_VARS {
        if let Some(value) = vars.get(var).filter(|v| !v.trim().is_empty()) {
            builder = builder.set_override(key, value.trim())?;
        }
    }

    Ok(builder.build()?.try_deserialize()?)
}

impl AppConfig {
    /// Returns the Cal.com credentials, warning about each one that is missing.
    pub fn booking_credentials(&self) -> Result<BookingCredentials, ConfigurationError> {
        let api_key = self
            .cal
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty());

        if api_key.is_none() {
            warn!("CAL_API_KEY not found in environment variables!");
        }
        if self.cal.event_type_id.is_none() {
            warn!("CAL_EVENT_TYPE_ID not found in environment variables!");
        }

        match (api_key, self.cal.event_type_id) {
            (Some(api_key), Some(event_type_id)) => Ok(BookingCredentials {
                api_key,
                event_type_id,
            }),
            (None, _) => Err(ConfigurationError::Missing("CAL_API_KEY")),
            (_, None) => Err(ConfigurationError::Missing("CAL_EVENT_TYPE_ID")),
        }
    }
}
