use crate::error::{SousError, SousResult};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_APP_NAME: &str = "Recipe AI Service";
const DEFAULT_MODEL_URL: &str = "https://api.openrouter.com/v1";
const DEFAULT_ALLOWED_ORIGINS: [&str; 2] = [
    "http://localhost:5001",
    "https://family-site.pythonanywhere.com",
];
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_INFERENCE_TIMEOUT_SECS: u64 = 30;

/// Deployment mode of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Local development.
    #[default]
    Development,
    /// Pre-production.
    Staging,
    /// Production.
    Production,
    /// Automated tests.
    Test,
}

impl Environment {
    /// Lowercase name as accepted in `ENVIRONMENT`.
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
            Environment::Test => "test",
        }
    }

    /// True for [`Environment::Production`].
    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

impl FromStr for Environment {
    type Err = SousError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            "test" => Ok(Environment::Test),
            other => Err(SousError::Config(format!(
                "ENVIRONMENT must be one of development, staging, production, test (got '{other}')"
            ))),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for the external inference provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSettings {
    /// Provider endpoint.
    pub base_url: String,
    /// Model identifier sent to the provider.
    pub model_id: String,
    /// Site URL reported to the provider.
    pub site_url: String,
    /// Application name reported to the provider.
    pub app_name: String,
    /// Upper bound on a single inference call.
    pub timeout: Duration,
}

/// Process-wide configuration. Built once at startup and shared read-only.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    /// Human-readable service name.
    pub app_name: String,
    /// Key clients must present in `X-API-Key`; also the provider credential.
    pub api_key: String,
    /// Inference provider parameters.
    pub model: ModelSettings,
    /// Deployment mode.
    pub environment: Environment,
    /// Origins allowed by CORS. `*` allows any origin.
    pub allowed_origins: Vec<String>,
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("app_name", &self.app_name)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("environment", &self.environment)
            .field("allowed_origins", &self.allowed_origins)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

impl Settings {
    /// Loads settings from the process environment.
    pub fn from_env() -> SousResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads settings from an arbitrary key lookup.
    ///
    /// Every missing required variable is reported in a single error.
    pub fn from_lookup<F>(lookup: F) -> SousResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut missing = Vec::new();
        let mut required = |key: &'static str| {
            get(key).unwrap_or_else(|| {
                missing.push(key);
                String::new()
            })
        };
        let api_key = required("OPENROUTER_API_KEY");
        let model_id = required("OPENROUTER_MODEL");
        let site_url = required("OPENROUTER_SITE_URL");
        let model_app_name = required("OPENROUTER_APP_NAME");
        if !missing.is_empty() {
            return Err(SousError::Config(format!(
                "missing required environment variable(s): {}",
                missing.join(", ")
            )));
        }

        let timeout_secs = match get("INFERENCE_TIMEOUT_SECS") {
            Some(raw) => parse_number::<u64>("INFERENCE_TIMEOUT_SECS", &raw)?,
            None => DEFAULT_INFERENCE_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            return Err(SousError::Config(
                "INFERENCE_TIMEOUT_SECS must be greater than zero".into(),
            ));
        }

        let port = match get("PORT") {
            Some(raw) => parse_number::<u16>("PORT", &raw)?,
            None => DEFAULT_PORT,
        };

        let environment = match get("ENVIRONMENT") {
            Some(raw) => raw.parse()?,
            None => Environment::default(),
        };

        let allowed_origins = match get("ALLOWED_ORIGINS") {
            Some(raw) => parse_origins(&raw)?,
            None => DEFAULT_ALLOWED_ORIGINS
                .iter()
                .map(|o| (*o).to_string())
                .collect(),
        };

        Ok(Self {
            app_name: get("APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            api_key,
            model: ModelSettings {
                base_url: get("OPENROUTER_URL").unwrap_or_else(|| DEFAULT_MODEL_URL.to_string()),
                model_id,
                site_url,
                app_name: model_app_name,
                timeout: Duration::from_secs(timeout_secs),
            },
            environment,
            allowed_origins,
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
        })
    }

    /// `host:port` string suitable for binding.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_number<T: FromStr>(key: &str, raw: &str) -> SousResult<T> {
    raw.trim()
        .parse()
        .map_err(|_| SousError::Config(format!("{key} must be a valid number (got '{raw}')")))
}

/// Accepts a JSON array (`["a","b"]`) or a comma-separated list.
fn parse_origins(raw: &str) -> SousResult<Vec<String>> {
    let trimmed = raw.trim();
    let origins: Vec<String> = if trimmed.starts_with('[') {
        serde_json::from_str(trimmed)
            .map_err(|e| SousError::Config(format!("ALLOWED_ORIGINS is not a JSON list: {e}")))?
    } else {
        trimmed
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(String::from)
            .collect()
    };
    Ok(origins)
}
