use serde::Deserialize;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Bearer token settings
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 secret; a random one is generated when unset
    #[serde(default)]
    pub jwt_secret: Option<String>,
    #[serde(default = "default_expiration_hours")]
    pub expiration_hours: u64,
    /// Written to issued tokens and required on verification
    #[serde(default = "default_issuer")]
    pub issuer: String,
}

/// Registry data loaded at startup
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedConfig {
    /// Path to a TOML seed file
    #[serde(default)]
    pub path: Option<String>,
}

fn default_expiration_hours() -> u64 {
    24
}

fn default_issuer() -> String {
    "registry-comments".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            expiration_hours: default_expiration_hours(),
            issuer: default_issuer(),
        }
    }
}

impl AppConfig {
    /// Load `config/default`, `config/local` and `APP__*` overrides
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(&["config/default", "config/local"])
    }

    /// Load the given optional config files, later ones taking precedence,
    /// then apply `APP__*` environment overrides
    pub fn load_from(files: &[&str]) -> Result<Self, config::ConfigError> {
        let builder = files.iter().fold(config::Config::builder(), |builder, file| {
            builder.add_source(config::File::with_name(file).required(false))
        });

        let config = builder
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
