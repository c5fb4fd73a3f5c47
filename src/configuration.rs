use serde;

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,
    pub app_port: u16,
    pub app_host: String,
    pub gemini: GeminiSettings,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub database_name: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct GeminiSettings {
    pub base_url: String,
    pub model: String,
    #[serde(default)]
    pub api_key: String,
    pub timeout_secs: u64,
    pub retry_attempts: usize,
}

impl GeminiSettings {
    // The API key never lives in the config file.
    pub fn load_api_key(&mut self) -> Result<(), config::ConfigError> {
        self.api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| config::ConfigError::NotFound("GEMINI_API_KEY".to_string()))?;
        Ok(())
    }
}

impl DatabaseSettings {
    // Connection string: postgresql://<username>:<password>@<host>:<port>/<database_name>
    pub fn connection_string(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.database_name,
        )
    }

    pub fn connection_string_without_db(&self) -> String {
        format!(
            "postgresql://{}:{}@{}:{}",
            self.username, self.password, self.host, self.port,
        )
    }
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let mut settings = config::Config::default();

    // Add configuration values from a file named `configuration`
    // with the .yaml extension
    settings.merge(config::File::with_name("configuration"))?;

    let mut config: Settings = settings.try_deserialize()?;
    config.gemini.load_api_key()?;

    Ok(config)
}
