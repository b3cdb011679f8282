#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_first, env_or_default, env_parse_or};

/// MongoDB connection settings.
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// let config = MongoConfig::with_database("mongodb://localhost:27017", "catalog");
///
/// // From environment variables (requires `config` feature)
/// let config = MongoConfig::from_env()?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoConfig {
    /// Format: mongodb://[username:password@]host[:port][/database][?options]
    pub url: String,

    pub database: String,

    /// Application name reported in server logs
    pub app_name: Option<String>,

    pub max_pool_size: u32,

    pub min_pool_size: u32,

    pub connect_timeout_secs: u64,

    pub server_selection_timeout_secs: u64,
}

impl MongoConfig {
    /// URL with the default database name and pool settings.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_database(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            ..Self::default()
        }
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    /// The URL with any password replaced by `***`, safe to log.
    pub fn redacted_url(&self) -> String {
        let Some((scheme, rest)) = self.url.split_once("://") else {
            return self.url.clone();
        };
        let Some((credentials, host)) = rest.rsplit_once('@') else {
            return self.url.clone();
        };
        match credentials.split_once(':') {
            Some((user, _)) => format!("{scheme}://{user}:***@{host}"),
            None => self.url.clone(),
        }
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            url: "mongodb://localhost:27017".to_string(),
            database: "catalog".to_string(),
            app_name: None,
            max_pool_size: 100,
            min_pool_size: 5,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 30,
        }
    }
}

/// Build `mongodb://[user:pass@]host:port/database?authSource=admin` from parts.
///
/// User and password are percent-encoded; credentials are omitted when no
/// user is given.
#[cfg(feature = "config")]
pub fn build_url(
    user: Option<&str>,
    password: Option<&str>,
    host: &str,
    port: &str,
    database: &str,
) -> String {
    let credentials = match (user.filter(|u| !u.is_empty()), password) {
        (Some(user), Some(password)) => format!(
            "{}:{}@",
            urlencoding::encode(user),
            urlencoding::encode(password)
        ),
        (Some(user), None) => format!("{}@", urlencoding::encode(user)),
        (None, _) => String::new(),
    };
    format!("mongodb://{credentials}{host}:{port}/{database}?authSource=admin")
}

/// Load MongoConfig from environment variables
///
/// - `MONGODB_DATABASE`, `MONGO_DATABASE` or `DB_NAME` (required) - database name
/// - `MONGODB_URL` or `MONGO_URL` - full connection string; when neither is
///   set the URL is assembled from `DB_USER`, `DB_PASS`, `DB_HOST`
///   (default: localhost) and `DB_PORT` (default: 27017)
/// - `MONGODB_APP_NAME` (optional)
/// - `MONGODB_MAX_POOL_SIZE` (default: 100), `MONGODB_MIN_POOL_SIZE` (default: 5)
/// - `MONGODB_CONNECT_TIMEOUT_SECS` (default: 10)
/// - `MONGODB_SERVER_SELECTION_TIMEOUT_SECS` (default: 30)
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let database = env_first(&["MONGODB_DATABASE", "MONGO_DATABASE", "DB_NAME"])
            .ok_or_else(|| {
                ConfigError::MissingEnvVar(
                    "MONGODB_DATABASE, MONGO_DATABASE or DB_NAME".to_string(),
                )
            })?;

        let url = match env_first(&["MONGODB_URL", "MONGO_URL"]) {
            Some(url) => url,
            None => build_url(
                std::env::var("DB_USER").ok().as_deref(),
                std::env::var("DB_PASS").ok().as_deref(),
                &env_or_default("DB_HOST", "localhost"),
                &env_or_default("DB_PORT", "27017"),
                &database,
            ),
        };

        Ok(Self {
            url,
            database,
            app_name: std::env::var("MONGODB_APP_NAME").ok(),
            max_pool_size: env_parse_or("MONGODB_MAX_POOL_SIZE", 100)?,
            min_pool_size: env_parse_or("MONGODB_MIN_POOL_SIZE", 5)?,
            connect_timeout_secs: env_parse_or("MONGODB_CONNECT_TIMEOUT_SECS", 10)?,
            server_selection_timeout_secs: env_parse_or(
                "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
                30,
            )?,
        })
    }
}
