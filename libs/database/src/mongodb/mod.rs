//! MongoDB connector, configuration and health check

mod config;
mod connector;
mod health;

#[cfg(feature = "config")]
pub use config::build_url;
pub use config::MongoConfig;
pub use connector::{MongoError, client_options, connect_from_config, connect_from_config_with_retry};
pub use health::check_health;

pub use mongodb::{Client, Collection, Database};
