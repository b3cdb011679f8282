//! MongoDB connection management for the catalog service.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB connector and health check
//! - `config` - `MongoConfig::from_env` through `core_config::FromEnv`
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::common::RetryConfig;
//! use database::mongodb::{MongoConfig, connect_from_config_with_retry};
//!
//! let config = MongoConfig::from_env()?;
//! let client = connect_from_config_with_retry(&config, Some(RetryConfig::new())).await?;
//! let db = client.database(config.database());
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;
