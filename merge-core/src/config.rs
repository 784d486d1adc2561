//! Connection configuration for the merge engine.
//!
//! Unlike a general-purpose driver wrapper, this engine always operates
//! against exactly one database — the one named in the connection URI's path
//! component — because the parent and child collections it merges all live
//! there. A URI with no database component is a configuration error: the
//! original engine silently dereferenced a null database handle in this
//! case, which this crate treats as fatal instead.

use std::time::Duration;

use mongodb::options::ClientOptions;

use crate::error::{MergeError, MergeResult};

/// Default connection URI, matching the original engine's fallback.
pub const DEFAULT_URI: &str = "mongodb://localhost/test";

/// Connection configuration for [`crate::client::MergeClient`].
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// MongoDB connection URI. Must name a database in its path component.
    pub uri: String,
    /// Application name reported to the server.
    pub app_name: Option<String>,
    /// Maximum connection pool size.
    pub max_pool_size: Option<u32>,
    /// Connection timeout.
    pub connect_timeout: Option<Duration>,
    /// Server selection timeout.
    pub server_selection_timeout: Option<Duration>,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            uri: DEFAULT_URI.to_string(),
            app_name: Some("mongomerge".to_string()),
            max_pool_size: Some(10),
            connect_timeout: Some(Duration::from_secs(10)),
            server_selection_timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl MergeConfig {
    /// Read `MONGODB_URI` from the environment, falling back to
    /// [`DEFAULT_URI`] if it isn't set, matching the original engine.
    pub fn from_env() -> Self {
        let uri = std::env::var("MONGODB_URI").unwrap_or_else(|_| DEFAULT_URI.to_string());
        Self {
            uri,
            ..Self::default()
        }
    }

    /// Create a configuration from an explicit URI.
    pub fn from_uri(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            ..Self::default()
        }
    }

    /// Create a builder.
    pub fn builder() -> MergeConfigBuilder {
        MergeConfigBuilder::default()
    }

    /// Parse into driver [`ClientOptions`] and the resolved database name,
    /// failing if the URI names no database.
    pub async fn to_client_options(&self) -> MergeResult<(ClientOptions, String)> {
        let mut options = ClientOptions::parse(&self.uri)
            .await
            .map_err(|e| MergeError::config(format!("failed to parse URI: {e}")))?;

        let database = options
            .default_database
            .clone()
            .ok_or_else(|| MergeError::config(format!("URI {:?} names no database", self.uri)))?;

        if let Some(ref app_name) = self.app_name {
            options.app_name = Some(app_name.clone());
        }
        if let Some(max_pool) = self.max_pool_size {
            options.max_pool_size = Some(max_pool);
        }
        if let Some(timeout) = self.connect_timeout {
            options.connect_timeout = Some(timeout);
        }
        if let Some(timeout) = self.server_selection_timeout {
            options.server_selection_timeout = Some(timeout);
        }

        Ok((options, database))
    }
}

/// Builder for [`MergeConfig`].
#[derive(Debug, Default)]
pub struct MergeConfigBuilder {
    uri: Option<String>,
    app_name: Option<String>,
    max_pool_size: Option<u32>,
    connect_timeout: Option<Duration>,
    server_selection_timeout: Option<Duration>,
}

impl MergeConfigBuilder {
    /// Set the connection URI.
    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Set the application name.
    pub fn app_name(mut self, name: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self
    }

    /// Set the maximum pool size.
    pub fn max_pool_size(mut self, size: u32) -> Self {
        self.max_pool_size = Some(size);
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, duration: Duration) -> Self {
        self.connect_timeout = Some(duration);
        self
    }

    /// Set the server selection timeout.
    pub fn server_selection_timeout(mut self, duration: Duration) -> Self {
        self.server_selection_timeout = Some(duration);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> MergeConfig {
        let defaults = MergeConfig::default();
        MergeConfig {
            uri: self.uri.unwrap_or(defaults.uri),
            app_name: self.app_name.or(defaults.app_name),
            max_pool_size: self.max_pool_size.or(defaults.max_pool_size),
            connect_timeout: self.connect_timeout.or(defaults.connect_timeout),
            server_selection_timeout: self
                .server_selection_timeout
                .or(defaults.server_selection_timeout),
        }
    }
}
