//! MongoDB client wrapper used by the merge engine.

use async_trait::async_trait;
use bson::Document;
use mongodb::{Client, Collection, Database};
use tracing::info;

use crate::config::MergeConfig;
use crate::error::{MergeError, MergeResult};

/// A handle that can drop a named collection. Lets the orchestrator's
/// temp-collection hygiene be driven against a fake in tests instead of a
/// live server.
#[async_trait]
pub trait CollectionDropper: Send + Sync {
    /// Drop the collection named `name` if it exists.
    async fn drop_collection(&self, name: &str) -> MergeResult<()>;
}

/// A connected client, pinned to the single database named in its
/// [`MergeConfig`]'s URI.
#[derive(Clone)]
pub struct MergeClient {
    client: Client,
    database: Database,
}

impl MergeClient {
    /// Connect using the given configuration.
    pub async fn new(config: MergeConfig) -> MergeResult<Self> {
        let (options, database_name) = config.to_client_options().await?;

        let client = Client::with_options(options)
            .map_err(|e| MergeError::connection(format!("failed to create client: {e}")))?;
        let database = client.database(&database_name);

        info!(database = %database_name, "connected to MongoDB");

        Ok(Self { client, database })
    }

    /// Connect using `MONGODB_URI` from the environment.
    pub async fn from_env() -> MergeResult<Self> {
        Self::new(MergeConfig::from_env()).await
    }

    /// Start building a client with explicit configuration.
    pub fn builder() -> MergeClientBuilder {
        MergeClientBuilder::default()
    }

    /// Get a document collection by name.
    pub fn collection(&self, name: &str) -> Collection<Document> {
        self.database.collection(name)
    }

    /// The database this client is pinned to.
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// The underlying driver client.
    pub fn inner(&self) -> &Client {
        &self.client
    }

    /// Drop a collection if it exists. Used to clear the temporary
    /// collections between merge phases.
    pub async fn drop_collection(&self, name: &str) -> MergeResult<()> {
        self.collection(name)
            .drop(None)
            .await
            .map_err(MergeError::from)
    }
}

#[async_trait]
impl CollectionDropper for MergeClient {
    async fn drop_collection(&self, name: &str) -> MergeResult<()> {
        // Resolves to the inherent method above, not a recursive trait call:
        // inherent methods take priority over trait methods on the same type.
        self.drop_collection(name).await
    }
}

/// Builder for [`MergeClient`].
#[derive(Debug, Default)]
pub struct MergeClientBuilder {
    uri: Option<String>,
    app_name: Option<String>,
    max_pool_size: Option<u32>,
}

impl MergeClientBuilder {
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

    /// Set the maximum connection pool size.
    pub fn max_pool_size(mut self, size: u32) -> Self {
        self.max_pool_size = Some(size);
        self
    }

    /// Connect and produce the client.
    pub async fn build(self) -> MergeResult<MergeClient> {
        let mut builder = MergeConfig::builder();
        if let Some(uri) = self.uri {
            builder = builder.uri(uri);
        }
        if let Some(app_name) = self.app_name {
            builder = builder.app_name(app_name);
        }
        if let Some(max_pool) = self.max_pool_size {
            builder = builder.max_pool_size(max_pool);
        }
        MergeClient::new(builder.build()).await
    }
}
