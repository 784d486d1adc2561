//! # merge-core
//!
//! The denormalizing merge engine behind `mongomerge`.
//!
//! Given a parent collection and a compact textual spec describing its
//! "one" (embed a single referenced document) and "many" (attach an array of
//! dependent documents) children, this crate composes the aggregation
//! pipelines and bulk-write batches that denormalize the parent in place.
//!
//! The engine never opens a network connection on its own behalf beyond what
//! the caller hands it through [`client::MergeClient`] — it consumes the
//! store purely through `$project`/`$group`/`$unwind`/`$match` aggregation
//! stages, cursor iteration, and bulk insert/update, exactly the operations
//! listed in the spec this crate implements.
//!
//! ## Example
//!
//! ```rust,ignore
//! use merge_core::{MergeClient, MergeConfig, MergeOrchestrator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MergeClient::builder()
//!         .uri("mongodb://localhost/test")
//!         .build()
//!         .await?;
//!
//!     let orchestrator = MergeOrchestrator::new(client);
//!     let report = orchestrator
//!         .execute("people", &["gender".into(), "alias".into()])
//!         .await?;
//!
//!     println!("updated {} parents", report.parents_updated);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod pipeline;
pub mod sink;
pub mod spec;
pub mod transport;
pub mod writer;

pub use bson::{Bson, Document, doc};
pub use client::{MergeClient, MergeClientBuilder};
pub use config::MergeConfig;
pub use error::{MergeError, MergeResult};
pub use orchestrator::{MergeOrchestrator, MergeReport};
pub use spec::{MergeEntry, MergeSpec, Relation, SpecError};
pub use transport::BULK_OPS_SIZE;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::client::{MergeClient, MergeClientBuilder};
    pub use crate::config::MergeConfig;
    pub use crate::error::{MergeError, MergeResult};
    pub use crate::orchestrator::{MergeOrchestrator, MergeReport};
    pub use crate::spec::{MergeEntry, MergeSpec, Relation, SpecError};
    pub use bson::{Bson, Document, doc};
}
