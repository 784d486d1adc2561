//! Command-line argument definitions.

use clap::Parser;

/// Denormalize a MongoDB parent collection by embedding and attaching its
/// declared children.
///
/// Each SPEC is `parent_key[:[[]]child_name[.child_key]]` — see the project
/// README for the full grammar. A bare `parent_key` defaults to a one-to-one
/// embed keyed by the child's `_id`; wrapping the child part in `[...]`
/// instead attaches an array of matching children.
#[derive(Parser, Debug)]
#[command(name = "mongomerge", version, about, long_about = None)]
pub struct Cli {
    /// Name of the parent collection to denormalize.
    pub parent: String,

    /// One or more merge-spec strings describing the parent's children.
    #[arg(required = true)]
    pub specs: Vec<String>,

    /// MongoDB connection URI. Overrides `MONGODB_URI`; the URI must name a
    /// database in its path component.
    #[arg(long, env = "MONGODB_URI")]
    pub uri: Option<String>,
}
