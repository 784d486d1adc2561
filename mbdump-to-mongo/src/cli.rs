//! Command-line argument definitions.

use clap::Parser;

/// Load one or more MusicBrainz PostgreSQL dump tables into MongoDB.
///
/// Each TABLE name must appear as a `create_table` entry in the schema file
/// and as a dump file under the resolved export tree; see `DumpPaths` for
/// the path layout.
#[derive(Parser, Debug)]
#[command(name = "mbdump_to_mongo", version, about, long_about = None)]
pub struct Cli {
    /// Table names to load, in the order given.
    #[arg(required = true)]
    pub tables: Vec<String>,

    /// MongoDB connection URI. Overrides `MONGODB_URI`.
    #[arg(long, env = "MONGODB_URI", default_value = "mongodb://localhost/musicbrainz")]
    pub uri: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_table_list() {
        let cli = Cli::parse_from(["mbdump_to_mongo", "artist", "release"]);
        assert_eq!(cli.tables, vec!["artist".to_string(), "release".to_string()]);
    }

    #[test]
    fn rejects_missing_tables() {
        let result = Cli::try_parse_from(["mbdump_to_mongo"]);
        assert!(result.is_err());
    }

    #[test]
    fn defaults_uri_to_musicbrainz_database() {
        // SAFETY: test runs single-threaded; no concurrent reader of this var.
        unsafe {
            std::env::remove_var("MONGODB_URI");
        }
        let cli = Cli::parse_from(["mbdump_to_mongo", "artist"]);
        assert_eq!(cli.uri, "mongodb://localhost/musicbrainz");
    }
}
