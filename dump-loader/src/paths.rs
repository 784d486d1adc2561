//! Explicit path configuration, replacing the original loader's global
//! `char[MAXPATHLEN]` buffers resolved once from `argv[0]` at startup.

use std::io;
use std::path::{Path, PathBuf};

/// Overrides the binary-relative base directory; set in tests so path
/// resolution doesn't depend on `current_exe()`.
pub const BASE_DIR_ENV: &str = "MUSICBRAINZ_BASE_DIR";

/// Resolved filesystem layout for a MusicBrainz export tree.
#[derive(Debug, Clone)]
pub struct DumpPaths {
    base_dir: PathBuf,
}

impl DumpPaths {
    /// Build paths rooted at an explicit base directory.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Resolve the base directory from `MUSICBRAINZ_BASE_DIR` if set,
    /// otherwise from the running binary's directory — the same resolution
    /// order as the original tool's `argv[0]`-relative lookup.
    pub fn resolve() -> io::Result<Self> {
        if let Ok(base) = std::env::var(BASE_DIR_ENV) {
            return Ok(Self::new(base));
        }
        let exe = std::env::current_exe()?;
        let dir = exe
            .parent()
            .ok_or_else(|| io::Error::other("executable path has no parent directory"))?;
        Ok(Self::new(dir))
    }

    /// The base directory itself.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path to the `LATEST` pointer file.
    pub fn latest_pointer_file(&self) -> PathBuf {
        self.base_dir
            .join("ftp.musicbrainz.org/pub/musicbrainz/data/fullexport/LATEST")
    }

    /// Read and trim the contents of the `LATEST` pointer file.
    pub fn read_latest(&self) -> io::Result<String> {
        let raw = std::fs::read_to_string(self.latest_pointer_file())?;
        Ok(raw.trim().to_string())
    }

    /// Directory containing the per-table dump files for `latest`.
    pub fn mbdump_dir(&self, latest: &str) -> PathBuf {
        self.base_dir
            .join("data/fullexport")
            .join(latest)
            .join("mbdump")
    }

    /// Path to a single table's dump file.
    pub fn mbdump_file(&self, latest: &str, table: &str) -> PathBuf {
        self.mbdump_dir(latest).join(table)
    }

    /// Path to the schema JSON file.
    pub fn schema_file(&self) -> PathBuf {
        self.base_dir.join("schema/create_tables.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mbdump_file_path_layout() {
        let paths = DumpPaths::new("/export");
        assert_eq!(
            paths.mbdump_file("20230701", "artist"),
            PathBuf::from("/export/data/fullexport/20230701/mbdump/artist")
        );
    }

    #[test]
    fn schema_file_path_layout() {
        let paths = DumpPaths::new("/export");
        assert_eq!(
            paths.schema_file(),
            PathBuf::from("/export/schema/create_tables.json")
        );
    }

    #[test]
    fn latest_pointer_file_path_layout() {
        let paths = DumpPaths::new("/export");
        assert_eq!(
            paths.latest_pointer_file(),
            PathBuf::from("/export/ftp.musicbrainz.org/pub/musicbrainz/data/fullexport/LATEST")
        );
    }

    #[test]
    fn read_latest_trims_whitespace() {
        let dir = tempfile::tempdir().unwrap();
        let pointer_dir = dir.path().join("ftp.musicbrainz.org/pub/musicbrainz/data/fullexport");
        std::fs::create_dir_all(&pointer_dir).unwrap();
        std::fs::write(pointer_dir.join("LATEST"), "20230701\n").unwrap();

        let paths = DumpPaths::new(dir.path());
        assert_eq!(paths.read_latest().unwrap(), "20230701");
    }
}
