//! Test helpers for laying out CLI input files in a scratch directory.

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// Write `contents` to `path`, creating parent directories.
pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent directory");
    }
    std::fs::write(path, contents).expect("write fixture file");
}

/// A temporary directory addressed through UTF-8 paths.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }
}

/// Two sites: a clean, quiet, accessible one at the user's location and a
/// grubby, busy one far away.
pub(super) const SITES_JSON: &str = r#"[
    {
        "id": "A",
        "name": "Campus Library",
        "location": [33.68, -117.82],
        "amenities": ["wheelchair"],
        "ratings": {"cleanliness": 5, "safety": 0},
        "opening_hours": "00:00-23:59",
        "crowd_updates": "low",
        "floor": 2
    },
    {
        "id": "B",
        "name": "Bus Depot",
        "location": [40.0, -70.0],
        "ratings": {"cleanliness": 1},
        "opening_hours": "00:00-23:59",
        "crowd_updates": "high"
    }
]"#;

/// A user at the first site at noon who needs wheelchair access.
pub(super) const CONTEXT_JSON: &str =
    r#"{"location": [33.68, -117.82], "time": "12:00", "preferences": ["wheelchair"]}"#;
