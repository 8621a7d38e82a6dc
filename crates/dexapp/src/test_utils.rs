use crate::history::HISTORY_SLOT;
use crate::store::fs_backend::FsStore;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub store: FsStore,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().to_path_buf();
        let store = FsStore::new(&root);
        Self {
            _temp_dir: temp_dir,
            store,
            root,
        }
    }

    /// Seeds the history slot file with raw content.
    pub fn write_history(&self, raw: &str) {
        std::fs::write(self.store.slot_path(HISTORY_SLOT), raw).expect("failed to seed history");
    }
}
