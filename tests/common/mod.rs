use std::{
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

use wyr_backend::Config;
use wyr_backend::db::{self, SqliteQuestionStore};

/// A SQLite file under the temp dir that is removed on drop.
pub struct TempDb {
    pub path: PathBuf,
    pub cfg: Config,
}

impl TempDb {
    pub fn new(tag: &str) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();

        let mut path = std::env::temp_dir();
        path.push(format!(
            "wyr-{}-{}-{}.sqlite",
            tag,
            std::process::id(),
            nanos
        ));

        let cfg = Config {
            database_url: format!("sqlite:{}", path.display()),
            ..Config::default()
        };
        Self { path, cfg }
    }

    pub async fn store(&self) -> SqliteQuestionStore {
        let pool = db::connect(&self.cfg).await.expect("failed to open pool");
        let store = SqliteQuestionStore::new(pool);
        store.init_schema().await.expect("failed to init schema");
        store
    }
}

impl Drop for TempDb {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
        for suffix in ["-wal", "-shm"] {
            let mut side = self.path.clone().into_os_string();
            side.push(suffix);
            let _ = fs::remove_file(side);
        }
    }
}
