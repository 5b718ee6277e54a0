// ============================================================
// Layer 6 — File Model Store
// ============================================================
// Keeps the current ModelArtifact in a single JSON file.
//
// Writes go through a temp file in the same directory followed
// by a rename, so readers see either the previous artifact or
// the new one in full. A mutex serializes concurrent writers.
//
// File layout:
//   <dir>/
//     forest_fire_model.json       ← the artifact
//     forest_fire_model.json.tmp   ← only present mid-write
//     training_metrics.csv         ← written by the trainer
//
// Loads are not cached: every call reads the file again.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Mutex,
};

use crate::domain::artifact::ModelArtifact;
use crate::domain::error::{Result, ServiceError};
use crate::domain::traits::ModelRepository;

pub const DEFAULT_ARTIFACT_PATH: &str = "forest_fire_model.json";

pub struct FileModelStore {
    path:       PathBuf,
    write_lock: Mutex<()>,
}

impl FileModelStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path:       path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Directory holding the artifact (and its sibling files).
    pub fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl ModelRepository for FileModelStore {
    fn save(&self, artifact: &ModelArtifact) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| ServiceError::Storage("model store lock poisoned".into()))?;

        artifact
            .validate()
            .map_err(|m| ServiceError::Storage(format!("refusing to save invalid artifact: {m}")))?;

        fs::create_dir_all(self.dir()).map_err(|e| {
            ServiceError::Storage(format!("cannot create '{}': {e}", self.dir().display()))
        })?;

        let json = serde_json::to_vec(artifact)
            .map_err(|e| ServiceError::Storage(format!("cannot encode artifact: {e}")))?;

        let tmp = self.temp_path();
        fs::write(&tmp, json)
            .map_err(|e| ServiceError::Storage(format!("cannot write '{}': {e}", tmp.display())))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            ServiceError::Storage(format!("cannot move artifact into '{}': {e}", self.path.display()))
        })?;

        tracing::info!("Saved model artifact to '{}'", self.path.display());
        Ok(())
    }

    fn load(&self) -> Result<ModelArtifact> {
        let bytes = match fs::read(&self.path) {
            Ok(b) => b,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ServiceError::ModelNotTrained(self.path.clone()));
            }
            Err(e) => {
                return Err(ServiceError::Storage(format!(
                    "cannot read '{}': {e}",
                    self.path.display()
                )));
            }
        };

        let artifact: ModelArtifact = serde_json::from_slice(&bytes).map_err(|e| {
            ServiceError::Storage(format!("corrupt artifact '{}': {e}", self.path.display()))
        })?;

        tracing::debug!("Loaded model artifact from '{}'", self.path.display());
        Ok(artifact)
    }

    fn location(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    };
    use std::thread;

    use crate::domain::artifact::Architecture;
    use crate::domain::standardizer::Standardizer;

    fn artifact(weights: Vec<u8>) -> ModelArtifact {
        ModelArtifact::new(
            Architecture { input_size: 12, hidden_size_1: 64, hidden_size_2: 32 },
            Standardizer::identity(),
            weights,
        )
    }

    #[test]
    fn test_fresh_store_is_not_trained() {
        let dir   = tempfile::tempdir().unwrap();
        let store = FileModelStore::new(dir.path().join("model.json"));
        assert!(matches!(store.load(), Err(ServiceError::ModelNotTrained(_))));
    }

    #[test]
    fn test_save_then_load() {
        let dir   = tempfile::tempdir().unwrap();
        let store = FileModelStore::new(dir.path().join("nested").join("model.json"));

        store.save(&artifact(vec![1, 2, 3])).unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded.weights, vec![1, 2, 3]);
        assert!(loaded.validate().is_ok());
    }

    #[test]
    fn test_overwrite_replaces_whole_artifact() {
        let dir   = tempfile::tempdir().unwrap();
        let store = FileModelStore::new(dir.path().join("model.json"));

        store.save(&artifact(vec![1; 64])).unwrap();
        store.save(&artifact(vec![9])).unwrap();

        assert_eq!(store.load().unwrap().weights, vec![9]);
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn test_invalid_artifact_is_not_written() {
        let dir   = tempfile::tempdir().unwrap();
        let store = FileModelStore::new(dir.path().join("model.json"));

        let mut bad = artifact(vec![1, 2, 3]);
        bad.standardizer.means[0] = f32::NAN;
        assert!(matches!(store.save(&bad), Err(ServiceError::Storage(_))));
        assert!(matches!(store.load(), Err(ServiceError::ModelNotTrained(_))));
    }

    #[test]
    fn test_readers_never_see_a_partial_artifact() {
        let dir   = tempfile::tempdir().unwrap();
        let store = Arc::new(FileModelStore::new(dir.path().join("model.json")));
        let small = artifact(vec![1; 8]);
        let large = artifact(vec![7; 64 * 1024]);
        store.save(&small).unwrap();

        let done   = Arc::new(AtomicBool::new(false));
        let writer = {
            let store = store.clone();
            let done  = done.clone();
            thread::spawn(move || {
                for i in 0..200 {
                    let next = if i % 2 == 0 { &large } else { &small };
                    store.save(next).unwrap();
                }
                done.store(true, Ordering::SeqCst);
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = store.clone();
                let done  = done.clone();
                thread::spawn(move || {
                    let mut loads = 0usize;
                    while !done.load(Ordering::SeqCst) || loads == 0 {
                        let loaded = store.load().unwrap();
                        loaded.validate().unwrap();
                        assert!(loaded.weights.len() == 8 || loaded.weights.len() == 64 * 1024);
                        assert!(loaded.weights.iter().all(|&b| b == loaded.weights[0]));
                        loads += 1;
                    }
                    loads
                })
            })
            .collect();

        writer.join().unwrap();
        for r in readers {
            assert!(r.join().unwrap() > 0);
        }
    }

    #[test]
    fn test_corrupt_file_is_storage_error() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        fs::write(&path, b"{not json").unwrap();

        let store = FileModelStore::new(path);
        assert!(matches!(store.load(), Err(ServiceError::Storage(_))));
    }

    #[test]
    fn test_dir_of_bare_file_name() {
        let store = FileModelStore::new("model.json");
        assert_eq!(store.dir(), Path::new("."));
    }
}
