//! Snapshot persistence on local disk
use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::SnapshotStorage;
use crate::portal::PortalState;

/// Failures from the JSON file backend.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot storage error: {0}")]
    Io(#[from] io::Error),
    #[error("snapshot serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Stores each snapshot as `<name>.json` under one directory, created on
/// first save.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }
}

impl SnapshotStorage for JsonFileStorage {
    type Error = SnapshotError;

    fn save(&self, name: &str, state: &PortalState) -> Result<(), Self::Error> {
        fs::create_dir_all(&self.dir)?;
        let payload = serde_json::to_string_pretty(state)?;
        fs::write(self.path_for(name), payload)?;
        Ok(())
    }

    fn load(&self, name: &str) -> Result<Option<PortalState>, Self::Error> {
        let payload = match fs::read_to_string(self.path_for(name)) {
            Ok(payload) => payload,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_str(&payload)?))
    }

    fn delete(&self, name: &str) -> Result<(), Self::Error> {
        match fs::remove_file(self.path_for(name)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::league::GameType;
    use crate::portal::Portal;

    #[test]
    fn snapshots_roundtrip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path());

        let mut portal = Portal::new();
        let ana = portal.create_player("Ana", "ana@example.com").unwrap();
        portal
            .create_league(ana, "dice-nights", GameType::DiceRoll)
            .unwrap();
        portal.set_current_day(42).unwrap();
        portal.save_snapshot(&storage, "nightly").unwrap();
        assert!(dir.path().join("nightly.json").exists());

        let mut restored = Portal::new();
        assert!(restored.load_snapshot(&storage, "nightly").unwrap());
        assert_eq!(restored.state(), portal.state());
        assert!(!restored.load_snapshot(&storage, "missing").unwrap());
    }

    #[test]
    fn corrupt_snapshots_fail_without_touching_state() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path());
        fs::create_dir_all(dir.path()).unwrap();
        fs::write(dir.path().join("broken.json"), "not json {").unwrap();

        let mut portal = Portal::new();
        portal.create_player("Ana", "ana@example.com").unwrap();
        let before = portal.state().clone();

        let result = portal.load_snapshot(&storage, "broken");
        assert!(matches!(result, Err(SnapshotError::Serialization(_))));
        assert_eq!(portal.state(), &before);
    }

    #[test]
    fn delete_tolerates_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path());
        storage.delete("never-saved").unwrap();

        let portal = Portal::new();
        portal.save_snapshot(&storage, "empty").unwrap();
        storage.delete("empty").unwrap();
        assert!(!dir.path().join("empty.json").exists());
    }
}
