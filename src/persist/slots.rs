//! `SaveSlots` store and the snapshot codec.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument};

use super::error::{PersistError, PersistResult};
use crate::snapshot::GameSnapshot;

/// Slot used when the shell does not ask for a name.
pub const DEFAULT_SLOT: &str = "saved_game";

/// File extension of slot files.
pub const SAVE_EXTENSION: &str = "sav";

/// Encode a snapshot to bytes.
pub fn encode(snapshot: &GameSnapshot) -> PersistResult<Vec<u8>> {
    Ok(bincode::serialize(snapshot)?)
}

/// Decode bytes to a snapshot. The snapshot is not validated here.
pub fn decode(bytes: &[u8]) -> PersistResult<GameSnapshot> {
    Ok(bincode::deserialize(bytes)?)
}

/// A directory of named save slots.
///
/// ```no_run
/// use fiery_dragons::persist::{SaveSlots, DEFAULT_SLOT};
/// use fiery_dragons::{GameConfig, GameSession};
///
/// let session = GameSession::with_default_roster(GameConfig::default(), 7).unwrap();
/// let slots = SaveSlots::new("saves");
/// slots.save(DEFAULT_SLOT, &session.capture()).unwrap();
/// let restored = slots.load(DEFAULT_SLOT).unwrap();
/// assert!(restored.is_some());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SaveSlots {
    dir: PathBuf,
}

impl SaveSlots {
    /// Slots stored under `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File path for `slot`, after checking the name.
    pub fn path_for(&self, slot: &str) -> PersistResult<PathBuf> {
        check_slot_name(slot)?;
        Ok(self.dir.join(format!("{slot}.{SAVE_EXTENSION}")))
    }

    /// Write `snapshot` to `slot`, replacing any previous save.
    ///
    /// The file is written beside the target and renamed into place, so a
    /// failed write never leaves a half-written slot.
    #[instrument(skip(self, snapshot), fields(dir = %self.dir.display()))]
    pub fn save(&self, slot: &str, snapshot: &GameSnapshot) -> PersistResult<PathBuf> {
        let path = self.path_for(slot)?;
        let bytes = encode(snapshot)?;

        fs::create_dir_all(&self.dir)?;
        let staging = path.with_extension(format!("{SAVE_EXTENSION}.tmp"));
        fs::write(&staging, &bytes)?;
        fs::rename(&staging, &path)?;

        info!(slot, bytes = bytes.len(), "Game saved");
        Ok(path)
    }

    /// Read and validate `slot`.
    ///
    /// A slot that does not exist is `Ok(None)`. A slot that exists but
    /// fails to decode or restore is an error.
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    pub fn load(&self, slot: &str) -> PersistResult<Option<GameSnapshot>> {
        let path = self.path_for(slot)?;
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(slot, "No saved game found");
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };

        let snapshot = decode(&bytes)?;
        snapshot.restore()?;
        info!(slot, "Game loaded");
        Ok(Some(snapshot))
    }

    /// Names of every slot in the directory, sorted.
    ///
    /// A missing directory has no slots.
    pub fn list(&self) -> PersistResult<Vec<String>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut names = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(SAVE_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if is_valid_slot_name(stem) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Remove `slot`. Returns whether a file was deleted.
    pub fn delete(&self, slot: &str) -> PersistResult<bool> {
        let path = self.path_for(slot)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                info!(slot, "Save deleted");
                Ok(true)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }
}

fn is_valid_slot_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

fn check_slot_name(name: &str) -> PersistResult<()> {
    if is_valid_slot_name(name) {
        Ok(())
    } else {
        Err(PersistError::InvalidSlotName {
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;
    use crate::session::GameSession;

    fn snapshot() -> GameSnapshot {
        GameSession::with_default_roster(GameConfig::new(2, [1, 2], 1), 11)
            .unwrap()
            .capture()
    }

    #[test]
    fn test_slot_names() {
        assert!(is_valid_slot_name("saved_game"));
        assert!(is_valid_slot_name("slot-2"));
        assert!(!is_valid_slot_name(""));
        assert!(!is_valid_slot_name("../escape"));
        assert!(!is_valid_slot_name("a b"));
        assert!(!is_valid_slot_name("día"));
    }

    #[test]
    fn test_codec_round_trip() {
        let snap = snapshot();
        let bytes = encode(&snap).unwrap();
        assert_eq!(decode(&bytes).unwrap(), snap);
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(
            decode(&[0xff, 0x01]),
            Err(PersistError::Codec(_))
        ));
    }

    #[test]
    fn test_save_load_delete() {
        let dir = tempfile::tempdir().unwrap();
        let slots = SaveSlots::new(dir.path().join("saves"));
        let snap = snapshot();

        assert_eq!(slots.load(DEFAULT_SLOT).unwrap(), None);
        assert!(slots.list().unwrap().is_empty());

        let path = slots.save(DEFAULT_SLOT, &snap).unwrap();
        assert!(path.ends_with("saved_game.sav"));
        assert_eq!(slots.load(DEFAULT_SLOT).unwrap(), Some(snap));
        assert_eq!(slots.list().unwrap(), vec!["saved_game".to_string()]);

        assert!(slots.delete(DEFAULT_SLOT).unwrap());
        assert!(!slots.delete(DEFAULT_SLOT).unwrap());
        assert_eq!(slots.load(DEFAULT_SLOT).unwrap(), None);
    }

    #[test]
    fn test_invalid_slot_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let slots = SaveSlots::new(dir.path());
        assert!(matches!(
            slots.save("no/slashes", &snapshot()),
            Err(PersistError::InvalidSlotName { .. })
        ));
    }
}
