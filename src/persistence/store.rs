//! Universe stores

use super::UniverseRecord;
use crate::error::ConwayError;
use crate::game_of_life::{UniverseId, UniverseMetadata};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Loads and persists universe checkpoints by id
pub trait UniverseStore {
    /// Fetch the checkpoint stored under `id`.
    ///
    /// Fails with [`ConwayError::InvalidIdentifier`] when nothing is stored
    /// under `id` and [`ConwayError::MalformedPersistedState`] when the stored
    /// record cannot be decoded.
    fn load(&self, id: UniverseId) -> Result<UniverseRecord, ConwayError>;

    /// Store `record` under `id`, replacing any previous checkpoint
    fn persist(&mut self, id: UniverseId, record: &UniverseRecord) -> Result<(), ConwayError>;

    /// Ids of every stored universe, sorted
    fn ids(&self) -> Result<Vec<UniverseId>, ConwayError>;

    /// Fetch the label stored next to the checkpoint, if one was ever written
    fn load_metadata(&self, id: UniverseId) -> Result<Option<UniverseMetadata>, ConwayError>;

    /// Store the label of `id` apart from its checkpoint record
    fn persist_metadata(&mut self, id: UniverseId, metadata: &UniverseMetadata) -> Result<(), ConwayError>;
}

/// One pretty-printed JSON file per universe, named `<id>.json`.
///
/// The label lives in a `<id>.meta.json` sidecar so the checkpoint record
/// keeps exactly its two fields.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    directory: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, id: UniverseId) -> PathBuf {
        self.directory.join(format!("{}.json", id))
    }

    fn metadata_path_for(&self, id: UniverseId) -> PathBuf {
        self.directory.join(format!("{}.meta.json", id))
    }
}

impl UniverseStore for JsonFileStore {
    fn load(&self, id: UniverseId) -> Result<UniverseRecord, ConwayError> {
        let content = match std::fs::read_to_string(self.path_for(id)) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(ConwayError::InvalidIdentifier(id)),
            Err(e) => return Err(e.into()),
        };
        UniverseRecord::from_json(id, &content)
    }

    fn persist(&mut self, id: UniverseId, record: &UniverseRecord) -> Result<(), ConwayError> {
        std::fs::create_dir_all(&self.directory)?;
        let json = record.to_json().map_err(std::io::Error::other)?;
        std::fs::write(self.path_for(id), json)?;
        Ok(())
    }

    fn ids(&self) -> Result<Vec<UniverseId>, ConwayError> {
        let dir = match std::fs::read_dir(&self.directory) {
            Ok(dir) => dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut ids = Vec::new();
        for entry in dir {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                // Foreign files in the directory are not ours to report
                if let Some(id) = path
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .and_then(|stem| stem.parse::<UniverseId>().ok())
                {
                    ids.push(id);
                }
            }
        }

        ids.sort();
        Ok(ids)
    }

    fn load_metadata(&self, id: UniverseId) -> Result<Option<UniverseMetadata>, ConwayError> {
        let content = match std::fs::read_to_string(self.metadata_path_for(id)) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| ConwayError::MalformedPersistedState { id, source })
    }

    fn persist_metadata(&mut self, id: UniverseId, metadata: &UniverseMetadata) -> Result<(), ConwayError> {
        std::fs::create_dir_all(&self.directory)?;
        let json = serde_json::to_string_pretty(metadata).map_err(std::io::Error::other)?;
        std::fs::write(self.metadata_path_for(id), json)?;
        Ok(())
    }
}

/// In-memory store holding the same JSON text a file store would write
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: HashMap<UniverseId, String>,
    metadata: HashMap<UniverseId, UniverseMetadata>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UniverseStore for MemoryStore {
    fn load(&self, id: UniverseId) -> Result<UniverseRecord, ConwayError> {
        let json = self.records.get(&id).ok_or(ConwayError::InvalidIdentifier(id))?;
        UniverseRecord::from_json(id, json)
    }

    fn persist(&mut self, id: UniverseId, record: &UniverseRecord) -> Result<(), ConwayError> {
        let json = record.to_json().map_err(std::io::Error::other)?;
        self.records.insert(id, json);
        Ok(())
    }

    fn ids(&self) -> Result<Vec<UniverseId>, ConwayError> {
        let mut ids: Vec<UniverseId> = self.records.keys().copied().collect();
        ids.sort();
        Ok(ids)
    }

    fn load_metadata(&self, id: UniverseId) -> Result<Option<UniverseMetadata>, ConwayError> {
        Ok(self.metadata.get(&id).cloned())
    }

    fn persist_metadata(&mut self, id: UniverseId, metadata: &UniverseMetadata) -> Result<(), ConwayError> {
        self.metadata.insert(id, metadata.clone());
        Ok(())
    }
}
