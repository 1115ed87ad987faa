// src/save/src/lib.rs

//! JSON snapshot repository and the ranking reader.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use error::GameError;
use hero::CharacterSnapshot;
use serde::Deserialize;

/// File name used when the player gives no name
pub const DEFAULT_SAVE_NAME: &str = "save_auto";
/// File name of the quick save slot
pub const QUICK_SAVE_NAME: &str = "quick_save";

const EXTENSION: &str = "json";

/// Where character snapshots are kept
pub trait SnapshotStore {
    /// Write a snapshot under `name`, returning the file it landed in
    fn persist(&self, snapshot: &CharacterSnapshot, name: &str) -> Result<PathBuf, GameError>;

    /// Read the snapshot saved under `name`; `GameError::NotFound` if there is none
    fn retrieve(&self, name: &str) -> Result<CharacterSnapshot, GameError>;
}

/// One line of the leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RankingEntry {
    #[serde(rename = "nome")]
    pub name: String,
    pub xp: u64,
    #[serde(rename = "nivel", default)]
    pub level: Option<u32>,
    #[serde(rename = "classe", default)]
    pub class: Option<String>,
}

/// Snapshots stored as pretty-printed JSON files in one directory
#[derive(Debug, Clone)]
pub struct JsonRepository {
    save_dir: PathBuf,
}

impl JsonRepository {
    /// Open the repository, creating the directory if needed
    pub fn new(save_dir: impl AsRef<Path>) -> Result<Self, GameError> {
        let save_dir = save_dir.as_ref();
        if !save_dir.exists() {
            fs::create_dir_all(save_dir).map_err(|e| GameError::persistence(save_dir, e))?;
        }
        Ok(Self {
            save_dir: save_dir.to_path_buf(),
        })
    }

    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    /// `hero` -> `hero.json`; blank names map to the default save.
    /// Names must stay inside the save directory, so separators are refused.
    pub fn file_name(name: &str) -> Result<String, GameError> {
        let name = name.trim();
        if name.contains(['/', '\\']) {
            return Err(GameError::InvalidSelection(format!(
                "save name '{}' cannot contain path separators",
                name
            )));
        }
        let name = if name.is_empty() { DEFAULT_SAVE_NAME } else { name };
        if name.ends_with(".json") {
            Ok(name.to_string())
        } else {
            Ok(format!("{}.{}", name, EXTENSION))
        }
    }

    pub fn path_for(&self, name: &str) -> Result<PathBuf, GameError> {
        Ok(self.save_dir.join(Self::file_name(name)?))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).is_ok_and(|path| path.is_file())
    }

    fn json_files(&self) -> Result<Vec<PathBuf>, GameError> {
        let entries =
            fs::read_dir(&self.save_dir).map_err(|e| GameError::persistence(&self.save_dir, e))?;
        let mut files = Vec::new();
        for entry in entries {
            let path = entry
                .map_err(|e| GameError::persistence(&self.save_dir, e))?
                .path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == EXTENSION) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }

    /// Names of every save in the directory, alphabetically
    pub fn list_saves(&self) -> Result<Vec<String>, GameError> {
        Ok(self
            .json_files()?
            .iter()
            .filter_map(|path| path.file_stem())
            .map(|stem| stem.to_string_lossy().into_owned())
            .collect())
    }

    pub fn delete(&self, name: &str) -> Result<(), GameError> {
        let path = self.path_for(name)?;
        if !path.exists() {
            return Err(GameError::NotFound(Self::file_name(name)?));
        }
        fs::remove_file(&path).map_err(|e| GameError::persistence(&path, e))
    }

    /// Every save holding a name and an experience total, highest experience
    /// first. Level is not a sort key. Unreadable files are skipped.
    pub fn ranking(&self) -> Result<Vec<RankingEntry>, GameError> {
        let mut entries: Vec<RankingEntry> = self
            .json_files()?
            .into_iter()
            .filter_map(|path| {
                let text = fs::read_to_string(&path)
                    .inspect_err(|e| log::warn!("Skipping {}: {}", path.display(), e))
                    .ok()?;
                serde_json::from_str::<RankingEntry>(&text)
                    .inspect_err(|e| log::debug!("{} is not a ranked save: {}", path.display(), e))
                    .ok()
            })
            .collect();
        entries.sort_by(|a, b| b.xp.cmp(&a.xp));
        Ok(entries)
    }
}

impl SnapshotStore for JsonRepository {
    fn persist(&self, snapshot: &CharacterSnapshot, name: &str) -> Result<PathBuf, GameError> {
        let path = self.path_for(name)?;
        let temp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(snapshot)?;
        let write = |temp: &Path| -> io::Result<()> {
            let mut file = fs::File::create(temp)?;
            file.write_all(json.as_bytes())?;
            file.flush()?;
            file.sync_all()
        };
        write(&temp_path).map_err(|e| GameError::persistence(&temp_path, e))?;
        fs::rename(&temp_path, &path).map_err(|e| GameError::persistence(&path, e))?;

        log::info!("Saved {} to {}", snapshot.name, path.display());
        Ok(path)
    }

    fn retrieve(&self, name: &str) -> Result<CharacterSnapshot, GameError> {
        let path = self.path_for(name)?;
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(GameError::NotFound(Self::file_name(name)?));
            }
            Err(e) => return Err(GameError::persistence(&path, e)),
        };
        let snapshot = serde_json::from_str(&text)?;
        log::info!("Loaded {}", path.display());
        Ok(snapshot)
    }
}
