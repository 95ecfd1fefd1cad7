use crate::consts;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Persistent storage for the best score across sessions
pub(crate) trait HighScoreStore: fmt::Debug {
    /// Return the stored high score.  A missing, unreadable, or corrupt store
    /// counts as 0.
    fn read(&self) -> u32;

    /// Replace the stored high score
    fn write(&mut self, score: u32) -> Result<(), SaveError>;
}

impl<S: HighScoreStore + ?Sized> HighScoreStore for Box<S> {
    fn read(&self) -> u32 {
        (**self).read()
    }

    fn write(&mut self, score: u32) -> Result<(), SaveError> {
        (**self).write(score)
    }
}

/// A high score store that only lasts as long as the process
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct MemoryStore(u32);

impl MemoryStore {
    #[cfg(test)]
    pub(crate) fn new(score: u32) -> MemoryStore {
        MemoryStore(score)
    }
}

impl HighScoreStore for MemoryStore {
    fn read(&self) -> u32 {
        self.0
    }

    fn write(&mut self, score: u32) -> Result<(), SaveError> {
        self.0 = score;
        Ok(())
    }
}

/// A high score store backed by a JSON file mapping keys to scores.  Entries
/// under keys other than [`consts::HIGH_SCORE_KEY`] are left alone.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub(crate) fn new(path: PathBuf) -> FileStore {
        FileStore { path }
    }

    /// Return the default high score file path
    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("gridsnake").join("highscore.json"))
    }

    fn load(&self) -> Result<BTreeMap<String, u32>, LoadError> {
        let src = match fs_err::read(&self.path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(LoadError::read(e)),
        };
        serde_json::from_slice(&src).map_err(LoadError::deserialize)
    }

    fn save(&self, entries: &BTreeMap<String, u32>) -> Result<(), SaveError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string(entries).map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(&self.path, &src).map_err(SaveError::write)?;
        Ok(())
    }
}

impl HighScoreStore for FileStore {
    fn read(&self) -> u32 {
        match self.load() {
            Ok(entries) => entries.get(consts::HIGH_SCORE_KEY).copied().unwrap_or(0),
            Err(e) => {
                log::warn!("{e}; treating high score as 0: {}", ErrorChain(&e));
                0
            }
        }
    }

    fn write(&mut self, score: u32) -> Result<(), SaveError> {
        // A corrupt file gets replaced rather than blocking the save.
        let mut entries = match self.load() {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("{e}; overwriting high score file: {}", ErrorChain(&e));
                BTreeMap::new()
            }
        };
        entries.insert(String::from(consts::HIGH_SCORE_KEY), score);
        self.save(&entries)
    }
}

/// Display adapter that writes out the sources of an error, separated by
/// colons
#[derive(Clone, Copy, Debug)]
pub(crate) struct ErrorChain<'a>(pub(crate) &'a (dyn std::error::Error + 'static));

impl fmt::Display for ErrorChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        let mut source = self.0.source();
        while let Some(src) = source {
            if !first {
                write!(f, ": ")?;
            }
            write!(f, "{src}")?;
            first = false;
            source = src.source();
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
#[error("Failed to save high score to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize high score")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write high score file")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read high score from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to read high score file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize high score file")]
    Deserialize(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_is_zero() {
        let tmpdir = tempdir().unwrap();
        let store = FileStore::new(tmpdir.path().join("highscore.json"));
        assert_eq!(store.read(), 0);
    }

    #[test]
    fn write_then_read() {
        let tmpdir = tempdir().unwrap();
        let path = tmpdir.path().join("data").join("highscore.json");
        let mut store = FileStore::new(path.clone());
        store.write(17).unwrap();
        assert_eq!(store.read(), 17);
        assert_eq!(
            fs_err::read_to_string(&path).unwrap(),
            "{\"snake-high-score\":17}\n"
        );
        let store = FileStore::new(path);
        assert_eq!(store.read(), 17);
    }

    #[test]
    fn corrupt_file_is_zero() {
        let tmpdir = tempdir().unwrap();
        let path = tmpdir.path().join("highscore.json");
        fs_err::write(&path, "{\"snake-high-score\": \"lots\"}").unwrap();
        let mut store = FileStore::new(path.clone());
        assert_eq!(store.read(), 0);
        fs_err::write(&path, "not json").unwrap();
        assert_eq!(store.read(), 0);
        store.write(3).unwrap();
        assert_eq!(store.read(), 3);
    }

    #[test]
    fn write_replaces_unreadable_file() {
        let tmpdir = tempdir().unwrap();
        let path = tmpdir.path().join("highscore.json");
        fs_err::write(&path, "{\"other-game\": 99,").unwrap();
        let mut store = FileStore::new(path.clone());
        store.write(6).unwrap();
        assert_eq!(
            fs_err::read_to_string(&path).unwrap(),
            "{\"snake-high-score\":6}\n"
        );
    }

    #[test]
    fn negative_score_is_zero() {
        let tmpdir = tempdir().unwrap();
        let path = tmpdir.path().join("highscore.json");
        fs_err::write(&path, "{\"snake-high-score\": -4}").unwrap();
        assert_eq!(FileStore::new(path).read(), 0);
    }

    #[test]
    fn other_keys_preserved() {
        let tmpdir = tempdir().unwrap();
        let path = tmpdir.path().join("highscore.json");
        fs_err::write(&path, "{\"other-game\": 99, \"snake-high-score\": 5}\n").unwrap();
        let mut store = FileStore::new(path.clone());
        assert_eq!(store.read(), 5);
        store.write(8).unwrap();
        assert_eq!(
            fs_err::read_to_string(&path).unwrap(),
            "{\"other-game\":99,\"snake-high-score\":8}\n"
        );
    }

    #[test]
    fn memory_store() {
        let mut store = MemoryStore::new(4);
        assert_eq!(store.read(), 4);
        store.write(9).unwrap();
        assert_eq!(store.read(), 9);
    }

    #[test]
    fn boxed_store() {
        let mut store: Box<dyn HighScoreStore> = Box::new(MemoryStore::default());
        assert_eq!(store.read(), 0);
        store.write(2).unwrap();
        assert_eq!(store.read(), 2);
    }

    #[test]
    fn error_chain() {
        let e = LoadError::read(std::io::Error::other("disk on fire"));
        assert_eq!(
            ErrorChain(&e).to_string(),
            "failed to read high score file: disk on fire"
        );
    }
}
