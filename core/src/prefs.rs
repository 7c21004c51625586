use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::warn;

pub const BOOT_SKIP_KEY: &str = "portfolio_boot_skipped_v1";
pub const AUDIO_KEY: &str = "portfolio_audio_on_v1";

/// String key/value preferences persisted as a JSON object. Reads never
/// fail: a missing or unreadable file degrades to defaults so the console
/// keeps booting. Writes go through to disk immediately.
pub struct PrefStore {
    path: PathBuf,
    data: RwLock<BTreeMap<String, String>>,
}

impl PrefStore {
    pub fn open(path: PathBuf) -> Self {
        let data = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(map) => map,
                Err(err) => {
                    warn!(
                        "prefs file {} is corrupt ({err}), starting from defaults",
                        path.display()
                    );
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };

        Self {
            path,
            data: RwLock::new(data),
        }
    }

    pub fn default_path() -> PathBuf {
        ProjectDirs::from("com", "folio", "folio")
            .map(|dirs| dirs.config_dir().join("prefs.json"))
            .unwrap_or_else(|| PathBuf::from("folio_prefs.json"))
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.data.read().unwrap().get(key).cloned()
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut guard = self.data.write().unwrap();
        guard.insert(key.to_string(), value.to_string());
        self.persist(&guard)
    }

    fn persist(&self, data: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(&self.path, serialized)
            .with_context(|| format!("failed to write prefs to {}", self.path.display()))
    }

    pub fn boot_skipped(&self) -> bool {
        self.get(BOOT_SKIP_KEY).as_deref() == Some("1")
    }

    /// Audio defaults to on when the key is absent.
    pub fn audio_on(&self) -> bool {
        self.get(AUDIO_KEY).as_deref() != Some("0")
    }

    pub fn set_boot_skipped(&self, skipped: bool) -> Result<()> {
        self.set(BOOT_SKIP_KEY, if skipped { "1" } else { "0" })
    }

    pub fn set_audio_on(&self, on: bool) -> Result<()> {
        self.set(AUDIO_KEY, if on { "1" } else { "0" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> PrefStore {
        PrefStore::open(dir.path().join("prefs.json"))
    }

    #[test]
    fn absent_keys_default_to_not_skipped_and_audio_on() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = store_in(&dir);
        assert!(!prefs.boot_skipped());
        assert!(prefs.audio_on());
        assert_eq!(prefs.get(BOOT_SKIP_KEY), None);
    }

    #[test]
    fn set_is_visible_to_subsequent_gets() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = store_in(&dir);
        prefs.set_boot_skipped(true).unwrap();
        assert!(prefs.boot_skipped());
        assert_eq!(prefs.get(BOOT_SKIP_KEY).as_deref(), Some("1"));
    }

    #[test]
    fn values_survive_a_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let prefs = store_in(&dir);
            prefs.set_boot_skipped(true).unwrap();
            prefs.set_audio_on(false).unwrap();
        }
        let prefs = store_in(&dir);
        assert!(prefs.boot_skipped());
        assert!(!prefs.audio_on());
    }

    #[test]
    fn toggling_audio_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = store_in(&dir);
        assert!(prefs.audio_on());

        prefs.set_audio_on(!prefs.audio_on()).unwrap();
        assert!(!prefs.audio_on());
        assert_eq!(prefs.get(AUDIO_KEY).as_deref(), Some("0"));

        prefs.set_audio_on(!prefs.audio_on()).unwrap();
        assert!(prefs.audio_on());
        assert_eq!(prefs.get(AUDIO_KEY).as_deref(), Some("1"));
    }

    #[test]
    fn corrupt_file_degrades_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "not json {").unwrap();

        let prefs = PrefStore::open(path);
        assert!(!prefs.boot_skipped());
        assert!(prefs.audio_on());
    }

    #[test]
    fn last_write_wins() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = store_in(&dir);
        prefs.set(BOOT_SKIP_KEY, "1").unwrap();
        prefs.set(BOOT_SKIP_KEY, "0").unwrap();
        assert!(!prefs.boot_skipped());
    }
}
