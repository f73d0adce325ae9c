use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::{Result, TicklistError};

use super::StorageBackend;

/// Local file-based storage with atomic writes. Each key lives in its own
/// `<dir>/storage/<key>.json` file.
pub struct LocalStorage {
    main_app_dir: PathBuf,
    storage_dir: PathBuf,
    temp_dir: PathBuf,
}

impl LocalStorage {
    pub fn new(data_dir: &Path) -> Result<Self> {
        let main_app_dir = data_dir.to_path_buf();
        let storage_dir = main_app_dir.join("storage");
        let temp_dir = main_app_dir.join(".temp");

        let storage = Self {
            main_app_dir,
            storage_dir,
            temp_dir,
        };

        storage.ensure_directories()?;

        Ok(storage)
    }

    /// Directory the storage was opened on.
    pub fn data_dir(&self) -> &Path {
        &self.main_app_dir
    }

    fn ensure_directories(&self) -> Result<()> {
        if !self.main_app_dir.exists() {
            fs::create_dir_all(&self.main_app_dir)?;
        }
        if !self.storage_dir.exists() {
            fs::create_dir(&self.storage_dir)?;
        }
        if !self.temp_dir.exists() {
            fs::create_dir(&self.temp_dir)?;
        }

        self.clean_temp_dir()?;

        Ok(())
    }

    /// Remove temp files left behind by an interrupted write.
    fn clean_temp_dir(&self) -> Result<()> {
        if self.temp_dir.exists() {
            for entry in fs::read_dir(&self.temp_dir)? {
                let entry = entry?;
                fs::remove_file(entry.path())?;
            }
        }
        Ok(())
    }

    fn key_file(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(TicklistError::Storage(format!("invalid storage key: {key:?}")));
        }
        Ok(self.storage_dir.join(format!("{key}.json")))
    }

    fn get_temp_file(&self, key: &str) -> PathBuf {
        let random_string = Uuid::new_v4().simple().to_string()[..8].to_string();
        self.temp_dir
            .join(format!("{}.TEMP-{}.json", key, random_string))
    }
}

impl StorageBackend for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let file = self.key_file(key)?;
        if !file.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&file)?;
        Ok(Some(content))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let file = self.key_file(key)?;
        let temp_file = self.get_temp_file(key);

        fs::write(&temp_file, value)?;
        fs::rename(&temp_file, &file)?;

        Ok(())
    }
}
