use crate::ExerciseDbError;
use secrecy::SecretString;
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "https://exercisedb.p.rapidapi.com";
pub const DEFAULT_KEY_FILE: &str = "api_key.json";
pub const DEFAULT_DATA_DIR: &str = "data";

#[derive(Clone, Debug)]
pub struct Config {
    /// Absent key means requests go out without one and are likely
    /// rejected upstream; callers decide whether that is acceptable.
    pub api_key: Option<SecretString>,
    pub base_url: String,
    pub data_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, ExerciseDbError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function. This avoids mutating global environment in tests and keeps
    /// `from_env()` small and safe.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, ExerciseDbError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let api_key = match get("EXERCISEDB_API_KEY") {
            Some(key) => Some(SecretString::new(key.into())),
            None => {
                let key_file =
                    get("EXERCISEDB_KEY_FILE").unwrap_or_else(|| DEFAULT_KEY_FILE.into());
                load_key_file(Path::new(&key_file))?
            }
        };
        let base_url = get("EXERCISEDB_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());
        let data_dir = get("EXERCISEDB_DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.into());
        Ok(Self {
            api_key,
            base_url,
            data_dir: PathBuf::from(data_dir),
        })
    }
}

/// Read the API key from a JSON file of the form `{"key": "..."}`.
/// An absent file is not an error; the credential is simply missing.
pub fn load_key_file(path: &Path) -> Result<Option<SecretString>, ExerciseDbError> {
    if !path.is_file() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&contents)
        .map_err(|e| ExerciseDbError::Config(format!("reading {}: {e}", path.display())))?;
    Ok(value
        .get("key")
        .and_then(|v| v.as_str())
        .map(|key| SecretString::new(key.into())))
}
