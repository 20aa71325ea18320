use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeyStoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::ser::Error),
    /// Env-supplied keys are not deletable from the UI.
    #[error("환경 변수에서 로드된 {} API 키는 UI에서 삭제할 수 없습니다. .env 파일을 직접 수정해주세요.", .0.name())]
    EnvKeyNotDeletable(KeyKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    YouTube,
    Gemini,
}

impl KeyKind {
    pub fn name(self) -> &'static str {
        match self {
            KeyKind::YouTube => "YouTube",
            KeyKind::Gemini => "Gemini",
        }
    }
}

/// On-disk settings: API keys, the AI toggle, and the last two channel
/// queries. All fields optional and overwritable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoredSettings {
    #[serde(default)]
    pub youtube_api_key: Option<String>,
    #[serde(default)]
    pub gemini_api_key: Option<String>,
    #[serde(default)]
    pub use_ai: bool,
    #[serde(default)]
    pub last_channel_a: Option<String>,
    #[serde(default)]
    pub last_channel_b: Option<String>,
}

/// Resolved key state. Environment-supplied keys take precedence over the
/// stored ones and cannot be deleted through [`KeyStore::delete_key`].
pub struct KeyStore {
    settings: StoredSettings,
    env_youtube: Option<String>,
    env_gemini: Option<String>,
}

impl KeyStore {
    /// Load stored settings plus env overrides, trying .env files first.
    pub fn load() -> Self {
        load_env_files();
        let get = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Self {
            settings: load_settings(),
            env_youtube: get("YOUTUBE_API_KEY"),
            env_gemini: get("GEMINI_API_KEY"),
        }
    }

    pub fn key(&self, kind: KeyKind) -> Option<&str> {
        match kind {
            KeyKind::YouTube => self
                .env_youtube
                .as_deref()
                .or(self.settings.youtube_api_key.as_deref()),
            KeyKind::Gemini => self
                .env_gemini
                .as_deref()
                .or(self.settings.gemini_api_key.as_deref()),
        }
    }

    pub fn youtube_key(&self) -> Option<&str> {
        self.key(KeyKind::YouTube)
    }

    pub fn gemini_key(&self) -> Option<&str> {
        self.key(KeyKind::Gemini)
    }

    pub fn is_from_env(&self, kind: KeyKind) -> bool {
        match kind {
            KeyKind::YouTube => self.env_youtube.is_some(),
            KeyKind::Gemini => self.env_gemini.is_some(),
        }
    }

    pub fn use_ai(&self) -> bool {
        self.settings.use_ai
    }

    pub fn set_use_ai(&mut self, on: bool) -> Result<(), KeyStoreError> {
        self.settings.use_ai = on;
        save_settings(&self.settings)
    }

    /// Store a key, overwriting any previous stored value. An env override
    /// still wins until the env var is removed.
    pub fn set_key(&mut self, kind: KeyKind, key: String) -> Result<(), KeyStoreError> {
        let key = key.trim().to_owned();
        if key.is_empty() {
            return Ok(());
        }
        match kind {
            KeyKind::YouTube => self.settings.youtube_api_key = Some(key),
            KeyKind::Gemini => self.settings.gemini_api_key = Some(key),
        }
        save_settings(&self.settings)
    }

    pub fn delete_key(&mut self, kind: KeyKind) -> Result<(), KeyStoreError> {
        if self.is_from_env(kind) {
            return Err(KeyStoreError::EnvKeyNotDeletable(kind));
        }
        match kind {
            KeyKind::YouTube => self.settings.youtube_api_key = None,
            KeyKind::Gemini => self.settings.gemini_api_key = None,
        }
        save_settings(&self.settings)
    }

    pub fn last_channel_a(&self) -> Option<&str> {
        self.settings.last_channel_a.as_deref()
    }

    pub fn last_channel_b(&self) -> Option<&str> {
        self.settings.last_channel_b.as_deref()
    }

    /// Remember the queries that went into a search.
    pub fn remember_queries(&mut self, a: &str, b: Option<&str>) -> Result<(), KeyStoreError> {
        self.settings.last_channel_a = Some(a.to_owned());
        if let Some(b) = b {
            self.settings.last_channel_b = Some(b.to_owned());
        }
        save_settings(&self.settings)
    }
}

// ---------------------------------------------------------------------------
// Persistence
// ---------------------------------------------------------------------------

/// Return candidate .env paths in priority order.
fn env_file_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".config/tubescope/.env"));
    }
    paths.push(PathBuf::from(".env"));
    paths
}

/// Load .env files (earlier files have higher priority because dotenvy
/// does NOT overwrite existing env vars).
pub fn load_env_files() {
    for path in env_file_paths() {
        if path.exists() {
            let _ = dotenvy::from_path(&path);
        }
    }
}

fn settings_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config/tubescope/keys.toml"))
}

fn load_settings() -> StoredSettings {
    let Some(path) = settings_path() else {
        return StoredSettings::default();
    };
    let Ok(contents) = fs::read_to_string(&path) else {
        return StoredSettings::default();
    };
    toml::from_str(&contents).unwrap_or_default()
}

fn save_settings(settings: &StoredSettings) -> Result<(), KeyStoreError> {
    let Some(path) = settings_path() else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, toml::to_string_pretty(settings)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(settings: StoredSettings, env_youtube: Option<&str>) -> KeyStore {
        KeyStore {
            settings,
            env_youtube: env_youtube.map(str::to_owned),
            env_gemini: None,
        }
    }

    #[test]
    fn stored_settings_default_on_empty_file() {
        let settings: StoredSettings = toml::from_str("").unwrap();
        assert!(settings.youtube_api_key.is_none());
        assert!(!settings.use_ai);
    }

    #[test]
    fn env_key_takes_precedence_over_stored() {
        let store = store(
            StoredSettings {
                youtube_api_key: Some("stored".into()),
                ..StoredSettings::default()
            },
            Some("from-env"),
        );
        assert_eq!(store.youtube_key(), Some("from-env"));
        assert!(store.is_from_env(KeyKind::YouTube));
    }

    #[test]
    fn env_key_is_not_deletable() {
        let mut store = store(StoredSettings::default(), Some("from-env"));
        let err = store.delete_key(KeyKind::YouTube).unwrap_err();
        assert!(matches!(err, KeyStoreError::EnvKeyNotDeletable(KeyKind::YouTube)));
        assert!(err.to_string().contains("YouTube"));
    }

    #[test]
    fn stored_key_resolves_without_env() {
        let store = store(
            StoredSettings {
                gemini_api_key: Some("stored-gemini".into()),
                ..StoredSettings::default()
            },
            None,
        );
        assert_eq!(store.gemini_key(), Some("stored-gemini"));
        assert!(!store.is_from_env(KeyKind::Gemini));
    }
}
