use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::youtube::videos::SortOrder;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_tick_rate")]
    pub tick_rate_fps: f64,
    #[serde(default = "default_max_videos")]
    pub max_videos: u32,
    #[serde(default)]
    pub default_sort: SortOrder,
}

fn default_tick_rate() -> f64 {
    30.0
}

fn default_max_videos() -> u32 {
    10
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            tick_rate_fps: default_tick_rate(),
            max_videos: default_max_videos(),
            default_sort: SortOrder::default(),
        }
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config/tubescope/config.toml"))
}

pub fn load_config() -> AppConfig {
    let Some(path) = config_path() else {
        return AppConfig::default();
    };

    let Ok(contents) = fs::read_to_string(&path) else {
        return AppConfig::default();
    };

    toml::from_str(&contents).unwrap_or_default()
}
