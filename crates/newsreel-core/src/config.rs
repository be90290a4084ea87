use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that overrides `api.api_key`
pub const API_KEY_ENV: &str = "NEWSDATA_API_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// newsdata.io API base URL
    #[serde(default = "default_api_base_url")]
    pub base_url: String,
    /// newsdata.io API key
    #[serde(default)]
    pub api_key: Option<String>,
    /// Languages requested for listings (e.g., "en", "hi")
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    /// Number of articles requested for the breaking news carousel
    #[serde(default = "default_breaking_size")]
    pub breaking_size: u32,
    /// Number of articles requested for the headline list
    #[serde(default = "default_headline_size")]
    pub headline_size: u32,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
    /// HTTP proxy URL (e.g., "http://127.0.0.1:7890" or "socks5://127.0.0.1:1080")
    #[serde(default)]
    pub proxy_url: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_base_url(),
            api_key: None,
            languages: default_languages(),
            breaking_size: default_breaking_size(),
            headline_size: default_headline_size(),
            request_timeout_secs: default_timeout(),
            proxy_url: None,
        }
    }
}

/// Easing curve used for animated carousel transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump at the end of the transition
    None,
    Linear,
    #[default]
    Cubic,
    Quintic,
    /// Exponential ease-out
    EaseOut,
}

/// Breaking news carousel behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Autoplay period in milliseconds
    #[serde(default = "default_autoplay_interval")]
    pub autoplay_interval_ms: u64,
    /// Duration of a smooth page transition in milliseconds (0 = instant)
    #[serde(default = "default_transition_ms")]
    pub transition_ms: u64,
    /// Easing curve for page transitions
    #[serde(default)]
    pub easing: EasingType,
    /// Upper bound on how many copies of the article list are materialized
    #[serde(default = "default_max_window_copies")]
    pub max_window_copies: usize,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            autoplay_interval_ms: default_autoplay_interval(),
            transition_ms: default_transition_ms(),
            easing: EasingType::default(),
            max_window_copies: default_max_window_copies(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while a carousel transition is running
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("newsreel")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_api_base_url() -> String {
    "https://newsdata.io/api/1".to_string()
}

fn default_languages() -> Vec<String> {
    vec!["en".to_string(), "hi".to_string()]
}

fn default_breaking_size() -> u32 {
    5
}

fn default_headline_size() -> u32 {
    10
}

fn default_timeout() -> u64 {
    30
}

fn default_autoplay_interval() -> u64 {
    5000
}

fn default_transition_ms() -> u64 {
    300
}

fn default_max_window_copies() -> usize {
    64
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `config_path`, falling back to defaults when
    /// the file is missing
    pub fn load_from(config_path: &Path) -> crate::Result<Self> {
        let mut config: Self = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?
        } else {
            Self::default()
        };

        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                config.api.api_key = Some(key);
            }
        }

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> crate::Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/newsreel/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("newsreel")
            .join("config.toml")
    }

    /// Get the database file path
    pub fn database_path(&self) -> PathBuf {
        self.data_dir().join("newsreel.db")
    }

    /// Get the log file path used while the TUI owns the terminal
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("newsreel.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}
