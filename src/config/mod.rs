use crate::errors::{AppError, AppResult};
use crate::models::policy::DuplicatePolicy;
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory where a table per source video is created
    pub output_dir: String,
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
    #[serde(default = "default_history_depth")]
    pub history_depth: usize,
    #[serde(default = "default_tail_lines")]
    pub tail_lines: usize,
    /// Optional session start time (HHMMSS or HH:MM:SS)
    #[serde(default)]
    pub default_start_time: Option<String>,
    /// Active table; set by `init`, overridden by `--log`
    #[serde(default)]
    pub current_log: Option<String>,
}

fn default_history_depth() -> usize {
    100
}
fn default_tail_lines() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: Self::output_dir_default().to_string_lossy().to_string(),
            duplicate_policy: DuplicatePolicy::default(),
            history_depth: default_history_depth(),
            tail_lines: default_tail_lines(),
            default_start_time: None,
            current_log: None,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("keymark")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".keymark")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("keymark.conf")
    }

    pub fn output_dir_default() -> PathBuf {
        Self::config_dir().join("output")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))
    }

    pub fn save(&self) -> AppResult<()> {
        self.save_to(&Self::config_file())
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let yaml = serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))?;
        let mut file = fs::File::create(path)?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    /// Table used when `--log` is not given.
    pub fn active_log(&self) -> Option<PathBuf> {
        self.current_log.as_deref().map(expand_tilde)
    }

    /// `output_dir/<video stem>.csv`
    pub fn table_for_source(&self, source: &str) -> PathBuf {
        let stem = Path::new(source)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| source.to_string());

        expand_tilde(&self.output_dir).join(format!("{stem}.csv"))
    }
}
