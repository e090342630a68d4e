use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_shift_start")]
    pub default_shift_start: String,
    #[serde(default = "default_shift_end")]
    pub default_shift_end: String,
    #[serde(default = "default_merge_tolerance")]
    pub merge_tolerance_min: i64,
    #[serde(default = "default_flag_threshold")]
    pub flag_threshold_min: i64,
    #[serde(default = "default_lookback_days")]
    pub lookback_days: usize,
}

fn default_shift_start() -> String {
    "08:30".to_string()
}
fn default_shift_end() -> String {
    "17:30".to_string()
}
fn default_merge_tolerance() -> i64 {
    crate::core::merge::MERGE_TOLERANCE_MIN
}
fn default_flag_threshold() -> i64 {
    60
}
fn default_lookback_days() -> usize {
    3
}

impl Default for Config {
    fn default() -> Self {
        let db_path = Self::database_file();
        Self {
            database: db_path.to_string_lossy().to_string(),
            default_shift_start: default_shift_start(),
            default_shift_end: default_shift_end(),
            merge_tolerance_min: default_merge_tolerance(),
            flag_threshold_min: default_flag_threshold(),
            lookback_days: default_lookback_days(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("shoptally")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".shoptally")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("shoptally.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("shoptally.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> Self {
        let path = Self::config_file();

        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => serde_yaml::from_str(&content).unwrap_or_default(),
                Err(_) => Config::default(),
            }
        } else {
            Config::default()
        }
    }

    /// Names of config fields missing from the on-disk file (serde would
    /// silently default them; `config --check` reports them instead).
    pub fn missing_fields() -> io::Result<Vec<String>> {
        let path = Self::config_file();
        let content = fs::read_to_string(&path)?;

        let yaml: serde_yaml::Value = serde_yaml::from_str(&content)
            .map_err(|e| io::Error::other(format!("invalid YAML: {}", e)))?;

        let expected = [
            "database",
            "default_shift_start",
            "default_shift_end",
            "merge_tolerance_min",
            "flag_threshold_min",
            "lookback_days",
        ];

        let mut missing = Vec::new();
        if let Some(map) = yaml.as_mapping() {
            for field in expected {
                let key = serde_yaml::Value::String(field.to_string());
                if !map.contains_key(&key) {
                    missing.push(field.to_string());
                }
            }
        }

        Ok(missing)
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> io::Result<()> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            let p = std::path::Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            Self::database_file()
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| io::Error::other(format!("serialize error: {}", e)))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        // Create empty DB file if not exists
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        println!("✅ Database:    {:?}", db_path);

        Ok(())
    }
}
