use std::fs::File;
use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings file not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("unknown timezone '{0}', expected an IANA identifier such as America/New_York")]
    UnknownTimezone(String),
}

/// Raw shape of the JSON settings document. Paths and timezones are validated
/// when this is turned into a `Settings`.
#[derive(Debug, Deserialize)]
struct RawSettings {
    input_folder: String,
    output_folder: String,
    input_file: String,
    output_file: String,
    default_timezone: String,
    output_timezone: String,
    custom_column_headers: Vec<String>,
    #[serde(default = "default_timestamp_columns")]
    timestamp_columns: Vec<String>,
    #[serde(default = "default_custom_data_column")]
    custom_data_column: String,
    app_id: i64,
}

fn default_timestamp_columns() -> Vec<String> {
    vec![
        "timestamp".to_string(),
        "last_attributed_touch_timestamp".to_string(),
    ]
}

fn default_custom_data_column() -> String {
    "custom_data".to_string()
}

/// Everything a run needs, loaded once at startup and never mutated.
#[derive(Debug)]
pub struct Settings {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub default_timezone: Tz,
    pub output_timezone: Tz,
    pub custom_column_headers: Vec<String>,
    pub timestamp_columns: Vec<String>,
    pub custom_data_column: String,
    pub app_id: i64,
}

impl Settings {
    /// Reads and validates the settings document. Folder and file names are
    /// joined into full paths relative to the working directory.
    pub fn load(path: &Path) -> Result<Settings, SettingsError> {
        if !path.is_file() {
            return Err(SettingsError::NotFound(path.to_path_buf()));
        }

        let file = File::open(path)?;
        let raw: RawSettings = serde_json::from_reader(file)?;

        Ok(Settings {
            input_path: Path::new(&raw.input_folder).join(&raw.input_file),
            output_path: Path::new(&raw.output_folder).join(&raw.output_file),
            default_timezone: parse_timezone(&raw.default_timezone)?,
            output_timezone: parse_timezone(&raw.output_timezone)?,
            custom_column_headers: raw.custom_column_headers,
            timestamp_columns: raw.timestamp_columns,
            custom_data_column: raw.custom_data_column,
            app_id: raw.app_id,
        })
    }
}

fn parse_timezone(name: &str) -> Result<Tz, SettingsError> {
    name.parse()
        .map_err(|_| SettingsError::UnknownTimezone(name.to_string()))
}
