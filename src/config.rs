//! Demo configuration loaded from `config.toml`.
//!
//! Every key is optional. Problems reading the file are reported as warnings
//! and the built-in defaults are used instead.

use directories::ProjectDirs;
use handysheet_core::ValueInputOption;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const MAX_CONFIG_FILE_BYTES: u64 = 65_536;

pub const DEFAULT_SPREADSHEET_ID: &str = "demo-spreadsheet";
pub const DEFAULT_SHEET: &str = "Sheet1";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    spreadsheet_id: Option<String>,
    sheet: Option<String>,
    value_input_option: Option<String>,
    log_level: Option<String>,
}

/// Resolved settings for a demo run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub spreadsheet_id: String,
    pub sheet: String,
    pub value_input_option: ValueInputOption,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            spreadsheet_id: DEFAULT_SPREADSHEET_ID.to_string(),
            sheet: DEFAULT_SHEET.to_string(),
            value_input_option: ValueInputOption::default(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// Load settings from `config_file`, or from the user config directory when
/// no file is given. Returns the settings plus any warnings.
pub fn load_settings(config_file: Option<&PathBuf>) -> (Settings, Vec<String>) {
    let mut warnings: Vec<String> = Vec::new();
    let config_path = config_file.cloned().or_else(user_config_path);

    let file = match config_path.as_ref() {
        Some(path) if path.exists() => read_config(path, &mut warnings),
        Some(path) if config_file.is_some() => {
            warnings.push(format!("Config file not found: {}", path.display()));
            None
        }
        _ => None,
    };

    let settings = match file {
        Some(file) => apply(file, &mut warnings),
        None => Settings::default(),
    };
    (settings, warnings)
}

/// Parse settings from TOML text.
pub fn parse_settings(content: &str) -> Result<(Settings, Vec<String>), toml::de::Error> {
    let file = toml::from_str::<ConfigFile>(content)?;
    let mut warnings = Vec::new();
    let settings = apply(file, &mut warnings);
    Ok((settings, warnings))
}

fn read_config(path: &Path, warnings: &mut Vec<String>) -> Option<ConfigFile> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.len() > MAX_CONFIG_FILE_BYTES => {
            warnings.push(format!(
                "Refusing to read {}: file too large ({} bytes, max {})",
                path.display(),
                meta.len(),
                MAX_CONFIG_FILE_BYTES
            ));
            None
        }
        Ok(_) => match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<ConfigFile>(&content) {
                Ok(parsed) => Some(parsed),
                Err(err) => {
                    warnings.push(format!("Failed to parse {}: {}", path.display(), err));
                    None
                }
            },
            Err(err) => {
                warnings.push(format!("Failed to read {}: {}", path.display(), err));
                None
            }
        },
        Err(err) => {
            warnings.push(format!(
                "Failed to read metadata for {}: {}",
                path.display(),
                err
            ));
            None
        }
    }
}

fn apply(file: ConfigFile, warnings: &mut Vec<String>) -> Settings {
    let mut settings = Settings::default();
    if let Some(id) = non_empty(file.spreadsheet_id) {
        settings.spreadsheet_id = id;
    }
    if let Some(sheet) = non_empty(file.sheet) {
        settings.sheet = sheet;
    }
    if let Some(option) = file.value_input_option {
        match option.parse::<ValueInputOption>() {
            Ok(parsed) => settings.value_input_option = parsed,
            Err(err) => warnings.push(format!("{}; using {}", err, settings.value_input_option)),
        }
    }
    if let Some(level) = non_empty(file.log_level) {
        settings.log_level = level;
    }
    settings
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn user_config_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("", "", "handysheet")?;
    let mut path = proj.config_dir().to_path_buf();
    path.push("config.toml");
    Some(path)
}
