#![forbid(unsafe_code)]

use std::{
    collections::HashMap,
    env, fs,
    path::{Path, PathBuf},
};

use crate::error::{Result, StudioError};

pub const DEFAULT_ENV_PATH: &str = ".env";
pub const DEFAULT_CLIENT_SECRET_PATH: &str = "client_secret.json";
pub const DEFAULT_TITLE_PATH: &str = "title.txt";
pub const DEFAULT_DESCRIPTION_PATH: &str = "description.txt";
pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com/youtube/v3";

/// Everything a run needs to know about where its inputs live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub client_secret: PathBuf,
    pub title_file: PathBuf,
    pub description_file: PathBuf,
    pub api_base: String,
}

#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub client_secret: Option<PathBuf>,
    pub title_file: Option<PathBuf>,
    pub description_file: Option<PathBuf>,
    pub api_base: Option<String>,
    pub env_path: Option<PathBuf>,
}

/// Resolves settings with precedence: override, process environment, `.env`
/// file, built-in default.
pub fn resolve_settings(overrides: SettingsOverrides) -> Result<Settings> {
    let env_path = overrides
        .env_path
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ENV_PATH));
    let file_vars = read_env_file(&env_path)?;
    Ok(build_settings(&file_vars, env_var_string, overrides))
}

fn build_settings(
    file_vars: &HashMap<String, String>,
    env_lookup: impl Fn(&str) -> Option<String>,
    overrides: SettingsOverrides,
) -> Settings {
    let path_setting = |value: Option<PathBuf>, key: &str, default: &str| {
        value
            .filter(|path| !path.as_os_str().is_empty())
            .or_else(|| lookup_value(key, file_vars, &env_lookup).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(default))
    };

    let client_secret = path_setting(
        overrides.client_secret,
        "STUDIO_CLIENT_SECRET",
        DEFAULT_CLIENT_SECRET_PATH,
    );
    let title_file = path_setting(overrides.title_file, "STUDIO_TITLE_FILE", DEFAULT_TITLE_PATH);
    let description_file = path_setting(
        overrides.description_file,
        "STUDIO_DESCRIPTION_FILE",
        DEFAULT_DESCRIPTION_PATH,
    );
    let api_base = overrides
        .api_base
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .or_else(|| lookup_value("YOUTUBE_API_BASE", file_vars, &env_lookup))
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
        .trim_end_matches('/')
        .to_string();

    Settings {
        client_secret,
        title_file,
        description_file,
        api_base,
    }
}

fn env_var_string(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn lookup_value(
    key: &str,
    file_vars: &HashMap<String, String>,
    env_lookup: &impl Fn(&str) -> Option<String>,
) -> Option<String> {
    env_lookup(key).or_else(|| {
        file_vars
            .get(key)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    })
}

/// Parses a dotenv-style file. A missing file yields an empty map.
pub fn read_env_file(path: &Path) -> Result<HashMap<String, String>> {
    let mut vars = HashMap::new();
    if !path.exists() {
        return Ok(vars);
    }
    let content = fs::read_to_string(path).map_err(|err| StudioError::io(path, err))?;
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let line = trimmed.strip_prefix("export ").unwrap_or(trimmed);
        let Some((key, value_raw)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        let value = value_raw.trim();
        let value = value
            .strip_prefix('"')
            .and_then(|value| value.strip_suffix('"'))
            .or_else(|| {
                value
                    .strip_prefix('\'')
                    .and_then(|value| value.strip_suffix('\''))
            })
            .unwrap_or(value);
        vars.insert(key.to_string(), value.to_string());
    }
    Ok(vars)
}
