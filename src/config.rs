//! Application-level configuration loaded from the environment (and an optional `.env` file).

use std::{env, fmt, path::PathBuf};

use tracing::info;

use crate::error::ConfigError;

/// Number of seats in the partnership.
pub const MAX_USERS: usize = 2;
/// Smallest accepted weekly goal.
pub const MIN_WEEKLY_GOAL: u32 = 1;
/// Largest accepted weekly goal.
pub const MAX_WEEKLY_GOAL: u32 = 7;

/// Environment variable holding the bot token.
const TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";
/// Value shipped in the sample `.env`; treated like a missing token.
const PLACEHOLDER_TOKEN: &str = "your_token_here";
/// Comma-separated usernames allowed to use the bot.
const WHITELIST_ENV: &str = "WHITELIST";
/// Environment variable that overrides [`DEFAULT_DATA_FILE`].
const DATA_FILE_ENV: &str = "SWEAT_DUPE_DATA_FILE";
/// Default location of the persisted bot state.
const DEFAULT_DATA_FILE: &str = "bot_data.json";
/// Port used by the health server when neither `PORT` nor `SERVER_PORT` is set.
const DEFAULT_PORT: u16 = 10000;

#[derive(Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    token: String,
    whitelist: Vec<String>,
    data_file: PathBuf,
    port: u16,
}

impl AppConfig {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(TOKEN_ENV)
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
            .ok_or(ConfigError::MissingEnvVar { var: TOKEN_ENV })?;
        if token == PLACEHOLDER_TOKEN {
            return Err(ConfigError::PlaceholderToken { var: TOKEN_ENV });
        }

        let whitelist = lookup(WHITELIST_ENV)
            .map(|raw| parse_whitelist(&raw))
            .unwrap_or_default();

        let data_file = lookup(DATA_FILE_ENV)
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

        let port = match lookup("PORT").or_else(|| lookup("SERVER_PORT")) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort { value: raw })?,
            None => DEFAULT_PORT,
        };

        if whitelist.is_empty() {
            info!("no whitelist configured; anyone can use the bot");
        } else {
            info!(count = whitelist.len(), "whitelist configured");
        }

        Ok(Self {
            token,
            whitelist,
            data_file,
            port,
        })
    }

    /// Bot API token.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Path of the JSON document holding the bot state.
    pub fn data_file(&self) -> &PathBuf {
        &self.data_file
    }

    /// Port the health server listens on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Whether a platform username may use the bot.
    ///
    /// An empty whitelist admits everyone; otherwise users without a username are refused and
    /// names are compared case-insensitively.
    pub fn is_whitelisted(&self, username: Option<&str>) -> bool {
        if self.whitelist.is_empty() {
            return true;
        }
        let Some(username) = username else {
            return false;
        };
        self.whitelist
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(username))
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("token", &"<redacted>")
            .field("whitelist", &self.whitelist)
            .field("data_file", &self.data_file)
            .field("port", &self.port)
            .finish()
    }
}

/// Split a comma-separated username list, dropping blanks and leading `@`.
fn parse_whitelist(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|entry| entry.trim().trim_start_matches('@'))
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}
