//! Process-wide configuration read once from the environment.

use std::env;
use std::time::Duration;

use secrecy::SecretString;
use tracing::warn;

use crate::error::ConfigError;
use crate::llm::retry::DEFAULT_MAX_ATTEMPTS;

pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
pub const BASE_URL_VAR: &str = "OPENAI_BASE_URL";
pub const MODEL_VAR: &str = "MODEL_NAME";
pub const PROMPT_VERSION_VAR: &str = "PROMPT_VERSION";
pub const LANGUAGE_VAR: &str = "AI_COMMIT_LANGUAGE";
pub const TIMEOUT_VAR: &str = "AI_COMMIT_TIMEOUT";
pub const MAX_ATTEMPTS_VAR: &str = "AI_COMMIT_MAX_ATTEMPTS";

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_PROMPT_VERSION: &str = "prompt_A";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Locale variables consulted for the default language, highest priority first.
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_CTYPE", "LANG"];

/// Provider credentials and generation defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: SecretString,
    pub base_url: String,
    pub model: String,
    pub prompt_version: String,
    pub language: String,
    pub timeout: Duration,
    pub max_attempts: u32,
}

impl Config {
    /// Read configuration from environment variables.
    ///
    /// Fails if `OPENAI_API_KEY` is unset or empty; everything else has a
    /// default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = non_empty_var(API_KEY_VAR).ok_or(ConfigError::MissingVar(API_KEY_VAR))?;

        Ok(Self {
            api_key: SecretString::from(api_key),
            base_url: non_empty_var(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: non_empty_var(MODEL_VAR).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            prompt_version: non_empty_var(PROMPT_VERSION_VAR)
                .unwrap_or_else(|| DEFAULT_PROMPT_VERSION.to_string()),
            language: non_empty_var(LANGUAGE_VAR).unwrap_or_else(default_language),
            timeout: Duration::from_secs(parse_var(TIMEOUT_VAR, DEFAULT_TIMEOUT_SECS)),
            max_attempts: parse_var(MAX_ATTEMPTS_VAR, DEFAULT_MAX_ATTEMPTS),
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parse a numeric variable, warning and falling back on invalid values.
fn parse_var<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display + Copy,
{
    match non_empty_var(key) {
        Some(v) => match v.trim().parse::<T>() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!("Invalid {} value '{}', using default {}", key, v, default);
                default
            }
        },
        None => default,
    }
}

/// Derive the default output language from the process locale.
///
/// `zh_CN.UTF-8` becomes `zh`; `C`, `POSIX` or no locale at all becomes `en`.
pub fn default_language() -> String {
    let locale = LOCALE_VARS.iter().find_map(|key| non_empty_var(key));

    let Some(locale) = locale else {
        return "en".to_string();
    };

    let lang = locale
        .split(['_', '.', '@', '-'])
        .next()
        .unwrap_or_default()
        .trim()
        .to_lowercase();

    match lang.as_str() {
        "" | "c" | "posix" => "en".to_string(),
        _ => lang,
    }
}
