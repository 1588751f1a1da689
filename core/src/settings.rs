//! Environment-backed configuration for the PetFriends suite.
//!
//! Values are read with strict UTF-8 validation; a variable that is set but
//! empty is rejected rather than treated as absent.

use thiserror::Error;

use crate::types::Credentials;

pub const DEFAULT_BASE_URL: &str = "https://petfriends.skillfactory.ru";

/// Environment keys read by `Settings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsEnv {
    BaseUrl,
    Email,
    Password,
}

impl SettingsEnv {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BaseUrl => "PETFRIENDS_BASE_URL",
            Self::Email => "PETFRIENDS_EMAIL",
            Self::Password => "PETFRIENDS_PASSWORD",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("{0} must be valid UTF-8")]
    InvalidUtf8(&'static str),
    #[error("{0} must not be empty")]
    Empty(&'static str),
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("{name} must be an http(s) URL, got {value:?}")]
    InvalidUrl { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub base_url: String,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            email: None,
            password: None,
        }
    }
}

impl Settings {
    /// Load from process environment variables.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|name| {
            std::env::var_os(name).map(|raw| raw.into_string().map_err(|_| ()))
        })
    }

    /// Load from an arbitrary lookup. `Some(Err(()))` marks a non-UTF-8 value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<Result<String, ()>>,
    {
        let read = |key: SettingsEnv| -> Result<Option<String>, SettingsError> {
            let name = key.as_str();
            match lookup(name) {
                None => Ok(None),
                Some(Err(())) => Err(SettingsError::InvalidUtf8(name)),
                Some(Ok(value)) if value.trim().is_empty() => Err(SettingsError::Empty(name)),
                Some(Ok(value)) => Ok(Some(value)),
            }
        };

        let base_url = match read(SettingsEnv::BaseUrl)? {
            Some(value) => validate_url(SettingsEnv::BaseUrl.as_str(), value)?,
            None => DEFAULT_BASE_URL.to_string(),
        };
        Ok(Self {
            base_url,
            email: read(SettingsEnv::Email)?,
            password: read(SettingsEnv::Password)?,
        })
    }

    /// The configured account. Both email and password must be present.
    pub fn credentials(&self) -> Result<Credentials, SettingsError> {
        let email = self
            .email
            .clone()
            .ok_or(SettingsError::Missing(SettingsEnv::Email.as_str()))?;
        let password = self
            .password
            .clone()
            .ok_or(SettingsError::Missing(SettingsEnv::Password.as_str()))?;
        Ok(Credentials::new(email, password))
    }
}

fn validate_url(name: &'static str, value: String) -> Result<String, SettingsError> {
    match url::Url::parse(value.trim()) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(value.trim().to_string()),
        _ => Err(SettingsError::InvalidUrl { name, value }),
    }
}
