//! Contact relay configuration
//!
//! Resolved once at startup from the process environment (after `.env` has
//! been loaded). Request handlers never read the environment themselves.

use std::time::Duration;

use super::ConfigError;

/// Timeout applied to the outbound form submission when none is configured
pub const DEFAULT_RELAY_TIMEOUT: Duration = Duration::from_secs(10);

const LINK_KEYS: [&str; 2] = ["CONTACT_FORM_LINK", "GOOGLE_FORM_LINK"];
const NAME_KEYS: [&str; 2] = ["CONTACT_FORM_FIELD_ID_NAME", "GOOGLE_FORM_FIELD_ID_NAME"];
const EMAIL_KEYS: [&str; 2] = ["CONTACT_FORM_FIELD_ID_EMAIL", "GOOGLE_FORM_FIELD_ID_EMAIL"];
const MESSAGE_KEYS: [&str; 2] = [
    "CONTACT_FORM_FIELD_ID_MESSAGE",
    "GOOGLE_FORM_FIELD_ID_MESSAGE",
];
const SOCIAL_KEYS: [&str; 2] = [
    "CONTACT_FORM_FIELD_ID_SOCIAL",
    "GOOGLE_FORM_FIELD_ID_SOCIAL",
];
const TIMEOUT_KEY: &str = "CONTACT_FORM_TIMEOUT_SECS";

/// Form field identifiers expected by the external collection endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub message: String,
    pub social: String,
}

/// Where and how contact submissions are forwarded
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub endpoint: String,
    pub fields: FormFields,
    pub timeout: Duration,
}

impl RelayConfig {
    /// Resolve from the process environment.
    ///
    /// Returns `Ok(None)` when no endpoint is configured at all; the relay then
    /// runs disabled and answers every submission with a configuration error.
    /// An endpoint without its field identifiers is rejected here.
    pub fn from_env() -> Result<Option<Self>, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve using an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Option<Self>, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let Some(endpoint) = first_set(&lookup, &LINK_KEYS) else {
            return Ok(None);
        };

        let fields = FormFields {
            name: require(&lookup, &NAME_KEYS)?,
            email: require(&lookup, &EMAIL_KEYS)?,
            message: require(&lookup, &MESSAGE_KEYS)?,
            social: require(&lookup, &SOCIAL_KEYS)?,
        };

        let timeout = match lookup(TIMEOUT_KEY) {
            Some(raw) if !raw.trim().is_empty() => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
            _ => DEFAULT_RELAY_TIMEOUT,
        };

        Ok(Some(Self {
            endpoint,
            fields,
            timeout,
        }))
    }
}

/// First non-blank value among `keys`
fn first_set<F>(lookup: &F, keys: &[&str]) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    keys.iter()
        .filter_map(|&key| lookup(key))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

fn require<F>(lookup: &F, keys: &[&'static str; 2]) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    first_set(lookup, keys).ok_or(ConfigError::MissingFormField(keys[0]))
}
