use std::{fmt, fs, path::Path};

use serde::Deserialize;
use validator::Validate;

use crate::error::{Error, Result};

pub const API_TOKEN_VAR: &str = "CF_DNS_API_TOKEN";
pub const ZONE_ID_VAR: &str = "CF_DNS_ZONE_ID";
pub const RECORD_ID_VAR: &str = "CF_DNS_RECORD_ID";

const REDACTED: &str = "***";

/// Cloudflare API token. Never printed: `Debug` and `redact` both mask it.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Replaces every occurrence of the token in `text` with `***`.
    pub fn redact(&self, text: &str) -> String {
        if self.0.is_empty() {
            return text.to_string();
        }
        text.replace(&self.0, REDACTED)
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiToken({})", REDACTED)
    }
}

/// Raw settings as read from the config file and the environment, before
/// presence checks.
#[derive(Default, Deserialize, Validate)]
pub struct RawCredentials {
    #[serde(default)]
    #[validate(length(min = 1, message = "API token cannot be empty"))]
    pub api_token: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Zone ID cannot be empty"))]
    pub zone_id: String,

    #[serde(default)]
    pub record_id: Option<String>,
}

impl fmt::Debug for RawCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawCredentials")
            .field("api_token", &REDACTED)
            .field("zone_id", &self.zone_id)
            .field("record_id", &self.record_id)
            .finish()
    }
}

// Field name to variable name, in the order problems are reported.
const REQUIRED: [(&str, &str); 2] = [("api_token", API_TOKEN_VAR), ("zone_id", ZONE_ID_VAR)];

impl RawCredentials {
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| Error::config_file(path, e))?;
        serde_yaml::from_str(&contents).map_err(|e| Error::config_file(path, e))
    }

    /// Overlays values from `lookup` (normally the process environment).
    /// Unset and empty variables leave the current value alone.
    pub fn merge_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());

        if let Some(token) = var(API_TOKEN_VAR) {
            self.api_token = token;
        }
        if let Some(zone_id) = var(ZONE_ID_VAR) {
            self.zone_id = zone_id;
        }
        if let Some(record_id) = var(RECORD_ID_VAR) {
            self.record_id = Some(record_id);
        }
        self
    }

    /// Checks that every required value is present, reporting all of the
    /// missing ones at once.
    pub fn into_credentials(self) -> Result<Credentials> {
        if let Err(errors) = self.validate() {
            let failed = errors.field_errors();
            let missing = REQUIRED
                .iter()
                .filter(|(field, _)| failed.keys().any(|key| *key == *field))
                .map(|(_, var)| *var)
                .collect();
            return Err(Error::MissingConfig(missing));
        }

        Ok(Credentials {
            api_token: ApiToken::new(self.api_token),
            zone_id: self.zone_id,
            record_id: self.record_id.filter(|id| !id.is_empty()),
        })
    }
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub api_token: ApiToken,
    pub zone_id: String,
    /// Skips the record lookup when set.
    pub record_id: Option<String>,
}

impl Credentials {
    /// Loads the optional YAML file, then the `CF_DNS_*` environment
    /// variables on top of it.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let raw = match config_file {
            Some(path) => RawCredentials::from_yaml_file(path)?,
            None => RawCredentials::default(),
        };
        raw.merge_env(|name| std::env::var(name).ok())
            .into_credentials()
    }
}
