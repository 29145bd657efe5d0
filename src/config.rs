// Credential loading. The API key and endpoint are read once at start-up
// and handed to `ApiClient::new` by reference; nothing here is global.

use crate::error::{QueryError, Result};
use log::debug;
use std::fmt;
use std::path::PathBuf;
use url::Url;

pub const API_KEY_VAR: &str = "Pro_API_Key";
pub const ENDPOINT_VAR: &str = "API_Endpoint";

/// Explicit env file location. When set, a missing file is an error.
pub const ENV_FILE_OVERRIDE_VAR: &str = "COMPANY_QUERY_ENV_FILE";

const ENV_FILE_NAME: &str = "lock.env";
const APP_CONFIG_DIR: &str = "company-query";

/// API key and GraphQL endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub endpoint: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl Credentials {
    /// Load `lock.env` (if any) into the process environment, then read
    /// both credentials from it. Variables already exported win over the
    /// file.
    pub fn load() -> Result<Self> {
        let explicit = std::env::var_os(ENV_FILE_OVERRIDE_VAR).map(PathBuf::from);
        if let Some(path) = load_env_file(explicit, &env_file_candidates())? {
            debug!("loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build credentials from an arbitrary key lookup. Blank values count
    /// as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &'static str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or(QueryError::MissingCredential(key))
        };
        let api_key = read(API_KEY_VAR)?;
        let endpoint = read(ENDPOINT_VAR)?;
        validate_endpoint(&endpoint)?;
        debug!("using GraphQL endpoint {}", endpoint);
        Ok(Credentials { api_key, endpoint })
    }
}

fn validate_endpoint(endpoint: &str) -> Result<()> {
    let invalid = |reason: String| QueryError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason,
    };
    let url = Url::parse(endpoint).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(format!("unsupported scheme `{}`", other))),
    }
}

/// Apply `explicit` if given (it must exist), otherwise the first of
/// `candidates` that exists. Returns the path that was applied.
fn load_env_file(explicit: Option<PathBuf>, candidates: &[PathBuf]) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        return match dotenvy::from_path(&path) {
            Ok(()) => Ok(Some(path)),
            Err(source) => Err(QueryError::EnvFile { path, source }),
        };
    }

    for path in candidates {
        match dotenvy::from_path(path) {
            Ok(()) => return Ok(Some(path.clone())),
            Err(e) if e.not_found() => continue,
            Err(source) => {
                return Err(QueryError::EnvFile {
                    path: path.clone(),
                    source,
                })
            }
        }
    }
    Ok(None)
}

/// `./lock.env`, then `<config dir>/company-query/lock.env`.
fn env_file_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(ENV_FILE_NAME)];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join(APP_CONFIG_DIR).join(ENV_FILE_NAME));
    }
    candidates
}
