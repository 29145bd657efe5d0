// Error types shared by the library modules. The binary and the UI layer
// wrap these in `anyhow` the same way they wrap terminal IO errors.

use reqwest::StatusCode;
use std::num::ParseIntError;
use std::path::PathBuf;

pub type Result<T, E = QueryError> = std::result::Result<T, E>;

/// Everything that can go wrong between reading the credentials and
/// decoding a response body.
#[derive(thiserror::Error, Debug)]
pub enum QueryError {
    /// A credential variable is unset or blank.
    #[error("missing credential: set `{0}` in the environment or in lock.env")]
    MissingCredential(&'static str),

    /// The env file exists but could not be read or parsed.
    #[error("could not load env file {path}: {source}")]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    /// `API_Endpoint` is not an absolute http(s) URL.
    #[error("invalid API endpoint `{endpoint}`: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// The key cannot be carried in an `Authorization` header.
    #[error("API key contains characters that are not allowed in an HTTP header")]
    InvalidApiKey,

    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Connection refused, DNS failure, reset mid-body and the like.
    #[error("request to the API failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("API responded with {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("API response was not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("{field} must be a non-negative whole number, got `{value}`")]
    InvalidNumber {
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
}
