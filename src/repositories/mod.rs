mod models;

use std::{fs, path::Path};

use url::Url;

pub use models::Repository;

/// Repository list compiled into the binary.
const EMBEDDED_INDEXES: &str = include_str!("../../resources/indexes.json");

/// Name of the entry the fetcher reads its catalogue from.
pub const UBUNTU: &str = "ubuntu";

/// Catalogue endpoints, loaded once per invocation.
#[derive(Debug, Clone)]
pub struct Repositories {
    entries: Vec<Repository>,
}

impl Repositories {
    /// The endpoints shipped with the binary.
    pub fn embedded() -> Result<Self, ReposError> {
        Self::from_json_str(EMBEDDED_INDEXES)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ReposError> {
        let data = fs::read_to_string(path).map_err(ReposError::Io)?;
        Self::from_json_str(&data)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ReposError> {
        let entries: Vec<Repository> = serde_json::from_str(json).map_err(ReposError::Json)?;
        for entry in &entries {
            validate_url(entry.url())?;
        }
        Ok(Self { entries })
    }

    pub fn by_name(&self, name: &str) -> Option<&Repository> {
        self.entries.iter().find(|r| r.name() == name)
    }

    /// Owned copy of the named entry, failing when it is not configured.
    pub fn require(&self, name: &str) -> Result<Repository, ReposError> {
        self.by_name(name)
            .cloned()
            .ok_or_else(|| ReposError::UnknownRepository(name.to_string()))
    }
}

pub fn validate_url(url: &str) -> Result<(), ReposError> {
    Url::parse(url)
        .map(|_| ())
        .map_err(|source| ReposError::InvalidUrl {
            url: url.to_string(),
            source,
        })
}

/// ---- Errors ----
#[derive(thiserror::Error, Debug)]
pub enum ReposError {
    #[error("repository '{0}' is not configured")]
    UnknownRepository(String),
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("invalid value '{value}' for parameter '{name}'")]
    InvalidParameter { name: String, value: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
