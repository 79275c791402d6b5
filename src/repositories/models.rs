use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use super::ReposError;

const BASE_FOR_PATHS: &str = "base_for_paths";
const TIMEOUT_SECS: &str = "timeout_secs";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// One catalogue endpoint as described in `indexes.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub(crate) name: String,
    pub(crate) url: String,
    #[serde(rename = "parameters")]
    pub(crate) other_parameters: Option<HashMap<String, String>>,
}

impl Repository {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Location of the Simplestreams download index.
    pub fn url(&self) -> &str {
        &self.url
    }

    fn parameter(&self, key: &str) -> Option<&str> {
        self.other_parameters
            .as_ref()
            .and_then(|params| params.get(key))
            .map(String::as_str)
    }

    /// Mirror root that item paths are relative to.
    pub fn base_for_paths(&self) -> Option<&str> {
        self.parameter(BASE_FOR_PATHS)
    }

    pub fn timeout(&self) -> Result<Duration, ReposError> {
        let Some(raw) = self.parameter(TIMEOUT_SECS) else {
            return Ok(DEFAULT_TIMEOUT);
        };

        raw.trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| ReposError::InvalidParameter {
                name: TIMEOUT_SECS.to_string(),
                value: raw.to_string(),
            })
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }
}
