use serde::Deserialize;

use super::lenient;

#[derive(Debug, Default, Deserialize)]
pub struct Item {
    #[serde(default, deserialize_with = "lenient::optional")]
    path: Option<String>,

    #[serde(default, deserialize_with = "lenient::optional")]
    sha256: Option<String>,
}

impl Item {
    /// Path relative to the mirror root.
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn sha256(&self) -> Option<&str> {
        self.sha256.as_deref()
    }
}
