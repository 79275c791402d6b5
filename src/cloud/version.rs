use indexmap::IndexMap;
use serde::Deserialize;

use super::lenient;

/// Name of the artifact the checksum lookup cares about.
pub const DISK_IMAGE: &str = "disk1.img";

#[derive(Debug, Default, Deserialize)]
pub struct Version {
    #[serde(default, deserialize_with = "lenient::entries")]
    items: IndexMap<String, super::Item>,
}

impl Version {
    pub fn disk_image(&self) -> Option<&super::Item> {
        self.items.get(DISK_IMAGE)
    }
}
