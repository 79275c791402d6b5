//! Query the Ubuntu cloud-image Simplestreams catalogue: supported releases,
//! the current LTS release, and the checksum of a release's disk image.

pub mod cloud;
pub mod error;
pub mod repositories;
pub mod resolver;
pub mod transport;

pub use error::CatalogError;
pub use resolver::{Lookup, NotFound, ReleaseResolver};
