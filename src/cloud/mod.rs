mod catalog;
mod image;
mod item;
mod lenient;
mod product;
mod version;

pub use catalog::Catalog;
pub use image::{DiskImage, absolute_url};
pub use item::Item;
pub use product::Product;
pub use version::Version;
