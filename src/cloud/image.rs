use url::Url;

/// The `disk1.img` artifact a checksum lookup settled on, with enough context
/// to tell where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiskImage {
    product_id: String,
    version_id: String,
    release_title: Option<String>,
    arch: Option<String>,
    url: Option<String>,
    sha256: String,
}

impl DiskImage {
    pub fn new(
        product_id: impl Into<String>,
        version_id: impl Into<String>,
        release_title: Option<String>,
        arch: Option<String>,
        url: Option<String>,
        sha256: impl Into<String>,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            version_id: version_id.into(),
            release_title,
            arch,
            url,
            sha256: sha256.into(),
        }
    }

    /// Simplestreams product id
    /// eg. com.ubuntu.cloud:server:20.04:amd64
    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    /// Build serial
    /// eg. 20240102
    pub fn version_id(&self) -> &str {
        &self.version_id
    }

    pub fn release_title(&self) -> Option<&str> {
        self.release_title.as_deref()
    }

    pub fn arch(&self) -> Option<&str> {
        self.arch.as_deref()
    }

    // Download location, when the item carried a path
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn sha256(&self) -> &str {
        &self.sha256
    }
}

/// Resolve an item path against the mirror root. Falls back to plain
/// concatenation when the base is not a valid URL.
pub fn absolute_url(base_url: &str, relative_path: &str) -> String {
    Url::parse(base_url)
        .and_then(|base| base.join(relative_path))
        .map(String::from)
        .unwrap_or_else(|_| format!("{base_url}{relative_path}"))
}
