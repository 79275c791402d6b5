use reqwest::StatusCode;

/// Failures that stop a catalog query before the resolver gets to walk the
/// document. "Nothing found" outcomes are not errors, see [`crate::resolver::Lookup`].
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("failed to fetch catalog from {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: StatusCode },
    #[error("malformed catalog ({category}): {source}")]
    MalformedCatalog {
        category: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl CatalogError {
    /// Connection level failures and non-success statuses are both transport
    /// errors from the caller's point of view.
    pub fn is_transport(&self) -> bool {
        matches!(self, CatalogError::Transport { .. } | CatalogError::HttpStatus { .. })
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, CatalogError::MalformedCatalog { .. })
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(source: serde_json::Error) -> Self {
        let category = match source.classify() {
            serde_json::error::Category::Io => "io",
            serde_json::error::Category::Syntax => "syntax",
            serde_json::error::Category::Data => "data",
            serde_json::error::Category::Eof => "eof",
        };
        CatalogError::MalformedCatalog { category, source }
    }
}

#[cfg(test)]
mod tests {
    use super::CatalogError;

    #[test]
    fn truncated_json_is_classified_as_eof() {
        let err = serde_json::from_str::<serde_json::Value>("{\"products\": {").unwrap_err();
        let err = CatalogError::from(err);
        assert!(err.is_malformed());
        assert!(!err.is_transport());
        assert!(err.to_string().starts_with("malformed catalog (eof)"));
    }

    #[test]
    fn garbage_is_classified_as_syntax() {
        let err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let err = CatalogError::from(err);
        assert!(err.to_string().starts_with("malformed catalog (syntax)"));
    }
}
