use thiserror::Error;

/// Errors raised while loading the service catalog.
///
/// Never reaches callers of the catalog cache; it is logged and the
/// catalog degrades to empty.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog not found: {0}")]
    NotFound(String),

    #[error("failed to read catalog: {0}")]
    Io(String),

    #[error("malformed catalog: {0}")]
    Parse(String),
}

/// Errors related to credential lookup.
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("storage error: {0}")]
    StorageError(String),
}

/// Errors from session store lookups.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session not found: {0}")]
    NotFound(uuid::Uuid),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::NotFound("services.yaml".to_string());
        assert_eq!(err.to_string(), "catalog not found: services.yaml");
        let err = CatalogError::Parse("expected a mapping".to_string());
        assert!(err.to_string().starts_with("malformed catalog"));
    }

    #[test]
    fn test_secret_error_display() {
        let err = SecretError::StorageError("secrets.toml: expected `=`".to_string());
        assert_eq!(err.to_string(), "storage error: secrets.toml: expected `=`");
    }

    #[test]
    fn test_session_error_display() {
        let id = uuid::Uuid::nil();
        let err = SessionError::NotFound(id);
        assert!(err.to_string().contains(&id.to_string()));
    }
}
