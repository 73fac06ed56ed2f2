//! In-memory adapter error types.

use colorscheme_domain::error::ColorSchemeError;

/// Failures the in-memory adapters can simulate.
#[derive(Debug, thiserror::Error)]
pub enum MemoryError {
    /// The write would exceed the storage area's quota.
    #[error("storage quota of {quota} bytes exceeded")]
    QuotaExceeded { quota: usize },

    /// The document was switched to read-only.
    #[error("document is read-only")]
    ReadOnlyDocument,
}

impl From<MemoryError> for ColorSchemeError {
    fn from(err: MemoryError) -> Self {
        match err {
            MemoryError::QuotaExceeded { .. } => Self::Storage(Box::new(err)),
            MemoryError::ReadOnlyDocument => Self::Document(Box::new(err)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_quota_error() {
        let err = MemoryError::QuotaExceeded { quota: 16 };
        assert_eq!(err.to_string(), "storage quota of 16 bytes exceeded");
    }

    #[test]
    fn should_convert_quota_to_storage_error() {
        let err: ColorSchemeError = MemoryError::QuotaExceeded { quota: 0 }.into();
        assert!(matches!(err, ColorSchemeError::Storage(_)));
    }

    #[test]
    fn should_convert_read_only_to_document_error() {
        let err: ColorSchemeError = MemoryError::ReadOnlyDocument.into();
        assert!(matches!(err, ColorSchemeError::Document(_)));
    }
}
