//! Error types for the visit log stores.

/// Errors that can occur while appending to or reading from a log store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Log file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No visitor log exists yet")]
    LogNotFound,

    #[error("Remote store request failed: {0}")]
    Remote(#[from] reqwest::Error),

    #[error("Remote store returned status {status}: {body}")]
    RemoteStatus { status: u16, body: String },

    #[error("Failed to decode visitor log: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to create HTTP client: {0}")]
    Client(String),
}

impl StoreError {
    /// Get a user-facing message for HTTP responses
    pub fn user_message(&self) -> String {
        match self {
            StoreError::Io(e) => format!("could not access the visitor log file ({e})"),
            StoreError::LogNotFound => "no visitors have been recorded yet".to_string(),
            StoreError::Remote(e) if e.is_timeout() => {
                "the visitor database did not respond in time".to_string()
            }
            StoreError::Remote(e) if e.is_connect() => {
                "the visitor database is unreachable".to_string()
            }
            StoreError::Remote(_) => "the visitor database request failed".to_string(),
            StoreError::RemoteStatus { status, .. } => {
                format!("the visitor database rejected the request (status {status})")
            }
            StoreError::Serialization(e) => format!("the visitor log could not be decoded ({e})"),
            StoreError::Client(msg) => msg.clone(),
        }
    }

    /// Whether the store simply has no data yet
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::LogNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        assert!(StoreError::LogNotFound.user_message().contains("no visitors"));
        assert!(StoreError::LogNotFound.is_not_found());

        let status = StoreError::RemoteStatus {
            status: 401,
            body: "invalid api key".to_string(),
        };
        assert!(status.user_message().contains("401"));
        assert!(status.to_string().contains("invalid api key"));
        assert!(!status.is_not_found());

        let io = StoreError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        assert!(io.user_message().contains("denied"));
    }

    #[test]
    fn test_undecodable_rows_message() {
        let err: StoreError = serde_json::from_str::<Vec<crate::models::VisitRecord>>(r#"[{"ip": 1}]"#)
            .unwrap_err()
            .into();

        assert!(matches!(err, StoreError::Serialization(_)));
        assert!(err.user_message().starts_with("the visitor log could not be decoded"));
    }
}
