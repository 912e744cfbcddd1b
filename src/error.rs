use thiserror::Error;

/// Failure of a single call against the news API.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("resource not found")]
    NotFound,

    #[error("HTTP {status}")]
    Http { status: u16 },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid response body: {0}")]
    Decode(String),
}

impl TransportError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, TransportError::NotFound)
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(e: serde_json::Error) -> Self {
        TransportError::Decode(e.to_string())
    }
}

/// Errors raised while configuring or starting the reader.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config file: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_predicate() {
        assert!(TransportError::NotFound.is_not_found());
        assert!(!TransportError::Http { status: 500 }.is_not_found());
        assert!(!TransportError::Decode("eof".to_string()).is_not_found());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(TransportError::Http { status: 503 }.to_string(), "HTTP 503");
        assert_eq!(
            AppError::Config("page_size must be positive".to_string()).to_string(),
            "configuration error: page_size must be positive"
        );
    }

    #[test]
    fn test_decode_error_from_serde() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let transport: TransportError = err.into();
        assert!(matches!(transport, TransportError::Decode(_)));
    }
}
