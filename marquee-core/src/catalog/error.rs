use std::fmt;

use marquee_model::ModelError;

/// Uniform failure value for every catalog request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// The request never produced a response (DNS, connect, timeout).
    #[error("Network error: no response from server ({message})")]
    Transport { message: String },

    /// The server answered with a non-success status.
    #[error("{status}: {message}")]
    Api { status: u16, message: String },

    /// The body did not have the expected shape.
    #[error("Malformed response: {message}")]
    Decode { message: String },
}

/// Discriminant of [`CatalogError`], handy for logging and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogErrorKind {
    Transport,
    Api,
    Decode,
}

impl fmt::Display for CatalogErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport => f.write_str("transport"),
            Self::Api => f.write_str("api"),
            Self::Decode => f.write_str("decode"),
        }
    }
}

impl CatalogError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> CatalogErrorKind {
        match self {
            Self::Transport { .. } => CatalogErrorKind::Transport,
            Self::Api { .. } => CatalogErrorKind::Api,
            Self::Decode { .. } => CatalogErrorKind::Decode,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable text suitable for a section's error slot.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::decode(err.to_string());
        }
        if let Some(status) = err.status() {
            return Self::api(status.as_u16(), err.to_string());
        }
        Self::transport(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(err.to_string())
    }
}

impl From<ModelError> for CatalogError {
    fn from(err: ModelError) -> Self {
        Self::decode(err.to_string())
    }
}
