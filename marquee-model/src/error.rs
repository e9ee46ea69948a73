use std::fmt::{self, Display};

/// Errors produced by model validation routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// Page numbers are 1-based; the server reported page 0.
    ZeroPage,
    /// The server answered with a different page than the one requested.
    InvalidPage { requested: u32, reported: u32 },
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::ZeroPage => {
                write!(f, "invalid page: page numbers start at 1")
            }
            ModelError::InvalidPage {
                requested,
                reported,
            } => write!(
                f,
                "invalid page: requested page {requested} but received page {reported}"
            ),
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
