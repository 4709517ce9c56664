use thiserror;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by a [`crate::registry::RegistryClient`].
///
/// Only [`Error::AlreadyExists`] is treated as benign by [`crate::Provisioner`]; everything else
/// is reported as a failed step.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("repository already exists: {0}")]
    AlreadyExists(String),

    #[error("{message}")]
    Provider {
        operation: &'static str,
        code: Option<String>,
        message: String,
    },

    #[error("provider response missing field: {0}")]
    MissingField(&'static str),
}

impl Error {
    /// The provider error code, if the provider supplied one.
    pub fn code(&self) -> Option<&str> {
        match self {
            Error::Provider { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}
