//! ECR client errors

use thiserror;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid encryption configuration: {0}")]
    EncryptionConfiguration(#[from] aws_sdk_ecr::error::BuildError),
}

impl From<Error> for provisioner_core::Error {
    fn from(e: Error) -> Self {
        provisioner_core::Error::Provider {
            operation: "CreateRepository",
            code: None,
            message: format!("{}", e),
        }
    }
}
