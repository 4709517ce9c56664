//! [`RegistryClient`] implementation for AWS Elastic Container Registry.
use std::fmt::Debug;

use async_trait::async_trait;
use aws_sdk_ecr::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_ecr::operation::create_repository::CreateRepositoryError;
use aws_sdk_ecr::primitives::DateTime;
use aws_sdk_ecr::types as ecr;
use aws_sdk_ecr::Client;
use chrono::Utc;

use provisioner_core::registry::{EncryptionConfiguration, ImageScanningConfiguration};
use provisioner_core::{
    Encryption, Error as CoreError, RegistryClient, RepositoryCreateRequest,
    RepositoryDescriptor, Result as CoreResult,
};

mod config;
pub use config::EcrConfig;
mod errors;
pub use errors::{Error, Result};
pub(crate) mod logging;

#[derive(Clone)]
pub struct Ecr {
    client: Client,
}

impl Ecr {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RegistryClient for Ecr {
    async fn create_repository(
        &self,
        request: &RepositoryCreateRequest,
    ) -> CoreResult<RepositoryDescriptor> {
        let output = self
            .client
            .create_repository()
            .repository_name(&request.name)
            .image_scanning_configuration(
                ecr::ImageScanningConfiguration::builder()
                    .scan_on_push(request.scan_on_push)
                    .build(),
            )
            .encryption_configuration(encryption_configuration(&request.encryption)?)
            .image_tag_mutability(ecr::ImageTagMutability::from(
                request.tag_mutability.as_str(),
            ))
            .send()
            .await
            .map_err(|e| create_error(&request.name, e))?;

        let repository = output
            .repository
            .ok_or(CoreError::MissingField("repository"))?;
        descriptor(repository)
    }

    async fn list_repositories(&self) -> CoreResult<Vec<RepositoryDescriptor>> {
        let repositories = self
            .client
            .describe_repositories()
            .into_paginator()
            .items()
            .send()
            .try_collect()
            .await
            .map_err(|e| provider_error("DescribeRepositories", e))?;

        repositories.into_iter().map(descriptor).collect()
    }
}

fn encryption_configuration(encryption: &Encryption) -> Result<ecr::EncryptionConfiguration> {
    let builder = match encryption {
        Encryption::Aes256 => {
            ecr::EncryptionConfiguration::builder().encryption_type(ecr::EncryptionType::Aes256)
        }
        Encryption::Kms { kms_key } => ecr::EncryptionConfiguration::builder()
            .encryption_type(ecr::EncryptionType::Kms)
            .set_kms_key(kms_key.clone()),
    };
    Ok(builder.build()?)
}

fn create_error<R>(name: &str, err: SdkError<CreateRepositoryError, R>) -> CoreError
where
    R: Debug,
{
    if let Some(CreateRepositoryError::RepositoryAlreadyExistsException(_)) =
        err.as_service_error()
    {
        return CoreError::AlreadyExists(name.to_string());
    }
    provider_error("CreateRepository", err)
}

/// Keep the provider's error code alongside the full error chain so that credential or
/// permission failures stay recognizable in the report.
fn provider_error<E>(operation: &'static str, err: E) -> CoreError
where
    E: ProvideErrorMetadata + std::error::Error,
{
    CoreError::Provider {
        operation,
        code: err.code().map(String::from),
        message: format!("{}", DisplayErrorContext(&err)),
    }
}

fn descriptor(repository: ecr::Repository) -> CoreResult<RepositoryDescriptor> {
    let name = repository
        .repository_name
        .ok_or(CoreError::MissingField("repositoryName"))?;
    let uri = repository
        .repository_uri
        .ok_or(CoreError::MissingField("repositoryUri"))?;

    Ok(RepositoryDescriptor {
        repository_arn: repository.repository_arn,
        registry_id: repository.registry_id,
        name,
        uri,
        created_at: repository.created_at.and_then(timestamp),
        image_tag_mutability: repository
            .image_tag_mutability
            .map(|m| m.as_str().to_string()),
        image_scanning_configuration: repository.image_scanning_configuration.map(|c| {
            ImageScanningConfiguration {
                scan_on_push: c.scan_on_push,
            }
        }),
        encryption_configuration: repository.encryption_configuration.map(|c| {
            EncryptionConfiguration {
                encryption_type: c.encryption_type.as_str().to_string(),
                kms_key: c.kms_key,
            }
        }),
    })
}

fn timestamp(dt: DateTime) -> Option<chrono::DateTime<Utc>> {
    chrono::DateTime::from_timestamp(dt.secs(), dt.subsec_nanos())
}
