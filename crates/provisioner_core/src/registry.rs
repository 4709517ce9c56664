//! # Registry Abstractions
//!
//! Defines the interoperability layer between [`crate::Provisioner`] and the managed registry
//! service it provisions repositories in.
//!
//! ## Known Implementations
//!
//! ### provisioner_ecr
//!
//! Implementation of [`RegistryClient`] backed by the AWS Elastic Container Registry management
//! API. Region, profile and credentials are resolved through the standard AWS provider chain.
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Remote registry management API.
///
/// Implementations must map the provider's "repository already exists" signal to
/// [`crate::Error::AlreadyExists`] so that reruns stay benign.
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Create a repository with the given configuration.
    async fn create_repository(
        &self,
        request: &RepositoryCreateRequest,
    ) -> Result<RepositoryDescriptor>;

    /// Return every repository visible in the configured region.
    async fn list_repositories(&self) -> Result<Vec<RepositoryDescriptor>>;
}

/// Server-side encryption applied to stored artifacts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "type")]
pub enum Encryption {
    #[default]
    #[serde(rename = "AES256")]
    Aes256,
    #[serde(rename = "KMS")]
    Kms {
        #[serde(default)]
        kms_key: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TagMutability {
    #[default]
    Mutable,
    Immutable,
}

impl TagMutability {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagMutability::Mutable => "MUTABLE",
            TagMutability::Immutable => "IMMUTABLE",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepositoryCreateRequest {
    pub name: String,
    pub scan_on_push: bool,
    pub encryption: Encryption,
    pub tag_mutability: TagMutability,
}

impl RepositoryCreateRequest {
    /// Request with scan-on-push enabled, AES256 encryption and mutable tags.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scan_on_push: true,
            encryption: Encryption::default(),
            tag_mutability: TagMutability::default(),
        }
    }
}

/// A repository as reported by the provider.
///
/// Metadata beyond the name and URI is passed through untouched and only ever serialized for
/// display. Field names follow the provider's own JSON spelling.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registry_id: Option<String>,
    #[serde(rename = "repositoryName")]
    pub name: String,
    #[serde(rename = "repositoryUri")]
    pub uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_tag_mutability: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_scanning_configuration: Option<ImageScanningConfiguration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption_configuration: Option<EncryptionConfiguration>,
}

impl RepositoryDescriptor {
    pub fn new(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            repository_arn: None,
            registry_id: None,
            name: name.into(),
            uri: uri.into(),
            created_at: None,
            image_tag_mutability: None,
            image_scanning_configuration: None,
            encryption_configuration: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageScanningConfiguration {
    pub scan_on_push: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptionConfiguration {
    pub encryption_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kms_key: Option<String>,
}
