//! Provision container image repositories in a managed registry service.
//!
//! [`Provisioner`] creates each configured [`RepositoryDefinition`] through a
//! [`RegistryClient`], then lists every repository in the registry, writing a human readable
//! report as it goes. Failures are reported per step and never abort the run.
mod config;
pub use config::{RepositoryDefinition, DEFAULT_NAMESPACE};

pub mod errors;
pub use errors::{Error, Result};

pub mod registry;
pub use registry::{
    Encryption, RegistryClient, RepositoryCreateRequest, RepositoryDescriptor, TagMutability,
};

mod provisioner;
pub use provisioner::{CreateStep, ListOutcome, ProvisionReport, Provisioner, StepOutcome};
