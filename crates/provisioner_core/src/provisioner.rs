use std::io::Write;

use crate::config::RepositoryDefinition;
use crate::errors::Error;
use crate::registry::{RegistryClient, RepositoryCreateRequest, RepositoryDescriptor};

const SEPARATOR_WIDTH: usize = 60;

/// Creates the configured repositories and lists the registry afterwards.
///
/// Every step is guarded on its own: a failed create never prevents the following creates or
/// the final listing from running. Nothing is rolled back, so a partially provisioned registry is
/// a valid end state that a rerun completes.
pub struct Provisioner<C> {
    client: C,
    repositories: Vec<RepositoryDefinition>,
}

#[derive(Debug)]
pub enum StepOutcome {
    Created(RepositoryDescriptor),
    AlreadyExists,
    Failed(Error),
}

#[derive(Debug)]
pub enum ListOutcome {
    Listed(Vec<RepositoryDescriptor>),
    Failed(Error),
}

#[derive(Debug)]
pub struct CreateStep {
    pub name: String,
    pub outcome: StepOutcome,
}

#[derive(Debug)]
pub struct ProvisionReport {
    pub steps: Vec<CreateStep>,
    pub listing: ListOutcome,
}

impl ProvisionReport {
    pub fn created(&self) -> usize {
        self.count(|o| matches!(o, StepOutcome::Created(_)))
    }

    pub fn already_existing(&self) -> usize {
        self.count(|o| matches!(o, StepOutcome::AlreadyExists))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, StepOutcome::Failed(_)))
    }

    fn count(&self, f: impl Fn(&StepOutcome) -> bool) -> usize {
        self.steps.iter().filter(|s| f(&s.outcome)).count()
    }
}

impl<C: RegistryClient> Provisioner<C> {
    pub fn new(client: C, repositories: Vec<RepositoryDefinition>) -> Self {
        Self {
            client,
            repositories,
        }
    }

    /// Run every step in order, writing the human readable report to `out`.
    ///
    /// Registry failures are recorded in the returned [`ProvisionReport`]; only failures to write
    /// to `out` are returned as errors.
    pub async fn run<W: Write>(&self, out: &mut W) -> std::io::Result<ProvisionReport> {
        let mut steps = Vec::with_capacity(self.repositories.len());

        for definition in &self.repositories {
            let outcome = self.create(definition).await;
            write_create(out, definition.label(), &outcome)?;
            writeln!(out, "\n{}\n", "=".repeat(SEPARATOR_WIDTH))?;
            steps.push(CreateStep {
                name: definition.name.clone(),
                outcome,
            });
        }

        let listing = self.list().await;
        write_listing(out, &listing)?;
        out.flush()?;

        Ok(ProvisionReport { steps, listing })
    }

    async fn create(&self, definition: &RepositoryDefinition) -> StepOutcome {
        let request = RepositoryCreateRequest::from(definition);
        tracing::debug!(repository = %request.name, "creating repository");

        match self.client.create_repository(&request).await {
            Ok(descriptor) => {
                tracing::info!(
                    repository = %descriptor.name,
                    uri = %descriptor.uri,
                    "repository created"
                );
                StepOutcome::Created(descriptor)
            }
            Err(Error::AlreadyExists(name)) => {
                tracing::warn!(repository = %name, "repository already exists");
                StepOutcome::AlreadyExists
            }
            Err(e) => {
                tracing::error!(
                    repository = %request.name,
                    code = e.code().unwrap_or("none"),
                    "failed to create repository: {e}"
                );
                StepOutcome::Failed(e)
            }
        }
    }

    async fn list(&self) -> ListOutcome {
        match self.client.list_repositories().await {
            Ok(repositories) => {
                tracing::debug!(count = repositories.len(), "listed repositories");
                ListOutcome::Listed(repositories)
            }
            Err(e) => {
                tracing::error!(
                    code = e.code().unwrap_or("none"),
                    "failed to list repositories: {e}"
                );
                ListOutcome::Failed(e)
            }
        }
    }
}

fn write_create<W: Write>(out: &mut W, label: &str, outcome: &StepOutcome) -> std::io::Result<()> {
    match outcome {
        StepOutcome::Created(descriptor) => {
            writeln!(out, "✅ {label} Repository created:")?;
            serde_json::to_writer_pretty(&mut *out, descriptor)?;
            writeln!(out)
        }
        StepOutcome::AlreadyExists => writeln!(out, "⚠️  {label} Repository already exists"),
        StepOutcome::Failed(e) => writeln!(out, "❌ Error creating {label} repository: {e}"),
    }
}

fn write_listing<W: Write>(out: &mut W, listing: &ListOutcome) -> std::io::Result<()> {
    match listing {
        ListOutcome::Listed(repositories) => {
            writeln!(out, "✅ All repositories:")?;
            for repository in repositories {
                writeln!(out, "  - {}: {}", repository.name, repository.uri)?;
            }
            Ok(())
        }
        ListOutcome::Failed(e) => writeln!(out, "❌ Error listing repositories: {e}"),
    }
}
