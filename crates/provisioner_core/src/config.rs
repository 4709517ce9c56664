use serde::Deserialize;

use crate::registry::{Encryption, RepositoryCreateRequest, TagMutability};

pub const DEFAULT_NAMESPACE: &str = "yellbook";

/// A repository the provisioner should make sure exists.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RepositoryDefinition {
    pub name: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default = "scan_on_push_default")]
    pub scan_on_push: bool,
    #[serde(default)]
    pub encryption: Encryption,
    #[serde(default)]
    pub tag_mutability: TagMutability,
}

fn scan_on_push_default() -> bool {
    true
}

impl RepositoryDefinition {
    /// Definition carrying the same defaults as [`RepositoryCreateRequest::new`].
    pub fn new(name: impl Into<String>) -> Self {
        let request = RepositoryCreateRequest::new(name);
        Self {
            name: request.name,
            label: None,
            scan_on_push: request.scan_on_push,
            encryption: request.encryption,
            tag_mutability: request.tag_mutability,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Display name used in the report; falls back to the last `/` segment of the name.
    pub fn label(&self) -> &str {
        match &self.label {
            Some(label) => label.as_str(),
            None => self.name.rsplit('/').next().unwrap_or(&self.name),
        }
    }

    /// The `api` and `web` repositories under `namespace`.
    pub fn defaults(namespace: &str) -> Vec<RepositoryDefinition> {
        vec![
            RepositoryDefinition::new(format!("{namespace}/api")).with_label("API"),
            RepositoryDefinition::new(format!("{namespace}/web")).with_label("Web"),
        ]
    }
}

impl From<&RepositoryDefinition> for RepositoryCreateRequest {
    fn from(d: &RepositoryDefinition) -> RepositoryCreateRequest {
        RepositoryCreateRequest {
            name: d.name.clone(),
            scan_on_push: d.scan_on_push,
            encryption: d.encryption.clone(),
            tag_mutability: d.tag_mutability,
        }
    }
}
