use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

use provisioner_core::{RepositoryDefinition, DEFAULT_NAMESPACE};
use provisioner_ecr::EcrConfig;

#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub namespace: Option<String>,
    pub ecr: EcrConfig,
    pub repositories: Option<Vec<RepositoryDefinition>>,
}

impl Config {
    /// Read the YAML config at `path`, or fall back to built-in defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let Some(path) = path else {
            return Ok(Config::default());
        };
        let mut file = File::open(path)?;
        let mut s = String::new();
        file.read_to_string(&mut s)?;
        Ok(serde_yaml::from_str(&s)?)
    }

    /// Command line values take precedence over the file.
    pub fn apply_overrides(&mut self, region: Option<String>, namespace: Option<String>) {
        if region.is_some() {
            self.ecr.region = region;
        }
        if namespace.is_some() {
            self.namespace = namespace;
        }
    }

    pub fn namespace(&self) -> &str {
        self.namespace.as_deref().unwrap_or(DEFAULT_NAMESPACE)
    }

    /// Explicitly configured repositories, else the default pair under [`Config::namespace`].
    pub fn repositories(&self) -> Vec<RepositoryDefinition> {
        match &self.repositories {
            Some(repositories) => repositories.clone(),
            None => RepositoryDefinition::defaults(self.namespace()),
        }
    }
}

#[cfg(test)]
mod test {
    use rstest::*;

    use super::*;

    #[test]
    fn missing_path_gives_defaults() {
        let config = Config::load(None).unwrap();
        assert_eq!("yellbook", config.namespace());
        assert_eq!(RepositoryDefinition::defaults("yellbook"), config.repositories());
        assert!(config.ecr.region.is_none());
    }

    #[rstest]
    #[case::empty("{}", "yellbook")]
    #[case::namespace("namespace: acme", "acme")]
    #[case::region_only("ecr: { region: ap-southeast-1 }", "yellbook")]
    fn default_repositories_follow_namespace(#[case] yaml: &str, #[case] namespace: &str) {
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(namespace, config.namespace());
        assert_eq!(RepositoryDefinition::defaults(namespace), config.repositories());
    }

    #[test]
    fn explicit_repositories_replace_defaults() {
        let yaml = r#"
namespace: ignored
ecr:
  region: ap-southeast-1
repositories:
  - name: yellbook/api
    label: API
  - name: yellbook/worker
    tag_mutability: IMMUTABLE
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        let repositories = config.repositories();
        let names: Vec<&str> = repositories.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(vec!["yellbook/api", "yellbook/worker"], names);
        assert_eq!("worker", repositories[1].label());
        assert_eq!(Some("ap-southeast-1"), config.ecr.region.as_deref());
    }

    #[rstest]
    #[case::region_replaces_file(
        "ecr: { region: us-east-1 }",
        Some("ap-southeast-1"),
        None,
        Some("ap-southeast-1"),
        vec!["yellbook/api", "yellbook/web"]
    )]
    #[case::file_region_kept(
        "ecr: { region: us-east-1 }",
        None,
        None,
        Some("us-east-1"),
        vec!["yellbook/api", "yellbook/web"]
    )]
    #[case::namespace_renames_defaults(
        "namespace: yellbook",
        None,
        Some("acme"),
        None,
        vec!["acme/api", "acme/web"]
    )]
    #[case::namespace_leaves_explicit_list(
        "repositories: [ { name: yellbook/worker } ]",
        None,
        Some("acme"),
        None,
        vec!["yellbook/worker"]
    )]
    fn apply_overrides(
        #[case] yaml: &str,
        #[case] region: Option<&str>,
        #[case] namespace: Option<&str>,
        #[case] expected_region: Option<&str>,
        #[case] expected_names: Vec<&str>,
    ) {
        let mut config: Config = serde_yaml::from_str(yaml).unwrap();
        config.apply_overrides(region.map(String::from), namespace.map(String::from));

        assert_eq!(expected_region, config.ecr.region.as_deref());
        let repositories = config.repositories();
        let names: Vec<&str> = repositories.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(expected_names, names);
    }

    #[test]
    fn unreadable_path_is_an_error() {
        assert!(Config::load(Some(Path::new("/nonexistent/provisioner.yml"))).is_err());
    }
}
