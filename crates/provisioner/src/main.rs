use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use provisioner_core::Provisioner;

mod config;
use crate::config::Config;

/// Create the project's container image repositories in ECR and list what the registry holds.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// YAML configuration file; built-in defaults are used when omitted.
    #[arg(short, long)]
    config_file: Option<PathBuf>,

    /// Region to provision in, overriding the config file and the environment.
    #[arg(short, long)]
    region: Option<String>,

    /// Namespace for the default `api` and `web` repositories.
    #[arg(short, long)]
    namespace: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .init();

    // load configuration
    let mut config = Config::load(cli.config_file.as_deref())?;
    config.apply_overrides(cli.region, cli.namespace);

    let client = config.ecr.new_client().await;
    let provisioner = Provisioner::new(client, config.repositories());

    // step failures are part of the report, never of the exit status
    let report = provisioner.run(&mut std::io::stdout()).await?;
    tracing::info!(
        created = report.created(),
        already_existing = report.already_existing(),
        failed = report.failed(),
        "provisioning finished"
    );

    Ok(())
}

#[cfg(test)]
mod test {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_overrides() {
        let cli = Cli::parse_from([
            "ecr-provision",
            "-c",
            "provision.yml",
            "--region",
            "ap-southeast-1",
            "-n",
            "acme",
        ]);
        assert_eq!(Some(PathBuf::from("provision.yml")), cli.config_file);
        assert_eq!(Some("ap-southeast-1"), cli.region.as_deref());
        assert_eq!(Some("acme"), cli.namespace.as_deref());
    }
}
