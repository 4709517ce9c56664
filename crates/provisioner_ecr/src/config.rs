use aws_config::BehaviorVersion;
use aws_credential_types::Credentials;
use aws_sdk_ecr::config::Region;
use serde::Deserialize;

use super::logging::LoggingInterceptor;
use super::Ecr;

/// Connection settings for the ECR management API.
///
/// Every field is optional; anything left unset is resolved through the standard AWS provider
/// chain (environment, shared config files, instance metadata).
#[derive(Clone, Default, Deserialize)]
pub struct EcrConfig {
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    profile: Option<String>,
    #[serde(default)]
    endpoint_url: Option<String>,
    #[serde(default)]
    credentials: Option<StaticCredentials>,
}

#[derive(Clone, Deserialize)]
struct StaticCredentials {
    access_key: String,
    secret_key: String,
}

impl EcrConfig {
    pub async fn new_client(&self) -> Ecr {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &self.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(profile) = &self.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(endpoint_url) = &self.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }
        if let Some(credentials) = &self.credentials {
            loader = loader.credentials_provider(Credentials::new(
                credentials.access_key.clone(),
                credentials.secret_key.clone(),
                None,
                None,
                "ecr-provision",
            ));
        }

        let sdk_config = loader.load().await;
        log_region(sdk_config.region());

        let config = aws_sdk_ecr::config::Builder::from(&sdk_config)
            .interceptor(LoggingInterceptor)
            .build();

        Ecr::new(aws_sdk_ecr::Client::from_conf(config))
    }
}

/// Every request fails without a region, so its absence is logged at error level.
fn log_region(region: Option<&Region>) {
    match region {
        Some(region) => tracing::debug!(%region, "using ecr region"),
        None => tracing::error!("no region configured, ecr requests will fail"),
    }
}

#[cfg(test)]
mod test {
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    use rstest::*;
    use tracing_subscriber::fmt::MakeWriter;

    use super::*;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[rstest]
    #[case::missing(None, true)]
    #[case::present(Some(Region::new("ap-southeast-1")), false)]
    fn missing_region_is_visible_at_error_level(
        #[case] region: Option<Region>,
        #[case] logged: bool,
    ) {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("error"))
            .with_writer(logs.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || log_region(region.as_ref()));

        assert_eq!(logged, logs.contents().contains("no region configured"));
    }

    #[tokio::test]
    async fn new_client_applies_overrides() {
        let yaml = r#"
region: eu-west-1
endpoint_url: http://localhost:4566
credentials:
  access_key: AKIDEXAMPLE
  secret_key: secret
"#;
        let config: EcrConfig = serde_yaml::from_str(yaml).unwrap();
        let ecr = config.new_client().await;

        let region = ecr.client.config().region().map(|r| r.as_ref().to_string());
        assert_eq!(Some(String::from("eu-west-1")), region);
    }

    #[test]
    fn empty_config_defers_to_environment() {
        let config: EcrConfig = serde_yaml::from_str("{}").unwrap();
        assert!(config.region.is_none());
        assert!(config.profile.is_none());
        assert!(config.endpoint_url.is_none());
        assert!(config.credentials.is_none());
    }

    #[test]
    fn full_config() {
        let yaml = r#"
region: ap-southeast-1
profile: staging
endpoint_url: http://localhost:4566
credentials:
  access_key: AKIDEXAMPLE
  secret_key: secret
"#;
        let config: EcrConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(Some("ap-southeast-1"), config.region.as_deref());
        assert_eq!(Some("staging"), config.profile.as_deref());
        assert_eq!(Some("http://localhost:4566"), config.endpoint_url.as_deref());
        let credentials = config.credentials.unwrap();
        assert_eq!("AKIDEXAMPLE", credentials.access_key);
        assert_eq!("secret", credentials.secret_key);
    }
}
