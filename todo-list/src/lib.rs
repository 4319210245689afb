pub mod config {
    use serde::Deserialize;

    /// Deployment environment; interactive docs are only served in development.
    #[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
    #[serde(rename_all = "lowercase")]
    pub enum AppEnvironment {
        Development,
        #[default]
        Production,
    }

    #[derive(Deserialize, Debug, Clone)]
    pub struct Config {
        pub db_url: String,
        #[serde(default = "default_port")]
        pub port: u16,
        #[serde(default)]
        pub app_env: AppEnvironment,
        #[serde(default = "enabled")]
        pub cors_allow_any_origin: bool,
        #[serde(default = "enabled")]
        pub cors_allow_any_header: bool,
        #[serde(default = "enabled")]
        pub cors_allow_any_method: bool,
        #[serde(default = "enabled")]
        pub enable_docs_in_dev: bool,
    }

    impl Config {
        /// Loads configuration from environment variables.
        pub fn from_env() -> anyhow::Result<Self> {
            Self::from_source(config::Environment::default().try_parsing(true))
        }

        /// Loads configuration from a single `config` source.
        pub fn from_source<S>(source: S) -> anyhow::Result<Self>
        where
            S: config::Source + Send + Sync + 'static,
        {
            let settings = config::Config::builder().add_source(source).build()?;

            let config: Config = settings.try_deserialize()?;
            Ok(config)
        }

        /// Whether the Swagger UI and OpenAPI document should be mounted.
        pub fn docs_enabled(&self) -> bool {
            self.app_env == AppEnvironment::Development && self.enable_docs_in_dev
        }
    }

    fn default_port() -> u16 {
        8080
    }

    fn enabled() -> bool {
        true
    }

}
pub mod entities;
pub mod task;
pub mod web;
