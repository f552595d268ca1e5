//! Container settings resolved from defaults, environment and init params.

use config::{Config, ConfigError, Environment};
use rest_harness_application::ports::ContainerError;
use rest_harness_domain::InitParams;
use serde::Deserialize;

use super::response_writer::{CommitPolicy, ResponseWriter, WriterOptions};

/// Init parameter prefix for keys the container itself consumes.
pub const INIT_PARAM_PREFIX: &str = "harness.";

/// Environment variable prefix, e.g. `REST_HARNESS_PORT`.
pub const ENV_PREFIX: &str = "REST_HARNESS";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_BODY_LIMIT: i64 = 16 * 1024 * 1024;

/// Keys accepted after the `harness.` prefix.
const SETTING_KEYS: [&str; 7] = [
    "host",
    "port",
    "log_traffic",
    "body_limit",
    "commit",
    "set_status_on_404",
    "set_status_over_send_error",
];

/// Settings of one embedded container.
///
/// Unrelated `REST_HARNESS_*` environment variables are ignored; only
/// unknown `harness.*` init parameters are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContainerSettings {
    /// Interface to bind.
    pub host: String,
    /// Port to bind; `0` picks a free port.
    pub port: u16,
    /// Log every request and response with `tower-http`'s trace layer.
    pub log_traffic: bool,
    /// Maximum accepted request body size in bytes.
    pub body_limit: usize,
    /// Commit behaviour of the response writer.
    pub commit: CommitPolicy,
    /// See [`WriterOptions::use_set_status_on_404`].
    pub set_status_on_404: bool,
    /// See [`WriterOptions::set_status_over_send_error`].
    pub set_status_over_send_error: bool,
}

impl ContainerSettings {
    /// Resolves settings for a deployment.
    ///
    /// Precedence, lowest first: defaults, `REST_HARNESS_*` environment
    /// variables, `harness.*` init parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::Settings`] for unknown `harness.*` keys or
    /// values that do not parse.
    pub fn from_init_params(params: &InitParams) -> Result<Self, ContainerError> {
        Self::resolve(
            params,
            Environment::with_prefix(ENV_PREFIX).try_parsing(true),
        )
        .map_err(|e| ContainerError::Settings(Box::new(e)))
    }

    fn resolve(params: &InitParams, environment: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("host", DEFAULT_HOST)?
            .set_default("port", 0)?
            .set_default("log_traffic", true)?
            .set_default("body_limit", DEFAULT_BODY_LIMIT)?
            .set_default("commit", "suppress")?
            .set_default("set_status_on_404", false)?
            .set_default("set_status_over_send_error", false)?
            .add_source(environment);

        for (key, value) in params.with_prefix(INIT_PARAM_PREFIX) {
            if !SETTING_KEYS.contains(&key) {
                return Err(ConfigError::Message(format!(
                    "unknown container setting `{INIT_PARAM_PREFIX}{key}`"
                )));
            }
            builder = builder.set_override(key, value)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Address to bind, `host:port`.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Builds the response writer these settings describe.
    #[must_use]
    pub const fn response_writer(&self) -> ResponseWriter {
        ResponseWriter::new(
            WriterOptions {
                use_set_status_on_404: self.set_status_on_404,
                set_status_over_send_error: self.set_status_over_send_error,
            },
            self.commit,
        )
    }
}
