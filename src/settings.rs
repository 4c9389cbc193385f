use config::{Config, ConfigError, Environment};
use serde::Deserialize;

use crate::analyzer::DEFAULT_DOCUMENT_NAME;
use crate::record::FailurePolicy;

pub const ENV_PREFIX: &str = "GRANT";

/// Runtime settings. Read from `GRANT_*` environment variables on top of the
/// defaults below; command-line flags override both.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub document_name: String,
    pub strict: bool,
    pub pretty: bool,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_env(Environment::with_prefix(ENV_PREFIX))
    }

    fn from_env(env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("document_name", DEFAULT_DOCUMENT_NAME)?
            .set_default("strict", false)?
            .set_default("pretty", true)?
            .add_source(env.try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn policy(&self) -> FailurePolicy {
        if self.strict {
            FailurePolicy::Strict
        } else {
            FailurePolicy::Isolate
        }
    }
}
