//! Environment detection module

use serde::{Deserialize, Serialize};

/// Deployment environment the server is running in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development (permissive CORS, detailed error messages)
    #[default]
    Development,
    /// Production deployment (restricted CORS, generic error messages)
    Production,
}

impl Environment {
    /// Read the environment from the `ENVIRONMENT` variable.
    ///
    /// Any value other than `production` is treated as development.
    pub fn from_env() -> Self {
        match std::env::var("ENVIRONMENT").as_deref() {
            Ok("production") => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}
