//! Logic for loading configuration in to an object model

use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

use displaydoc::Display;
use schemars::gen::SchemaSettings;
use schemars::schema::RootSchema;
use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::authorization::AuthorizationMode;
use crate::store::RepoRecord;
use crate::store::UserRecord;


/// Configuration error.
#[derive(Debug, Error, Display)]
#[non_exhaustive]
pub enum ConfigurationError {
    /// could not read configuration file: {0}
    CannotReadFile(#[from] std::io::Error),

    /// could not deserialize configuration: {0}
    DeserializeConfigError(#[from] serde_yaml::Error),

    /// duplicate {kind} '{id}' in seed data
    DuplicateSeed { kind: &'static str, id: String },
}

/// The configuration of the engine.
///
/// Every section is optional; an empty document yields the permissive DevHub setup.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields, default)]
pub struct Configuration {
    /// Authorization checks applied on top of authentication.
    pub authorization: Authorization,

    /// The records the store starts with.
    pub seed: Seed,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields, default)]
pub struct Authorization {
    /// `permissive` (the default) or `enforced`.
    pub mode: AuthorizationMode,
}

/// Initial users and repositories.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Seed {
    #[serde(default)]
    pub users: Vec<UserRecord>,
    #[serde(default)]
    pub repos: Vec<RepoRecord>,
}

impl Default for Seed {
    fn default() -> Self {
        Self {
            users: vec![
                user(
                    "dev-001",
                    "developer",
                    "dev2024",
                    "dev@devhub.io",
                    "developer",
                    &["frontend-app", "utils-lib"],
                ),
                user(
                    "dev-002",
                    "teamlead",
                    "lead2024",
                    "lead@devhub.io",
                    "teamlead",
                    &["frontend-app", "utils-lib", "backend-api"],
                ),
                user(
                    "dev-003",
                    "admin",
                    "Adm!n_S3cur3#2024",
                    "admin@devhub.io",
                    "admin",
                    &["frontend-app", "utils-lib", "backend-api", "infra-secrets"],
                ),
            ],
            repos: vec![
                repo("frontend-app", "Frontend App", 42, "TypeScript", false, None),
                repo("utils-lib", "Utils Library", 18, "JavaScript", false, None),
                repo("backend-api", "Backend API", 67, "Python", true, None),
                repo(
                    "infra-secrets",
                    "Infrastructure Secrets",
                    3,
                    "YAML",
                    true,
                    Some("VBANK{gr4phql_1ntr0_4uth_byp4ss}"),
                ),
            ],
        }
    }
}

fn user(
    id: &str,
    username: &str,
    password: &str,
    email: &str,
    role: &str,
    repos: &[&str],
) -> UserRecord {
    UserRecord {
        id: id.to_string(),
        username: username.to_string(),
        password: password.to_string(),
        email: email.to_string(),
        role: Some(role.to_string()),
        repos: repos.iter().map(|repo| repo.to_string()).collect(),
    }
}

fn repo(
    id: &str,
    name: &str,
    stars: i64,
    language: &str,
    is_private: bool,
    flag: Option<&str>,
) -> RepoRecord {
    RepoRecord {
        id: id.to_string(),
        name: name.to_string(),
        stars,
        language: language.to_string(),
        is_private,
        flag: flag.map(str::to_string),
    }
}

impl Configuration {
    /// Read and validate a YAML configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading configuration");
        std::fs::read_to_string(path)?.parse()
    }

    /// Reject seed data the store could not index unambiguously.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        check_unique("user id", self.seed.users.iter().map(|user| &user.id))?;
        check_unique(
            "username",
            self.seed.users.iter().map(|user| &user.username),
        )?;
        check_unique("repository id", self.seed.repos.iter().map(|repo| &repo.id))?;
        Ok(())
    }
}

fn check_unique<'a>(
    kind: &'static str,
    ids: impl Iterator<Item = &'a String>,
) -> Result<(), ConfigurationError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ConfigurationError::DuplicateSeed {
                kind,
                id: id.clone(),
            });
        }
    }
    Ok(())
}

/// Parse configuration from a string in YAML syntax
impl FromStr for Configuration {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // serde_yaml refuses an empty document.
        let configuration: Configuration = if s.trim().is_empty() {
            Configuration::default()
        } else {
            serde_yaml::from_str(s)?
        };
        configuration.validate()?;
        Ok(configuration)
    }
}

/// Generate a JSON schema for the configuration.
pub fn generate_config_schema() -> RootSchema {
    let settings = SchemaSettings::draft07().with(|s| {
        s.option_nullable = true;
        s.option_add_null_type = false;
        s.inline_subschemas = true;
    });
    settings.into_generator().into_root_schema_for::<Configuration>()
}
