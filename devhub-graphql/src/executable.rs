//! Main entry point for the command line.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::anyhow;
use anyhow::Context;
use anyhow::Result;
use clap::ArgGroup;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::configuration::generate_config_schema;
use crate::configuration::Configuration;
use crate::graphql::Request;
use crate::graphql::Response;
use crate::json_ext::Object;
use crate::session::Sessions;
use crate::Executor;

/// Options for the command line.
#[derive(Parser, Debug)]
#[command(
    name = "devhub-graphql",
    about = "Run a GraphQL document against the DevHub graph",
    version
)]
#[command(group(ArgGroup::new("document").args(["query", "query_file"])))]
pub(crate) struct Opt {
    /// Log level (off|error|warn|info|debug|trace).
    #[arg(long = "log", default_value = "info", env = "DEVHUB_GRAPHQL_LOG")]
    log_level: String,

    /// Configuration file.
    #[arg(short, long = "config", env = "DEVHUB_GRAPHQL_CONFIG_PATH")]
    config_path: Option<PathBuf>,

    /// Prints the configuration schema.
    #[arg(long)]
    schema: bool,

    /// The document to execute.
    #[arg(short, long)]
    query: Option<String>,

    /// Read the document from a file, or from stdin with `-`.
    #[arg(long)]
    query_file: Option<PathBuf>,

    /// Request variables, as a JSON object.
    #[arg(long)]
    variables: Option<String>,

    /// Log in as this user before executing.
    #[arg(short, long, requires = "password")]
    username: Option<String>,

    /// Password for `--username`.
    #[arg(short, long, env = "DEVHUB_GRAPHQL_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

/// This is the main entrypoint.
pub fn main() -> Result<()> {
    let opt = Opt::parse();

    if opt.schema {
        let schema = generate_config_schema();
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    install_subscriber(&opt.log_level)?;

    let response = opt.execute()?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn install_subscriber(log_level: &str) -> Result<()> {
    let builder = tracing_subscriber::fmt::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_new(log_level).context("could not parse log configuration")?,
        );

    let installed = if std::io::stderr().is_terminal() {
        builder.try_init()
    } else {
        builder.json().try_init()
    };
    installed.map_err(|err| anyhow!("could not install tracing subscriber: {err}"))
}

impl Opt {
    fn configuration(&self) -> Result<Configuration> {
        match &self.config_path {
            Some(path) => Configuration::from_file(path)
                .with_context(|| format!("could not load {}", path.display())),
            None => Ok(Configuration::default()),
        }
    }

    fn request(&self) -> Result<Request> {
        let query = match (&self.query, &self.query_file) {
            (Some(query), _) => query.clone(),
            (None, Some(path)) if path.as_os_str() == "-" => {
                std::io::read_to_string(std::io::stdin()).context("could not read stdin")?
            }
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("could not read {}", path.display()))?,
            (None, None) => return Err(anyhow!("a document is required, use --query or --query-file")),
        };

        let variables = match &self.variables {
            Some(variables) => serde_json::from_str::<Object>(variables)
                .context("--variables must be a JSON object")?,
            None => Object::new(),
        };

        Ok(Request::new(query).with_variables(variables))
    }

    fn execute(&self) -> Result<Response> {
        let configuration = self.configuration()?;
        let request = self.request()?;

        let executor = Executor::from_configuration(&configuration);
        let sessions = Sessions::new(Arc::clone(executor.store()));

        let token = match (&self.username, &self.password) {
            (Some(username), Some(password)) => Some(
                sessions
                    .login(username, password)
                    .ok_or_else(|| anyhow!("invalid credentials for {username}"))?,
            ),
            _ => None,
        };

        Ok(executor.execute_with_session(&request, &sessions, token.as_deref()))
    }
}
