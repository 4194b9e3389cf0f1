//! Command-line argument parsing for gql-fetch.

use clap::Parser;
use gql_fetch::config::{Config, EndpointConfig, RuntimeMode};
use gql_fetch::error::{FetchError, Result};
use gql_fetch::query::StalePolicy;
use std::io::Read;
use std::path::PathBuf;

/// Send a GraphQL query over HTTP and print the outcome.
#[derive(Parser, Debug)]
#[command(name = "gql-fetch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Query text, sent verbatim
    #[arg(value_name = "QUERY", conflicts_with_all = ["query_file", "watch"])]
    pub query: Option<String>,

    /// Read the query from a file (use "-" for stdin)
    #[arg(short = 'f', long, value_name = "PATH", conflicts_with = "watch")]
    pub query_file: Option<String>,

    /// Runtime mode; "development" sends the endpoint as a relative URL
    #[arg(short = 'e', long = "env", value_name = "MODE")]
    pub mode: Option<String>,

    /// Full endpoint URL (e.g., https://host/content/graphql)
    #[arg(short = 'u', long, value_name = "URL")]
    pub url: Option<String>,

    /// Host prepended to the endpoint outside development
    #[arg(short = 'H', long, value_name = "HOST_URI")]
    pub host_uri: Option<String>,

    /// Endpoint path
    #[arg(short = 'p', long, value_name = "PATH")]
    pub endpoint: Option<String>,

    /// Basic credential as user:password
    #[arg(short = 'a', long, value_name = "USER:PASSWORD")]
    pub authorization: Option<String>,

    /// Config file path
    #[arg(long, value_name = "PATH", env = "GQL_FETCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Read one query per line from stdin and re-run only when it changes
    #[arg(short = 'w', long)]
    pub watch: bool,

    /// In watch mode, drop responses to superseded queries
    #[arg(long, requires = "watch")]
    pub latest_only: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }

    /// Converts CLI arguments to an EndpointConfig holding only what was given.
    pub fn to_endpoint_config(&self) -> Result<EndpointConfig> {
        let mut config = match &self.url {
            Some(url) => EndpointConfig::from_url(url)?,
            None => EndpointConfig::default(),
        };

        if let Some(mode) = &self.mode {
            config.mode = Some(RuntimeMode::from(mode.clone()));
        }
        if self.host_uri.is_some() {
            config.host_uri = self.host_uri.clone();
        }
        if self.endpoint.is_some() {
            config.endpoint = self.endpoint.clone();
        }
        if self.authorization.is_some() {
            config.authorization = self.authorization.clone();
        }

        Ok(config)
    }

    /// Returns the stale-response policy for watch mode.
    pub fn stale_policy(&self) -> StalePolicy {
        if self.latest_only {
            StalePolicy::LatestIssued
        } else {
            StalePolicy::LastSettled
        }
    }

    /// Reads the query from the positional argument or `--query-file`.
    ///
    /// Returns `None` when neither is given.
    pub fn read_query(&self) -> Result<Option<String>> {
        if let Some(query) = &self.query {
            return Ok(Some(query.clone()));
        }

        match self.query_file.as_deref() {
            Some("-") => {
                let mut query = String::new();
                std::io::stdin()
                    .read_to_string(&mut query)
                    .map_err(|e| FetchError::internal(format!("Failed to read stdin: {e}")))?;
                Ok(Some(query))
            }
            Some(path) => std::fs::read_to_string(path).map(Some).map_err(|e| {
                FetchError::internal(format!("Failed to read query file {path}: {e}"))
            }),
            None => Ok(None),
        }
    }
}
