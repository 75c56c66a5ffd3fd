use anyhow::{Context, Result, bail};
use clap::Parser;
use std::env;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_DATABASE_URL: &str = "sqlite://./data/bookmarks.db";

/// Centralized application configuration.
/// Combines environment variables and CLI arguments.
#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub api_token: String,
}

// The token never goes to the logs.
impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &self.database_url)
            .field("api_token", &"<redacted>")
            .finish()
    }
}

/// Command-line + environment configuration.
#[derive(Parser, Debug, Default)]
#[command(author, version, about = "Bookmarks CRUD API")]
pub struct Args {
    /// Host to bind to (overrides BOOKMARKS_HOST)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind to (overrides BOOKMARKS_PORT)
    #[arg(long)]
    pub port: Option<u16>,

    /// Database URL (overrides BOOKMARKS_DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Bearer token required on every /api request (overrides BOOKMARKS_API_TOKEN)
    #[arg(long)]
    pub api_token: Option<String>,

    /// Run migrations and exit
    #[arg(long)]
    pub migrate: bool,
}

impl AppConfig {
    /// Parse environment variables + CLI args into AppConfig and migrate flag.
    pub fn from_env_and_args() -> Result<(Self, bool)> {
        // A missing .env is the normal case outside development.
        let _ = dotenvy::dotenv();
        let args = Args::parse();
        Self::resolve(args, |key| env::var(key))
    }

    /// Merge parsed CLI args over whatever `lookup` returns for each variable.
    pub fn resolve<F>(args: Args, lookup: F) -> Result<(Self, bool)>
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        // --- Environment fallback ---
        let env_host = lookup("BOOKMARKS_HOST").unwrap_or_else(|_| DEFAULT_HOST.into());
        let env_port = match lookup("BOOKMARKS_PORT") {
            Ok(value) => Some(
                value
                    .parse::<u16>()
                    .with_context(|| format!("parsing BOOKMARKS_PORT value `{}`", value))?,
            ),
            Err(env::VarError::NotPresent) => None,
            Err(err) => return Err(err).context("reading BOOKMARKS_PORT"),
        };
        let env_db =
            lookup("BOOKMARKS_DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.into());

        let api_token = match args.api_token {
            Some(token) => token,
            None => lookup("BOOKMARKS_API_TOKEN").context("reading BOOKMARKS_API_TOKEN")?,
        };
        if api_token.trim().is_empty() {
            bail!("BOOKMARKS_API_TOKEN must not be empty");
        }

        // --- Merge ---
        let cfg = Self {
            host: args.host.unwrap_or(env_host),
            port: args.port.or(env_port).unwrap_or(DEFAULT_PORT),
            database_url: args.database_url.unwrap_or(env_db),
            api_token,
        };

        Ok((cfg, args.migrate))
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
