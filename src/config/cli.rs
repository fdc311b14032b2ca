use crate::core::Storage;
use crate::utils::error::Result;
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::net::SocketAddr;
use std::path::Path;

#[derive(Debug, Clone, Parser)]
#[command(name = "airfare-insights")]
#[command(about = "Monthly airfare price insights for an origin/destination pair")]
pub struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, global = true, default_value = "airfare-insights.toml")]
    pub config: String,

    /// Provider access token (overrides the configuration file)
    #[arg(long, global = true, env = "TRAVELPAYOUTS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Serve the web form
    Serve(ServeArgs),
    /// Fetch one route, print its summary and write output files
    Query(QueryArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ServeArgs {
    /// Listen address (overrides server.addr)
    #[arg(long)]
    pub addr: Option<SocketAddr>,
}

#[derive(Debug, Clone, Args)]
pub struct QueryArgs {
    /// Origin airport code (defaults to route.default_origin)
    #[arg(long)]
    pub origin: Option<String>,

    /// Destination airport code (defaults to route.default_destination)
    #[arg(long)]
    pub destination: Option<String>,

    /// Output directory (overrides output.path)
    #[arg(long)]
    pub output: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }

    fn location(&self, path: &str) -> String {
        Path::new(&self.base_path).join(path).display().to_string()
    }
}
