use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about = "Catalog books and authors with cover images", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the HTTP server
    Serve(ServeCommand),
}

#[derive(Debug, Args)]
pub struct ServeCommand {
    #[arg(
        long,
        env = "LIBRARIUM_DATABASE_URL",
        default_value = "sqlite://librarium.db"
    )]
    pub database_url: String,

    #[arg(long, env = "LIBRARIUM_BIND_ADDRESS", default_value = "127.0.0.1:3000")]
    pub bind_address: SocketAddr,

    /// Directory that stores uploaded cover images.
    #[arg(long, env = "LIBRARIUM_UPLOAD_DIR", default_value = "uploads/covers")]
    pub upload_dir: PathBuf,
}
