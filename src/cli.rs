//! CLI argument parsing with clap.

use std::net::SocketAddr;

use clap::Parser;

/// Bilingual children's story generation service.
#[derive(Parser, Debug)]
#[command(name = "storybloom", version, about)]
pub struct Cli {
    /// Address to bind.
    #[arg(short, long, default_value = "0.0.0.0")]
    pub bind: String,

    /// Port to listen on.
    #[arg(short, long, default_value = "3000")]
    pub port: u16,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Resolve the listen address from the bind/port flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the bind address is not a valid IP address.
    pub fn listen_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.bind, self.port)
            .parse()
            .map_err(|e| format!("Invalid bind address '{}': {e}", self.bind))
    }
}
