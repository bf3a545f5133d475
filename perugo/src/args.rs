use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;

/// PerúGo voice assistant backend
#[derive(Debug, Parser)]
#[command(name = "perugo", about = "Speech, chat and travel-graph backend for PerúGo")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "perugo.toml", env = "PERUGO_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "PERUGO_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Override only the listen port, as set by most PaaS hosts
    #[arg(long, env = "PORT", conflicts_with = "listen")]
    pub port: Option<u16>,
}

impl Args {
    /// Listen address after applying `--listen` or `--port` to the configured one
    pub fn listen_address(&self, configured: Option<SocketAddr>) -> Option<SocketAddr> {
        if let Some(listen) = self.listen {
            return Some(listen);
        }

        match (self.port, configured) {
            (Some(port), Some(mut address)) => {
                address.set_port(port);
                Some(address)
            }
            (Some(port), None) => Some(SocketAddr::from(([0, 0, 0, 0], port))),
            (None, configured) => configured,
        }
    }
}
