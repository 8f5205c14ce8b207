use std::net::SocketAddr;

use clap::{Parser, ValueEnum};

/// Which storage backend the gateway connects to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    Mongodb,
    /// Process-local storage, lost on exit.
    Memory,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "pickline-server", version, about = "Sports prediction content API")]
pub struct Config {
    /// Listen address
    #[arg(long, default_value = "0.0.0.0:8000", env = "LISTEN_ADDR")]
    pub addr: SocketAddr,

    /// MongoDB connection string
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// MongoDB database name
    #[arg(long, env = "DATABASE_NAME")]
    pub database_name: Option<String>,

    /// Storage backend
    #[arg(long, value_enum, default_value_t = StoreKind::Mongodb, env = "STORE_BACKEND")]
    pub store: StoreKind,

    /// Emit JSON log lines
    #[arg(long, env = "LOG_JSON")]
    pub log_json: bool,
}

impl Config {
    /// The connection string, ignoring an empty value.
    pub fn database_url(&self) -> Option<&str> {
        non_empty(self.database_url.as_deref())
    }

    /// The database name, ignoring an empty value.
    pub fn database_name(&self) -> Option<&str> {
        non_empty(self.database_name.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.is_empty())
}
