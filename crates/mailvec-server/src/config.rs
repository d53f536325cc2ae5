use clap::Parser;

use mailvec_core::types::DEFAULT_DIMENSION;

#[derive(Parser, Debug)]
#[command(name = "mailvec-server", about = "mailvec HTTP server")]
pub struct Config {
    #[arg(long, default_value = "0.0.0.0", env = "MAILVEC_HOST")]
    pub host: String,

    #[arg(long, default_value_t = 8080, env = "MAILVEC_PORT")]
    pub port: u16,

    /// Embedding length reported to clients. Not enforced on ingest.
    #[arg(long, default_value_t = DEFAULT_DIMENSION, env = "MAILVEC_DIMENSION")]
    pub dimension: usize,

    #[arg(long, default_value_t = 5, env = "MAILVEC_DEFAULT_LIMIT")]
    pub default_limit: usize,

    #[arg(long, default_value_t = 0.1, env = "MAILVEC_DEFAULT_THRESHOLD")]
    pub default_threshold: f32,
}

impl Config {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
