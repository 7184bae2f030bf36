//! Server configuration.
//!
//! Every option can come from a command-line flag or a `CROP_RECS_*`
//! environment variable; flags win.

use clap::Parser;
use engine::{ArtifactPaths, DEFAULT_DATA_PATH, DEFAULT_LABELS_PATH, DEFAULT_MODEL_PATH, DEFAULT_TOP_N};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "crop-recs-server")]
#[command(about = "HTTP API serving crop recommendations by district", long_about = None)]
pub struct ServerConfig {
    /// Interface to bind
    #[arg(long, env = "CROP_RECS_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "CROP_RECS_PORT", default_value_t = 5000)]
    pub port: u16,

    /// District soil/weather CSV
    #[arg(long, env = "CROP_RECS_DATA", default_value = DEFAULT_DATA_PATH)]
    pub data: PathBuf,

    /// Random forest JSON artifact
    #[arg(long, env = "CROP_RECS_MODEL", default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,

    /// Label encoder JSON artifact
    #[arg(long, env = "CROP_RECS_LABELS", default_value = DEFAULT_LABELS_PATH)]
    pub labels: PathBuf,

    /// Number of crops returned per prediction
    #[arg(long, env = "CROP_RECS_TOP_N", default_value_t = DEFAULT_TOP_N, value_parser = parse_top_n)]
    pub top_n: usize,
}

impl ServerConfig {
    pub fn artifact_paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            data: self.data.clone(),
            model: self.model.clone(),
            labels: self.labels.clone(),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_top_n(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("top-n must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::try_parse_from(["crop-recs-server"]).unwrap();
        assert_eq!(config.top_n, 3);
        assert_eq!(config.artifact_paths(), ArtifactPaths::default());
    }

    #[test]
    fn test_flags_override() {
        let config = ServerConfig::try_parse_from([
            "crop-recs-server",
            "--host",
            "127.0.0.1",
            "--port",
            "8080",
            "--top-n",
            "5",
            "--data",
            "/srv/districts.csv",
        ])
        .unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.top_n, 5);
        assert_eq!(config.artifact_paths().data, PathBuf::from("/srv/districts.csv"));
    }

    #[test]
    fn test_rejects_zero_top_n() {
        assert!(ServerConfig::try_parse_from(["crop-recs-server", "--top-n", "0"]).is_err());
    }
}
