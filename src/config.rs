use std::{env, net::SocketAddr, path::PathBuf};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/tracalorie.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub data_path: PathBuf,
}

impl AppConfig {
    /// Reads `PORT` and `APP_DATA_PATH`, falling back to defaults when unset
    /// or unparsable.
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            port,
            data_path: resolve_data_path(env::var("APP_DATA_PATH").ok()),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

fn resolve_data_path(value: Option<String>) -> PathBuf {
    match value {
        Some(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => PathBuf::from(DEFAULT_DATA_PATH),
    }
}
