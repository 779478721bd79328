use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use comensales_core::AppError;
use tracing_subscriber::EnvFilter;

const SERVICE_SECRET_MIN_LENGTH: usize = 32;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_host: String,
    pub api_port: u16,
    pub service_secret: String,
    pub directory_seed_path: Option<PathBuf>,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let api_host = lookup("ACCESS_API_HOST").unwrap_or_else(|| "127.0.0.1".to_owned());
        let api_port = match lookup("ACCESS_API_PORT") {
            Some(value) => value.parse::<u16>().map_err(|error| {
                AppError::Validation(format!("invalid ACCESS_API_PORT '{value}': {error}"))
            })?,
            None => 3002,
        };

        let service_secret = lookup("ACCESS_SERVICE_SECRET")
            .ok_or_else(|| AppError::Validation("ACCESS_SERVICE_SECRET is required".to_owned()))?;
        if service_secret.len() < SERVICE_SECRET_MIN_LENGTH {
            return Err(AppError::Validation(format!(
                "ACCESS_SERVICE_SECRET must be at least {SERVICE_SECRET_MIN_LENGTH} characters"
            )));
        }

        let directory_seed_path = lookup("ACCESS_DIRECTORY_SEED_PATH")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            api_host,
            api_port,
            service_secret,
            directory_seed_path,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Validation(format!(
                "invalid ACCESS_API_HOST '{}': {error}",
                self.api_host
            ))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}
