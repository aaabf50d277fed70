use std::{env, net::SocketAddr};

use crate::errors::AppError;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3001";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let database_url =
            env::var("DATABASE_URL").map_err(|_| AppError::MissingConfig("DATABASE_URL"))?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        Self::new(database_url, &bind_addr)
    }

    pub fn new(database_url: String, bind_addr: &str) -> Result<Self, AppError> {
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|_| AppError::InvalidConfig {
                name: "BIND_ADDR",
                value: bind_addr.to_string(),
            })?;
        Ok(Self {
            database_url,
            bind_addr,
        })
    }
}
