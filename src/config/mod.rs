use anyhow::{anyhow, Context};
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub storage: StorageBackend,
    pub url: Option<String>,
    pub pool_size: u32,
    pub run_migrations: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Postgres,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Postgres => "postgres",
        }
    }
}

impl FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(Self::Memory),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            other => Err(anyhow!("unknown storage backend '{other}'")),
        }
    }
}

const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://localhost:3001",
    "http://localhost:8080",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:3001",
    "http://127.0.0.1:8080",
];

impl AppConfig {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = get("BOARD_HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match get("BOARD_PORT") {
            Some(v) => v
                .trim()
                .parse::<u16>()
                .with_context(|| format!("BOARD_PORT must be a port number, got '{v}'"))?,
            None => 3000,
        };

        let url = get("DATABASE_URL");
        let storage = match get("BOARD_STORAGE") {
            Some(v) => v
                .parse::<StorageBackend>()
                .with_context(|| "invalid BOARD_STORAGE")?,
            None if url.is_some() => StorageBackend::Postgres,
            None => StorageBackend::Memory,
        };
        if storage == StorageBackend::Postgres && url.is_none() {
            return Err(anyhow!(
                "DATABASE_URL must be set when BOARD_STORAGE=postgres"
            ));
        }

        let pool_size = match get("BOARD_DB_POOL_SIZE") {
            Some(v) => v
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| anyhow!("BOARD_DB_POOL_SIZE must be a positive integer, got '{v}'"))?,
            None => 10,
        };
        let run_migrations = match get("BOARD_RUN_MIGRATIONS") {
            Some(v) => parse_flag(&v)
                .ok_or_else(|| anyhow!("BOARD_RUN_MIGRATIONS must be true or false, got '{v}'"))?,
            None => true,
        };

        let cors_allowed_origins = match get("CORS_ALLOWED_ORIGINS") {
            Some(v) => v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
        };

        Ok(AppConfig {
            server: ServerConfig { host, port },
            database: DatabaseConfig {
                storage,
                url,
                pool_size,
                run_migrations,
            },
            cors_allowed_origins,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
