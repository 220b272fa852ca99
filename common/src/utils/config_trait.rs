use anyhow::Error;
use std::{fmt::Display, str::FromStr};
use tracing::{debug, warn};

pub trait ConfigTrait: Sized {
    fn read_env_variables() -> Result<Self, Error>;
}

/// Loads a `.env` file from the working directory if one exists.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => debug!("No .env file found, using process environment"),
        Err(e) => warn!("Failed to load .env file: {e}"),
    }
}

pub fn read_env<T>(name: &str, default: &str) -> Result<T, Error>
where
    T: FromStr,
    T::Err: Display,
{
    let value = std::env::var(name).unwrap_or_else(|_| {
        debug!("{name} not set, using default {default}");
        default.to_string()
    });
    value
        .parse::<T>()
        .map_err(|e| anyhow::anyhow!("{name} has invalid value {value}: {e}"))
}

pub fn read_optional_env<T>(name: &str) -> Result<Option<T>, Error>
where
    T: FromStr,
    T::Err: Display,
{
    match std::env::var(name) {
        Ok(value) if !value.is_empty() => value
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("{name} has invalid value {value}: {e}")),
        _ => Ok(None),
    }
}
