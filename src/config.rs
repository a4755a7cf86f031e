//! Application configuration loaded from environment variables.

use crate::db::keys;
use crate::models::Coordinates;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// Directory holding the file-backed store
    pub data_dir: PathBuf,
    /// Key the workout collection is saved under
    pub storage_key: String,
    /// Zoom level for the initial view and for focusing a workout
    pub map_zoom: u8,
    /// Fixed start position; when unset the client reports one
    pub home_position: Option<Coordinates>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8080,
            frontend_url: "http://localhost:5173".to_string(),
            data_dir: PathBuf::from("data"),
            storage_key: keys::WORKOUTS.to_string(),
            map_zoom: 13,
            home_position: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let home_position = match (lookup("HOME_LAT"), lookup("HOME_LNG")) {
            (Some(lat), Some(lng)) => {
                let position = Coordinates::new(
                    parse_var("HOME_LAT", &lat)?,
                    parse_var("HOME_LNG", &lng)?,
                );
                position.validate().map_err(|_| ConfigError::Invalid {
                    name: "HOME_LAT/HOME_LNG",
                    value: format!("{},{}", lat, lng),
                })?;
                Some(position)
            }
            (Some(_), None) => return Err(ConfigError::Missing("HOME_LNG")),
            (None, Some(_)) => return Err(ConfigError::Missing("HOME_LAT")),
            (None, None) => None,
        };

        let storage_key = lookup("STORAGE_KEY").unwrap_or(defaults.storage_key);
        if !keys::is_valid(&storage_key) {
            return Err(ConfigError::Invalid {
                name: "STORAGE_KEY",
                value: storage_key,
            });
        }

        Ok(Self {
            port: lookup("PORT")
                .map(|v| parse_var("PORT", &v))
                .transpose()?
                .unwrap_or(defaults.port),
            frontend_url: lookup("FRONTEND_URL").unwrap_or(defaults.frontend_url),
            data_dir: lookup("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            storage_key,
            map_zoom: lookup("MAP_ZOOM")
                .map(|v| parse_var("MAP_ZOOM", &v))
                .transpose()?
                .unwrap_or(defaults.map_zoom),
            home_position,
        })
    }
}

fn parse_var<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
