//! Core library for the `wxcheck` CLI.
//!
//! This crate defines:
//! - Configuration & credential handling
//! - The OpenWeather provider (geocoding and current weather)
//! - Unit/time conversion and the text report
//!
//! It is used by `wxcheck-cli`, but can also be reused by other binaries or services.

pub mod check;
pub mod config;
pub mod convert;
pub mod error;
pub mod model;
pub mod present;
pub mod provider;

pub use check::check;
pub use config::{ApiKey, Config};
pub use error::{ConfigError, LookupError};
pub use model::{Coordinate, LocationQuery, UnitSystem, WeatherReport};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
