use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    Config,
    error::LookupError,
    model::{Coordinate, LocationQuery, UnitSystem, WeatherReport},
    provider::openweather::OpenWeatherProvider,
};

pub mod openweather;

/// The two remote lookups a weather check needs.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Geocode a place to coordinates. One request, first match only.
    async fn resolve(&self, query: &LocationQuery) -> Result<Coordinate, LookupError>;

    /// Current conditions at `coordinate`.
    async fn fetch(
        &self,
        coordinate: Coordinate,
        units: UnitSystem,
    ) -> Result<WeatherReport, LookupError>;
}

/// Construct the OpenWeather provider from config.
///
/// Fails when no API key is configured or the HTTP client cannot be built.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.credential()?.clone();

    let provider = OpenWeatherProvider::new(api_key, &config.base_url, config.timeout())?;

    Ok(Box::new(provider))
}
