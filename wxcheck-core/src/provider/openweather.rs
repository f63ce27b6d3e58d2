use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::{
    config::ApiKey,
    error::LookupError,
    model::{Coordinate, LocationQuery, UnitSystem, WeatherReport},
};

use super::WeatherProvider;

const GEOCODE_PATH: &str = "/geo/1.0/direct";
const WEATHER_PATH: &str = "/data/2.5/weather";

/// Client for the OpenWeather geocoding and current-weather endpoints.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: ApiKey,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: ApiKey, base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// One GET against `path`. Any failure is logged and yields `None`.
    async fn get_json<T: DeserializeOwned + Send>(
        &self,
        path: &'static str,
        params: &[(&str, String)],
    ) -> Option<T> {
        let url = format!("{}{}", self.base_url, path);

        let res = match self
            .http
            .get(&url)
            .query(params)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                // without_url keeps the appid out of the log line
                tracing::warn!(path, error = %e.without_url(), "OpenWeather request failed");
                return None;
            }
        };

        let status = res.status();
        let body = match res.text().await {
            Ok(b) => b,
            Err(e) => {
                tracing::warn!(path, error = %e.without_url(), "Failed to read OpenWeather response body");
                return None;
            }
        };

        if status != StatusCode::OK {
            tracing::warn!(path, %status, body = %truncate_body(&body), "OpenWeather returned an error status");
            return None;
        }

        match serde_json::from_str(&body) {
            Ok(parsed) => {
                tracing::debug!(path, %status, "OpenWeather response decoded");
                Some(parsed)
            }
            Err(e) => {
                tracing::debug!(path, error = %e, body = %truncate_body(&body), "Failed to parse OpenWeather JSON");
                None
            }
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn resolve(&self, query: &LocationQuery) -> Result<Coordinate, LookupError> {
        let params = [
            ("q", query.to_geocode_param()),
            ("limit", "1".to_string()),
        ];

        let matches: Vec<Coordinate> = self
            .get_json(GEOCODE_PATH, &params)
            .await
            .ok_or(LookupError::NotFound)?;

        let first = matches.into_iter().next();
        if first.is_none() {
            tracing::debug!(q = %query.to_geocode_param(), "Geocoding returned no matches");
        }
        first.ok_or(LookupError::NotFound)
    }

    async fn fetch(
        &self,
        coordinate: Coordinate,
        units: UnitSystem,
    ) -> Result<WeatherReport, LookupError> {
        let mut params = vec![
            ("lat", coordinate.latitude.to_string()),
            ("lon", coordinate.longitude.to_string()),
        ];
        if let Some(value) = units.query_value() {
            params.push(("units", value.to_string()));
        }

        self.get_json(WEATHER_PATH, &params)
            .await
            .ok_or(LookupError::Unavailable)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
