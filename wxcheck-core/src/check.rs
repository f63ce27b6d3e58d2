use crate::{
    error::LookupError,
    model::{LocationQuery, UnitSystem},
    present,
    provider::WeatherProvider,
};

pub const GEOCODE_FAILED: &str = "Failed to fetch geolocation data.";

/// Run one weather check: geocode, fetch, render.
///
/// Always produces printable text; lookup failures become user-facing messages.
pub async fn check<P>(provider: &P, query: &LocationQuery, units: UnitSystem) -> String
where
    P: WeatherProvider + ?Sized,
{
    let coordinate = match provider.resolve(query).await {
        Ok(c) => c,
        Err(LookupError::NotFound | LookupError::Unavailable) => {
            tracing::info!(q = %query.to_geocode_param(), "Location not resolved");
            return GEOCODE_FAILED.to_string();
        }
    };

    tracing::debug!(
        lat = coordinate.latitude,
        lon = coordinate.longitude,
        "Location resolved"
    );

    let report = provider.fetch(coordinate, units).await.ok();
    present::render(report.as_ref(), &query.city, &query.region_code, units)
}
