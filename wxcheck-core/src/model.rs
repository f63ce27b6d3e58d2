use serde::{Deserialize, Serialize};
use std::fmt;

/// A place as typed by the user: "San Diego", "CA", "US".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationQuery {
    pub city: String,
    pub region_code: String,
    pub country_code: String,
}

impl LocationQuery {
    pub fn new(
        city: impl Into<String>,
        region_code: impl Into<String>,
        country_code: impl Into<String>,
    ) -> Self {
        Self {
            city: city.into(),
            region_code: region_code.into(),
            country_code: country_code.into(),
        }
    }

    /// The `q` parameter of the direct geocoding endpoint.
    pub fn to_geocode_param(&self) -> String {
        format!(
            "{},{},{}",
            self.city.trim(),
            self.region_code.trim(),
            self.country_code.trim()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Coordinate {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
}

/// Unit system requested from the weather endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    /// Fahrenheit and miles per hour, straight from the API.
    #[default]
    Imperial,
    /// Kelvin and metres per second; temperatures are converted for display.
    Standard,
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Imperial => "imperial",
            UnitSystem::Standard => "standard",
        }
    }

    /// Value for the `units` query parameter, if one is sent at all.
    pub fn query_value(&self) -> Option<&'static str> {
        match self {
            UnitSystem::Imperial => Some("imperial"),
            UnitSystem::Standard => None,
        }
    }

    pub fn wind_speed_label(&self) -> &'static str {
        match self {
            UnitSystem::Imperial => "mph",
            UnitSystem::Standard => "m/s",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for UnitSystem {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "imperial" => Ok(UnitSystem::Imperial),
            "standard" => Ok(UnitSystem::Standard),
            _ => Err(anyhow::anyhow!(
                "Unknown unit system '{value}'. Supported: imperial, standard."
            )),
        }
    }
}

/// Current conditions as returned by `/data/2.5/weather`.
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherReport {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub weather: Vec<Condition>,
    pub main: Temperatures,
    pub wind: Wind,
    pub sys: SunTimes,
    /// Shift from UTC in seconds for the queried location.
    pub timezone: i64,
}

impl WeatherReport {
    pub fn description(&self) -> &str {
        self.weather
            .first()
            .map(|w| w.description.as_str())
            .unwrap_or("Unknown")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Condition {
    pub description: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Temperatures {
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub feels_like: f64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SunTimes {
    pub sunrise: i64,
    pub sunset: i64,
}
