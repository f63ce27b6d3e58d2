//! Text rendering of a [`WeatherReport`].

use crate::{
    convert::{k_to_f, local_clock_time},
    model::{UnitSystem, WeatherReport},
};

pub const NO_DATA: &str = "No weather data available.";

const LABEL_WIDTH: usize = 20;
const RULE_WIDTH: usize = 45;

/// Render the report for `city, region_code`, or the no-data line when absent.
///
/// Temperatures are always shown in Fahrenheit; Kelvin values are converted
/// when the report was fetched without imperial units.
pub fn render(
    report: Option<&WeatherReport>,
    city: &str,
    region_code: &str,
    units: UnitSystem,
) -> String {
    let Some(report) = report else {
        return NO_DATA.to_string();
    };

    let fahrenheit = |t: f64| match units {
        UnitSystem::Imperial => t,
        UnitSystem::Standard => k_to_f(t),
    };
    let clock = |ts: i64| local_clock_time(ts, report.timezone).unwrap_or_else(|| "--:--".into());

    let main = &report.main;
    let rule = "-".repeat(RULE_WIDTH);

    let rows = [
        ("Conditions:", report.description().to_string()),
        ("Temperature:", format!("{:.2} °F", fahrenheit(main.temp))),
        ("Feels Like:", format!("{:.2} °F", fahrenheit(main.feels_like))),
        ("Min Temperature:", format!("{:.2} °F", fahrenheit(main.temp_min))),
        ("Max Temperature:", format!("{:.2} °F", fahrenheit(main.temp_max))),
        (
            "Wind Speed:",
            format!("{:.2} {}", report.wind.speed, units.wind_speed_label()),
        ),
        ("Sunrise:", clock(report.sys.sunrise)),
        ("Sunset:", clock(report.sys.sunset)),
    ];

    let mut lines = vec![
        format!("Current Weather Forecast for {city}, {region_code}"),
        rule.clone(),
    ];
    lines.extend(
        rows.into_iter()
            .map(|(label, value)| format!("{label:<LABEL_WIDTH$} {value}")),
    );
    lines.push(rule);

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(units: UnitSystem) -> WeatherReport {
        let (temp, feels, min, max) = match units {
            UnitSystem::Imperial => (70.5, 69.0, 65.25, 75.0),
            UnitSystem::Standard => (273.15, 283.15, 263.15, 293.15),
        };

        serde_json::from_value(serde_json::json!({
            "name": "San Diego",
            "weather": [{ "description": "clear sky" }, { "description": "mist" }],
            "main": { "temp": temp, "temp_min": min, "temp_max": max, "feels_like": feels },
            "wind": { "speed": 4.6 },
            "sys": { "sunrise": 1_700_000_000, "sunset": 1_700_037_000 },
            "timezone": -28_800
        }))
        .unwrap()
    }

    #[test]
    fn absent_report_is_single_line() {
        let out = render(None, "San Diego", "CA", UnitSystem::Imperial);
        assert_eq!(out, "No weather data available.");
    }

    #[test]
    fn imperial_report_layout() {
        let out = render(Some(&report(UnitSystem::Imperial)), "San Diego", "CA", UnitSystem::Imperial);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], "Current Weather Forecast for San Diego, CA");
        assert_eq!(lines[1], "-".repeat(45));
        assert_eq!(lines[2], "Conditions:          clear sky");
        assert_eq!(lines[3], "Temperature:         70.50 °F");
        assert_eq!(lines[4], "Feels Like:          69.00 °F");
        assert_eq!(lines[5], "Min Temperature:     65.25 °F");
        assert_eq!(lines[6], "Max Temperature:     75.00 °F");
        assert_eq!(lines[7], "Wind Speed:          4.60 mph");
        assert_eq!(lines[8], "Sunrise:             02:13 PM");
        assert_eq!(lines[9], "Sunset:              12:30 AM");
        assert_eq!(lines[10], "-".repeat(45));
        assert!(!out.ends_with('\n'));
    }

    #[test]
    fn standard_report_converts_kelvin() {
        let out = render(Some(&report(UnitSystem::Standard)), "San Diego", "CA", UnitSystem::Standard);

        assert!(out.contains("Temperature:         32.00 °F"));
        assert!(out.contains("Feels Like:          50.00 °F"));
        assert!(out.contains("Min Temperature:     14.00 °F"));
        assert!(out.contains("Max Temperature:     68.00 °F"));
        assert!(out.contains("Wind Speed:          4.60 m/s"));
    }
}
