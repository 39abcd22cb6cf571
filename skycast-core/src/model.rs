use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Geographic coordinates, decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// One point-in-time current-weather reading for a location.
///
/// Produced by a single current-conditions fetch. Temperatures are in
/// Kelvin as delivered by the provider; conversion happens at display time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city_name: String,
    pub observed_at: DateTime<Utc>,
    pub temperature_k: f64,
    pub feels_like_k: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    /// Condition group word, e.g. "Clear" or "Rain".
    pub condition_main: String,
    pub condition_description: String,
    pub icon_code: String,
    pub coordinates: Coordinates,
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
}

/// One 3-hour-resolution predicted reading from the multi-day forecast feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastSample {
    pub timestamp: DateTime<Utc>,
    pub temperature_k: f64,
    pub condition_main: String,
    pub condition_description: String,
    pub icon_code: String,
}

/// Temperature unit preference. Persisted as `"celsius"` / `"fahrenheit"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "celsius",
            TemperatureUnit::Fahrenheit => "fahrenheit",
        }
    }

    /// Unit letter used after the degree sign.
    pub fn symbol(&self) -> char {
        match self {
            TemperatureUnit::Celsius => 'C',
            TemperatureUnit::Fahrenheit => 'F',
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            TemperatureUnit::Celsius => TemperatureUnit::Fahrenheit,
            TemperatureUnit::Fahrenheit => TemperatureUnit::Celsius,
        }
    }
}

impl std::fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display theme preference. Persisted as `"light"` / `"dark"`,
/// independent of weather data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_toggle_roundtrip() {
        assert_eq!(TemperatureUnit::Celsius.toggled(), TemperatureUnit::Fahrenheit);
        assert_eq!(TemperatureUnit::Celsius.toggled().toggled(), TemperatureUnit::Celsius);
    }

    #[test]
    fn unit_defaults_to_celsius() {
        assert_eq!(TemperatureUnit::default(), TemperatureUnit::Celsius);
    }

    #[test]
    fn theme_defaults_to_light() {
        assert_eq!(Theme::default(), Theme::Light);
    }
}
