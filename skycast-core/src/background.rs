//! Background condition classes derived from the current weather.

use crate::model::WeatherSnapshot;

/// Backdrop shown behind the dashboard, one class per condition group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    ClearDay,
    ClearNight,
    Clouds,
    Rain,
    Snow,
}

impl Background {
    /// Stable class name, usable as a style hook.
    pub fn class_name(&self) -> &'static str {
        match self {
            Background::ClearDay => "clear-day",
            Background::ClearNight => "clear-night",
            Background::Clouds => "clouds",
            Background::Rain => "rain",
            Background::Snow => "snow",
        }
    }

    /// Classify a snapshot. Daytime means the observation falls strictly
    /// between sunrise and sunset; unrecognized condition words fall back
    /// to the clear day/night variant.
    pub fn for_snapshot(snapshot: &WeatherSnapshot) -> Self {
        let is_day =
            snapshot.observed_at > snapshot.sunrise && snapshot.observed_at < snapshot.sunset;

        Self::classify(&snapshot.condition_main, is_day)
    }

    pub fn classify(condition_main: &str, is_day: bool) -> Self {
        let clear = if is_day { Background::ClearDay } else { Background::ClearNight };

        match condition_main.to_lowercase().as_str() {
            "clear" => clear,
            "clouds" => Background::Clouds,
            "rain" | "drizzle" | "thunderstorm" => Background::Rain,
            "snow" => Background::Snow,
            _ => clear,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coordinates;
    use chrono::{TimeZone, Utc};

    fn snapshot(condition_main: &str, observed_hour: u32) -> WeatherSnapshot {
        let at = |hour| Utc.with_ymd_and_hms(2026, 8, 4, hour, 0, 0).single().expect("valid time");

        WeatherSnapshot {
            city_name: "London".to_string(),
            observed_at: at(observed_hour),
            temperature_k: 293.15,
            feels_like_k: 292.0,
            humidity_pct: 60,
            wind_speed_mps: 4.0,
            condition_main: condition_main.to_string(),
            condition_description: condition_main.to_lowercase(),
            icon_code: "01d".to_string(),
            coordinates: Coordinates { lat: 51.5, lon: -0.12 },
            sunrise: at(5),
            sunset: at(20),
        }
    }

    #[test]
    fn clear_daytime_observation_selects_clear_day() {
        let snapshot = snapshot("Clear", 12);
        assert_eq!(Background::for_snapshot(&snapshot), Background::ClearDay);
    }

    #[test]
    fn clear_after_sunset_selects_clear_night() {
        let snapshot = snapshot("Clear", 22);
        assert_eq!(Background::for_snapshot(&snapshot), Background::ClearNight);
    }

    #[test]
    fn rain_family_shares_one_class() {
        for condition in ["Rain", "Drizzle", "Thunderstorm"] {
            assert_eq!(Background::classify(condition, true), Background::Rain);
        }
    }

    #[test]
    fn unknown_condition_falls_back_to_clear_variant() {
        assert_eq!(Background::classify("Haze", true), Background::ClearDay);
        assert_eq!(Background::classify("Haze", false), Background::ClearNight);
    }

    #[test]
    fn snow_and_clouds_map_to_their_classes() {
        assert_eq!(Background::classify("Snow", false), Background::Snow);
        assert_eq!(Background::classify("Clouds", true), Background::Clouds);
    }

    #[test]
    fn class_names_are_stable() {
        assert_eq!(Background::ClearDay.class_name(), "clear-day");
        assert_eq!(Background::Rain.class_name(), "rain");
    }
}
