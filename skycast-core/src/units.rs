//! Temperature conversion and display rounding.
//!
//! Readings arrive from the provider in Kelvin and are converted to the
//! user's unit only at display time. Unit toggling re-derives values from
//! the integers already on screen, see [`reconvert_display`].

use crate::model::TemperatureUnit;

/// Convert an absolute Kelvin temperature to the given display unit.
pub fn kelvin_to_unit(kelvin: f64, unit: TemperatureUnit) -> f64 {
    match unit {
        TemperatureUnit::Celsius => kelvin - 273.15,
        TemperatureUnit::Fahrenheit => (kelvin - 273.15) * 9.0 / 5.0 + 32.0,
    }
}

/// Round a converted temperature for display: nearest integer, ties away
/// from zero.
pub fn display_degrees(value: f64) -> i32 {
    value.round() as i32
}

/// Kelvin reading to on-screen integer in one step.
pub fn displayed(kelvin: f64, unit: TemperatureUnit) -> i32 {
    display_degrees(kelvin_to_unit(kelvin, unit))
}

/// Format an on-screen integer with the degree sign and unit letter,
/// e.g. `21°C`.
pub fn format_degrees(value: i32, unit: TemperatureUnit) -> String {
    format!("{value}\u{b0}{}", unit.symbol())
}

/// Re-derive a displayed temperature when the unit toggles.
///
/// Converts the already-rounded on-screen integer rather than the original
/// Kelvin reading, so repeated toggles can drift by a degree. Callers that
/// need exact values must re-fetch.
pub fn reconvert_display(displayed: i32, target: TemperatureUnit) -> i32 {
    let value = f64::from(displayed);
    let converted = match target {
        TemperatureUnit::Celsius => (value - 32.0) * 5.0 / 9.0,
        TemperatureUnit::Fahrenheit => value * 9.0 / 5.0 + 32.0,
    };
    display_degrees(converted)
}

/// Wind speed for display: m/s to km/h, rounded to the nearest integer.
pub fn wind_kmh(meters_per_second: f64) -> i32 {
    (meters_per_second * 3.6).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TemperatureUnit::{Celsius, Fahrenheit};

    #[test]
    fn freezing_point() {
        assert_eq!(kelvin_to_unit(273.15, Celsius), 0.0);
        assert_eq!(kelvin_to_unit(273.15, Fahrenheit), 32.0);
    }

    #[test]
    fn fahrenheit_tracks_celsius() {
        for k in [0.0, 255.37, 273.15, 293.65, 310.15] {
            let c = kelvin_to_unit(k, Celsius);
            let f = kelvin_to_unit(k, Fahrenheit);
            assert!((f - (c * 9.0 / 5.0 + 32.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn display_rounds_ties_away_from_zero() {
        assert_eq!(display_degrees(20.5), 21);
        assert_eq!(display_degrees(-20.5), -21);
        assert_eq!(display_degrees(20.4), 20);
    }

    #[test]
    fn format_carries_degree_sign_and_letter() {
        assert_eq!(format_degrees(21, Celsius), "21°C");
        assert_eq!(format_degrees(-3, Fahrenheit), "-3°F");
    }

    #[test]
    fn reconvert_uses_rounded_display_value() {
        // 294.55 K is 21.4 °C, shown as 21°C. Toggling converts the 21,
        // not the 21.4: 21 °C -> 69.8 °F -> 70°F.
        let shown = displayed(294.55, Celsius);
        assert_eq!(shown, 21);
        assert_eq!(reconvert_display(shown, Fahrenheit), 70);

        // Toggling back lands on 21 again here, but drift up to one degree
        // is possible in general.
        assert_eq!(reconvert_display(70, Celsius), 21);
    }

    #[test]
    fn reconvert_drift_accumulates() {
        // 16 °C -> 61 °F -> 16 °C (stable), but 17 °C -> 63 °F -> 17 °C
        // while 62.6 °F would have been exact. The integers on screen are
        // all the toggle path sees.
        assert_eq!(reconvert_display(17, Fahrenheit), 63);
        assert_eq!(reconvert_display(63, Celsius), 17);
    }

    #[test]
    fn wind_converts_to_kmh() {
        assert_eq!(wind_kmh(5.0), 18);
        assert_eq!(wind_kmh(3.2), 12); // 11.52 rounds to 12
    }
}
