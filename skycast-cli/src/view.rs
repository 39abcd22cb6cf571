//! Terminal rendering of the dashboard.

use chrono::{DateTime, Local, Utc};

use skycast_core::controller::{CurrentPanel, DashboardView, ForecastEntry};
use skycast_core::units;
use skycast_core::{Background, Theme};

/// Prints whatever the controller hands it; holds no state of its own.
#[derive(Debug, Default)]
pub struct TerminalView;

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DashboardView for TerminalView {
    fn show_current(&mut self, panel: &CurrentPanel) {
        println!();
        println!("  {}", panel.city);
        println!("  {}", format_date(panel.observed_at));
        println!(
            "  {}  {}",
            units::format_degrees(panel.temperature, panel.unit),
            panel.description
        );
        println!("  feels like {}", units::format_degrees(panel.feels_like, panel.unit));
        println!("  humidity {}%   wind {} km/h", panel.humidity_pct, panel.wind_kmh);
    }

    fn show_forecast(&mut self, entries: &[ForecastEntry]) {
        if entries.is_empty() {
            return;
        }

        println!();
        for entry in entries {
            println!(
                "  {}  {:>5}  {}",
                format_day(entry.date),
                units::format_degrees(entry.temperature, entry.unit),
                entry.description
            );
        }
    }

    fn set_background(&mut self, background: Background) {
        println!("  sky: {}", background.class_name());
    }

    fn set_theme(&mut self, theme: Theme) {
        println!("  theme: {theme}");
    }

    fn set_title(&mut self, city: &str) {
        // OSC 0 sets the terminal window title.
        print!("\x1b]0;skycast | {city}\x07");
    }

    fn show_favorites(&mut self, favorites: &[String]) {
        if favorites.is_empty() {
            return;
        }

        println!("  favorites: {}", favorites.join(", "));
    }

    fn set_favorite_marker(&mut self, is_favorite: bool) {
        if is_favorite {
            println!("  (favorite)");
        }
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("  ! {message}");
    }

    fn clear_error(&mut self) {}
}

/// "Monday, August 4, 2026, 12:00 PM" in the viewer's timezone.
fn format_date(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%A, %B %-d, %Y, %-I:%M %p").to_string()
}

/// Short weekday name, e.g. "Mon".
fn format_day(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%a").to_string()
}
