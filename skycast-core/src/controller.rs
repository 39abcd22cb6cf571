//! Dashboard controller.
//!
//! Owns the transient application state (current city, unit, theme,
//! favorites cache), dispatches user [`Event`]s, and drives a
//! [`DashboardView`] with fully-derived values. The view never computes;
//! it only displays what it is handed.

use chrono::{DateTime, Utc};

use crate::background::Background;
use crate::client::{FetchError, WeatherClient};
use crate::geo::Geolocator;
use crate::model::{TemperatureUnit, Theme, WeatherSnapshot};
use crate::storage::{self, KeyValueStore};
use crate::units;

pub const MSG_CITY_NOT_FOUND: &str = "City not found. Please try another city.";
pub const MSG_FETCH_FAILED: &str = "Failed to fetch weather data. Please try again later.";
pub const MSG_LOCATION_UNAVAILABLE: &str =
    "Your location could not be determined. Please search for a city manually.";

/// User actions the dashboard reacts to.
#[derive(Debug, Clone)]
pub enum Event {
    Search(String),
    UseGeolocation,
    SelectFavorite(String),
    ToggleFavorite,
    RemoveFavorite(String),
    ToggleUnit,
    ToggleTheme,
}

/// Current-conditions panel content. Temperatures and wind speed are the
/// rounded integers that appear on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentPanel {
    pub city: String,
    pub observed_at: DateTime<Utc>,
    pub temperature: i32,
    pub feels_like: i32,
    pub unit: TemperatureUnit,
    pub description: String,
    pub icon_code: String,
    pub humidity_pct: u8,
    pub wind_kmh: i32,
}

/// One reduced forecast day as shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastEntry {
    pub date: DateTime<Utc>,
    pub temperature: i32,
    pub unit: TemperatureUnit,
    pub description: String,
    pub icon_code: String,
}

/// Rendering port implemented by the host surface (terminal, GUI, tests).
pub trait DashboardView {
    fn show_current(&mut self, panel: &CurrentPanel);
    fn show_forecast(&mut self, entries: &[ForecastEntry]);
    fn set_background(&mut self, background: Background);
    fn set_theme(&mut self, theme: Theme);
    fn set_title(&mut self, city: &str);
    fn show_favorites(&mut self, favorites: &[String]);
    fn set_favorite_marker(&mut self, is_favorite: bool);
    fn show_error(&mut self, message: &str);
    fn clear_error(&mut self);
}

#[derive(Debug, Clone)]
struct Displayed {
    current: CurrentPanel,
    forecast: Vec<ForecastEntry>,
}

pub struct Dashboard<S, L, V> {
    client: WeatherClient,
    store: S,
    locator: L,
    view: V,
    unit: TemperatureUnit,
    theme: Theme,
    current_city: Option<String>,
    favorites: Vec<String>,
    /// Integers from the last render; the unit toggle re-derives from
    /// these, the precise Kelvin readings are not retained.
    displayed: Option<Displayed>,
}

impl<S, L, V> Dashboard<S, L, V>
where
    S: KeyValueStore,
    L: Geolocator,
    V: DashboardView,
{
    /// Build a dashboard, loading preferences and favorites from the store.
    pub fn new(client: WeatherClient, store: S, locator: L, view: V) -> Self {
        let unit = storage::load_unit(&store);
        let theme = storage::load_theme(&store);
        let favorites = storage::favorites(&store);

        Self {
            client,
            store,
            locator,
            view,
            unit,
            theme,
            current_city: None,
            favorites,
            displayed: None,
        }
    }

    /// Startup sequence: apply persisted preferences, then show the first
    /// favorite, falling back to geolocation when there are none.
    pub async fn start(&mut self) {
        self.view.set_theme(self.theme);
        self.view.show_favorites(&self.favorites);

        match self.favorites.first().cloned() {
            Some(city) => self.load_city(&city).await,
            None => self.load_location().await,
        }
    }

    pub async fn handle(&mut self, event: Event) {
        match event {
            Event::Search(city) => {
                let city = city.trim().to_string();
                if !city.is_empty() {
                    self.load_city(&city).await;
                }
            }
            Event::UseGeolocation => self.load_location().await,
            Event::SelectFavorite(city) => self.load_city(&city).await,
            Event::ToggleFavorite => self.toggle_favorite(),
            Event::RemoveFavorite(city) => self.remove_favorite(&city),
            Event::ToggleUnit => self.toggle_unit(),
            Event::ToggleTheme => self.toggle_theme(),
        }
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn current_city(&self) -> Option<&str> {
        self.current_city.as_deref()
    }

    pub fn favorites(&self) -> &[String] {
        &self.favorites
    }

    /// Whether a city is loaded, i.e. the favorite toggle applies.
    pub fn has_weather(&self) -> bool {
        self.displayed.is_some()
    }

    pub fn is_current_favorite(&self) -> bool {
        match &self.current_city {
            Some(city) => self.favorites.iter().any(|c| c == city),
            None => false,
        }
    }

    async fn load_city(&mut self, city: &str) {
        self.view.clear_error();

        let snapshot = match self.client.fetch_current(Some(city), None).await {
            Ok(snapshot) => snapshot,
            Err(FetchError::CityNotFound) => {
                self.view.show_error(MSG_CITY_NOT_FOUND);
                return;
            }
            Err(err) => {
                tracing::error!("current-conditions fetch for {city:?} failed: {err}");
                self.view.show_error(MSG_FETCH_FAILED);
                return;
            }
        };

        self.render_fetched(snapshot).await;
    }

    async fn load_location(&mut self) {
        self.view.clear_error();

        let coords = match self.locator.current_position().await {
            Ok(coords) => coords,
            Err(err) => {
                tracing::warn!("geolocation unavailable: {err}");
                self.view.show_error(MSG_LOCATION_UNAVAILABLE);
                return;
            }
        };

        match self.client.fetch_current(None, Some(coords)).await {
            Ok(snapshot) => self.render_fetched(snapshot).await,
            Err(err) => {
                tracing::error!(
                    "current-conditions fetch at ({}, {}) failed: {err}",
                    coords.lat,
                    coords.lon
                );
                self.view.show_error(MSG_FETCH_FAILED);
            }
        }
    }

    /// Fetch the forecast for a fresh snapshot and push everything to the
    /// view. On forecast failure nothing is rendered, but the snapshot's
    /// city is already the current one.
    async fn render_fetched(&mut self, snapshot: WeatherSnapshot) {
        self.current_city = Some(snapshot.city_name.clone());

        let daily = match self.client.fetch_forecast(snapshot.coordinates).await {
            Ok(daily) => daily,
            Err(err) => {
                tracing::error!("forecast fetch for {:?} failed: {err}", snapshot.city_name);
                self.view.show_error(MSG_FETCH_FAILED);
                return;
            }
        };

        self.view.set_title(&snapshot.city_name);

        let current = CurrentPanel {
            city: snapshot.city_name.clone(),
            observed_at: snapshot.observed_at,
            temperature: units::displayed(snapshot.temperature_k, self.unit),
            feels_like: units::displayed(snapshot.feels_like_k, self.unit),
            unit: self.unit,
            description: snapshot.condition_description.clone(),
            icon_code: snapshot.icon_code.clone(),
            humidity_pct: snapshot.humidity_pct,
            wind_kmh: units::wind_kmh(snapshot.wind_speed_mps),
        };

        let forecast: Vec<ForecastEntry> = daily
            .iter()
            .map(|sample| ForecastEntry {
                date: sample.timestamp,
                temperature: units::displayed(sample.temperature_k, self.unit),
                unit: self.unit,
                description: sample.condition_description.clone(),
                icon_code: sample.icon_code.clone(),
            })
            .collect();

        self.view.show_current(&current);
        self.view.show_forecast(&forecast);
        self.view.set_background(Background::for_snapshot(&snapshot));

        let is_favorite = self.favorites.iter().any(|c| c == &snapshot.city_name);
        self.view.set_favorite_marker(is_favorite);
        self.view.show_favorites(&self.favorites);

        self.displayed = Some(Displayed { current, forecast });
    }

    /// Flip the unit and re-render from the integers already on screen;
    /// see [`units::reconvert_display`] for the rounding drift this
    /// carries. No network request is made.
    fn toggle_unit(&mut self) {
        self.unit = self.unit.toggled();
        storage::save_unit(&mut self.store, self.unit);

        let Some(displayed) = self.displayed.as_mut() else {
            return;
        };

        displayed.current.temperature =
            units::reconvert_display(displayed.current.temperature, self.unit);
        displayed.current.feels_like =
            units::reconvert_display(displayed.current.feels_like, self.unit);
        displayed.current.unit = self.unit;

        for entry in &mut displayed.forecast {
            entry.temperature = units::reconvert_display(entry.temperature, self.unit);
            entry.unit = self.unit;
        }

        self.view.show_current(&displayed.current);
        self.view.show_forecast(&displayed.forecast);
    }

    fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
        storage::save_theme(&mut self.store, self.theme);
        self.view.set_theme(self.theme);
    }

    fn toggle_favorite(&mut self) {
        let Some(city) = self.current_city.clone() else {
            return;
        };

        if self.favorites.iter().any(|c| c == &city) {
            storage::remove_favorite(&mut self.store, &city);
        } else {
            storage::add_favorite(&mut self.store, &city);
        }

        self.favorites = storage::favorites(&self.store);
        self.view.set_favorite_marker(self.favorites.iter().any(|c| c == &city));
        self.view.show_favorites(&self.favorites);
    }

    fn remove_favorite(&mut self, city: &str) {
        storage::remove_favorite(&mut self.store, city);
        self.favorites = storage::favorites(&self.store);
        self.view.show_favorites(&self.favorites);

        if self.current_city.as_deref() == Some(city) {
            self.view.set_favorite_marker(false);
        }
    }
}
