//! Core library for the `skycast` weather dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather HTTP client (current conditions + 5-day forecast)
//! - Forecast reduction to one representative reading per day
//! - Unit conversion and display rounding
//! - Persisted favorites and display preferences
//! - The dashboard controller that ties the pieces together
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod background;
pub mod client;
pub mod config;
pub mod controller;
pub mod forecast;
pub mod geo;
pub mod model;
pub mod storage;
pub mod units;

pub use background::Background;
pub use client::{FetchError, WeatherClient};
pub use config::Config;
pub use controller::{Dashboard, DashboardView, Event};
pub use geo::{GeolocationError, Geolocator};
pub use model::{Coordinates, ForecastSample, TemperatureUnit, Theme, WeatherSnapshot};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
