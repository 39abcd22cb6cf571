//! HTTP client for the OpenWeather current-conditions and 5-day forecast
//! endpoints.
//!
//! Temperatures come back in Kelvin (no `units` query parameter is sent);
//! converting them is the display layer's job. Failures propagate once to
//! the caller: no retries, no caching, transport-default timeouts.

use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::forecast;
use crate::model::{Coordinates, ForecastSample, WeatherSnapshot};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Neither a city name nor coordinates were supplied.
    #[error("either a city name or coordinates must be provided")]
    InvalidArgument,

    /// The provider does not know the requested city.
    #[error("city not found")]
    CityNotFound,

    /// The provider answered with a non-success status.
    #[error("request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// The request itself failed (connection, TLS, timeout).
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body was not the JSON we expect.
    #[error("malformed response: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct WeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherClient {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Client against an alternative endpoint; tests point this at a mock
    /// server.
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        Self { api_key, base_url: base_url.into(), http: Client::new() }
    }

    /// Fetch current conditions by city name or by coordinates. The city
    /// name wins when both are given; supplying neither is an error and no
    /// request is issued.
    pub async fn fetch_current(
        &self,
        city: Option<&str>,
        coords: Option<Coordinates>,
    ) -> Result<WeatherSnapshot, FetchError> {
        let url = format!("{}/weather", self.base_url);

        let request = match (city, coords) {
            (Some(city), _) => self.http.get(&url).query(&[("q", city)]),
            (None, Some(c)) => self
                .http
                .get(&url)
                .query(&[("lat", c.lat.to_string()), ("lon", c.lon.to_string())]),
            (None, None) => return Err(FetchError::InvalidArgument),
        };

        let res = request.query(&[("appid", self.api_key.as_str())]).send().await?;

        let status = res.status();
        let body = res.text().await?;

        // Unknown cities arrive as `"cod": "404"` in the body; that case
        // must be told apart from transport failure before any generic
        // status handling.
        if let Ok(error) = serde_json::from_str::<OwErrorBody>(&body) {
            if error.cod == "404" {
                return Err(FetchError::CityNotFound);
            }
        }

        if !status.is_success() {
            return Err(FetchError::Status { status, body: truncate_body(&body) });
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;

        Ok(parsed.into_snapshot())
    }

    /// Fetch the 5-day/3-hour forecast feed for coordinates and reduce it
    /// to one representative sample per day (at most 5 entries).
    pub async fn fetch_forecast(
        &self,
        coords: Coordinates,
    ) -> Result<Vec<ForecastSample>, FetchError> {
        let url = format!("{}/forecast", self.base_url);

        let res = self
            .http
            .get(&url)
            .query(&[("lat", coords.lat.to_string()), ("lon", coords.lon.to_string())])
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status { status, body: truncate_body(&body) });
        }

        let parsed: OwForecastResponse = serde_json::from_str(&body)?;

        let samples = parsed.list.into_iter().map(OwForecastEntry::into_sample).collect();

        Ok(forecast::reduce_daily(samples))
    }
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    cod: String,
}

#[derive(Debug, Deserialize)]
struct OwCondition {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    coord: OwCoord,
    main: OwMain,
    weather: Vec<OwCondition>,
    wind: OwWind,
    sys: OwSys,
}

impl OwCurrentResponse {
    fn into_snapshot(self) -> WeatherSnapshot {
        let condition = first_condition(self.weather);

        WeatherSnapshot {
            city_name: self.name,
            observed_at: unix_to_utc(self.dt),
            temperature_k: self.main.temp,
            feels_like_k: self.main.feels_like,
            humidity_pct: self.main.humidity,
            wind_speed_mps: self.wind.speed,
            condition_main: condition.main,
            condition_description: condition.description,
            icon_code: condition.icon,
            coordinates: Coordinates { lat: self.coord.lat, lon: self.coord.lon },
            sunrise: unix_to_utc(self.sys.sunrise),
            sunset: unix_to_utc(self.sys.sunset),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwForecastMain,
    weather: Vec<OwCondition>,
}

impl OwForecastEntry {
    fn into_sample(self) -> ForecastSample {
        let condition = first_condition(self.weather);

        ForecastSample {
            timestamp: unix_to_utc(self.dt),
            temperature_k: self.main.temp,
            condition_main: condition.main,
            condition_description: condition.description,
            icon_code: condition.icon,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

fn first_condition(weather: Vec<OwCondition>) -> OwCondition {
    weather.into_iter().next().unwrap_or_else(|| OwCondition {
        main: "Unknown".to_string(),
        description: "Unknown".to_string(),
        icon: "01d".to_string(),
    })
}

fn unix_to_utc(ts: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(ts, 0).unwrap_or_else(Utc::now)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}
