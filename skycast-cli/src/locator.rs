//! IP-based geolocation.
//!
//! A terminal has no platform position service to ask, so the dashboard
//! approximates one: ip-api.com resolves the caller's public IP to
//! coordinates. Free, no API key required.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use skycast_core::{Coordinates, GeolocationError, Geolocator};

const IP_API_URL: &str = "http://ip-api.com/json";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct IpLocator;

impl IpLocator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Geolocator for IpLocator {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|err| {
                tracing::warn!("failed to create geolocation client: {err}");
                GeolocationError::Unsupported
            })?;

        let response = client.get(IP_API_URL).send().await.map_err(|err| {
            tracing::debug!("ip geolocation request failed: {err}");
            GeolocationError::Unsupported
        })?;

        if !response.status().is_success() {
            tracing::debug!("ip geolocation returned status {}", response.status());
            return Err(GeolocationError::Unsupported);
        }

        let body: IpApiResponse = response.json().await.map_err(|err| {
            tracing::debug!("ip geolocation parse error: {err}");
            GeolocationError::Unsupported
        })?;

        if body.status != "success" {
            return Err(GeolocationError::Unsupported);
        }

        match (body.lat, body.lon) {
            (Some(lat), Some(lon)) => Ok(Coordinates { lat, lon }),
            _ => Err(GeolocationError::Unsupported),
        }
    }
}
