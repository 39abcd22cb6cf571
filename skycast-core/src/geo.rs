//! Geolocation port.
//!
//! Position lookup is a one-shot request with exactly two failure modes;
//! the dashboard maps both to the same user-facing message. The CLI ships
//! an IP-based implementation, other hosts can plug in platform services.

use async_trait::async_trait;

use crate::model::Coordinates;

#[derive(Debug, thiserror::Error)]
pub enum GeolocationError {
    #[error("location permission denied")]
    Denied,
    #[error("no location service available")]
    Unsupported,
}

#[async_trait]
pub trait Geolocator: Send + Sync {
    /// Resolve the device's current position.
    async fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}
