//! External lookup services: place-name geocoding and live weather data.
//!
//! The conversation engine talks to both through trait objects so tests can
//! substitute scripted doubles for the real HTTP clients.

mod error;
mod meteomatics;
mod nominatim;
#[cfg(test)]
pub mod testing;
mod types;

pub use error::{LookupError, LookupErrorKind};
pub use meteomatics::{MeteomaticsClient, DEFAULT_BASE_URL as DEFAULT_METEOMATICS_URL};
pub use nominatim::{NominatimClient, DEFAULT_BASE_URL as DEFAULT_NOMINATIM_URL};
pub use types::{Coordinates, WeatherSnapshot};

use async_trait::async_trait;

/// Place-name resolution boundary.
#[async_trait]
pub trait GeocodeService: Send + Sync {
    /// Resolve a free-text place name to its best candidate coordinates.
    /// `Ok(None)` means the upstream answered but knew no such place.
    async fn search(&self, place: &str) -> Result<Option<Coordinates>, LookupError>;
}

/// Current-conditions boundary.
#[async_trait]
pub trait WeatherService: Send + Sync {
    /// Fetch conditions right now at the given coordinates.
    async fn current(&self, coords: Coordinates) -> Result<WeatherSnapshot, LookupError>;
}
