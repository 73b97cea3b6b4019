//! Scripted lookup doubles shared across test modules.

use super::{Coordinates, GeocodeService, LookupError, WeatherService, WeatherSnapshot};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Geocoder double that replays queued results and records the place
/// names it was asked about. An empty queue yields a network error.
pub struct QueuedGeocoder {
    responses: Mutex<VecDeque<Result<Option<Coordinates>, LookupError>>>,
    requests: Mutex<Vec<String>>,
}

impl QueuedGeocoder {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn queue(&self, response: Result<Option<Coordinates>, LookupError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl GeocodeService for QueuedGeocoder {
    async fn search(&self, place: &str) -> Result<Option<Coordinates>, LookupError> {
        self.requests.lock().unwrap().push(place.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LookupError::network("no queued geocode response")))
    }
}

/// Weather double that replays queued snapshots and records the
/// coordinates of each lookup.
pub struct QueuedWeather {
    responses: Mutex<VecDeque<Result<WeatherSnapshot, LookupError>>>,
    requests: Mutex<Vec<Coordinates>>,
}

impl QueuedWeather {
    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn queue(&self, response: Result<WeatherSnapshot, LookupError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn requests(&self) -> Vec<Coordinates> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherService for QueuedWeather {
    async fn current(&self, coords: Coordinates) -> Result<WeatherSnapshot, LookupError> {
        self.requests.lock().unwrap().push(coords);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LookupError::network("no queued weather response")))
    }
}
