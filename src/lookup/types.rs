//! Shared lookup data types.

/// Decimal-degree coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Point-in-time conditions for one coordinate pair.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub temperature_c: f64,
    pub wind_speed_ms: f64,
    pub precip_1h_mm: f64,
}
