//! Stage selection: the guard table of the conversation state machine.

use crate::lookup::Coordinates;
use crate::session::{LocationMode, SessionRecord};
use serde::Deserialize;

/// One inbound chatbot turn. Besides `user_id`, every field is optional;
/// which ones are present drives stage selection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    pub user_id: String,
    #[serde(default)]
    pub question: String,
    pub name: Option<String>,
    pub location_choice: Option<String>,
    pub city: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// The conversation stage a request resolves to.
#[derive(Debug, Clone, PartialEq)]
pub enum Stage {
    /// First contact: the record was created by this request.
    Greeting,
    /// The request carries a name and the session has none yet.
    NameCapture { name: String },
    /// The request carries a location choice and no mode is set yet.
    LocationChoice { choice: String },
    /// The request carries a city, mode is `Other`, and no coordinates
    /// are stored yet.
    CityResolution { city: String },
    /// A coordinate source is available; answer the weather question.
    WeatherQuery { coords: Coordinates, question: String },
    /// No guard matched.
    Fallback,
}

impl Stage {
    /// Evaluate the guards in order; the first match wins. The ordering is
    /// load-bearing: a request carrying several fields must be routed by
    /// the earliest unfilled slot, so each one is captured exactly once.
    pub fn select(record: &SessionRecord, created: bool, request: &ChatRequest) -> Stage {
        if created {
            return Stage::Greeting;
        }

        if let Some(name) = provided(&request.name) {
            if record.name.is_none() {
                return Stage::NameCapture {
                    name: name.to_string(),
                };
            }
        }

        if let Some(choice) = provided(&request.location_choice) {
            if record.location.is_none() {
                return Stage::LocationChoice {
                    choice: choice.to_string(),
                };
            }
        }

        if let Some(city) = provided(&request.city) {
            if record.location == Some(LocationMode::Other) && record.coordinates.is_none() {
                return Stage::CityResolution {
                    city: city.to_string(),
                };
            }
        }

        match record.location {
            Some(LocationMode::Other) => {
                if let Some(coords) = record.coordinates {
                    return Stage::WeatherQuery {
                        coords,
                        question: request.question.clone(),
                    };
                }
            }
            Some(LocationMode::Current) => {
                // Presence, not truthiness: an equator/meridian 0.0 is a
                // valid coordinate.
                if let (Some(lat), Some(lon)) = (request.lat, request.lon) {
                    return Stage::WeatherQuery {
                        coords: Coordinates { lat, lon },
                        question: request.question.clone(),
                    };
                }
            }
            None => {}
        }

        Stage::Fallback
    }

    /// Stage label for log fields.
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Greeting => "greeting",
            Stage::NameCapture { .. } => "name_capture",
            Stage::LocationChoice { .. } => "location_choice",
            Stage::CityResolution { .. } => "city_resolution",
            Stage::WeatherQuery { .. } => "weather_query",
            Stage::Fallback => "fallback",
        }
    }
}

/// Treat empty strings the same as absent fields.
fn provided(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(user_id: &str) -> ChatRequest {
        ChatRequest {
            user_id: user_id.to_string(),
            ..ChatRequest::default()
        }
    }

    fn empty_record() -> SessionRecord {
        SessionRecord::default()
    }

    #[test]
    fn test_created_record_always_greets() {
        let mut req = request("ana");
        req.name = Some("Ana".to_string());
        req.lat = Some(1.0);
        req.lon = Some(2.0);

        assert_eq!(Stage::select(&empty_record(), true, &req), Stage::Greeting);
    }

    #[test]
    fn test_name_captured_only_while_unset() {
        let mut req = request("ana");
        req.name = Some("Ana".to_string());

        let unset = empty_record();
        assert!(matches!(
            Stage::select(&unset, false, &req),
            Stage::NameCapture { name } if name == "Ana"
        ));

        let set = SessionRecord {
            name: Some("Ana".to_string()),
            ..SessionRecord::default()
        };
        assert_eq!(Stage::select(&set, false, &req), Stage::Fallback);
    }

    #[test]
    fn test_name_wins_over_later_guards() {
        let mut req = request("ana");
        req.name = Some("Ana".to_string());
        req.location_choice = Some("otra".to_string());
        req.city = Some("Lima".to_string());

        assert!(matches!(
            Stage::select(&empty_record(), false, &req),
            Stage::NameCapture { .. }
        ));
    }

    #[test]
    fn test_location_choice_requires_unset_mode() {
        let mut req = request("ana");
        req.location_choice = Some("otra".to_string());

        assert!(matches!(
            Stage::select(&empty_record(), false, &req),
            Stage::LocationChoice { .. }
        ));

        let chosen = SessionRecord {
            location: Some(LocationMode::Current),
            ..SessionRecord::default()
        };
        assert_eq!(Stage::select(&chosen, false, &req), Stage::Fallback);
    }

    #[test]
    fn test_city_requires_other_mode_and_no_coordinates() {
        let mut req = request("ana");
        req.city = Some("Lima".to_string());

        // No mode chosen yet: the city is ignored.
        assert_eq!(Stage::select(&empty_record(), false, &req), Stage::Fallback);

        let other = SessionRecord {
            location: Some(LocationMode::Other),
            ..SessionRecord::default()
        };
        assert!(matches!(
            Stage::select(&other, false, &req),
            Stage::CityResolution { city } if city == "Lima"
        ));

        // Coordinates already resolved: fall through to the weather stage.
        let resolved = SessionRecord {
            location: Some(LocationMode::Other),
            coordinates: Some(Coordinates { lat: 1.0, lon: 2.0 }),
            ..SessionRecord::default()
        };
        assert!(matches!(
            Stage::select(&resolved, false, &req),
            Stage::WeatherQuery { .. }
        ));
    }

    #[test]
    fn test_stored_coordinates_take_priority_in_other_mode() {
        let record = SessionRecord {
            location: Some(LocationMode::Other),
            coordinates: Some(Coordinates { lat: 1.0, lon: 2.0 }),
            ..SessionRecord::default()
        };

        let mut req = request("ana");
        req.question = "temperatura".to_string();
        req.lat = Some(50.0);
        req.lon = Some(60.0);

        match Stage::select(&record, false, &req) {
            Stage::WeatherQuery { coords, question } => {
                assert_eq!(coords, Coordinates { lat: 1.0, lon: 2.0 });
                assert_eq!(question, "temperatura");
            }
            other => panic!("expected weather query, got {other:?}"),
        }
    }

    #[test]
    fn test_current_mode_needs_both_request_coordinates() {
        let record = SessionRecord {
            location: Some(LocationMode::Current),
            ..SessionRecord::default()
        };

        let mut lat_only = request("ana");
        lat_only.lat = Some(1.0);
        assert_eq!(Stage::select(&record, false, &lat_only), Stage::Fallback);

        let mut both = request("ana");
        both.lat = Some(0.0);
        both.lon = Some(0.0);
        assert!(matches!(
            Stage::select(&record, false, &both),
            Stage::WeatherQuery { coords, .. } if coords == (Coordinates { lat: 0.0, lon: 0.0 })
        ));
    }

    #[test]
    fn test_other_mode_without_coordinates_falls_back() {
        let record = SessionRecord {
            location: Some(LocationMode::Other),
            ..SessionRecord::default()
        };

        let mut req = request("ana");
        req.question = "temperatura".to_string();
        req.lat = Some(1.0);
        req.lon = Some(2.0);

        assert_eq!(Stage::select(&record, false, &req), Stage::Fallback);
    }

    #[test]
    fn test_empty_strings_count_as_absent() {
        let mut req = request("ana");
        req.name = Some(String::new());
        req.location_choice = Some(String::new());
        req.city = Some(String::new());

        assert_eq!(Stage::select(&empty_record(), false, &req), Stage::Fallback);
    }
}
