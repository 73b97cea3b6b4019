//! The conversation engine: stage dispatch and session mutation.

use super::intent;
use super::stage::{ChatRequest, Stage};
use crate::lookup::{Coordinates, GeocodeService, LookupError, WeatherService};
use crate::session::{LocationMode, SessionRecord, SessionStore};
use crate::text::{fill, normalize, Language, Texts};
use std::sync::Arc;

/// Drives one conversation turn end to end: look up the session, select a
/// stage, run its handler, and return the reply text.
pub struct Chatbot {
    sessions: Arc<SessionStore>,
    geocoder: Arc<dyn GeocodeService>,
    weather: Arc<dyn WeatherService>,
    texts: &'static Texts,
}

impl Chatbot {
    pub fn new(
        sessions: Arc<SessionStore>,
        geocoder: Arc<dyn GeocodeService>,
        weather: Arc<dyn WeatherService>,
        language: Language,
    ) -> Self {
        Self {
            sessions,
            geocoder,
            weather,
            texts: language.texts(),
        }
    }

    /// Produce the reply for one inbound request. The session record stays
    /// locked for the whole turn, so concurrent requests for the same user
    /// serialize instead of interleaving their writes.
    pub async fn respond(&self, request: &ChatRequest) -> Result<String, LookupError> {
        let (session, created) = self.sessions.get_or_create(&request.user_id).await;
        let mut record = session.lock().await;

        let stage = Stage::select(&record, created, request);
        tracing::debug!(
            user_id = %request.user_id,
            stage = stage.name(),
            "Dispatching conversation turn"
        );

        match stage {
            Stage::Greeting => Ok(self.greet(&record, created)),
            Stage::NameCapture { name } => Ok(self.capture_name(&mut record, name)),
            Stage::LocationChoice { choice } => Ok(self.choose_location(&mut record, &choice)),
            Stage::CityResolution { city } => self.resolve_city(&mut record, &city).await,
            Stage::WeatherQuery { coords, question } => {
                self.answer_weather(coords, &question).await
            }
            Stage::Fallback => Ok(self.texts.fallback.to_string()),
        }
    }

    /// Selection only routes here when the record was just created; the
    /// welcome-back arm covers the re-entry case for completeness.
    fn greet(&self, record: &SessionRecord, created: bool) -> String {
        if created {
            self.texts.greeting.to_string()
        } else {
            let name = record.name.as_deref().unwrap_or(self.texts.fallback_name);
            fill(self.texts.welcome_back, &[("name", name)])
        }
    }

    fn capture_name(&self, record: &mut SessionRecord, name: String) -> String {
        record.name = Some(name);
        if record.location.is_none() {
            self.texts.ask_location.to_string()
        } else {
            self.texts.have_location.to_string()
        }
    }

    /// "Other" is checked before "current" so an answer naming both, like
    /// a full "ubicación actual u otra" echo, resolves to the named-place
    /// flow that still asks for the city.
    fn choose_location(&self, record: &mut SessionRecord, choice: &str) -> String {
        let choice = normalize(choice);

        if choice.contains(self.texts.other_token) {
            record.location = Some(LocationMode::Other);
            self.texts.ask_city.to_string()
        } else if choice.contains(self.texts.current_token) {
            record.location = Some(LocationMode::Current);
            self.texts.current_confirmed.to_string()
        } else {
            self.texts.clarify_choice.to_string()
        }
    }

    async fn resolve_city(
        &self,
        record: &mut SessionRecord,
        city: &str,
    ) -> Result<String, LookupError> {
        match self.geocoder.search(city).await? {
            Some(coords) => {
                tracing::info!(city, lat = coords.lat, lon = coords.lon, "Resolved city");
                record.coordinates = Some(coords);
                Ok(fill(self.texts.city_confirmed, &[("city", city)]))
            }
            None => {
                tracing::info!(city, "City not found");
                Ok(fill(self.texts.city_not_found, &[("city", city)]))
            }
        }
    }

    async fn answer_weather(
        &self,
        coords: Coordinates,
        question: &str,
    ) -> Result<String, LookupError> {
        let snapshot = self.weather.current(coords).await?;
        Ok(intent::answer(question, &snapshot, self.texts))
    }
}
