//! Text normalization and the fixed reply-text tables.
//!
//! All user-visible wording lives here, one table per supported language,
//! so the conversation engine and intent matcher stay text-free.

#[cfg(test)]
mod proptests;

/// Fold case and a fixed set of Latin accents so free-text matching
/// tolerates missing diacritics. Total over all input and idempotent.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            other => other,
        })
        .collect()
}

/// Fill a reply template, replacing every `{key}` placeholder.
pub fn fill(template: &str, substitutions: &[(&str, &str)]) -> String {
    let mut reply = template.to_string();
    for (key, value) in substitutions {
        reply = reply.replace(&format!("{{{key}}}"), value);
    }
    reply
}

/// Reply language, selected once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    Spanish,
    English,
}

impl Language {
    /// Parse a language tag from configuration (`es` or `en`).
    pub fn from_tag(tag: &str) -> Option<Self> {
        if tag.eq_ignore_ascii_case("es") {
            Some(Language::Spanish)
        } else if tag.eq_ignore_ascii_case("en") {
            Some(Language::English)
        } else {
            None
        }
    }

    pub fn texts(self) -> &'static Texts {
        match self {
            Language::Spanish => &SPANISH,
            Language::English => &ENGLISH,
        }
    }
}

/// One language's complete text table: stage replies, the location-choice
/// tokens, and the intent keyword groups.
///
/// Templates carry `{name}`, `{city}`, `{temp}`, `{wind}` or `{precip}`
/// placeholders for [`fill`]. Matching tokens must already be in
/// [`normalize`]d form.
pub struct Texts {
    pub greeting: &'static str,
    pub welcome_back: &'static str,
    pub fallback_name: &'static str,
    pub ask_location: &'static str,
    pub have_location: &'static str,
    pub ask_city: &'static str,
    pub current_confirmed: &'static str,
    pub clarify_choice: &'static str,
    pub city_confirmed: &'static str,
    pub city_not_found: &'static str,
    pub fallback: &'static str,
    pub temperature_reply: &'static str,
    pub wind_reply: &'static str,
    pub raining_reply: &'static str,
    pub dry_reply: &'static str,
    pub conditions_reply: &'static str,
    pub not_understood: &'static str,
    pub other_token: &'static str,
    pub current_token: &'static str,
    pub temperature_keywords: &'static [&'static str],
    pub wind_keywords: &'static [&'static str],
    pub rain_keywords: &'static [&'static str],
    pub conditions_phrase: &'static str,
}

/// Canonical table; wording matches the original assistant.
pub static SPANISH: Texts = Texts {
    greeting: "Hola! Soy tu asistente meteorológico. ¿Cómo te llamas?",
    welcome_back: "¡Hola de nuevo, {name}! ¿En qué te puedo ayudar hoy?",
    fallback_name: "amigo",
    ask_location: "¿Te gustaría usar tu ubicación actual o prefieres otra? Responde 'actual' o 'otra'.",
    have_location: "Parece que ya tenemos tu ubicación. ¿Te gustaría continuar?",
    ask_city: "Por favor, dime el nombre de la ciudad o lugar que te gustaría usar.",
    current_confirmed: "¡Genial! Usaremos tu ubicación actual. ¿Qué te gustaría saber sobre el clima?",
    clarify_choice: "No entendí tu respuesta. ¿Prefieres usar 'ubicación actual' o 'otra'?",
    city_confirmed: "Usaremos {city} como tu ubicación. ¿Qué te gustaría saber sobre el clima en {city}?",
    city_not_found: "No pude encontrar la ubicación {city}. ¿Puedes intentarlo de nuevo?",
    fallback: "No pude procesar tu solicitud. Intenta de nuevo.",
    temperature_reply: "La temperatura actual es de {temp}°C. ¿Algo más que te interese saber?",
    wind_reply: "El viento está a unos {wind} m/s. ¡Agárrate el sombrero si sales!",
    raining_reply: "Está lloviendo, con {precip} mm acumulados. Mejor agarra el paraguas.",
    dry_reply: "Por ahora no ha llovido, ¡todo despejado!",
    conditions_reply: "La temperatura es de {temp}°C y no hay lluvias. ¿Te gustaría saber algo más?",
    not_understood: "Mmm, no estoy seguro de lo que preguntas. ¿Puedes repetirlo de otra forma?",
    other_token: "otra",
    current_token: "actual",
    temperature_keywords: &["temperatura"],
    // Stems so conjugations like "lloviendo" or "llovizna" match too.
    wind_keywords: &["viento"],
    rain_keywords: &["lluv", "llov", "precipitacion"],
    conditions_phrase: "como esta el clima",
};

pub static ENGLISH: Texts = Texts {
    greeting: "Hi! I'm your weather assistant. What's your name?",
    welcome_back: "Welcome back, {name}! How can I help you today?",
    fallback_name: "friend",
    ask_location: "Would you like to use your current location or another one? Reply 'current' or 'other'.",
    have_location: "Looks like we already have your location. Shall we continue?",
    ask_city: "Please tell me the name of the city or place you'd like to use.",
    current_confirmed: "Great! We'll use your current location. What would you like to know about the weather?",
    clarify_choice: "I didn't catch that. Would you rather use 'current' or 'other'?",
    city_confirmed: "We'll use {city} as your location. What would you like to know about the weather in {city}?",
    city_not_found: "I couldn't find the location {city}. Can you try again?",
    fallback: "I couldn't process your request. Please try again.",
    temperature_reply: "The current temperature is {temp}°C. Anything else you'd like to know?",
    wind_reply: "The wind is at about {wind} m/s. Hold on to your hat out there!",
    raining_reply: "It's raining, with {precip} mm on the ground already. Better grab an umbrella.",
    dry_reply: "No rain so far, all clear!",
    conditions_reply: "The temperature is {temp}°C and there is no rain. Anything else you'd like to know?",
    not_understood: "Hmm, I'm not sure what you're asking. Could you put it another way?",
    other_token: "other",
    current_token: "current",
    temperature_keywords: &["temperature"],
    wind_keywords: &["wind"],
    rain_keywords: &["rain", "precip"],
    conditions_phrase: "how is the weather",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folds_case_and_accents() {
        assert_eq!(normalize("CAFÉ"), "cafe");
        assert_eq!(normalize("cafe"), "cafe");
        assert_eq!(normalize("¿Cómo está EL VIENTO?"), "¿como esta el viento?");
        assert_eq!(normalize("mañana"), "manana");
        assert_eq!(normalize("ÁÈÏÔÛÑ"), "aeioun");
    }

    #[test]
    fn test_normalize_is_idempotent_on_samples() {
        for sample in ["CAFÉ", "¿Qué tal?", "lloviendo", "São Paulo"] {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_passes_unmapped_characters_through() {
        assert_eq!(normalize("lat: -12.05, lon: -77.04!"), "lat: -12.05, lon: -77.04!");
    }

    #[test]
    fn test_fill_replaces_every_occurrence() {
        assert_eq!(fill("{city} y {city}", &[("city", "Lima")]), "Lima y Lima");
        assert_eq!(fill("sin marcadores", &[("city", "Lima")]), "sin marcadores");
    }

    #[test]
    fn test_language_tags() {
        assert_eq!(Language::from_tag("es"), Some(Language::Spanish));
        assert_eq!(Language::from_tag("EN"), Some(Language::English));
        assert_eq!(Language::from_tag("fr"), None);
    }

    #[test]
    fn test_matching_tokens_are_normalization_stable() {
        for texts in [&SPANISH, &ENGLISH] {
            let mut tokens = vec![texts.other_token, texts.current_token, texts.conditions_phrase];
            tokens.extend_from_slice(texts.temperature_keywords);
            tokens.extend_from_slice(texts.wind_keywords);
            tokens.extend_from_slice(texts.rain_keywords);
            for token in tokens {
                assert_eq!(normalize(token), token, "token {token} must be pre-normalized");
            }
        }
    }
}
