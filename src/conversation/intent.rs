//! Keyword intent matching for weather questions.

use crate::lookup::WeatherSnapshot;
use crate::text::{fill, normalize, Texts};

/// Answer a free-text weather question from a snapshot. Keyword groups are
/// checked in a fixed order and the first hit wins, so a question naming
/// several topics gets the earliest group's reply.
pub fn answer(question: &str, snapshot: &WeatherSnapshot, texts: &Texts) -> String {
    let question = normalize(question);

    if contains_any(&question, texts.temperature_keywords) {
        return fill(
            texts.temperature_reply,
            &[("temp", &snapshot.temperature_c.to_string())],
        );
    }

    if contains_any(&question, texts.wind_keywords) {
        return fill(
            texts.wind_reply,
            &[("wind", &snapshot.wind_speed_ms.to_string())],
        );
    }

    if contains_any(&question, texts.rain_keywords) {
        return if snapshot.precip_1h_mm > 0.0 {
            fill(
                texts.raining_reply,
                &[("precip", &snapshot.precip_1h_mm.to_string())],
            )
        } else {
            texts.dry_reply.to_string()
        };
    }

    if question.contains(texts.conditions_phrase) {
        return fill(
            texts.conditions_reply,
            &[("temp", &snapshot.temperature_c.to_string())],
        );
    }

    texts.not_understood.to_string()
}

fn contains_any(question: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| question.contains(keyword))
}
