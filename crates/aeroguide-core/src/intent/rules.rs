//! Deterministic rule-based intent classification.
//!
//! Everything resolves locally: a currency pattern, a playlist keyword plus
//! genre check, and the gazetteer's phrase matcher for navigation. Anything
//! unmatched is `Information`. Rules run in fixed order, so a message that
//! could read several ways classifies the same way every time.

use std::sync::Arc;

use regex::Regex;

use aeroguide_types::chat::{ChatTurn, Lang};
use aeroguide_types::error::UpstreamError;
use aeroguide_types::intent::{CurrencyQuery, Intent, PlaylistQuery};

use super::classifier::{Classification, IntentClassifier};
use crate::gazetteer::Gazetteer;

/// Rule-based classifier backend.
pub struct LocalRulesClassifier {
    gazetteer: Arc<Gazetteer>,
    currency: Regex,
    playlist_keyword: Regex,
    genre: Regex,
}

impl LocalRulesClassifier {
    pub fn new(gazetteer: Arc<Gazetteer>) -> Self {
        Self {
            gazetteer,
            currency: Regex::new(
                r"(?i)\b(\d+(?:[.,]\d+)?)\s*([a-z]{3})\s+(?:to|into|na|do)\s+([a-z]{3})\b",
            )
            .expect("currency pattern compiles"),
            playlist_keyword: Regex::new(
                r"(?i)\b(?:playlist\w*|muzy\w*|music|piosenk\w*|songs?|play|zagraj|włącz)\b",
            )
            .expect("playlist keyword pattern compiles"),
            genre: Regex::new(
                r"(?i)\b(hip[ -]?hop|r&b|jazz|rock|pop|klasyczn\w*|classical|elektroniczn\w*|electronic|metal|blues|reggae|disco|techno|house|rap|chill|indie|punk|soul|funk|country)\b",
            )
            .expect("genre pattern compiles"),
        }
    }

    fn match_currency(&self, message: &str) -> Option<CurrencyQuery> {
        let captures = self.currency.captures(message)?;
        let amount: f64 = captures[1].replace(',', ".").parse().ok()?;
        Some(CurrencyQuery {
            amount,
            from: captures[2].to_uppercase(),
            to: captures[3].to_uppercase(),
        })
    }

    fn match_playlist(&self, message: &str) -> Option<PlaylistQuery> {
        if !self.playlist_keyword.is_match(message) {
            return None;
        }
        let genre = self.genre.find(message)?.as_str();
        Some(PlaylistQuery {
            genre: canonical_genre(genre),
        })
    }

    fn match_navigation(&self, message: &str, lang: Lang) -> bool {
        self.gazetteer.resolve_route(message, lang).is_some()
            || self.gazetteer.find_destination(message, lang).is_some()
    }
}

/// Polish genre stems map onto the catalog's English genre names.
fn canonical_genre(matched: &str) -> String {
    let lower = matched.to_lowercase();
    if lower.starts_with("klasyczn") {
        "classical".to_string()
    } else if lower.starts_with("elektroniczn") {
        "electronic".to_string()
    } else {
        lower
    }
}

impl IntentClassifier for LocalRulesClassifier {
    fn name(&self) -> &str {
        "local_rules"
    }

    async fn classify(
        &self,
        message: &str,
        _history: &[ChatTurn],
        lang: Lang,
    ) -> Result<Classification, UpstreamError> {
        if let Some(query) = self.match_currency(message) {
            return Ok(Classification::of(Intent::Currency(query)));
        }
        if let Some(query) = self.match_playlist(message) {
            return Ok(Classification::of(Intent::Playlist(query)));
        }
        if self.match_navigation(message, lang) {
            return Ok(Classification::of(Intent::Navigation {
                utterance: message.to_string(),
            }));
        }
        Ok(Classification::of(Intent::Information))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> LocalRulesClassifier {
        LocalRulesClassifier::new(Arc::new(Gazetteer::bundled()))
    }

    async fn intent_of(message: &str, lang: Lang) -> Intent {
        classifier()
            .classify(message, &[], lang)
            .await
            .unwrap()
            .intent
    }

    #[tokio::test]
    async fn test_currency_english() {
        let intent = intent_of("can you convert 100 EUR to USD?", Lang::En).await;
        assert_eq!(
            intent,
            Intent::Currency(CurrencyQuery {
                amount: 100.0,
                from: "EUR".to_string(),
                to: "USD".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_currency_polish_comma_decimal() {
        let intent = intent_of("ile to 250,50 pln na eur?", Lang::Pl).await;
        assert_eq!(
            intent,
            Intent::Currency(CurrencyQuery {
                amount: 250.5,
                from: "PLN".to_string(),
                to: "EUR".to_string(),
            })
        );
    }

    #[tokio::test]
    async fn test_incomplete_currency_is_information() {
        let intent = intent_of("convert 100 EUR please", Lang::En).await;
        assert_eq!(intent, Intent::Information);
    }

    #[tokio::test]
    async fn test_playlist_english() {
        let intent = intent_of("could you make a playlist with some jazz?", Lang::En).await;
        assert_eq!(
            intent,
            Intent::Playlist(PlaylistQuery {
                genre: "jazz".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_playlist_polish_genre_is_canonicalized() {
        let intent = intent_of("włącz jakąś muzykę klasyczną", Lang::Pl).await;
        assert_eq!(
            intent,
            Intent::Playlist(PlaylistQuery {
                genre: "classical".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_music_keyword_without_genre_is_not_playlist() {
        let intent = intent_of("is there any good music here?", Lang::En).await;
        assert_eq!(intent, Intent::Information);
    }

    #[tokio::test]
    async fn test_route_phrase_is_navigation() {
        let intent = intent_of("jak dojść z odprawy do bramki 10?", Lang::Pl).await;
        assert!(matches!(intent, Intent::Navigation { .. }));
    }

    #[tokio::test]
    async fn test_known_alias_is_navigation() {
        let intent = intent_of("where is the pharmacy?", Lang::En).await;
        assert!(matches!(intent, Intent::Navigation { .. }));
    }

    #[tokio::test]
    async fn test_plain_question_is_information() {
        let intent = intent_of("what are the liquid rules?", Lang::En).await;
        assert_eq!(intent, Intent::Information);
    }

    #[tokio::test]
    async fn test_currency_wins_over_navigation() {
        // mentions a location but the currency pattern runs first
        let intent = intent_of("at the gate, can I pay 50 GBP to EUR?", Lang::En).await;
        assert!(matches!(intent, Intent::Currency(_)));
    }
}
