//! Wire-format types for the HTTP API.
//!
//! Field names mirror the browser client's JSON exactly (`chatHistory`,
//! `imageUrl`, `albumArt`, ...); the serde renames are load-bearing. The
//! vector index stores snake_case metadata keys, so `sourceContext` keeps
//! `filename`/`text_chunk` as-is.

use serde::{Deserialize, Serialize};

use crate::chat::{ChatTurn, Lang};
use crate::intent::CurrencyQuery;

/// Body of `POST /api/ask`.
#[derive(Debug, Clone, Deserialize)]
pub struct AskRequest {
    pub question: String,
    #[serde(default)]
    pub lang: Lang,
    #[serde(default, rename = "chatHistory")]
    pub chat_history: Vec<ChatTurn>,
}

/// UI directive attached to an `/api/ask` reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AskAction {
    RequestLocation,
    ShowNavigationModal,
    TriggerPlaylist,
    TriggerCurrencyConversion,
}

/// The retrieved chunk an informational answer was grounded in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceContext {
    pub filename: String,
    pub text_chunk: String,
}

/// One `/api/ask` reply. Every field is optional so each of the reply
/// shapes serializes without nulls; build instances via the constructors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AskReply {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(rename = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(rename = "sourceContext", skip_serializing_if = "Option::is_none")]
    pub source_context: Option<SourceContext>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<AskAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
}

impl AskReply {
    /// Plain text answer.
    pub fn answer(text: impl Into<String>) -> Self {
        Self {
            answer: Some(text.into()),
            ..Self::default()
        }
    }

    /// Attach a map image to an answer.
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Attach the retrieved chunk an answer was grounded in.
    pub fn with_source(mut self, source: SourceContext) -> Self {
        self.source_context = Some(source);
        self
    }

    /// Ask the user where they currently are.
    pub fn request_location(text: impl Into<String>) -> Self {
        Self {
            answer: Some(text.into()),
            action: Some(AskAction::RequestLocation),
            ..Self::default()
        }
    }

    /// Completed route: directions text plus the destination's map.
    pub fn navigation_modal(text: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            answer: Some(text.into()),
            image_url: Some(image_url.into()),
            action: Some(AskAction::ShowNavigationModal),
            ..Self::default()
        }
    }

    /// Hand the playlist feature off to the client.
    pub fn trigger_playlist(genre: impl Into<String>) -> Self {
        Self {
            action: Some(AskAction::TriggerPlaylist),
            genre: Some(genre.into()),
            ..Self::default()
        }
    }

    /// Hand the currency converter off to the client.
    pub fn trigger_currency(query: &CurrencyQuery) -> Self {
        Self {
            action: Some(AskAction::TriggerCurrencyConversion),
            amount: Some(query.amount),
            from: Some(query.from.clone()),
            to: Some(query.to.clone()),
            ..Self::default()
        }
    }
}

/// Body of `POST /api/convert`.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertRequest {
    pub amount: f64,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertReply {
    pub from: String,
    pub to: String,
    pub amount: f64,
    pub result: f64,
}

/// Body of `POST /api/playlist`.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistRequest {
    pub genre: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artist: String,
    #[serde(rename = "albumArt")]
    pub album_art: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistReply {
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummarizeRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeReply {
    pub summary: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateReply {
    #[serde(rename = "translatedText")]
    pub translated_text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReadingTimeRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingTimeReply {
    #[serde(rename = "readingTime")]
    pub reading_time: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ask_request_defaults() {
        let req: AskRequest = serde_json::from_str(r#"{"question": "gdzie są sklepy?"}"#).unwrap();
        assert_eq!(req.lang, Lang::Pl);
        assert!(req.chat_history.is_empty());
    }

    #[test]
    fn test_ask_request_camel_case_history() {
        let req: AskRequest = serde_json::from_value(json!({
            "question": "where are the shops?",
            "lang": "en",
            "chatHistory": [{"role": "user", "text": "hi"}]
        }))
        .unwrap();
        assert_eq!(req.lang, Lang::En);
        assert_eq!(req.chat_history.len(), 1);
    }

    #[test]
    fn test_plain_answer_shape() {
        let reply = AskReply::answer("The shops are airside.");
        assert_eq!(
            serde_json::to_value(&reply).unwrap(),
            json!({"answer": "The shops are airside."})
        );
    }

    #[test]
    fn test_answer_with_source_shape() {
        let reply = AskReply::answer("Open 4am to 8pm.")
            .with_image("maps/landside.png")
            .with_source(SourceContext {
                filename: "opening-hours.txt".to_string(),
                text_chunk: "The terminal opens at 4am.".to_string(),
            });
        assert_eq!(
            serde_json::to_value(&reply).unwrap(),
            json!({
                "answer": "Open 4am to 8pm.",
                "imageUrl": "maps/landside.png",
                "sourceContext": {
                    "filename": "opening-hours.txt",
                    "text_chunk": "The terminal opens at 4am."
                }
            })
        );
    }

    #[test]
    fn test_request_location_shape() {
        let reply = AskReply::request_location("Where are you right now?");
        assert_eq!(
            serde_json::to_value(&reply).unwrap(),
            json!({"answer": "Where are you right now?", "action": "request_location"})
        );
    }

    #[test]
    fn test_navigation_modal_shape() {
        let reply = AskReply::navigation_modal("Head left past the shops.", "maps/airside.png");
        assert_eq!(
            serde_json::to_value(&reply).unwrap(),
            json!({
                "answer": "Head left past the shops.",
                "imageUrl": "maps/airside.png",
                "action": "show_navigation_modal"
            })
        );
    }

    #[test]
    fn test_trigger_playlist_shape() {
        let reply = AskReply::trigger_playlist("jazz");
        assert_eq!(
            serde_json::to_value(&reply).unwrap(),
            json!({"action": "trigger_playlist", "genre": "jazz"})
        );
    }

    #[test]
    fn test_trigger_currency_shape() {
        let reply = AskReply::trigger_currency(&CurrencyQuery {
            amount: 10.0,
            from: "EUR".to_string(),
            to: "USD".to_string(),
        });
        assert_eq!(
            serde_json::to_value(&reply).unwrap(),
            json!({
                "action": "trigger_currency_conversion",
                "amount": 10.0,
                "from": "EUR",
                "to": "USD"
            })
        );
    }

    #[test]
    fn test_track_album_art_rename() {
        let track = Track {
            id: "abc".to_string(),
            name: "Song".to_string(),
            artist: "Artist".to_string(),
            album_art: "https://img".to_string(),
        };
        let value = serde_json::to_value(&track).unwrap();
        assert_eq!(value["albumArt"], "https://img");
    }
}
