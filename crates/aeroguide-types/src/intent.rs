//! Classified purpose of a user message, and the route classes the zone
//! topology produces.

use serde::{Deserialize, Serialize};

/// Payload of a recognized currency-conversion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyQuery {
    pub amount: f64,
    pub from: String,
    pub to: String,
}

/// Payload of a recognized playlist request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistQuery {
    pub genre: String,
}

/// The classified purpose of one inbound message.
///
/// `Navigation` carries the utterance to resolve against the gazetteer;
/// resolution happens exactly once, in the navigation flow.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Navigation { utterance: String },
    Currency(CurrencyQuery),
    Playlist(PlaylistQuery),
    Information,
}

impl Intent {
    /// Stable tag name, used in logs.
    pub fn tag(&self) -> &'static str {
        match self {
            Intent::Navigation { .. } => "navigation",
            Intent::Currency(_) => "currency",
            Intent::Playlist(_) => "playlist",
            Intent::Information => "information",
        }
    }
}

/// How a route's two endpoints relate across the security boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteClass {
    /// Zones equal, or the destination is a transition point: answerable
    /// immediately with generated directions.
    SameZoneOrTransition,
    /// The user must physically cross security before the route exists.
    BeforeToAfter,
    /// Security is one-directional; the destination is unreachable.
    AfterToBefore,
    /// Endpoints could not be placed; ask again.
    Unresolved,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_tags() {
        assert_eq!(
            Intent::Navigation {
                utterance: "to gate 10".to_string()
            }
            .tag(),
            "navigation"
        );
        assert_eq!(Intent::Information.tag(), "information");
    }

    #[test]
    fn test_currency_query_deserialize() {
        let query: CurrencyQuery =
            serde_json::from_str(r#"{"amount": 10.5, "from": "EUR", "to": "USD"}"#).unwrap();
        assert_eq!(query.amount, 10.5);
        assert_eq!(query.from, "EUR");
        assert_eq!(query.to, "USD");
    }

    #[test]
    fn test_route_class_serde() {
        let json = serde_json::to_string(&RouteClass::BeforeToAfter).unwrap();
        assert_eq!(json, "\"before_to_after\"");
    }
}
