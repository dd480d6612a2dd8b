//! Navigation dialogue session state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::location::{Location, Zone};

/// State held for a session while the navigation dialogue is mid-flight.
///
/// The dialogue machine is awaiting the user's position exactly when a
/// `NavSession` is stored for the session id; there is no separate flag.
/// `destination` is always known while navigating -- the type has no way to
/// express an awaiting state without one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavSession {
    pub destination: Location,
    pub user_zone: Option<Zone>,
    /// Consecutive turns on which the user's position could not be
    /// understood. The dialogue aborts once this hits the configured bound.
    pub retries: u8,
    pub started_at: DateTime<Utc>,
}

impl NavSession {
    pub fn new(destination: Location) -> Self {
        Self {
            destination,
            user_zone: None,
            retries: 0,
            started_at: Utc::now(),
        }
    }

    pub fn with_zone(destination: Location, zone: Zone) -> Self {
        Self {
            destination,
            user_zone: Some(zone),
            retries: 0,
            started_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{LocalizedAliases, LocalizedText};

    fn gate() -> Location {
        Location {
            id: "gate-10".to_string(),
            name: LocalizedText::new("Bramka 10", "Gate 10"),
            zone: Zone::AfterSecurity,
            aliases: LocalizedAliases::default(),
            map_file: "maps/airside.png".to_string(),
            description: LocalizedText::default(),
        }
    }

    #[test]
    fn test_new_session_has_no_zone_and_no_retries() {
        let session = NavSession::new(gate());
        assert!(session.user_zone.is_none());
        assert_eq!(session.retries, 0);
    }

    #[test]
    fn test_with_zone_preseeds_position() {
        let session = NavSession::with_zone(gate(), Zone::BeforeSecurity);
        assert_eq!(session.user_zone, Some(Zone::BeforeSecurity));
    }
}
