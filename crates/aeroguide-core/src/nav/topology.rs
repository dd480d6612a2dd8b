//! Zone topology rules: what is reachable between security zones.
//!
//! Security is one-directional. Routes inside one zone, or toward a
//! transition point, are answerable immediately; landside-to-airside needs
//! the user to cross security first; airside-to-landside is terminally
//! unreachable.

use aeroguide_types::intent::RouteClass;
use aeroguide_types::location::Zone;

/// Classify a start/end zone pair.
pub fn classify(start: Zone, end: Zone) -> RouteClass {
    use Zone::*;
    match (start, end) {
        (BeforeSecurity, BeforeSecurity)
        | (AfterSecurity, AfterSecurity)
        | (TransitionPoint, TransitionPoint)
        | (BeforeSecurity, TransitionPoint)
        | (AfterSecurity, TransitionPoint) => RouteClass::SameZoneOrTransition,
        (BeforeSecurity, AfterSecurity) => RouteClass::BeforeToAfter,
        (AfterSecurity, BeforeSecurity) => RouteClass::AfterToBefore,
        // a transition-point start never occurs in real data
        (TransitionPoint, BeforeSecurity) | (TransitionPoint, AfterSecurity) => {
            RouteClass::Unresolved
        }
    }
}

/// Classify a user position against a destination; an unknown position is
/// always `Unresolved`.
pub fn classify_user(user_zone: Option<Zone>, destination: Zone) -> RouteClass {
    match user_zone {
        Some(zone) => classify(zone, destination),
        None => RouteClass::Unresolved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Zone::*;

    #[test]
    fn test_full_classification_table() {
        let table = [
            (BeforeSecurity, BeforeSecurity, RouteClass::SameZoneOrTransition),
            (BeforeSecurity, TransitionPoint, RouteClass::SameZoneOrTransition),
            (BeforeSecurity, AfterSecurity, RouteClass::BeforeToAfter),
            (AfterSecurity, BeforeSecurity, RouteClass::AfterToBefore),
            (AfterSecurity, TransitionPoint, RouteClass::SameZoneOrTransition),
            (AfterSecurity, AfterSecurity, RouteClass::SameZoneOrTransition),
            (TransitionPoint, BeforeSecurity, RouteClass::Unresolved),
            (TransitionPoint, TransitionPoint, RouteClass::SameZoneOrTransition),
            (TransitionPoint, AfterSecurity, RouteClass::Unresolved),
        ];
        for (start, end, expected) in table {
            assert_eq!(classify(start, end), expected, "{start} -> {end}");
        }
    }

    #[test]
    fn test_unknown_user_zone_is_unresolved() {
        assert_eq!(classify_user(None, AfterSecurity), RouteClass::Unresolved);
        assert_eq!(
            classify_user(Some(BeforeSecurity), AfterSecurity),
            RouteClass::BeforeToAfter
        );
    }
}
