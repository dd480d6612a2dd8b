//! The multi-turn navigation dialogue state machine.
//!
//! The machine is pure: one inbound turn plus the stored session state maps
//! to exactly one directive and the next session state. All I/O (phrase
//! resolution, directions generation, reply wording) happens around it.
//!
//! States: idle (no stored session) and awaiting-position (a `NavSession`
//! exists). Every turn while a session exists produces exactly one
//! directive.

use aeroguide_types::intent::RouteClass;
use aeroguide_types::location::{Location, Zone};
use aeroguide_types::session::NavSession;

use super::topology;

/// Resolved interpretation of one inbound turn.
#[derive(Debug, Clone)]
pub enum NavInput {
    /// Output of the phrase matcher: a start/end pair, a lone destination,
    /// or nothing recognizable.
    Route {
        start: Option<Location>,
        end: Option<Location>,
    },
    /// A self-reported position, meaningful while awaiting one.
    Position(Option<Zone>),
}

/// What the caller must do in response to a turn.
#[derive(Debug, Clone, PartialEq)]
pub enum NavDirective {
    /// Route complete: phrase directions to `dest` and attach its map.
    Directions { start_zone: Zone, dest: Location },
    /// Landside-to-airside: the user must cross security before routing.
    CrossSecurityFirst { dest: Location },
    /// Airside-to-landside: terminally unreachable.
    Unreachable { dest: Location },
    /// A destination is known but the user's position is not; ask for it.
    AskPosition { dest: Location },
    /// Position answer not recognized; ask again.
    RepeatPosition { dest: Location },
    /// Too many unrecognized position answers; give up.
    Aborted { dest: Location },
    /// Nothing navigable recognized in the turn.
    NotUnderstood,
}

/// Advance the machine by one turn.
///
/// `max_zone_retries` bounds consecutive unrecognized position answers
/// before the dialogue aborts and clears.
pub fn step(
    session: Option<NavSession>,
    input: NavInput,
    max_zone_retries: u8,
) -> (NavDirective, Option<NavSession>) {
    match input {
        NavInput::Route {
            start: Some(start),
            end: Some(end),
        } => route_step(start, end, session),
        NavInput::Route {
            start: None,
            end: Some(end),
        } => {
            // a bare destination (re)starts the dialogue, replacing any
            // earlier pending route
            let next = NavSession::new(end.clone());
            (NavDirective::AskPosition { dest: end }, Some(next))
        }
        NavInput::Route { end: None, .. } => (NavDirective::NotUnderstood, session),
        NavInput::Position(zone) => match session {
            Some(pending) => position_step(zone, pending, max_zone_retries),
            None => (NavDirective::NotUnderstood, None),
        },
    }
}

fn route_step(
    start: Location,
    end: Location,
    session: Option<NavSession>,
) -> (NavDirective, Option<NavSession>) {
    match topology::classify(start.zone, end.zone) {
        RouteClass::SameZoneOrTransition => (
            NavDirective::Directions {
                start_zone: start.zone,
                dest: end,
            },
            None,
        ),
        RouteClass::BeforeToAfter => {
            let next = NavSession::with_zone(end.clone(), Zone::BeforeSecurity);
            (NavDirective::CrossSecurityFirst { dest: end }, Some(next))
        }
        RouteClass::AfterToBefore => (NavDirective::Unreachable { dest: end }, None),
        RouteClass::Unresolved => (NavDirective::NotUnderstood, session),
    }
}

fn position_step(
    zone: Option<Zone>,
    mut pending: NavSession,
    max_zone_retries: u8,
) -> (NavDirective, Option<NavSession>) {
    match topology::classify_user(zone, pending.destination.zone) {
        RouteClass::SameZoneOrTransition => (
            NavDirective::Directions {
                // classify_user only yields this with a known zone
                start_zone: zone.unwrap_or(pending.destination.zone),
                dest: pending.destination,
            },
            None,
        ),
        RouteClass::BeforeToAfter => {
            pending.user_zone = Some(Zone::BeforeSecurity);
            pending.retries = 0;
            let dest = pending.destination.clone();
            (NavDirective::CrossSecurityFirst { dest }, Some(pending))
        }
        RouteClass::AfterToBefore => (
            NavDirective::Unreachable {
                dest: pending.destination,
            },
            None,
        ),
        RouteClass::Unresolved => {
            pending.retries = pending.retries.saturating_add(1);
            if pending.retries >= max_zone_retries {
                (
                    NavDirective::Aborted {
                        dest: pending.destination,
                    },
                    None,
                )
            } else {
                let dest = pending.destination.clone();
                (NavDirective::RepeatPosition { dest }, Some(pending))
            }
        }
    }
}
