//! Turning dialogue directives into wire replies.
//!
//! One helper per directive keeps the reply shapes in a single place:
//! completed routes are navigation modals carrying the destination's map,
//! position prompts carry the request-location action, everything else is a
//! plain localized answer.

use aeroguide_types::chat::Lang;
use aeroguide_types::location::Location;
use aeroguide_types::wire::AskReply;

use crate::nav::messages;

const INTENT_TAGS: [&str; 4] = ["NAVIGATION", "CURRENCY", "PLAYLIST", "INFORMATION"];

/// Remove a leaked `INTENT:<TAG>:` prefix from generated text.
///
/// The tag contract is parsed once at the classifier boundary; this is the
/// last line of defense before model output reaches the caller. Text without
/// a leading tag passes through untouched.
pub fn strip_intent_prefix(text: &str) -> &str {
    let trimmed = text.trim_start();
    let Some(after_intent) = trimmed.strip_prefix("INTENT:") else {
        return text;
    };
    let after_intent = after_intent.trim_start();
    for tag in INTENT_TAGS {
        if let Some(after_tag) = after_intent.strip_prefix(tag) {
            let after_tag = after_tag.trim_start();
            if let Some(payload) = after_tag.strip_prefix(':') {
                return payload.trim();
            }
        }
    }
    text
}

/// Completed route: generated directions plus the destination's map.
pub fn directions_reply(text: &str, dest: &Location) -> AskReply {
    AskReply::navigation_modal(strip_intent_prefix(text), &dest.map_file)
}

/// The user must clear security before the route exists.
pub fn cross_security_reply(lang: Lang, dest: &Location) -> AskReply {
    AskReply::answer(messages::cross_security_first(lang, dest.name.get(lang)))
}

/// Airside-to-landside routes are terminal.
pub fn unreachable_reply(lang: Lang, dest: &Location) -> AskReply {
    AskReply::answer(messages::unreachable(lang, dest.name.get(lang)))
}

/// First ask where the user currently is.
pub fn ask_position_reply(lang: Lang, dest: &Location) -> AskReply {
    AskReply::request_location(messages::ask_position(lang, dest.name.get(lang)))
}

/// The position answer was not recognized; ask again.
pub fn repeat_position_reply(lang: Lang) -> AskReply {
    AskReply::request_location(messages::position_not_understood(lang))
}

/// Too many unrecognized position answers; the dialogue gives up.
pub fn aborted_reply(lang: Lang, dest: &Location) -> AskReply {
    AskReply::answer(messages::aborted(lang, dest.name.get(lang)))
}

/// Nothing navigable was recognized in the turn.
pub fn not_understood_reply(lang: Lang) -> AskReply {
    AskReply::answer(messages::route_not_understood(lang))
}
