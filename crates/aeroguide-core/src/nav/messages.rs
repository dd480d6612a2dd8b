//! Canned localized replies for the navigation dialogue.
//!
//! The assistant speaks Polish or English depending on the request; the
//! destination's localized display name is interpolated where it helps.

use aeroguide_types::chat::Lang;

pub fn ask_position(lang: Lang, destination: &str) -> String {
    match lang {
        Lang::Pl => format!(
            "Chętnie wskażę Ci drogę do: {destination}! 🗺️ Napisz najpierw, gdzie teraz jesteś, np. \"przy odprawie\" albo \"przy bramce\"."
        ),
        Lang::En => format!(
            "Happy to guide you to {destination}! 🗺️ First, tell me where you are right now, e.g. \"at check-in\" or \"at the gate\"."
        ),
    }
}

pub fn cross_security_first(lang: Lang, destination: &str) -> String {
    match lang {
        Lang::Pl => format!(
            "Aby dotrzeć do: {destination}, musisz najpierw przejść przez kontrolę bezpieczeństwa. 🛂 Daj znać, gdy będziesz po drugiej stronie!"
        ),
        Lang::En => format!(
            "To reach {destination} you first need to go through security control. 🛂 Let me know once you're on the other side!"
        ),
    }
}

pub fn unreachable(lang: Lang, destination: &str) -> String {
    match lang {
        Lang::Pl => format!(
            "Niestety, {destination} znajduje się przed kontrolą bezpieczeństwa, a po jej przejściu nie można zawrócić. 🙁"
        ),
        Lang::En => format!(
            "Unfortunately {destination} is before security control, and once you are through security you cannot go back. 🙁"
        ),
    }
}

pub fn position_not_understood(lang: Lang) -> String {
    match lang {
        Lang::Pl => {
            "Przepraszam, nie rozpoznałem tego miejsca. 🤔 Napisz np. \"przy odprawie\" albo \"przy bramce\".".to_string()
        }
        Lang::En => {
            "Sorry, I didn't recognize that place. 🤔 Try something like \"at check-in\" or \"at the gate\".".to_string()
        }
    }
}

pub fn route_not_understood(lang: Lang) -> String {
    match lang {
        Lang::Pl => {
            "Nie udało mi się rozpoznać tej trasy. 🤔 Napisz np. \"jak dojść z odprawy do bramki 10\".".to_string()
        }
        Lang::En => {
            "I couldn't work out that route. 🤔 Try something like \"how do I get from check-in to gate 10\".".to_string()
        }
    }
}

pub fn aborted(lang: Lang, destination: &str) -> String {
    match lang {
        Lang::Pl => format!(
            "Nie udało nam się ustalić, gdzie jesteś, więc przerywam nawigację do: {destination}. Zapytaj ponownie w dowolnym momencie! 🧭"
        ),
        Lang::En => format!(
            "We couldn't work out where you are, so I'm stopping the navigation to {destination}. Ask again any time! 🧭"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_interpolate_destination() {
        let msg = ask_position(Lang::En, "Gate 10");
        assert!(msg.contains("Gate 10"));
        let msg = cross_security_first(Lang::Pl, "Bramka 10");
        assert!(msg.contains("Bramka 10"));
        assert!(msg.contains("kontrolę bezpieczeństwa"));
    }

    #[test]
    fn test_messages_localized() {
        assert!(unreachable(Lang::En, "the tram stop").contains("cannot go back"));
        assert!(unreachable(Lang::Pl, "tramwaj").contains("nie można zawrócić"));
        assert_ne!(position_not_understood(Lang::Pl), position_not_understood(Lang::En));
    }
}
