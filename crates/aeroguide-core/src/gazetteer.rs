//! The location gazetteer: the static catalog of navigable points and the
//! alias matching that grounds free-text phrases in it.
//!
//! Matching is substring containment over normalized text, scanned
//! longest-alias-first so specific aliases ("gate 10") beat generic ones
//! ("gate"). Declaration order breaks length ties, which keeps every lookup
//! deterministic for a fixed dataset.

use std::path::Path;

use aeroguide_types::chat::Lang;
use aeroguide_types::error::GazetteerError;
use aeroguide_types::location::{GazetteerDoc, Location, UserLocationAlias, Zone};

/// Bundled Edinburgh Airport dataset, used when no override path is
/// configured.
const DEFAULT_DATASET: &str = include_str!("../data/gazetteer.toml");

const TO_KEYWORDS_EN: &[&str] = &["to", "towards", "into"];
const FROM_KEYWORDS_EN: &[&str] = &["from"];
const TO_KEYWORDS_PL: &[&str] = &["do", "na", "w stronę"];
const FROM_KEYWORDS_PL: &[&str] = &["z", "od", "spod"];

fn to_keywords(lang: Lang) -> &'static [&'static str] {
    match lang {
        Lang::Pl => TO_KEYWORDS_PL,
        Lang::En => TO_KEYWORDS_EN,
    }
}

fn from_keywords(lang: Lang) -> &'static [&'static str] {
    match lang {
        Lang::Pl => FROM_KEYWORDS_PL,
        Lang::En => FROM_KEYWORDS_EN,
    }
}

/// Lowercase, strip sentence punctuation, collapse whitespace.
///
/// Aliases and utterances go through the same normalization, so containment
/// checks never trip over case or stray punctuation. Hyphens survive
/// ("check-in" is an alias).
pub fn normalize(text: &str) -> String {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| {
            if matches!(c, '.' | ',' | '!' | '?' | ';' | ':' | '"' | '(' | ')') {
                ' '
            } else {
                c
            }
        })
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// One normalized alias pointing back at its location, pre-sorted for the
/// longest-first scan.
#[derive(Debug, Clone)]
struct RankedAlias {
    alias: String,
    location: usize,
}

#[derive(Debug, Clone)]
struct RankedUserPhrase {
    phrase: String,
    zone: Zone,
}

/// The static catalog of navigable locations and user-position phrases.
///
/// Loaded once at startup; immutable afterwards.
#[derive(Debug, Clone)]
pub struct Gazetteer {
    locations: Vec<Location>,
    ranked_pl: Vec<RankedAlias>,
    ranked_en: Vec<RankedAlias>,
    user_pl: Vec<RankedUserPhrase>,
    user_en: Vec<RankedUserPhrase>,
}

impl Gazetteer {
    /// Parse and validate a gazetteer document.
    pub fn from_toml(raw: &str) -> Result<Self, GazetteerError> {
        let doc: GazetteerDoc =
            toml::from_str(raw).map_err(|e| GazetteerError::Parse(e.to_string()))?;
        Self::from_doc(doc)
    }

    /// The bundled default dataset.
    pub fn bundled() -> Self {
        Self::from_toml(DEFAULT_DATASET).expect("bundled gazetteer dataset is valid")
    }

    /// Load a gazetteer from a TOML file on disk.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, GazetteerError> {
        let raw = tokio::fs::read_to_string(path.as_ref())
            .await
            .map_err(|e| GazetteerError::Io(e.to_string()))?;
        Self::from_toml(&raw)
    }

    fn from_doc(doc: GazetteerDoc) -> Result<Self, GazetteerError> {
        if doc.locations.is_empty() {
            return Err(GazetteerError::Empty);
        }
        let mut seen = std::collections::HashSet::new();
        for location in &doc.locations {
            if !seen.insert(location.id.clone()) {
                return Err(GazetteerError::DuplicateId(location.id.clone()));
            }
        }

        let ranked_pl = rank_aliases(&doc.locations, Lang::Pl);
        let ranked_en = rank_aliases(&doc.locations, Lang::En);
        let user_pl = rank_user_phrases(&doc.user_aliases, Lang::Pl);
        let user_en = rank_user_phrases(&doc.user_aliases, Lang::En);

        Ok(Self {
            locations: doc.locations,
            ranked_pl,
            ranked_en,
            user_pl,
            user_en,
        })
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Extract and resolve a full start/end route from an utterance.
    ///
    /// The right-most "to"-preposition splits off the end phrase; within the
    /// words before it, the right-most "from"-preposition splits off the
    /// start phrase. Both phrases must resolve to locations for the route to
    /// count. When several locations match the start phrase, one sharing a
    /// zone with an end-phrase candidate wins.
    pub fn resolve_route(&self, utterance: &str, lang: Lang) -> Option<(Location, Location)> {
        let text = normalize(utterance);
        let words: Vec<&str> = text.split_whitespace().collect();

        let (to_idx, to_len) = rightmost_keyword(&words, to_keywords(lang))?;
        let end_phrase = words[to_idx + to_len..].join(" ");
        let (from_idx, from_len) = rightmost_keyword(&words[..to_idx], from_keywords(lang))?;
        let start_phrase = words[from_idx + from_len..to_idx].join(" ");

        let end_candidates = self.candidates(&end_phrase, lang);
        let start_candidates = self.candidates(&start_phrase, lang);
        let end = *end_candidates.first()?;

        let start = if start_candidates.len() > 1 {
            let end_zones: Vec<Zone> = end_candidates
                .iter()
                .map(|&i| self.locations[i].zone)
                .collect();
            *start_candidates
                .iter()
                .find(|&&i| end_zones.contains(&self.locations[i].zone))
                .unwrap_or(&start_candidates[0])
        } else {
            *start_candidates.first()?
        };

        Some((self.locations[start].clone(), self.locations[end].clone()))
    }

    /// The first location (longest-alias-first) mentioned in the utterance.
    pub fn find_destination(&self, utterance: &str, lang: Lang) -> Option<Location> {
        let text = normalize(utterance);
        self.candidates(&text, lang)
            .first()
            .map(|&i| self.locations[i].clone())
    }

    /// Resolve a self-reported position phrase to a zone.
    pub fn find_user_zone(&self, utterance: &str, lang: Lang) -> Option<Zone> {
        let text = normalize(utterance);
        let phrases = match lang {
            Lang::Pl => &self.user_pl,
            Lang::En => &self.user_en,
        };
        phrases
            .iter()
            .find(|p| text.contains(&p.phrase))
            .map(|p| p.zone)
    }

    /// Map image for the first location mentioned in a text, if any.
    ///
    /// Used to attach an `imageUrl` to informational answers: callers try
    /// the question first, then the generated answer.
    pub fn find_map(&self, text: &str, lang: Lang) -> Option<&str> {
        let normalized = normalize(text);
        self.candidates(&normalized, lang)
            .first()
            .map(|&i| self.locations[i].map_file.as_str())
    }

    /// Location indices whose aliases occur in the phrase, in ranked order,
    /// deduplicated.
    fn candidates(&self, phrase: &str, lang: Lang) -> Vec<usize> {
        if phrase.is_empty() {
            return Vec::new();
        }
        let ranked = match lang {
            Lang::Pl => &self.ranked_pl,
            Lang::En => &self.ranked_en,
        };
        let mut out = Vec::new();
        for entry in ranked {
            if phrase.contains(&entry.alias) && !out.contains(&entry.location) {
                out.push(entry.location);
            }
        }
        out
    }
}

fn rank_aliases(locations: &[Location], lang: Lang) -> Vec<RankedAlias> {
    let mut ranked: Vec<RankedAlias> = locations
        .iter()
        .enumerate()
        .flat_map(|(idx, loc)| {
            loc.aliases.get(lang).iter().map(move |alias| RankedAlias {
                alias: normalize(alias),
                location: idx,
            })
        })
        .filter(|r| !r.alias.is_empty())
        .collect();
    // stable: declaration order breaks length ties
    ranked.sort_by(|a, b| b.alias.len().cmp(&a.alias.len()));
    ranked
}

fn rank_user_phrases(aliases: &[UserLocationAlias], lang: Lang) -> Vec<RankedUserPhrase> {
    let mut ranked: Vec<RankedUserPhrase> = aliases
        .iter()
        .flat_map(|entry| {
            entry
                .phrases
                .get(lang)
                .iter()
                .map(move |phrase| RankedUserPhrase {
                    phrase: normalize(phrase),
                    zone: entry.zone,
                })
        })
        .filter(|r| !r.phrase.is_empty())
        .collect();
    ranked.sort_by(|a, b| b.phrase.len().cmp(&a.phrase.len()));
    ranked
}

/// Right-most occurrence of any keyword, as (start index, word count).
///
/// Keywords may span several words ("w stronę"). Matching is per whole
/// word, so "do" never fires inside "dojść".
fn rightmost_keyword(words: &[&str], keywords: &[&str]) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    for keyword in keywords {
        let parts: Vec<&str> = keyword.split_whitespace().collect();
        if parts.is_empty() || parts.len() > words.len() {
            continue;
        }
        for start in (0..=words.len() - parts.len()).rev() {
            if words[start..start + parts.len()] == parts[..] {
                if best.is_none_or(|(b, _)| start > b) {
                    best = Some((start, parts.len()));
                }
                break;
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Gazetteer {
        Gazetteer::from_toml(
            r#"
            [[locations]]
            id = "check-in"
            zone = "before_security"
            map_file = "maps/landside.png"
            name = { pl = "Odprawa", en = "Check-in" }
            aliases = { pl = ["odprawa", "odprawy", "odprawie"], en = ["check-in", "check in"] }

            [[locations]]
            id = "security"
            zone = "transition_point"
            map_file = "maps/security.png"
            name = { pl = "Kontrola bezpieczeństwa", en = "Security control" }
            aliases = { pl = ["kontrola", "kontroli"], en = ["security", "security control"] }

            [[locations]]
            id = "gates"
            zone = "after_security"
            map_file = "maps/airside.png"
            name = { pl = "Bramki", en = "Gates" }
            aliases = { pl = ["bramka", "bramki"], en = ["gate", "gates"] }

            [[locations]]
            id = "gate-10"
            zone = "after_security"
            map_file = "maps/airside.png"
            name = { pl = "Bramka 10", en = "Gate 10" }
            aliases = { pl = ["bramka 10", "bramki 10"], en = ["gate 10"] }

            [[locations]]
            id = "duty-free"
            zone = "after_security"
            map_file = "maps/airside.png"
            name = { pl = "Sklepy", en = "Duty free" }
            aliases = { pl = ["sklepy"], en = ["duty free", "shops"] }

            [[user_aliases]]
            zone = "before_security"
            phrases = { pl = ["przy odprawie", "przed kontrolą"], en = ["at check-in", "before security"] }

            [[user_aliases]]
            zone = "after_security"
            phrases = { pl = ["przy bramce", "za kontrolą"], en = ["at the gate", "gate", "after security"] }
            "#,
        )
        .unwrap()
    }

    #[test]
    fn test_bundled_dataset_parses() {
        let gazetteer = Gazetteer::bundled();
        assert!(!gazetteer.locations().is_empty());
    }

    #[test]
    fn test_normalize_strips_punctuation_and_case() {
        assert_eq!(normalize("  Where IS   the Gate?! "), "where is the gate");
        assert_eq!(normalize("check-in."), "check-in");
    }

    #[test]
    fn test_empty_gazetteer_rejected() {
        let err = Gazetteer::from_toml("").unwrap_err();
        assert!(matches!(err, GazetteerError::Empty));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let err = Gazetteer::from_toml(
            r#"
            [[locations]]
            id = "x"
            zone = "before_security"
            map_file = "m.png"
            name = { pl = "A", en = "A" }

            [[locations]]
            id = "x"
            zone = "after_security"
            map_file = "m.png"
            name = { pl = "B", en = "B" }
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, GazetteerError::DuplicateId(id) if id == "x"));
    }

    #[test]
    fn test_resolve_route_en() {
        let g = fixture();
        let (start, end) = g
            .resolve_route("How do I get from check-in to gate 10?", Lang::En)
            .unwrap();
        assert_eq!(start.id, "check-in");
        assert_eq!(end.id, "gate-10");
    }

    #[test]
    fn test_resolve_route_pl() {
        let g = fixture();
        let (start, end) = g
            .resolve_route("jak dojść z odprawy do bramki 10", Lang::Pl)
            .unwrap();
        assert_eq!(start.id, "check-in");
        assert_eq!(end.id, "gate-10");
    }

    #[test]
    fn test_resolve_route_pl_multiword_keyword() {
        let g = fixture();
        // "w stronę" spans two words; both must be consumed so the end
        // phrase starts at "bramki 10"
        let (start, end) = g
            .resolve_route("z odprawy w stronę bramki 10", Lang::Pl)
            .unwrap();
        assert_eq!(start.id, "check-in");
        assert_eq!(end.id, "gate-10");
    }

    #[test]
    fn test_keyword_matches_whole_words_only() {
        let g = fixture();
        // "dojść" contains "do" but is not a to-keyword; without a real
        // preposition there is no route
        assert!(g.resolve_route("chcę dojść bramki 10", Lang::Pl).is_none());
    }

    #[test]
    fn test_resolve_route_uses_rightmost_to_keyword() {
        let g = fixture();
        // the second "to" wins: end phrase is "gate 10", not "get from check-in..."
        let (start, end) = g
            .resolve_route("i want to go from check-in to gate 10", Lang::En)
            .unwrap();
        assert_eq!(start.id, "check-in");
        assert_eq!(end.id, "gate-10");
    }

    #[test]
    fn test_route_requires_both_endpoints() {
        let g = fixture();
        assert!(g.resolve_route("take me to gate 10", Lang::En).is_none());
        assert!(g.resolve_route("from check-in", Lang::En).is_none());
        assert!(g.resolve_route("hello there", Lang::En).is_none());
    }

    #[test]
    fn test_ambiguous_start_prefers_end_zone() {
        let g = fixture();
        // start phrase mentions both security (transition) and the shops
        // (after_security); the end is airside, so the shops win
        let (start, end) = g
            .resolve_route("from the shops by security to gate 10", Lang::En)
            .unwrap();
        assert_eq!(start.id, "duty-free");
        assert_eq!(end.id, "gate-10");
    }

    #[test]
    fn test_longest_alias_wins() {
        let g = fixture();
        // "gate 10" must resolve to the specific gate, not the generic "gate"
        let dest = g.find_destination("take me to gate 10 please", Lang::En).unwrap();
        assert_eq!(dest.id, "gate-10");
        let generic = g.find_destination("where is the gate", Lang::En).unwrap();
        assert_eq!(generic.id, "gates");
    }

    #[test]
    fn test_find_destination_none_for_unknown() {
        let g = fixture();
        assert!(g.find_destination("what's the weather like", Lang::En).is_none());
    }

    #[test]
    fn test_find_user_zone() {
        let g = fixture();
        assert_eq!(
            g.find_user_zone("I'm at check-in right now", Lang::En),
            Some(Zone::BeforeSecurity)
        );
        assert_eq!(
            g.find_user_zone("jestem przy bramce", Lang::Pl),
            Some(Zone::AfterSecurity)
        );
        assert_eq!(g.find_user_zone("I'm at gate 10", Lang::En), Some(Zone::AfterSecurity));
        assert_eq!(g.find_user_zone("no idea where I am", Lang::En), None);
    }

    #[test]
    fn test_find_map_matches_question_text() {
        let g = fixture();
        assert_eq!(
            g.find_map("where is duty free?", Lang::En),
            Some("maps/airside.png")
        );
        assert_eq!(g.find_map("what time is it", Lang::En), None);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let g = fixture();
        let a = g.resolve_route("from check-in to gate 10", Lang::En).unwrap();
        let b = g.resolve_route("from check-in to gate 10", Lang::En).unwrap();
        assert_eq!(a.0.id, b.0.id);
        assert_eq!(a.1.id, b.1.id);
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gazetteer.toml");
        tokio::fs::write(
            &path,
            r#"
            [[locations]]
            id = "lounge"
            zone = "after_security"
            map_file = "maps/airside.png"
            name = { pl = "Salonik", en = "Lounge" }
            aliases = { pl = ["salonik"], en = ["lounge"] }
            "#,
        )
        .await
        .unwrap();

        let g = Gazetteer::load(&path).await.unwrap();
        assert_eq!(g.locations().len(), 1);
        assert!(Gazetteer::load(dir.path().join("missing.toml")).await.is_err());
    }
}
