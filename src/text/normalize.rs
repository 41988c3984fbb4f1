use super::Lemmatizer;

/// Emoticon tokens substituted with words before punctuation stripping.
///
/// Substitutions are space-padded so later word-boundary keyword
/// matching sees them as standalone words. Keys are lowercase and are
/// matched after the input has been lowercased.
const EMOTICON_WORDS: &[(&str, &str)] = &[
    (":)", "happy"),
    (":(", "sad"),
    (":d", "happy"),
    (":p", "playful"),
];

/// Normalize raw text for keyword matching and feature extraction.
///
/// Lowercases, maps emoticons to words, strips punctuation, collapses
/// whitespace, then applies the lemmatizer when one is available.
/// Deterministic; normalizing already-normalized text changes nothing.
pub fn normalize(raw: &str, lemmatizer: &dyn Lemmatizer) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let mut text = raw.to_lowercase();
    for (emoticon, word) in EMOTICON_WORDS {
        if text.contains(emoticon) {
            text = text.replace(emoticon, &format!(" {word} "));
        }
    }

    let stripped: String = text
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c.is_whitespace() {
                c
            } else {
                ' '
            }
        })
        .collect();

    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");

    if lemmatizer.is_available() {
        lemmatizer.reduce(&collapsed)
    } else {
        collapsed
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::text::{LexiconLemmatizer, PassthroughLemmatizer};

    #[test]
    fn test_lowercases_and_strips_punctuation() {
        assert_eq!(
            normalize("I can't BELIEVE it!!", &PassthroughLemmatizer),
            "i can t believe it"
        );
    }

    #[test]
    fn test_emoticons_become_words() {
        assert_eq!(
            normalize("great day :)", &PassthroughLemmatizer),
            "great day happy"
        );
        // Uppercase emoticons match because lowercasing happens first.
        assert_eq!(
            normalize("well :D then :P", &PassthroughLemmatizer),
            "well happy then playful"
        );
        assert_eq!(
            normalize("rough week :(", &PassthroughLemmatizer),
            "rough week sad"
        );
    }

    #[test]
    fn test_collapses_whitespace_runs() {
        assert_eq!(
            normalize("  too   much\n\nspace\t here  ", &PassthroughLemmatizer),
            "too much space here"
        );
    }

    #[test]
    fn test_empty_and_whitespace_only() {
        assert_eq!(normalize("", &PassthroughLemmatizer), "");
        assert_eq!(normalize("   \n\t ", &PassthroughLemmatizer), "");
    }

    #[test]
    fn test_idempotent_without_lemmatizer() {
        let once = normalize("So... MANY!! symbols?? :)", &PassthroughLemmatizer);
        let twice = normalize(&once, &PassthroughLemmatizer);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_idempotent_with_lemmatizer() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            br#"{
                "stop_words": ["i", "am", "so"],
                "lemmas": {"feelings": "feeling", "running": "run"}
            }"#,
        )
        .unwrap();
        let lemmatizer = LexiconLemmatizer::load(file.path()).unwrap();

        let once = normalize("I am SO running from feelings!", &lemmatizer);
        assert_eq!(once, "run from feeling");
        let twice = normalize(&once, &lemmatizer);
        assert_eq!(once, twice);
    }
}
