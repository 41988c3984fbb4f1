use super::KeywordTable;

/// Check both raw and normalized text for crisis language.
///
/// The raw form catches punctuated phrasing ("end my life"), the
/// normalized form catches what survives punctuation stripping and
/// stop-word removal ("end life"). Any match wins over every other
/// classification signal, unconditionally.
pub fn contains_crisis_language(table: &KeywordTable, raw: &str, normalized: &str) -> bool {
    let raw_lower = raw.to_lowercase();
    table
        .crisis_raw_phrases()
        .iter()
        .any(|phrase| raw_lower.contains(phrase.as_str()))
        || table
            .crisis_normalized_phrases()
            .iter()
            .any(|phrase| normalized.contains(phrase.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_raw_phrasing() {
        let table = KeywordTable::default();
        assert!(contains_crisis_language(
            &table,
            "I want to end my life.",
            ""
        ));
        assert!(contains_crisis_language(&table, "NO REASON TO LIVE", ""));
    }

    #[test]
    fn test_matches_normalized_phrasing() {
        let table = KeywordTable::default();
        // Stop-word removal can reduce "want to kill myself" to this.
        assert!(contains_crisis_language(&table, "", "want kill"));
        assert!(contains_crisis_language(&table, "", "no reason live"));
    }

    #[test]
    fn test_plain_text_does_not_match() {
        let table = KeywordTable::default();
        assert!(!contains_crisis_language(
            &table,
            "I had a lovely afternoon",
            "i had a lovely afternoon"
        ));
    }
}
