use unicode_normalization::UnicodeNormalization;

/// Folds text for blank comparison: NFD decomposition, diacritics stripped,
/// lowercased, trimmed.
pub fn normalize_text(s: &str) -> String {
    s.nfd()
        .filter(|c| !unicode_normalization::char::is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_text() {
        assert_eq!(normalize_text("Café"), "cafe");
        assert_eq!(normalize_text("  ÉLÈVE "), "eleve");
        assert_eq!(normalize_text("naïve"), normalize_text("NAIVE"));
    }
}
