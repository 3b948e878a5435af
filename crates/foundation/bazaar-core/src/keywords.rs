//! Comma-separated keyword fields

/// Split a keyword field into trimmed, non-empty tokens without duplicates.
///
/// Equality is case-sensitive; first occurrence wins.
pub fn split_keywords(field: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for token in field.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !out.iter().any(|k| k == token) {
            out.push(token.to_string());
        }
    }
    out
}

/// Append `keyword` to the field unless an equal token is already present.
///
/// The result is re-joined with ", ".
pub fn merge_keyword(field: &str, keyword: &str) -> String {
    let mut tokens = split_keywords(field);
    let keyword = keyword.trim();
    if !keyword.is_empty() && !tokens.iter().any(|k| k == keyword) {
        tokens.push(keyword.to_string());
    }
    tokens.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_dedups_and_trims() {
        assert_eq!(
            split_keywords(" sofa, leather,,sofa , Sofa "),
            vec!["sofa", "leather", "Sofa"]
        );
        assert!(split_keywords("  , ").is_empty());
    }

    #[test]
    fn test_merge_suppresses_duplicates() {
        assert_eq!(merge_keyword("", "vintage"), "vintage");
        assert_eq!(merge_keyword("sofa, leather", "vintage"), "sofa, leather, vintage");
        assert_eq!(merge_keyword("sofa, leather", " leather "), "sofa, leather");
        assert_eq!(merge_keyword("sofa", "Sofa"), "sofa, Sofa");
    }
}
