/// Listing phrases that signal a motivated seller.
pub const MOTIVATED_KEYWORDS: [&str; 20] = [
    "fixer-upper",
    "needs work",
    "motivated seller",
    "cash only",
    "as-is",
    "handyman special",
    "investor special",
    "below market",
    "price reduced",
    "must sell",
    "estate sale",
    "bank owned",
    "foreclosure",
    "short sale",
    "distressed",
    "vacant",
    "fire damage",
    "water damage",
    "needs rehab",
    "tlc needed",
];

pub fn is_motivated_keyword(candidate: &str) -> bool {
    MOTIVATED_KEYWORDS
        .iter()
        .any(|keyword| keyword.eq_ignore_ascii_case(candidate))
}

/// Supplied keywords that exactly match the canonical list, in input order.
pub fn matched_keywords(supplied: &[String]) -> Vec<String> {
    supplied
        .iter()
        .filter(|candidate| is_motivated_keyword(candidate))
        .cloned()
        .collect()
}

/// Canonical keywords found anywhere inside free listing text.
pub fn detect_keywords(text: &str) -> Vec<&'static str> {
    let haystack = text.to_lowercase();
    MOTIVATED_KEYWORDS
        .iter()
        .copied()
        .filter(|keyword| haystack.contains(keyword))
        .collect()
}
