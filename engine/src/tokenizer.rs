/// Tokenize text into lowercased whitespace-delimited words.
///
/// Splitting on runs of whitespace means leading, trailing, or repeated
/// whitespace never produces an empty token, so the empty string can never
/// become an index key. No stemming, stopword removal, or normalization
/// beyond lowercasing: queries must use the same word forms as documents.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
